use armada::{CellState, Grid, GridError, ShotOutcome};

#[test]
fn resolve_hits_misses_and_wins() {
    let mut grid = Grid::with_ships(10, &[(2, 3), (2, 4)]).unwrap();
    assert_eq!(grid.ship_cells(), 2);

    assert_eq!(grid.resolve_shot(0, 0).unwrap(), ShotOutcome::Miss);
    assert_eq!(grid.cell(0, 0).unwrap(), CellState::Miss);

    assert_eq!(grid.resolve_shot(2, 3).unwrap(), ShotOutcome::Hit);
    assert_eq!(grid.cell(2, 3).unwrap(), CellState::Hit);
    assert!(!grid.all_sunk());

    // the last ship cell upgrades the hit to a win
    assert_eq!(grid.resolve_shot(2, 4).unwrap(), ShotOutcome::Win);
    assert!(grid.all_sunk());
}

#[test]
fn resolve_is_not_repeatable() {
    let mut grid = Grid::with_ships(10, &[(5, 5)]).unwrap();
    grid.resolve_shot(5, 5).unwrap();
    let before = grid.clone();
    assert_eq!(grid.resolve_shot(5, 5).unwrap_err(), GridError::AlreadyResolved);
    assert_eq!(grid.resolve_shot(0, 0).unwrap(), ShotOutcome::Miss);
    assert_eq!(grid.resolve_shot(0, 0).unwrap_err(), GridError::AlreadyResolved);
    // failed resolutions change nothing
    assert_eq!(grid.cell(5, 5).unwrap(), before.cell(5, 5).unwrap());
    assert!(grid.all_sunk());
}

#[test]
fn resolve_rejects_out_of_bounds() {
    let mut grid = Grid::new(10);
    assert_eq!(
        grid.resolve_shot(10, 0).unwrap_err(),
        GridError::OutOfBounds { row: 10, col: 0 }
    );
    assert_eq!(
        grid.cell(3, 11).unwrap_err(),
        GridError::OutOfBounds { row: 3, col: 11 }
    );
}

#[test]
fn view_marks_only_unknown_cells() {
    let mut view = Grid::new(10);
    view.mark_view(1, 1, ShotOutcome::Hit).unwrap();
    assert_eq!(view.cell(1, 1).unwrap(), CellState::Hit);
    view.mark_view(1, 2, ShotOutcome::Miss).unwrap();
    assert_eq!(view.cell(1, 2).unwrap(), CellState::Miss);
    // a win reads as a hit on the view
    view.mark_view(1, 3, ShotOutcome::Win).unwrap();
    assert_eq!(view.cell(1, 3).unwrap(), CellState::Hit);

    assert_eq!(
        view.mark_view(1, 1, ShotOutcome::Miss).unwrap_err(),
        GridError::InvalidTransition
    );
    assert_eq!(view.cell(1, 1).unwrap(), CellState::Hit);
}

#[test]
fn empty_grid_counts_as_sunk() {
    // a grid with no ships has nothing left to sink
    assert!(Grid::new(10).all_sunk());
}
