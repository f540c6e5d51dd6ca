//! Per-cell board state for one side of the game.

use crate::common::{GridError, ShotOutcome};

/// State of a single cell.
///
/// On the player's own grid `Empty` is open water. On the opponent view it
/// means the cell has not been targeted yet; a view grid never holds `Ship`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Empty,
    Ship,
    Hit,
    Miss,
}

/// A square board of cells. Created once per player per game: the own grid
/// is populated by fleet placement, the opponent view starts all-unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// Create an empty grid of the given side length.
    pub fn new(size: usize) -> Self {
        Grid {
            size,
            cells: vec![CellState::Empty; size * size],
        }
    }

    /// Create a grid with ships already stamped at the given cells.
    /// Used for manual layouts; random placement goes through
    /// [`place_fleet`](crate::place_fleet).
    pub fn with_ships(size: usize, ships: &[(usize, usize)]) -> Result<Self, GridError> {
        let mut grid = Grid::new(size);
        for &(row, col) in ships {
            let idx = grid.index(row, col)?;
            grid.cells[idx] = CellState::Ship;
        }
        Ok(grid)
    }

    pub(crate) fn from_cells(size: usize, cells: Vec<CellState>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Grid { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if row >= self.size || col >= self.size {
            return Err(GridError::OutOfBounds { row, col });
        }
        Ok(row * self.size + col)
    }

    /// State of the cell at (row, col).
    pub fn cell(&self, row: usize, col: usize) -> Result<CellState, GridError> {
        Ok(self.cells[self.index(row, col)?])
    }

    /// Number of cells still holding an unhit ship segment.
    pub fn ship_cells(&self) -> usize {
        self.cells.iter().filter(|&&c| c == CellState::Ship).count()
    }

    /// Returns `true` when every originally occupied cell has been hit.
    pub fn all_sunk(&self) -> bool {
        !self.cells.contains(&CellState::Ship)
    }

    /// Resolve an incoming shot against this (own) grid.
    ///
    /// A ship cell becomes `Hit` and reports `Win` when it was the last one;
    /// open water becomes `Miss`. Re-resolving a settled cell fails with
    /// `AlreadyResolved` and changes nothing.
    pub fn resolve_shot(&mut self, row: usize, col: usize) -> Result<ShotOutcome, GridError> {
        let idx = self.index(row, col)?;
        match self.cells[idx] {
            CellState::Ship => {
                self.cells[idx] = CellState::Hit;
                if self.all_sunk() {
                    Ok(ShotOutcome::Win)
                } else {
                    Ok(ShotOutcome::Hit)
                }
            }
            CellState::Empty => {
                self.cells[idx] = CellState::Miss;
                Ok(ShotOutcome::Miss)
            }
            CellState::Hit | CellState::Miss => Err(GridError::AlreadyResolved),
        }
    }

    /// Record a reported outcome on this (opponent-view) grid.
    ///
    /// The cell must still be unknown; `Hit` and `Win` both mark a hit.
    pub fn mark_view(
        &mut self,
        row: usize,
        col: usize,
        outcome: ShotOutcome,
    ) -> Result<(), GridError> {
        let idx = self.index(row, col)?;
        if self.cells[idx] != CellState::Empty {
            return Err(GridError::InvalidTransition);
        }
        self.cells[idx] = match outcome {
            ShotOutcome::Hit | ShotOutcome::Win => CellState::Hit,
            ShotOutcome::Miss => CellState::Miss,
        };
        Ok(())
    }
}
