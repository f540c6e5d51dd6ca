//! Console presentation of the two boards.

use crate::common::GameOutcome;
use crate::grid::{CellState, Grid};

/// Injected presentation seam: the session reports through this instead of
/// printing, so interactive and headless runs share one control flow.
pub trait Presenter: Send {
    /// One-line status update.
    fn note(&mut self, line: &str);

    /// Show the player's own board and the opponent view.
    fn boards(&mut self, own: &Grid, view: &Grid);

    /// Final summary of both grids and the terminal status.
    fn game_over(&mut self, outcome: GameOutcome, own: &Grid, view: &Grid);
}

/// Render one grid. `reveal` shows unhit ship cells, used for the player's
/// own board; the opponent view keeps them as unknown water.
pub fn print_grid(grid: &Grid, reveal: bool) {
    print!("   ");
    for c in 0..grid.size() {
        print!(" {}", c);
    }
    println!();
    for r in 0..grid.size() {
        print!("{:2} ", r);
        for c in 0..grid.size() {
            let ch = match grid.cell(r, c) {
                Ok(CellState::Hit) => 'X',
                Ok(CellState::Miss) => 'o',
                Ok(CellState::Ship) if reveal => 'S',
                _ => '.',
            };
            print!(" {}", ch);
        }
        println!();
    }
}

pub struct ConsolePresenter;

impl ConsolePresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Presenter for ConsolePresenter {
    fn note(&mut self, line: &str) {
        println!("{}", line);
    }

    fn boards(&mut self, own: &Grid, view: &Grid) {
        println!("\nOpponent board:");
        print_grid(view, false);
        println!("\nYour board:");
        print_grid(own, true);
    }

    fn game_over(&mut self, outcome: GameOutcome, own: &Grid, view: &Grid) {
        println!("\n=== GAME OVER ===");
        self.boards(own, view);
        match outcome {
            GameOutcome::Win => println!("\nVictory! You have sunk the enemy fleet."),
            GameOutcome::Loss => println!("\nDefeat. Your fleet has been destroyed."),
            GameOutcome::Aborted => println!("\nGame aborted."),
        }
    }
}

/// Swallows all output; used by the simulation and tests.
pub struct QuietPresenter;

impl Presenter for QuietPresenter {
    fn note(&mut self, _line: &str) {}
    fn boards(&mut self, _own: &Grid, _view: &Grid) {}
    fn game_over(&mut self, _outcome: GameOutcome, _own: &Grid, _view: &Grid) {}
}
