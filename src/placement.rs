//! Random fleet placement with a one-cell clearance ring.

use rand::rngs::SmallRng;
use rand::Rng;

use crate::common::PlacementError;
use crate::config::{PLACE_ATTEMPTS_PER_SHIP, PLACE_ATTEMPTS_TOTAL};
use crate::grid::{CellState, Grid};

/// Orientation of a ship run on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Scratch marker used only while placing. `Buffer` keeps later ships out of
/// the clearance ring; it never reaches the returned grid.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Marker {
    Free,
    Buffer,
    Ship,
}

/// Place every ship in `lengths`, in order, onto a fresh `size`x`size` grid.
///
/// Each draw samples an orientation and an in-bounds start uniformly, and is
/// discarded whole if any run cell is taken. A successful draw reserves the
/// run's bounding box grown by one cell (clamped to the board) before the
/// next ship samples, which is what guarantees at least one empty cell of
/// separation between distinct ships, diagonals included.
///
/// The caller seeds `rng` once per game; placement never reseeds. Draws are
/// capped per ship and across the fleet, failing with
/// [`PlacementError::Exhausted`] on pathological inputs.
pub fn place_fleet(
    rng: &mut SmallRng,
    size: usize,
    lengths: &[usize],
) -> Result<Grid, PlacementError> {
    for &length in lengths {
        if length == 0 || length > size {
            return Err(PlacementError::Unplaceable { length, size });
        }
    }

    let mut scratch = vec![Marker::Free; size * size];
    let mut total_attempts = 0;
    for &len in lengths {
        let mut attempts = 0;
        loop {
            attempts += 1;
            total_attempts += 1;
            if attempts > PLACE_ATTEMPTS_PER_SHIP || total_attempts > PLACE_ATTEMPTS_TOTAL {
                return Err(PlacementError::Exhausted {
                    attempts: total_attempts,
                });
            }

            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_row, max_col) = match orientation {
                Orientation::Horizontal => (size - 1, size - len),
                Orientation::Vertical => (size - len, size - 1),
            };
            let row = rng.random_range(0..=max_row);
            let col = rng.random_range(0..=max_col);
            let cell_of = |i: usize| match orientation {
                Orientation::Horizontal => (row, col + i),
                Orientation::Vertical => (row + i, col),
            };

            // No partial reuse: one taken cell discards the whole draw.
            if (0..len).any(|i| {
                let (r, c) = cell_of(i);
                scratch[r * size + c] != Marker::Free
            }) {
                continue;
            }

            let (end_row, end_col) = cell_of(len - 1);
            let lo_row = row.saturating_sub(1);
            let lo_col = col.saturating_sub(1);
            let hi_row = (end_row + 1).min(size - 1);
            let hi_col = (end_col + 1).min(size - 1);
            for r in lo_row..=hi_row {
                for c in lo_col..=hi_col {
                    if scratch[r * size + c] != Marker::Ship {
                        scratch[r * size + c] = Marker::Buffer;
                    }
                }
            }
            for i in 0..len {
                let (r, c) = cell_of(i);
                scratch[r * size + c] = Marker::Ship;
            }
            break;
        }
    }

    // Sweep the buffer markers; only the ships survive into the grid.
    let cells = scratch
        .into_iter()
        .map(|m| match m {
            Marker::Ship => CellState::Ship,
            Marker::Free | Marker::Buffer => CellState::Empty,
        })
        .collect();
    Ok(Grid::from_cells(size, cells))
}
