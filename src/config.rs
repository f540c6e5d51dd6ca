//! Board, fleet, and protocol configuration.

/// Side length of each board.
pub const GRID_SIZE: usize = 10;

/// Fleet ship lengths, placed in this order.
pub const FLEET: [usize; 7] = [5, 4, 3, 3, 2, 2, 2];

/// Total cells occupied by a fully placed fleet.
pub const FLEET_CELLS: usize = 21;

/// Game identifier announced to the relay server for pairing.
pub const DEFAULT_GAME_ID: &str = "SampleGame";

/// Relay server address used when none is given on the command line.
pub const DEFAULT_SERVER: &str = "127.0.0.1:10000";

/// Placement retry cap for a single ship.
pub const PLACE_ATTEMPTS_PER_SHIP: usize = 1_000;

/// Placement retry cap across the whole fleet.
pub const PLACE_ATTEMPTS_TOTAL: usize = 10_000;
