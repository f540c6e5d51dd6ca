//! Networked grid-combat client: randomized fleet placement, a tolerant
//! line-oriented wire codec, and the turn-taking session state machine,
//! played through a relay/matchmaking server.

mod common;
mod config;
mod grid;
mod input;
mod logging;
mod placement;
pub mod protocol;
mod session;
pub mod transport;
mod ui;

pub use common::*;
pub use config::*;
pub use grid::*;
pub use input::*;
pub use logging::init_logging;
pub use placement::*;
pub use protocol::{LineReader, Message, Position};
pub use session::*;
pub use transport::tcp::TcpTransport;
pub use ui::*;
