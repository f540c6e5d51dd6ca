//! Common types: shot outcomes, game outcomes, and error enums.

use core::fmt;

/// Result of resolving a shot against a grid.
///
/// `Win` is a `Hit` that sank the last remaining ship cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    Hit,
    Miss,
    Win,
}

impl ShotOutcome {
    /// Wire token for the `PLAY,RESULT` message.
    pub fn token(&self) -> &'static str {
        match self {
            ShotOutcome::Hit => "HIT",
            ShotOutcome::Miss => "MISS",
            ShotOutcome::Win => "WIN",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "HIT" => Some(ShotOutcome::Hit),
            "MISS" => Some(ShotOutcome::Miss),
            "WIN" => Some(ShotOutcome::Win),
            _ => None,
        }
    }
}

/// Terminal result of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Win,
    Loss,
    Aborted,
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Win => write!(f, "Win"),
            GameOutcome::Loss => write!(f, "Loss"),
            GameOutcome::Aborted => write!(f, "Aborted"),
        }
    }
}

/// Errors returned by grid operations.
#[derive(Debug, PartialEq, Eq)]
pub enum GridError {
    /// Coordinate lies outside the grid.
    OutOfBounds { row: usize, col: usize },
    /// Shot resolved against a cell that was already hit or missed.
    AlreadyResolved,
    /// Opponent-view mark on a cell that is no longer unknown.
    InvalidTransition,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::OutOfBounds { row, col } => {
                write!(f, "coordinate ({}, {}) is out of bounds", row, col)
            }
            GridError::AlreadyResolved => write!(f, "cell was already resolved"),
            GridError::InvalidTransition => write!(f, "cell is no longer unknown"),
        }
    }
}

/// Errors returned by fleet placement.
#[derive(Debug, PartialEq, Eq)]
pub enum PlacementError {
    /// A ship length that cannot fit on the grid at all.
    Unplaceable { length: usize, size: usize },
    /// Clearance-checked retries exceeded the configured cap.
    Exhausted { attempts: usize },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::Unplaceable { length, size } => {
                write!(f, "ship of length {} cannot fit on a {}x{} grid", length, size, size)
            }
            PlacementError::Exhausted { attempts } => {
                write!(f, "fleet placement gave up after {} attempts", attempts)
            }
        }
    }
}

/// Errors returned by the wire codec. Always recoverable: the session
/// discards the offending line and keeps waiting.
#[derive(Debug, PartialEq, Eq)]
pub enum ProtocolError {
    UnknownCommand(String),
    BadNumber(String),
    BadOutcome(String),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::UnknownCommand(cmd) => write!(f, "unknown command {:?}", cmd),
            ProtocolError::BadNumber(field) => write!(f, "invalid numeric field {:?}", field),
            ProtocolError::BadOutcome(field) => write!(f, "invalid result token {:?}", field),
        }
    }
}
