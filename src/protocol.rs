//! Line-oriented wire codec for the relay protocol.
//!
//! Every message is one ASCII line terminated by CRLF, with comma-delimited
//! fields and the command token first. Decoding is tolerant: a field whose
//! delimiter is missing swallows the remainder of the line instead of
//! failing.

use crate::common::{ProtocolError, ShotOutcome};
use crate::transport::Transport;

/// Pairing slot assigned by the relay server. The first position fires the
/// opening shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    First,
    Second,
}

impl Position {
    pub fn as_wire(&self) -> &'static str {
        match self {
            Position::First => "1",
            Position::Second => "2",
        }
    }

    pub fn from_wire(field: &str) -> Option<Self> {
        match field {
            "1" => Some(Position::First),
            "2" => Some(Position::Second),
            _ => None,
        }
    }
}

/// Messages exchanged with the relay server and, through it, the peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Announce availability and request pairing.
    Ready { name: String, game_id: String },
    /// Pairing result from the server.
    Start {
        position: Position,
        opponent: String,
        game_id: String,
    },
    /// A fired coordinate.
    Shot { x: u8, y: u8 },
    /// Resolution of the most recent shot sent by the recipient.
    ShotResult(ShotOutcome),
    /// Session-ending notice from the server.
    Error { reason: String },
}

/// Split the leftmost field off `rest` at `delim`. When the delimiter is
/// absent the whole remainder becomes the field and `rest` is left empty.
fn take_field<'a>(rest: &mut &'a str, delim: char) -> &'a str {
    match rest.find(delim) {
        Some(pos) => {
            let field = &rest[..pos];
            *rest = &rest[pos + delim.len_utf8()..];
            field
        }
        None => {
            let field = *rest;
            *rest = "";
            field
        }
    }
}

fn parse_coord(field: &str) -> Result<u8, ProtocolError> {
    field
        .parse::<u8>()
        .map_err(|_| ProtocolError::BadNumber(field.to_string()))
}

impl Message {
    /// Render the message as a CRLF-terminated wire line.
    pub fn encode(&self) -> String {
        match self {
            Message::Ready { name, game_id } => format!("READY,{},{}\r\n", name, game_id),
            Message::Start {
                position,
                opponent,
                game_id,
            } => format!("START,{},{},{}\r\n", position.as_wire(), opponent, game_id),
            Message::Shot { x, y } => format!("PLAY,{},{}\r\n", x, y),
            Message::ShotResult(outcome) => format!("PLAY,RESULT,{}\r\n", outcome.token()),
            Message::Error { reason } => format!("ERROR,{}\r\n", reason),
        }
    }

    /// Decode one line, with or without its CRLF terminator.
    pub fn decode(line: &str) -> Result<Self, ProtocolError> {
        let mut rest = line.strip_suffix('\n').unwrap_or(line);
        let command = take_field(&mut rest, ',');
        match command {
            "READY" => {
                let name = take_field(&mut rest, ',').to_string();
                let game_id = take_field(&mut rest, '\r').to_string();
                Ok(Message::Ready { name, game_id })
            }
            "START" => {
                let position = take_field(&mut rest, ',');
                let position = Position::from_wire(position)
                    .ok_or_else(|| ProtocolError::BadNumber(position.to_string()))?;
                let opponent = take_field(&mut rest, ',').to_string();
                let game_id = take_field(&mut rest, '\r').to_string();
                Ok(Message::Start {
                    position,
                    opponent,
                    game_id,
                })
            }
            "PLAY" => {
                let field = take_field(&mut rest, ',');
                if field == "RESULT" {
                    let token = take_field(&mut rest, '\r');
                    let outcome = ShotOutcome::from_token(token)
                        .ok_or_else(|| ProtocolError::BadOutcome(token.to_string()))?;
                    Ok(Message::ShotResult(outcome))
                } else {
                    let x = parse_coord(field)?;
                    let y = parse_coord(take_field(&mut rest, '\r'))?;
                    Ok(Message::Shot { x, y })
                }
            }
            "ERROR" => {
                let reason = take_field(&mut rest, '\r').to_string();
                Ok(Message::Error { reason })
            }
            other => Err(ProtocolError::UnknownCommand(other.to_string())),
        }
    }
}

/// Accumulates transport chunks until complete lines are available, so a
/// single read carrying half a message, or two messages, frames correctly.
pub struct LineReader {
    buf: Vec<u8>,
}

impl LineReader {
    pub fn new() -> Self {
        LineReader { buf: Vec::new() }
    }

    /// Next complete line with its terminator stripped, or `None` once the
    /// transport reports an orderly close.
    pub async fn next_line(
        &mut self,
        transport: &mut dyn Transport,
    ) -> anyhow::Result<Option<String>> {
        loop {
            if let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
                let mut line: Vec<u8> = self.buf.drain(..=pos).collect();
                line.pop();
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
                return Ok(Some(String::from_utf8_lossy(&line).into_owned()));
            }
            let chunk = transport.recv().await?;
            if chunk.is_empty() {
                return Ok(None);
            }
            self.buf.extend_from_slice(&chunk);
        }
    }
}
