//! The turn-taking protocol state machine.
//!
//! One session owns both grids, the wire codec, and the injected
//! transport/input/presentation collaborators, and drives the game from
//! `READY` to a terminal outcome. Protocol logic is single-threaded: each
//! step blocks on exactly one of network receive or coordinate input.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};

use crate::common::{GameOutcome, ShotOutcome};
use crate::grid::{CellState, Grid};
use crate::input::InputSource;
use crate::protocol::{LineReader, Message, Position};
use crate::transport::Transport;
use crate::ui::Presenter;

/// Protocol state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    AwaitingPairing,
    MyTurn,
    OpponentTurn,
    Over(GameOutcome),
}

pub struct GameSession {
    name: String,
    game_id: String,
    own: Grid,
    view: Grid,
    opponent: String,
    state: SessionState,
    transport: Box<dyn Transport>,
    reader: LineReader,
    input: Box<dyn InputSource>,
    presenter: Box<dyn Presenter>,
    shutdown: Arc<AtomicBool>,
}

impl GameSession {
    /// Build a session over an already-connected transport. `own` carries
    /// the placed fleet; the opponent view starts all-unknown.
    pub fn new(
        name: impl Into<String>,
        game_id: impl Into<String>,
        own: Grid,
        transport: Box<dyn Transport>,
        input: Box<dyn InputSource>,
        presenter: Box<dyn Presenter>,
    ) -> Self {
        let view = Grid::new(own.size());
        Self {
            name: name.into(),
            game_id: game_id.into(),
            own,
            view,
            opponent: String::new(),
            state: SessionState::Connecting,
            transport,
            reader: LineReader::new(),
            input,
            presenter,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag polled between loop iterations; setting it aborts the session
    /// at the next step boundary.
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        self.shutdown.clone()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn opponent(&self) -> &str {
        &self.opponent
    }

    pub fn own_grid(&self) -> &Grid {
        &self.own
    }

    pub fn opponent_view(&self) -> &Grid {
        &self.view
    }

    /// Stop background input activity. Idempotent; also runs on the normal
    /// exit path.
    pub fn close(&mut self) {
        self.input.stop();
    }

    /// Drive the session to a terminal outcome.
    pub async fn run(&mut self) -> anyhow::Result<GameOutcome> {
        loop {
            if self.shutdown.load(Ordering::SeqCst)
                && !matches!(self.state, SessionState::Over(_))
            {
                self.abort("shutdown requested");
            }
            match self.state {
                SessionState::Connecting => {
                    self.send(Message::Ready {
                        name: self.name.clone(),
                        game_id: self.game_id.clone(),
                    })
                    .await?;
                    self.presenter.note("Waiting to be paired...");
                    self.state = SessionState::AwaitingPairing;
                }
                SessionState::AwaitingPairing => self.await_pairing().await?,
                SessionState::MyTurn => self.take_turn().await?,
                SessionState::OpponentTurn => self.defend_turn().await?,
                SessionState::Over(outcome) => {
                    self.input.stop();
                    self.presenter.game_over(outcome, &self.own, &self.view);
                    return Ok(outcome);
                }
            }
        }
    }

    fn abort(&mut self, why: &str) {
        info!("session aborted: {}", why);
        self.state = SessionState::Over(GameOutcome::Aborted);
    }

    /// Transport failures are fatal: settle as aborted, show the summary,
    /// and surface the error to the caller.
    fn fail(&mut self, err: anyhow::Error) -> anyhow::Error {
        self.input.stop();
        self.state = SessionState::Over(GameOutcome::Aborted);
        self.presenter
            .game_over(GameOutcome::Aborted, &self.own, &self.view);
        err
    }

    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        let line = msg.encode();
        debug!("-> {}", line.trim_end());
        match self.transport.send(line.as_bytes()).await {
            Ok(()) => Ok(()),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Next decoded message. Malformed lines are discarded and the wait
    /// continues; an orderly close or an `ERROR` notice settles the session
    /// as aborted and yields `None`.
    async fn next_message(&mut self) -> anyhow::Result<Option<Message>> {
        loop {
            let line = match self.reader.next_line(self.transport.as_mut()).await {
                Ok(Some(line)) => line,
                Ok(None) => {
                    self.presenter.note("Connection closed by server.");
                    self.abort("connection closed");
                    return Ok(None);
                }
                Err(e) => return Err(self.fail(e)),
            };
            debug!("<- {}", line);
            match Message::decode(&line) {
                Ok(Message::Error { reason }) => {
                    if !self.opponent.is_empty()
                        && reason == format!("Opponent {} left", self.opponent)
                    {
                        self.presenter.note("Opponent left the game.");
                    } else {
                        self.presenter.note(&format!("Server error: {}", reason));
                    }
                    self.abort(&reason);
                    return Ok(None);
                }
                Ok(msg) => return Ok(Some(msg)),
                Err(e) => warn!("discarding malformed line: {}", e),
            }
        }
    }

    async fn await_pairing(&mut self) -> anyhow::Result<()> {
        let Some(msg) = self.next_message().await? else {
            return Ok(());
        };
        match msg {
            Message::Start {
                position,
                opponent,
                game_id,
            } => {
                if game_id != self.game_id {
                    warn!("paired for unknown game id {:?}, re-announcing", game_id);
                    self.presenter
                        .note(&format!("I don't know how to play {}", game_id));
                    self.send(Message::Ready {
                        name: self.name.clone(),
                        game_id: self.game_id.clone(),
                    })
                    .await?;
                    return Ok(());
                }
                self.presenter
                    .note(&format!("Paired with {}. Let's play a game.", opponent));
                self.opponent = opponent;
                self.state = match position {
                    Position::First => SessionState::MyTurn,
                    Position::Second => SessionState::OpponentTurn,
                };
            }
            other => debug!("ignoring {:?} while waiting to be paired", other),
        }
        Ok(())
    }

    /// Fire one shot and apply its result. A `HIT` keeps the turn; only a
    /// `MISS` passes it.
    async fn take_turn(&mut self) -> anyhow::Result<()> {
        self.presenter.boards(&self.own, &self.view);
        let size = self.view.size();
        let (x, y) = loop {
            let x = self.input.next_coordinate("Shot row", size)?;
            let y = self.input.next_coordinate("Shot col", size)?;
            // Repeats are rejected locally, before any network traffic.
            match self.view.cell(x, y) {
                Ok(CellState::Empty) => break (x, y),
                _ => self
                    .presenter
                    .note("Already targeted there; pick another cell."),
            }
        };
        self.send(Message::Shot {
            x: x as u8,
            y: y as u8,
        })
        .await?;

        loop {
            let Some(msg) = self.next_message().await? else {
                return Ok(());
            };
            match msg {
                Message::ShotResult(outcome) => {
                    self.view
                        .mark_view(x, y, outcome)
                        .map_err(|e| anyhow::anyhow!(e))?;
                    match outcome {
                        ShotOutcome::Hit => self.presenter.note("Hit! Fire again."),
                        ShotOutcome::Win => {
                            self.presenter.note("Hit! The enemy fleet is destroyed.");
                            self.state = SessionState::Over(GameOutcome::Win);
                        }
                        ShotOutcome::Miss => {
                            self.presenter.note("Miss.");
                            self.state = SessionState::OpponentTurn;
                        }
                    }
                    return Ok(());
                }
                other => warn!("ignoring {:?} while awaiting a shot result", other),
            }
        }
    }

    /// Resolve one incoming shot against the own grid and answer it.
    async fn defend_turn(&mut self) -> anyhow::Result<()> {
        self.presenter.note("Waiting for opponent's move...");
        loop {
            let Some(msg) = self.next_message().await? else {
                return Ok(());
            };
            match msg {
                Message::Shot { x, y } => {
                    match self.own.resolve_shot(x as usize, y as usize) {
                        Ok(outcome) => {
                            self.presenter.note(&format!(
                                "Opponent fired at ({}, {}): {}",
                                x,
                                y,
                                outcome.token()
                            ));
                            self.send(Message::ShotResult(outcome)).await?;
                            match outcome {
                                // A hit grants the opponent another shot.
                                ShotOutcome::Hit => {}
                                ShotOutcome::Win => {
                                    self.state = SessionState::Over(GameOutcome::Loss)
                                }
                                ShotOutcome::Miss => self.state = SessionState::MyTurn,
                            }
                            return Ok(());
                        }
                        Err(e) => {
                            // Only an adversarial peer repeats or overshoots
                            // a coordinate; drop it and keep waiting.
                            warn!("ignoring invalid shot ({}, {}): {}", x, y, e);
                        }
                    }
                }
                other => warn!("ignoring {:?} while awaiting a shot", other),
            }
        }
    }
}
