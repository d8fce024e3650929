//! The session actor: one task that owns the [`Game`].
//!
//! Player commands and background pulses arrive as [`SessionRequest`]s on a
//! single `mpsc` channel and are applied to completion one at a time, so a
//! pulse never interleaves with an action. Every applied command is appended
//! to a trace that [`Game::replay`] reproduces exactly.

use scorn_agents::Game;
use scorn_narrative::View;
use scorn_types::Command;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::error::SessionError;

/// Requests buffered before senders start waiting.
pub const REQUEST_CAPACITY: usize = 32;

/// Messages accepted by the session actor.
#[derive(Debug)]
pub enum SessionRequest {
    /// Apply one command and reply with the resulting view.
    Apply {
        /// The command to apply.
        command: Command,
        /// Receives the view after the command.
        reply: oneshot::Sender<View>,
    },
    /// Reply with the current view without changing anything.
    View {
        /// Receives the current view.
        reply: oneshot::Sender<View>,
    },
}

/// What the actor hands back once every handle is dropped.
#[derive(Debug)]
pub struct SessionSummary {
    /// Final state of the run.
    pub game: Game,
    /// Every applied command, in order.
    pub trace: Vec<Command>,
}

impl SessionSummary {
    /// The trace in the comma-separated form `Command::parse_trace` reads.
    pub fn trace_text(&self) -> String {
        self.trace
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Start the actor on the current runtime.
///
/// The actor stops when the last [`SessionHandle`] is dropped; awaiting the
/// returned task yields the [`SessionSummary`].
pub fn spawn_session(game: Game) -> (SessionHandle, JoinHandle<SessionSummary>) {
    let (request_tx, request_rx) = mpsc::channel(REQUEST_CAPACITY);
    let worker = SessionWorker {
        game,
        trace: Vec::new(),
        request_rx,
    };
    (SessionHandle { request_tx }, tokio::spawn(worker.run()))
}

// ---------------------------------------------------------------------------
// Handle
// ---------------------------------------------------------------------------

/// Cloneable client of the session actor.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    request_tx: mpsc::Sender<SessionRequest>,
}

impl SessionHandle {
    /// Apply `command` and wait for the resulting view.
    pub async fn apply(&self, command: Command) -> Result<View, SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.request_tx
            .send(SessionRequest::Apply {
                command,
                reply: reply_tx,
            })
            .await
            .map_err(|_err| SessionError::Closed)?;
        reply_rx.await.map_err(SessionError::ReplyDropped)
    }

    /// The current view.
    pub async fn view(&self) -> Result<View, SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.request_tx
            .send(SessionRequest::View { reply: reply_tx })
            .await
            .map_err(|_err| SessionError::Closed)?;
        reply_rx.await.map_err(SessionError::ReplyDropped)
    }
}

// ---------------------------------------------------------------------------
// Worker
// ---------------------------------------------------------------------------

struct SessionWorker {
    game: Game,
    trace: Vec<Command>,
    request_rx: mpsc::Receiver<SessionRequest>,
}

impl SessionWorker {
    async fn run(mut self) -> SessionSummary {
        info!(seed = self.game.seed(), "Session started");
        while let Some(request) = self.request_rx.recv().await {
            self.handle_request(request);
        }
        info!(
            commands = self.trace.len(),
            dead = self.game.is_dead(),
            "Session stopped"
        );
        SessionSummary {
            game: self.game,
            trace: self.trace,
        }
    }

    fn handle_request(&mut self, request: SessionRequest) {
        match request {
            SessionRequest::Apply { command, reply } => {
                self.game.apply(command);
                self.trace.push(command);
                if reply.send(self.game.view()).is_err() {
                    debug!(%command, "Apply reply channel closed (caller dropped)");
                }
            }
            SessionRequest::View { reply } => {
                if reply.send(self.game.view()).is_err() {
                    debug!("View reply channel closed (caller dropped)");
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use scorn_types::ItemKind;

    use super::*;

    #[tokio::test]
    async fn apply_matches_direct_play() {
        let (session, task) = spawn_session(Game::new(7));
        let view = session.apply(Command::Rest).await.unwrap();
        assert_eq!(view, Game::replay(7, &[Command::Rest]).view());
        drop(session);
        let summary = task.await.unwrap();
        assert_eq!(summary.trace, vec![Command::Rest]);
    }

    #[tokio::test]
    async fn view_changes_nothing() {
        let (session, task) = spawn_session(Game::new(11));
        let first = session.view().await.unwrap();
        let second = session.view().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first, Game::new(11).view());
        drop(session);
        assert!(task.await.unwrap().trace.is_empty());
    }

    #[tokio::test]
    async fn recorded_trace_replays_exactly() {
        let (session, task) = spawn_session(Game::new(734_221));
        for command in [
            Command::Search,
            Command::Pulse,
            Command::NextRoom,
            Command::Pulse,
            Command::Use(ItemKind::Water),
            Command::Rest,
        ] {
            session.apply(command).await.unwrap();
        }
        drop(session);
        let summary = task.await.unwrap();
        let replayed = Game::replay(734_221, &summary.trace);
        assert_eq!(replayed.player(), summary.game.player());
        assert_eq!(replayed.settlements(), summary.game.settlements());
        assert_eq!(replayed.rng(), summary.game.rng());
    }

    #[tokio::test]
    async fn concurrent_clients_are_serialized() {
        let (session, task) = spawn_session(Game::new(3));
        let mut clients = Vec::new();
        for command in [Command::Pulse, Command::Rest, Command::Search] {
            let client = session.clone();
            clients.push(tokio::spawn(async move {
                for _ in 0..5 {
                    client.apply(command).await.unwrap();
                }
            }));
        }
        for client in clients {
            client.await.unwrap();
        }
        drop(session);
        let summary = task.await.unwrap();
        assert_eq!(summary.trace.len(), 15);
        let replayed = Game::replay(3, &summary.trace);
        assert_eq!(replayed.view(), summary.game.view());
    }

    #[tokio::test]
    async fn stopped_session_reports_closed() {
        let (session, task) = spawn_session(Game::new(5));
        task.abort();
        assert!(task.await.is_err());
        assert!(matches!(
            session.apply(Command::Rest).await,
            Err(SessionError::Closed)
        ));
    }

    #[test]
    fn trace_text_round_trips() {
        let summary = SessionSummary {
            game: Game::new(1),
            trace: vec![Command::Rest, Command::Use(ItemKind::Scrap), Command::Pulse],
        };
        let text = summary.trace_text();
        assert_eq!(Command::parse_trace(&text).unwrap(), summary.trace);
    }
}
