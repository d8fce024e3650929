//! Error types for the Scorn engine binary.
//!
//! [`EngineError`] wraps every failure mode of startup and the interactive
//! session so `main` can propagate with `?`. [`SessionError`] is what a
//! [`SessionHandle`](crate::session::SessionHandle) caller sees when the
//! actor is gone.

use tokio::sync::oneshot;

/// Failures talking to the session actor.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The actor has stopped and no longer accepts requests.
    #[error("session request channel closed")]
    Closed,

    /// The actor dropped the reply without answering.
    #[error("session reply channel closed")]
    ReplyDropped(#[source] oneshot::error::RecvError),
}

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: scorn_core::config::ConfigError,
    },

    /// A generated world failed validation.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: scorn_world::WorldError,
    },

    /// The session actor could not be reached.
    #[error("session error: {source}")]
    Session {
        /// The underlying session error.
        #[from]
        source: SessionError,
    },

    /// A command trace could not be parsed.
    #[error("trace error: {source}")]
    Trace {
        /// The underlying parse error.
        #[from]
        source: scorn_types::CommandParseError,
    },

    /// A background task panicked or was cancelled.
    #[error("task join failed: {source}")]
    Join {
        /// The underlying join error.
        #[from]
        source: tokio::task::JoinError,
    },

    /// Reading stdin or writing stdout failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// JSON output failed.
    #[error("JSON error: {source}")]
    Json {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}
