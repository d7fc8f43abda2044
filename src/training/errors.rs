use thiserror::Error;

use crate::training::types::SceneId;

/// Errors that can arise while loading the roster or talking to the host engine.
#[derive(Debug, Error)]
pub enum TrainingError {
    /// Wrapper around IO errors (roster file reads, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Returned when a roster row cannot be turned into a master.
    #[error("roster line {line}: {reason}")]
    RosterFormat { line: usize, reason: String },

    /// An engine event carried data that does not match its hook.
    #[error("malformed event payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// The combat collaborator refused to start a battle.
    #[error("combat error: {0}")]
    Combat(String),

    /// A scene id handed to the module is unknown to the scene graph.
    #[error("unknown scene: {0}")]
    UnknownScene(SceneId),
}
