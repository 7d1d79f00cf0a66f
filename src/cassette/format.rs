//! Cassette data structures for recorded tool interactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ports::ProcessOutput;

/// Which process port an interaction went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Port {
    /// [`crate::ports::BlockingExecutor`].
    Exec,
    /// [`crate::ports::DetachedLauncher`].
    Launch,
}

/// What the operating system reported for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordedOutcome {
    /// A blocking run that reached an exit status.
    Exited(ProcessOutput),
    /// A detached spawn that started.
    Launched,
    /// The process could not be started.
    SpawnFailed {
        /// Spawn diagnostic as reported at recording time.
        reason: String,
    },
}

/// A single recorded tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    /// Position across the whole session, assigned by the recorder.
    pub seq: u64,
    /// Port that handled the call.
    pub port: Port,
    /// Human-readable rendering of the command.
    pub command: String,
    /// Exact argv, used to match calls during replay.
    pub argv: Vec<String>,
    /// What happened.
    pub outcome: RecordedOutcome,
}

/// A recorded session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cassette {
    /// Session name.
    pub name: String,
    /// When recording finished.
    pub recorded_at: DateTime<Utc>,
    /// Interactions in call order.
    pub interactions: Vec<Interaction>,
}
