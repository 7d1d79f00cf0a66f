//! Error taxonomy and the uniform command result.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Input problems caught before any process is spawned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The primary disk image is missing.
    #[error("Disk path does not exist or is invalid: {}", .0.display())]
    InvalidDisk(PathBuf),
    /// An ISO was requested but is missing.
    #[error("ISO path provided but does not exist: {}", .0.display())]
    InvalidIso(PathBuf),
    /// The Dockerfile to build from is not a regular file.
    #[error("Invalid Dockerfile path: {}", .0.display())]
    InvalidDockerfile(PathBuf),
    /// A required free-text argument was empty.
    #[error("{field} must not be empty")]
    EmptyTerm {
        /// Human-readable name of the argument.
        field: &'static str,
    },
    /// A numeric field was not a positive whole number.
    #[error("{field} must be a positive whole number, got {value:?}")]
    InvalidNumber {
        /// Human-readable name of the field.
        field: &'static str,
        /// The rejected text.
        value: String,
    },
}

/// Broad class of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before spawning anything.
    Validation,
    /// The tool ran and exited non-zero.
    Process,
    /// The tool could not be started.
    Spawn,
    /// A local file could not be read or written.
    Io,
}

/// Every way a core operation can fail.
#[derive(Debug, Error)]
pub enum Error {
    /// See [`ValidationError`].
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Non-zero exit. Displays the tool's stderr unmodified.
    #[error("{stderr}")]
    Process {
        /// Exit code, or -1 when the process was killed by a signal.
        code: i32,
        /// Trimmed standard error.
        stderr: String,
    },
    /// The operating system refused to start the program.
    #[error("failed to start {program}: {reason}")]
    Spawn {
        /// Program that was being started.
        program: String,
        /// Underlying spawn diagnostic.
        reason: String,
    },
    /// A file write did not complete.
    #[error("failed to write {}: {reason}", path.display())]
    Write {
        /// Resolved target path.
        path: PathBuf,
        /// Underlying I/O diagnostic.
        reason: String,
    },
    /// A configuration file could not be read or parsed.
    #[error("failed to load config {}: {reason}", path.display())]
    ConfigLoad {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O or parse diagnostic.
        reason: String,
    },
}

impl Error {
    /// Classifies this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Process { .. } => ErrorKind::Process,
            Self::Spawn { .. } => ErrorKind::Spawn,
            Self::Write { .. } | Self::ConfigLoad { .. } => ErrorKind::Io,
        }
    }

    /// Returns the validation failure, if this is one.
    #[must_use]
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(v) => Some(v),
            _ => None,
        }
    }
}

/// Outcome of a core operation: success text or a typed failure.
pub type Outcome = Result<String, Error>;

/// Uniform two-part result handed to the presentation layer.
///
/// `output` holds normal output when `succeeded` is true and diagnostic
/// text otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandResult {
    /// Whether the operation succeeded.
    pub succeeded: bool,
    /// Output or diagnostic text.
    pub output: String,
}

impl CommandResult {
    /// A successful result.
    pub fn success(output: impl Into<String>) -> Self {
        Self { succeeded: true, output: output.into() }
    }

    /// A failed result.
    pub fn failure(output: impl Into<String>) -> Self {
        Self { succeeded: false, output: output.into() }
    }
}

impl From<Outcome> for CommandResult {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Ok(output) => Self::success(output),
            Err(err) => Self::failure(err.to_string()),
        }
    }
}
