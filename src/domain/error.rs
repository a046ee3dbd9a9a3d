use std::time::Duration;

use thiserror::Error;

/// Failure reported by a mailbox provider.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse {what}: {reason}")]
    Parse { what: String, reason: String },

    #[error("cache error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("{0}")]
    Backend(String),
}

/// Failure reported by a task runner.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task timed out after {0:?} (possible logic bomb detected)")]
    TimedOut(Duration),

    #[error("could not start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Failed(String),
}
