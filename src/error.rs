//! # Consolidator Error Types
//!
//! Structured error handling for the ingestion pipeline using thiserror.
//! Field shape mismatches inside a record are not errors; they resolve to
//! defaults in the record parser.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsolidatorError {
    /// Record bytes could not be decoded at all. Fatal for the whole run.
    #[error("Malformed record #{sequence}: {message}")]
    MalformedRecord { sequence: u64, message: String },

    /// A worker already failed, so no further records are accepted
    #[error("Pipeline aborted: a worker hit a fatal error")]
    Aborted,

    #[error("Worker {worker_id} panicked before signalling completion")]
    WorkerPanicked { worker_id: usize },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConsolidatorError {
    pub fn malformed(sequence: u64, message: impl Into<String>) -> Self {
        Self::MalformedRecord {
            sequence,
            message: message.into(),
        }
    }
}

impl From<config::ConfigError> for ConsolidatorError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ConsolidatorError>;
