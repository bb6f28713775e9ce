//! Error types for conflict-bench
//!
//! Two classes of failure exist in this tool. Transient statement errors are
//! handled inside the worker's retry loop and never appear here. Everything in
//! [`BenchError`] is fatal: it aborts the run, and the binary turns it into a
//! diagnostic plus a non-zero exit.

use thiserror::Error;

use crate::backend::ExecError;
use crate::sink::SinkError;

/// Fatal run errors.
#[derive(Debug, Error)]
pub enum BenchError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Fewer tasks were enqueued than the run requires
    #[error("task queue underfilled: placed {placed} of {expected} tasks")]
    QueueUnderfill {
        /// Tasks actually placed before the queue refused more
        placed: usize,
        /// Tasks the run requires
        expected: usize,
    },

    /// A backend connection could not be provisioned
    #[error("failed to provision backend connection: {0}")]
    Provision(#[source] ExecError),

    /// The result sink rejected a sample
    #[error("result sink rejected a sample: {0}")]
    Sink(#[from] SinkError),

    /// A bounded retry policy ran out of attempts
    #[error("statement still failing after {attempts} attempts: {last_error}")]
    RetryExhausted {
        /// Attempts made before giving up
        attempts: usize,
        /// The last execution error observed
        last_error: String,
    },

    /// A worker task panicked before completing
    #[error("worker {id} panicked before completing")]
    WorkerPanicked {
        /// Identifier of the worker that panicked
        id: usize,
    },

    /// The report workbook could not be written
    #[error("failed to write report: {0}")]
    Report(#[from] rust_xlsxwriter::XlsxError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BenchError {
    /// Configuration error from any message.
    pub fn config(msg: impl Into<String>) -> Self {
        BenchError::Config(msg.into())
    }

    /// A builder was finished without a required field.
    pub fn missing_config(field: &str) -> Self {
        BenchError::Config(format!("missing required field: {field}"))
    }
}

/// Result type alias for fatal run errors.
pub type BenchResult<T> = std::result::Result<T, BenchError>;
