//! conflict-bench: write-conflict latency micro-benchmark for SQL backends
//!
//! A fixed write statement is issued concurrently by many workers against the
//! same row set, and the distribution of per-statement completion times is
//! exported as an xlsx workbook. This crate provides:
//!
//! - The concurrency core (task queue, workers, result sink, orchestrator)
//! - Backend abstraction and the MySQL-protocol implementation
//! - Retry policy, configuration, and error handling
//! - Report rendering

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod queue;
pub mod report;
pub mod retry;
pub mod sink;
pub mod worker;

pub use config::{ConnConfig, EnvMetadata, RunConfig};
pub use error::{BenchError, BenchResult};
pub use orchestrator::{Orchestrator, OrchestratorBuilder, RunOutcome};
pub use queue::{Task, TaskQueue};
pub use retry::RetryPolicy;
pub use sink::{ExecutionSample, ResultSink, SampleSender};
pub use worker::{Worker, WorkerBuilder, WorkerStats};
