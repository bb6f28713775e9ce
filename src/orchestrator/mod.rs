//! Orchestrator for the conflict-run lifecycle
//!
//! The Orchestrator coordinates a complete run:
//! - Pre-loading the task queue and aborting on underfill
//! - Provisioning one exclusive connection per worker
//! - Spawning workers and barrier-waiting for every one to terminate
//! - Closing and draining the result sink into the sorted result set
//!
//! # Example
//!
//! ```ignore
//! use conflict_bench::{OrchestratorBuilder, RunConfig};
//!
//! let orchestrator = OrchestratorBuilder::new()
//!     .config(RunConfig::new(10, 100, "update test set id=id+1"))
//!     .provider(provider)
//!     .build()?;
//!
//! let outcome = orchestrator.run().await?;
//! ```

mod builder;
mod executor;

pub use builder::OrchestratorBuilder;
pub use executor::{Orchestrator, RunOutcome};
