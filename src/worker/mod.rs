//! Worker: one unit of concurrency owning one exclusive backend connection
//!
//! Each worker drains the shared task queue with a non-blocking claim,
//! executes every claimed task under the configured retry policy, and
//! publishes one elapsed-time sample per completed task. A worker that finds
//! the queue empty has finished; its task handle completing is the
//! orchestrator's barrier signal.

mod builder;
mod executor;
mod stats;

pub use builder::WorkerBuilder;
pub use executor::Worker;
pub use stats::WorkerStats;

#[cfg(test)]
mod tests;
