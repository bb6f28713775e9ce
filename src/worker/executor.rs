//! Worker execution loop

use std::sync::Arc;
use std::time::Instant;

use crate::backend::Backend;
use crate::error::{BenchError, BenchResult};
use crate::queue::{Task, TaskQueue};
use crate::retry::RetryPolicy;
use crate::sink::{ExecutionSample, SampleSender};

use super::stats::WorkerStats;

/// Worker drains the queue: claim -> execute until success -> publish -> repeat.
///
/// Owns its backend connection outright; executing takes `&mut self`, so the
/// connection cannot be shared. The elapsed time recorded for a task runs
/// from the first attempt to the successful one, failed attempts included:
/// the benchmark measures total time-to-success under contention, not
/// single-attempt latency.
pub struct Worker {
    /// Unique worker identifier
    id: usize,

    /// Exclusive backend connection
    backend: Box<dyn Backend>,

    /// Shared task queue
    queue: Arc<TaskQueue>,

    /// Sample publishing handle
    sink: SampleSender,

    /// Retry policy for failed attempts
    retry: RetryPolicy,
}

impl Worker {
    /// Create a new worker.
    ///
    /// Use `WorkerBuilder` for validated construction.
    pub fn new(
        id: usize,
        backend: Box<dyn Backend>,
        queue: Arc<TaskQueue>,
        sink: SampleSender,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            id,
            backend,
            queue,
            sink,
            retry,
        }
    }

    /// Run the worker loop until the queue is drained.
    ///
    /// Returns `WorkerStats` on completion. Sink-capacity violations and
    /// retry exhaustion are fatal and surface as `Err`.
    pub async fn run(mut self) -> BenchResult<WorkerStats> {
        let mut stats = WorkerStats::new();
        stats.start();

        tracing::debug!(worker_id = self.id, "worker started");

        while let Some(task) = self.queue.try_claim() {
            let (sample, attempts) = self.execute_task(&task).await?;
            stats.record_completed(attempts);
            self.sink.publish(sample)?;
        }

        stats.stop();
        tracing::debug!(
            worker_id = self.id,
            completed = stats.completed,
            retries = stats.retries(),
            elapsed_ms = ?stats.elapsed().map(|d| d.as_millis()),
            "worker finished, queue empty"
        );

        Ok(stats)
    }

    /// Execute one task until it succeeds, timing the whole effort.
    async fn execute_task(&mut self, task: &Task) -> BenchResult<(ExecutionSample, usize)> {
        let start = Instant::now();
        let mut attempts = 0usize;

        loop {
            attempts += 1;
            match self.backend.execute(task.statement()).await {
                Ok(()) => {
                    return Ok((ExecutionSample::new(start.elapsed()), attempts));
                }
                Err(err) => match self.retry.backoff_after(attempts) {
                    Some(delay) => {
                        tracing::trace!(
                            worker_id = self.id,
                            attempts,
                            error = %err,
                            "statement failed, retrying"
                        );
                        if !delay.is_zero() {
                            tokio::time::sleep(delay).await;
                        }
                    }
                    None => {
                        return Err(BenchError::RetryExhausted {
                            attempts,
                            last_error: err.to_string(),
                        });
                    }
                },
            }
        }
    }

    /// Get the worker ID.
    pub fn id(&self) -> usize {
        self.id
    }
}

impl std::fmt::Debug for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worker")
            .field("id", &self.id)
            .field("retry", &self.retry)
            .finish()
    }
}
