//! Orchestrator execution logic

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::backend::BackendProvider;
use crate::config::RunConfig;
use crate::error::{BenchError, BenchResult};
use crate::queue::{Task, TaskQueue};
use crate::sink::{ExecutionSample, ResultSink};
use crate::worker::{WorkerBuilder, WorkerStats};

/// Everything a completed run produces.
#[derive(Debug)]
pub struct RunOutcome {
    /// Per-task latencies, sorted ascending
    pub samples: Vec<ExecutionSample>,

    /// Wall-clock time from task fill to barrier completion
    pub total: Duration,

    /// Per-worker accounting
    pub stats: Vec<WorkerStats>,
}

/// Orchestrator manages the run lifecycle.
///
/// Task count and worker count are fixed for the run's duration. All shared
/// synchronization state (queue, sink senders) is constructed here and handed
/// to each worker at spawn time; nothing is ambient.
pub struct Orchestrator {
    /// Run configuration
    pub(crate) config: RunConfig,

    /// Connection provisioning
    pub(crate) provider: Arc<dyn BackendProvider>,

    /// Queue capacity; equals the task count unless overridden for tests
    pub(crate) queue_capacity: usize,

    /// Sink capacity; equals the task count unless overridden for tests
    pub(crate) sink_capacity: usize,
}

impl Orchestrator {
    /// Get the run configuration.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run the benchmark.
    ///
    /// Fills the queue, provisions connections, spawns workers, waits for
    /// every worker to terminate, then drains the sink. Any fatal error
    /// aborts the run with no partial result.
    pub async fn run(&self) -> BenchResult<RunOutcome> {
        let workers = self.config.workers;
        let tasks = self.config.tasks;

        // Filling
        tracing::info!(tasks, workers, "filling task queue");
        let mut queue = TaskQueue::new(self.queue_capacity);
        let task = Task::new(self.config.statement.as_str());
        let mut placed = 0;
        for _ in 0..tasks {
            if queue.enqueue(task.clone()).is_err() {
                break;
            }
            placed += 1;
        }
        if placed != tasks {
            return Err(BenchError::QueueUnderfill {
                placed,
                expected: tasks,
            });
        }
        let queue = Arc::new(queue);

        // Total wall clock runs from task fill to barrier completion;
        // provisioning time is inside the window.
        let start = Instant::now();

        // Provisioning: one exclusive connection per worker, first failure
        // aborts before any worker starts.
        let mut backends = Vec::with_capacity(workers);
        for worker_id in 0..workers {
            let backend = self
                .provider
                .provision()
                .await
                .map_err(BenchError::Provision)?;
            tracing::debug!(
                worker_id,
                backend = self.provider.backend_name(),
                "connection provisioned"
            );
            backends.push(backend);
        }

        // Running
        let sink = ResultSink::with_capacity(self.sink_capacity);
        tracing::info!(
            statement = %self.config.statement,
            sink_capacity = sink.capacity(),
            "starting workers"
        );
        let mut handles = Vec::with_capacity(workers);
        for (worker_id, backend) in backends.into_iter().enumerate() {
            let worker = WorkerBuilder::new(worker_id)
                .backend(backend)
                .queue(Arc::clone(&queue))
                .sink(sink.sender())
                .retry(self.config.retry.clone())
                .build()?;
            handles.push(tokio::spawn(worker.run()));
        }

        // Draining: the barrier completes only once every worker has
        // independently decided the queue is empty. Join everything before
        // propagating the first fatal error.
        let mut stats = Vec::with_capacity(workers);
        let mut fatal = None;
        for (worker_id, handle) in handles.into_iter().enumerate() {
            match handle.await {
                Ok(Ok(worker_stats)) => {
                    stats.push(worker_stats);
                }
                Ok(Err(err)) => {
                    tracing::error!(worker_id, error = %err, "worker aborted");
                    fatal.get_or_insert(err);
                }
                Err(join_err) => {
                    tracing::error!(worker_id, error = %join_err, "worker panicked");
                    fatal.get_or_insert(BenchError::WorkerPanicked { id: worker_id });
                }
            }
        }
        if let Some(err) = fatal {
            return Err(err);
        }
        let total = start.elapsed();

        // Reporting: close the sink and collect the sorted result set.
        let samples = sink.collect().await;
        tracing::info!(
            samples = samples.len(),
            total_secs = total.as_secs_f64(),
            "run complete"
        );

        Ok(RunOutcome {
            samples,
            total,
            stats,
        })
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("config", &self.config)
            .field("backend", &self.provider.backend_name())
            .field("queue_capacity", &self.queue_capacity)
            .field("sink_capacity", &self.sink_capacity)
            .finish()
    }
}
