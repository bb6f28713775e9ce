//! Builder pattern for Worker construction

use std::sync::Arc;

use crate::backend::Backend;
use crate::error::{BenchError, BenchResult};
use crate::queue::TaskQueue;
use crate::retry::RetryPolicy;
use crate::sink::SampleSender;

use super::executor::Worker;

/// Builder for creating Worker instances with validation.
///
/// # Example
/// ```ignore
/// let worker = WorkerBuilder::new(0)
///     .backend(backend)
///     .queue(Arc::clone(&queue))
///     .sink(sink.sender())
///     .retry(RetryPolicy::Unbounded)
///     .build()?;
/// ```
pub struct WorkerBuilder {
    id: usize,
    backend: Option<Box<dyn Backend>>,
    queue: Option<Arc<TaskQueue>>,
    sink: Option<SampleSender>,
    retry: RetryPolicy,
}

impl WorkerBuilder {
    /// Create a new builder with the given worker ID.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            backend: None,
            queue: None,
            sink: None,
            retry: RetryPolicy::default(),
        }
    }

    /// Set the exclusive backend connection.
    pub fn backend(mut self, backend: Box<dyn Backend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Set the shared task queue.
    pub fn queue(mut self, queue: Arc<TaskQueue>) -> Self {
        self.queue = Some(queue);
        self
    }

    /// Set the sample publishing handle.
    pub fn sink(mut self, sink: SampleSender) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Set the retry policy.
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Build the Worker.
    ///
    /// # Errors
    /// Returns an error if any required field is missing.
    pub fn build(self) -> BenchResult<Worker> {
        let backend = self.backend.ok_or_else(|| BenchError::missing_config("backend"))?;
        let queue = self.queue.ok_or_else(|| BenchError::missing_config("queue"))?;
        let sink = self.sink.ok_or_else(|| BenchError::missing_config("sink"))?;

        Ok(Worker::new(self.id, backend, queue, sink, self.retry))
    }
}
