//! Bounded result sink
//!
//! Workers publish one sample per completed task through a non-blocking send.
//! The sink's capacity must cover every expected sample; a send that would
//! block is a design violation, not backpressure, and aborts the run. The
//! orchestrator drains the sink exactly once, after the barrier, and the
//! drain yields samples sorted ascending.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;

/// Elapsed wall-clock time for one completed task.
///
/// Measured from the task claim to the first successful execution, inclusive
/// of time spent on failed attempts. Samples order by elapsed time, so a
/// result set sorts without float comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExecutionSample {
    elapsed: Duration,
}

impl ExecutionSample {
    /// Wrap an elapsed measurement.
    pub fn new(elapsed: Duration) -> Self {
        Self { elapsed }
    }

    /// The elapsed time.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// The elapsed time in milliseconds, as the report renders it.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// Sink errors; both are fatal to the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SinkError {
    /// The sink is full. Capacity must be provisioned to cover every task.
    #[error("sink is full; capacity must cover every expected sample")]
    Capacity,

    /// The sink was dropped while workers were still publishing.
    #[error("sink closed before the run completed")]
    Closed,
}

/// Cloneable publishing handle held by each worker.
#[derive(Debug, Clone)]
pub struct SampleSender {
    tx: mpsc::Sender<ExecutionSample>,
}

impl SampleSender {
    /// Publish a sample without blocking.
    pub fn publish(&self, sample: ExecutionSample) -> Result<(), SinkError> {
        self.tx.try_send(sample).map_err(|err| match err {
            mpsc::error::TrySendError::Full(_) => SinkError::Capacity,
            mpsc::error::TrySendError::Closed(_) => SinkError::Closed,
        })
    }
}

/// Fixed-capacity buffer of samples, drained exactly once.
#[derive(Debug)]
pub struct ResultSink {
    capacity: usize,
    tx: mpsc::Sender<ExecutionSample>,
    rx: mpsc::Receiver<ExecutionSample>,
}

impl ResultSink {
    /// Create a sink holding at most `capacity` samples.
    ///
    /// `capacity` must be at least 1 and, for a correct run, at least the
    /// task count; the orchestrator sizes it to exactly the task count.
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity);
        Self { capacity, tx, rx }
    }

    /// Fixed capacity of the sink.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// A publishing handle for one worker.
    pub fn sender(&self) -> SampleSender {
        SampleSender {
            tx: self.tx.clone(),
        }
    }

    /// Drain every published sample, sorted ascending.
    ///
    /// Consumes the sink: dropping the retained sender closes the channel, so
    /// the drain ends once every worker's sender is gone. Callers must only
    /// collect after the worker barrier has completed.
    pub async fn collect(self) -> Vec<ExecutionSample> {
        let ResultSink {
            capacity,
            tx,
            mut rx,
        } = self;
        drop(tx);

        let mut samples = Vec::with_capacity(capacity);
        while let Some(sample) = rx.recv().await {
            samples.push(sample);
        }

        // Ascending order is the report contract; ties stay unordered.
        samples.sort_unstable();
        samples
    }
}
