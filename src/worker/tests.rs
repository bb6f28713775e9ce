//! Tests for the Worker module

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::backend::{Backend, ExecError};
use crate::error::BenchError;
use crate::queue::{Task, TaskQueue};
use crate::retry::RetryPolicy;
use crate::sink::{ResultSink, SinkError};

use super::builder::WorkerBuilder;

// ============================================================================
// Mock backends
// ============================================================================

/// Succeeds instantly on every attempt.
struct InstantBackend;

#[async_trait]
impl Backend for InstantBackend {
    async fn execute(&mut self, _statement: &str) -> Result<(), ExecError> {
        Ok(())
    }
}

/// Fails a fixed number of attempts, each taking `attempt_latency`, then
/// succeeds (also taking `attempt_latency`).
struct FlakyBackend {
    failures: usize,
    attempt_latency: Duration,
    attempts_made: usize,
}

impl FlakyBackend {
    fn new(failures: usize, attempt_latency: Duration) -> Self {
        Self {
            failures,
            attempt_latency,
            attempts_made: 0,
        }
    }
}

#[async_trait]
impl Backend for FlakyBackend {
    async fn execute(&mut self, _statement: &str) -> Result<(), ExecError> {
        self.attempts_made += 1;
        if !self.attempt_latency.is_zero() {
            tokio::time::sleep(self.attempt_latency).await;
        }
        if self.attempts_made <= self.failures {
            Err(ExecError::Backend("simulated write conflict".into()))
        } else {
            Ok(())
        }
    }
}

/// Never succeeds.
struct AlwaysFailBackend;

#[async_trait]
impl Backend for AlwaysFailBackend {
    async fn execute(&mut self, _statement: &str) -> Result<(), ExecError> {
        Err(ExecError::Backend("simulated write conflict".into()))
    }
}

/// Pops a scripted per-execution latency from a shared queue, sleeps for it,
/// and succeeds. The script is shared so latencies attach to tasks in claim
/// order regardless of which worker executes them.
struct ScriptedBackend {
    script: Arc<Mutex<VecDeque<Duration>>>,
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn execute(&mut self, _statement: &str) -> Result<(), ExecError> {
        let latency = {
            let mut script = self.script.lock().unwrap();
            script.pop_front().unwrap_or(Duration::ZERO)
        };
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        Ok(())
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn filled_queue(n: usize) -> Arc<TaskQueue> {
    let mut queue = TaskQueue::new(n);
    for _ in 0..n {
        queue.enqueue(Task::new("update test set id=id+1")).unwrap();
    }
    Arc::new(queue)
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_worker_drains_queue_and_publishes() {
    let queue = filled_queue(3);
    let sink = ResultSink::with_capacity(3);

    let worker = WorkerBuilder::new(0)
        .backend(Box::new(InstantBackend))
        .queue(Arc::clone(&queue))
        .sink(sink.sender())
        .build()
        .expect("build worker");

    let stats = worker.run().await.expect("run worker");

    assert_eq!(stats.completed, 3);
    assert_eq!(stats.attempts, 3);
    assert_eq!(queue.remaining(), 0);

    let samples = sink.collect().await;
    assert_eq!(samples.len(), 3);
}

#[tokio::test]
async fn test_worker_terminates_on_empty_queue() {
    let queue = filled_queue(0);
    let sink = ResultSink::with_capacity(1);

    let worker = WorkerBuilder::new(0)
        .backend(Box::new(InstantBackend))
        .queue(queue)
        .sink(sink.sender())
        .build()
        .expect("build worker");

    let stats = worker.run().await.expect("run worker");

    assert_eq!(stats.completed, 0);
    assert_eq!(stats.attempts, 0);
    assert!(sink.collect().await.is_empty());
}

#[tokio::test]
async fn test_retries_count_toward_elapsed_time() {
    // 3 failed attempts and 1 success at 20ms each: the sample must cover
    // all 4 attempts.
    let failures = 3;
    let attempt_latency = Duration::from_millis(20);

    let queue = filled_queue(1);
    let sink = ResultSink::with_capacity(1);

    let worker = WorkerBuilder::new(0)
        .backend(Box::new(FlakyBackend::new(failures, attempt_latency)))
        .queue(queue)
        .sink(sink.sender())
        .retry(RetryPolicy::Unbounded)
        .build()
        .expect("build worker");

    let stats = worker.run().await.expect("run worker");

    assert_eq!(stats.completed, 1);
    assert_eq!(stats.attempts, failures + 1);
    assert_eq!(stats.retries(), failures);

    let samples = sink.collect().await;
    assert_eq!(samples.len(), 1);
    assert!(samples[0].elapsed() >= attempt_latency * (failures as u32 + 1));
}

#[tokio::test]
async fn test_bounded_policy_exhaustion_is_fatal() {
    let queue = filled_queue(1);
    let sink = ResultSink::with_capacity(1);

    let worker = WorkerBuilder::new(0)
        .backend(Box::new(AlwaysFailBackend))
        .queue(queue)
        .sink(sink.sender())
        .retry(RetryPolicy::limited(5, Duration::ZERO))
        .build()
        .expect("build worker");

    let err = worker.run().await.err().expect("run should fail");
    match err {
        BenchError::RetryExhausted { attempts, .. } => assert_eq!(attempts, 5),
        other => panic!("expected RetryExhausted, got {other:?}"),
    }

    assert!(sink.collect().await.is_empty());
}

#[tokio::test]
async fn test_full_sink_is_fatal() {
    // Two tasks but room for one sample: the second publish must abort, not
    // block or drop the sample silently.
    let queue = filled_queue(2);
    let sink = ResultSink::with_capacity(1);

    let worker = WorkerBuilder::new(0)
        .backend(Box::new(InstantBackend))
        .queue(queue)
        .sink(sink.sender())
        .build()
        .expect("build worker");

    let err = worker.run().await.err().expect("run should fail");
    assert!(matches!(err, BenchError::Sink(SinkError::Capacity)));
}

#[tokio::test]
async fn test_scripted_latencies_produce_ordered_samples() {
    let script: Arc<Mutex<VecDeque<Duration>>> = Arc::new(Mutex::new(
        [50u64, 30, 90, 10]
            .into_iter()
            .map(Duration::from_millis)
            .collect(),
    ));

    let queue = filled_queue(4);
    let sink = ResultSink::with_capacity(4);

    let worker = WorkerBuilder::new(0)
        .backend(Box::new(ScriptedBackend {
            script: Arc::clone(&script),
        }))
        .queue(queue)
        .sink(sink.sender())
        .build()
        .expect("build worker");

    let stats = worker.run().await.expect("run worker");
    assert_eq!(stats.completed, 4);

    let samples = sink.collect().await;
    assert_eq!(samples.len(), 4);
    assert!(samples.windows(2).all(|pair| pair[0] <= pair[1]));
    assert!(samples[0].elapsed() >= Duration::from_millis(10));
    assert!(samples[3].elapsed() >= Duration::from_millis(90));
}
