//! Fixed-capacity task queue
//!
//! The queue is filled synchronously before any worker starts and is never
//! refilled. Claiming is non-blocking by design: a worker that finds the
//! queue empty has genuinely finished and should terminate, so there is
//! nothing to wait for.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use thiserror::Error;

/// One unit of work: a single statement to execute.
///
/// The statement string is shared by all tasks; cloning a task is a pointer
/// copy. All tasks in a conflict run are identical, but nothing here requires
/// that.
#[derive(Debug, Clone)]
pub struct Task {
    statement: Arc<str>,
}

impl Task {
    /// Create a task for the given statement.
    pub fn new(statement: impl Into<Arc<str>>) -> Self {
        Self {
            statement: statement.into(),
        }
    }

    /// The statement this task executes.
    pub fn statement(&self) -> &str {
        &self.statement
    }
}

/// Queue errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    /// The queue already holds `capacity` tasks
    #[error("task queue full: capacity {capacity}")]
    Full {
        /// Fixed capacity of the queue
        capacity: usize,
    },
}

/// A fixed-capacity buffer of tasks with a lock-free, non-blocking claim.
///
/// Filling happens single-threaded through `&mut self`; afterwards the queue
/// is shared behind an `Arc` and drained through an atomic cursor, so claims
/// need no lock.
#[derive(Debug)]
pub struct TaskQueue {
    slots: Vec<Task>,
    capacity: usize,
    next: AtomicUsize,
}

impl TaskQueue {
    /// Create an empty queue holding at most `capacity` tasks.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            next: AtomicUsize::new(0),
        }
    }

    /// Place a task, failing once the fixed capacity is reached.
    pub fn enqueue(&mut self, task: Task) -> Result<(), QueueError> {
        if self.slots.len() == self.capacity {
            return Err(QueueError::Full {
                capacity: self.capacity,
            });
        }
        self.slots.push(task);
        Ok(())
    }

    /// Claim the next task without blocking.
    ///
    /// Returns `None` when the queue is drained. The cursor is advanced with
    /// an atomic increment; an overshoot past the end is rolled back so the
    /// cursor stays accurate for other workers still checking.
    pub fn try_claim(&self) -> Option<Task> {
        let idx = self.next.fetch_add(1, Ordering::SeqCst);
        if idx >= self.slots.len() {
            self.next.fetch_sub(1, Ordering::SeqCst);
            return None;
        }
        Some(self.slots[idx].clone())
    }

    /// Number of tasks enqueued.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether any task was enqueued.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Fixed capacity of the queue.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Tasks not yet claimed.
    pub fn remaining(&self) -> usize {
        self.slots
            .len()
            .saturating_sub(self.next.load(Ordering::SeqCst))
    }
}
