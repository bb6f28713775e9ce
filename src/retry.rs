//! Retry policy for statement execution
//!
//! A single statement attempt failing is treated as transient contention. The
//! default policy reproduces the observed benchmark behavior: hammer the
//! backend with no backoff and no attempt cap until the write commits. That is
//! a liveness hazard when the backend never succeeds, so the policy is
//! injectable and a bounded variant exists for tests and cautious deployments.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Decides whether a failed attempt is retried, and after what delay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetryPolicy {
    /// Retry forever with no backoff.
    Unbounded,

    /// Retry up to a fixed number of attempts, sleeping between them.
    Limited {
        /// Total attempts allowed, counting the first
        max_attempts: usize,
        /// Delay before each retry
        backoff: Duration,
    },
}

impl RetryPolicy {
    /// Bounded policy: at most `max_attempts` attempts, `backoff` between them.
    pub fn limited(max_attempts: usize, backoff: Duration) -> Self {
        RetryPolicy::Limited {
            max_attempts,
            backoff,
        }
    }

    /// Delay before the next attempt, given `attempts` failures so far.
    ///
    /// `None` means give up: the task cannot complete under this policy.
    pub fn backoff_after(&self, attempts: usize) -> Option<Duration> {
        match self {
            RetryPolicy::Unbounded => Some(Duration::ZERO),
            RetryPolicy::Limited {
                max_attempts,
                backoff,
            } => (attempts < *max_attempts).then_some(*backoff),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::Unbounded
    }
}
