//! Per-worker accounting

use std::time::Instant;

/// Counters tracked by each worker.
#[derive(Debug, Default, Clone)]
pub struct WorkerStats {
    /// Tasks completed successfully
    pub completed: usize,

    /// Statement attempts made, failed attempts included
    pub attempts: usize,

    /// Worker start time
    pub started_at: Option<Instant>,

    /// Worker end time
    pub ended_at: Option<Instant>,
}

impl WorkerStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the start time.
    pub fn start(&mut self) {
        self.started_at = Some(Instant::now());
    }

    /// Record the end time.
    pub fn stop(&mut self) {
        self.ended_at = Some(Instant::now());
    }

    /// Record one completed task and the attempts it took.
    pub fn record_completed(&mut self, attempts: usize) {
        self.completed += 1;
        self.attempts += attempts;
    }

    /// Failed attempts, i.e. attempts beyond the one success per task.
    pub fn retries(&self) -> usize {
        self.attempts.saturating_sub(self.completed)
    }

    /// Elapsed time since start.
    pub fn elapsed(&self) -> Option<std::time::Duration> {
        self.started_at.map(|start| {
            self.ended_at
                .map(|end| end.duration_since(start))
                .unwrap_or_else(|| start.elapsed())
        })
    }

    /// Merge counters from another worker.
    pub fn merge(&mut self, other: &WorkerStats) {
        self.completed += other.completed;
        self.attempts += other.attempts;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_defaults() {
        let stats = WorkerStats::default();
        assert_eq!(stats.completed, 0);
        assert_eq!(stats.attempts, 0);
        assert!(stats.started_at.is_none());
        assert!(stats.ended_at.is_none());
    }

    #[test]
    fn test_record_completed() {
        let mut stats = WorkerStats::new();
        stats.record_completed(1);
        stats.record_completed(4);

        assert_eq!(stats.completed, 2);
        assert_eq!(stats.attempts, 5);
        assert_eq!(stats.retries(), 3);
    }

    #[test]
    fn test_retries_zero_when_no_failures() {
        let mut stats = WorkerStats::new();
        stats.record_completed(1);
        assert_eq!(stats.retries(), 0);
    }

    #[test]
    fn test_merge() {
        let mut a = WorkerStats::new();
        a.record_completed(2);

        let mut b = WorkerStats::new();
        b.record_completed(1);
        b.record_completed(3);

        a.merge(&b);
        assert_eq!(a.completed, 3);
        assert_eq!(a.attempts, 6);
    }

    #[test]
    fn test_start_stop_elapsed() {
        let mut stats = WorkerStats::new();
        assert!(stats.elapsed().is_none());

        stats.start();
        assert!(stats.elapsed().is_some());

        std::thread::sleep(std::time::Duration::from_millis(10));
        stats.stop();

        assert!(stats.elapsed().unwrap() >= std::time::Duration::from_millis(10));
    }
}
