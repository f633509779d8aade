use crate::metrics::snapshot::MetricsSnapshot;
use crate::models::ProcessingStatus;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use std::time::{Duration, Instant};

/// Outcome counters shared by every article run of a coordinator.
#[derive(Clone)]
pub struct MetricsCollector {
    articles_queued: Arc<AtomicU64>,
    articles_processed: Arc<AtomicU64>,
    articles_ok: Arc<AtomicU64>,
    fetch_errors: Arc<AtomicU64>,
    parsing_errors: Arc<AtomicU64>,
    timeouts: Arc<AtomicU64>,
    active_runs: Arc<AtomicU64>,
    total_duration_ms: Arc<AtomicU64>,
    start_time: Arc<Instant>,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self {
            articles_queued: Arc::new(AtomicU64::new(0)),
            articles_processed: Arc::new(AtomicU64::new(0)),
            articles_ok: Arc::new(AtomicU64::new(0)),
            fetch_errors: Arc::new(AtomicU64::new(0)),
            parsing_errors: Arc::new(AtomicU64::new(0)),
            timeouts: Arc::new(AtomicU64::new(0)),
            active_runs: Arc::new(AtomicU64::new(0)),
            total_duration_ms: Arc::new(AtomicU64::new(0)),
            start_time: Arc::new(Instant::now()),
        }
    }
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_queued(&self, count: u64) {
        self.articles_queued.fetch_add(count, Ordering::SeqCst);
    }

    pub fn increment_active_runs(&self) {
        self.active_runs.fetch_add(1, Ordering::SeqCst);
    }

    pub fn decrement_active_runs(&self) {
        self.active_runs.fetch_sub(1, Ordering::SeqCst);
    }

    /// Records one run reaching its terminal status.
    pub fn record(&self, status: ProcessingStatus, duration: Duration) {
        let counter = match status {
            ProcessingStatus::Ok => &self.articles_ok,
            ProcessingStatus::FetchError => &self.fetch_errors,
            ProcessingStatus::ParsingError => &self.parsing_errors,
            ProcessingStatus::Timeout => &self.timeouts,
        };
        counter.fetch_add(1, Ordering::SeqCst);
        self.articles_processed.fetch_add(1, Ordering::SeqCst);
        self.total_duration_ms
            .fetch_add(duration.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let processed = self.articles_processed.load(Ordering::SeqCst);
        let ok = self.articles_ok.load(Ordering::SeqCst);
        let total_time = self.total_duration_ms.load(Ordering::SeqCst);

        let success_rate = if processed > 0 {
            (ok as f64 / processed as f64) * 100.0
        } else {
            0.0
        };

        let avg_duration_ms = if processed > 0 {
            total_time / processed
        } else {
            0
        };

        let elapsed = self.start_time.elapsed().as_secs_f64();

        MetricsSnapshot {
            articles_queued: self.articles_queued.load(Ordering::SeqCst),
            articles_processed: processed,
            articles_ok: ok,
            fetch_errors: self.fetch_errors.load(Ordering::SeqCst),
            parsing_errors: self.parsing_errors.load(Ordering::SeqCst),
            timeouts: self.timeouts.load(Ordering::SeqCst),
            active_runs: self.active_runs.load(Ordering::SeqCst),
            success_rate,
            avg_duration_ms,
            articles_per_second: if elapsed > 0.0 {
                processed as f64 / elapsed
            } else {
                0.0
            },
            elapsed_seconds: elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_each_status() {
        let metrics = MetricsCollector::new();
        metrics.add_queued(4);
        metrics.record(ProcessingStatus::Ok, Duration::from_millis(100));
        metrics.record(ProcessingStatus::FetchError, Duration::from_millis(20));
        metrics.record(ProcessingStatus::ParsingError, Duration::from_millis(30));
        metrics.record(ProcessingStatus::Timeout, Duration::from_millis(50));

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.articles_queued, 4);
        assert_eq!(snapshot.articles_processed, 4);
        assert_eq!(snapshot.articles_ok, 1);
        assert_eq!(snapshot.fetch_errors, 1);
        assert_eq!(snapshot.parsing_errors, 1);
        assert_eq!(snapshot.timeouts, 1);
        assert_eq!(snapshot.success_rate, 25.0);
        assert_eq!(snapshot.avg_duration_ms, 50);
    }

    #[test]
    fn empty_snapshot_has_no_rates() {
        let snapshot = MetricsCollector::new().snapshot();
        assert_eq!(snapshot.articles_processed, 0);
        assert_eq!(snapshot.success_rate, 0.0);
        assert_eq!(snapshot.avg_duration_ms, 0);
    }

    #[test]
    fn clones_share_counters() {
        let metrics = MetricsCollector::new();
        let clone = metrics.clone();
        clone.increment_active_runs();
        assert_eq!(metrics.snapshot().active_runs, 1);
        metrics.decrement_active_runs();
        assert_eq!(clone.snapshot().active_runs, 0);
    }
}
