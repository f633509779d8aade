use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub articles_queued: u64,
    pub articles_processed: u64,
    pub articles_ok: u64,
    pub fetch_errors: u64,
    pub parsing_errors: u64,
    pub timeouts: u64,
    pub active_runs: u64,
    pub success_rate: f64,
    pub avg_duration_ms: u64,
    pub articles_per_second: f64,
    pub elapsed_seconds: f64,
}
