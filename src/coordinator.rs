use crate::metrics::collector::MetricsCollector;
use crate::metrics::snapshot::MetricsSnapshot;
use crate::models::{ArticleResult, ProcessingStatus};
use crate::processor::ArticleProcessor;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinSet;

/// Fans a batch of URLs out to concurrent article runs and waits for all of them.
pub struct BatchCoordinator {
    processor: Arc<ArticleProcessor>,
    metrics: Arc<MetricsCollector>,
}

impl BatchCoordinator {
    pub fn new(processor: ArticleProcessor, metrics: Option<Arc<MetricsCollector>>) -> Self {
        Self {
            processor: Arc::new(processor),
            metrics: metrics.unwrap_or_else(|| Arc::new(MetricsCollector::new())),
        }
    }

    pub fn processor(&self) -> &ArticleProcessor {
        &self.processor
    }

    /// Processes every URL and returns one result per URL, in input order.
    ///
    /// Returns only once every run has reached a terminal status; no run's
    /// failure affects its siblings.
    pub async fn run(&self, urls: &[String]) -> Vec<ArticleResult> {
        if urls.is_empty() {
            return Vec::new();
        }

        self.metrics.add_queued(urls.len() as u64);
        let mut runs = JoinSet::new();

        for (idx, url) in urls.iter().enumerate() {
            let processor = self.processor.clone();
            let metrics = self.metrics.clone();
            let url = url.clone();

            runs.spawn(async move {
                metrics.increment_active_runs();
                let start_time = Instant::now();

                let result = processor.process(&url).await;

                metrics.record(result.status(), start_time.elapsed());
                metrics.decrement_active_runs();
                (idx, result)
            });
        }

        let mut slots: Vec<Option<ArticleResult>> = vec![None; urls.len()];
        while let Some(joined) = runs.join_next().await {
            match joined {
                Ok((idx, result)) => slots[idx] = Some(result),
                Err(e) => log::error!("Article run aborted: {}", e),
            }
        }

        let results: Vec<ArticleResult> = slots
            .into_iter()
            .zip(urls)
            .map(|(slot, url)| {
                slot.unwrap_or_else(|| {
                    // Only reachable if a run panicked; the URL is still reported.
                    self.metrics.record(ProcessingStatus::FetchError, Duration::ZERO);
                    ArticleResult::failed(url.as_str(), ProcessingStatus::FetchError)
                })
            })
            .collect();

        let count = |status: ProcessingStatus| results.iter().filter(|r| r.status() == status).count();
        log::info!(
            "Batch finished: {} articles (ok: {}, fetch errors: {}, parsing errors: {}, timeouts: {})",
            results.len(),
            count(ProcessingStatus::Ok),
            count(ProcessingStatus::FetchError),
            count(ProcessingStatus::ParsingError),
            count(ProcessingStatus::Timeout),
        );

        results
    }

    pub fn get_metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    pub fn watch_metrics(&self) -> watch::Receiver<MetricsSnapshot> {
        let (tx, rx) = watch::channel(self.metrics.snapshot());
        let metrics = self.metrics.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(250));
            loop {
                interval.tick().await;
                if tx.send(metrics.snapshot()).is_err() {
                    break;
                }
            }
        });
        rx
    }
}
