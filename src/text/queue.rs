use super::Tokenizer;
use crate::error::{Error, Result};
use async_trait::async_trait;
use futures::stream::StreamExt;
use tokio::sync::{mpsc, oneshot};

struct Job {
    text: String,
    reply: oneshot::Sender<Result<Vec<String>>>,
}

/// Serializes calls to a tokenizer through one worker task that owns it.
///
/// Callers queue up and wait for their turn; everything else they do (fetching,
/// sanitizing) stays concurrent. A caller that gives up while queued is skipped.
pub struct QueuedTokenizer {
    jobs: mpsc::Sender<Job>,
}

impl QueuedTokenizer {
    /// Spawns the worker on the current tokio runtime.
    pub fn spawn<T>(inner: T, capacity: usize) -> Self
    where
        T: Tokenizer + 'static,
    {
        let (jobs_tx, jobs_rx) = mpsc::channel::<Job>(capacity.max(1));

        tokio::spawn(async move {
            let inner = &inner;
            tokio_stream::wrappers::ReceiverStream::new(jobs_rx)
                .for_each(move |job| async move {
                    if job.reply.is_closed() {
                        log::debug!("Skipping abandoned tokenizer job");
                        return;
                    }
                    let words = inner.split_by_words(&job.text).await;
                    let _ = job.reply.send(words);
                })
                .await;
            log::debug!("Tokenizer worker finished.");
        });

        Self { jobs: jobs_tx }
    }
}

#[async_trait]
impl Tokenizer for QueuedTokenizer {
    async fn split_by_words(&self, text: &str) -> Result<Vec<String>> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let job = Job {
            text: text.to_string(),
            reply: reply_tx,
        };

        self.jobs
            .send(job)
            .await
            .map_err(|_| Error::Internal("tokenizer worker is gone".to_string()))?;

        reply_rx
            .await
            .map_err(|_| Error::Internal("tokenizer worker dropped the job".to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{MorphDictionary, MorphTokenizer};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    struct Exclusive {
        in_flight: Arc<AtomicUsize>,
        max_seen: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Tokenizer for Exclusive {
        async fn split_by_words(&self, text: &str) -> Result<Vec<String>> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_seen.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(vec![text.to_string()])
        }
    }

    struct Counting {
        calls: Arc<AtomicUsize>,
        delay: Duration,
    }

    #[async_trait]
    impl Tokenizer for Counting {
        async fn split_by_words(&self, text: &str) -> Result<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            Ok(vec![text.to_string()])
        }
    }

    #[tokio::test]
    async fn delegates_to_inner_tokenizer() {
        let dictionary = MorphDictionary::with_entries([("хочет", "хотеть")]);
        let queued = QueuedTokenizer::spawn(MorphTokenizer::new(dictionary), 4);

        let words = queued.split_by_words("Во-первых, он хочет, чтобы").await.unwrap();
        assert_eq!(words, vec!["во-первых", "хотеть", "чтобы"]);
    }

    #[tokio::test]
    async fn never_runs_inner_concurrently() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));
        let queued = Arc::new(QueuedTokenizer::spawn(
            Exclusive {
                in_flight: in_flight.clone(),
                max_seen: max_seen.clone(),
            },
            16,
        ));

        let calls = (0..8).map(|i| {
            let queued = queued.clone();
            async move { queued.split_by_words(&format!("text{}", i)).await }
        });
        let results = futures::future::join_all(calls).await;

        for (i, result) in results.into_iter().enumerate() {
            assert_eq!(result.unwrap(), vec![format!("text{}", i)]);
        }
        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn skips_jobs_whose_caller_gave_up() {
        let calls = Arc::new(AtomicUsize::new(0));
        let queued = Arc::new(QueuedTokenizer::spawn(
            Counting {
                calls: calls.clone(),
                delay: Duration::from_millis(200),
            },
            16,
        ));

        let first = tokio::spawn({
            let queued = queued.clone();
            async move { queued.split_by_words("first").await }
        });
        // Let the worker pick up "first" so the next job has to wait.
        tokio::time::sleep(Duration::from_millis(50)).await;

        let abandoned =
            tokio::time::timeout(Duration::from_millis(50), queued.split_by_words("abandoned")).await;
        assert!(abandoned.is_err());

        assert_eq!(first.await.unwrap().unwrap(), vec!["first"]);
        assert_eq!(queued.split_by_words("last").await.unwrap(), vec!["last"]);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
