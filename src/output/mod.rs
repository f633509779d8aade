use crate::error::Result;
use crate::models::ArticleResult;
use async_trait::async_trait;

pub mod console;
pub mod json;

/// Batch-mode sink for article results.
#[async_trait]
pub trait OutputHandler: Send + Sync {
    async fn write(&mut self, result: &ArticleResult) -> Result<()>;
    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
