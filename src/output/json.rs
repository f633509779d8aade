use super::OutputHandler;
use crate::error::Result;
use crate::models::ArticleResult;
use async_trait::async_trait;
use std::io::Write;

/// Collects results and emits them as one indented JSON array on close,
/// the same shape the HTTP endpoint returns.
pub struct JsonOutput {
    writer: Box<dyn Write + Send + Sync>,
    results: Vec<ArticleResult>,
}

impl JsonOutput {
    pub fn new(writer: Box<dyn Write + Send + Sync>) -> Self {
        Self {
            writer,
            results: Vec::new(),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }
}

#[async_trait]
impl OutputHandler for JsonOutput {
    async fn write(&mut self, result: &ArticleResult) -> Result<()> {
        self.results.push(result.clone());
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.results)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
