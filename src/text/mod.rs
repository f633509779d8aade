//! Turning article text into normalized lemmas.
//!
//! The processor only depends on [`Tokenizer`]; the default implementation is
//! [`MorphTokenizer`], and [`QueuedTokenizer`] funnels calls to any tokenizer
//! through a single worker for implementations that must not run concurrently.

use crate::error::Result;
use async_trait::async_trait;

pub mod morph;
pub mod queue;
pub mod tokenizer;

pub use morph::MorphDictionary;
pub use queue::QueuedTokenizer;
pub use tokenizer::MorphTokenizer;

#[async_trait]
pub trait Tokenizer: Send + Sync {
    /// Splits `text` into lowercase lemmas, dropping punctuation and noise words.
    async fn split_by_words(&self, text: &str) -> Result<Vec<String>>;
}
