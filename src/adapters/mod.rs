//! Site adapters: raw article HTML in, plain text out.

use thiserror::Error;

pub mod inosmi_ru;

pub use inosmi_ru::InosmiSanitizer;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SanitizeError {
    /// The page has no article container this adapter recognizes.
    #[error("article container not found")]
    ArticleNotFound,
}

pub trait Sanitizer: Send + Sync {
    fn sanitize(&self, html: &str) -> Result<String, SanitizeError>;
}
