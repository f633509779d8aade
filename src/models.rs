use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal outcome of one article run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessingStatus {
    Ok,
    FetchError,
    ParsingError,
    Timeout,
}

impl ProcessingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingStatus::Ok => "OK",
            ProcessingStatus::FetchError => "FETCH_ERROR",
            ProcessingStatus::ParsingError => "PARSING_ERROR",
            ProcessingStatus::Timeout => "TIMEOUT",
        }
    }
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One record per processed URL.
///
/// `words_count` and `rate` are populated together and only for
/// [`ProcessingStatus::Ok`]; the constructors are the only way to build a
/// result, so the pairing can't be broken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleResult {
    url: String,
    status: ProcessingStatus,
    words_count: Option<usize>,
    rate: Option<f64>,
}

impl ArticleResult {
    pub fn ok(url: impl Into<String>, words_count: usize, rate: f64) -> Self {
        Self {
            url: url.into(),
            status: ProcessingStatus::Ok,
            words_count: Some(words_count),
            rate: Some(rate),
        }
    }

    /// Builds a result for a run that stopped early.
    ///
    /// Passing [`ProcessingStatus::Ok`] here is a caller bug; it is recorded as
    /// a parsing error since there is no score to report.
    pub fn failed(url: impl Into<String>, status: ProcessingStatus) -> Self {
        let status = match status {
            ProcessingStatus::Ok => ProcessingStatus::ParsingError,
            other => other,
        };
        Self {
            url: url.into(),
            status,
            words_count: None,
            rate: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> ProcessingStatus {
        self.status
    }

    pub fn words_count(&self) -> Option<usize> {
        self.words_count
    }

    pub fn rate(&self) -> Option<f64> {
        self.rate
    }

    pub fn is_ok(&self) -> bool {
        self.status == ProcessingStatus::Ok
    }
}
