pub mod adapters;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod lexicon;
pub mod metrics;
pub mod models;
pub mod output;
pub mod processor;
pub mod scoring;
pub mod selector;
pub mod server;
pub mod text;

pub use coordinator::BatchCoordinator;
pub use error::{Error, Result};
pub use lexicon::ChargedWords;
pub use metrics::collector::MetricsCollector;
pub use metrics::snapshot::MetricsSnapshot;
pub use models::{ArticleResult, ProcessingStatus};
pub use processor::ArticleProcessor;
pub use scoring::calculate_jaundice_rate;
