use crate::adapters::InosmiSanitizer;
use crate::config::schema::{AnalyzerConfig, ConfigLayer, OutputConfig};
use crate::coordinator::BatchCoordinator;
use crate::error::{Error, Result};
use crate::lexicon::ChargedWords;
use crate::metrics::MetricsCollector;
use crate::output::{console::ConsoleOutput, json::JsonOutput, OutputHandler};
use crate::processor::ArticleProcessor;
use crate::text::{MorphDictionary, MorphTokenizer, QueuedTokenizer, Tokenizer};
use reqwest::Client;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use validator::Validate;

/// Queue depth for the serialized tokenizer worker.
const TOKENIZER_QUEUE: usize = 64;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads `path` and its `extends` chain, then validates the merged result.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<AnalyzerConfig> {
        let mut visited = HashSet::new();
        let config = Self::load_with_inheritance(path.as_ref(), &mut visited)?.into_config();
        config.validate()?;
        Ok(config)
    }

    fn load_with_inheritance(path: &Path, visited: &mut HashSet<PathBuf>) -> Result<ConfigLayer> {
        let path = fs::canonicalize(path).map_err(|e| {
            Error::Config(format!("{}: {}", path.display(), e))
        })?;

        if visited.contains(&path) {
            return Err(Error::Config(format!(
                "Circular inheritance detected involving {}",
                path.display()
            )));
        }
        visited.insert(path.clone());

        let layer = Self::load_file(&path)?;

        match layer.extends.clone() {
            Some(parent_path_str) => {
                let parent_path = Self::base_dir(&path)?.join(parent_path_str);
                let parent = Self::load_with_inheritance(&parent_path, visited)?;
                Ok(layer.over(parent))
            }
            None => Ok(layer),
        }
    }

    fn base_dir(path: &Path) -> Result<&Path> {
        path.parent().ok_or_else(|| {
            Error::Config(format!(
                "Cannot determine parent directory for {}",
                path.display()
            ))
        })
    }

    fn load_file(path: &Path) -> Result<ConfigLayer> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

        let mut layer: ConfigLayer = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            _ => {
                return Err(Error::Config(format!(
                    "Unsupported file extension: {}",
                    path.display()
                )))
            }
        };

        // Paths written in a config file are relative to that file.
        let base = Self::base_dir(path)?;
        layer.charged_dicts = layer
            .charged_dicts
            .map(|dicts| dicts.iter().map(|dict| base.join(dict)).collect());
        layer.morph_dictionary = layer.morph_dictionary.map(|dict| base.join(dict));

        Ok(layer)
    }

    /// Builds the shared dependencies and wires them into a coordinator.
    ///
    /// Must be called from within a tokio runtime when
    /// `serialize_tokenizer` is set, since the tokenizer worker is spawned here.
    pub fn create_coordinator(
        config: &AnalyzerConfig,
        metrics: Option<Arc<MetricsCollector>>,
    ) -> Result<BatchCoordinator> {
        let charged_words = Arc::new(ChargedWords::from_files(&config.charged_dicts)?);

        let dictionary = match &config.morph_dictionary {
            Some(path) => MorphDictionary::load(path)?,
            None => {
                log::warn!("No morphology dictionary configured; words are only lowercased");
                MorphDictionary::new()
            }
        };
        let tokenizer: Arc<dyn Tokenizer> = if config.serialize_tokenizer {
            log::info!("Tokenizer calls are serialized through one worker");
            Arc::new(QueuedTokenizer::spawn(
                MorphTokenizer::new(dictionary),
                TOKENIZER_QUEUE,
            ))
        } else {
            Arc::new(MorphTokenizer::new(dictionary))
        };

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;

        let processor = ArticleProcessor::new(
            client,
            charged_words,
            tokenizer,
            Arc::new(InosmiSanitizer::new()),
        )
        .with_timeout(config.timeout());

        Ok(BatchCoordinator::new(processor, metrics))
    }

    pub fn create_output(
        config: &AnalyzerConfig,
        multi: Option<Arc<indicatif::MultiProgress>>,
    ) -> Box<dyn OutputHandler> {
        match config.output {
            OutputConfig::Console => Box::new(ConsoleOutput::new(multi)),
            OutputConfig::Json => Box::new(JsonOutput::stdout()),
        }
    }
}
