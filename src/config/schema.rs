use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnalyzerConfig {
    #[serde(default = "default_name")]
    #[validate(length(min = 1))]
    pub name: String,

    /// Word lists unioned into the charged-word set
    #[serde(default = "default_charged_dicts")]
    #[validate(length(min = 1))]
    pub charged_dicts: Vec<PathBuf>,

    /// `form<TAB>lemma` file; without it words are only lowercased
    #[serde(default)]
    pub morph_dictionary: Option<PathBuf>,

    /// Articles processed by `run` when none are given on the command line
    #[serde(default)]
    pub urls: Vec<String>,

    /// Budget for the fetch phase and, separately, the tokenize phase
    #[serde(default = "default_timeout_secs")]
    #[validate(range(min = 1, max = 300))]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Route all tokenizer calls through a single worker
    #[serde(default)]
    pub serialize_tokenizer: bool,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    #[validate]
    pub server: ServerConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            charged_dicts: default_charged_dicts(),
            morph_dictionary: None,
            urls: Vec::new(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            serialize_tokenizer: false,
            output: OutputConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AnalyzerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Upper bound on URLs accepted in one request
    #[serde(default = "default_max_urls")]
    #[validate(range(min = 1, max = 100))]
    pub max_urls: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_urls: default_max_urls(),
        }
    }
}

/// One configuration file as written.
///
/// Every field is optional so inheritance can tell a value the file sets
/// from one it leaves out, even when the set value equals the default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigLayer {
    pub name: Option<String>,
    pub charged_dicts: Option<Vec<PathBuf>>,
    pub morph_dictionary: Option<PathBuf>,
    pub urls: Option<Vec<String>>,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
    pub serialize_tokenizer: Option<bool>,
    pub output: Option<OutputConfig>,
    #[serde(default)]
    pub server: ServerLayer,

    /// Optional path to a parent configuration file to inherit from
    pub extends: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerLayer {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub max_urls: Option<usize>,
}

impl ConfigLayer {
    /// Stacks `self` on top of `parent`: anything this layer sets wins.
    pub fn over(self, parent: ConfigLayer) -> ConfigLayer {
        ConfigLayer {
            name: self.name.or(parent.name),
            charged_dicts: self.charged_dicts.or(parent.charged_dicts),
            morph_dictionary: self.morph_dictionary.or(parent.morph_dictionary),
            urls: self.urls.or(parent.urls),
            timeout_secs: self.timeout_secs.or(parent.timeout_secs),
            user_agent: self.user_agent.or(parent.user_agent),
            serialize_tokenizer: self.serialize_tokenizer.or(parent.serialize_tokenizer),
            output: self.output.or(parent.output),
            server: ServerLayer {
                host: self.server.host.or(parent.server.host),
                port: self.server.port.or(parent.server.port),
                max_urls: self.server.max_urls.or(parent.server.max_urls),
            },
            extends: None,
        }
    }

    /// Fills whatever is still unset with defaults.
    pub fn into_config(self) -> AnalyzerConfig {
        let defaults = AnalyzerConfig::default();
        AnalyzerConfig {
            name: self.name.unwrap_or(defaults.name),
            charged_dicts: self.charged_dicts.unwrap_or(defaults.charged_dicts),
            morph_dictionary: self.morph_dictionary,
            urls: self.urls.unwrap_or_default(),
            timeout_secs: self.timeout_secs.unwrap_or(defaults.timeout_secs),
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
            serialize_tokenizer: self.serialize_tokenizer.unwrap_or(defaults.serialize_tokenizer),
            output: self.output.unwrap_or(defaults.output),
            server: ServerConfig {
                host: self.server.host.unwrap_or(defaults.server.host),
                port: self.server.port.unwrap_or(defaults.server.port),
                max_urls: self.server.max_urls.unwrap_or(defaults.server.max_urls),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutputConfig {
    #[default]
    Console,
    Json,
}

fn default_name() -> String {
    "jaundice".to_string()
}

fn default_charged_dicts() -> Vec<PathBuf> {
    vec![
        PathBuf::from("charged_dict/negative_words.txt"),
        PathBuf::from("charged_dict/positive_words.txt"),
    ]
}

fn default_timeout_secs() -> u64 {
    3
}

fn default_user_agent() -> String {
    format!("jaundice/{}", env!("CARGO_PKG_VERSION"))
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8888
}

fn default_max_urls() -> usize {
    10
}
