#![allow(dead_code)]

use async_trait::async_trait;
use jaundice::adapters::InosmiSanitizer;
use jaundice::text::{MorphDictionary, MorphTokenizer, Tokenizer};
use jaundice::{ArticleProcessor, ChargedWords};
use std::sync::Arc;
use std::time::Duration;

pub const ARTICLE_HTML: &str = r#"
<html>
  <head><title>ИноСМИ</title></head>
  <body>
    <div class="layout-article">
      <div class="article__meta">04.02.2023</div>
      <div class="article__body">
        <p>Все аутсайдер побег</p>
        <aside>Банкротство</aside>
      </div>
    </div>
  </body>
</html>
"#;

pub const FOREIGN_HTML: &str = r#"
<html><body><div class="b-topic__content"><p>Банкротство аутсайдер</p></div></body></html>
"#;

pub fn charged_words() -> Arc<ChargedWords> {
    Arc::new(["аутсайдер", "банкротство"].into_iter().collect())
}

pub fn tokenizer() -> Arc<dyn Tokenizer> {
    Arc::new(MorphTokenizer::new(MorphDictionary::with_entries([
        ("хочет", "хотеть"),
    ])))
}

pub fn processor_with(tokenizer: Arc<dyn Tokenizer>, timeout: Duration) -> ArticleProcessor {
    ArticleProcessor::new(
        reqwest::Client::new(),
        charged_words(),
        tokenizer,
        Arc::new(InosmiSanitizer::new()),
    )
    .with_timeout(timeout)
}

pub fn processor() -> ArticleProcessor {
    processor_with(tokenizer(), Duration::from_secs(3))
}

/// Tokenizer that never finishes in time.
pub struct SlowTokenizer(pub Duration);

#[async_trait]
impl Tokenizer for SlowTokenizer {
    async fn split_by_words(&self, text: &str) -> jaundice::Result<Vec<String>> {
        tokio::time::sleep(self.0).await;
        Ok(text.split_whitespace().map(str::to_lowercase).collect())
    }
}

pub struct BrokenTokenizer;

#[async_trait]
impl Tokenizer for BrokenTokenizer {
    async fn split_by_words(&self, _text: &str) -> jaundice::Result<Vec<String>> {
        Err(jaundice::Error::Internal("analyzer unavailable".to_string()))
    }
}
