use super::{MorphDictionary, Tokenizer};
use crate::error::Result;
use async_trait::async_trait;

const YIELD_EVERY: usize = 64;

/// Whitespace tokenizer with dictionary lemmatization.
///
/// Lemmas of two characters or fewer are dropped as noise (pronouns,
/// prepositions, conjunctions), except the negation particle "не".
#[derive(Debug, Clone, Default)]
pub struct MorphTokenizer {
    dictionary: MorphDictionary,
}

impl MorphTokenizer {
    pub fn new(dictionary: MorphDictionary) -> Self {
        Self { dictionary }
    }

    fn normalize(&self, word: &str) -> Option<String> {
        let cleaned = clean_word(word);
        if cleaned.is_empty() {
            return None;
        }
        let lemma = self.dictionary.normal_form(&cleaned.to_lowercase());
        if lemma.chars().count() > 2 || lemma == "не" {
            Some(lemma)
        } else {
            None
        }
    }
}

#[async_trait]
impl Tokenizer for MorphTokenizer {
    async fn split_by_words(&self, text: &str) -> Result<Vec<String>> {
        let mut words = Vec::new();
        for (idx, word) in text.split_whitespace().enumerate() {
            if let Some(lemma) = self.normalize(word) {
                words.push(lemma);
            }
            // Long articles must not starve the runtime or outlive their timeout.
            if idx % YIELD_EVERY == YIELD_EVERY - 1 {
                tokio::task::yield_now().await;
            }
        }
        Ok(words)
    }
}

/// Strips quotes, ellipses and ASCII punctuation from the edges of a word.
fn clean_word(word: &str) -> String {
    word.replace(['«', '»', '…'], "")
        .trim_matches(|c: char| c.is_ascii_punctuation())
        .to_string()
}
