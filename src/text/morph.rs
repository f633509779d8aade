use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Word form to lemma lookup table.
///
/// File format: one `form<TAB>lemma` pair per line; `#` starts a comment line.
/// Forms are matched lowercase. Unknown forms are their own lemma.
#[derive(Debug, Clone, Default)]
pub struct MorphDictionary {
    lemmas: HashMap<String, String>,
}

impl MorphDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Dictionary(format!("{}: {}", path.display(), e)))?;
        let dictionary = Self::parse(&content)
            .map_err(|e| Error::Dictionary(format!("{}: {}", path.display(), e)))?;
        log::info!("Loaded {} word forms from {}", dictionary.len(), path.display());
        Ok(dictionary)
    }

    fn parse(content: &str) -> std::result::Result<Self, String> {
        let mut lemmas = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (form, lemma) = line
                .split_once('\t')
                .ok_or_else(|| format!("line {}: expected `form<TAB>lemma`", idx + 1))?;
            let (form, lemma) = (form.trim(), lemma.trim());
            if form.is_empty() || lemma.is_empty() {
                return Err(format!("line {}: empty form or lemma", idx + 1));
            }
            lemmas.insert(form.to_lowercase(), lemma.to_lowercase());
        }
        Ok(Self { lemmas })
    }

    pub fn insert(&mut self, form: &str, lemma: &str) {
        self.lemmas.insert(form.to_lowercase(), lemma.to_lowercase());
    }

    pub fn with_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut dictionary = Self::new();
        for (form, lemma) in entries {
            dictionary.insert(form, lemma);
        }
        dictionary
    }

    /// Normal form of an already lowercased word.
    pub fn normal_form(&self, word: &str) -> String {
        self.lemmas
            .get(word)
            .cloned()
            .unwrap_or_else(|| word.to_string())
    }

    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }
}
