use crate::error::{Error, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Emotionally loaded lemmas, loaded once and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct ChargedWords {
    words: HashSet<String>,
}

impl ChargedWords {
    /// Loads and unions every word list in `paths`.
    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut words = HashSet::new();
        for path in paths {
            let loaded = load_word_list(path.as_ref())?;
            log::debug!("Loaded {} charged words from {}", loaded.len(), path.as_ref().display());
            words.extend(loaded);
        }
        log::info!("Charged word set ready: {} words", words.len());
        Ok(Self { words })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ChargedWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Reads a newline-delimited word list. Blank lines are skipped.
pub fn load_word_list(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Lexicon(format!("{}: {}", path.display(), e)))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn word_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn strips_whitespace_and_skips_blank_lines() {
        let file = word_file("аутсайдер  \nбанкротство\r\n\n  \n");
        let words = load_word_list(file.path()).unwrap();
        assert_eq!(words, vec!["аутсайдер", "банкротство"]);
    }

    #[test]
    fn unions_negative_and_positive_lists() {
        let negative = word_file("аутсайдер\nбанкротство\n");
        let positive = word_file("триумф\nаутсайдер\n");
        let charged = ChargedWords::from_files(&[negative.path(), positive.path()]).unwrap();

        assert_eq!(charged.len(), 3);
        assert!(charged.contains("триумф"));
        assert!(charged.contains("банкротство"));
        assert!(!charged.contains("побег"));
    }

    #[test]
    fn missing_file_is_a_lexicon_error() {
        let err = ChargedWords::from_files(&["/nonexistent/negative_words.txt"]).unwrap_err();
        assert!(matches!(err, Error::Lexicon(_)));
    }
}
