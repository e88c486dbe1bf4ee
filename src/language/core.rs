use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;

use crate::error::{Error, Result};
use crate::session::Difficulty;

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

/// Name of the corpus bundled with the binary.
pub const DEFAULT_CORPUS: &str = "words";

/// Word corpus pre-sorted into difficulty buckets.
#[derive(Deserialize, Clone, Debug)]
pub struct Corpus {
    pub name: String,
    pub easy: Vec<String>,
    pub medium: Vec<String>,
    pub hard: Vec<String>,
    pub programming: Vec<String>,
}

impl Corpus {
    /// Load the bundled corpus.
    pub fn embedded() -> Result<Self> {
        Self::from_embedded_file(DEFAULT_CORPUS)
    }

    pub fn from_embedded_file(name: &str) -> Result<Self> {
        let file_name = format!("{name}.json");
        let file = LANG_DIR
            .get_file(&file_name)
            .ok_or_else(|| Error::MissingCorpus(file_name.clone()))?;
        let contents = file
            .contents_utf8()
            .ok_or_else(|| Error::MissingCorpus(file_name.clone()))?;
        Self::from_json(contents)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let corpus: Corpus = from_str(json)?;
        if corpus.is_empty() {
            return Err(Error::EmptyCorpus(corpus.name));
        }
        Ok(corpus)
    }

    pub fn bucket(&self, difficulty: Difficulty) -> &[String] {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
            Difficulty::Programming => &self.programming,
        }
    }

    /// Every word across all buckets, in bucket order.
    pub fn all_words(&self) -> Vec<String> {
        [&self.easy, &self.medium, &self.hard, &self.programming]
            .into_iter()
            .flatten()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.easy.len() + self.medium.len() + self.hard.len() + self.programming.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_embedded_corpus_loads() {
        let corpus = Corpus::embedded().unwrap();

        assert_eq!(corpus.name, "english");
        assert!(!corpus.easy.is_empty());
        assert!(!corpus.medium.is_empty());
        assert!(!corpus.hard.is_empty());
        assert!(!corpus.programming.is_empty());
    }

    #[test]
    fn test_embedded_words_are_typeable() {
        let corpus = Corpus::embedded().unwrap();
        for word in corpus.all_words() {
            assert!(!word.is_empty());
            assert!(word.chars().all(|c| c.is_ascii_graphic()), "{word}");
        }
    }

    #[test]
    fn test_buckets_follow_length_rules() {
        let corpus = Corpus::embedded().unwrap();
        assert!(corpus.bucket(Difficulty::Easy).iter().all(|w| w.len() <= 4));
        assert!(corpus
            .bucket(Difficulty::Medium)
            .iter()
            .all(|w| (5..=7).contains(&w.len())));
        assert!(corpus.bucket(Difficulty::Hard).iter().all(|w| w.len() >= 8));
    }

    #[test]
    fn test_corpus_deserialization() {
        let json_data = r#"
        {
            "name": "test",
            "easy": ["cat"],
            "medium": ["hello"],
            "hard": ["keyboards"],
            "programming": ["api"]
        }
        "#;

        let corpus = Corpus::from_json(json_data).unwrap();

        assert_eq!(corpus.len(), 4);
        assert_eq!(corpus.all_words(), vec!["cat", "hello", "keyboards", "api"]);
    }

    #[test]
    fn test_empty_corpus_is_rejected() {
        let json_data = r#"{"name": "none", "easy": [], "medium": [], "hard": [], "programming": []}"#;
        assert_matches!(Corpus::from_json(json_data), Err(Error::EmptyCorpus(name)) if name == "none");
    }

    #[test]
    fn test_missing_corpus_file() {
        assert_matches!(
            Corpus::from_embedded_file("nonexistent"),
            Err(Error::MissingCorpus(_))
        );
    }
}
