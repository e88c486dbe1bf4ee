pub mod core;
pub mod selector;

pub use self::core::Corpus;
pub use selector::{FixedProvider, RandomProvider, WordProvider};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Difficulty;

    #[test]
    fn test_embedded_corpus_feeds_provider() {
        let corpus = Corpus::embedded().unwrap();
        let mut provider = RandomProvider::seeded(&corpus, 1);

        let words = provider.random_words(Difficulty::Medium, 5);
        assert_eq!(words.len(), 5);
        assert!(words.iter().all(|w| !w.is_empty()));
    }
}
