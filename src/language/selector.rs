use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::core::Corpus;
use crate::session::Difficulty;

/// Opaque source of words for a session.
pub trait WordProvider {
    /// Produce `count` words. Callers do not rely on uniqueness or distribution.
    fn random_words(&mut self, difficulty: Difficulty, count: usize) -> Vec<String>;

    /// Called before a session is regenerated. Random sources keep their state.
    fn rewind(&mut self) {}
}

/// Samples with replacement from the whole corpus.
///
/// Difficulty is accepted but does not narrow the pool.
#[derive(Debug)]
pub struct RandomProvider {
    pool: Vec<String>,
    rng: StdRng,
}

impl RandomProvider {
    pub fn new(corpus: &Corpus) -> Self {
        Self::with_rng(corpus, StdRng::from_entropy())
    }

    /// Deterministic sampling for reproducible sessions.
    pub fn seeded(corpus: &Corpus, seed: u64) -> Self {
        Self::with_rng(corpus, StdRng::seed_from_u64(seed))
    }

    fn with_rng(corpus: &Corpus, rng: StdRng) -> Self {
        Self {
            pool: corpus.all_words(),
            rng,
        }
    }
}

impl WordProvider for RandomProvider {
    fn random_words(&mut self, _difficulty: Difficulty, count: usize) -> Vec<String> {
        (0..count)
            .filter_map(|_| self.pool.choose(&mut self.rng).cloned())
            .collect()
    }
}

/// Repeats a fixed word sequence, e.g. from a `--prompt`.
#[derive(Debug, Clone)]
pub struct FixedProvider {
    words: Vec<String>,
    next: usize,
}

impl FixedProvider {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            next: 0,
        }
    }

    /// Split free text on whitespace.
    pub fn from_prompt(prompt: &str) -> Self {
        Self::new(prompt.split_whitespace())
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordProvider for FixedProvider {
    fn random_words(&mut self, _difficulty: Difficulty, count: usize) -> Vec<String> {
        if self.words.is_empty() {
            return Vec::new();
        }
        (0..count)
            .map(|_| {
                let word = self.words[self.next % self.words.len()].clone();
                self.next += 1;
                word
            })
            .collect()
    }

    /// Replaying a prompt starts from its first word.
    fn rewind(&mut self) {
        self.next = 0;
    }
}
