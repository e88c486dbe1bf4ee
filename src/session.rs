use std::time::Instant;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::stats::Statistics;

/// Initial list size for time-limit sessions.
pub const TIME_MODE_WORDS: usize = 50;
/// Initial list size for endless sessions.
pub const ENDLESS_INITIAL_WORDS: usize = 100;
/// Endless sessions replenish once fewer than this many words remain ahead.
pub const ENDLESS_MIN_AHEAD: usize = 20;
/// Words appended per endless replenishment.
pub const ENDLESS_BATCH: usize = 50;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Programming,
}

/// How a session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Finish after this many submitted words.
    Words(usize),
    /// Finish when this many seconds have ticked away.
    Time(u64),
    /// Only ends on an explicit finish.
    Endless,
}

impl Mode {
    /// Size of the word list generated at construction and on restart.
    pub fn initial_word_count(&self) -> usize {
        match self {
            Mode::Words(n) => *n,
            Mode::Time(_) => TIME_MODE_WORDS,
            Mode::Endless => ENDLESS_INITIAL_WORDS,
        }
    }

    pub fn time_limit(&self) -> Option<u64> {
        match self {
            Mode::Time(secs) => Some(*secs),
            _ => None,
        }
    }

    pub fn is_endless(&self) -> bool {
        matches!(self, Mode::Endless)
    }

    /// Heading shown above the words while typing.
    pub fn headline(&self) -> String {
        match self {
            Mode::Words(n) => format!("Type {n} words"),
            Mode::Time(secs) => format!("Type for {secs} seconds"),
            Mode::Endless => "Vibe Mode - Type endlessly".to_string(),
        }
    }
}

/// Immutable configuration for the life of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub mode: Mode,
    pub difficulty: Difficulty,
}

impl SessionConfig {
    pub fn new(mode: Mode, difficulty: Difficulty) -> Self {
        Self { mode, difficulty }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    pub completed: bool,
    pub is_current: bool,
}

impl Word {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
            is_current: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Playing,
    Finished,
}

/// Snapshot of a typing session, read by the presentation layer.
#[derive(Debug, Clone)]
pub struct Session {
    pub words: Vec<Word>,
    /// Index of the word receiving keystrokes; `words.len()` once exhausted.
    pub current_word_index: usize,
    pub input: String,
    pub stats: Statistics,
    pub is_playing: bool,
    pub is_finished: bool,
    pub start_time: Option<Instant>,
    pub end_time: Option<Instant>,
    /// Whole seconds left in a time-limit session.
    pub time_remaining: Option<u64>,
}

impl Session {
    pub fn new(words: Vec<String>, time_limit: Option<u64>) -> Self {
        Self {
            words: words.into_iter().map(Word::new).collect(),
            current_word_index: 0,
            input: String::new(),
            stats: Statistics::default(),
            is_playing: false,
            is_finished: false,
            start_time: None,
            end_time: None,
            time_remaining: time_limit,
        }
    }

    pub fn phase(&self) -> Phase {
        match (self.is_playing, self.is_finished) {
            (_, true) => Phase::Finished,
            (true, false) => Phase::Playing,
            (false, false) => Phase::NotStarted,
        }
    }

    pub fn current_word(&self) -> Option<&Word> {
        self.words.get(self.current_word_index)
    }

    /// Unconsumed words from the current index onwards.
    pub fn words_ahead(&self) -> usize {
        self.words.len().saturating_sub(self.current_word_index)
    }
}
