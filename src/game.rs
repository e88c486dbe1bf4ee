use log::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::language::WordProvider;
use crate::session::{Mode, Phase, Session, SessionConfig, ENDLESS_BATCH, ENDLESS_MIN_AHEAD};
use crate::stats::matching_chars;

/// Discrete events sent by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Character(char),
    Backspace,
    SubmitWord,
    FinishNow,
    Restart,
    Tick,
}

/// The typing-session state machine.
///
/// `NotStarted -> Playing -> Finished`, and back to `NotStarted` on restart.
/// Operations called in the wrong phase are ignored.
pub struct Game {
    config: SessionConfig,
    provider: Box<dyn WordProvider>,
    clock: Box<dyn Clock>,
    session: Session,
}

impl Game {
    pub fn new(config: SessionConfig, provider: Box<dyn WordProvider>) -> Self {
        Self::with_clock(config, provider, Box::new(SystemClock))
    }

    pub fn with_clock(
        config: SessionConfig,
        mut provider: Box<dyn WordProvider>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let session = fresh_session(&config, provider.as_mut());
        Self {
            config,
            provider,
            clock,
            session,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current state for rendering.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> Session {
        self.session.clone()
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Start => self.start(),
            Command::Character(c) => self.type_char(c),
            Command::Backspace => self.backspace(),
            Command::SubmitWord => self.submit_word(),
            Command::FinishNow => self.finish(),
            Command::Restart => self.restart(),
            Command::Tick => self.tick(),
        }
    }

    pub fn start(&mut self) {
        if self.phase() != Phase::NotStarted {
            return;
        }
        let session = &mut self.session;
        session.is_playing = true;
        session.start_time = Some(self.clock.now());
        if let Some(word) = session.words.get_mut(session.current_word_index) {
            word.is_current = true;
        }
        info!("session started: {:?}", self.config.mode);
    }

    /// Replace the in-progress buffer. Characters are filtered upstream.
    pub fn set_input(&mut self, buffer: impl Into<String>) {
        if self.phase() != Phase::Playing {
            return;
        }
        self.session.input = buffer.into();
    }

    pub fn type_char(&mut self, c: char) {
        if self.phase() != Phase::Playing {
            return;
        }
        let mut buffer = self.session.input.clone();
        buffer.push(c);
        self.set_input(buffer);
    }

    pub fn backspace(&mut self) {
        if self.phase() != Phase::Playing {
            return;
        }
        self.session.input.pop();
    }

    /// Score the buffer against the current word and move on.
    ///
    /// Keystrokes are only counted here, so retyped characters never
    /// inflate the totals.
    pub fn submit_word(&mut self) {
        if self.phase() != Phase::Playing {
            return;
        }
        let elapsed = self.elapsed_secs();
        let session = &mut self.session;
        let index = session.current_word_index;
        let Some(word) = session.words.get_mut(index) else {
            return;
        };

        let typed = std::mem::take(&mut session.input);
        let is_correct = typed == word.text;
        let correct_chars = matching_chars(&typed, &word.text);
        word.completed = true;
        word.is_current = false;

        session
            .stats
            .record_word(typed.chars().count(), correct_chars, is_correct);
        session.stats.refresh(elapsed);
        session.current_word_index += 1;

        if self.config.mode.is_endless() && self.session.words_ahead() < ENDLESS_MIN_AHEAD {
            self.replenish();
        }

        let session = &mut self.session;
        if let Some(next) = session.words.get_mut(session.current_word_index) {
            next.is_current = true;
        }

        if self.word_limit_reached() {
            self.finish();
        }
    }

    /// End the session now. Idempotent.
    pub fn finish(&mut self) {
        if self.session.is_finished {
            return;
        }
        if self.session.is_playing {
            let elapsed = self.elapsed_secs();
            self.session.stats.refresh(elapsed);
        }
        let session = &mut self.session;
        session.is_playing = false;
        session.is_finished = true;
        session.end_time = Some(self.clock.now());
        for word in session.words.iter_mut() {
            word.is_current = false;
        }
        info!(
            "session finished: {} wpm, {}% accuracy, {}/{} words",
            session.stats.wpm,
            session.stats.accuracy,
            session.stats.correct_words,
            session.stats.total_words
        );
    }

    /// Discard everything and regenerate words for the same configuration.
    pub fn restart(&mut self) {
        self.provider.rewind();
        self.session = fresh_session(&self.config, self.provider.as_mut());
        debug!("session restarted with {} words", self.session.words.len());
    }

    /// One elapsed second. Only meaningful for time-limit sessions.
    pub fn tick(&mut self) {
        if self.phase() != Phase::Playing {
            return;
        }
        let Some(remaining) = self.session.time_remaining else {
            return;
        };
        let remaining = remaining.saturating_sub(1);
        self.session.time_remaining = Some(remaining);
        if remaining == 0 {
            self.finish();
        } else {
            let elapsed = self.elapsed_secs();
            self.session.stats.refresh(elapsed);
        }
    }

    fn elapsed_secs(&self) -> f64 {
        self.session
            .start_time
            .map(|start| self.clock.now().duration_since(start).as_secs_f64())
            .unwrap_or(0.0)
    }

    fn replenish(&mut self) {
        let batch = self
            .provider
            .random_words(self.config.difficulty, ENDLESS_BATCH);
        debug!(
            "replenishing endless session: {} words ahead, adding {}",
            self.session.words_ahead(),
            batch.len()
        );
        self.session
            .words
            .extend(batch.into_iter().map(crate::session::Word::new));
    }

    fn word_limit_reached(&self) -> bool {
        let session = &self.session;
        match self.config.mode {
            Mode::Words(count) => {
                session.stats.total_words >= count || session.words_ahead() == 0
            }
            Mode::Time(_) => session.words_ahead() == 0,
            Mode::Endless => false,
        }
    }
}

fn fresh_session(config: &SessionConfig, provider: &mut dyn WordProvider) -> Session {
    let words = provider.random_words(config.difficulty, config.mode.initial_word_count());
    Session::new(words, config.mode.time_limit())
}
