use crossterm::event::{KeyCode, KeyEvent};

use crate::config::{Config, ConfigMode};
use crate::session::{Difficulty, Mode, SessionConfig};

pub const WORD_COUNT_CHOICES: [usize; 5] = [10, 25, 50, 100, 250];
pub const TIME_LIMIT_CHOICES: [u64; 5] = [10, 15, 30, 60, 120];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    Words,
    Time,
    Endless,
}

impl ModeKind {
    pub const ALL: [ModeKind; 3] = [ModeKind::Words, ModeKind::Time, ModeKind::Endless];

    pub fn label(&self) -> &'static str {
        match self {
            ModeKind::Words => "Word Mode - Type a specific number of words",
            ModeKind::Time => "Time Mode - Type for a set duration",
            ModeKind::Endless => "Vibe Mode - Endless typing practice",
        }
    }

    fn index(self) -> usize {
        match self {
            ModeKind::Words => 0,
            ModeKind::Time => 1,
            ModeKind::Endless => 2,
        }
    }
}

impl From<ConfigMode> for ModeKind {
    fn from(mode: ConfigMode) -> Self {
        match mode {
            ConfigMode::Words => ModeKind::Words,
            ConfigMode::Time => ModeKind::Time,
            ConfigMode::Endless => ModeKind::Endless,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuStep {
    Mode,
    Options(ModeKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    Pending,
    Selected(SessionConfig),
    Quit,
}

/// Two-step picker: mode first, then a word count or time limit.
///
/// The cursor starts on the remembered mode and option.
#[derive(Debug, Clone)]
pub struct Menu {
    pub step: MenuStep,
    pub selected: usize,
    pub difficulty: Difficulty,
    defaults: Config,
}

impl Menu {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::from_config(&Config::default(), difficulty)
    }

    pub fn from_config(config: &Config, difficulty: Difficulty) -> Self {
        Self {
            step: MenuStep::Mode,
            selected: ModeKind::from(config.mode).index(),
            difficulty,
            defaults: config.clone(),
        }
    }

    /// Make `session` the preselected choice next time the menu opens.
    pub fn remember(&mut self, session: &SessionConfig) {
        self.defaults.remember(session);
        self.difficulty = session.difficulty;
    }

    fn option_index(&self, kind: ModeKind) -> usize {
        let position = match kind {
            ModeKind::Words => WORD_COUNT_CHOICES
                .iter()
                .position(|&n| n == self.defaults.word_count),
            ModeKind::Time => TIME_LIMIT_CHOICES
                .iter()
                .position(|&secs| secs == self.defaults.time_limit),
            ModeKind::Endless => None,
        };
        position.unwrap_or(0)
    }

    pub fn title(&self) -> &'static str {
        match self.step {
            MenuStep::Mode => "Choose Your Game Mode:",
            MenuStep::Options(ModeKind::Words) => "How many words?",
            MenuStep::Options(_) => "How long?",
        }
    }

    pub fn items(&self) -> Vec<String> {
        match self.step {
            MenuStep::Mode => ModeKind::ALL.iter().map(|m| m.label().to_string()).collect(),
            MenuStep::Options(ModeKind::Time) => TIME_LIMIT_CHOICES
                .iter()
                .map(|s| format!("{s} seconds"))
                .collect(),
            MenuStep::Options(_) => WORD_COUNT_CHOICES
                .iter()
                .map(|w| format!("{w} words"))
                .collect(),
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> MenuOutcome {
        let len = self.items().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = (self.selected + len - 1) % len;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1) % len;
            }
            KeyCode::Enter => return self.confirm(),
            KeyCode::Esc => match self.step {
                MenuStep::Mode => return MenuOutcome::Quit,
                MenuStep::Options(kind) => {
                    self.step = MenuStep::Mode;
                    self.selected = kind.index();
                }
            },
            _ => {}
        }
        MenuOutcome::Pending
    }

    fn confirm(&mut self) -> MenuOutcome {
        match self.step {
            MenuStep::Mode => match ModeKind::ALL[self.selected] {
                ModeKind::Endless => {
                    MenuOutcome::Selected(SessionConfig::new(Mode::Endless, self.difficulty))
                }
                kind => {
                    self.step = MenuStep::Options(kind);
                    self.selected = self.option_index(kind);
                    MenuOutcome::Pending
                }
            },
            MenuStep::Options(ModeKind::Time) => MenuOutcome::Selected(SessionConfig::new(
                Mode::Time(TIME_LIMIT_CHOICES[self.selected]),
                self.difficulty,
            )),
            MenuStep::Options(_) => MenuOutcome::Selected(SessionConfig::new(
                Mode::Words(WORD_COUNT_CHOICES[self.selected]),
                self.difficulty,
            )),
        }
    }

    /// Back to the first step, e.g. when returning from a game.
    pub fn reset(&mut self) {
        self.step = MenuStep::Mode;
        self.selected = ModeKind::from(self.defaults.mode).index();
    }
}
