use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Command;
use crate::session::{Mode, Phase};

/// What a key press means to the game screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Forward to the session.
    Game(Command),
    /// Leave the game screen.
    Exit,
    /// Leave the program.
    Quit,
    Ignore,
}

/// Punctuation accepted alongside ASCII letters and digits.
const ACCEPTED_PUNCTUATION: &str = ".,!?;:'\"()-";

/// Characters that may reach the input buffer.
pub fn is_accepted_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || ACCEPTED_PUNCTUATION.contains(c)
}

/// Map a key press to an action for the given phase and mode.
pub fn map_key(key: KeyEvent, phase: Phase, mode: Mode) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }
    if key.code == KeyCode::Esc {
        return KeyAction::Exit;
    }

    match phase {
        Phase::NotStarted => KeyAction::Ignore,
        Phase::Finished => match key.code {
            KeyCode::Tab => KeyAction::Game(Command::Restart),
            _ => KeyAction::Ignore,
        },
        Phase::Playing => match key.code {
            KeyCode::Backspace | KeyCode::Delete => KeyAction::Game(Command::Backspace),
            KeyCode::Enter if mode.is_endless() => KeyAction::Game(Command::FinishNow),
            KeyCode::Char(' ') => KeyAction::Game(Command::SubmitWord),
            KeyCode::Char(c) if is_accepted_char(c) => KeyAction::Game(Command::Character(c)),
            _ => KeyAction::Ignore,
        },
    }
}
