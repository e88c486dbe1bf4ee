/// Characters per "word" in the standard WPM definition.
const CHARS_PER_WORD: f64 = 5.0;

/// Running totals for one session.
///
/// Counts only grow within a session; `wpm`, `accuracy`, and `time_elapsed`
/// are recomputed from them on every update.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub correct_words: usize,
    pub total_words: usize,
    pub correct_keystrokes: usize,
    pub total_keystrokes: usize,
    pub wpm: u32,
    pub accuracy: u32,
    /// Seconds since the session started.
    pub time_elapsed: f64,
}

impl Default for Statistics {
    fn default() -> Self {
        Self {
            correct_words: 0,
            total_words: 0,
            correct_keystrokes: 0,
            total_keystrokes: 0,
            wpm: 0,
            accuracy: 100,
            time_elapsed: 0.0,
        }
    }
}

impl Statistics {
    /// Fold one submitted word into the totals.
    ///
    /// `correct_chars` counts matching positions; the trailing space is only
    /// credited when the whole word was right, but always counts as typed.
    pub fn record_word(&mut self, typed_len: usize, correct_chars: usize, is_correct: bool) {
        self.total_words += 1;
        if is_correct {
            self.correct_words += 1;
        }
        self.correct_keystrokes += correct_chars + usize::from(is_correct);
        self.total_keystrokes += typed_len + 1;
    }

    /// Recompute the derived fields for the given elapsed time.
    pub fn refresh(&mut self, elapsed_secs: f64) {
        self.time_elapsed = elapsed_secs;
        self.wpm = wpm(self.correct_keystrokes, elapsed_secs);
        self.accuracy = accuracy(self.correct_keystrokes, self.total_keystrokes);
    }
}

/// `(correct / 5) / minutes`, rounded. Zero when no time has passed.
pub fn wpm(correct_keystrokes: usize, elapsed_secs: f64) -> u32 {
    if elapsed_secs <= 0.0 {
        return 0;
    }
    let words = correct_keystrokes as f64 / CHARS_PER_WORD;
    (words / (elapsed_secs / 60.0)).round() as u32
}

/// Percentage of keystrokes that were correct, rounded. 100 before any input.
pub fn accuracy(correct_keystrokes: usize, total_keystrokes: usize) -> u32 {
    if total_keystrokes == 0 {
        return 100;
    }
    (correct_keystrokes as f64 / total_keystrokes as f64 * 100.0).round() as u32
}

/// Render seconds as `M:SS`, truncating fractions.
pub fn format_duration(seconds: f64) -> String {
    let whole = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// Number of positions where `typed` and `target` agree, up to the shorter one.
pub fn matching_chars(typed: &str, target: &str) -> usize {
    typed
        .chars()
        .zip(target.chars())
        .filter(|(a, b)| a == b)
        .count()
}
