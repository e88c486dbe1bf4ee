pub mod screen;

use cli_racer::{
    game::Game,
    session::{Mode, Phase, Session, Word},
    stats::format_duration,
    window::{visible_window, LOOK_BEHIND, WINDOW_SIZE},
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

/// Renders whichever phase the session is in.
pub struct GameView<'a> {
    pub game: &'a Game,
}

impl Widget for GameView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = self.game.session();
        let mode = self.game.config().mode;

        match session.phase() {
            Phase::NotStarted => render_get_ready(area, buf),
            Phase::Playing => render_typing(session, mode, area, buf),
            Phase::Finished => render_results(session, area, buf),
        }
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

fn render_get_ready(area: Rect, buf: &mut Buffer) {
    let lines = vec![
        Line::from(Span::styled("Get Ready!", bold().fg(Color::Cyan))),
        Line::default(),
        Line::from(Span::styled(
            "Starting in a moment...",
            Style::default().fg(Color::Green),
        )),
        Line::default(),
        Line::default(),
        Line::from(Span::styled("Press ESC to return to menu", dim())),
    ];
    let height = lines.len() as u16;
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(centered_rows(area, height), buf);
}

fn render_typing(session: &Session, mode: Mode, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(2), // headline
            Constraint::Length(5), // words box
            Constraint::Length(1),
            Constraint::Length(2), // stats
            Constraint::Length(1),
            Constraint::Length(2), // hints
            Constraint::Min(0),
        ])
        .split(area);

    Paragraph::new(Span::styled(mode.headline(), bold().fg(Color::Cyan)))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    let words_line = word_line(session);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner_width = chunks[2].width.saturating_sub(4) as usize;
    let fits = words_line.width() <= inner_width;
    Paragraph::new(words_line)
        .block(block.padding(ratatui::widgets::Padding::new(1, 1, 1, 1)))
        .alignment(if fits {
            // a single centered line reads calmer
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true })
        .render(chunks[2], buf);

    render_stats_row(session, mode, chunks[4], buf);

    let mut hints = vec![Line::from(Span::styled("Press ESC to return to menu", dim()))];
    if mode.is_endless() {
        hints.push(Line::from(Span::styled(
            "Press ENTER to finish and see your stats",
            dim(),
        )));
    }
    Paragraph::new(hints)
        .alignment(Alignment::Center)
        .render(chunks[6], buf);
}

/// The visible window of words, with the current word coloured per character.
fn word_line(session: &Session) -> Line<'static> {
    let window = visible_window(
        &session.words,
        session.current_word_index,
        WINDOW_SIZE,
        LOOK_BEHIND,
    );
    let current = session.current_word_index;
    let mut spans = Vec::new();

    for (index, word) in window.indexed() {
        if index == current {
            spans.extend(current_word_spans(word, &session.input));
        } else {
            let distance = index.abs_diff(current);
            let style = if word.completed {
                Style::default().fg(Color::Green)
            } else if index == current + 1 {
                bold().fg(Color::Cyan)
            } else if distance > 2 {
                dim().fg(Color::Gray)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(word.text.clone(), style));
        }
        spans.push(Span::raw(" "));
    }
    spans.pop();
    Line::from(spans)
}

fn current_word_spans(word: &Word, input: &str) -> Vec<Span<'static>> {
    let typed: Vec<char> = input.chars().collect();
    let mut spans: Vec<Span<'static>> = word
        .text
        .chars()
        .enumerate()
        .map(|(i, expected)| {
            let style = match typed.get(i) {
                Some(&c) if c == expected => bold().fg(Color::Green),
                Some(_) => bold().fg(Color::Red),
                None if i == typed.len() => bold().fg(Color::Cyan).bg(Color::DarkGray),
                None => Style::default().fg(Color::Gray),
            };
            Span::styled(expected.to_string(), style)
        })
        .collect();

    let overflow: String = typed.iter().skip(word.text.chars().count()).collect();
    if !overflow.is_empty() {
        spans.push(Span::styled(overflow, bold().fg(Color::Red)));
    }
    spans
}

fn accuracy_color(accuracy: u32) -> Color {
    match accuracy {
        95.. => Color::Green,
        80..=94 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_stats_row(session: &Session, mode: Mode, area: Rect, buf: &mut Buffer) {
    let stats = &session.stats;
    let time = match (mode, session.time_remaining) {
        (Mode::Time(_), Some(remaining)) => format_duration(remaining as f64),
        _ => format_duration(stats.time_elapsed),
    };
    let cells = [
        ("WPM", stats.wpm.to_string(), Color::Yellow),
        ("Accuracy", format!("{}%", stats.accuracy), accuracy_color(stats.accuracy)),
        ("Words", stats.correct_words.to_string(), Color::Green),
        ("Time", time, Color::Magenta),
    ];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for ((label, value, color), column) in cells.into_iter().zip(columns.iter()) {
        Paragraph::new(vec![
            Line::from(Span::styled(label, bold().fg(Color::Cyan))),
            Line::from(Span::styled(value, bold().fg(color))),
        ])
        .alignment(Alignment::Center)
        .render(*column, buf);
    }
}

fn render_results(session: &Session, area: Rect, buf: &mut Buffer) {
    let stats = &session.stats;
    let value = |v: String| Span::styled(v, bold().fg(Color::Green));
    let lines = vec![
        Line::from(Span::styled("Game Over!", bold().fg(Color::Magenta))),
        Line::default(),
        Line::from(Span::styled("Final Stats", bold().fg(Color::Yellow))),
        Line::from(vec![Span::raw("WPM: "), value(stats.wpm.to_string())]),
        Line::from(vec![
            Span::raw("Accuracy: "),
            value(format!("{}%", stats.accuracy)),
        ]),
        Line::from(vec![
            Span::raw("Words Typed: "),
            value(stats.correct_words.to_string()),
        ]),
        Line::from(vec![
            Span::raw("Time: "),
            value(format_duration(stats.time_elapsed)),
        ]),
        Line::default(),
        Line::from(Span::styled("Press TAB to play again", Style::default().fg(Color::Cyan))),
        Line::from(Span::styled("Press ESC to return to menu", dim())),
    ];
    let height = lines.len() as u16 + 2;
    let width = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16 + 6;
    let rows = centered_rows(area, height);
    let boxed = Rect {
        x: rows.x + rows.width.saturating_sub(width) / 2,
        width: width.min(rows.width),
        ..rows
    };
    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .alignment(Alignment::Center)
        .render(boxed, buf);
}

/// A full-width band of `height` rows in the vertical middle of `area`.
pub fn centered_rows(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    Rect {
        y: area.y + (area.height - height) / 2,
        height,
        ..area
    }
}

/// Width in terminal cells, for centering text blocks.
pub fn text_width(text: &str) -> u16 {
    text.width() as u16
}
