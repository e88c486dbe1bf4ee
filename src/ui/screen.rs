use itertools::Itertools;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{
    ui::{centered_rows, text_width, GameView},
    App, AppState,
};

const LOGO: &str = "C L I   R A C E R";

/// A UI Screen boundary: responsible for rendering one app state
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame);
}

/// Mode and option picker
pub struct MenuScreen;

impl Screen for MenuScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        let menu = &app.menu;
        let bold = Style::default().add_modifier(Modifier::BOLD);

        let mut lines = vec![
            Line::from(Span::styled(LOGO, bold.fg(Color::Magenta))),
            Line::from(Span::styled(
                format!("difficulty: {}", menu.difficulty),
                Style::default().add_modifier(Modifier::DIM),
            )),
            Line::default(),
            Line::from(Span::styled(menu.title(), bold.fg(Color::Cyan))),
            Line::default(),
        ];
        let items = menu
            .items()
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                if i == menu.selected {
                    Line::from(Span::styled(format!("> {item}"), bold.fg(Color::Cyan)))
                } else {
                    Line::from(Span::raw(format!("  {item}")))
                }
            })
            .collect_vec();
        lines.extend(items);
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "↑/↓ select · enter confirm · esc back",
            Style::default().add_modifier(Modifier::DIM),
        )));

        let widest = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
        let area = centered_rows(f.area(), lines.len() as u16);
        let width = widest.max(text_width(LOGO)).min(area.width);
        let area = Rect {
            x: area.x + (area.width - width) / 2,
            width,
            ..area
        };
        // left-aligned so the selection marker lines up
        let (header, body) = lines.split_at(5);
        let header_area = Rect { height: 5.min(area.height), ..area };
        let body_area = Rect {
            y: area.y + header_area.height,
            height: area.height - header_area.height,
            ..area
        };
        f.render_widget(
            Paragraph::new(header.to_vec()).alignment(Alignment::Center),
            header_area,
        );
        f.render_widget(Paragraph::new(body.to_vec()), body_area);
    }
}

/// Get-ready, typing, and results views of the active session
pub struct GameScreen;

impl Screen for GameScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        if let Some(game) = &app.game {
            f.render_widget(GameView { game }, f.area());
        }
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Menu => Box::new(MenuScreen),
        AppState::Game => Box::new(GameScreen),
    }
}
