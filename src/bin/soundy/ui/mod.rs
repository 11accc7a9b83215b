//! Screen layout: header, keyboard, oscilloscope, help line.

mod header;
mod keyboard;
mod waveform;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

use header::render_header;
use keyboard::KeyboardWidget;
use waveform::render_waveform;

/// Rows of the keyboard, white keys included
pub const KEYBOARD_HEIGHT: u16 = 9;
/// Rows the black keys reach down
pub const BLACK_KEY_HEIGHT: u16 = 5;

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                   // Header
            Constraint::Length(KEYBOARD_HEIGHT + 2), // Keyboard
            Constraint::Min(6),                      // Waveform
            Constraint::Length(1),                   // Status / help
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);

    let block = Block::default().title(" Keys ").borders(Borders::ALL);
    let inner = block.inner(chunks[1]);
    frame.render_widget(block, chunks[1]);

    app.keyboard_area = centered(inner, app.layout.total_width());
    frame.render_widget(
        KeyboardWidget::new(&app.layout, &app.surface),
        app.keyboard_area,
    );

    render_waveform(frame, chunks[2], &app.scope);

    let (text, color) = match &app.status {
        Some(status) => (format!(" {status}"), Color::Red),
        None => (
            " [a-'] Play  [Tab] Instrument  [↑↓] Volume  [R] Release  [Space] Stop  [Esc] Quit"
                .to_string(),
            Color::DarkGray,
        ),
    };
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(color)),
        chunks[3],
    );
}

fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}
