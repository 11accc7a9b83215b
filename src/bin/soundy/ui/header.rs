//! Header bar - instrument, volume, release mode, and output stats

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use soundy_keys::audio::AudioContext;

use crate::app::App;

const GAUGE_CELLS: usize = 10;

/// Peak and RMS of the recent output
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

fn gauge(volume: f32) -> String {
    let filled = (volume.clamp(0.0, 1.0) * GAUGE_CELLS as f32).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(GAUGE_CELLS - filled))
}

pub fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().title(" soundy ").borders(Borders::ALL);
    let settings = app.engine.settings();
    let stats = AudioStats::from_buffer(&app.scope);

    let output = match app.engine.context() {
        Some(ctx) => Span::styled(
            format!("{:.1}kHz  ", ctx.sample_rate() / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
        None if app.engine.audio_available() => {
            Span::styled("press a key  ", Style::default().fg(Color::Yellow))
        }
        None => Span::styled("no output  ", Style::default().fg(Color::Red)),
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {}  ", settings.instrument),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("Vol {} {:>3.0}%  ", gauge(settings.volume), settings.volume * 100.0),
            Style::default().fg(Color::Green),
        ),
        Span::styled(
            format!("Release: {}  ", settings.release_mode),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("Voices: {}  ", app.engine.active_voices()),
            Style::default().fg(Color::White),
        ),
        output,
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", stats.peak, stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gauge_fills_with_volume() {
        assert_eq!(gauge(0.0), "░".repeat(GAUGE_CELLS));
        assert_eq!(gauge(0.5), format!("{}{}", "█".repeat(5), "░".repeat(5)));
        assert_eq!(gauge(1.5), "█".repeat(GAUGE_CELLS));
    }

    #[test]
    fn stats_of_silence() {
        let stats = AudioStats::from_buffer(&[0.0; 16]);
        assert_eq!(stats.peak, 0.0);
        assert_eq!(stats.rms, 0.0);
    }
}
