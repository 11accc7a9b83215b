//! soundy - playable on-screen keyboard in the terminal
//!
//! Run with: cargo run -- --instrument synth

mod app;
mod hold;
mod ui;

use std::{fs::File, io::stdout, path::PathBuf, sync::Mutex};

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use crossterm::{
    event::{
        DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::supports_keyboard_enhancement,
};

use app::App;
use soundy_keys::{
    audio::CpalBackend,
    synth::{ReleaseMode, Settings},
    Instrument, SoundEngine,
};

#[derive(Parser)]
#[command(name = "soundy")]
#[command(
    author,
    version,
    about = "C4 to F5 keyboard (an octave and a half) you can play from the home row"
)]
struct Args {
    /// Initial volume, 0.0 to 1.0
    #[arg(long, short = 'v', default_value = "0.5")]
    volume: f32,

    /// Initial instrument (piano or synth)
    #[arg(long, short = 'i', default_value = "piano")]
    instrument: Instrument,

    /// What releasing a key does (ring or stop)
    #[arg(long, short = 'r', default_value = "ring")]
    release_mode: ReleaseMode,

    /// Write logs here; the terminal is busy drawing the keyboard
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }

    let settings = Settings::new()
        .volume(args.volume.clamp(0.0, 1.0))
        .instrument(args.instrument)
        .release_mode(args.release_mode);
    let engine = SoundEngine::new(CpalBackend::new(), settings);

    // Key-up events need the kitty protocol; without it the app fakes them.
    let enhanced = supports_keyboard_enhancement().unwrap_or(false);

    let mut terminal = ratatui::init();
    with_restore(
        || {
            execute!(stdout(), EnableMouseCapture, EnableFocusChange)?;
            if enhanced {
                execute!(
                    stdout(),
                    PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
                )?;
            }
            App::new(engine, enhanced).run(&mut terminal)
        },
        || {
            if enhanced {
                let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
            }
            let _ = execute!(stdout(), DisableFocusChange, DisableMouseCapture);
            ratatui::restore();
        },
    )
}

/// Run `body`, then `restore`, whether `body` succeeded or not.
fn with_restore<T>(
    body: impl FnOnce() -> EyreResult<T>,
    restore: impl FnOnce(),
) -> EyreResult<T> {
    let result = body();
    restore();
    result
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use color_eyre::eyre::eyre;

    use super::*;

    #[test]
    fn restore_runs_after_failed_setup() {
        let restored = Cell::new(false);
        let result: EyreResult<()> = with_restore(
            || Err(eyre!("terminal refused mouse capture")),
            || restored.set(true),
        );
        assert!(result.is_err());
        assert!(restored.get());
    }

    #[test]
    fn restore_runs_after_clean_exit() {
        let restored = Cell::new(false);
        let value = with_restore(|| Ok(7), || restored.set(true)).unwrap();
        assert_eq!(value, 7);
        assert!(restored.get());
    }

    #[test]
    fn about_text_matches_keyboard_range() {
        use clap::CommandFactory;
        use soundy_keys::keyboard::NOTES;

        let command = Args::command();
        let about = command.get_about().map(|a| a.to_string()).unwrap_or_default();
        assert!(about.contains(NOTES[0]));
        assert!(about.contains(NOTES[NOTES.len() - 1]));
    }
}
