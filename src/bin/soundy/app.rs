//! Application state and the input loop.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{layout::Rect, DefaultTerminal};
use rtrb::Consumer;
use tracing::{debug, warn};

use soundy_keys::{
    audio::CpalBackend,
    keyboard::{note_for_key, KeyLayout, KeyboardSurface},
    AudioError, SoundEngine,
};

use crate::{hold::SyntheticKeyUps, ui};

/// Samples kept for the oscilloscope
pub const SCOPE_SIZE: usize = 1024;

/// Terminal cells per white key
pub const WHITE_KEY_CELLS: u16 = 6;

const VOLUME_STEP: f32 = 0.05;

pub struct App {
    pub engine: SoundEngine<CpalBackend>,
    pub surface: KeyboardSurface,
    pub layout: KeyLayout,
    /// Where the keyboard was last drawn, for mouse hit testing
    pub keyboard_area: Rect,
    pub scope: Vec<f32>,
    pub status: Option<String>,
    scope_rx: Option<Consumer<f32>>,
    /// Whether the terminal reports key releases
    enhanced: bool,
    /// Keys waiting for a synthetic key-up
    pending_up: SyntheticKeyUps,
    should_quit: bool,
}

impl App {
    pub fn new(engine: SoundEngine<CpalBackend>, enhanced: bool) -> Self {
        let status = if engine.audio_available() {
            None
        } else {
            Some("no audio output found; keys will light up silently".to_string())
        };

        Self {
            engine,
            surface: KeyboardSurface::new(),
            layout: KeyLayout::new(WHITE_KEY_CELLS, ui::KEYBOARD_HEIGHT, ui::BLACK_KEY_HEIGHT),
            keyboard_area: Rect::default(),
            scope: vec![0.0; SCOPE_SIZE],
            status,
            scope_rx: None,
            enhanced,
            pending_up: SyntheticKeyUps::new(),
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_scope();
            self.expire_synthetic_keys();

            terminal.draw(|frame| ui::render(frame, self))?;

            // ~60fps
            if event::poll(Duration::from_millis(16))? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    Event::FocusLost => self.release_everything(),
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Pull rendered samples, keeping the last SCOPE_SIZE.
    fn poll_scope(&mut self) {
        if self.scope_rx.is_none() {
            self.scope_rx = self.engine.context_mut().and_then(|ctx| ctx.take_scope());
        }
        let Some(rx) = self.scope_rx.as_mut() else {
            return;
        };

        let mut fresh = false;
        while let Ok(sample) = rx.pop() {
            self.scope.push(sample);
            fresh = true;
        }
        if fresh && self.scope.len() > SCOPE_SIZE {
            let excess = self.scope.len() - SCOPE_SIZE;
            self.scope.drain(0..excess);
        }
    }

    fn expire_synthetic_keys(&mut self) {
        for key in self.pending_up.expire(Instant::now()) {
            let result = self.surface.key_up(key, &mut self.engine).map(|_| ());
            self.report(result);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.should_quit = true;
            return;
        }

        match key.kind {
            KeyEventKind::Press => self.key_pressed(key.code, false),
            KeyEventKind::Repeat => self.key_pressed(key.code, true),
            KeyEventKind::Release => {
                if let KeyCode::Char(c) = key.code {
                    let result = self.surface.key_up(c, &mut self.engine).map(|_| ());
                    self.report(result);
                }
            }
        }
    }

    fn key_pressed(&mut self, code: KeyCode, repeat: bool) {
        match code {
            KeyCode::Up => self.nudge_volume(VOLUME_STEP),
            KeyCode::Down => self.nudge_volume(-VOLUME_STEP),
            KeyCode::Tab if !repeat => {
                let instrument = self.engine.settings().instrument.next();
                self.engine.set_instrument(instrument);
                debug!(%instrument, "instrument changed");
            }
            KeyCode::Char(' ') if !repeat => {
                let result = self.engine.stop_all();
                self.report(result);
            }
            KeyCode::Char('r') if !repeat => {
                let mode = self.engine.settings().release_mode.next();
                self.engine.set_release_mode(mode);
                debug!(%mode, "release mode changed");
            }
            KeyCode::Char(c) => self.note_key(c, repeat),
            _ => {}
        }
    }

    fn note_key(&mut self, c: char, repeat: bool) {
        let now = Instant::now();
        // Terminals without key-up reports send repeats as fresh presses.
        let repeat = if self.enhanced || note_for_key(c).is_none() {
            repeat
        } else {
            self.expire_synthetic_keys();
            self.pending_up.pressed(c, now) || repeat
        };

        let result = self.surface.key_down(c, repeat, &mut self.engine).map(|_| ());
        self.report(result);
    }

    fn nudge_volume(&mut self, delta: f32) {
        let volume = (self.engine.settings().volume + delta).clamp(0.0, 1.0);
        self.engine.set_volume(volume);
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let over = self.note_at(mouse.column, mouse.row);
        let result = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => match over {
                Some(note) => self.surface.pointer_down(note, &mut self.engine),
                None => Ok(()),
            },
            MouseEventKind::Drag(MouseButton::Left) => {
                self.surface.pointer_moved(over, &mut self.engine)
            }
            MouseEventKind::Up(MouseButton::Left) => self.surface.pointer_up(&mut self.engine),
            _ => Ok(()),
        };
        self.report(result);
    }

    fn note_at(&self, column: u16, row: u16) -> Option<&'static str> {
        let area = self.keyboard_area;
        if column < area.x || row < area.y || column >= area.right() || row >= area.bottom() {
            return None;
        }
        self.layout.hit_test(column - area.x, row - area.y)
    }

    /// Lost focus: nothing will report the key-ups, so let go of everything.
    fn release_everything(&mut self) {
        let held: Vec<_> = self.surface.pressed().collect();
        for note in held {
            let result = self.surface.release(note, &mut self.engine);
            self.report(result);
        }
        self.surface.clear();
        self.pending_up.clear();
    }

    /// Audio failures become a status line; the keyboard keeps working.
    fn report(&mut self, result: Result<(), AudioError>) {
        if let Err(err) = result {
            warn!("{err}");
            self.status = Some(err.to_string());
        }
    }
}
