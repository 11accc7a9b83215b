//! Input surface: turns pointer and computer-key events into note
//! press/release calls and tracks which keys are shown as pressed.
//!
//! Ordering follows input arrival. A press always reaches the player before
//! the matching release, and auto-repeated key-downs while a key is held
//! never reach it at all.

use std::collections::{BTreeSet, HashSet};

use crate::{error::AudioError, keyboard::registry::note_for_key};

/// Receiver of note gestures (the sound engine, or a fake in tests).
pub trait NotePlayer {
    fn press(&mut self, note: &'static str) -> Result<(), AudioError>;
    fn release(&mut self, note: &'static str) -> Result<(), AudioError>;
}

#[derive(Debug, Default)]
pub struct KeyboardSurface {
    /// Notes drawn as pressed.
    pressed: BTreeSet<&'static str>,
    /// Computer keys currently held down.
    held: HashSet<char>,
    /// Note under a held pointer button.
    pointer: Option<&'static str>,
}

impl KeyboardSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `note` pressed and play it.
    ///
    /// The key shows as pressed even when the player fails, so the UI keeps
    /// responding without audio.
    pub fn press<P: NotePlayer>(
        &mut self,
        note: &'static str,
        player: &mut P,
    ) -> Result<(), AudioError> {
        self.pressed.insert(note);
        player.press(note)
    }

    /// Clear the pressed mark. Notes that were not pressed are ignored.
    pub fn release<P: NotePlayer>(
        &mut self,
        note: &'static str,
        player: &mut P,
    ) -> Result<(), AudioError> {
        if self.pressed.remove(note) {
            player.release(note)
        } else {
            Ok(())
        }
    }

    /// Computer key went down. `repeat` is the platform's auto-repeat flag;
    /// a second key-down without a key-up counts as a repeat too.
    ///
    /// Returns whether the key is bound to a note.
    pub fn key_down<P: NotePlayer>(
        &mut self,
        key: char,
        repeat: bool,
        player: &mut P,
    ) -> Result<bool, AudioError> {
        let key = key.to_ascii_lowercase();
        let Some(note) = note_for_key(key) else {
            return Ok(false);
        };

        if repeat || !self.held.insert(key) {
            return Ok(true);
        }
        self.press(note, player)?;
        Ok(true)
    }

    /// Computer key went up.
    pub fn key_up<P: NotePlayer>(&mut self, key: char, player: &mut P) -> Result<bool, AudioError> {
        let key = key.to_ascii_lowercase();
        let Some(note) = note_for_key(key) else {
            return Ok(false);
        };

        self.held.remove(&key);
        self.release(note, player)?;
        Ok(true)
    }

    /// Pointer pressed on a key.
    pub fn pointer_down<P: NotePlayer>(
        &mut self,
        note: &'static str,
        player: &mut P,
    ) -> Result<(), AudioError> {
        self.pointer = Some(note);
        self.press(note, player)
    }

    /// Pointer button released anywhere.
    pub fn pointer_up<P: NotePlayer>(&mut self, player: &mut P) -> Result<(), AudioError> {
        match self.pointer.take() {
            Some(note) => self.release(note, player),
            None => Ok(()),
        }
    }

    /// Pointer moved while held. Leaving the pressed key releases it;
    /// entering another key does not press it.
    pub fn pointer_moved<P: NotePlayer>(
        &mut self,
        over: Option<&'static str>,
        player: &mut P,
    ) -> Result<(), AudioError> {
        match self.pointer {
            Some(note) if over != Some(note) => {
                self.pointer = None;
                self.release(note, player)
            }
            _ => Ok(()),
        }
    }

    pub fn is_pressed(&self, note: &str) -> bool {
        self.pressed.contains(note)
    }

    pub fn pressed(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.pressed.iter().copied()
    }

    /// Forget every pressed key and held button without notifying anyone.
    pub fn clear(&mut self) {
        self.pressed.clear();
        self.held.clear();
        self.pointer = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Vec<(&'static str, &'static str)>,
    }

    impl NotePlayer for Recorder {
        fn press(&mut self, note: &'static str) -> Result<(), AudioError> {
            self.events.push(("press", note));
            Ok(())
        }

        fn release(&mut self, note: &'static str) -> Result<(), AudioError> {
            self.events.push(("release", note));
            Ok(())
        }
    }

    #[test]
    fn key_press_and_release() {
        let mut surface = KeyboardSurface::new();
        let mut player = Recorder::default();

        assert!(surface.key_down('a', false, &mut player).unwrap());
        assert!(surface.is_pressed("C4"));
        assert!(surface.key_up('a', &mut player).unwrap());
        assert!(!surface.is_pressed("C4"));

        assert_eq!(player.events, vec![("press", "C4"), ("release", "C4")]);
    }

    #[test]
    fn auto_repeat_is_suppressed() {
        let mut surface = KeyboardSurface::new();
        let mut player = Recorder::default();

        surface.key_down('a', false, &mut player).unwrap();
        surface.key_down('a', true, &mut player).unwrap();
        surface.key_down('a', false, &mut player).unwrap();

        assert_eq!(player.events, vec![("press", "C4")]);
    }

    #[test]
    fn shifted_key_shares_held_state() {
        let mut surface = KeyboardSurface::new();
        let mut player = Recorder::default();

        surface.key_down('a', false, &mut player).unwrap();
        surface.key_down('A', false, &mut player).unwrap();
        surface.key_up('A', &mut player).unwrap();

        assert_eq!(player.events, vec![("press", "C4"), ("release", "C4")]);
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let mut surface = KeyboardSurface::new();
        let mut player = Recorder::default();

        assert!(!surface.key_down('z', false, &mut player).unwrap());
        assert!(!surface.key_up('z', &mut player).unwrap());
        assert!(player.events.is_empty());
    }

    #[test]
    fn pointer_leaving_key_releases_it() {
        let mut surface = KeyboardSurface::new();
        let mut player = Recorder::default();

        surface.pointer_down("E4", &mut player).unwrap();
        surface.pointer_moved(Some("E4"), &mut player).unwrap();
        surface.pointer_moved(Some("F4"), &mut player).unwrap();
        surface.pointer_up(&mut player).unwrap();

        assert_eq!(player.events, vec![("press", "E4"), ("release", "E4")]);
        assert_eq!(surface.pressed().count(), 0);
    }

    #[test]
    fn failed_press_still_shows_key() {
        struct Deaf;
        impl NotePlayer for Deaf {
            fn press(&mut self, _: &'static str) -> Result<(), AudioError> {
                Err(AudioError::unavailable("no device"))
            }
            fn release(&mut self, _: &'static str) -> Result<(), AudioError> {
                Ok(())
            }
        }

        let mut surface = KeyboardSurface::new();
        let err = surface.key_down('h', false, &mut Deaf).unwrap_err();
        assert!(err.is_unavailable());
        assert!(surface.is_pressed("A4"));
    }
}
