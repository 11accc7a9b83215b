//! Key rectangles in an arbitrary unit (terminal cells, pixels, ...).
//!
//! White keys sit side by side. Black keys are placed with
//! [`black_key_offset`], rescaled from pixels to the requested white key
//! width, and drawn on top of the white row.

use crate::keyboard::registry::{black_key_offset, is_black_key, NOTES, WHITE_KEY_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRect {
    pub note: &'static str,
    /// Position in [`NOTES`].
    pub index: usize,
    pub x: u16,
    pub width: u16,
    pub height: u16,
    pub black: bool,
}

impl KeyRect {
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.x.saturating_add(self.width) && y < self.height
    }
}

pub struct KeyLayout {
    white: Vec<KeyRect>,
    black: Vec<KeyRect>,
    white_width: u16,
}

impl KeyLayout {
    /// Lay out the keyboard with `white_width` units per white key.
    /// Black keys are half as wide and `black_height` tall.
    pub fn new(white_width: u16, height: u16, black_height: u16) -> Self {
        let white_width = white_width.max(2);
        let scale = white_width as f32 / WHITE_KEY_WIDTH;
        let black_width = (white_width / 2).max(1);

        let mut white = Vec::new();
        let mut black = Vec::new();
        for (index, note) in NOTES.iter().copied().enumerate() {
            if is_black_key(note) {
                black.push(KeyRect {
                    note,
                    index,
                    // `as` saturates at u16::MAX for oversized layouts
                    x: (black_key_offset(index) * scale).round() as u16,
                    width: black_width,
                    height: black_height.min(height),
                    black: true,
                });
            } else {
                white.push(KeyRect {
                    note,
                    index,
                    x: (white.len() as u16).saturating_mul(white_width),
                    width: white_width,
                    height,
                    black: false,
                });
            }
        }

        Self {
            white,
            black,
            white_width,
        }
    }

    pub fn white_keys(&self) -> &[KeyRect] {
        &self.white
    }

    pub fn black_keys(&self) -> &[KeyRect] {
        &self.black
    }

    pub fn white_width(&self) -> u16 {
        self.white_width
    }

    /// Width of the whole keyboard.
    pub fn total_width(&self) -> u16 {
        (self.white.len() as u16).saturating_mul(self.white_width)
    }

    /// Note under a point relative to the keyboard's top-left corner.
    /// Black keys are on top, so they win where they overlap white keys.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<&'static str> {
        self.black
            .iter()
            .chain(self.white.iter())
            .find(|key| key.contains(x, y))
            .map(|key| key.note)
    }
}
