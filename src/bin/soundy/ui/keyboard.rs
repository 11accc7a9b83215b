//! Piano keyboard widget
//!
//! ```text
//!  ┌──┬─┬─┬─┬──┬──┬─┬─┬─┬─┬─┬──┬─
//!  │  │█│ │█│  │  │█│ │█│ │█│  │
//!  │  └┬┘ └┬┘  │  └┬┘ └┬┘ └┬┘  │     black keys drawn over the white row,
//!  │ a │ s │ d │ f │ g │ h │ j │     labels on the bottom rows
//!  │C4 │D4 │E4 │F4 │G4 │A4 │B4 │
//! ```
//!
//! Cells are painted straight into the buffer: white keys first, then the
//! black keys on top, so overlap resolves the same way as hit testing.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use soundy_keys::keyboard::{key_for_note, KeyLayout, KeyRect, KeyboardSurface};

const WHITE: Color = Color::Rgb(235, 235, 230);
const BLACK: Color = Color::Rgb(30, 30, 30);
const PRESSED: Color = Color::Rgb(90, 170, 250);
const EDGE: Color = Color::Rgb(120, 120, 120);

pub struct KeyboardWidget<'a> {
    layout: &'a KeyLayout,
    surface: &'a KeyboardSurface,
}

impl<'a> KeyboardWidget<'a> {
    pub fn new(layout: &'a KeyLayout, surface: &'a KeyboardSurface) -> Self {
        Self { layout, surface }
    }

    fn paint_key(&self, key: &KeyRect, area: Rect, buf: &mut Buffer) {
        let pressed = self.surface.is_pressed(key.note);
        let (bg, fg) = match (key.black, pressed) {
            (_, true) => (PRESSED, BLACK),
            (true, false) => (BLACK, WHITE),
            (false, false) => (WHITE, BLACK),
        };

        for dy in 0..key.height.min(area.height) {
            for dx in 0..key.width {
                let x = area.x + key.x + dx;
                if x >= area.right() {
                    break;
                }
                if let Some(cell) = buf.cell_mut((x, area.y + dy)) {
                    cell.reset();
                    // Left edge of a white key separates it from its neighbour
                    if !key.black && dx == 0 {
                        cell.set_symbol("▏").set_fg(EDGE).set_bg(bg);
                    } else {
                        cell.set_symbol(" ").set_bg(bg);
                    }
                }
            }
        }

        // Bound key on the second-to-last row, note name on the last
        let bottom = key.height.min(area.height);
        let label_x = area.x + key.x + 1;
        let style = Style::default().fg(fg).bg(bg);
        if bottom >= 2 {
            if let Some(binding) = key_for_note(key.note) {
                buf.set_stringn(
                    label_x,
                    area.y + bottom - 2,
                    binding.to_string(),
                    key.width.saturating_sub(1) as usize,
                    style.add_modifier(Modifier::BOLD),
                );
            }
        }
        if bottom >= 1 && !key.black {
            buf.set_stringn(
                label_x,
                area.y + bottom - 1,
                key.note,
                key.width.saturating_sub(1) as usize,
                style,
            );
        }
    }
}

impl Widget for KeyboardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for key in self.layout.white_keys() {
            self.paint_key(key, area, buf);
        }
        for key in self.layout.black_keys() {
            self.paint_key(key, area, buf);
        }
    }
}
