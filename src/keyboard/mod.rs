//! The playable keyboard: which notes exist, which computer keys play them,
//! where each key sits on screen, and how input turns into note events.
//!
//! # Example
//!
//! ```
//! use soundy_keys::keyboard::{note_for_key, is_black_key, frequency_of};
//!
//! let note = note_for_key('a').unwrap();
//! assert_eq!(note, "C4");
//! assert!(!is_black_key(note));
//! assert!((frequency_of(note) - 261.63).abs() < 0.01);
//! ```

pub mod layout;
pub mod note;
pub mod registry;
pub mod surface;

pub use layout::{KeyLayout, KeyRect};
pub use note::{frequency_of, Note, NoteParseError, PitchClass, REFERENCE_FREQUENCY};
pub use registry::{
    black_key_offset, is_black_key, key_for_note, note_for_key, KEY_BINDINGS, NOTES,
    WHITE_KEY_WIDTH,
};
pub use surface::{KeyboardSurface, NotePlayer};
