//! Fixed note range (C4-F5), computer-key bindings, and black-key placement.

/// Every playable note, lowest to highest.
pub const NOTES: [&str; 18] = [
    "C4", "C#4", "D4", "D#4", "E4", "F4", "F#4", "G4", "G#4", "A4", "A#4", "B4", "C5", "C#5",
    "D5", "D#5", "E5", "F5",
];

/// Computer key → note. Home row plays white keys, the row above plays
/// black keys, laid out like a piano.
pub const KEY_BINDINGS: [(char, &str); 18] = [
    ('a', "C4"),
    ('w', "C#4"),
    ('s', "D4"),
    ('e', "D#4"),
    ('d', "E4"),
    ('f', "F4"),
    ('t', "F#4"),
    ('g', "G4"),
    ('y', "G#4"),
    ('h', "A4"),
    ('u', "A#4"),
    ('j', "B4"),
    ('k', "C5"),
    ('o', "C#5"),
    ('l', "D5"),
    ('p', "D#5"),
    (';', "E5"),
    ('\'', "F5"),
];

/// On-screen width of one white key, in pixels.
pub const WHITE_KEY_WIDTH: f32 = 60.0;

// Left edge of each black key, in white-key widths from the start of the
// white row. Hand-tuned for C4-F5 only: extending NOTES means extending
// this table (the tests fail otherwise).
const BLACK_KEY_OFFSETS: [(&str, f32); 7] = [
    ("C#4", 0.75),
    ("D#4", 1.75),
    ("F#4", 3.75),
    ("G#4", 4.75),
    ("A#4", 5.75),
    ("C#5", 7.75),
    ("D#5", 8.75),
];

/// True when the token names a sharp.
pub fn is_black_key(note: &str) -> bool {
    note.contains('#')
}

/// Note played by a computer key. Letters are matched case-insensitively.
pub fn note_for_key(key: char) -> Option<&'static str> {
    let key = key.to_ascii_lowercase();
    KEY_BINDINGS
        .iter()
        .find(|(bound, _)| *bound == key)
        .map(|(_, note)| *note)
}

/// Computer key bound to a note.
pub fn key_for_note(note: &str) -> Option<char> {
    KEY_BINDINGS
        .iter()
        .find(|(_, bound)| *bound == note)
        .map(|(key, _)| *key)
}

/// Horizontal pixel offset of the black key at `index` in [`NOTES`].
///
/// White keys and indices outside the range return 0.
pub fn black_key_offset(index: usize) -> f32 {
    let Some(note) = NOTES.get(index) else {
        return 0.0;
    };
    BLACK_KEY_OFFSETS
        .iter()
        .find(|(black, _)| black == note)
        .map_or(0.0, |(_, widths)| widths * WHITE_KEY_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notes_are_unique_and_ascending() {
        use crate::keyboard::note::Note;

        let indices: Vec<i32> = NOTES
            .iter()
            .map(|n| n.parse::<Note>().unwrap().key_index())
            .collect();
        assert!(indices.windows(2).all(|w| w[1] == w[0] + 1));
    }

    #[test]
    fn seven_black_keys() {
        let black: Vec<_> = NOTES.iter().filter(|n| is_black_key(n)).collect();
        assert_eq!(black.len(), 7);
        for note in NOTES {
            assert_eq!(is_black_key(note), note.contains('#'));
        }
    }

    #[test]
    fn bindings_match_lookup_table() {
        for (key, note) in KEY_BINDINGS {
            assert_eq!(note_for_key(key), Some(note));
            assert_eq!(key_for_note(note), Some(key));
        }
    }

    #[test]
    fn bindings_round_trip() {
        for (key, _) in KEY_BINDINGS {
            let note = note_for_key(key).unwrap();
            let back = key_for_note(note).unwrap();
            assert_eq!(note_for_key(back), Some(note));
        }
    }

    #[test]
    fn every_note_is_bound_once() {
        for note in NOTES {
            let count = KEY_BINDINGS.iter().filter(|(_, n)| *n == note).count();
            assert_eq!(count, 1, "{note} bound {count} times");
        }
    }

    #[test]
    fn uppercase_letters_play_too() {
        assert_eq!(note_for_key('A'), Some("C4"));
        assert_eq!(note_for_key('z'), None);
        assert_eq!(note_for_key('1'), None);
    }

    #[test]
    fn offset_table_covers_every_black_key() {
        for (index, note) in NOTES.iter().enumerate() {
            let offset = black_key_offset(index);
            if is_black_key(note) {
                assert!(offset > 0.0, "{note} has no offset; extend BLACK_KEY_OFFSETS");
            } else {
                assert_eq!(offset, 0.0);
            }
        }
    }

    #[test]
    fn black_keys_straddle_white_key_boundaries() {
        // C#4 sits 3/4 across C4.
        assert_eq!(black_key_offset(1), 45.0);
        // D#5 sits 3/4 across D5, the tenth white key.
        assert_eq!(black_key_offset(15), 525.0);
        assert_eq!(black_key_offset(99), 0.0);
    }
}
