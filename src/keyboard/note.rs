use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/*
Note Tokens and Equal Temperament
=================================

A note token is a pitch class followed by a single octave digit:

    "C4"   "C#4"   "A4"   "F5"

Key index
---------

Each note maps to a linear key index, counting semitones from C in
octave -1:

    n = 12 * (octave + 1) + pitch_class_index

    pitch_class_index:  C=0 C#=1 D=2 D#=3 E=4 F=5 F#=6 G=7 G#=8 A=9 A#=10 B=11

This is the MIDI note number: C4 = 60, A4 = 69.

Frequency
---------

Equal temperament puts every semitone at the same ratio, 2^(1/12), so the
frequency is an exponential of the distance from the reference pitch:

    f = 440 * 2^((n - 69) / 12)

    A4 (n = 69)  →  440.00 Hz   (reference, exact)
    C4 (n = 60)  →  261.63 Hz
    C5 (n = 72)  →  523.25 Hz

Tokens that do not parse fall back to the reference pitch instead of
failing, so a typo in a layout never silences a key.
*/

/// Reference pitch A4 in Hz.
pub const REFERENCE_FREQUENCY: f32 = 440.0;
const REFERENCE_KEY_INDEX: i32 = 69;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PitchClass {
    C,
    Cs,
    D,
    Ds,
    E,
    F,
    Fs,
    G,
    Gs,
    A,
    As,
    B,
}

impl PitchClass {
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::Cs,
        PitchClass::D,
        PitchClass::Ds,
        PitchClass::E,
        PitchClass::F,
        PitchClass::Fs,
        PitchClass::G,
        PitchClass::Gs,
        PitchClass::A,
        PitchClass::As,
        PitchClass::B,
    ];

    /// Semitones above C.
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::Cs => "C#",
            PitchClass::D => "D",
            PitchClass::Ds => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::Fs => "F#",
            PitchClass::G => "G",
            PitchClass::Gs => "G#",
            PitchClass::A => "A",
            PitchClass::As => "A#",
            PitchClass::B => "B",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|pc| pc.name() == name)
    }

    pub fn is_sharp(self) -> bool {
        self.name().ends_with('#')
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoteParseError {
    #[error("note token is empty")]
    Empty,
    #[error("unknown pitch class {0:?}")]
    UnknownPitchClass(String),
    #[error("octave must be a single digit, got {0:?}")]
    InvalidOctave(String),
}

/// A parsed note: pitch class plus octave.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Note {
    pub pitch_class: PitchClass,
    pub octave: u8,
}

impl Note {
    pub fn new(pitch_class: PitchClass, octave: u8) -> Self {
        Self {
            pitch_class,
            octave,
        }
    }

    /// Linear semitone index (MIDI note number).
    pub fn key_index(self) -> i32 {
        12 * (self.octave as i32 + 1) + self.pitch_class.index() as i32
    }

    /// Equal-tempered frequency in Hz, A4 = 440.
    pub fn frequency(self) -> f32 {
        let semitones = self.key_index() - REFERENCE_KEY_INDEX;
        REFERENCE_FREQUENCY * 2.0_f32.powf(semitones as f32 / 12.0)
    }

    pub fn is_black_key(self) -> bool {
        self.pitch_class.is_sharp()
    }
}

impl FromStr for Note {
    type Err = NoteParseError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (split, last) = token.char_indices().last().ok_or(NoteParseError::Empty)?;
        let (name, octave) = token.split_at(split);

        let octave = last
            .to_digit(10)
            .ok_or_else(|| NoteParseError::InvalidOctave(octave.to_string()))?;
        let pitch_class = PitchClass::from_name(name)
            .ok_or_else(|| NoteParseError::UnknownPitchClass(name.to_string()))?;

        Ok(Note::new(pitch_class, octave as u8))
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch_class.name(), self.octave)
    }
}

/// Frequency of a note token, falling back to 440 Hz when it does not parse.
pub fn frequency_of(token: &str) -> f32 {
    token
        .parse::<Note>()
        .map(Note::frequency)
        .unwrap_or(REFERENCE_FREQUENCY)
}
