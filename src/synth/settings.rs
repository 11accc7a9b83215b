use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::instrument::Instrument;

/// What releasing a key does to the sound it started.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReleaseMode {
    /// Let the note decay on its own.
    #[default]
    Ring,
    /// Fade the note's voices out when the key comes up.
    Stop,
}

impl ReleaseMode {
    pub fn name(self) -> &'static str {
        match self {
            ReleaseMode::Ring => "ring",
            ReleaseMode::Stop => "stop",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ReleaseMode::Ring => ReleaseMode::Stop,
            ReleaseMode::Stop => ReleaseMode::Ring,
        }
    }
}

impl fmt::Display for ReleaseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown release mode {0:?} (expected ring or stop)")]
pub struct UnknownReleaseMode(pub String);

impl FromStr for ReleaseMode {
    type Err = UnknownReleaseMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ring" => Ok(ReleaseMode::Ring),
            "stop" => Ok(ReleaseMode::Stop),
            _ => Err(UnknownReleaseMode(s.to_string())),
        }
    }
}

/// Player-facing controls. Changes apply to the next note played;
/// voices already sounding keep the values they started with.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    /// Peak amplitude, expected in [0, 1]. Not clamped here.
    pub volume: f32,
    pub instrument: Instrument,
    pub release_mode: ReleaseMode,
}

impl Settings {
    pub fn new() -> Self {
        Self {
            volume: 0.5,
            instrument: Instrument::Piano,
            release_mode: ReleaseMode::Ring,
        }
    }

    pub fn volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    pub fn instrument(mut self, instrument: Instrument) -> Self {
        self.instrument = instrument;
        self
    }

    pub fn release_mode(mut self, release_mode: ReleaseMode) -> Self {
        self.release_mode = release_mode;
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}
