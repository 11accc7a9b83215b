use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{dsp::oscillator::OscillatorWaveform, graph::GraphNode, voices};

/// Selectable timbre.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Instrument {
    /// Triangle wave, long decay.
    #[default]
    Piano,
    /// Sawtooth wave, short decay.
    Synth,
}

impl Instrument {
    pub const ALL: [Instrument; 2] = [Instrument::Piano, Instrument::Synth];

    pub fn waveform(self) -> OscillatorWaveform {
        match self {
            Instrument::Piano => OscillatorWaveform::Triangle,
            Instrument::Synth => OscillatorWaveform::Sawtooth,
        }
    }

    /// Seconds after note-on at which the decay reaches near-silence.
    pub fn decay_end(self) -> f32 {
        match self {
            Instrument::Piano => 1.5,
            Instrument::Synth => 1.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Instrument::Piano => "piano",
            Instrument::Synth => "synth",
        }
    }

    /// The other instrument (for a toggle control).
    pub fn next(self) -> Self {
        match self {
            Instrument::Piano => Instrument::Synth,
            Instrument::Synth => Instrument::Piano,
        }
    }

    /// Build a fresh voice graph for this timbre.
    pub fn build(self) -> Box<dyn GraphNode> {
        match self {
            Instrument::Piano => Box::new(voices::piano()),
            Instrument::Synth => Box::new(voices::synth()),
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown instrument {0:?} (expected piano or synth)")]
pub struct UnknownInstrument(pub String);

impl FromStr for Instrument {
    type Err = UnknownInstrument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Instrument::ALL
            .into_iter()
            .find(|i| i.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownInstrument(s.to_string()))
    }
}
