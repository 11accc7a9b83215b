use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::graph::node::RenderCtx;

/*
Phase Accumulator
=================

Every waveform here is a function of a single normalized phase in [0, 1).
Each sample we emit `shape(phase)` and then advance:

    phase += frequency / sample_rate     (wrapped back into [0, 1))

All shapes start at zero and rise, so a freshly reset oscillator begins
without a jump:

    phase      0.0   0.25   0.5   0.75
    sine       0     1      0     -1
    triangle   0     1      0     -1     (straight segments)
    sawtooth   0     0.5    -1|   -0.5   (jumps at phase 0.5)
    square     1     1      -1    -1

No band-limiting is applied. At the pitches this keyboard covers (roughly
260-700 Hz) aliasing of the sawtooth stays well below the audible harmonics.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OscillatorWaveform {
    Sine,
    Sawtooth,
    Square,
    Triangle,
}

impl OscillatorWaveform {
    /// Value of the waveform at `phase` (expected in [0, 1)).
    #[inline]
    pub fn sample(self, phase: f32) -> f32 {
        match self {
            OscillatorWaveform::Sine => (TAU * phase).sin(),
            OscillatorWaveform::Sawtooth => 2.0 * (phase + 0.5).fract() - 1.0,
            OscillatorWaveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            OscillatorWaveform::Triangle => {
                let shifted = (phase + 0.25).fract();
                1.0 - 4.0 * (shifted - 0.5).abs()
            }
        }
    }
}

pub struct OscillatorBlock {
    waveform: OscillatorWaveform,
    phase: f32,
}

impl OscillatorBlock {
    pub fn new(waveform: OscillatorWaveform) -> Self {
        Self {
            waveform,
            phase: 0.0,
        }
    }

    pub fn sine() -> Self {
        Self::new(OscillatorWaveform::Sine)
    }

    pub fn sawtooth() -> Self {
        Self::new(OscillatorWaveform::Sawtooth)
    }

    pub fn square() -> Self {
        Self::new(OscillatorWaveform::Square)
    }

    pub fn triangle() -> Self {
        Self::new(OscillatorWaveform::Triangle)
    }

    pub fn waveform(&self) -> OscillatorWaveform {
        self.waveform
    }

    /// Restart the cycle at phase zero.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Fill `destination` with the waveform at `ctx.frequency`.
    pub fn render(&mut self, destination: &mut [f32], ctx: &RenderCtx) {
        let increment = ctx.frequency / ctx.sample_rate;
        for sample in destination.iter_mut() {
            *sample = self.waveform.sample(self.phase);
            self.phase = (self.phase + increment).fract();
        }
    }
}
