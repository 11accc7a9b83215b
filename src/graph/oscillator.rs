use crate::dsp::oscillator::{OscillatorBlock, OscillatorWaveform};
use crate::graph::node::{GraphNode, RenderCtx};

/*
Audio Oscillator
================

The oscillator is the raw sound source of a voice. Its waveform decides the
timbre; the envelope that follows it decides the loudness over time.

Triangle: mellow and soft, weak odd harmonics (falling off as 1/n²).
  - Used by the piano instrument: a gentle, rounded tone.

Sawtooth: the richest waveform, every harmonic present (falling off as 1/n).
  - Used by the synth instrument: bright and buzzy.

Sine and square are available for experiments but no stock instrument
uses them.

The oscillator follows `ctx.frequency`, so one node plays whatever note
the voice was started with. note_on() restarts the cycle at phase zero,
which keeps repeated presses of the same key sounding identical.

Example usage:
  let voice = OscNode::triangle()
      .amplify(EnvNode::percussive(0.02, 1.5, 0.001));
*/

pub struct OscNode {
    osc: OscillatorBlock,
}

impl OscNode {
    pub fn new(waveform: OscillatorWaveform) -> Self {
        Self {
            osc: OscillatorBlock::new(waveform),
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
        self.osc.waveform()
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.osc.render(out, ctx);
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        self.osc.reset();
    }
}
