use crate::{
    graph::node::{GraphNode, RenderCtx},
    instrument::Instrument,
    keyboard::note::Note,
};

/// Seconds a voice lives after it starts, whatever its envelope is doing.
pub const VOICE_LIFETIME: f32 = 2.0;

/// Identifier the engine hands out for each played note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VoiceId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Sounding,  // Attack/decay running toward the end of its lifetime
    Releasing, // Stopped early, fading out
    Finished,  // Silent, ready to be dropped by the mixer
}

/// One independent sound for one key press.
///
/// Voices are never reused: the mixer creates one per `Play` and drops it
/// once it reports `Finished`.
pub struct Voice {
    id: VoiceId,
    note: Option<Note>,
    instrument: Instrument,
    ctx: RenderCtx,
    state: VoiceState,
    elapsed_samples: u64,
    lifetime_samples: u64,
    graph: Box<dyn GraphNode>,
}

impl Voice {
    pub fn start(
        id: VoiceId,
        note: Option<Note>,
        frequency: f32,
        instrument: Instrument,
        volume: f32,
        sample_rate: f32,
    ) -> Self {
        let ctx = RenderCtx::from_freq(sample_rate, frequency, volume);
        let mut graph = instrument.build();
        graph.note_on(&ctx);

        Self {
            id,
            note,
            instrument,
            ctx,
            state: VoiceState::Sounding,
            elapsed_samples: 0,
            lifetime_samples: (VOICE_LIFETIME * sample_rate).round() as u64,
            graph,
        }
    }

    /// Begin the early fade-out. No-op unless the voice is still sounding.
    pub fn release(&mut self) {
        if self.state == VoiceState::Sounding {
            self.state = VoiceState::Releasing;
            self.graph.note_off(&self.ctx);
        }
    }

    /// Overwrite `out` with this voice's next samples.
    pub fn render(&mut self, out: &mut [f32]) {
        if self.state == VoiceState::Finished {
            out.fill(0.0);
            return;
        }

        let remaining = self.lifetime_samples.saturating_sub(self.elapsed_samples);
        let frames = out.len().min(remaining as usize);
        let (live, past_end) = out.split_at_mut(frames);

        self.graph.render_block(live, &self.ctx);
        past_end.fill(0.0);
        self.elapsed_samples += frames as u64;

        if self.elapsed_samples >= self.lifetime_samples || !self.graph.is_active() {
            self.state = VoiceState::Finished;
        }
    }

    pub fn id(&self) -> VoiceId {
        self.id
    }

    pub fn note(&self) -> Option<Note> {
        self.note
    }

    pub fn instrument(&self) -> Instrument {
        self.instrument
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == VoiceState::Finished
    }

    /// Seconds since the voice started.
    pub fn elapsed(&self) -> f32 {
        self.elapsed_samples as f32 / self.ctx.sample_rate
    }

    pub fn envelope_level(&self) -> Option<f32> {
        self.graph.get_envelope_level()
    }
}
