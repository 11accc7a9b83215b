use crate::{
    dsp::envelope::PercussiveEnvelope,
    graph::node::{GraphNode, RenderCtx},
};

/// Graph node producing the percussive envelope as a control signal.
pub struct EnvNode {
    env: PercussiveEnvelope,
}

impl EnvNode {
    /// Linear attack over `attack` seconds, exponential decay reaching
    /// `floor` at `decay_end` seconds after note-on.
    pub fn percussive(attack: f32, decay_end: f32, floor: f32) -> Self {
        Self {
            env: PercussiveEnvelope::new(attack, decay_end, floor),
        }
    }

    /// Fade time used when the voice is stopped early.
    pub fn with_release(mut self, release: f32) -> Self {
        self.env = self.env.with_release(release);
        self
    }
}

impl GraphNode for EnvNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.env.render(out, ctx);
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.env.note_on(ctx);
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        self.env.note_off(ctx);
    }

    fn get_envelope_level(&self) -> Option<f32> {
        Some(self.env.level())
    }

    fn is_active(&self) -> bool {
        self.env.is_active()
    }
}
