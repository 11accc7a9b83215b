use crate::{
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/// Scales `signal` sample-by-sample with `control` (a VCA).
///
/// The control side decides the lifetime: an oscillator never stops on its
/// own, so the node is active exactly as long as its envelope is.
pub struct Amplify<N, C> {
    pub signal: N,
    pub control: C,
    gain: Vec<f32>,
}

impl<N, C> Amplify<N, C> {
    pub fn new(signal: N, control: C) -> Self {
        Self {
            signal,
            control,
            gain: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<N: GraphNode, C: GraphNode> GraphNode for Amplify<N, C> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            let gain = &mut self.gain[..chunk.len()];
            self.signal.render_block(chunk, ctx);
            self.control.render_block(gain, ctx);

            for (sample, g) in chunk.iter_mut().zip(gain.iter()) {
                *sample *= *g;
            }
        }
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.signal.note_on(ctx);
        self.control.note_on(ctx);
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        self.signal.note_off(ctx);
        self.control.note_off(ctx);
    }

    fn get_envelope_level(&self) -> Option<f32> {
        self.control
            .get_envelope_level()
            .or_else(|| self.signal.get_envelope_level())
    }

    fn is_active(&self) -> bool {
        self.control.is_active()
    }
}
