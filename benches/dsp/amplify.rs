//! Benchmarks for the envelope-controlled amplifier node.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use soundy_keys::graph::{
    envelope::EnvNode,
    extensions::NodeExt,
    node::{GraphNode, RenderCtx},
    oscillator::OscNode,
};

use crate::BLOCK_SIZES;

pub fn bench_amplify(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/amplify");
    let ctx = RenderCtx::from_freq(48_000.0, 440.0, 0.5);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Oscillator times envelope, two renders plus a multiply
        let mut node = OscNode::sine().amplify(EnvNode::percussive(0.02, 1.5, 0.001));
        node.note_on(&ctx);
        group.bench_with_input(BenchmarkId::new("osc_x_env", size), &size, |b, _| {
            b.iter(|| {
                node.render_block(black_box(&mut buffer), black_box(&ctx));
            })
        });
    }

    group.finish();
}
