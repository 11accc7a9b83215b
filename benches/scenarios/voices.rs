//! Benchmarks for instrument voices and the voice mixer.

use std::{collections::VecDeque, hint::black_box};

use criterion::{BenchmarkId, Criterion};
use soundy_keys::{
    graph::node::{GraphNode, RenderCtx},
    keyboard::{frequency_of, NOTES},
    synth::{SynthMessage, VoiceId, VoiceMixer},
    voices, Instrument,
};

use crate::BLOCK_SIZES;

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");
    let ctx = RenderCtx::from_freq(48_000.0, 261.63, 0.5); // C4

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let mut piano = voices::piano();
        piano.note_on(&ctx);
        group.bench_with_input(BenchmarkId::new("voices::piano", size), &size, |b, _| {
            b.iter(|| {
                piano.render_block(black_box(&mut buffer), black_box(&ctx));
            })
        });

        let mut synth = voices::synth();
        synth.note_on(&ctx);
        group.bench_with_input(BenchmarkId::new("voices::synth", size), &size, |b, _| {
            b.iter(|| {
                synth.render_block(black_box(&mut buffer), black_box(&ctx));
            })
        });
    }

    group.finish();
}

/// A mixer already holding `count` voices spread over the keyboard.
fn mixer_with(count: usize) -> VoiceMixer<VecDeque<SynthMessage>> {
    let mut mixer = VoiceMixer::new(48_000.0, VecDeque::new());
    for i in 0..count {
        let note = NOTES[i % NOTES.len()];
        let instrument = if i % 2 == 0 {
            Instrument::Piano
        } else {
            Instrument::Synth
        };
        mixer.handle(SynthMessage::Play {
            id: VoiceId(i as u64),
            note: note.parse().ok(),
            frequency: frequency_of(note),
            instrument,
            volume: 0.3,
        });
    }
    mixer
}

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/mix");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Chord, a full keyboard, and a mashed keyboard
        for count in [3, 18, 64] {
            group.bench_with_input(
                BenchmarkId::new(format!("{count}_voices"), size),
                &size,
                |b, _| {
                    // Fresh voices each batch so none run out of lifetime
                    b.iter_batched_ref(
                        || mixer_with(count),
                        |mixer| mixer.render_block(black_box(&mut buffer)),
                        criterion::BatchSize::SmallInput,
                    )
                },
            );
        }
    }

    group.finish();
}
