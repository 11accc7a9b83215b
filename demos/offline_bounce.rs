//! Play a short phrase through the offline output and print level stats.
//!
//! Run with: cargo run --example offline_bounce

use soundy_keys::{
    audio::{AudioContext, OfflineBackend},
    synth::Settings,
    Instrument, SoundEngine,
};

const SAMPLE_RATE: f32 = 48_000.0;

// (note, instrument, seconds until the next note)
const PHRASE: &[(&str, Instrument, f32)] = &[
    ("C4", Instrument::Piano, 0.25),
    ("E4", Instrument::Piano, 0.25),
    ("G4", Instrument::Piano, 0.25),
    ("C5", Instrument::Synth, 0.5),
    ("A#4", Instrument::Synth, 0.25),
    ("F5", Instrument::Piano, 1.0),
];

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    let mut engine = SoundEngine::new(OfflineBackend::new(SAMPLE_RATE), Settings::default());
    let mut rendered = Vec::new();

    for &(note, instrument, gap) in PHRASE {
        engine.play_with(note, instrument, 0.4)?;
        let Some(context) = engine.context_mut() else {
            continue;
        };
        let block = context.render_seconds(gap);
        println!(
            "{note:>4} {:<5}  voices: {}  peak: {:.3}",
            instrument.name(),
            context.active_voices(),
            peak(&block)
        );
        rendered.extend(block);
    }

    // Let the last notes ring out
    if let Some(context) = engine.context_mut() {
        rendered.extend(context.render_seconds(2.0));
        println!("tail done, voices: {}", context.active_voices());
    }

    let rms = (rendered.iter().map(|&x| x * x).sum::<f32>() / rendered.len().max(1) as f32).sqrt();
    println!(
        "rendered {:.2}s  peak: {:.3}  rms: {:.3}",
        rendered.len() as f32 / SAMPLE_RATE,
        peak(&rendered),
        rms
    );
    Ok(())
}

fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
}
