pub mod audio; // Output contexts (device and offline)
pub mod dsp;
pub mod error;
pub mod graph; // Composable voice graph nodes
pub mod instrument;
pub mod keyboard; // Note registry, layout, and input surface
pub mod synth; // Voices, mixing, and the sound engine
pub mod voices;

pub use error::AudioError;
pub use instrument::Instrument;
pub use synth::engine::SoundEngine;

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
