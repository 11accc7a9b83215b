//! Stock voice graphs, one per [`Instrument`](crate::Instrument).
//!
//! Both share the same envelope contract: a 20ms linear attack up to the
//! voice volume, then an exponential decay toward [`DECAY_FLOOR`]. Only the
//! waveform and the decay length differ.
//!
//! # Example
//!
//! ```
//! use soundy_keys::voices;
//!
//! let piano = voices::piano();
//! let synth = voices::synth();
//! ```

mod piano;
mod synth;

pub use piano::piano;
pub use synth::synth;

/// Attack ramp length in seconds.
pub const ATTACK_TIME: f32 = 0.02;
/// Near-silence level the decay aims at.
pub const DECAY_FLOOR: f32 = 0.001;
/// Fade length when a voice is stopped early.
pub const STOP_FADE_TIME: f32 = 0.03;
