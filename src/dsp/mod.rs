//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside voice structs. They stay focused on the
//! signal-processing math so graph nodes can layer note events on top.

/// Percussive attack/decay envelope generator.
pub mod envelope;
/// Phase-accumulator oscillator waveforms.
pub mod oscillator;

pub use envelope::{EnvelopeState, PercussiveEnvelope};
pub use oscillator::{OscillatorBlock, OscillatorWaveform};
