//! Audio output contexts.
//!
//! A context is the connection to wherever samples end up. The engine
//! creates exactly one, lazily, through an [`AudioBackend`]; that indirection
//! lets tests swap the real device for an in-process sink.
//!
//! Contexts start out [`ContextState::Suspended`] when the platform demands
//! a user gesture before audio may start, and must be resumable.

#[cfg(feature = "rtrb")]
pub mod cpal_backend;
pub mod offline;

#[cfg(feature = "rtrb")]
pub use cpal_backend::{CpalBackend, CpalContext};
pub use offline::{OfflineBackend, OfflineContext};

use crate::{error::AudioError, synth::message::SynthMessage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    Suspended,
    Running,
}

/// A live connection to an audio output.
pub trait AudioContext {
    fn state(&self) -> ContextState;

    /// Ask the output to start (or continue) rendering. Returns without
    /// waiting for the device.
    fn resume(&mut self) -> Result<(), AudioError>;

    fn suspend(&mut self) -> Result<(), AudioError>;

    /// Hand a control message to the renderer. Never blocks.
    fn submit(&mut self, msg: SynthMessage) -> Result<(), AudioError>;

    fn sample_rate(&self) -> f32;

    /// Voices the renderer currently holds (sounding or fading).
    fn active_voices(&self) -> usize;
}

/// Opens contexts. Implemented once per kind of output.
pub trait AudioBackend {
    type Context: AudioContext;

    /// Whether `open` can be expected to succeed. Cheap; opens nothing.
    fn is_supported(&self) -> bool;

    fn open(&mut self) -> Result<Self::Context, AudioError>;
}
