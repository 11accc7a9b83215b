//! Composable building blocks for constructing voice graphs.
//!
//! Graph nodes wrap the low-level DSP primitives with what an instrument
//! needs: note events, activity tracking, and block-based rendering. The
//! `extensions` module adds fluent helpers so voices read as a chain.

/// Multiply a signal by a control signal (envelope → VCA).
pub mod amplify;
/// Envelope generator node exposing the percussive envelope.
pub mod envelope;
/// Fluent combinators (`.amplify()`).
pub mod extensions;
/// Core traits shared by all graph nodes.
pub mod node;
/// Audio-band oscillators.
pub mod oscillator;

pub use node::{GraphNode, RenderCtx};
