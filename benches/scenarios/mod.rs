//! Real-world scenario benchmarks.
//!
//! These model actual playing: single instrument voices, and the mixer
//! rendering a pile of overlapping notes the way the output callback does.

mod voices;

pub use voices::{bench_mix, bench_voices};
