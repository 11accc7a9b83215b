//! Piano voice - soft, long ringing tone.
//!
//! Not a sampled piano: a triangle wave through a percussive envelope gives
//! the "struck then fading" feel without any recordings.
//!
//! # How It Works
//!
//! 1. Triangle wave for a rounded tone with weak overtones
//! 2. 20ms attack to avoid a click on the first sample
//! 3. Exponential decay reaching near-silence 1.5s after the strike

use crate::{
    graph::{envelope::EnvNode, extensions::NodeExt, oscillator::OscNode, GraphNode},
    instrument::Instrument,
    voices::{ATTACK_TIME, DECAY_FLOOR, STOP_FADE_TIME},
};

/// Create a piano voice.
pub fn piano() -> impl GraphNode {
    let instrument = Instrument::Piano;
    OscNode::new(instrument.waveform()).amplify(
        EnvNode::percussive(ATTACK_TIME, instrument.decay_end(), DECAY_FLOOR)
            .with_release(STOP_FADE_TIME),
    )
}
