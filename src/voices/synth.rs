//! Synth voice - bright, short buzz.
//!
//! Sawtooth waves contain every harmonic, so the note cuts through even at
//! low volume. The decay is a third shorter than the piano's.

use crate::{
    graph::{envelope::EnvNode, extensions::NodeExt, oscillator::OscNode, GraphNode},
    instrument::Instrument,
    voices::{ATTACK_TIME, DECAY_FLOOR, STOP_FADE_TIME},
};

/// Create a synth voice.
pub fn synth() -> impl GraphNode {
    let instrument = Instrument::Synth;
    OscNode::new(instrument.waveform()).amplify(
        EnvNode::percussive(ATTACK_TIME, instrument.decay_end(), DECAY_FLOOR)
            .with_release(STOP_FADE_TIME),
    )
}
