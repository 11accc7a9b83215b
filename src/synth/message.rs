use std::collections::VecDeque;

#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::{instrument::Instrument, keyboard::note::Note, synth::voice::VoiceId};

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SynthMessage {
    /// Start a new voice. `note` is `None` when the token did not parse;
    /// such voices play `frequency` but cannot be stopped by note.
    Play {
        id: VoiceId,
        note: Option<Note>,
        frequency: f32,
        instrument: Instrument,
        volume: f32,
    },
    /// Fade out one voice.
    Stop { id: VoiceId },
    /// Fade out every voice playing `note`.
    StopNote { note: Note },
    /// Fade out everything.
    StopAll,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<SynthMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<SynthMessage> {
    fn pop(&mut self) -> Option<SynthMessage> {
        Consumer::pop(self).ok()
    }
}

impl MessageReceiver for VecDeque<SynthMessage> {
    fn pop(&mut self) -> Option<SynthMessage> {
        self.pop_front()
    }
}
