use crate::{
    synth::{
        message::{MessageReceiver, SynthMessage},
        voice::Voice,
    },
    MAX_BLOCK_SIZE,
};

/// Voices the mixer holds before its list has to grow. Voices are pushed on
/// the audio thread, so this covers a mashed keyboard without reallocating.
pub const VOICE_CAPACITY: usize = 512;

/// Renders every live voice and sums them.
///
/// There is no voice cap and no stealing: each `Play` adds a voice, and a
/// voice leaves the list only when it finishes (lifetime over or fade done).
pub struct VoiceMixer<R: MessageReceiver> {
    sample_rate: f32,
    voices: Vec<Voice>,
    rx: R,
    temp_buffer: Vec<f32>,
}

impl<R: MessageReceiver> VoiceMixer<R> {
    pub fn new(sample_rate: f32, rx: R) -> Self {
        Self {
            sample_rate,
            voices: Vec::with_capacity(VOICE_CAPACITY),
            rx,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Apply one control message immediately.
    pub fn handle(&mut self, msg: SynthMessage) {
        match msg {
            SynthMessage::Play {
                id,
                note,
                frequency,
                instrument,
                volume,
            } => {
                self.voices.push(Voice::start(
                    id,
                    note,
                    frequency,
                    instrument,
                    volume,
                    self.sample_rate,
                ));
            }
            SynthMessage::Stop { id } => {
                if let Some(voice) = self.voices.iter_mut().find(|v| v.id() == id) {
                    voice.release();
                }
            }
            SynthMessage::StopNote { note } => {
                for voice in self.voices.iter_mut().filter(|v| v.note() == Some(note)) {
                    voice.release();
                }
            }
            SynthMessage::StopAll => {
                for voice in &mut self.voices {
                    voice.release();
                }
            }
        }
    }

    pub fn render_block(&mut self, out: &mut [f32]) {
        // Process control messages
        while let Some(msg) = self.rx.pop() {
            self.handle(msg);
        }

        out.fill(0.0);
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            let scratch = &mut self.temp_buffer[..chunk.len()];
            for voice in &mut self.voices {
                voice.render(scratch);
                for (o, v) in chunk.iter_mut().zip(scratch.iter()) {
                    *o += v;
                }
            }
        }

        self.voices.retain(|voice| !voice.is_finished());
    }

    /// Voices still sounding or fading.
    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    pub fn receiver_mut(&mut self) -> &mut R {
        &mut self.rx
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::{instrument::Instrument, keyboard::note::Note, synth::voice::VoiceId};

    const SAMPLE_RATE: f32 = 1_000.0;

    fn play(id: u64, token: &str, volume: f32) -> SynthMessage {
        let note: Note = token.parse().unwrap();
        SynthMessage::Play {
            id: VoiceId(id),
            note: Some(note),
            frequency: note.frequency(),
            instrument: Instrument::Piano,
            volume,
        }
    }

    fn mixer() -> VoiceMixer<VecDeque<SynthMessage>> {
        VoiceMixer::new(SAMPLE_RATE, VecDeque::new())
    }

    #[test]
    fn overlapping_notes_are_independent_voices() {
        let mut mixer = mixer();
        mixer.receiver_mut().push_back(play(1, "C4", 0.5));
        mixer.receiver_mut().push_back(play(2, "C4", 0.5));
        mixer.receiver_mut().push_back(play(3, "E4", 0.5));

        let mut buffer = vec![0.0f32; 64];
        mixer.render_block(&mut buffer);
        assert_eq!(mixer.active_voices(), 3);
    }

    #[test]
    fn finished_voices_are_dropped() {
        let mut mixer = mixer();
        mixer.handle(play(1, "A4", 0.5));

        let mut buffer = vec![0.0f32; 1_000];
        mixer.render_block(&mut buffer);
        assert_eq!(mixer.active_voices(), 1);
        mixer.render_block(&mut buffer);
        assert_eq!(mixer.active_voices(), 0);

        mixer.render_block(&mut buffer);
        assert!(buffer.iter().all(|s| *s == 0.0));
    }

    #[test]
    fn stop_all_silences_quickly() {
        let mut mixer = mixer();
        for id in 0..10 {
            mixer.handle(play(id, "G4", 0.5));
        }
        let mut buffer = vec![0.0f32; 100];
        mixer.render_block(&mut buffer);

        mixer.receiver_mut().push_back(SynthMessage::StopAll);
        mixer.render_block(&mut buffer);
        assert_eq!(mixer.active_voices(), 0);
        assert!(buffer[40..].iter().all(|s| *s == 0.0));
    }

    #[test]
    fn stop_note_leaves_other_notes() {
        let mut mixer = mixer();
        mixer.handle(play(1, "C4", 0.5));
        mixer.handle(play(2, "D4", 0.5));
        mixer.handle(SynthMessage::StopNote {
            note: "C4".parse().unwrap(),
        });

        let mut buffer = vec![0.0f32; 100];
        mixer.render_block(&mut buffer);
        let left: Vec<_> = mixer.voices().iter().map(|v| v.id()).collect();
        assert_eq!(left, vec![VoiceId(2)]);
    }

    #[test]
    fn stop_by_id() {
        let mut mixer = mixer();
        mixer.handle(play(7, "C4", 0.5));
        mixer.handle(play(8, "C4", 0.5));
        mixer.handle(SynthMessage::Stop { id: VoiceId(7) });

        let mut buffer = vec![0.0f32; 100];
        mixer.render_block(&mut buffer);
        assert_eq!(mixer.voices().len(), 1);
        assert_eq!(mixer.voices()[0].id(), VoiceId(8));
    }

    #[test]
    fn burst_of_notes_fits_without_growing() {
        let mut mixer = mixer();
        let reserved = mixer.voices.capacity();
        assert!(reserved >= VOICE_CAPACITY);

        // Every key pressed about 25 times inside the 2s lifetime
        for id in 0..450 {
            mixer.handle(play(id, "A4", 0.1));
        }
        assert_eq!(mixer.active_voices(), 450);
        assert_eq!(mixer.voices.capacity(), reserved);
    }
}
