use tracing::{debug, info};

use crate::{
    audio::{AudioBackend, AudioContext, ContextState},
    error::AudioError,
    instrument::Instrument,
    keyboard::{
        note::{frequency_of, Note},
        surface::NotePlayer,
    },
    synth::{
        message::SynthMessage,
        settings::{ReleaseMode, Settings},
        voice::VoiceId,
    },
};

/// Turns notes into sound on a lazily opened audio context.
///
/// The context is created the first time something needs it (normally a
/// key press) and then lives as long as the engine. Every `play` starts an
/// independent voice and returns its id, so a voice can be stopped later.
///
/// # Example
///
/// ```
/// use soundy_keys::{audio::OfflineBackend, synth::Settings, SoundEngine};
///
/// let mut engine = SoundEngine::new(OfflineBackend::new(48_000.0), Settings::default());
/// let voice = engine.play("A4").unwrap();
/// engine.stop_voice(voice).unwrap();
/// ```
pub struct SoundEngine<B: AudioBackend> {
    backend: B,
    context: Option<B::Context>,
    settings: Settings,
    next_voice: u64,
}

impl<B: AudioBackend> SoundEngine<B> {
    pub fn new(backend: B, settings: Settings) -> Self {
        Self {
            backend,
            context: None,
            settings,
            next_voice: 0,
        }
    }

    /// The shared context, opening it on first use.
    pub fn ensure_context(&mut self) -> Result<&mut B::Context, AudioError> {
        let context = match self.context.take() {
            Some(context) => context,
            None => {
                let context = self.backend.open()?;
                info!(sample_rate = context.sample_rate(), "audio output ready");
                context
            }
        };
        Ok(self.context.insert(context))
    }

    /// Resume a suspended context. No-op when there is no context yet or it
    /// is already running.
    pub fn resume(&mut self) -> Result<(), AudioError> {
        match self.context.as_mut() {
            Some(context) if context.state() == ContextState::Suspended => context.resume(),
            _ => Ok(()),
        }
    }

    /// Play `note` with the current settings.
    pub fn play(&mut self, note: &str) -> Result<VoiceId, AudioError> {
        let Settings {
            instrument, volume, ..
        } = self.settings;
        self.play_with(note, instrument, volume)
    }

    /// Play `note` with an explicit instrument and volume.
    ///
    /// Unparseable notes still sound, at 440 Hz.
    pub fn play_with(
        &mut self,
        note: &str,
        instrument: Instrument,
        volume: f32,
    ) -> Result<VoiceId, AudioError> {
        let id = VoiceId(self.next_voice);
        let parsed = note.parse::<Note>().ok();
        let frequency = frequency_of(note);

        let context = self.ensure_context()?;
        context.submit(SynthMessage::Play {
            id,
            note: parsed,
            frequency,
            instrument,
            volume,
        })?;
        self.next_voice += 1;

        debug!(voice = id.0, note, frequency, %instrument, volume, "play");
        Ok(id)
    }

    /// Fade out one voice. Nothing happens if it already finished.
    pub fn stop_voice(&mut self, id: VoiceId) -> Result<(), AudioError> {
        self.submit_if_open(SynthMessage::Stop { id })
    }

    /// Key release. With [`ReleaseMode::Ring`] the note keeps decaying; with
    /// [`ReleaseMode::Stop`] its voices fade out.
    pub fn release(&mut self, note: &str) -> Result<(), AudioError> {
        if self.settings.release_mode == ReleaseMode::Ring {
            return Ok(());
        }
        match note.parse::<Note>() {
            Ok(note) => self.submit_if_open(SynthMessage::StopNote { note }),
            Err(_) => Ok(()),
        }
    }

    /// Fade out every voice.
    pub fn stop_all(&mut self) -> Result<(), AudioError> {
        self.submit_if_open(SynthMessage::StopAll)
    }

    fn submit_if_open(&mut self, msg: SynthMessage) -> Result<(), AudioError> {
        match self.context.as_mut() {
            Some(context) => context.submit(msg),
            None => Ok(()),
        }
    }

    /// Whether sound can be produced here. Disable audio affordances if not.
    pub fn audio_available(&self) -> bool {
        self.context.is_some() || self.backend.is_supported()
    }

    /// Voices sounding or fading right now (0 before the context exists).
    pub fn active_voices(&self) -> usize {
        self.context.as_ref().map_or(0, |context| context.active_voices())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Takes effect on the next note; sounding voices keep their volume.
    pub fn set_volume(&mut self, volume: f32) {
        self.settings.volume = volume;
    }

    pub fn set_instrument(&mut self, instrument: Instrument) {
        self.settings.instrument = instrument;
    }

    pub fn set_release_mode(&mut self, release_mode: ReleaseMode) {
        self.settings.release_mode = release_mode;
    }

    pub fn context(&self) -> Option<&B::Context> {
        self.context.as_ref()
    }

    pub fn context_mut(&mut self) -> Option<&mut B::Context> {
        self.context.as_mut()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

/// Key gestures: open and resume the context, then play.
impl<B: AudioBackend> NotePlayer for SoundEngine<B> {
    fn press(&mut self, note: &'static str) -> Result<(), AudioError> {
        self.ensure_context()?;
        self.resume()?;
        self.play(note).map(|_| ())
    }

    fn release(&mut self, note: &'static str) -> Result<(), AudioError> {
        SoundEngine::release(self, note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::OfflineBackend;

    fn engine() -> SoundEngine<OfflineBackend> {
        SoundEngine::new(OfflineBackend::new(1_000.0), Settings::default())
    }

    #[test]
    fn context_is_created_once() {
        let mut engine = engine();
        assert!(engine.context().is_none());

        let first = engine.ensure_context().unwrap().serial();
        let second = engine.ensure_context().unwrap().serial();
        assert_eq!(first, second);
        assert_eq!(engine.backend().opened(), 1);
    }

    #[test]
    fn resume_without_context_is_noop() {
        let mut engine = engine();
        engine.resume().unwrap();
        assert!(engine.context().is_none());
    }

    #[test]
    fn resume_wakes_suspended_context() {
        let mut engine = SoundEngine::new(OfflineBackend::new(1_000.0).suspended(), Settings::default());
        assert_eq!(engine.ensure_context().unwrap().state(), ContextState::Suspended);

        engine.resume().unwrap();
        assert_eq!(engine.context().unwrap().state(), ContextState::Running);
        engine.resume().unwrap();
        assert_eq!(engine.context().unwrap().state(), ContextState::Running);
    }

    #[test]
    fn play_uses_current_settings() {
        let mut engine = engine();
        engine.set_volume(0.25);
        engine.set_instrument(Instrument::Synth);
        let id = engine.play("C#4").unwrap();

        let sent = engine.context().unwrap().submitted();
        assert_eq!(
            sent,
            &[SynthMessage::Play {
                id,
                note: Some("C#4".parse().unwrap()),
                frequency: frequency_of("C#4"),
                instrument: Instrument::Synth,
                volume: 0.25,
            }]
        );
    }

    #[test]
    fn voice_ids_are_unique() {
        let mut engine = engine();
        let a = engine.play("C4").unwrap();
        let b = engine.play("C4").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_note_plays_reference_pitch() {
        let mut engine = engine();
        engine.play("X9").unwrap();
        match engine.context().unwrap().submitted()[0] {
            SynthMessage::Play {
                note, frequency, ..
            } => {
                assert_eq!(note, None);
                assert_eq!(frequency, 440.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn ring_mode_release_sends_nothing() {
        let mut engine = engine();
        engine.play("E4").unwrap();
        engine.release("E4").unwrap();
        assert_eq!(engine.context().unwrap().submitted().len(), 1);
    }

    #[test]
    fn stop_mode_release_stops_note() {
        let mut engine = engine();
        engine.set_release_mode(ReleaseMode::Stop);
        engine.play("E4").unwrap();
        engine.release("E4").unwrap();
        assert_eq!(
            engine.context().unwrap().submitted()[1],
            SynthMessage::StopNote {
                note: "E4".parse().unwrap()
            }
        );
    }

    #[test]
    fn stop_all_before_context_is_noop() {
        let mut engine = engine();
        engine.stop_all().unwrap();
        assert!(engine.context().is_none());
    }

    #[test]
    fn unavailable_output_is_reported() {
        let mut engine = SoundEngine::new(OfflineBackend::unavailable(), Settings::default());
        assert!(!engine.audio_available());
        let err = engine.play("A4").unwrap_err();
        assert!(err.is_unavailable());
        let err = NotePlayer::press(&mut engine, "A4").unwrap_err();
        assert!(err.is_unavailable());
    }

    #[test]
    fn full_queue_fails_play_without_using_an_id() {
        let backend = OfflineBackend::new(1_000.0).queue_capacity(1);
        let mut engine = SoundEngine::new(backend, Settings::default());

        let first = engine.play("C4").unwrap();
        let err = engine.play("D4").unwrap_err();
        assert!(!err.is_unavailable());
        assert!(engine.stop_all().is_err());
        assert_eq!(engine.context().unwrap().submitted().len(), 1);

        engine.context_mut().unwrap().render_seconds(0.01);
        let second = engine.play("D4").unwrap();
        assert_eq!(second, VoiceId(first.0 + 1));
    }
}
