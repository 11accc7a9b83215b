//! Default output device through cpal.
//!
//! The mixer lives inside the cpal callback. Control messages reach it over
//! an rtrb ring; the callback publishes the live voice count through an
//! atomic and pushes mono samples into a second ring for visualization.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Consumer, Producer, PushError, RingBuffer};
use tracing::{error, info, warn};

use crate::{
    audio::{AudioBackend, AudioContext, ContextState},
    error::AudioError,
    synth::{message::SynthMessage, mixer::VoiceMixer},
    MAX_BLOCK_SIZE,
};

// Tunables
const MESSAGE_QUEUE_SIZE: usize = 256;
const SCOPE_RING_SIZE: usize = 1024 * 16; // Capacity in samples for audio→UI ring

pub struct CpalBackend {
    queue_size: usize,
    scope_size: usize,
}

impl CpalBackend {
    pub fn new() -> Self {
        Self {
            queue_size: MESSAGE_QUEUE_SIZE,
            scope_size: SCOPE_RING_SIZE,
        }
    }

    /// Capacity of the UI → audio message ring.
    pub fn queue_size(mut self, queue_size: usize) -> Self {
        self.queue_size = queue_size.max(1);
        self
    }

    /// Capacity of the audio → UI sample ring.
    pub fn scope_size(mut self, scope_size: usize) -> Self {
        self.scope_size = scope_size.max(1);
        self
    }
}

impl Default for CpalBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioBackend for CpalBackend {
    type Context = CpalContext;

    fn is_supported(&self) -> bool {
        cpal::default_host().default_output_device().is_some()
    }

    fn open(&mut self) -> Result<CpalContext, AudioError> {
        CpalContext::open(self.queue_size, self.scope_size)
    }
}

pub struct CpalContext {
    stream: cpal::Stream,
    tx: Producer<SynthMessage>,
    scope: Option<Consumer<f32>>,
    active: Arc<AtomicUsize>,
    state: ContextState,
    sample_rate: f32,
    channels: usize,
}

impl CpalContext {
    fn open(queue_size: usize, scope_size: usize) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| AudioError::unavailable("no default output device available"))?;
        let config = device
            .default_output_config()
            .map_err(|err| AudioError::unavailable(format!("no usable output config: {err}")))?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;

        // --- Cross-thread rings ---
        let (tx, rx) = RingBuffer::<SynthMessage>::new(queue_size);
        let (mut scope_tx, scope_rx) = RingBuffer::<f32>::new(scope_size);
        let active = Arc::new(AtomicUsize::new(0));

        let mut mixer = VoiceMixer::new(sample_rate, rx);
        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];
        let published = Arc::clone(&active);

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _| {
                    let total_frames = data.len() / channels;
                    let mut frames_written = 0;
                    while frames_written < total_frames {
                        let frames_remaining = total_frames - frames_written;
                        let frames_to_render = frames_remaining.min(MAX_BLOCK_SIZE);

                        let block = &mut render_buf[..frames_to_render];
                        mixer.render_block(block);

                        // Duplicate mono to all channels
                        let out_off = frames_written * channels;
                        for (i, &s) in block.iter().enumerate() {
                            for ch in 0..channels {
                                data[out_off + i * channels + ch] = s;
                            }
                        }

                        // Feed the scope, dropping the remainder if the UI lags
                        for &s in block.iter() {
                            if let Err(PushError::Full(_)) = scope_tx.push(s) {
                                break;
                            }
                        }

                        frames_written += frames_to_render;
                    }
                    published.store(mixer.active_voices(), Ordering::Relaxed);
                },
                |err| error!("audio stream error: {err}"),
                None,
            )
            .map_err(|err| AudioError::Device(format!("failed to build output stream: {err}")))?;

        // Hold output until the first gesture resumes it.
        let state = match stream.pause() {
            Ok(()) => ContextState::Suspended,
            Err(err) => {
                warn!("output stream cannot be paused, starting live: {err}");
                ContextState::Running
            }
        };
        info!(sample_rate, channels, ?state, "audio context opened");

        Ok(Self {
            stream,
            tx,
            scope: Some(scope_rx),
            active,
            state,
            sample_rate,
            channels,
        })
    }

    /// Receiver of rendered mono samples. Can be taken once.
    pub fn take_scope(&mut self) -> Option<Consumer<f32>> {
        self.scope.take()
    }

    pub fn channels(&self) -> usize {
        self.channels
    }
}

/// Queue `msg` for the audio thread. A full queue is an error: the message
/// would otherwise vanish while the caller believes it was delivered.
fn push_message(tx: &mut Producer<SynthMessage>, msg: SynthMessage) -> Result<(), AudioError> {
    match tx.push(msg) {
        Ok(()) => Ok(()),
        Err(PushError::Full(msg)) => {
            warn!(?msg, "audio message queue full, dropping");
            Err(AudioError::Device("audio message queue full".into()))
        }
    }
}

impl AudioContext for CpalContext {
    fn state(&self) -> ContextState {
        self.state
    }

    fn resume(&mut self) -> Result<(), AudioError> {
        self.stream
            .play()
            .map_err(|err| AudioError::Device(format!("failed to start output stream: {err}")))?;
        if self.state == ContextState::Suspended {
            info!("audio context resumed");
        }
        self.state = ContextState::Running;
        Ok(())
    }

    fn suspend(&mut self) -> Result<(), AudioError> {
        self.stream
            .pause()
            .map_err(|err| AudioError::Device(format!("failed to pause output stream: {err}")))?;
        self.state = ContextState::Suspended;
        Ok(())
    }

    fn submit(&mut self, msg: SynthMessage) -> Result<(), AudioError> {
        push_message(&mut self.tx, msg)
    }

    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn active_voices(&self) -> usize {
        self.active.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_queue_reports_an_error() {
        let (mut tx, mut rx) = RingBuffer::<SynthMessage>::new(1);

        push_message(&mut tx, SynthMessage::StopAll).unwrap();
        let err = push_message(&mut tx, SynthMessage::StopAll).unwrap_err();
        assert!(matches!(err, AudioError::Device(_)));
        assert!(!err.is_unavailable());

        // Only the first message made it across
        assert_eq!(rx.pop(), Ok(SynthMessage::StopAll));
        assert!(rx.pop().is_err());

        // Space again once the audio thread drains
        push_message(&mut tx, SynthMessage::StopAll).unwrap();
    }
}
