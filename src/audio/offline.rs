//! In-process output: renders on demand into caller buffers.
//!
//! Used for tests and offline bouncing. Behaves like a device context
//! otherwise: messages queue up and take effect at the next render, and a
//! suspended context renders silence without advancing its clock.

use std::collections::VecDeque;

use tracing::debug;

use crate::{
    audio::{AudioBackend, AudioContext, ContextState},
    error::AudioError,
    synth::{message::SynthMessage, mixer::VoiceMixer},
};

pub struct OfflineBackend {
    sample_rate: f32,
    start_suspended: bool,
    available: bool,
    queue_capacity: Option<usize>,
    opened: u32,
}

impl OfflineBackend {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            start_suspended: false,
            available: true,
            queue_capacity: None,
            opened: 0,
        }
    }

    /// Contexts start suspended, like a browser before the first gesture.
    pub fn suspended(mut self) -> Self {
        self.start_suspended = true;
        self
    }

    /// A platform with no audio output at all.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new(48_000.0)
        }
    }

    /// Bound the pending-message queue like a device ring. Submitting to a
    /// full queue fails until the next render drains it.
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = Some(capacity.max(1));
        self
    }

    /// Number of contexts opened so far.
    pub fn opened(&self) -> u32 {
        self.opened
    }
}

impl AudioBackend for OfflineBackend {
    type Context = OfflineContext;

    fn is_supported(&self) -> bool {
        self.available
    }

    fn open(&mut self) -> Result<OfflineContext, AudioError> {
        if !self.available {
            return Err(AudioError::unavailable("offline backend configured without output"));
        }
        self.opened += 1;

        let state = if self.start_suspended {
            ContextState::Suspended
        } else {
            ContextState::Running
        };
        debug!(serial = self.opened, ?state, "offline context opened");

        Ok(OfflineContext {
            serial: self.opened,
            state,
            mixer: VoiceMixer::new(self.sample_rate, VecDeque::new()),
            queue_capacity: self.queue_capacity,
            submitted: Vec::new(),
            frames_rendered: 0,
        })
    }
}

pub struct OfflineContext {
    serial: u32,
    state: ContextState,
    mixer: VoiceMixer<VecDeque<SynthMessage>>,
    queue_capacity: Option<usize>,
    submitted: Vec<SynthMessage>,
    frames_rendered: u64,
}

impl OfflineContext {
    /// Which open() produced this context (1 for the first).
    pub fn serial(&self) -> u32 {
        self.serial
    }

    /// Every message submitted, in order.
    pub fn submitted(&self) -> &[SynthMessage] {
        &self.submitted
    }

    /// Render the next `out.len()` samples.
    pub fn render(&mut self, out: &mut [f32]) {
        if self.state == ContextState::Suspended {
            out.fill(0.0);
            return;
        }
        self.mixer.render_block(out);
        self.frames_rendered += out.len() as u64;
    }

    /// Render `seconds` of audio into a new buffer.
    pub fn render_seconds(&mut self, seconds: f32) -> Vec<f32> {
        let frames = (seconds * self.mixer.sample_rate()).round() as usize;
        let mut out = vec![0.0; frames];
        self.render(&mut out);
        out
    }

    /// Seconds rendered while running.
    pub fn current_time(&self) -> f64 {
        self.frames_rendered as f64 / self.mixer.sample_rate() as f64
    }
}

impl AudioContext for OfflineContext {
    fn state(&self) -> ContextState {
        self.state
    }

    fn resume(&mut self) -> Result<(), AudioError> {
        self.state = ContextState::Running;
        Ok(())
    }

    fn suspend(&mut self) -> Result<(), AudioError> {
        self.state = ContextState::Suspended;
        Ok(())
    }

    fn submit(&mut self, msg: SynthMessage) -> Result<(), AudioError> {
        if let Some(capacity) = self.queue_capacity {
            if self.mixer.receiver_mut().len() >= capacity {
                return Err(AudioError::Device("audio message queue full".into()));
            }
        }
        self.submitted.push(msg);
        self.mixer.receiver_mut().push_back(msg);
        Ok(())
    }

    fn sample_rate(&self) -> f32 {
        self.mixer.sample_rate()
    }

    fn active_voices(&self) -> usize {
        self.mixer.active_voices()
    }
}
