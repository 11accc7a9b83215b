use thiserror::Error;

/// Failures surfaced by the audio output layer.
///
/// Only platform-level problems end up here. Malformed notes and unbound
/// keys resolve locally and never produce an error.
#[derive(Debug, Error)]
pub enum AudioError {
    /// No audio output can be provided on this platform.
    #[error("audio output unavailable: {reason}")]
    Unavailable { reason: String },
    /// The device exists but refused an operation.
    #[error("audio device error: {0}")]
    Device(String),
}

impl AudioError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}
