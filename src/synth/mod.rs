// Voice lifetime, mixing, and the engine the UI talks to.
// The engine runs on the input thread; the mixer runs wherever audio is
// rendered. Messages are the only thing crossing between them.

pub mod engine;
pub mod message;
pub mod mixer;
pub mod settings;
pub mod voice;

pub use engine::SoundEngine;
pub use message::{MessageReceiver, SynthMessage};
pub use mixer::VoiceMixer;
pub use settings::{ReleaseMode, Settings};
pub use voice::{Voice, VoiceId, VoiceState, VOICE_LIFETIME};
