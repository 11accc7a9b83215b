//! Synthetic key-ups for terminals that only report presses.
//!
//! Such terminals deliver auto-repeat as a stream of fresh presses. The
//! first hold has to outlast the platform's repeat delay (250-660ms on
//! common setups) or the first repeat would land after the fake key-up and
//! replay the note. Once repeats arrive they come every ~30-50ms, so each
//! one only needs a short extension.

use std::time::{Duration, Instant};

/// Hold after a fresh press, longer than the usual repeat delay
pub const FIRST_HOLD: Duration = Duration::from_millis(700);

/// Hold after each auto-repeat
pub const REPEAT_HOLD: Duration = Duration::from_millis(120);

struct Held {
    key: char,
    deadline: Instant,
}

#[derive(Default)]
pub struct SyntheticKeyUps {
    held: Vec<Held>,
}

impl SyntheticKeyUps {
    pub fn new() -> Self {
        Self::default()
    }

    /// A press for `key` arrived at `now`. Returns true when it is an
    /// auto-repeat of a key that is still held.
    pub fn pressed(&mut self, key: char, now: Instant) -> bool {
        let key = key.to_ascii_lowercase();
        match self.held.iter_mut().find(|held| held.key == key) {
            Some(held) => {
                held.deadline = now + REPEAT_HOLD;
                true
            }
            None => {
                self.held.push(Held {
                    key,
                    deadline: now + FIRST_HOLD,
                });
                false
            }
        }
    }

    /// Keys whose hold ran out by `now`, removed from the set.
    pub fn expire(&mut self, now: Instant) -> Vec<char> {
        let mut expired = Vec::new();
        self.held.retain(|held| {
            if held.deadline <= now {
                expired.push(held.key);
                false
            } else {
                true
            }
        });
        expired
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}
