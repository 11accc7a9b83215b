use crate::{graph::node::RenderCtx, MIN_TIME};

/*
Percussive Envelope
===================

A struck or plucked key does not sustain: it jumps up quickly and then dies
away on its own. This envelope models exactly that, with no sustain stage.

Vocabulary
----------

  peak        Level reached at the end of the attack. Set per note from the
              voice volume (`RenderCtx::velocity`), not clamped.

  floor       The "near-silence" target of the decay (0.001 by default).
              Exponential curves never reach zero, so the decay aims here.

  decay_end   Time (seconds after note-on) at which the level arrives at
              the floor. The attack is included in this span.


The Shape
---------

  Level
   peak ┐  ╱╲
        │ ╱  ╲
        │╱    ╲__
        │        ‾‾‾‾‾───────────────  floor
    0.0 └──────────────────────────→ Time
        ↑ attack ↑       ↑ decay_end
        0       20ms

Attack is a LINEAR ramp 0 → peak. Starting from zero keeps the first
sample from clicking.

Decay is EXPONENTIAL from peak toward the floor:

    progress = (t - attack) / (decay_end - attack)       clamped to [0, 1]
    level    = peak * (floor / peak) ^ progress

which is a straight line on a dB scale, the way acoustic strings fade.
After decay_end the level holds at the floor until the owner drops the
voice. A peak at or below the floor is held flat (the ratio would be >= 1).


Release
-------

note_off() is only used for an explicit early stop. It snapshots the
current level and fades linearly to 0.0 over `release_time`, then goes
Idle. A short fade avoids the click a hard cut would produce.


The State Machine
-----------------

    Idle ──note_on──→ Attack ──t ≥ attack──→ Decay ──t ≥ decay_end──→ Floor
                        │                      │                        │
                        └──────────── note_off ┴────────────────────────┘
                                                  ↓
                                               Release ──level = 0──→ Idle
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeState {
    Idle,    // Not triggered, level = 0
    Attack,  // Linear ramp 0 → peak
    Decay,   // Exponential fall peak → floor
    Floor,   // Holding the floor until the voice is dropped
    Release, // Explicit stop, linear fade to 0
}

pub struct PercussiveEnvelope {
    // Shape parameters
    attack_time: f32,  // seconds to ramp 0 → peak
    decay_end: f32,    // seconds from note-on until the floor is reached
    floor: f32,        // near-silence target of the decay
    release_time: f32, // seconds to fade current → 0 on note_off

    // Runtime state
    stage: EnvelopeState,
    level: f32,
    peak: f32,
    elapsed_samples: u64, // samples since note_on

    // Release bookkeeping
    release_start_level: f32,
    release_total_samples: u32,
    release_elapsed_samples: u32,
}

impl PercussiveEnvelope {
    pub fn new(attack: f32, decay_end: f32, floor: f32) -> Self {
        let attack_time = attack.max(MIN_TIME);
        Self {
            attack_time,
            decay_end: decay_end.max(attack_time + MIN_TIME),
            floor: floor.max(f32::MIN_POSITIVE),
            release_time: 0.03,

            stage: EnvelopeState::Idle,
            level: 0.0,
            peak: 0.0,
            elapsed_samples: 0,
            release_start_level: 0.0,
            release_total_samples: 1,
            release_elapsed_samples: 0,
        }
    }

    /// Fade time used by `note_off`.
    pub fn with_release(mut self, release: f32) -> Self {
        self.release_time = release.max(MIN_TIME);
        self
    }

    /// Start the attack from zero, aiming at `ctx.velocity`.
    pub fn note_on(&mut self, ctx: &RenderCtx) {
        self.peak = ctx.velocity;
        self.level = 0.0;
        self.elapsed_samples = 0;
        self.release_elapsed_samples = 0;
        self.stage = EnvelopeState::Attack;
    }

    /// Fade out from the current level.
    pub fn note_off(&mut self, ctx: &RenderCtx) {
        if matches!(self.stage, EnvelopeState::Idle | EnvelopeState::Release) {
            return;
        }

        self.release_start_level = self.level;
        self.release_total_samples = (self.release_time * ctx.sample_rate).round().max(1.0) as u32;
        self.release_elapsed_samples = 0;
        self.stage = EnvelopeState::Release;
    }

    /// Advance the envelope by one sample.
    pub fn next_sample(&mut self, ctx: &RenderCtx) {
        let t = self.elapsed_samples as f32 / ctx.sample_rate;
        self.elapsed_samples = self.elapsed_samples.saturating_add(1);

        match self.stage {
            EnvelopeState::Idle => {
                self.level = 0.0;
            }

            EnvelopeState::Attack => {
                if t < self.attack_time {
                    self.level = self.peak * (t / self.attack_time);
                } else {
                    self.stage = EnvelopeState::Decay;
                    self.level = self.decay_level(t);
                }
            }

            EnvelopeState::Decay => {
                if t < self.decay_end {
                    self.level = self.decay_level(t);
                } else {
                    self.level = self.floor_level();
                    self.stage = EnvelopeState::Floor;
                }
            }

            EnvelopeState::Floor => {
                self.level = self.floor_level();
            }

            EnvelopeState::Release => {
                let progress =
                    self.release_elapsed_samples as f32 / self.release_total_samples as f32;
                self.level = self.release_start_level * (1.0 - progress);
                self.release_elapsed_samples = self.release_elapsed_samples.saturating_add(1);

                if self.release_elapsed_samples >= self.release_total_samples {
                    self.level = 0.0;
                    self.stage = EnvelopeState::Idle;
                }
            }
        }

        debug_assert!(self.level.is_finite());
    }

    fn decay_level(&self, t: f32) -> f32 {
        if self.peak <= self.floor {
            return self.peak;
        }
        let span = self.decay_end - self.attack_time;
        let progress = ((t - self.attack_time) / span).clamp(0.0, 1.0);
        self.peak * (self.floor / self.peak).powf(progress)
    }

    fn floor_level(&self) -> f32 {
        self.floor.min(self.peak)
    }

    /// Render a block of envelope values into the buffer.
    pub fn render(&mut self, buffer: &mut [f32], ctx: &RenderCtx) {
        for sample in buffer.iter_mut() {
            self.next_sample(ctx);
            *sample = self.level;
        }
    }

    /// Returns true if the envelope is producing output (not idle).
    pub fn is_active(&self) -> bool {
        !matches!(self.stage, EnvelopeState::Idle)
    }

    pub fn reset(&mut self) {
        self.stage = EnvelopeState::Idle;
        self.level = 0.0;
        self.peak = 0.0;
        self.elapsed_samples = 0;
        self.release_elapsed_samples = 0;
        self.release_start_level = 0.0;
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn state(&self) -> EnvelopeState {
        self.stage
    }
}
