//! Host harness interface
//!
//! The world reads score/level/lives, input and randomness from its host and
//! reports cues and the status line back. `Harness` is the standalone host used
//! by the demo binary; anything else that owns a frame clock can implement
//! `Host` instead.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::audio::SoundCue;
use crate::settings::Settings;

/// A single key press, at most one consumed per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    /// Rapid-fire trigger
    Fire,
    /// Torpedo trigger
    Torpedo,
}

/// Services the simulation consumes from its host
pub trait Host {
    fn level(&self) -> u32;
    fn lives(&self) -> u32;
    fn score(&self) -> u64;
    fn increase_score(&mut self, amount: u64);
    fn inc_lives(&mut self);
    fn dec_lives(&mut self);
    /// Pop the pending key press, if any
    fn take_key(&mut self) -> Option<Key>;
    fn play_sound(&mut self, cue: SoundCue);
    fn set_status_text(&mut self, text: &str);
    /// Uniform integer in `[min, max]`
    fn rand_int(&mut self, min: i32, max: i32) -> i32;
    /// Uniform real in `[min, max)`
    fn rand_real(&mut self, min: f64, max: f64) -> f64;
}

/// RNG state wrapper, so a run can be replayed from its seed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Standalone host: owns the counters, key queue, cue log and seeded RNG
#[derive(Debug, Clone)]
pub struct Harness {
    pub level: u32,
    pub lives: u32,
    pub score: u64,
    pub rng_state: RngState,
    rng: Pcg32,
    keys: VecDeque<Key>,
    cues: Vec<SoundCue>,
    status: String,
}

impl Harness {
    pub fn new(seed: u64) -> Self {
        Self::from_settings(&Settings {
            seed: Some(seed),
            ..Settings::default()
        })
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let rng_state = RngState::new(settings.resolved_seed());
        Self {
            level: settings.starting_level.max(1),
            lives: settings.starting_lives,
            score: 0,
            rng: rng_state.to_rng(),
            rng_state,
            keys: VecDeque::new(),
            cues: Vec::new(),
            status: String::new(),
        }
    }

    /// Queue a key press for a future tick
    pub fn push_key(&mut self, key: Key) {
        self.keys.push_back(key);
    }

    /// Drop any key presses not yet consumed
    pub fn clear_keys(&mut self) {
        self.keys.clear();
    }

    /// Take the cues emitted since the last drain
    pub fn drain_cues(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.cues)
    }

    pub fn status_text(&self) -> &str {
        &self.status
    }

    pub fn advance_level(&mut self) {
        self.level += 1;
    }
}

impl Host for Harness {
    fn level(&self) -> u32 {
        self.level
    }

    fn lives(&self) -> u32 {
        self.lives
    }

    fn score(&self) -> u64 {
        self.score
    }

    fn increase_score(&mut self, amount: u64) {
        self.score += amount;
    }

    fn inc_lives(&mut self) {
        self.lives += 1;
    }

    fn dec_lives(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    fn take_key(&mut self) -> Option<Key> {
        self.keys.pop_front()
    }

    fn play_sound(&mut self, cue: SoundCue) {
        log::trace!("cue {}", cue.as_str());
        self.cues.push(cue);
    }

    fn set_status_text(&mut self, text: &str) {
        self.status.clear();
        self.status.push_str(text);
    }

    fn rand_int(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    fn rand_real(&mut self, min: f64, max: f64) -> f64 {
        if min >= max {
            return min;
        }
        self.rng.random_range(min..max)
    }
}
