//! Sound cues emitted by the simulation
//!
//! The core never mixes audio; it only names the cue and hands it to the host.

use serde::{Deserialize, Serialize};

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Player fires a rapid-fire shot
    PlayerShoot,
    /// Hostile fires a turnip
    HostileShoot,
    /// Any torpedo launch
    Torpedo,
    /// Player survives a projectile hit
    PlayerImpact,
    /// Hostile survives a hit
    LightImpact,
    /// Hostile destroyed
    HostileDestroyed,
    /// Bonus pickup collected
    BonusCollected,
    /// Level completed mid-pass
    LevelFinished,
}

impl SoundCue {
    /// Short stable name, used in logs and the demo output
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::PlayerShoot => "player_shoot",
            SoundCue::HostileShoot => "hostile_shoot",
            SoundCue::Torpedo => "torpedo",
            SoundCue::PlayerImpact => "player_impact",
            SoundCue::LightImpact => "light_impact",
            SoundCue::HostileDestroyed => "hostile_destroyed",
            SoundCue::BonusCollected => "bonus_collected",
            SoundCue::LevelFinished => "level_finished",
        }
    }
}
