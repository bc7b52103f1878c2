//! Side Blaster - simulation core of a side-scrolling arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic tick-driven world (entities, collisions, spawning)
//! - `host`: Interface to the host harness (score, lives, input, audio, RNG)
//! - `audio`: Fixed sound cue enumeration
//! - `settings`: Data-driven session configuration
//! - `autopilot`: Synthetic input for unattended demo sessions

pub mod audio;
pub mod autopilot;
pub mod host;
pub mod settings;
pub mod sim;

pub use audio::SoundCue;
pub use host::{Harness, Host, Key};
pub use settings::Settings;
pub use sim::{TickStatus, World};

/// Game configuration constants
pub mod consts {
    /// Visible playfield, in world units
    pub const VIEW_WIDTH: f64 = 256.0;
    pub const VIEW_HEIGHT: f64 = 256.0;

    /// Sprite radius per unit of visual scale
    pub const RADIUS_PER_SCALE: f64 = 8.0;
    /// Two sprites touch when closer than this fraction of their summed radii
    pub const COLLISION_FACTOR: f64 = 0.75;

    /// Player defaults
    pub const PLAYER_START_X: f64 = 0.0;
    pub const PLAYER_START_Y: f64 = 128.0;
    pub const PLAYER_MAX_HIT_POINTS: f64 = 50.0;
    pub const PLAYER_MOVE_STEP: f64 = 6.0;
    /// Rapid-fire charge cap, regenerates one unit per tick
    pub const CABBAGE_CHARGE_MAX: u32 = 30;
    pub const CABBAGE_SHOT_COST: u32 = 5;
    /// Player shots appear this far ahead of the craft
    pub const PLAYER_MUZZLE_OFFSET: f64 = 12.0;

    /// Hostile shots appear this far behind the craft (toward the player)
    pub const HOSTILE_MUZZLE_OFFSET: f64 = 14.0;
    /// Vertical band in which a hostile considers the player in its sights
    pub const HOSTILE_SIGHT_BAND: f64 = 4.0;
    pub const HOSTILE_SCALE: f64 = 1.5;
    pub const HOSTILE_PLAN_MAX: u32 = 32;
    pub const CHARGE_SPEED: f64 = 5.0;
    pub const SCORE_HOSTILE: u64 = 250;
    pub const SCORE_HEAVY_HOSTILE: u64 = 1000;

    /// Projectile/bonus visual scale
    pub const SMALL_SCALE: f64 = 0.5;
    /// Degrees added to a spinning projectile's heading each tick
    pub const PROJECTILE_SPIN: f64 = 20.0;

    /// Bonus pickups
    pub const BONUS_DRIFT: f64 = 0.75;
    pub const BONUS_SCORE: u64 = 100;
    pub const REPAIR_AMOUNT: f64 = 10.0;
    pub const TORPEDO_REFILL: u32 = 5;

    /// Decoration
    pub const INITIAL_STARS: usize = 30;
    pub const STAR_MIN_SCALE: f64 = 0.05;
    pub const STAR_MAX_SCALE: f64 = 0.5;
    /// One-in-N chance of a new star each tick
    pub const STAR_SPAWN_ODDS: i32 = 15;
    pub const EXPLOSION_TICKS: u8 = 4;
    pub const EXPLOSION_GROWTH: f64 = 1.5;

    /// Draw layers (lower draws on top)
    pub const LAYER_PLAYER: u8 = 0;
    pub const LAYER_ACTORS: u8 = 1;
    pub const LAYER_STARS: u8 = 3;
}

/// True if the point lies inside the visible playfield
#[inline]
pub fn in_bounds(x: f64, y: f64) -> bool {
    (0.0..consts::VIEW_WIDTH).contains(&x) && (0.0..consts::VIEW_HEIGHT).contains(&y)
}

/// Normalize a heading to [0, 360) degrees
#[inline]
pub fn normalize_degrees(mut degrees: f64) -> f64 {
    while degrees >= 360.0 {
        degrees -= 360.0;
    }
    while degrees < 0.0 {
        degrees += 360.0;
    }
    degrees
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_bounds_edges() {
        assert!(in_bounds(0.0, 0.0));
        assert!(in_bounds(255.0, 255.0));
        assert!(!in_bounds(256.0, 10.0));
        assert!(!in_bounds(10.0, -0.5));
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(380.0), 20.0);
        assert_eq!(normalize_degrees(-20.0), 340.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
    }
}
