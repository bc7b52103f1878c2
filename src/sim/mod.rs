//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick per call, no wall-clock time
//! - Randomness only through the host's draws
//! - Stable iteration order (collection order, new entities appended)
//! - No rendering, audio or input backends

pub mod collision;
pub mod damage;
pub mod entity;
pub mod sprite;
pub mod state;
pub mod tick;

pub use collision::sprites_collide;
pub use damage::{hostile_accepts, hostile_damage, player_accepts, player_damage};
pub use entity::{
    BonusKind, DropTable, Entity, EntityId, EntityKind, Heading, Hostile, HostileKind, Player,
    ProjectileKind, Tag,
};
pub use sprite::Sprite;
pub use state::{TickStatus, World, WorldSnapshot, hostile_ceiling, level_target};
pub use tick::tick;
