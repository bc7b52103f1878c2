//! Entity types and per-variant data
//!
//! Every simulated object other than the player is an `Entity`: a sprite, a
//! liveness flag and an `EntityKind` carrying the variant's own state. The
//! player lives beside the collection as a `Player`.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::sprite::Sprite;
use crate::audio::SoundCue;
use crate::consts::*;

/// Stable handle for an entity in the world's collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Hostile craft variants, lightest to heaviest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostileKind {
    Light,
    Medium,
    Heavy,
}

/// Which drop table a destroyed hostile rolls on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropTable {
    /// Possible extra life
    ExtraLife,
    /// Possible repair or torpedo refill
    Supplies,
}

impl HostileKind {
    pub fn base_hit_points(&self) -> f64 {
        match self {
            HostileKind::Light | HostileKind::Medium => 5.0,
            HostileKind::Heavy => 10.0,
        }
    }

    pub fn speed(&self) -> f64 {
        match self {
            HostileKind::Light | HostileKind::Medium => 2.0,
            HostileKind::Heavy => 1.75,
        }
    }

    /// Score awarded when destroyed
    pub fn score(&self) -> u64 {
        match self {
            HostileKind::Heavy => SCORE_HEAVY_HOSTILE,
            _ => SCORE_HOSTILE,
        }
    }

    pub fn drop_table(&self) -> Option<DropTable> {
        match self {
            HostileKind::Light => None,
            HostileKind::Medium => Some(DropTable::ExtraLife),
            HostileKind::Heavy => Some(DropTable::Supplies),
        }
    }
}

/// Hit points for a hostile of the given base strength at a difficulty level
pub fn scaled_hit_points(base: f64, level: u32) -> f64 {
    base * (1.0 + 0.1 * (level as f64 - 1.0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Player rapid-fire shot
    Cabbage,
    /// Basic hostile shot
    Turnip,
    PlayerTorpedo,
    HostileTorpedo,
}

impl ProjectileKind {
    /// Horizontal movement per tick
    pub fn step(&self) -> f64 {
        match self {
            ProjectileKind::Cabbage => 8.0,
            ProjectileKind::Turnip => -6.0,
            ProjectileKind::PlayerTorpedo => 8.0,
            ProjectileKind::HostileTorpedo => -8.0,
        }
    }

    pub fn spins(&self) -> bool {
        matches!(self, ProjectileKind::Cabbage | ProjectileKind::Turnip)
    }

    /// Initial facing in degrees
    pub fn heading(&self) -> f64 {
        match self {
            ProjectileKind::HostileTorpedo => 180.0,
            _ => 0.0,
        }
    }

    pub fn fire_cue(&self) -> SoundCue {
        match self {
            ProjectileKind::Cabbage => SoundCue::PlayerShoot,
            ProjectileKind::Turnip => SoundCue::HostileShoot,
            ProjectileKind::PlayerTorpedo | ProjectileKind::HostileTorpedo => SoundCue::Torpedo,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusKind {
    /// +10 hit points, capped at the player's maximum
    Repair,
    ExtraLife,
    /// +5 torpedoes
    TorpedoPack,
}

/// Identity tag used by the damage tables and eligibility gates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    Player,
    Cabbage,
    Turnip,
    PlayerTorpedo,
    HostileTorpedo,
    Hostile(HostileKind),
    Bonus(BonusKind),
    Star,
    Explosion,
}

impl Tag {
    pub fn is_hostile_craft(&self) -> bool {
        matches!(self, Tag::Hostile(_))
    }
}

impl From<ProjectileKind> for Tag {
    fn from(kind: ProjectileKind) -> Self {
        match kind {
            ProjectileKind::Cabbage => Tag::Cabbage,
            ProjectileKind::Turnip => Tag::Turnip,
            ProjectileKind::PlayerTorpedo => Tag::PlayerTorpedo,
            ProjectileKind::HostileTorpedo => Tag::HostileTorpedo,
        }
    }
}

/// Hostile travel heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    UpLeft,
    DownLeft,
    DueLeft,
}

impl Heading {
    /// Map a roll in [0, 2] to a heading
    pub fn from_roll(roll: i32) -> Self {
        match roll {
            0 => Heading::UpLeft,
            1 => Heading::DownLeft,
            _ => Heading::DueLeft,
        }
    }

    /// Per-tick displacement at the given speed
    pub fn velocity(&self, speed: f64) -> DVec2 {
        match self {
            Heading::UpLeft => DVec2::new(-speed, speed),
            Heading::DownLeft => DVec2::new(-speed, -speed),
            Heading::DueLeft => DVec2::new(-speed, 0.0),
        }
    }
}

/// Hostile craft state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hostile {
    pub kind: HostileKind,
    pub hit_points: f64,
    pub speed: f64,
    pub heading: Heading,
    /// Ticks left on the current heading; `None` once the craft no longer
    /// follows a plan (heavy variant holding due-left)
    pub plan: Option<u32>,
}

impl Hostile {
    pub fn new(kind: HostileKind, level: u32) -> Self {
        Self {
            kind,
            hit_points: scaled_hit_points(kind.base_hit_points(), level),
            speed: kind.speed(),
            heading: Heading::DownLeft,
            plan: Some(0),
        }
    }

    pub fn plan_exhausted(&self) -> bool {
        self.plan == Some(0)
    }

    /// Count down the travel plan after a move
    pub fn advance_plan(&mut self) {
        if let Some(ticks) = self.plan.as_mut() {
            *ticks = ticks.saturating_sub(1);
        }
    }

    /// Medium-variant charge: due-left across the whole screen, fast
    pub fn start_charge(&mut self) {
        self.heading = Heading::DueLeft;
        self.plan = Some(VIEW_WIDTH as u32);
        self.speed = CHARGE_SPEED;
    }
}

/// The player craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub sprite: Sprite,
    pub alive: bool,
    pub hit_points: f64,
    /// Rapid-fire charge, 0..=30
    pub cabbage_charge: u32,
    pub torpedoes: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            sprite: Sprite::new(PLAYER_START_X, PLAYER_START_Y, 0.0, 1.0, LAYER_PLAYER),
            alive: true,
            hit_points: PLAYER_MAX_HIT_POINTS,
            cabbage_charge: CABBAGE_CHARGE_MAX,
            torpedoes: 0,
        }
    }

    pub fn die(&mut self) {
        self.alive = false;
    }

    /// Move by a delta, discarding the move if it would leave the screen
    pub fn try_move(&mut self, dx: f64, dy: f64) -> bool {
        let (x, y) = (self.sprite.x() + dx, self.sprite.y() + dy);
        if crate::in_bounds(x, y) {
            self.sprite.move_to(x, y);
            true
        } else {
            false
        }
    }

    /// Spend charge on a rapid-fire shot; false (and no change) if short
    pub fn fire_cabbage(&mut self) -> bool {
        if self.cabbage_charge >= CABBAGE_SHOT_COST {
            self.cabbage_charge -= CABBAGE_SHOT_COST;
            true
        } else {
            false
        }
    }

    pub fn fire_torpedo(&mut self) -> bool {
        if self.torpedoes > 0 {
            self.torpedoes -= 1;
            true
        } else {
            false
        }
    }

    pub fn regenerate(&mut self) {
        if self.cabbage_charge < CABBAGE_CHARGE_MAX {
            self.cabbage_charge += 1;
        }
    }

    pub fn repair(&mut self, amount: f64) {
        self.hit_points = (self.hit_points + amount).min(PLAYER_MAX_HIT_POINTS);
    }

    pub fn add_torpedoes(&mut self, count: u32) {
        self.torpedoes += count;
    }

    /// Where this craft's shots appear
    pub fn muzzle(&self) -> DVec2 {
        self.sprite.pos + DVec2::new(PLAYER_MUZZLE_OFFSET, 0.0)
    }

    pub fn health_percent(&self) -> f64 {
        self.hit_points / PLAYER_MAX_HIT_POINTS * 100.0
    }

    pub fn charge_percent(&self) -> f64 {
        self.cabbage_charge as f64 / CABBAGE_CHARGE_MAX as f64 * 100.0
    }
}

/// Variant-specific state of a non-player entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EntityKind {
    Star,
    Explosion { ticks_left: u8 },
    Projectile(ProjectileKind),
    Hostile(Hostile),
    Bonus(BonusKind),
}

/// A simulated object in the world's collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub sprite: Sprite,
    pub kind: EntityKind,
    alive: bool,
}

impl Entity {
    fn new(id: EntityId, sprite: Sprite, kind: EntityKind) -> Self {
        Self {
            id,
            sprite,
            kind,
            alive: true,
        }
    }

    pub fn star(id: EntityId, x: f64, y: f64, scale: f64) -> Self {
        Self::new(id, Sprite::new(x, y, 0.0, scale, LAYER_STARS), EntityKind::Star)
    }

    pub fn explosion(id: EntityId, pos: DVec2) -> Self {
        Self::new(
            id,
            Sprite::new(pos.x, pos.y, 0.0, 1.0, LAYER_ACTORS),
            EntityKind::Explosion {
                ticks_left: EXPLOSION_TICKS,
            },
        )
    }

    pub fn projectile(id: EntityId, kind: ProjectileKind, pos: DVec2) -> Self {
        Self::new(
            id,
            Sprite::new(pos.x, pos.y, kind.heading(), SMALL_SCALE, LAYER_ACTORS),
            EntityKind::Projectile(kind),
        )
    }

    pub fn hostile(id: EntityId, kind: HostileKind, pos: DVec2, level: u32) -> Self {
        Self::new(
            id,
            Sprite::new(pos.x, pos.y, 0.0, HOSTILE_SCALE, LAYER_ACTORS),
            EntityKind::Hostile(Hostile::new(kind, level)),
        )
    }

    pub fn bonus(id: EntityId, kind: BonusKind, pos: DVec2) -> Self {
        Self::new(
            id,
            Sprite::new(pos.x, pos.y, 0.0, SMALL_SCALE, LAYER_ACTORS),
            EntityKind::Bonus(kind),
        )
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// One-way: a dead entity never comes back
    #[inline]
    pub fn die(&mut self) {
        self.alive = false;
    }

    pub fn tag(&self) -> Tag {
        match &self.kind {
            EntityKind::Star => Tag::Star,
            EntityKind::Explosion { .. } => Tag::Explosion,
            EntityKind::Projectile(kind) => Tag::from(*kind),
            EntityKind::Hostile(hostile) => Tag::Hostile(hostile.kind),
            EntityKind::Bonus(kind) => Tag::Bonus(*kind),
        }
    }

    pub fn is_hostile(&self) -> bool {
        matches!(self.kind, EntityKind::Hostile(_))
    }

    pub fn as_hostile(&self) -> Option<&Hostile> {
        match &self.kind {
            EntityKind::Hostile(hostile) => Some(hostile),
            _ => None,
        }
    }

    pub fn as_hostile_mut(&mut self) -> Option<&mut Hostile> {
        match &mut self.kind {
            EntityKind::Hostile(hostile) => Some(hostile),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hostile_hit_points_scale_with_level() {
        assert!((scaled_hit_points(5.0, 3) - 6.0).abs() < 1e-9);
        assert!((scaled_hit_points(5.0, 1) - 5.0).abs() < 1e-9);
        let heavy = Hostile::new(HostileKind::Heavy, 2);
        assert!((heavy.hit_points - 11.0).abs() < 1e-9);
        assert_eq!(heavy.speed, 1.75);
    }

    #[test]
    fn test_cabbage_charge_thresholds() {
        let mut player = Player::new();
        player.cabbage_charge = 4;
        assert!(!player.fire_cabbage());
        assert_eq!(player.cabbage_charge, 4);

        player.cabbage_charge = 5;
        assert!(player.fire_cabbage());
        assert_eq!(player.cabbage_charge, 0);
    }

    #[test]
    fn test_regenerate_caps_at_max() {
        let mut player = Player::new();
        assert_eq!(player.cabbage_charge, 30);
        player.regenerate();
        assert_eq!(player.cabbage_charge, 30);
        player.cabbage_charge = 29;
        player.regenerate();
        assert_eq!(player.cabbage_charge, 30);
    }

    #[test]
    fn test_torpedo_requires_stock() {
        let mut player = Player::new();
        assert!(!player.fire_torpedo());
        player.add_torpedoes(5);
        assert!(player.fire_torpedo());
        assert_eq!(player.torpedoes, 4);
    }

    #[test]
    fn test_out_of_bounds_move_is_discarded() {
        let mut player = Player::new();
        assert!(!player.try_move(-6.0, 0.0));
        assert_eq!(player.sprite.pos, DVec2::new(0.0, 128.0));
        assert!(player.try_move(6.0, 0.0));
        assert_eq!(player.sprite.pos, DVec2::new(6.0, 128.0));
    }

    #[test]
    fn test_charge_sets_due_left_fast() {
        let mut hostile = Hostile::new(HostileKind::Medium, 1);
        hostile.start_charge();
        assert_eq!(hostile.heading, Heading::DueLeft);
        assert_eq!(hostile.plan, Some(256));
        assert_eq!(hostile.speed, 5.0);
    }

    #[test]
    fn test_tags() {
        let torpedo = Entity::projectile(EntityId(1), ProjectileKind::HostileTorpedo, DVec2::ZERO);
        assert_eq!(torpedo.tag(), Tag::HostileTorpedo);
        assert_eq!(torpedo.sprite.heading, 180.0);
        let hostile = Entity::hostile(EntityId(2), HostileKind::Heavy, DVec2::ZERO, 1);
        assert!(hostile.tag().is_hostile_craft());
    }

    proptest! {
        #[test]
        fn prop_charge_stays_in_range(actions in proptest::collection::vec(any::<bool>(), 0..200)) {
            let mut player = Player::new();
            for fire in actions {
                if fire {
                    player.fire_cabbage();
                }
                player.regenerate();
                prop_assert!(player.cabbage_charge <= CABBAGE_CHARGE_MAX);
            }
        }

        #[test]
        fn prop_repair_never_exceeds_max(start in -20.0f64..50.0, amount in 0.0f64..500.0) {
            let mut player = Player::new();
            player.hit_points = start;
            player.repair(amount);
            prop_assert!(player.hit_points <= PLAYER_MAX_HIT_POINTS);
        }
    }
}
