//! World state: the entity arena, the player and level progression
//!
//! Entities live in an insertion-ordered `Vec` keyed by a monotonically
//! assigned `EntityId`. Nothing is removed mid-tick; dead entities are
//! compacted out by `remove_dead` at the end of the pass.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::entity::{BonusKind, Entity, EntityId, EntityKind, HostileKind, Player, ProjectileKind};
use crate::consts::*;
use crate::host::Host;

/// Outcome of a tick, reported to the host harness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickStatus {
    Continue,
    LevelFinished,
    PlayerDied,
}

/// Hostiles that must be destroyed to finish a level
#[inline]
pub fn level_target(level: u32) -> u32 {
    6 + 4 * level
}

/// Most hostiles allowed on screen at once, given progress so far
pub fn hostile_ceiling(level: u32, destroyed: u32) -> u32 {
    let remaining = level_target(level).saturating_sub(destroyed);
    let concurrent = (4.0 + 0.5 * level as f64).ceil() as u32 - 1;
    remaining.min(concurrent)
}

/// Spawn weights for light, medium and heavy hostiles
pub fn spawn_weights(level: u32) -> [i32; 3] {
    let level = level as i32;
    [60, 20 + 5 * level, 5 + 10 * level]
}

/// Pick a hostile kind from a draw in `[0, sum of weights)`
pub fn hostile_kind_for_draw(level: u32, draw: i32) -> HostileKind {
    let [light, medium, _] = spawn_weights(level);
    if draw < light {
        HostileKind::Light
    } else if draw < light + medium {
        HostileKind::Medium
    } else {
        HostileKind::Heavy
    }
}

/// Read-only summary of the world, for the demo and tests
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub stars: usize,
    pub explosions: usize,
    pub projectiles: usize,
    pub hostiles: usize,
    pub bonuses: usize,
    pub hostiles_live: u32,
    pub hostiles_destroyed: u32,
    pub player_hit_points: Option<f64>,
    pub cabbage_charge: u32,
    pub torpedoes: u32,
}

/// The simulated world
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    /// Live entities in activation order
    pub entities: Vec<Entity>,
    pub player: Option<Player>,
    /// Hostiles destroyed this level
    pub hostiles_destroyed: u32,
    /// Hostiles currently in the collection
    pub hostiles_live: u32,
    next_id: u32,
}

impl World {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Populate a fresh level: starfield and player, counters reset
    pub fn init(&mut self, host: &mut dyn Host) -> TickStatus {
        self.clean_up();
        self.hostiles_destroyed = 0;
        self.hostiles_live = 0;

        for _ in 0..INITIAL_STARS {
            let x = host.rand_int(0, VIEW_WIDTH as i32 - 1) as f64;
            let y = host.rand_int(0, VIEW_HEIGHT as i32 - 1) as f64;
            let scale = host.rand_real(STAR_MIN_SCALE, STAR_MAX_SCALE);
            let id = self.next_entity_id();
            self.entities.push(Entity::star(id, x, y, scale));
        }
        self.player = Some(Player::new());

        log::info!(
            "Level {} ready: {} hostiles to destroy",
            host.level(),
            level_target(host.level())
        );
        TickStatus::Continue
    }

    /// Release every entity and the player; safe to call repeatedly
    pub fn clean_up(&mut self) {
        if !self.entities.is_empty() || self.player.is_some() {
            log::debug!("Releasing {} entities", self.entities.len());
        }
        self.entities.clear();
        self.player = None;
        self.hostiles_live = 0;
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn player_alive(&self) -> bool {
        self.player.as_ref().is_some_and(|p| p.alive)
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Append an entity; it activates on the next tick
    pub fn spawn(&mut self, make: impl FnOnce(EntityId) -> Entity) -> EntityId {
        let id = self.next_entity_id();
        self.entities.push(make(id));
        id
    }

    pub fn add_explosion(&mut self, pos: DVec2) -> EntityId {
        self.spawn(|id| Entity::explosion(id, pos))
    }

    pub fn add_projectile(&mut self, kind: ProjectileKind, pos: DVec2) -> EntityId {
        self.spawn(|id| Entity::projectile(id, kind, pos))
    }

    pub fn add_bonus(&mut self, kind: BonusKind, pos: DVec2) -> EntityId {
        log::debug!("Dropped {:?} at ({:.1}, {:.1})", kind, pos.x, pos.y);
        self.spawn(|id| Entity::bonus(id, kind, pos))
    }

    pub fn add_hostile(&mut self, kind: HostileKind, pos: DVec2, level: u32) -> EntityId {
        self.hostiles_live += 1;
        self.spawn(|id| Entity::hostile(id, kind, pos, level))
    }

    /// New star at the right edge
    pub fn add_edge_star(&mut self, host: &mut dyn Host) -> EntityId {
        let y = host.rand_real(0.0, VIEW_HEIGHT - 1.0);
        let scale = host.rand_real(STAR_MIN_SCALE, STAR_MAX_SCALE);
        self.spawn(|id| Entity::star(id, VIEW_WIDTH - 1.0, y, scale))
    }

    pub fn level_complete(&self, level: u32) -> bool {
        self.hostiles_destroyed == level_target(level)
    }

    pub fn can_spawn_hostile(&self, level: u32) -> bool {
        self.hostiles_live < hostile_ceiling(level, self.hostiles_destroyed)
    }

    /// Roll a hostile kind by level weights and spawn it at the right edge
    pub fn spawn_hostile(&mut self, host: &mut dyn Host) -> EntityId {
        let level = host.level();
        let total: i32 = spawn_weights(level).iter().sum();
        let kind = hostile_kind_for_draw(level, host.rand_int(0, total - 1));
        let y = host.rand_real(0.0, VIEW_HEIGHT - 1.0);
        log::debug!("Spawning {:?} hostile at y={:.1}", kind, y);
        self.add_hostile(kind, DVec2::new(VIEW_WIDTH - 1.0, y), level)
    }

    /// Drop every dead entity, keeping the live-hostile count in step
    pub fn remove_dead(&mut self) {
        let dead_hostiles = self
            .entities
            .iter()
            .filter(|e| !e.is_alive() && e.is_hostile())
            .count() as u32;
        self.hostiles_live = self.hostiles_live.saturating_sub(dead_hostiles);
        self.entities.retain(|e| e.is_alive());
    }

    pub fn status_line(&self, host: &dyn Host) -> String {
        let (health, charge, torpedoes) = self
            .player
            .as_ref()
            .map(|p| (p.health_percent(), p.charge_percent(), p.torpedoes))
            .unwrap_or((0.0, 0.0, 0));
        format!(
            "Lives: {}  Health: {:.0}%  Score: {}  Level: {}  Cabbages: {:.0}%  Torpedoes: {}",
            host.lives(),
            health,
            host.score(),
            host.level(),
            charge,
            torpedoes
        )
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        let mut snap = WorldSnapshot {
            hostiles_live: self.hostiles_live,
            hostiles_destroyed: self.hostiles_destroyed,
            ..Default::default()
        };
        for entity in &self.entities {
            match entity.kind {
                EntityKind::Star => snap.stars += 1,
                EntityKind::Explosion { .. } => snap.explosions += 1,
                EntityKind::Projectile(_) => snap.projectiles += 1,
                EntityKind::Hostile(_) => snap.hostiles += 1,
                EntityKind::Bonus(_) => snap.bonuses += 1,
            }
        }
        if let Some(player) = &self.player {
            snap.player_hit_points = Some(player.hit_points);
            snap.cabbage_charge = player.cabbage_charge;
            snap.torpedoes = player.torpedoes;
        }
        snap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::ScriptedHost;

    #[test]
    fn test_spawn_weights_level_one() {
        assert_eq!(spawn_weights(1), [60, 25, 15]);
        assert_eq!(spawn_weights(1).iter().sum::<i32>(), 100);
        assert_eq!(hostile_kind_for_draw(1, 59), HostileKind::Light);
        assert_eq!(hostile_kind_for_draw(1, 60), HostileKind::Medium);
        assert_eq!(hostile_kind_for_draw(1, 84), HostileKind::Medium);
        assert_eq!(hostile_kind_for_draw(1, 85), HostileKind::Heavy);
        assert_eq!(hostile_kind_for_draw(1, 99), HostileKind::Heavy);
    }

    #[test]
    fn test_hostile_ceiling() {
        // Level 1: ceil(4.5) - 1 = 4 concurrent, 10 to destroy
        assert_eq!(hostile_ceiling(1, 0), 4);
        assert_eq!(hostile_ceiling(1, 8), 2);
        assert_eq!(hostile_ceiling(1, 10), 0);
        // Level 2: ceil(5.0) - 1 = 4
        assert_eq!(hostile_ceiling(2, 0), 4);
        // Level 3: ceil(5.5) - 1 = 5
        assert_eq!(hostile_ceiling(3, 0), 5);
    }

    #[test]
    fn test_level_complete_only_at_target() {
        let mut world = World::new();
        world.hostiles_destroyed = level_target(2) - 1;
        assert!(!world.level_complete(2));
        world.hostiles_destroyed = level_target(2);
        assert!(world.level_complete(2));
    }

    #[test]
    fn test_init_populates_stars_and_player() {
        let mut host = ScriptedHost::new(1);
        let mut world = World::new();
        assert_eq!(world.init(&mut host), TickStatus::Continue);
        let snap = world.snapshot();
        assert_eq!(snap.stars, INITIAL_STARS);
        assert_eq!(snap.player_hit_points, Some(50.0));
        assert_eq!(snap.cabbage_charge, 30);
        assert_eq!(snap.torpedoes, 0);
        assert!(world.entities.iter().all(|e| e.sprite.layer() == LAYER_STARS));
    }

    #[test]
    fn test_clean_up_is_idempotent_and_reinit_works() {
        let mut host = ScriptedHost::new(1);
        let mut world = World::new();
        world.init(&mut host);
        world.add_hostile(HostileKind::Light, DVec2::new(100.0, 100.0), 1);
        world.clean_up();
        world.clean_up();
        assert!(world.entities.is_empty());
        assert!(world.player().is_none());
        assert_eq!(world.hostiles_live, 0);

        world.init(&mut host);
        assert_eq!(world.entities.len(), INITIAL_STARS);
        assert!(world.player_alive());
    }

    #[test]
    fn test_remove_dead_updates_live_hostiles() {
        let mut world = World::new();
        let a = world.add_hostile(HostileKind::Light, DVec2::new(100.0, 100.0), 1);
        world.add_hostile(HostileKind::Heavy, DVec2::new(150.0, 100.0), 1);
        world.add_explosion(DVec2::new(10.0, 10.0));
        assert_eq!(world.hostiles_live, 2);

        for entity in world.entities.iter_mut() {
            if entity.id == a || !entity.is_hostile() {
                entity.die();
            }
        }
        world.remove_dead();
        assert_eq!(world.hostiles_live, 1);
        assert_eq!(world.entities.len(), 1);
        assert!(world.entity(a).is_none());
    }

    #[test]
    fn test_spawn_hostile_uses_weighted_draw() {
        let mut host = ScriptedHost::new(1).with_ints(&[60]);
        let mut world = World::new();
        let id = world.spawn_hostile(&mut host);
        assert_eq!(host.int_calls, vec![(0, 99)]);
        let hostile = world.entity(id).and_then(|e| e.as_hostile()).unwrap();
        assert_eq!(hostile.kind, HostileKind::Medium);
        assert_eq!(world.hostiles_live, 1);
        assert_eq!(world.entity(id).unwrap().sprite.x(), 255.0);
    }

    #[test]
    fn test_status_line_layout() {
        let mut host = ScriptedHost::new(2);
        host.score = 1250;
        let mut world = World::new();
        world.init(&mut host);
        if let Some(player) = world.player.as_mut() {
            player.hit_points = 25.0;
            player.cabbage_charge = 15;
            player.torpedoes = 3;
        }
        assert_eq!(
            world.status_line(&host),
            "Lives: 3  Health: 50%  Score: 1250  Level: 2  Cabbages: 50%  Torpedoes: 3"
        );
    }
}
