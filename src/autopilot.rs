//! Demo autopilot
//!
//! Picks one key per tick for the player from the current world state, so the
//! demo binary can run a session unattended.

use crate::consts::*;
use crate::host::Key;
use crate::sim::{EntityKind, HostileKind, ProjectileKind, World};

/// Incoming shots closer than this (horizontally) are dodged
const DODGE_RANGE: f64 = 48.0;
/// Vertical half-width of the lane the player must clear to dodge
const DODGE_LANE: f64 = 10.0;

/// Choose the key the player should press this tick, if any
pub fn choose_key(world: &World) -> Option<Key> {
    let player = world.player().filter(|p| p.alive)?;
    let pos = player.sprite.pos;

    // Dodge the closest incoming shot in our lane
    let threat = world
        .entities
        .iter()
        .filter(|e| e.is_alive())
        .filter(|e| {
            matches!(
                e.kind,
                EntityKind::Projectile(ProjectileKind::Turnip | ProjectileKind::HostileTorpedo)
            )
        })
        .filter(|e| e.sprite.x() >= pos.x && e.sprite.x() - pos.x < DODGE_RANGE)
        .filter(|e| (e.sprite.y() - pos.y).abs() < DODGE_LANE)
        .min_by(|a, b| a.sprite.x().total_cmp(&b.sprite.x()));
    if let Some(shot) = threat {
        let up_clear = pos.y + PLAYER_MOVE_STEP < VIEW_HEIGHT;
        return if (shot.sprite.y() <= pos.y && up_clear) || pos.y - PLAYER_MOVE_STEP < 0.0 {
            Some(Key::Up)
        } else {
            Some(Key::Down)
        };
    }

    // Go for a pickup when no craft is close
    let hostile_near = world
        .entities
        .iter()
        .any(|e| e.is_alive() && e.is_hostile() && e.sprite.pos.distance(pos) < 64.0);
    let pickup = world
        .entities
        .iter()
        .filter(|e| e.is_alive() && matches!(e.kind, EntityKind::Bonus(_)))
        .min_by(|a, b| {
            a.sprite
                .pos
                .distance(pos)
                .total_cmp(&b.sprite.pos.distance(pos))
        });
    if let (Some(bonus), false) = (pickup, hostile_near) {
        return steer_toward(pos.x, pos.y, bonus.sprite.x(), bonus.sprite.y());
    }

    // Line up with the nearest hostile ahead and shoot
    let target = world
        .entities
        .iter()
        .filter(|e| e.is_alive() && e.sprite.x() > pos.x)
        .filter_map(|e| e.as_hostile().map(|h| (e, h.kind)))
        .min_by(|(a, _), (b, _)| a.sprite.x().total_cmp(&b.sprite.x()));
    let (craft, kind) = target?;
    let dy = craft.sprite.y() - pos.y;
    if dy.abs() <= HOSTILE_SIGHT_BAND {
        if kind == HostileKind::Heavy && player.torpedoes > 0 {
            Some(Key::Torpedo)
        } else if player.cabbage_charge >= CABBAGE_SHOT_COST {
            Some(Key::Fire)
        } else {
            None
        }
    } else if dy > 0.0 {
        Some(Key::Up)
    } else {
        Some(Key::Down)
    }
}

fn steer_toward(x: f64, y: f64, tx: f64, ty: f64) -> Option<Key> {
    let (dx, dy) = (tx - x, ty - y);
    if dx.abs() < PLAYER_MOVE_STEP && dy.abs() < PLAYER_MOVE_STEP {
        return None;
    }
    if dy.abs() >= dx.abs() {
        Some(if dy > 0.0 { Key::Up } else { Key::Down })
    } else {
        Some(if dx > 0.0 { Key::Right } else { Key::Left })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{BonusKind, Player};
    use glam::DVec2;

    fn world_with_player() -> World {
        let mut world = World::new();
        world.player = Some(Player::new());
        world
    }

    #[test]
    fn test_no_player_no_key() {
        assert_eq!(choose_key(&World::new()), None);
    }

    #[test]
    fn test_fires_when_lined_up() {
        let mut world = world_with_player();
        world.add_hostile(HostileKind::Light, DVec2::new(200.0, 130.0), 1);
        assert_eq!(choose_key(&world), Some(Key::Fire));
    }

    #[test]
    fn test_torpedo_for_heavy_when_stocked() {
        let mut world = world_with_player();
        world.player.as_mut().unwrap().torpedoes = 2;
        world.add_hostile(HostileKind::Heavy, DVec2::new(200.0, 128.0), 1);
        assert_eq!(choose_key(&world), Some(Key::Torpedo));
    }

    #[test]
    fn test_steers_toward_target_lane() {
        let mut world = world_with_player();
        world.add_hostile(HostileKind::Light, DVec2::new(200.0, 60.0), 1);
        assert_eq!(choose_key(&world), Some(Key::Down));
    }

    #[test]
    fn test_dodges_incoming_shot() {
        let mut world = world_with_player();
        world.add_hostile(HostileKind::Light, DVec2::new(200.0, 128.0), 1);
        world.add_projectile(ProjectileKind::Turnip, DVec2::new(20.0, 126.0));
        assert_eq!(choose_key(&world), Some(Key::Up));
    }

    #[test]
    fn test_collects_pickup_when_clear() {
        let mut world = world_with_player();
        world.add_bonus(BonusKind::Repair, DVec2::new(40.0, 128.0));
        assert_eq!(choose_key(&world), Some(Key::Right));
    }
}
