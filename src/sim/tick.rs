//! Per-tick simulation pass
//!
//! One call to `tick` updates the player, then every entity that existed when
//! the pass started (in collection order), then compacts the dead and rolls
//! for new stars and hostiles.

use glam::DVec2;

use super::collision::sprites_collide;
use super::entity::{BonusKind, EntityKind, Heading, HostileKind, ProjectileKind, Tag};
use super::sprite::Sprite;
use super::state::{TickStatus, World};
use crate::audio::SoundCue;
use crate::consts::*;
use crate::host::{Host, Key};
use crate::in_bounds;

/// One-in-N chance per tick that a light or medium hostile with the player in
/// its sights fires (the medium charge roll uses the same odds)
pub fn hostile_fire_odds(level: u32) -> i32 {
    20 / level.max(1) as i32 + 5
}

/// One-in-N chance per tick that a heavy hostile fires a torpedo
pub fn heavy_fire_odds(level: u32) -> i32 {
    15 / level.max(1) as i32 + 10
}

/// Advance the world by one tick
pub fn tick(world: &mut World, host: &mut dyn Host) -> TickStatus {
    let level = host.level();
    // Entities appended during the pass activate next tick
    let active = world.entities.len();

    world.update_player(host);
    if !world.player_alive() {
        return TickStatus::PlayerDied;
    }
    if world.level_complete(level) {
        return TickStatus::LevelFinished;
    }

    for idx in 0..active {
        world.update_entity(idx, host);
        if !world.player_alive() {
            return TickStatus::PlayerDied;
        }
        if world.level_complete(level) {
            host.play_sound(SoundCue::LevelFinished);
            log::info!("Level {} finished", level);
            return TickStatus::LevelFinished;
        }
    }

    world.remove_dead();
    let status = world.status_line(host);
    host.set_status_text(&status);

    if host.rand_int(0, STAR_SPAWN_ODDS - 1) < 1 {
        world.add_edge_star(host);
    }
    if world.can_spawn_hostile(level) {
        world.spawn_hostile(host);
    }

    TickStatus::Continue
}

impl World {
    fn update_player(&mut self, host: &mut dyn Host) {
        let Some(player) = self.player.as_mut() else {
            return;
        };
        if !player.alive {
            return;
        }

        let mut shot = None;
        if let Some(key) = host.take_key() {
            match key {
                Key::Left => {
                    player.try_move(-PLAYER_MOVE_STEP, 0.0);
                }
                Key::Right => {
                    player.try_move(PLAYER_MOVE_STEP, 0.0);
                }
                Key::Up => {
                    player.try_move(0.0, PLAYER_MOVE_STEP);
                }
                Key::Down => {
                    player.try_move(0.0, -PLAYER_MOVE_STEP);
                }
                Key::Fire => {
                    if player.fire_cabbage() {
                        shot = Some(ProjectileKind::Cabbage);
                    }
                }
                Key::Torpedo => {
                    if player.fire_torpedo() {
                        shot = Some(ProjectileKind::PlayerTorpedo);
                    }
                }
            }
        }
        let muzzle = player.muzzle();
        player.regenerate();

        if let Some(kind) = shot {
            host.play_sound(kind.fire_cue());
            self.add_projectile(kind, muzzle);
        }
    }

    fn update_entity(&mut self, idx: usize, host: &mut dyn Host) {
        if !self.entities[idx].is_alive() {
            return;
        }
        match self.entities[idx].kind {
            EntityKind::Star => self.update_star(idx),
            EntityKind::Explosion { .. } => self.update_explosion(idx),
            EntityKind::Projectile(kind) => self.update_projectile(idx, kind, host),
            EntityKind::Hostile(_) => self.update_hostile(idx, host),
            EntityKind::Bonus(kind) => self.update_bonus(idx, kind, host),
        }
    }

    fn update_star(&mut self, idx: usize) {
        let star = &mut self.entities[idx];
        let (x, y) = (star.sprite.x() - 1.0, star.sprite.y());
        if in_bounds(x, y) {
            star.sprite.move_to(x, y);
        } else {
            star.die();
        }
    }

    fn update_explosion(&mut self, idx: usize) {
        let explosion = &mut self.entities[idx];
        explosion.sprite.scale *= EXPLOSION_GROWTH;
        let mut burnt_out = false;
        if let EntityKind::Explosion { ticks_left } = &mut explosion.kind {
            *ticks_left = ticks_left.saturating_sub(1);
            burnt_out = *ticks_left == 0;
        }
        if burnt_out {
            explosion.die();
        }
    }

    fn update_projectile(&mut self, idx: usize, kind: ProjectileKind, host: &mut dyn Host) {
        let x = self.entities[idx].sprite.x();
        if !(0.0..VIEW_WIDTH).contains(&x) {
            self.entities[idx].die();
            return;
        }

        if self.resolve_collision(idx, host) {
            self.entities[idx].die();
            return;
        }

        let sprite = &mut self.entities[idx].sprite;
        if kind.spins() {
            sprite.rotate(PROJECTILE_SPIN);
        }
        sprite.move_by(DVec2::new(kind.step(), 0.0));

        if self.resolve_collision(idx, host) {
            self.entities[idx].die();
        }
    }

    fn update_hostile(&mut self, idx: usize, host: &mut dyn Host) {
        let pos = self.entities[idx].sprite.pos;
        if pos.x < 0.0 {
            self.entities[idx].die();
            return;
        }

        if self.resolve_collision(idx, host) {
            self.damage_hostile(idx, Tag::Player, host);
            return;
        }

        let level = host.level();
        let top = VIEW_HEIGHT - 1.0;
        let Some(hostile) = self.entities[idx].as_hostile_mut() else {
            return;
        };
        let kind = hostile.kind;

        if hostile.plan_exhausted() || pos.y >= top || pos.y <= 0.0 {
            if pos.y >= top {
                hostile.heading = Heading::DownLeft;
            } else if pos.y <= 0.0 {
                hostile.heading = Heading::UpLeft;
            } else if kind == HostileKind::Heavy {
                hostile.heading = Heading::DueLeft;
                hostile.plan = None;
            } else {
                hostile.heading = Heading::from_roll(host.rand_int(0, 2));
            }
            if kind != HostileKind::Heavy {
                hostile.plan = Some(host.rand_int(1, HOSTILE_PLAN_MAX as i32) as u32);
            }
        }

        let in_sights = self.player.as_ref().is_some_and(|p| {
            p.sprite.x() < pos.x
                && p.sprite.y() >= pos.y - HOSTILE_SIGHT_BAND
                && p.sprite.y() <= pos.y + HOSTILE_SIGHT_BAND
        });
        if in_sights {
            if kind == HostileKind::Heavy {
                if host.rand_int(0, heavy_fire_odds(level) - 1) < 1 {
                    self.hostile_fire(ProjectileKind::HostileTorpedo, pos, host);
                    return;
                }
            } else {
                if host.rand_int(0, hostile_fire_odds(level) - 1) < 1 {
                    self.hostile_fire(ProjectileKind::Turnip, pos, host);
                    return;
                }
                if kind == HostileKind::Medium && host.rand_int(0, hostile_fire_odds(level) - 1) < 1 {
                    if let Some(hostile) = self.entities[idx].as_hostile_mut() {
                        hostile.start_charge();
                    }
                }
            }
        }

        let craft = &mut self.entities[idx];
        if let EntityKind::Hostile(hostile) = &mut craft.kind {
            craft.sprite.move_by(hostile.heading.velocity(hostile.speed));
            hostile.advance_plan();
        }

        if self.resolve_collision(idx, host) {
            self.damage_hostile(idx, Tag::Player, host);
        }
    }

    fn hostile_fire(&mut self, kind: ProjectileKind, from: DVec2, host: &mut dyn Host) {
        host.play_sound(kind.fire_cue());
        self.add_projectile(kind, from - DVec2::new(HOSTILE_MUZZLE_OFFSET, 0.0));
    }

    fn update_bonus(&mut self, idx: usize, kind: BonusKind, host: &mut dyn Host) {
        if !self.entities[idx].sprite.on_screen() {
            self.entities[idx].die();
            return;
        }

        if self.touches_player(&self.entities[idx].sprite) {
            self.collect_bonus(idx, kind, host);
            return;
        }

        self.entities[idx]
            .sprite
            .move_by(DVec2::new(-BONUS_DRIFT, -BONUS_DRIFT));

        if self.touches_player(&self.entities[idx].sprite) {
            self.collect_bonus(idx, kind, host);
        }
    }

    fn touches_player(&self, sprite: &Sprite) -> bool {
        self.player
            .as_ref()
            .is_some_and(|p| p.alive && sprites_collide(&p.sprite, sprite))
    }

    fn collect_bonus(&mut self, idx: usize, kind: BonusKind, host: &mut dyn Host) {
        host.increase_score(BONUS_SCORE);
        self.entities[idx].die();
        host.play_sound(SoundCue::BonusCollected);
        log::debug!("Collected {:?}", kind);

        match kind {
            BonusKind::Repair => {
                if let Some(player) = self.player.as_mut() {
                    player.repair(REPAIR_AMOUNT);
                }
            }
            BonusKind::ExtraLife => host.inc_lives(),
            BonusKind::TorpedoPack => {
                if let Some(player) = self.player.as_mut() {
                    player.add_torpedoes(TORPEDO_REFILL);
                }
            }
        }
    }
}
