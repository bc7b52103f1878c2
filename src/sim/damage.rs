//! Damage, destruction and collision dispatch
//!
//! Every hit goes through `World::resolve_collision`: the player is tested
//! first, then the collection in order, and the first eligible target in
//! contact takes the damage. Eligibility is decided per craft by the tag of
//! the entity doing the hitting.

use glam::DVec2;

use super::collision::sprites_collide;
use super::entity::{BonusKind, DropTable, EntityKind, HostileKind, Tag};
use super::state::World;
use crate::audio::SoundCue;
use crate::host::Host;

/// Tags the player can be hit by
pub fn player_accepts(source: Tag) -> bool {
    matches!(source, Tag::Hostile(_) | Tag::Turnip | Tag::HostileTorpedo)
}

/// Tags a hostile craft can be hit by
pub fn hostile_accepts(source: Tag) -> bool {
    matches!(source, Tag::Player | Tag::Cabbage | Tag::PlayerTorpedo)
}

/// Hit points the player loses to a source
pub fn player_damage(source: Tag) -> f64 {
    match source {
        Tag::Turnip => 2.0,
        Tag::Hostile(HostileKind::Heavy) => 15.0,
        Tag::Hostile(_) => 5.0,
        Tag::HostileTorpedo => 8.0,
        _ => 0.0,
    }
}

/// Hit points a hostile loses to a source; player contact is handled as
/// outright destruction instead
pub fn hostile_damage(source: Tag) -> f64 {
    match source {
        Tag::Cabbage => 2.0,
        Tag::PlayerTorpedo => 8.0,
        _ => 0.0,
    }
}

impl World {
    /// Find the first craft the entity at `source_idx` is hitting and damage it.
    ///
    /// Returns true if something was hit. At most one target is damaged.
    pub fn resolve_collision(&mut self, source_idx: usize, host: &mut dyn Host) -> bool {
        let (tag, sprite) = {
            let source = &self.entities[source_idx];
            (source.tag(), source.sprite)
        };

        let hits_player = self
            .player
            .as_ref()
            .is_some_and(|p| p.alive && player_accepts(tag) && sprites_collide(&p.sprite, &sprite));
        if hits_player {
            self.damage_player(tag, host);
            return true;
        }

        if !hostile_accepts(tag) {
            return false;
        }
        let target = self.entities.iter().enumerate().position(|(idx, target)| {
            idx != source_idx
                && target.is_alive()
                && target.is_hostile()
                && sprites_collide(&target.sprite, &sprite)
        });
        match target {
            Some(idx) => {
                self.damage_hostile(idx, tag, host);
                true
            }
            None => false,
        }
    }

    /// Apply a hit from `source` to the player
    pub fn damage_player(&mut self, source: Tag, host: &mut dyn Host) {
        let Some(player) = self.player.as_mut() else {
            return;
        };
        if !player_accepts(source) {
            return;
        }
        player.hit_points -= player_damage(source);
        if player.hit_points <= 0.0 {
            player.die();
            host.dec_lives();
            log::info!("Player destroyed by {:?}", source);
        } else if !source.is_hostile_craft() {
            host.play_sound(SoundCue::PlayerImpact);
        }
    }

    /// Apply a hit from `source` to the hostile at `idx`.
    ///
    /// Contact with the player is always lethal, whatever hit points remain.
    pub fn damage_hostile(&mut self, idx: usize, source: Tag, host: &mut dyn Host) {
        let Some(hostile) = self.entities[idx].as_hostile_mut() else {
            return;
        };
        if !hostile_accepts(source) {
            return;
        }
        hostile.hit_points -= hostile_damage(source);
        if hostile.hit_points <= 0.0 || source == Tag::Player {
            self.destroy_hostile(idx, host);
        } else {
            host.play_sound(SoundCue::LightImpact);
        }
    }

    /// Kill the hostile at `idx` and hand out its rewards
    fn destroy_hostile(&mut self, idx: usize, host: &mut dyn Host) {
        let entity = &mut self.entities[idx];
        let EntityKind::Hostile(hostile) = &entity.kind else {
            return;
        };
        if !entity.is_alive() {
            return;
        }
        let kind = hostile.kind;
        let pos = entity.sprite.pos;
        entity.die();

        host.increase_score(kind.score());
        self.hostiles_destroyed += 1;
        host.play_sound(SoundCue::HostileDestroyed);
        self.add_explosion(pos);
        log::debug!(
            "{:?} hostile destroyed ({} this level)",
            kind,
            self.hostiles_destroyed
        );

        if let Some(table) = kind.drop_table() {
            self.roll_drop(table, pos, host);
        }
    }

    /// Maybe leave a bonus pickup where a hostile went down
    pub fn roll_drop(&mut self, table: DropTable, pos: DVec2, host: &mut dyn Host) {
        match table {
            DropTable::ExtraLife => {
                if host.rand_int(0, 5) < 1 {
                    self.add_bonus(BonusKind::ExtraLife, pos);
                }
            }
            DropTable::Supplies => {
                if host.rand_int(0, 2) < 1 {
                    let kind = if host.rand_int(0, 1) < 1 {
                        BonusKind::Repair
                    } else {
                        BonusKind::TorpedoPack
                    };
                    self.add_bonus(kind, pos);
                }
            }
        }
    }
}
