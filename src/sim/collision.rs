//! Collision detection and damage resolution
//!
//! Runs once per frame after everything has moved. Three independent passes,
//! all using axis-aligned box overlap (touching counts). There is no swept
//! test, so a fast shot can tunnel through a thin target in one frame.

use super::enemy::Enemy;
use super::events::{AudioCue, EntityKind, GameEvent};
use super::player::Player;
use super::projectile::{ShotKind, WeaponCategory};
use super::state::FrameCtx;
use crate::tuning::Tuning;

/// What the resolver did this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Player shots that connected
    pub enemy_hits: u32,
    /// Enemy shots that connected
    pub player_hits: u32,
    /// Enemy ramming contacts
    pub contacts: u32,
    /// Enemies whose health crossed to zero
    pub kills: u32,
    /// Score credited
    pub score_gained: u64,
}

/// Run all three passes; score is credited at the moment an enemy dies
pub fn resolve_collisions(
    player: &mut Player,
    enemies: &mut [Enemy],
    score: &mut u64,
    tuning: &Tuning,
    ctx: &mut FrameCtx,
) -> CollisionReport {
    let mut report = CollisionReport::default();
    player_shots_vs_enemies(player, enemies, ctx, &mut report);
    enemy_shots_vs_player(player, enemies, ctx, &mut report);
    rams_vs_player(player, enemies, tuning, ctx, &mut report);
    *score += report.score_gained;
    report
}

/// Pass 1: each player shot hits at most one live enemy, then is gone
fn player_shots_vs_enemies(
    player: &mut Player,
    enemies: &mut [Enemy],
    ctx: &mut FrameCtx,
    report: &mut CollisionReport,
) {
    let mut spent: Vec<(u32, ShotKind)> = Vec::new();

    for shot in &player.projectiles {
        let shot_box = shot.body.aabb();
        let Some(enemy) = enemies
            .iter_mut()
            .find(|e| e.is_alive() && e.body.aabb().intersects(&shot_box))
        else {
            continue;
        };

        spent.push((shot.id, shot.kind));
        report.enemy_hits += 1;

        let category = shot.kind.category();
        ctx.emit(GameEvent::Hit {
            position: shot.position(),
            category,
        });
        ctx.emit(GameEvent::Sound(AudioCue::Hit));
        if category.is_heavy() {
            ctx.emit(GameEvent::Sound(AudioCue::Explosion));
        }

        if enemy.take_damage(shot.damage) {
            credit_kill(enemy, category, ctx, report);
        }
    }

    retire_shots(spent, |id| player.remove_projectile(id), ctx);
}

/// Pass 2: enemy shots against the player
fn enemy_shots_vs_player(
    player: &mut Player,
    enemies: &mut [Enemy],
    ctx: &mut FrameCtx,
    report: &mut CollisionReport,
) {
    let player_box = player.body.aabb();

    for enemy in enemies.iter_mut() {
        let mut spent: Vec<(u32, ShotKind)> = Vec::new();
        for shot in &enemy.projectiles {
            if !shot.body.aabb().intersects(&player_box) {
                continue;
            }
            spent.push((shot.id, shot.kind));
            report.player_hits += 1;

            player.take_damage(shot.damage);
            ctx.emit(GameEvent::PlayerDamaged {
                amount: shot.damage,
                health: player.health,
            });
            ctx.emit(GameEvent::Hit {
                position: shot.position(),
                category: shot.kind.category(),
            });
            ctx.emit(GameEvent::Sound(AudioCue::Hit));
        }
        retire_shots(spent, |id| enemy.remove_projectile(id), ctx);
    }
}

/// Pass 3: ramming, applied even to enemies already killed this frame
fn rams_vs_player(
    player: &mut Player,
    enemies: &mut [Enemy],
    tuning: &Tuning,
    ctx: &mut FrameCtx,
    report: &mut CollisionReport,
) {
    let player_pos = player.position();

    for enemy in enemies.iter_mut() {
        if enemy.body.distance_to(player_pos) >= tuning.contact_radius {
            continue;
        }
        report.contacts += 1;

        player.take_damage(tuning.contact_damage_to_player);
        ctx.emit(GameEvent::PlayerDamaged {
            amount: tuning.contact_damage_to_player,
            health: player.health,
        });
        ctx.emit(GameEvent::DirectCollision {
            position: enemy.position(),
        });
        ctx.emit(GameEvent::Sound(AudioCue::Explosion));

        if enemy.take_damage(tuning.contact_damage_to_enemy) {
            credit_kill(enemy, WeaponCategory::Normal, ctx, report);
        }
    }
}

fn credit_kill(
    enemy: &Enemy,
    category: WeaponCategory,
    ctx: &mut FrameCtx,
    report: &mut CollisionReport,
) {
    let score = enemy.score_value();
    report.kills += 1;
    report.score_gained += u64::from(score);
    ctx.emit(GameEvent::EnemyDestroyed {
        id: enemy.id,
        position: enemy.position(),
        category,
        score,
    });
    ctx.emit(GameEvent::Sound(AudioCue::Explosion));
    log::debug!("Enemy {} destroyed (+{})", enemy.id, score);
}

/// Take spent shots out of their owner's list; only shots actually removed
/// are announced
fn retire_shots(
    spent: Vec<(u32, ShotKind)>,
    mut remove: impl FnMut(u32) -> bool,
    ctx: &mut FrameCtx,
) {
    for (id, kind) in spent {
        if remove(id) {
            ctx.emit(GameEvent::Removed {
                id,
                kind: EntityKind::Projectile(kind),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::deferred::DeferredQueue;
    use crate::sim::enemy::MovementPattern;
    use crate::sim::projectile::Projectile;
    use crate::sim::state::EntityIds;
    use glam::Vec3;

    struct World {
        player: Player,
        enemies: Vec<Enemy>,
        score: u64,
        ids: EntityIds,
        events: Vec<GameEvent>,
        deferred: DeferredQueue,
        tuning: Tuning,
    }

    impl World {
        fn new() -> Self {
            let tuning = Tuning::default();
            Self {
                player: Player::new(1, &tuning),
                enemies: Vec::new(),
                score: 0,
                ids: EntityIds::default(),
                events: Vec::new(),
                deferred: DeferredQueue::new(),
                tuning,
            }
        }

        fn enemy(&mut self, pos: Vec3, pattern: MovementPattern) -> usize {
            let id = 100 + self.enemies.len() as u32;
            self.enemies.push(Enemy::new(id, pos, pattern, &self.tuning));
            self.enemies.len() - 1
        }

        fn player_shot(&mut self, kind: ShotKind, pos: Vec3) {
            let id = 500 + self.player.projectiles.len() as u32;
            self.player
                .projectiles
                .push(Projectile::new(id, kind, pos, Vec3::NEG_Z));
        }

        fn resolve(&mut self) -> CollisionReport {
            let mut ctx = FrameCtx {
                now: 0,
                ids: &mut self.ids,
                events: &mut self.events,
                deferred: &mut self.deferred,
            };
            resolve_collisions(
                &mut self.player,
                &mut self.enemies,
                &mut self.score,
                &self.tuning,
                &mut ctx,
            )
        }
    }

    #[test]
    fn test_grazing_shot_counts_as_hit() {
        let mut w = World::new();
        let e = w.enemy(Vec3::new(0.0, 0.0, -50.0), MovementPattern::Straight);
        // Enemy front face at z = -46, shot half-extent 0.6
        w.player_shot(ShotKind::Cannon, Vec3::new(0.0, 0.0, -45.5));
        let report = w.resolve();
        assert_eq!(report.enemy_hits, 1);
        assert_eq!(w.enemies[e].health, 25.0);
        assert!(w.player.projectiles.is_empty());
    }

    #[test]
    fn test_gap_is_a_miss() {
        let mut w = World::new();
        w.enemy(Vec3::new(0.0, 0.0, -50.0), MovementPattern::Straight);
        w.player_shot(ShotKind::Cannon, Vec3::new(0.0, 0.0, -45.3));
        assert_eq!(w.resolve().enemy_hits, 0);
        assert_eq!(w.player.projectiles.len(), 1);
    }

    #[test]
    fn test_shot_hits_only_one_of_overlapping_enemies() {
        let mut w = World::new();
        let a = w.enemy(Vec3::new(0.0, 0.0, -50.0), MovementPattern::Straight);
        let b = w.enemy(Vec3::new(1.0, 0.0, -50.0), MovementPattern::Straight);
        w.player_shot(ShotKind::Cannon, Vec3::new(0.5, 0.0, -50.0));
        let report = w.resolve();
        assert_eq!(report.enemy_hits, 1);
        let total = w.enemies[a].health + w.enemies[b].health;
        assert_eq!(total, 75.0);
    }

    #[test]
    fn test_kill_credits_once_with_category() {
        let mut w = World::new();
        let e = w.enemy(Vec3::new(0.0, 0.0, -50.0), MovementPattern::Circle);
        w.player_shot(ShotKind::Missile, Vec3::new(0.0, 0.0, -50.0));
        w.player_shot(ShotKind::Cannon, Vec3::new(0.0, 0.0, -50.0));
        let report = w.resolve();

        assert_eq!(report.kills, 1);
        assert_eq!(w.score, 200);
        assert!(!w.enemies[e].is_alive());
        // The cannon shot found no live target and stays in flight
        assert_eq!(w.player.projectiles.len(), 1);

        let destroyed: Vec<_> = w
            .events
            .iter()
            .filter(|ev| matches!(ev, GameEvent::EnemyDestroyed { .. }))
            .collect();
        assert_eq!(destroyed.len(), 1);
        assert!(matches!(
            destroyed[0],
            GameEvent::EnemyDestroyed {
                category: WeaponCategory::Missile,
                score: 200,
                ..
            }
        ));

        // A second resolve must not credit again
        w.resolve();
        assert_eq!(w.score, 200);
    }

    #[test]
    fn test_enemy_shot_damages_player() {
        let mut w = World::new();
        let e = w.enemy(Vec3::new(0.0, 0.0, -50.0), MovementPattern::Straight);
        w.enemies[e]
            .projectiles
            .push(Projectile::new(900, ShotKind::Enemy, Vec3::new(0.0, 0.0, 1.0), Vec3::Z));
        let report = w.resolve();
        assert_eq!(report.player_hits, 1);
        assert_eq!(w.player.health, 90.0);
        assert!(w.enemies[e].projectiles.is_empty());
        let removed = GameEvent::Removed {
            id: 900,
            kind: EntityKind::Projectile(ShotKind::Enemy),
        };
        assert_eq!(w.events.iter().filter(|ev| **ev == removed).count(), 1);
    }

    #[test]
    fn test_spent_shot_leaves_owner_list_once() {
        let mut w = World::new();
        w.enemy(Vec3::new(0.0, 0.0, -50.0), MovementPattern::Straight);
        w.player_shot(ShotKind::Laser, Vec3::new(0.0, 0.0, -50.0));
        w.player_shot(ShotKind::Cannon, Vec3::new(0.0, 0.0, -10.0));
        w.resolve();

        assert_eq!(w.player.projectiles.len(), 1);
        assert_eq!(w.player.projectiles[0].kind, ShotKind::Cannon);
        // Already gone, so a second removal is a no-op
        assert!(!w.player.remove_projectile(500));
        let removals = w
            .events
            .iter()
            .filter(|ev| matches!(ev, GameEvent::Removed { .. }))
            .count();
        assert_eq!(removals, 1);
    }

    #[test]
    fn test_ramming_hurts_both() {
        let mut w = World::new();
        let e = w.enemy(Vec3::new(0.0, 0.0, -7.9), MovementPattern::Zigzag);
        let far = w.enemy(Vec3::new(0.0, 0.0, -8.0), MovementPattern::Zigzag);
        let report = w.resolve();
        assert_eq!(report.contacts, 1);
        assert_eq!(w.player.health, 50.0);
        assert!(!w.enemies[e].is_alive());
        assert!(w.enemies[far].is_alive());
        assert_eq!(w.score, 150);
        assert!(w
            .events
            .iter()
            .any(|ev| matches!(ev, GameEvent::DirectCollision { .. })));
    }

    #[test]
    fn test_ram_applies_after_projectile_kill() {
        let mut w = World::new();
        w.enemy(Vec3::new(0.0, 0.0, -5.0), MovementPattern::Straight);
        w.player_shot(ShotKind::Missile, Vec3::new(0.0, 0.0, -5.0));
        let report = w.resolve();
        assert_eq!(report.kills, 1);
        assert_eq!(report.contacts, 1);
        assert_eq!(w.player.health, 50.0);
        assert_eq!(w.score, 100);
    }
}
