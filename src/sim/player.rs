//! The player's craft: movement, weapon, energy and abilities

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::ability::{AbilityBook, AbilityKind};
use super::body::KinematicBody;
use super::deferred::DeferredAction;
use super::events::{AudioCue, GameEvent};
use super::projectile::{Projectile, ShotKind};
use super::state::FrameCtx;
use crate::consts::*;
use crate::tuning::Tuning;
use crate::velocity_along;

/// Active firing pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeaponMode {
    /// Two barrels
    #[default]
    Normal,
    /// Four barrels, time-limited
    Rapid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub body: KinematicBody,
    pub health: f32,
    pub max_health: f32,
    pub energy: f32,
    pub max_energy: f32,
    /// Base movement speed
    pub speed: f32,
    pub weapon_mode: WeaponMode,
    /// Shots fired by the player, owned until hit or out of bounds
    pub projectiles: Vec<Projectile>,
    pub abilities: AbilityBook,
    friction: f32,
    energy_regen: f32,
    shot_cooldown_ms: u64,
    last_shot: Option<u64>,
}

impl Player {
    pub fn new(id: u32, tuning: &Tuning) -> Self {
        Self {
            id,
            body: KinematicBody::new(
                Vec3::ZERO,
                Vec3::ZERO,
                Vec3::from_array(PLAYER_HALF_EXTENTS),
            ),
            health: tuning.player_max_health,
            max_health: tuning.player_max_health,
            energy: tuning.player_max_energy,
            max_energy: tuning.player_max_energy,
            speed: tuning.player_speed,
            weapon_mode: WeaponMode::Normal,
            projectiles: Vec::new(),
            abilities: AbilityBook::default(),
            friction: tuning.player_friction,
            energy_regen: tuning.energy_regen_per_sec,
            shot_cooldown_ms: tuning.player_shot_cooldown_ms,
            last_shot: None,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    // === Movement intents ===

    pub fn move_left(&mut self) {
        let v = &mut self.body.velocity;
        v.x = (v.x - self.speed * 0.3).max(-self.speed * 1.5);
    }

    pub fn move_right(&mut self) {
        let v = &mut self.body.velocity;
        v.x = (v.x + self.speed * 0.3).min(self.speed * 1.5);
    }

    pub fn move_up(&mut self) {
        let v = &mut self.body.velocity;
        v.y = (v.y + self.speed * 0.3).min(self.speed * 1.2);
    }

    pub fn move_down(&mut self) {
        let v = &mut self.body.velocity;
        v.y = (v.y - self.speed * 0.3).max(-self.speed * 1.2);
    }

    /// Forward is toward -Z, where enemies come from
    pub fn move_forward(&mut self) {
        let v = &mut self.body.velocity;
        v.z = (v.z - self.speed * 0.3).max(-self.speed * 1.5);
    }

    pub fn move_backward(&mut self) {
        let v = &mut self.body.velocity;
        v.z = (v.z + self.speed * 0.3).min(self.speed * 1.2);
    }

    /// Per-frame update: due ability effects, motion, projectiles, energy, friction
    pub fn update(&mut self, ctx: &mut FrameCtx, dt: f32) {
        for action in ctx.deferred.drain_due(ctx.now) {
            match action {
                DeferredAction::LaserShot { aim } => {
                    let shot = ctx.spawn_projectile(
                        ShotKind::Laser,
                        self.body.position,
                        velocity_along(aim, LASER_SHOT_SPEED),
                    );
                    self.projectiles.push(shot);
                }
                DeferredAction::EndRapidFire => self.weapon_mode = WeaponMode::Normal,
            }
        }

        self.body.integrate(dt);
        let bound = Vec3::new(PLAYER_BOUND_X, PLAYER_BOUND_Y, PLAYER_BOUND_Z);
        self.body.position = self.body.position.clamp(-bound, bound);

        for projectile in &mut self.projectiles {
            projectile.update(dt);
        }

        self.energy = (self.energy + dt.max(0.0) * self.energy_regen).min(self.max_energy);
        self.body.velocity *= self.friction;
    }

    // === Weapon ===

    /// Fire a volley; returns `false` (and does nothing) while cooling down
    pub fn shoot(&mut self, ctx: &mut FrameCtx, aim: Option<Vec3>) -> bool {
        if let Some(last) = self.last_shot {
            if ctx.now.saturating_sub(last) < self.shot_cooldown_ms {
                return false;
            }
        }
        self.last_shot = Some(ctx.now);

        let velocity = velocity_along(aim, PLAYER_SHOT_SPEED);
        let origin = self.body.position;
        match self.weapon_mode {
            WeaponMode::Normal => {
                for offset in [-NORMAL_BARREL_OFFSET, NORMAL_BARREL_OFFSET] {
                    let shot = ctx.spawn_projectile(
                        ShotKind::Cannon,
                        origin + Vec3::X * offset,
                        velocity,
                    );
                    self.projectiles.push(shot);
                }
            }
            WeaponMode::Rapid => {
                for i in 0..RAPID_BARREL_COUNT {
                    let offset = (i as f32 - 1.5) * RAPID_BARREL_SPACING;
                    let shot = ctx.spawn_projectile(
                        ShotKind::Cannon,
                        origin + Vec3::X * offset,
                        velocity,
                    );
                    self.projectiles.push(shot);
                }
            }
        }
        ctx.emit(GameEvent::Sound(AudioCue::Shoot));
        true
    }

    /// Remove one of our projectiles by id; `false` if it is not ours
    pub fn remove_projectile(&mut self, id: u32) -> bool {
        match self.projectiles.iter().position(|p| p.id == id) {
            Some(index) => {
                self.projectiles.remove(index);
                true
            }
            None => false,
        }
    }

    // === Abilities ===

    pub fn skill_cooldown_remaining(&self, kind: AbilityKind, now: u64) -> u64 {
        self.abilities.cooldown_remaining(kind, now)
    }

    pub fn can_use_skill(&self, kind: AbilityKind, now: u64) -> bool {
        self.skill_cooldown_remaining(kind, now) == 0 && self.energy >= kind.energy_cost()
    }

    /// Activate by collaborator-facing name; unknown names are a no-op
    pub fn use_skill_named(&mut self, name: &str, ctx: &mut FrameCtx, aim: Option<Vec3>) -> bool {
        match AbilityKind::from_name(name) {
            Some(kind) => self.use_skill(kind, ctx, aim),
            None => false,
        }
    }

    /// Spend energy and trigger the ability; `false` if cooling down or short on energy
    pub fn use_skill(&mut self, kind: AbilityKind, ctx: &mut FrameCtx, aim: Option<Vec3>) -> bool {
        if !self.can_use_skill(kind, ctx.now) {
            return false;
        }
        self.abilities.stamp(kind, ctx.now);
        self.energy = (self.energy - kind.energy_cost()).max(0.0);

        match kind {
            AbilityKind::RapidFire => {
                self.weapon_mode = WeaponMode::Rapid;
                ctx.deferred
                    .schedule(ctx.now + RAPID_FIRE_DURATION_MS, DeferredAction::EndRapidFire);
            }
            AbilityKind::LaserBeam => {
                for i in 0..LASER_SHOT_COUNT {
                    ctx.deferred.schedule(
                        ctx.now + i * LASER_SHOT_SPACING_MS,
                        DeferredAction::LaserShot { aim },
                    );
                }
            }
            AbilityKind::Missile => {
                let shot = ctx.spawn_projectile(
                    ShotKind::Missile,
                    self.body.position,
                    velocity_along(aim, MISSILE_SHOT_SPEED),
                );
                self.projectiles.push(shot);
            }
            AbilityKind::Shield => self.heal(SHIELD_HEAL),
        }

        log::debug!("Ability {} activated at {} ms", kind.name(), ctx.now);
        ctx.emit(GameEvent::AbilityActivated { ability: kind });
        true
    }

    // === Health ===

    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount.max(0.0)).clamp(0.0, self.max_health);
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount.max(0.0)).clamp(0.0, self.max_health);
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::deferred::DeferredQueue;
    use crate::sim::state::EntityIds;

    struct Harness {
        ids: EntityIds,
        events: Vec<GameEvent>,
        deferred: DeferredQueue,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                ids: EntityIds::default(),
                events: Vec::new(),
                deferred: DeferredQueue::new(),
            }
        }

        fn ctx(&mut self, now: u64) -> FrameCtx<'_> {
            FrameCtx {
                now,
                ids: &mut self.ids,
                events: &mut self.events,
                deferred: &mut self.deferred,
            }
        }
    }

    fn player() -> Player {
        Player::new(0, &Tuning::default())
    }

    #[test]
    fn test_shoot_rate_limited() {
        let mut h = Harness::new();
        let mut p = player();
        assert!(p.shoot(&mut h.ctx(1000), None));
        assert_eq!(p.projectiles.len(), 2);
        assert!(!p.shoot(&mut h.ctx(1149), None));
        assert_eq!(p.projectiles.len(), 2);
        assert!(p.shoot(&mut h.ctx(1150), None));
        assert_eq!(p.projectiles.len(), 4);
    }

    #[test]
    fn test_normal_volley_offsets_and_aim() {
        let mut h = Harness::new();
        let mut p = player();
        p.shoot(&mut h.ctx(0), Some(Vec3::new(0.0, 1.0, 0.0)));
        let xs: Vec<f32> = p.projectiles.iter().map(|s| s.position().x).collect();
        assert_eq!(xs, vec![-2.0, 2.0]);
        for shot in &p.projectiles {
            assert!((shot.body.velocity - Vec3::new(0.0, 50.0, 0.0)).length() < 1e-4);
            assert_eq!(shot.damage, 25.0);
        }
        assert!(h.events.contains(&GameEvent::Sound(AudioCue::Shoot)));
    }

    #[test]
    fn test_rapid_fire_four_barrels_then_expires() {
        let mut h = Harness::new();
        let mut p = player();
        assert!(p.use_skill(AbilityKind::RapidFire, &mut h.ctx(0), None));
        assert_eq!(p.weapon_mode, WeaponMode::Rapid);
        assert_eq!(p.energy, 70.0);

        p.shoot(&mut h.ctx(0), None);
        let xs: Vec<f32> = p.projectiles.iter().map(|s| s.position().x).collect();
        assert_eq!(xs, vec![-2.25, -0.75, 0.75, 2.25]);

        p.update(&mut h.ctx(2999), 0.0);
        assert_eq!(p.weapon_mode, WeaponMode::Rapid);
        p.update(&mut h.ctx(3000), 0.0);
        assert_eq!(p.weapon_mode, WeaponMode::Normal);
    }

    #[test]
    fn test_laser_staggers_five_shots() {
        let mut h = Harness::new();
        let mut p = player();
        assert!(p.use_skill(AbilityKind::LaserBeam, &mut h.ctx(0), None));
        assert!(p.projectiles.is_empty());

        p.update(&mut h.ctx(0), 0.0);
        assert_eq!(p.projectiles.len(), 1);
        p.update(&mut h.ctx(250), 0.0);
        assert_eq!(p.projectiles.len(), 3);
        p.update(&mut h.ctx(400), 0.0);
        assert_eq!(p.projectiles.len(), 5);
        assert!(p.projectiles.iter().all(|s| s.kind == ShotKind::Laser && s.damage == 50.0));
        assert!(h.deferred.is_empty());
    }

    #[test]
    fn test_missile_single_heavy_shot() {
        let mut h = Harness::new();
        let mut p = player();
        assert!(p.use_skill(AbilityKind::Missile, &mut h.ctx(0), None));
        assert_eq!(p.projectiles.len(), 1);
        assert_eq!(p.projectiles[0].damage, 100.0);
        assert_eq!(p.projectiles[0].body.velocity, Vec3::new(0.0, 0.0, -60.0));
    }

    #[test]
    fn test_shield_heal_capped() {
        let mut h = Harness::new();
        let mut p = player();
        p.take_damage(30.0);
        assert!(p.use_skill(AbilityKind::Shield, &mut h.ctx(0), None));
        assert_eq!(p.health, 100.0);

        let mut p = player();
        p.take_damage(80.0);
        assert!(p.use_skill(AbilityKind::Shield, &mut h.ctx(0), None));
        assert_eq!(p.health, 70.0);
    }

    #[test]
    fn test_skill_gating() {
        let mut h = Harness::new();
        let mut p = player();
        assert!(p.can_use_skill(AbilityKind::Missile, 0));
        assert!(p.use_skill(AbilityKind::Missile, &mut h.ctx(0), None));
        assert!(!p.can_use_skill(AbilityKind::Missile, 0));
        assert_eq!(p.skill_cooldown_remaining(AbilityKind::Missile, 4000), 6000);
        assert!(!p.use_skill(AbilityKind::Missile, &mut h.ctx(4000), None));
        assert!(p.can_use_skill(AbilityKind::Missile, 10_000));

        // Not enough energy: 60 left, shield costs 60, laser costs 50
        assert!(p.use_skill(AbilityKind::LaserBeam, &mut h.ctx(0), None));
        assert_eq!(p.energy, 10.0);
        assert!(!p.use_skill(AbilityKind::Shield, &mut h.ctx(0), None));
        assert_eq!(p.energy, 10.0);

        assert!(!p.use_skill_named("warp", &mut h.ctx(0), None));
    }

    #[test]
    fn test_update_clamps_and_damps() {
        let mut h = Harness::new();
        let mut p = player();
        p.body.velocity = Vec3::new(10_000.0, -10_000.0, 0.0);
        p.update(&mut h.ctx(0), 0.1);
        assert_eq!(p.position().x, PLAYER_BOUND_X);
        assert_eq!(p.position().y, -PLAYER_BOUND_Y);
        assert!((p.body.velocity.x - 9200.0).abs() < 1e-2);
    }

    #[test]
    fn test_energy_regen_capped() {
        let mut h = Harness::new();
        let mut p = player();
        p.energy = 95.0;
        p.update(&mut h.ctx(0), 0.1);
        assert!((p.energy - 96.0).abs() < 1e-4);
        p.update(&mut h.ctx(0), 0.1);
        p.energy = 99.9;
        p.update(&mut h.ctx(0), 0.1);
        assert_eq!(p.energy, 100.0);
    }

    #[test]
    fn test_intent_caps() {
        let mut p = player();
        for _ in 0..20 {
            p.move_left();
            p.move_up();
            p.move_forward();
        }
        assert_eq!(p.body.velocity, Vec3::new(-12.0, 9.6, -12.0));
    }

    #[test]
    fn test_remove_missing_projectile_is_noop() {
        let mut p = player();
        assert!(!p.remove_projectile(42));
    }
}
