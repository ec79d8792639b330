//! AI-controlled enemy craft
//!
//! Movement is a fixed strategy chosen at spawn; shooting is an independent
//! cooldown gated by distance to the player.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::KinematicBody;
use super::projectile::{Projectile, ShotKind};
use super::state::FrameCtx;
use crate::consts::*;
use crate::tuning::Tuning;

/// Movement strategy, fixed for the enemy's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementPattern {
    Straight,
    Zigzag,
    Circle,
}

impl MovementPattern {
    pub const ALL: [MovementPattern; 3] = [
        MovementPattern::Straight,
        MovementPattern::Zigzag,
        MovementPattern::Circle,
    ];

    /// Uniform pick among the three patterns
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Apply the pattern's steering for pattern-time `t` to `velocity`
    ///
    /// Components a pattern does not steer are left as they are.
    pub fn steer(&self, velocity: &mut Vec3, t: f32, speed: f32) {
        match self {
            MovementPattern::Straight => {
                velocity.z = speed;
            }
            MovementPattern::Zigzag => {
                velocity.z = speed;
                velocity.x = (t * 3.0).sin() * speed * 0.5;
            }
            MovementPattern::Circle => {
                velocity.x = t.cos() * speed * 0.3;
                velocity.z = t.sin() * speed * 0.3 + speed * 0.5;
            }
        }
    }

    /// Points awarded when destroyed
    pub fn score(&self) -> u32 {
        match self {
            MovementPattern::Straight => 100,
            MovementPattern::Zigzag => 150,
            MovementPattern::Circle => 200,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub body: KinematicBody,
    pub health: f32,
    pub max_health: f32,
    pub speed: f32,
    pub pattern: MovementPattern,
    /// Seconds since spawn, drives the pattern
    pub pattern_time: f32,
    /// Shots fired by this enemy; dropped with it
    pub projectiles: Vec<Projectile>,
    last_shot: Option<u64>,
}

impl Enemy {
    pub fn new(id: u32, position: Vec3, pattern: MovementPattern, tuning: &Tuning) -> Self {
        Self {
            id,
            body: KinematicBody::new(
                position,
                Vec3::new(0.0, 0.0, 2.0),
                Vec3::from_array(ENEMY_HALF_EXTENTS),
            ),
            health: tuning.enemy_max_health,
            max_health: tuning.enemy_max_health,
            speed: tuning.enemy_speed,
            pattern,
            pattern_time: 0.0,
            projectiles: Vec::new(),
            last_shot: None,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    /// Steer, move, advance our shots, then maybe fire at the player
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        ctx: &mut FrameCtx,
        dt: f32,
        player_pos: Vec3,
        tuning: &Tuning,
        rng: &mut R,
    ) {
        self.pattern_time += dt.max(0.0);
        self.pattern
            .steer(&mut self.body.velocity, self.pattern_time, self.speed);

        // Soft lateral bounce
        if self.body.position.x.abs() > ENEMY_BOUNCE_X {
            self.body.velocity.x *= -0.5;
        }

        self.body.integrate(dt);

        for projectile in &mut self.projectiles {
            projectile.update(dt);
        }

        self.try_fire(ctx, player_pos, tuning, rng);
    }

    /// Fire at the player if the cooldown has elapsed and they are in range
    pub fn try_fire<R: Rng + ?Sized>(
        &mut self,
        ctx: &mut FrameCtx,
        player_pos: Vec3,
        tuning: &Tuning,
        rng: &mut R,
    ) -> bool {
        if !self.cooled_down(ctx.now, tuning.enemy_shot_cooldown_ms) {
            return false;
        }
        let distance = self.body.distance_to(player_pos);
        if distance <= tuning.enemy_fire_range_min || distance >= tuning.enemy_fire_range_max {
            return false;
        }

        let mut direction = (player_pos - self.body.position).normalize_or_zero();
        let jitter = tuning.enemy_aim_jitter;
        if jitter > 0.0 {
            direction.x += rng.random_range(-jitter..=jitter);
            direction.y += rng.random_range(-jitter..=jitter);
        }
        let direction = direction.normalize_or(Vec3::Z);

        self.last_shot = Some(ctx.now);
        let muzzle = self.body.position + Vec3::NEG_Z * ENEMY_MUZZLE_OFFSET;
        let shot = ctx.spawn_projectile(
            ShotKind::Enemy,
            muzzle,
            direction * tuning.enemy_shot_speed,
        );
        self.projectiles.push(shot);
        true
    }

    fn cooled_down(&self, now: u64, cooldown_ms: u64) -> bool {
        match self.last_shot {
            None => true,
            Some(t) => now.saturating_sub(t) >= cooldown_ms,
        }
    }

    /// Apply damage; returns `true` only on the hit that kills
    pub fn take_damage(&mut self, amount: f32) -> bool {
        let was_alive = self.is_alive();
        self.health = (self.health - amount.max(0.0)).clamp(0.0, self.max_health);
        was_alive && !self.is_alive()
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Left the arena on the player's side or wandered off laterally
    pub fn is_out_of_bounds(&self) -> bool {
        let p = self.body.position;
        p.z > ENEMY_LIMIT_Z || p.x.abs() > ENEMY_LIMIT_X || p.y.abs() > ENEMY_LIMIT_Y
    }

    pub fn score_value(&self) -> u32 {
        self.pattern.score()
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
}
