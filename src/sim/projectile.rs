//! Straight-line munitions

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::body::KinematicBody;
use crate::consts::*;

/// Which side fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

/// What produced a projectile, tagged at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotKind {
    /// Regular player volley (normal or rapid mode)
    Cannon,
    /// Laser beam ability sub-shot
    Laser,
    /// Missile ability
    Missile,
    /// Fired by an enemy
    Enemy,
}

impl ShotKind {
    pub fn side(&self) -> Side {
        match self {
            ShotKind::Enemy => Side::Enemy,
            _ => Side::Player,
        }
    }

    pub fn base_damage(&self) -> f32 {
        match self {
            ShotKind::Cannon => PLAYER_SHOT_DAMAGE,
            ShotKind::Laser => LASER_SHOT_DAMAGE,
            ShotKind::Missile => MISSILE_SHOT_DAMAGE,
            ShotKind::Enemy => ENEMY_SHOT_DAMAGE,
        }
    }

    pub fn category(&self) -> WeaponCategory {
        match self {
            ShotKind::Missile => WeaponCategory::Missile,
            ShotKind::Laser => WeaponCategory::Laser,
            ShotKind::Cannon | ShotKind::Enemy => WeaponCategory::Normal,
        }
    }
}

/// Effect class a hit or kill is reported with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponCategory {
    Normal,
    Laser,
    Missile,
}

impl WeaponCategory {
    /// Classify by raw damage (>= 80 missile, >= 40 laser)
    #[deprecated(note = "use ShotKind::category; damage thresholds misclassify tuned shots")]
    pub fn from_damage(damage: f32) -> Self {
        if damage >= 80.0 {
            WeaponCategory::Missile
        } else if damage >= 40.0 {
            WeaponCategory::Laser
        } else {
            WeaponCategory::Normal
        }
    }

    /// Large effects get the explosion cue on impact
    pub fn is_heavy(&self) -> bool {
        matches!(self, WeaponCategory::Missile)
    }
}

/// A projectile in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub kind: ShotKind,
    pub damage: f32,
    pub body: KinematicBody,
}

impl Projectile {
    pub fn new(id: u32, kind: ShotKind, position: Vec3, velocity: Vec3) -> Self {
        Self {
            id,
            kind,
            damage: kind.base_damage(),
            body: KinematicBody::new(
                position,
                velocity,
                Vec3::from_array(PROJECTILE_HALF_EXTENTS),
            ),
        }
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.kind.side()
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    pub fn update(&mut self, dt: f32) {
        self.body.integrate(dt);
    }

    /// Left the play volume; the same box applies to both sides
    pub fn is_out_of_bounds(&self) -> bool {
        let p = self.body.position;
        p.x.abs() > PROJECTILE_LIMIT_XY
            || p.y.abs() > PROJECTILE_LIMIT_XY
            || p.z.abs() > PROJECTILE_LIMIT_Z
    }
}
