//! Discrete notifications for the render, VFX and audio collaborators
//!
//! The simulation appends to a per-tick buffer; the host drains it after each
//! tick and maps events onto meshes, particle bursts and sound playback.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::ability::AbilityKind;
use super::enemy::MovementPattern;
use super::projectile::{ShotKind, WeaponCategory};

/// What an entity id refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Enemy(MovementPattern),
    Projectile(ShotKind),
}

/// Sound cues; the audio collaborator owns the actual synthesis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioCue {
    Shoot,
    Hit,
    Explosion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new entity needs a visual
    Spawned { id: u32, kind: EntityKind },
    /// An entity's visual should go away
    Removed { id: u32, kind: EntityKind },
    /// A projectile connected
    Hit {
        position: Vec3,
        category: WeaponCategory,
    },
    /// An enemy's health crossed to zero
    EnemyDestroyed {
        id: u32,
        position: Vec3,
        category: WeaponCategory,
        score: u32,
    },
    PlayerDamaged { amount: f32, health: f32 },
    /// An enemy rammed the player
    DirectCollision { position: Vec3 },
    AbilityActivated { ability: AbilityKind },
    GameOver { score: u64 },
    Sound(AudioCue),
}
