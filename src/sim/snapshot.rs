//! Read-only views handed to the UI and render collaborators each tick

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::ability::AbilityKind;
use super::events::EntityKind;
use super::state::GameState;

/// Per-ability HUD entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbilityStatus {
    pub ability: AbilityKind,
    /// Off cooldown and affordable right now
    pub available: bool,
    pub cooldown_remaining_ms: u64,
    pub cooldown_total_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub score: u64,
    pub health: f32,
    pub max_health: f32,
    pub energy: f32,
    pub max_energy: f32,
    /// In hotbar order
    pub abilities: Vec<AbilityStatus>,
}

impl HudSnapshot {
    pub fn capture(state: &GameState, now: u64) -> Self {
        let player = &state.player;
        let abilities = AbilityKind::ALL
            .iter()
            .map(|&ability| AbilityStatus {
                ability,
                available: player.can_use_skill(ability, now),
                cooldown_remaining_ms: player.skill_cooldown_remaining(ability, now),
                cooldown_total_ms: ability.cooldown_ms(),
            })
            .collect();

        Self {
            score: state.score,
            health: player.health,
            max_health: player.max_health,
            energy: player.energy,
            max_energy: player.max_energy,
            abilities,
        }
    }
}

/// One entity as a renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: u32,
    pub kind: EntityKind,
    pub position: Vec3,
    /// 1.0 for entities without health
    pub health_fraction: f32,
}

/// Everything alive this tick, for mesh reconciliation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub player: EntityView,
    pub enemies: Vec<EntityView>,
    pub projectiles: Vec<EntityView>,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;

        let enemies = state
            .enemies
            .iter()
            .map(|e| EntityView {
                id: e.id,
                kind: EntityKind::Enemy(e.pattern),
                position: e.position(),
                health_fraction: e.health / e.max_health,
            })
            .collect();

        let projectiles = player
            .projectiles
            .iter()
            .chain(state.enemies.iter().flat_map(|e| e.projectiles.iter()))
            .map(|p| EntityView {
                id: p.id,
                kind: EntityKind::Projectile(p.kind),
                position: p.position(),
                health_fraction: 1.0,
            })
            .collect();

        Self {
            player: EntityView {
                id: player.id,
                kind: EntityKind::Player,
                position: player.position(),
                health_fraction: player.health / player.max_health,
            },
            enemies,
            projectiles,
        }
    }

    /// Every id in the snapshot, player first
    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        std::iter::once(self.player.id)
            .chain(self.enemies.iter().map(|e| e.id))
            .chain(self.projectiles.iter().map(|p| p.id))
    }
}
