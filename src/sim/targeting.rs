//! Threat assessment for aiming helpers and the autopilot

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::GameState;

/// Range the crosshair considers by default
pub const DEFAULT_THREAT_RANGE: f32 = 200.0;

/// Floor for the hit-chance estimate (percent)
const MIN_HIT_CHANCE: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threat {
    pub enemy_id: u32,
    pub position: Vec3,
    pub distance: f32,
    /// Rough estimate in percent, falls off with distance
    pub hit_chance: f32,
}

/// `max(20, 100 - distance / 3)`
pub fn hit_chance(distance: f32) -> f32 {
    (100.0 - distance / 3.0).max(MIN_HIT_CHANCE)
}

/// Live enemies within `range` of the player, nearest first
pub fn threats(state: &GameState, range: f32) -> Vec<Threat> {
    let origin = state.player.position();
    let mut out: Vec<Threat> = state
        .enemies
        .iter()
        .filter(|e| e.is_alive())
        .filter_map(|e| {
            let distance = e.body.distance_to(origin);
            (distance <= range).then(|| Threat {
                enemy_id: e.id,
                position: e.position(),
                distance,
                hit_chance: hit_chance(distance),
            })
        })
        .collect();
    out.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    out
}

/// Nearest threat in the default range
pub fn primary_target(state: &GameState) -> Option<Threat> {
    threats(state, DEFAULT_THREAT_RANGE).into_iter().next()
}

/// Unit direction from `from` to `to`, usable as a tick's aim override
pub fn aim_at(from: Vec3, to: Vec3) -> Option<Vec3> {
    (to - from).try_normalize()
}
