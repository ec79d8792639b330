//! Star Skirmish - simulation core for a wave-based arcade space shooter
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (entities, AI, collisions, game state)
//! - `session`: Session control (start/restart/tick) over an injectable clock
//! - `platform`: Host abstractions (monotonic time)
//! - `tuning`: Data-driven game balance
//!
//! Meshes, audio playback, camera and DOM/UI widgets are collaborators that
//! consume [`sim::GameEvent`]s and snapshots; nothing here renders.

pub mod platform;
pub mod session;
pub mod sim;
pub mod tuning;

pub use platform::time::{Clock, ManualClock, SystemClock};
pub use session::Session;
pub use tuning::{Tuning, TuningError};

use glam::Vec3;

/// World constants that are not balance knobs
pub mod consts {
    /// Longest single integration step (seconds)
    pub const MAX_STEP_DT: f32 = 0.1;
    /// Maximum substeps per tick; longer stalls are truncated
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Player movement box (x, y, z half-ranges around the origin)
    pub const PLAYER_BOUND_X: f32 = 120.0;
    pub const PLAYER_BOUND_Y: f32 = 60.0;
    pub const PLAYER_BOUND_Z: f32 = 150.0;

    /// Enemies flip and halve their lateral velocity beyond this |x|
    pub const ENEMY_BOUNCE_X: f32 = 80.0;

    /// Enemy removal bounds (no reward)
    pub const ENEMY_LIMIT_Z: f32 = 200.0;
    pub const ENEMY_LIMIT_X: f32 = 200.0;
    pub const ENEMY_LIMIT_Y: f32 = 100.0;

    /// Projectile play volume
    pub const PROJECTILE_LIMIT_XY: f32 = 200.0;
    pub const PROJECTILE_LIMIT_Z: f32 = 1000.0;

    /// Collision half-extents per entity type
    pub const PLAYER_HALF_EXTENTS: [f32; 3] = [6.0, 1.5, 5.0];
    pub const ENEMY_HALF_EXTENTS: [f32; 3] = [4.0, 1.5, 4.0];
    pub const PROJECTILE_HALF_EXTENTS: [f32; 3] = [0.6, 0.6, 0.6];

    /// Spawn area for new enemies
    pub const SPAWN_HALF_WIDTH: f32 = 75.0;
    pub const SPAWN_HALF_HEIGHT: f32 = 25.0;
    pub const SPAWN_Z: f32 = -200.0;

    /// Projectile speeds
    pub const PLAYER_SHOT_SPEED: f32 = 50.0;
    pub const LASER_SHOT_SPEED: f32 = 80.0;
    pub const MISSILE_SHOT_SPEED: f32 = 60.0;

    /// Base damage per side
    pub const PLAYER_SHOT_DAMAGE: f32 = 25.0;
    pub const ENEMY_SHOT_DAMAGE: f32 = 10.0;
    pub const LASER_SHOT_DAMAGE: f32 = 50.0;
    pub const MISSILE_SHOT_DAMAGE: f32 = 100.0;

    /// Normal volley: two barrels at ±2 units
    pub const NORMAL_BARREL_OFFSET: f32 = 2.0;
    /// Rapid volley: four barrels spaced 1.5 units apart
    pub const RAPID_BARREL_COUNT: usize = 4;
    pub const RAPID_BARREL_SPACING: f32 = 1.5;
    /// How long rapid mode lasts after activation
    pub const RAPID_FIRE_DURATION_MS: u64 = 3000;

    /// Laser sub-shots and their spacing
    pub const LASER_SHOT_COUNT: u64 = 5;
    pub const LASER_SHOT_SPACING_MS: u64 = 100;

    /// Instant heal applied by the shield ability
    pub const SHIELD_HEAL: f32 = 50.0;

    /// Enemy shots spawn this far ahead of the hull
    pub const ENEMY_MUZZLE_OFFSET: f32 = 2.0;
}

/// Normalize `dir` and scale it to `speed`, falling back to straight ahead (-Z)
#[inline]
pub fn velocity_along(dir: Option<Vec3>, speed: f32) -> Vec3 {
    let dir = dir.map(Vec3::normalize_or_zero).unwrap_or(Vec3::ZERO);
    if dir == Vec3::ZERO {
        Vec3::NEG_Z * speed
    } else {
        dir * speed
    }
}

/// Split a millisecond delta into `(steps, dt)`: equal substeps of at most
/// `MAX_STEP_DT` seconds
///
/// Always at least one step. A clock that went backwards yields a zero `dt`;
/// anything beyond `MAX_SUBSTEPS` full steps is dropped.
pub fn frame_steps(prev_ms: u64, now_ms: u64) -> (u32, f32) {
    use consts::{MAX_STEP_DT, MAX_SUBSTEPS};

    let secs = (now_ms.saturating_sub(prev_ms) as f32 / 1000.0)
        .min(MAX_STEP_DT * MAX_SUBSTEPS as f32);
    let steps = ((secs / MAX_STEP_DT).ceil() as u32).clamp(1, MAX_SUBSTEPS);
    (steps, secs / steps as f32)
}
