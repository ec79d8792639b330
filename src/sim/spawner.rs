//! Timer-driven enemy spawning with a difficulty ramp
//!
//! The interval shrinks linearly with elapsed session time and is floored, so
//! waves get denser as the session goes on.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::enemy::MovementPattern;
use crate::consts::*;
use crate::tuning::Tuning;

/// Where and how to spawn the next enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnOrder {
    pub position: Vec3,
    pub pattern: MovementPattern,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    last_spawn_ms: u64,
    interval_ms: f32,
}

impl Spawner {
    pub fn new(now: u64, tuning: &Tuning) -> Self {
        Self {
            last_spawn_ms: now,
            interval_ms: tuning.spawn_interval_start_ms,
        }
    }

    /// Interval in effect after `elapsed_secs` of play
    pub fn interval_for(elapsed_secs: f32, tuning: &Tuning) -> f32 {
        (tuning.spawn_interval_start_ms - elapsed_secs.max(0.0) * tuning.spawn_ramp_ms_per_sec)
            .max(tuning.spawn_interval_floor_ms)
    }

    pub fn interval_ms(&self) -> f32 {
        self.interval_ms
    }

    /// Emit a spawn order if more than the current interval has passed
    pub fn poll<R: Rng + ?Sized>(
        &mut self,
        now: u64,
        session_start: u64,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Option<SpawnOrder> {
        if now.saturating_sub(self.last_spawn_ms) as f32 <= self.interval_ms {
            return None;
        }
        self.last_spawn_ms = now;

        let position = Vec3::new(
            rng.random_range(-SPAWN_HALF_WIDTH..SPAWN_HALF_WIDTH),
            rng.random_range(-SPAWN_HALF_HEIGHT..SPAWN_HALF_HEIGHT),
            SPAWN_Z,
        );
        let pattern = MovementPattern::random(rng);

        let elapsed_secs = now.saturating_sub(session_start) as f32 / 1000.0;
        self.interval_ms = Self::interval_for(elapsed_secs, tuning);

        Some(SpawnOrder { position, pattern })
    }
}
