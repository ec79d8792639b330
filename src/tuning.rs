//! Data-driven game balance
//!
//! Every field defaults to the stock balance, and `#[serde(default)]` lets a
//! JSON file override just the knobs it names.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Balance knobs for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_max_health: f32,
    pub player_max_energy: f32,
    /// Energy regained per second
    pub energy_regen_per_sec: f32,
    /// Base movement speed (intent step is 30% of this)
    pub player_speed: f32,
    /// Multiplicative velocity damping applied every frame
    pub player_friction: f32,
    pub player_shot_cooldown_ms: u64,

    // === Enemies ===
    pub enemy_max_health: f32,
    pub enemy_speed: f32,
    pub enemy_shot_cooldown_ms: u64,
    pub enemy_shot_speed: f32,
    /// Enemies only fire while the player is strictly between these distances
    pub enemy_fire_range_min: f32,
    pub enemy_fire_range_max: f32,
    /// Uniform aim error added to x and y of the fire direction (±)
    pub enemy_aim_jitter: f32,

    // === Spawner ===
    pub spawn_interval_start_ms: f32,
    pub spawn_interval_floor_ms: f32,
    /// Interval reduction per elapsed game-second
    pub spawn_ramp_ms_per_sec: f32,

    // === Ramming ===
    pub contact_radius: f32,
    pub contact_damage_to_player: f32,
    pub contact_damage_to_enemy: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_max_health: 100.0,
            player_max_energy: 100.0,
            energy_regen_per_sec: 10.0,
            player_speed: 8.0,
            player_friction: 0.92,
            player_shot_cooldown_ms: 150,

            enemy_max_health: 50.0,
            enemy_speed: 3.0,
            enemy_shot_cooldown_ms: 1000,
            enemy_shot_speed: 30.0,
            enemy_fire_range_min: 20.0,
            enemy_fire_range_max: 150.0,
            enemy_aim_jitter: 0.15,

            spawn_interval_start_ms: 2000.0,
            spawn_interval_floor_ms: 500.0,
            spawn_ramp_ms_per_sec: 10.0,

            contact_radius: 8.0,
            contact_damage_to_player: 50.0,
            contact_damage_to_enemy: 100.0,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json).map_err(TuningError::Parse)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref()).map_err(TuningError::Io)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Like [`Tuning::load`], but falls back to defaults with a warning
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!(
                    "Using default tuning ({}: {})",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        serde_json::to_string_pretty(self).map_err(TuningError::Parse)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("player_max_health", self.player_max_health)?;
        positive("player_max_energy", self.player_max_energy)?;
        positive("enemy_max_health", self.enemy_max_health)?;
        non_negative("energy_regen_per_sec", self.energy_regen_per_sec)?;
        non_negative("player_speed", self.player_speed)?;
        non_negative("enemy_speed", self.enemy_speed)?;
        non_negative("enemy_shot_speed", self.enemy_shot_speed)?;
        non_negative("enemy_aim_jitter", self.enemy_aim_jitter)?;
        non_negative("contact_radius", self.contact_radius)?;
        non_negative("contact_damage_to_player", self.contact_damage_to_player)?;
        non_negative("contact_damage_to_enemy", self.contact_damage_to_enemy)?;
        non_negative("spawn_ramp_ms_per_sec", self.spawn_ramp_ms_per_sec)?;
        positive("spawn_interval_floor_ms", self.spawn_interval_floor_ms)?;

        if !(0.0..=1.0).contains(&self.player_friction) {
            return Err(TuningError::Invalid {
                field: "player_friction",
                reason: "must be within 0.0..=1.0",
            });
        }
        if self.enemy_fire_range_min > self.enemy_fire_range_max {
            return Err(TuningError::Invalid {
                field: "enemy_fire_range_min",
                reason: "must not exceed enemy_fire_range_max",
            });
        }
        if self.spawn_interval_floor_ms > self.spawn_interval_start_ms {
            return Err(TuningError::Invalid {
                field: "spawn_interval_floor_ms",
                reason: "must not exceed spawn_interval_start_ms",
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: "must be a positive finite number",
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: "must be a non-negative finite number",
        })
    }
}

/// Failure to obtain a usable [`Tuning`]
#[derive(Debug)]
pub enum TuningError {
    /// The file could not be read
    Io(std::io::Error),
    /// The document is not valid tuning JSON
    Parse(serde_json::Error),
    /// A value is outside its safe range
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot read tuning file: {e}"),
            Self::Parse(e) => write!(f, "malformed tuning JSON: {e}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid { .. } => None,
        }
    }
}
