//! Player abilities
//!
//! A closed set of kinds, each carrying its cost and cooldown as data. The
//! effects themselves are applied by the player (see `Player::use_skill`).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityKind {
    /// Rapid weapon mode for a few seconds
    RapidFire,
    /// Five staggered high-damage shots
    LaserBeam,
    /// One heavy shot
    Missile,
    /// Instant heal
    Shield,
}

impl AbilityKind {
    pub const ALL: [AbilityKind; 4] = [
        AbilityKind::RapidFire,
        AbilityKind::LaserBeam,
        AbilityKind::Missile,
        AbilityKind::Shield,
    ];

    /// Energy drained on activation
    pub fn energy_cost(&self) -> f32 {
        match self {
            AbilityKind::RapidFire => 30.0,
            AbilityKind::LaserBeam => 50.0,
            AbilityKind::Missile => 40.0,
            AbilityKind::Shield => 60.0,
        }
    }

    pub fn cooldown_ms(&self) -> u64 {
        match self {
            AbilityKind::RapidFire => 5000,
            AbilityKind::LaserBeam => 8000,
            AbilityKind::Missile => 10000,
            AbilityKind::Shield => 15000,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AbilityKind::RapidFire => "rapidFire",
            AbilityKind::LaserBeam => "laserBeam",
            AbilityKind::Missile => "missile",
            AbilityKind::Shield => "shield",
        }
    }

    /// Look up by the collaborator-facing name; unknown names yield `None`
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    /// Hotbar slot (1-based, as bound to the number keys)
    pub fn from_slot(slot: u8) -> Option<Self> {
        match slot {
            1 => Some(AbilityKind::RapidFire),
            2 => Some(AbilityKind::LaserBeam),
            3 => Some(AbilityKind::Missile),
            4 => Some(AbilityKind::Shield),
            _ => None,
        }
    }

    pub fn slot(&self) -> u8 {
        match self {
            AbilityKind::RapidFire => 1,
            AbilityKind::LaserBeam => 2,
            AbilityKind::Missile => 3,
            AbilityKind::Shield => 4,
        }
    }

    fn index(&self) -> usize {
        self.slot() as usize - 1
    }
}

/// Per-ability cooldown bookkeeping
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AbilitySlot {
    /// `None` until first use, so a fresh session starts with everything ready
    pub last_used: Option<u64>,
}

impl AbilitySlot {
    pub fn cooldown_remaining(&self, kind: AbilityKind, now: u64) -> u64 {
        match self.last_used {
            None => 0,
            Some(t) => kind.cooldown_ms().saturating_sub(now.saturating_sub(t)),
        }
    }
}

/// Cooldown table for all four abilities
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AbilityBook {
    slots: [AbilitySlot; 4],
}

impl AbilityBook {
    pub fn slot(&self, kind: AbilityKind) -> &AbilitySlot {
        &self.slots[kind.index()]
    }

    pub fn stamp(&mut self, kind: AbilityKind, now: u64) {
        self.slots[kind.index()].last_used = Some(now);
    }

    pub fn cooldown_remaining(&self, kind: AbilityKind, now: u64) -> u64 {
        self.slot(kind).cooldown_remaining(kind, now)
    }

    pub fn reset(&mut self) {
        self.slots = Default::default();
    }
}
