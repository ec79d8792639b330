//! Kinematic bodies and their collision volumes
//!
//! Every craft and projectile carries a position, a velocity and a fixed
//! half-extent. The axis-aligned box is rebuilt from those on demand, so it
//! always matches the current position.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Overlap test; boxes that merely touch count as intersecting
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// Position, velocity and collision half-extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KinematicBody {
    pub position: Vec3,
    pub velocity: Vec3,
    pub half_extents: Vec3,
}

impl KinematicBody {
    pub fn new(position: Vec3, velocity: Vec3, half_extents: Vec3) -> Self {
        Self {
            position,
            velocity,
            half_extents,
        }
    }

    /// `position += velocity * dt`; negative deltas are treated as zero
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.position += self.velocity * dt;
    }

    /// Current collision volume
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.position, self.half_extents)
    }

    #[inline]
    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.position.distance(point)
    }
}
