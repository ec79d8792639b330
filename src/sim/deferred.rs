//! Time-delayed ability effects
//!
//! Staggered effects (laser sub-shots, rapid-fire expiry) are queued with a
//! due time and drained at the start of the player's update. Restart clears
//! the queue, so nothing from an old session can fire into a new one.

use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DeferredAction {
    /// Fire one laser sub-shot from the player's current position
    LaserShot { aim: Option<Vec3> },
    /// Drop the weapon back to normal mode
    EndRapidFire,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct Scheduled {
    due_ms: u64,
    action: DeferredAction,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeferredQueue {
    pending: Vec<Scheduled>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_ms: u64, action: DeferredAction) {
        self.pending.push(Scheduled { due_ms, action });
    }

    /// Remove and return every action due at or before `now`, earliest first
    pub fn drain_due(&mut self, now: u64) -> Vec<DeferredAction> {
        let mut due: Vec<Scheduled> = Vec::new();
        self.pending.retain(|s| {
            if s.due_ms <= now {
                due.push(*s);
                false
            } else {
                true
            }
        });
        // Stable sort keeps scheduling order for equal due times
        due.sort_by_key(|s| s.due_ms);
        due.into_iter().map(|s| s.action).collect()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_only_due_in_order() {
        let mut q = DeferredQueue::new();
        q.schedule(300, DeferredAction::EndRapidFire);
        q.schedule(100, DeferredAction::LaserShot { aim: None });
        q.schedule(200, DeferredAction::LaserShot { aim: Some(Vec3::X) });

        assert!(q.drain_due(50).is_empty());

        let due = q.drain_due(200);
        assert_eq!(
            due,
            vec![
                DeferredAction::LaserShot { aim: None },
                DeferredAction::LaserShot { aim: Some(Vec3::X) },
            ]
        );
        assert_eq!(q.len(), 1);

        q.clear();
        assert!(q.is_empty());
        assert!(q.drain_due(10_000).is_empty());
    }
}
