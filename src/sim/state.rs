//! Game state and core simulation types
//!
//! One [`GameState`] is one playthrough. It is mutated only by
//! [`super::tick::tick`] and rebuilt wholesale on restart.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::deferred::DeferredQueue;
use super::enemy::{Enemy, MovementPattern};
use super::events::{EntityKind, GameEvent};
use super::player::Player;
use super::projectile::{Projectile, ShotKind};
use super::spawner::Spawner;
use crate::tuning::Tuning;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Built but not started
    Ready,
    /// Ticking
    Running,
    /// Player destroyed; frozen until restart
    GameOver,
}

/// Session-unique entity id allocator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityIds {
    next: u32,
}

impl EntityIds {
    pub fn next_id(&mut self) -> u32 {
        self.next += 1;
        self.next
    }
}

/// Per-tick context threaded through every update
///
/// `now` is sampled once per tick; all cooldowns compare against it.
pub struct FrameCtx<'a> {
    pub now: u64,
    pub ids: &'a mut EntityIds,
    pub events: &'a mut Vec<GameEvent>,
    pub deferred: &'a mut DeferredQueue,
}

impl FrameCtx<'_> {
    #[inline]
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Allocate an id, announce it, and build the projectile
    pub fn spawn_projectile(&mut self, kind: ShotKind, position: Vec3, velocity: Vec3) -> Projectile {
        let id = self.ids.next_id();
        self.emit(GameEvent::Spawned {
            id,
            kind: EntityKind::Projectile(kind),
        });
        Projectile::new(id, kind, position, velocity)
    }
}

/// Complete state of one playthrough
#[derive(Debug, Clone)]
pub struct GameState {
    /// Base seed; restarts derive their stream from it
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    /// Clock reading at start()
    pub started_at: u64,
    /// Clock reading of the last tick
    pub last_tick: u64,
    pub ticks: u64,
    pub restarts: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub spawner: Spawner,
    /// Pending staggered ability effects
    pub deferred: DeferredQueue,
    /// Notifications since the last drain
    pub events: Vec<GameEvent>,
    /// Leading events left by the previous tick; the next tick drops them
    stale_events: usize,
    pub ids: EntityIds,
    pub rng: Pcg32,
}

impl GameState {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut ids = EntityIds::default();
        let player = Player::new(ids.next_id(), &tuning);
        let events = vec![GameEvent::Spawned {
            id: player.id,
            kind: EntityKind::Player,
        }];
        Self {
            seed,
            spawner: Spawner::new(0, &tuning),
            tuning,
            phase: GamePhase::Ready,
            score: 0,
            started_at: 0,
            last_tick: 0,
            ticks: 0,
            restarts: 0,
            player,
            enemies: Vec::new(),
            deferred: DeferredQueue::new(),
            events,
            stale_events: 0,
            ids,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Begin ticking; no-op unless the session is fresh
    pub fn start(&mut self, now: u64) -> bool {
        if self.phase != GamePhase::Ready {
            return false;
        }
        self.phase = GamePhase::Running;
        self.started_at = now;
        self.last_tick = now;
        self.spawner = Spawner::new(now, &self.tuning);
        log::info!("Session started (seed {}, restart #{})", self.seed, self.restarts);
        true
    }

    /// Tear everything down, rebuild from scratch and start again
    ///
    /// Pending deferred effects die with the old state; the host receives a
    /// `Removed` for every entity that was alive.
    pub fn restart(&mut self, now: u64) {
        let mut events = self.removal_events();
        let restarts = self.restarts + 1;
        let seed = self.seed;

        *self = GameState::new(seed, self.tuning.clone());
        self.restarts = restarts;
        self.rng = Pcg32::seed_from_u64(seed.wrapping_add(restarts));

        events.append(&mut self.events);
        self.events = events;
        self.start(now);
        log::info!("Session restarted");
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Milliseconds of play since start
    pub fn elapsed_ms(&self) -> u64 {
        self.last_tick.saturating_sub(self.started_at)
    }

    /// Place an enemy directly (the spawner uses this too)
    pub fn spawn_enemy(&mut self, position: Vec3, pattern: MovementPattern) -> u32 {
        let id = self.ids.next_id();
        self.events.push(GameEvent::Spawned {
            id,
            kind: EntityKind::Enemy(pattern),
        });
        self.enemies.push(Enemy::new(id, position, pattern, &self.tuning));
        log::debug!("Enemy {} spawned ({:?}) at {:?}", id, pattern, position);
        id
    }

    pub fn enemy(&self, id: u32) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn enemy_mut(&mut self, id: u32) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    /// Take everything emitted since the last drain
    ///
    /// Hosts drain after every tick. Whatever a tick leaves undrained is
    /// discarded when the next tick runs, so the buffer never holds more than
    /// one tick's worth plus any start/restart notifications since.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.stale_events = 0;
        std::mem::take(&mut self.events)
    }

    pub(crate) fn drop_stale_events(&mut self) {
        let stale = self.stale_events.min(self.events.len());
        self.events.drain(..stale);
        self.stale_events = 0;
    }

    pub(crate) fn mark_events_stale(&mut self) {
        self.stale_events = self.events.len();
    }

    fn removal_events(&self) -> Vec<GameEvent> {
        let mut out = vec![GameEvent::Removed {
            id: self.player.id,
            kind: EntityKind::Player,
        }];
        let shots = self
            .player
            .projectiles
            .iter()
            .chain(self.enemies.iter().flat_map(|e| e.projectiles.iter()));
        for shot in shots {
            out.push(GameEvent::Removed {
                id: shot.id,
                kind: EntityKind::Projectile(shot.kind),
            });
        }
        for enemy in &self.enemies {
            out.push(GameEvent::Removed {
                id: enemy.id,
                kind: EntityKind::Enemy(enemy.pattern),
            });
        }
        out
    }
}
