//! Session control over an injectable clock
//!
//! The host owns one [`Session`] and calls [`Session::update`] once per
//! presented frame. The clock is sampled exactly once per update and that
//! reading is the `now` every cooldown in the tick compares against.

use crate::platform::time::{Clock, SystemClock};
use crate::sim::{GameEvent, GameState, HudSnapshot, RenderSnapshot, TickInput, tick};
use crate::tuning::Tuning;

pub struct Session<C: Clock = SystemClock> {
    clock: C,
    state: GameState,
}

impl Session<SystemClock> {
    /// Wall-clock session, the usual choice for an interactive host
    pub fn with_system_clock(seed: u64, tuning: Tuning) -> Self {
        Self::new(SystemClock::new(), seed, tuning)
    }
}

impl<C: Clock> Session<C> {
    pub fn new(clock: C, seed: u64, tuning: Tuning) -> Self {
        Self {
            clock,
            state: GameState::new(seed, tuning),
        }
    }

    /// Begin play; `false` if already started
    pub fn start(&mut self) -> bool {
        let now = self.clock.now_ms();
        self.state.start(now)
    }

    /// Discard the current playthrough (pending ability effects included)
    /// and start a fresh one
    pub fn restart(&mut self) {
        let now = self.clock.now_ms();
        self.state.restart(now);
    }

    /// Advance one frame; a safe no-op before start and after game over
    pub fn update(&mut self, input: &TickInput) {
        let now = self.clock.now_ms();
        tick(&mut self.state, input, now);
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot::capture(&self.state, self.state.last_tick)
    }

    pub fn render_snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.state)
    }

    /// Notifications since the previous drain, oldest first
    ///
    /// Call once per update; the next update discards what is left over.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for scripted scenarios and tooling
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
