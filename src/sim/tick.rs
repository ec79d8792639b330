//! Frame-driven simulation tick
//!
//! Advances a running session by one frame: player, enemies, collisions,
//! spawner and cleanup, strictly in that order.

use glam::Vec3;

use super::ability::AbilityKind;
use super::collision::resolve_collisions;
use super::events::{EntityKind, GameEvent};
use super::projectile::Projectile;
use super::state::{FrameCtx, GamePhase, GameState};
use crate::frame_steps;

/// Input intents for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub move_forward: bool,
    pub move_back: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub move_up: bool,
    pub move_down: bool,
    /// Fire the primary weapon (rate-limited)
    pub fire: bool,
    /// Hotbar slot 1..=4; anything else is ignored
    pub ability_slot: Option<u8>,
    /// Aim override for this tick's shots (need not be normalized)
    pub aim: Option<Vec3>,
}

/// Advance the session to `now` (milliseconds on the session clock)
///
/// A no-op unless the session is running. The elapsed time is split into
/// equal substeps of at most `MAX_STEP_DT`; input is applied on the first
/// one. A clock that went backwards integrates nothing and cooldowns keep
/// comparing against the latest time seen. Events the previous tick left
/// undrained are dropped here.
pub fn tick(state: &mut GameState, input: &TickInput, now: u64) {
    if state.phase != GamePhase::Running {
        return;
    }

    let (steps, dt) = frame_steps(state.last_tick, now);
    let now = now.max(state.last_tick);
    state.last_tick = now;
    state.ticks += 1;
    state.drop_stale_events();

    for step in 0..steps {
        let step_input = (step == 0).then_some(input);
        if !simulate_step(state, step_input, now, dt) {
            state.mark_events_stale();
            return;
        }
        if step + 1 < steps {
            cleanup(state);
        }
    }

    if let Some(order) = state
        .spawner
        .poll(now, state.started_at, &state.tuning, &mut state.rng)
    {
        state.spawn_enemy(order.position, order.pattern);
    }

    cleanup(state);
    state.mark_events_stale();
}

/// Player, enemies and collisions for one substep; `false` once the player
/// is destroyed
fn simulate_step(state: &mut GameState, input: Option<&TickInput>, now: u64, dt: f32) -> bool {
    let ticks = state.ticks;
    let GameState {
        tuning,
        phase,
        score,
        player,
        enemies,
        deferred,
        events,
        ids,
        rng,
        ..
    } = state;
    let mut ctx = FrameCtx {
        now,
        ids,
        events,
        deferred,
    };

    // Player
    if let Some(input) = input {
        apply_intents(player, input);
        if input.fire {
            player.shoot(&mut ctx, input.aim);
        }
        if let Some(kind) = input.ability_slot.and_then(AbilityKind::from_slot) {
            player.use_skill(kind, &mut ctx, input.aim);
        }
    }
    player.update(&mut ctx, dt);

    // Enemies
    let player_pos = player.position();
    for enemy in enemies.iter_mut() {
        enemy.update(&mut ctx, dt, player_pos, tuning, rng);
    }

    resolve_collisions(player, enemies, score, tuning, &mut ctx);

    if player.is_alive() {
        return true;
    }
    *phase = GamePhase::GameOver;
    ctx.deferred.clear();
    ctx.emit(GameEvent::GameOver { score: *score });
    log::info!("Game over: score {} after {} ticks", score, ticks);
    false
}

fn apply_intents(player: &mut super::player::Player, input: &TickInput) {
    if input.move_left {
        player.move_left();
    }
    if input.move_right {
        player.move_right();
    }
    if input.move_up {
        player.move_up();
    }
    if input.move_down {
        player.move_down();
    }
    if input.move_forward {
        player.move_forward();
    }
    if input.move_back {
        player.move_backward();
    }
}

/// Drop projectiles that left the play volume and enemies that are dead or
/// gone; no score is credited here
fn cleanup(state: &mut GameState) {
    let events = &mut state.events;

    drop_out_of_bounds(&mut state.player.projectiles, events);

    for i in (0..state.enemies.len()).rev() {
        let enemy = &mut state.enemies[i];
        if enemy.is_alive() && !enemy.is_out_of_bounds() {
            drop_out_of_bounds(&mut enemy.projectiles, events);
            continue;
        }

        let enemy = state.enemies.remove(i);
        if enemy.is_alive() {
            log::debug!("Enemy {} left the arena at {:?}", enemy.id, enemy.position());
        }
        for shot in &enemy.projectiles {
            events.push(removed_projectile(shot));
        }
        events.push(GameEvent::Removed {
            id: enemy.id,
            kind: EntityKind::Enemy(enemy.pattern),
        });
    }
}

fn drop_out_of_bounds(list: &mut Vec<Projectile>, events: &mut Vec<GameEvent>) {
    for i in (0..list.len()).rev() {
        if list[i].is_out_of_bounds() {
            let shot = list.remove(i);
            events.push(removed_projectile(&shot));
        }
    }
}

fn removed_projectile(shot: &Projectile) -> GameEvent {
    GameEvent::Removed {
        id: shot.id,
        kind: EntityKind::Projectile(shot.kind),
    }
}
