//! Star Skirmish headless runner
//!
//! Plays a seeded session with a simple autopilot on a fixed-step manual
//! clock and logs the outcome. Usage: `star-skirmish [tuning.json] [seconds]`

#[cfg(not(target_arch = "wasm32"))]
use star_skirmish::sim::{GameEvent, HudSnapshot, TickInput, targeting};
#[cfg(not(target_arch = "wasm32"))]
use star_skirmish::{ManualClock, Session, Tuning};

#[cfg(not(target_arch = "wasm32"))]
const FRAME_MS: u64 = 16;
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_SECONDS: u64 = 120;
#[cfg(not(target_arch = "wasm32"))]
const SEED: u64 = 0x5EED_5EED;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Star Skirmish (headless) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => Tuning::load_or_default(path),
        None => Tuning::default(),
    };
    let seconds = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(s)) => s,
        Some(Err(e)) => {
            log::warn!("Bad duration ({}), using {} s", e, DEFAULT_SECONDS);
            DEFAULT_SECONDS
        }
        None => DEFAULT_SECONDS,
    };

    let clock = ManualClock::new(0);
    let mut session = Session::new(clock.clone(), SEED, tuning);
    session.start();

    let frames = seconds * 1000 / FRAME_MS;
    let mut kills = 0u32;
    for _ in 0..frames {
        clock.advance(FRAME_MS);
        let input = autopilot(&session);
        session.update(&input);

        for event in session.drain_events() {
            match event {
                GameEvent::EnemyDestroyed { .. } => kills += 1,
                GameEvent::AbilityActivated { ability } => {
                    log::debug!("Autopilot used {}", ability.name());
                }
                _ => {}
            }
        }
        if session.is_game_over() {
            break;
        }
    }

    let secs = session.state().elapsed_ms() as f32 / 1000.0;
    if session.is_game_over() {
        log::info!("Destroyed after {:.1} s", secs);
    } else {
        log::info!("Survived {:.1} s", secs);
    }
    log::info!("Final score: {} ({} kills)", session.score(), kills);
}

/// Chase the nearest threat laterally, keep firing at it, and spend energy
/// whenever an ability is ready
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(session: &Session<ManualClock>) -> TickInput {
    let state = session.state();
    let me = state.player.position();
    let mut input = TickInput {
        fire: true,
        ..Default::default()
    };

    if let Some(target) = targeting::primary_target(state) {
        let dx = target.position.x - me.x;
        let dy = target.position.y - me.y;
        input.move_right = dx > 1.0;
        input.move_left = dx < -1.0;
        input.move_up = dy > 1.0;
        input.move_down = dy < -1.0;
        // Back off from anything about to ram us
        input.move_back = target.distance < state.tuning.contact_radius * 3.0;
        input.aim = targeting::aim_at(me, target.position);
    }

    input.ability_slot = pick_ability(&session.hud());
    input
}

#[cfg(not(target_arch = "wasm32"))]
fn pick_ability(hud: &HudSnapshot) -> Option<u8> {
    use star_skirmish::sim::AbilityKind;

    let ready = |kind: AbilityKind| {
        hud.abilities
            .iter()
            .any(|a| a.ability == kind && a.available)
    };

    if hud.health < hud.max_health * 0.5 && ready(AbilityKind::Shield) {
        return Some(AbilityKind::Shield.slot());
    }
    [AbilityKind::Missile, AbilityKind::LaserBeam, AbilityKind::RapidFire]
        .into_iter()
        .find(|&k| ready(k))
        .map(|k| k.slot())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by a browser host; there is no wasm binary
}
