//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time comes in as a per-tick `now`, never read from a global clock
//! - Seeded RNG only
//! - Single-threaded; the session owns every entity
//! - No rendering, audio or platform dependencies

pub mod ability;
pub mod body;
pub mod collision;
pub mod deferred;
pub mod enemy;
pub mod events;
pub mod player;
pub mod projectile;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod targeting;
pub mod tick;

pub use ability::{AbilityBook, AbilityKind};
pub use body::{Aabb, KinematicBody};
pub use collision::{CollisionReport, resolve_collisions};
pub use deferred::{DeferredAction, DeferredQueue};
pub use enemy::{Enemy, MovementPattern};
pub use events::{AudioCue, EntityKind, GameEvent};
pub use player::{Player, WeaponMode};
pub use projectile::{Projectile, ShotKind, Side, WeaponCategory};
pub use snapshot::{AbilityStatus, EntityView, HudSnapshot, RenderSnapshot};
pub use spawner::{SpawnOrder, Spawner};
pub use state::{EntityIds, FrameCtx, GamePhase, GameState};
pub use targeting::{Threat, aim_at, threats};
pub use tick::{TickInput, tick};
