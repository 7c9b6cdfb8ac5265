//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied frame delta, clamped to `MAX_DT`
//! - Seeded RNG only
//! - Stable iteration order (entities in spawn order)
//! - No rendering or platform dependencies

pub mod bike;
pub mod collision;
pub mod countdown;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::CollisionResult;
pub use countdown::{Countdown, CountdownPhase};
pub use spawn::{Entity, EntityKind, SpawnState};
pub use state::{BikeState, CrashCause, GameEvent, GamePhase, GameState, Lane, RunStats};
pub use tick::{TickInput, create_game, start_game, tick, update_game};
pub use world::{Layer, LayerScroll, WorldState};
