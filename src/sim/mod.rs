//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module must stay free of I/O:
//! - Caller-supplied frame deltas only (clamped, never trusted)
//! - Seeded RNG only
//! - Spawn order is insertion order (oldest first)
//! - No rendering, audio or network dependencies

pub mod collision;
pub mod engine;
pub mod invariants;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Bounded, Rect, hitboxes_overlap};
pub use engine::{Engine, Frame};
pub use invariants::InvariantViolation;
pub use spawn::{SpawnRequest, SpawnScheduler};
pub use state::{
    AnimStrip, Character, EntityKind, GameEvent, GamePhase, GameState, RunState, SpawnedEntity,
};
pub use tick::{TickInput, sanitize_delta, tick};
