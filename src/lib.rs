//! Alley Run - A single-lane side-scrolling runner
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (physics, spawning, collisions, scoring)
//! - `tuning`: Data-driven game balance
//! - `leaderboard`: Per-domain cumulative stats
//! - `persistence`: Score reporting and local fallback counters
//! - `platform`: Clock and input capabilities injected into the loop
//! - `view`: Per-frame snapshot handed to the page for drawing

pub mod domain;
pub mod leaderboard;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod view;

pub use domain::Domain;
pub use leaderboard::{CategoryStats, Leaderboard};
pub use settings::{LayoutPreset, Settings};
pub use sim::{Engine, Frame, GameEvent, GamePhase, GameState, TickInput};
pub use tuning::Tuning;
pub use view::RenderView;

/// Game configuration constants
pub mod consts {
    /// Nominal frame interval the per-frame tuning values are expressed in (ms)
    pub const NOMINAL_FRAME_MS: f32 = 16.67;
    /// Largest delta accepted by a single advance, in nominal frames
    pub const MAX_DELTA_FRAMES: f32 = 2.0;
    /// Largest delta accepted by a single advance (ms)
    pub const MAX_DELTA_MS: f32 = NOMINAL_FRAME_MS * MAX_DELTA_FRAMES;

    /// Lives at the start of every run
    pub const MAX_LIVES: u8 = 3;

    /// Every Nth pickup spawned in a run restores a life
    pub const RESTORATIVE_EVERY: u32 = 6;

    /// Playfield dimensions (canvas units)
    pub const FIELD_WIDTH: f32 = 1280.0;
    pub const FIELD_HEIGHT: f32 = 720.0;

    /// Animation strips
    pub const RUN_FRAME_COUNT: u8 = 4;
    pub const JUMP_FRAME_COUNT: u8 = 6;
}

/// Convert a millisecond delta into nominal frames
#[inline]
pub fn ms_to_frames(delta_ms: f32) -> f32 {
    delta_ms / consts::NOMINAL_FRAME_MS
}
