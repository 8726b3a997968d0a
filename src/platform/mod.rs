//! Platform abstraction layer
//!
//! Capabilities the game loop injects into the simulation:
//! - Time (frame deltas from a clock, next-frame scheduling)
//! - Input (raw key/pointer/touch events latched into tick intents)

pub mod clock;
pub mod input;

pub use clock::{Clock, FrameCallback, FrameScheduler, FrameTimer, ManualClock, ManualScheduler};
pub use input::InputLatch;

#[cfg(not(target_arch = "wasm32"))]
pub use clock::SystemClock;

#[cfg(target_arch = "wasm32")]
pub use clock::{AnimationFrameScheduler, PerformanceClock};
