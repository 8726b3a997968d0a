//! Run lifecycle around the tick function
//!
//! The caller owns one `Engine`, starts it, calls `advance` once per
//! rendered frame and resets it for the next run.

use super::state::{GameEvent, GamePhase, GameState};
use super::tick::{TickInput, tick};
use crate::domain::Domain;
use crate::tuning::Tuning;

/// Read-only view of the world after one advance
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub state: &'a GameState,
    /// Events raised by this advance only
    pub events: &'a [GameEvent],
}

impl Frame<'_> {
    /// The advance that produced this frame ended the run
    pub fn game_over(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { .. }))
    }
}

/// Simulation engine for one player
#[derive(Debug, Clone)]
pub struct Engine {
    state: GameState,
    events: Vec<GameEvent>,
    base_seed: u64,
    runs: u64,
}

impl Engine {
    /// A tuning that fails `Tuning::validate` is replaced by the desktop
    /// balance, so `advance` never divides by zero or spins.
    pub fn new(domain: Domain, tuning: Tuning, seed: u64) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("Rejected tuning ({e}); using desktop balance");
                Tuning::desktop()
            }
        };
        Self {
            state: GameState::new(domain, tuning, seed),
            events: Vec::new(),
            base_seed: seed,
            runs: 0,
        }
    }

    /// Ready -> Running. Returns false if the run was not in `Ready`.
    pub fn start(&mut self) -> bool {
        if self.state.phase != GamePhase::Ready {
            log::warn!("start() ignored in phase {:?}", self.state.phase);
            return false;
        }
        self.state.phase = GamePhase::Running;
        log::info!(
            "Run started: domain={}, seed={}",
            self.state.domain,
            self.state.seed
        );
        true
    }

    /// Advance by one frame of `delta_ms` with the sampled intents
    pub fn advance(&mut self, delta_ms: f32, input: &TickInput) -> Frame<'_> {
        self.events.clear();
        tick(&mut self.state, input, delta_ms, &mut self.events);
        Frame {
            state: &self.state,
            events: &self.events,
        }
    }

    /// Throw the current run away and go back to `Ready` with a fresh world
    pub fn reset(&mut self) {
        self.runs += 1;
        let seed = self
            .base_seed
            .wrapping_add(self.runs.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        let domain = self.state.domain;
        let tuning = self.state.tuning.clone();
        self.state = GameState::new(domain, tuning, seed);
        self.events.clear();
        log::info!("Run reset (run #{}, seed={})", self.runs + 1, seed);
    }

    /// Current world, for renderers between advances
    pub fn snapshot(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
