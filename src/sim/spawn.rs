//! Spawn cadence for obstacles and pickups
//!
//! Two independent timers. After each spawn the next interval is re-rolled
//! inside a band that tightens as the score climbs, down to a floor.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::EntityKind;
use crate::tuning::Tuning;

/// What the scheduler wants spawned this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnRequest {
    pub obstacle: bool,
    pub pickup: Option<EntityKind>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnScheduler {
    pub obstacle_timer_ms: f32,
    pub obstacle_interval_ms: f32,
    pub pickup_timer_ms: f32,
    pub pickup_interval_ms: f32,
    /// Pickups spawned this run; never reset by collection
    pub pickups_spawned: u32,
}

impl SpawnScheduler {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            obstacle_timer_ms: 0.0,
            obstacle_interval_ms: tuning.obstacle_first_ms,
            pickup_timer_ms: 0.0,
            pickup_interval_ms: tuning.pickup_first_ms,
            pickups_spawned: 0,
        }
    }

    /// Run both timers forward and report what is due
    pub fn update(
        &mut self,
        dt_ms: f32,
        score: u64,
        tuning: &Tuning,
        rng: &mut impl Rng,
    ) -> SpawnRequest {
        let scale = cadence_scale(tuning, score);
        let mut request = SpawnRequest::default();

        self.obstacle_timer_ms += dt_ms;
        if self.obstacle_timer_ms >= self.obstacle_interval_ms {
            self.obstacle_timer_ms = 0.0;
            self.obstacle_interval_ms = roll_interval(
                rng,
                tuning.obstacle_interval_min_ms,
                tuning.obstacle_interval_max_ms,
                scale,
                tuning.min_spawn_interval_ms,
            );
            request.obstacle = true;
        }

        self.pickup_timer_ms += dt_ms;
        if self.pickup_timer_ms >= self.pickup_interval_ms {
            self.pickup_timer_ms = 0.0;
            self.pickup_interval_ms = roll_interval(
                rng,
                tuning.pickup_interval_min_ms,
                tuning.pickup_interval_max_ms,
                scale,
                tuning.min_spawn_interval_ms,
            );
            request.pickup = Some(self.next_pickup_kind(tuning.restorative_every));
        }

        request
    }

    /// Count a pickup spawn and decide its kind (1-indexed, every Nth restores)
    pub fn next_pickup_kind(&mut self, every: u32) -> EntityKind {
        self.pickups_spawned += 1;
        if every > 0 && self.pickups_spawned.is_multiple_of(every) {
            EntityKind::RestorativePickup
        } else {
            EntityKind::StandardPickup
        }
    }
}

/// Multiplier applied to the cadence band for the given score
pub fn cadence_scale(tuning: &Tuning, score: u64) -> f32 {
    (1.0 - score as f32 * tuning.cadence_narrowing_per_point).max(tuning.cadence_floor_scale)
}

/// Pick the next interval from `[min, max) * scale`, never below `floor_ms`
pub fn roll_interval(rng: &mut impl Rng, min_ms: f32, max_ms: f32, scale: f32, floor_ms: f32) -> f32 {
    let lo = (min_ms * scale).max(floor_ms);
    let hi = (max_ms * scale).max(floor_ms);
    if hi > lo {
        rng.random_range(lo..hi)
    } else {
        lo
    }
}
