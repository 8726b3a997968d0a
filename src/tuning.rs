//! Data-driven game balance
//!
//! Every constant the simulation reads lives here as a named field so a
//! tuning can be swapped per platform or loaded from JSON. Distances are in
//! canvas units, velocities and accelerations are per nominal frame
//! (see [`crate::consts::NOMINAL_FRAME_MS`]), timers are in milliseconds.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay constants for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,
    /// Gap between the bottom of the canvas and the ground line
    pub ground_margin: f32,
    /// Width of one background strip (scroll offset wraps at this)
    pub background_width: f32,

    // === Character ===
    pub character_x: f32,
    pub character_width: f32,
    pub character_height: f32,
    /// Downward acceleration (units/frame²)
    pub gravity: f32,
    /// Vertical velocity applied on takeoff (negative is up)
    pub jump_impulse: f32,
    /// Horizontal strafe speed (units/frame)
    pub strafe_speed: f32,

    // === Speed scaling ===
    pub base_speed: f32,
    pub max_speed: f32,
    pub speed_increment: f32,
    /// Score points per speed tier
    pub tier_size: u64,
    /// Window after a tier increment during which further tiers are ignored
    pub tier_cooldown_ms: f32,

    // === Entities ===
    /// Horizontal entity speed before speed scaling (units/frame)
    pub entity_speed: f32,
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    pub pickup_size: f32,
    /// Height of pickups above the ground line
    pub pickup_lift: f32,
    /// Random extra lift added per pickup
    pub pickup_jitter: f32,
    /// Hitboxes are shrunk toward their center by this factor
    pub hitbox_scale: f32,

    // === Spawning ===
    pub obstacle_first_ms: f32,
    pub obstacle_interval_min_ms: f32,
    pub obstacle_interval_max_ms: f32,
    pub pickup_first_ms: f32,
    pub pickup_interval_min_ms: f32,
    pub pickup_interval_max_ms: f32,
    /// Cadence band shrink per score point
    pub cadence_narrowing_per_point: f32,
    /// Smallest cadence scale the narrowing may reach
    pub cadence_floor_scale: f32,
    /// Absolute lower bound on any spawn interval
    pub min_spawn_interval_ms: f32,
    pub restorative_every: u32,

    // === Scoring & lives ===
    pub score_interval_ms: f32,
    pub pickup_reward: u64,
    pub max_lives: u8,
    pub invulnerability_ms: f32,

    // === Animation ===
    pub run_frame_ms: f32,
    pub jump_frame_ms: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::desktop()
    }
}

impl Tuning {
    /// Desktop balance
    pub fn desktop() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            ground_margin: 50.0,
            background_width: 2560.0,

            character_x: 150.0,
            character_width: 160.0,
            character_height: 160.0,
            gravity: 0.317,
            jump_impulse: -14.04,
            strafe_speed: 5.0,

            base_speed: 2.0,
            max_speed: 7.0,
            speed_increment: 0.092,
            tier_size: 100,
            tier_cooldown_ms: 500.0,

            entity_speed: 4.0,
            obstacle_width: 160.0,
            obstacle_height: 160.0,
            pickup_size: 64.0,
            pickup_lift: 200.0,
            pickup_jitter: 50.0,
            hitbox_scale: 0.6,

            obstacle_first_ms: 2000.0,
            obstacle_interval_min_ms: 1800.0,
            obstacle_interval_max_ms: 3000.0,
            pickup_first_ms: 3000.0,
            pickup_interval_min_ms: 3000.0,
            pickup_interval_max_ms: 5000.0,
            cadence_narrowing_per_point: 0.0005,
            cadence_floor_scale: 0.5,
            min_spawn_interval_ms: 900.0,
            restorative_every: RESTORATIVE_EVERY,

            score_interval_ms: 200.0,
            pickup_reward: 10,
            max_lives: MAX_LIVES,
            invulnerability_ms: 1000.0,

            run_frame_ms: 150.0,
            jump_frame_ms: 400.0,
        }
    }

    /// Portrait phone balance: smaller sprites, floatier jump, slower world
    pub fn mobile() -> Self {
        Self {
            field_width: 405.0,
            field_height: FIELD_HEIGHT,
            background_width: 1280.0,

            character_x: 50.0,
            character_width: 123.2,
            character_height: 123.2,
            gravity: 0.269,
            jump_impulse: -11.88,

            base_speed: 2.07,
            max_speed: 6.0,

            entity_speed: 2.0,
            obstacle_width: 123.2,
            obstacle_height: 123.2,
            pickup_lift: 160.0,

            obstacle_first_ms: 3000.0,
            obstacle_interval_min_ms: 3000.0,
            obstacle_interval_max_ms: 5000.0,
            pickup_first_ms: 4500.0,
            pickup_interval_min_ms: 4500.0,
            pickup_interval_max_ms: 7500.0,

            ..Self::desktop()
        }
    }

    /// Parse a tuning from JSON; absent fields keep their desktop value
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject tunings the engine cannot run sensibly
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }

        positive("field_width", self.field_width)?;
        positive("field_height", self.field_height)?;
        positive("background_width", self.background_width)?;
        positive("character_width", self.character_width)?;
        positive("character_height", self.character_height)?;
        positive("gravity", self.gravity)?;
        positive("base_speed", self.base_speed)?;
        positive("entity_speed", self.entity_speed)?;
        positive("obstacle_width", self.obstacle_width)?;
        positive("obstacle_height", self.obstacle_height)?;
        positive("pickup_size", self.pickup_size)?;
        positive("obstacle_interval_min_ms", self.obstacle_interval_min_ms)?;
        positive("pickup_interval_min_ms", self.pickup_interval_min_ms)?;
        positive("min_spawn_interval_ms", self.min_spawn_interval_ms)?;
        positive("score_interval_ms", self.score_interval_ms)?;
        positive("run_frame_ms", self.run_frame_ms)?;
        positive("jump_frame_ms", self.jump_frame_ms)?;

        if !(self.jump_impulse.is_finite() && self.jump_impulse < 0.0) {
            return Err(TuningError::Invalid {
                field: "jump_impulse",
                reason: "must be negative (upward)",
            });
        }
        if !(self.max_speed >= self.base_speed) {
            return Err(TuningError::Invalid {
                field: "max_speed",
                reason: "must not be below base_speed",
            });
        }
        if !(self.hitbox_scale > 0.0 && self.hitbox_scale <= 1.0) {
            return Err(TuningError::Invalid {
                field: "hitbox_scale",
                reason: "must be in (0, 1]",
            });
        }
        if !(self.cadence_floor_scale > 0.0 && self.cadence_floor_scale <= 1.0) {
            return Err(TuningError::Invalid {
                field: "cadence_floor_scale",
                reason: "must be in (0, 1]",
            });
        }
        if self.obstacle_interval_max_ms < self.obstacle_interval_min_ms
            || self.pickup_interval_max_ms < self.pickup_interval_min_ms
        {
            return Err(TuningError::Invalid {
                field: "spawn interval band",
                reason: "max must not be below min",
            });
        }
        if self.tier_size == 0 {
            return Err(TuningError::Invalid {
                field: "tier_size",
                reason: "must be at least 1",
            });
        }
        if self.restorative_every == 0 {
            return Err(TuningError::Invalid {
                field: "restorative_every",
                reason: "must be at least 1",
            });
        }
        if self.max_lives == 0 {
            return Err(TuningError::Invalid {
                field: "max_lives",
                reason: "must be at least 1",
            });
        }
        if self.character_height + self.ground_margin > self.field_height {
            return Err(TuningError::Invalid {
                field: "character_height",
                reason: "character does not fit above the ground line",
            });
        }
        Ok(())
    }

    /// Y of the character's top edge while standing
    pub fn ground_y(&self) -> f32 {
        self.field_height - self.character_height - self.ground_margin
    }
}

/// Why a tuning was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    Parse(String),
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "tuning parse error: {msg}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning: {field} {reason}"),
        }
    }
}

impl std::error::Error for TuningError {}
