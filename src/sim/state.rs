//! Game state and core simulation types
//!
//! One `GameState` is one run. The renderer only ever sees it through a
//! shared reference.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Bounded, Rect};
use super::spawn::SpawnScheduler;
use crate::consts::*;
use crate::domain::Domain;
use crate::tuning::Tuning;

/// Run lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Built but not started; advance is a no-op
    Ready,
    /// Active gameplay
    Running,
    /// Lives exhausted; absorbing until reset
    Terminal,
}

/// Which sprite strip the character is playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimStrip {
    Run,
    Jump,
}

impl AnimStrip {
    pub fn frame_count(&self) -> u8 {
        match self {
            AnimStrip::Run => RUN_FRAME_COUNT,
            AnimStrip::Jump => JUMP_FRAME_COUNT,
        }
    }
}

/// The player-controlled runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel_y: f32,
    pub airborne: bool,
    /// Run time (ms) until which obstacle hits are ignored
    pub invulnerable_until_ms: f64,
    pub strip: AnimStrip,
    pub frame_index: u8,
    pub frame_timer_ms: f32,
    /// Jump intent seen last tick (for edge detection)
    #[serde(skip)]
    pub jump_held: bool,
}

impl Character {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.character_x, tuning.ground_y()),
            size: Vec2::new(tuning.character_width, tuning.character_height),
            vel_y: 0.0,
            airborne: false,
            invulnerable_until_ms: 0.0,
            strip: AnimStrip::Run,
            frame_index: 0,
            frame_timer_ms: 0.0,
            jump_held: false,
        }
    }

    /// Hits are ignored strictly before `invulnerable_until_ms`
    pub fn is_invulnerable(&self, now_ms: f64) -> bool {
        now_ms < self.invulnerable_until_ms
    }

    /// Blink phase for hit feedback: visible every other 100 ms of the window
    pub fn blink_visible(&self, now_ms: f64) -> bool {
        if !self.is_invulnerable(now_ms) {
            return true;
        }
        let remaining = self.invulnerable_until_ms - now_ms;
        ((remaining / 100.0).floor() as i64) % 2 == 0
    }

    /// Switch sprite strip, restarting it
    pub fn set_strip(&mut self, strip: AnimStrip) {
        if self.strip != strip {
            self.strip = strip;
            self.frame_index = 0;
            self.frame_timer_ms = 0.0;
        }
    }

    /// Advance the sprite animation
    pub fn animate(&mut self, dt_ms: f32, tuning: &Tuning) {
        let interval = match self.strip {
            AnimStrip::Run => tuning.run_frame_ms,
            AnimStrip::Jump => tuning.jump_frame_ms,
        };
        self.frame_timer_ms += dt_ms;
        if self.frame_timer_ms >= interval {
            self.frame_index = (self.frame_index + 1) % self.strip.frame_count();
            self.frame_timer_ms = 0.0;
        }
    }
}

impl Bounded for Character {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// What a spawned entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Obstacle,
    StandardPickup,
    RestorativePickup,
}

impl EntityKind {
    pub fn is_pickup(&self) -> bool {
        !matches!(self, EntityKind::Obstacle)
    }
}

/// An obstacle or a pickup scrolling toward the character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnedEntity {
    pub id: u32,
    pub kind: EntityKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Leftward speed before speed scaling (units/frame)
    pub speed: f32,
    /// Tick that created it; only tested for collisions on later ticks
    pub born_tick: u64,
}

impl SpawnedEntity {
    /// Trailing (right) edge has left the field on the left
    pub fn is_offscreen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

impl Bounded for SpawnedEntity {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Score, lives and the timers driving them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub score: u64,
    pub lives: u8,
    pub beans_collected: u32,
    pub speed_scale: f32,
    /// Highest tier already paid out
    pub last_speed_tier: u64,
    /// Remaining "recently sped up" guard
    pub tier_cooldown_ms: f32,
    /// Accumulated speed-scaled time toward the next ambient point
    pub score_timer_ms: f32,
}

impl RunState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            lives: tuning.max_lives,
            beans_collected: 0,
            speed_scale: tuning.base_speed,
            last_speed_tier: 0,
            tier_cooldown_ms: 0.0,
            score_timer_ms: 0.0,
        }
    }
}

/// Notable things that happened during one advance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    ScoreIncreased { amount: u64, score: u64 },
    PickupCollected { kind: EntityKind, reward: u64 },
    /// A restorative pickup gave a life back
    LifeRestored { lives: u8 },
    LifeLost { lives: u8 },
    SpeedTierReached { tier: u64, speed_scale: f32, at_max: bool },
    GameOver { score: u64, beans: u32 },
}

/// Complete state of one run
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    pub domain: Domain,
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Ticks advanced while running
    pub tick_count: u64,
    /// Simulated run time (ms)
    pub elapsed_ms: f64,
    pub character: Character,
    /// Oldest first
    pub obstacles: Vec<SpawnedEntity>,
    /// Oldest first
    pub pickups: Vec<SpawnedEntity>,
    pub stats: RunState,
    pub spawner: SpawnScheduler,
    /// Cosmetic background scroll, in [-background_width, 0]
    pub background_offset: f32,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a fresh run in the `Ready` phase
    pub fn new(domain: Domain, tuning: Tuning, seed: u64) -> Self {
        Self {
            domain,
            seed,
            phase: GamePhase::Ready,
            tick_count: 0,
            elapsed_ms: 0.0,
            character: Character::new(&tuning),
            obstacles: Vec::new(),
            pickups: Vec::new(),
            stats: RunState::new(&tuning),
            spawner: SpawnScheduler::new(&tuning),
            background_offset: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == GamePhase::Terminal
    }

    /// Place an entity into the world; it becomes collidable on the next tick
    pub fn push_entity(&mut self, kind: EntityKind, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        let size = match kind {
            EntityKind::Obstacle => Vec2::new(self.tuning.obstacle_width, self.tuning.obstacle_height),
            _ => Vec2::splat(self.tuning.pickup_size),
        };
        let entity = SpawnedEntity {
            id,
            kind,
            pos,
            size,
            speed: self.tuning.entity_speed,
            born_tick: self.tick_count,
        };
        if kind.is_pickup() {
            self.pickups.push(entity);
        } else {
            self.obstacles.push(entity);
        }
        id
    }

    /// Y of the ground line (bottom edge of anything standing on it)
    pub fn ground_line(&self) -> f32 {
        self.tuning.field_height - self.tuning.ground_margin
    }

    /// Fraction of the speed range reached, for the HUD speed bar
    pub fn speed_fraction(&self) -> f32 {
        let range = self.tuning.max_speed - self.tuning.base_speed;
        if range <= 0.0 {
            return 1.0;
        }
        ((self.stats.speed_scale - self.tuning.base_speed) / range).clamp(0.0, 1.0)
    }
}
