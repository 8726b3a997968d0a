//! Per-frame simulation tick
//!
//! Core game loop step: physics, speed tiers, entity motion, culling,
//! collisions, ambient scoring and spawning, in that order.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Bounded;
use super::invariants;
use super::state::{AnimStrip, EntityKind, GameEvent, GamePhase, GameState};
use crate::consts::MAX_DELTA_MS;
use crate::ms_to_frames;

/// Intents sampled for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickInput {
    /// Jump key/button is down (acted on at the press edge only)
    pub jump_pressed: bool,
    /// Strafe left held
    pub move_left: bool,
    /// Strafe right held
    pub move_right: bool,
}

/// Clamp a caller-supplied delta to `[0, MAX_DELTA_MS]`
pub fn sanitize_delta(delta_ms: f32) -> f32 {
    if delta_ms.is_nan() || delta_ms < 0.0 {
        log::warn!("Ignoring invalid frame delta {delta_ms}");
        return 0.0;
    }
    if delta_ms > MAX_DELTA_MS {
        log::debug!("Clamping frame delta {delta_ms} ms to {MAX_DELTA_MS} ms");
        return MAX_DELTA_MS;
    }
    delta_ms
}

/// Advance a running game by one frame, appending what happened to `events`
pub fn tick(state: &mut GameState, input: &TickInput, delta_ms: f32, events: &mut Vec<GameEvent>) {
    // Ready and Terminal never mutate
    if state.phase != GamePhase::Running {
        return;
    }

    let dt_ms = sanitize_delta(delta_ms);
    let frames = ms_to_frames(dt_ms);
    let score_before = state.stats.score;

    state.tick_count += 1;
    state.elapsed_ms += dt_ms as f64;

    update_speed_tier(state, dt_ms, events);
    update_character(state, input, frames, dt_ms, events);
    scroll_world(state, frames);
    cull_offscreen(state);

    resolve_obstacle_hits(state, events);
    if state.phase == GamePhase::Terminal {
        debug_assert_eq!(invariants::check(state), Ok(()));
        return;
    }
    resolve_pickups(state, events);

    accrue_ambient_score(state, dt_ms, events);
    spawn_entities(state, dt_ms);

    debug_assert_eq!(invariants::check(state), Ok(()));
    debug_assert_eq!(
        invariants::check_score_progress(score_before, state.stats.score),
        Ok(())
    );
}

/// Pay out one speed increment per tier crossing, guarded by a cooldown.
/// Tiers jumped over in one step are not paid separately.
fn update_speed_tier(state: &mut GameState, dt_ms: f32, events: &mut Vec<GameEvent>) {
    let tuning = &state.tuning;
    let stats = &mut state.stats;

    stats.tier_cooldown_ms = (stats.tier_cooldown_ms - dt_ms).max(0.0);

    let tier = stats.score / tuning.tier_size;
    if tier <= stats.last_speed_tier || stats.tier_cooldown_ms > 0.0 {
        return;
    }

    stats.speed_scale = (stats.speed_scale + tuning.speed_increment).min(tuning.max_speed);
    stats.last_speed_tier = tier;
    stats.tier_cooldown_ms = tuning.tier_cooldown_ms;
    let at_max = stats.speed_scale >= tuning.max_speed;

    log::debug!("Speed tier {} reached, speed scale {:.3}", tier, stats.speed_scale);
    events.push(GameEvent::SpeedTierReached {
        tier,
        speed_scale: stats.speed_scale,
        at_max,
    });
}

/// Jump, gravity, ground clamp, strafe and sprite animation
fn update_character(
    state: &mut GameState,
    input: &TickInput,
    frames: f32,
    dt_ms: f32,
    events: &mut Vec<GameEvent>,
) {
    let tuning = &state.tuning;
    let ground_y = tuning.ground_y();
    let character = &mut state.character;

    let jump_edge = input.jump_pressed && !character.jump_held;
    character.jump_held = input.jump_pressed;
    if jump_edge && !character.airborne {
        character.vel_y = tuning.jump_impulse;
        character.airborne = true;
        character.set_strip(AnimStrip::Jump);
        events.push(GameEvent::Jumped);
    }

    character.vel_y += tuning.gravity * frames;
    character.pos.y += character.vel_y * frames;
    if character.pos.y >= ground_y {
        character.pos.y = ground_y;
        character.vel_y = 0.0;
        if character.airborne {
            character.airborne = false;
            character.set_strip(AnimStrip::Run);
        }
    }

    let direction = input.move_right as i8 - input.move_left as i8;
    if direction != 0 {
        let max_x = (tuning.field_width - character.size.x).max(0.0);
        character.pos.x =
            (character.pos.x + direction as f32 * tuning.strafe_speed * frames).clamp(0.0, max_x);
    }

    character.animate(dt_ms, tuning);
}

/// Move every entity and the background leftward at the scaled speed
fn scroll_world(state: &mut GameState, frames: f32) {
    let scale = state.stats.speed_scale;
    for entity in state.obstacles.iter_mut().chain(state.pickups.iter_mut()) {
        entity.pos.x -= entity.speed * scale * frames;
    }

    let width = state.tuning.background_width;
    state.background_offset -= state.tuning.entity_speed * scale * frames;
    if state.background_offset <= -width {
        state.background_offset %= width;
    }
}

/// Drop entities whose trailing edge left the field
fn cull_offscreen(state: &mut GameState) {
    state.obstacles.retain(|e| !e.is_offscreen());
    state.pickups.retain(|e| !e.is_offscreen());
}

/// Character vs obstacles; ends the run when the last life goes
fn resolve_obstacle_hits(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let scale = state.tuning.hitbox_scale;
    let now = state.elapsed_ms;
    let character_box = state.character.hitbox(scale);

    let mut i = 0;
    while i < state.obstacles.len() {
        let obstacle = &state.obstacles[i];
        let testable = obstacle.born_tick < state.tick_count;
        if !testable
            || !character_box.overlaps(&obstacle.hitbox(scale))
            || state.character.is_invulnerable(now)
        {
            i += 1;
            continue;
        }

        // Consumed so it cannot hit again next tick
        state.obstacles.remove(i);
        state.stats.lives = state.stats.lives.saturating_sub(1);
        state.character.invulnerable_until_ms = now + state.tuning.invulnerability_ms as f64;
        log::debug!("Hit obstacle, {} lives left", state.stats.lives);
        events.push(GameEvent::LifeLost {
            lives: state.stats.lives,
        });

        if state.stats.lives == 0 {
            state.phase = GamePhase::Terminal;
            log::info!(
                "Game over in {}: score {}, beans {}",
                state.domain,
                state.stats.score,
                state.stats.beans_collected
            );
            events.push(GameEvent::GameOver {
                score: state.stats.score,
                beans: state.stats.beans_collected,
            });
            return;
        }
    }
}

/// Character vs pickups; every pickup pays the reward, restoratives may add a life
fn resolve_pickups(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let scale = state.tuning.hitbox_scale;
    let character_box = state.character.hitbox(scale);
    let tick = state.tick_count;

    let (collected, remaining): (Vec<_>, Vec<_>) = std::mem::take(&mut state.pickups)
        .into_iter()
        .partition(|p| p.born_tick < tick && character_box.overlaps(&p.hitbox(scale)));
    state.pickups = remaining;

    for pickup in collected {
        let reward = state.tuning.pickup_reward;
        state.stats.score += reward;
        state.stats.beans_collected += 1;
        events.push(GameEvent::PickupCollected {
            kind: pickup.kind,
            reward,
        });
        events.push(GameEvent::ScoreIncreased {
            amount: reward,
            score: state.stats.score,
        });

        if pickup.kind == EntityKind::RestorativePickup && state.stats.lives < state.tuning.max_lives {
            state.stats.lives += 1;
            log::debug!("Life restored, {} lives", state.stats.lives);
            events.push(GameEvent::LifeRestored {
                lives: state.stats.lives,
            });
        }
    }
}

/// One point per `score_interval_ms` of speed-scaled time
fn accrue_ambient_score(state: &mut GameState, dt_ms: f32, events: &mut Vec<GameEvent>) {
    let interval = state.tuning.score_interval_ms;
    let stats = &mut state.stats;

    stats.score_timer_ms += dt_ms * stats.speed_scale;
    let mut gained = 0u64;
    while stats.score_timer_ms >= interval {
        stats.score_timer_ms -= interval;
        gained += 1;
    }
    if gained > 0 {
        stats.score += gained;
        events.push(GameEvent::ScoreIncreased {
            amount: gained,
            score: stats.score,
        });
    }
}

/// Ask the scheduler what is due and place it at the right edge
fn spawn_entities(state: &mut GameState, dt_ms: f32) {
    let request = state
        .spawner
        .update(dt_ms, state.stats.score, &state.tuning, &mut state.rng);

    let x = state.tuning.field_width;
    let ground = state.ground_line();

    if request.obstacle {
        let y = ground - state.tuning.obstacle_height;
        state.push_entity(EntityKind::Obstacle, Vec2::new(x, y));
    }
    if let Some(kind) = request.pickup {
        let jitter = state.rng.random::<f32>() * state.tuning.pickup_jitter;
        let y = ground - state.tuning.pickup_size - state.tuning.pickup_lift - jitter;
        state.push_entity(kind, Vec2::new(x, y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::NOMINAL_FRAME_MS;
    use crate::domain::Domain;
    use crate::tuning::Tuning;

    const DT: f32 = NOMINAL_FRAME_MS;

    fn running(seed: u64) -> GameState {
        let mut state = GameState::new(Domain::Lightning, Tuning::desktop(), seed);
        state.phase = GamePhase::Running;
        state
    }

    /// A run whose spawner never fires during short tests
    fn quiet_running() -> GameState {
        let tuning = Tuning {
            obstacle_first_ms: 1.0e9,
            pickup_first_ms: 1.0e9,
            ..Tuning::desktop()
        };
        let mut state = GameState::new(Domain::Lightning, tuning, 1);
        state.phase = GamePhase::Running;
        state
    }

    fn overlapping_pos(state: &GameState) -> Vec2 {
        state.character.pos
    }

    fn jump() -> TickInput {
        TickInput {
            jump_pressed: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_sanitize_delta() {
        assert_eq!(sanitize_delta(-5.0), 0.0);
        assert_eq!(sanitize_delta(f32::NAN), 0.0);
        assert_eq!(sanitize_delta(10.0), 10.0);
        assert_eq!(sanitize_delta(60_000.0), MAX_DELTA_MS);
        assert_eq!(sanitize_delta(f32::INFINITY), MAX_DELTA_MS);
    }

    #[test]
    fn test_ready_phase_does_not_tick() {
        let mut state = GameState::new(Domain::Fire, Tuning::desktop(), 1);
        let mut events = Vec::new();
        tick(&mut state, &jump(), DT, &mut events);
        assert_eq!(state.tick_count, 0);
        assert!(!state.character.airborne);
        assert!(events.is_empty());
    }

    #[test]
    fn test_jump_arc_lands_back_on_ground() {
        let mut state = quiet_running();
        let ground = state.tuning.ground_y();
        let mut events = Vec::new();

        tick(&mut state, &jump(), DT, &mut events);
        assert!(state.character.airborne);
        assert!(state.character.pos.y < ground);
        assert!(events.contains(&GameEvent::Jumped));

        let mut landed_after = None;
        for i in 0..200 {
            tick(&mut state, &TickInput::default(), DT, &mut events);
            if !state.character.airborne {
                landed_after = Some(i);
                break;
            }
        }
        assert!(landed_after.is_some());
        assert_eq!(state.character.pos.y, ground);
        assert_eq!(state.character.vel_y, 0.0);
        assert_eq!(state.character.strip, AnimStrip::Run);
    }

    #[test]
    fn test_jump_is_edge_triggered_and_ignored_midair() {
        let mut state = quiet_running();
        let mut events = Vec::new();

        tick(&mut state, &jump(), DT, &mut events);
        let vel_after_takeoff = state.character.vel_y;

        // Holding the key does not re-apply the impulse
        tick(&mut state, &jump(), DT, &mut events);
        assert!(state.character.vel_y > vel_after_takeoff);

        // A fresh press while airborne is ignored too
        tick(&mut state, &TickInput::default(), DT, &mut events);
        let vel = state.character.vel_y;
        tick(&mut state, &jump(), DT, &mut events);
        assert!(state.character.vel_y > vel);

        let jumps = events.iter().filter(|e| **e == GameEvent::Jumped).count();
        assert_eq!(jumps, 1);
    }

    #[test]
    fn test_strafe_is_clamped_to_field() {
        let mut state = quiet_running();
        let mut events = Vec::new();
        let left = TickInput {
            move_left: true,
            ..Default::default()
        };
        for _ in 0..200 {
            tick(&mut state, &left, DT, &mut events);
        }
        assert_eq!(state.character.pos.x, 0.0);

        let right = TickInput {
            move_right: true,
            ..Default::default()
        };
        for _ in 0..1000 {
            tick(&mut state, &right, DT, &mut events);
        }
        let max_x = state.tuning.field_width - state.character.size.x;
        assert_eq!(state.character.pos.x, max_x);
    }

    #[test]
    fn test_obstacle_hit_costs_life_and_removes_obstacle() {
        let mut state = quiet_running();
        let pos = overlapping_pos(&state);
        state.push_entity(EntityKind::Obstacle, pos);
        let mut events = Vec::new();

        tick(&mut state, &TickInput::default(), DT, &mut events);
        assert_eq!(state.stats.lives, 2);
        assert!(state.obstacles.is_empty());
        assert!(events.contains(&GameEvent::LifeLost { lives: 2 }));
        assert!(state.character.is_invulnerable(state.elapsed_ms));
    }

    #[test]
    fn test_invulnerability_blocks_second_hit() {
        let mut state = quiet_running();
        let pos = overlapping_pos(&state);
        state.push_entity(EntityKind::Obstacle, pos);
        let mut events = Vec::new();
        tick(&mut state, &TickInput::default(), DT, &mut events);
        assert_eq!(state.stats.lives, 2);
        let hit_at = state.elapsed_ms;

        // Advance ~500 ms, then drop another obstacle onto the character
        while state.elapsed_ms < hit_at + 500.0 {
            tick(&mut state, &TickInput::default(), DT, &mut events);
        }
        let pos = overlapping_pos(&state);
        state.push_entity(EntityKind::Obstacle, pos);
        tick(&mut state, &TickInput::default(), DT, &mut events);
        assert_eq!(state.stats.lives, 2);
        // Ignored obstacles stay in the world
        assert_eq!(state.obstacles.len(), 1);

        // Once the window closes a fresh overlap hurts again
        state.obstacles.clear();
        while state.elapsed_ms < hit_at + 1000.0 {
            tick(&mut state, &TickInput::default(), DT, &mut events);
        }
        let pos = overlapping_pos(&state);
        state.push_entity(EntityKind::Obstacle, pos);
        tick(&mut state, &TickInput::default(), DT, &mut events);
        assert_eq!(state.stats.lives, 1);
    }

    #[test]
    fn test_last_life_ends_run_in_same_tick() {
        let mut state = quiet_running();
        state.stats.lives = 1;
        let pos = overlapping_pos(&state);
        state.push_entity(EntityKind::Obstacle, pos);
        state.push_entity(EntityKind::RestorativePickup, pos);
        let mut events = Vec::new();

        tick(&mut state, &TickInput::default(), DT, &mut events);
        assert_eq!(state.phase, GamePhase::Terminal);
        assert_eq!(state.stats.lives, 0);
        assert_eq!(events.last(), Some(&GameEvent::GameOver { score: 0, beans: 0 }));
        // Frozen before pickups were resolved
        assert_eq!(state.pickups.len(), 1);
        assert_eq!(state.stats.beans_collected, 0);
    }

    #[test]
    fn test_entities_spawned_this_tick_are_not_tested() {
        let mut state = quiet_running();
        let pos = overlapping_pos(&state);
        state.push_entity(EntityKind::Obstacle, pos);
        // Pretend it was created during the tick about to run
        state.obstacles[0].born_tick = state.tick_count + 1;
        let mut events = Vec::new();

        tick(&mut state, &TickInput::default(), DT, &mut events);
        assert_eq!(state.stats.lives, 3);
        tick(&mut state, &TickInput::default(), DT, &mut events);
        assert_eq!(state.stats.lives, 2);
    }

    #[test]
    fn test_restorative_pickup_at_full_health_pays_score_only() {
        let mut state = quiet_running();
        let pos = overlapping_pos(&state);
        state.push_entity(EntityKind::RestorativePickup, pos);
        let mut events = Vec::new();

        tick(&mut state, &TickInput::default(), DT, &mut events);
        assert_eq!(state.stats.lives, 3);
        assert_eq!(state.stats.beans_collected, 1);
        assert!(state.stats.score >= state.tuning.pickup_reward);
        assert!(state.pickups.is_empty());
        assert!(!events.iter().any(|e| matches!(e, GameEvent::LifeRestored { .. })));
    }

    #[test]
    fn test_restorative_pickup_below_max_restores_one_life() {
        let mut state = quiet_running();
        state.stats.lives = 1;
        let pos = overlapping_pos(&state);
        state.push_entity(EntityKind::RestorativePickup, pos);
        let mut events = Vec::new();

        tick(&mut state, &TickInput::default(), DT, &mut events);
        assert_eq!(state.stats.lives, 2);
        assert!(events.contains(&GameEvent::LifeRestored { lives: 2 }));
        assert!(events.contains(&GameEvent::PickupCollected {
            kind: EntityKind::RestorativePickup,
            reward: 10,
        }));
    }

    #[test]
    fn test_standard_pickup_never_restores() {
        let mut state = quiet_running();
        state.stats.lives = 1;
        let pos = overlapping_pos(&state);
        state.push_entity(EntityKind::StandardPickup, pos);
        let mut events = Vec::new();

        tick(&mut state, &TickInput::default(), DT, &mut events);
        assert_eq!(state.stats.lives, 1);
        assert_eq!(state.stats.beans_collected, 1);
    }

    #[test]
    fn test_single_tier_increment_while_hovering_at_boundary() {
        let mut state = quiet_running();
        state.stats.score = state.tuning.tier_size;
        let base = state.stats.speed_scale;
        let mut events = Vec::new();

        for _ in 0..500 {
            tick(&mut state, &TickInput::default(), DT, &mut events);
            // Hold the score inside tier 1
            state.stats.score = state.tuning.tier_size;
        }

        let tiers: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::SpeedTierReached { .. }))
            .collect();
        assert_eq!(tiers.len(), 1);
        assert!((state.stats.speed_scale - (base + state.tuning.speed_increment)).abs() < 1e-5);
    }

    #[test]
    fn test_tier_cooldown_defers_next_tier() {
        let mut state = quiet_running();
        state.stats.score = state.tuning.tier_size;
        let mut events = Vec::new();
        tick(&mut state, &TickInput::default(), DT, &mut events);
        assert_eq!(state.stats.last_speed_tier, 1);

        // Jump straight into tier 2 while the guard is still up
        state.stats.score = state.tuning.tier_size * 2;
        tick(&mut state, &TickInput::default(), DT, &mut events);
        assert_eq!(state.stats.last_speed_tier, 1);

        let mut ticks = 0;
        while state.stats.last_speed_tier < 2 && ticks < 100 {
            tick(&mut state, &TickInput::default(), DT, &mut events);
            ticks += 1;
        }
        assert_eq!(state.stats.last_speed_tier, 2);
    }

    #[test]
    fn test_crossing_two_tiers_at_once_pays_one_increment() {
        let mut state = quiet_running();
        let base = state.stats.speed_scale;
        state.stats.score = state.tuning.tier_size * 2;
        let mut events = Vec::new();
        tick(&mut state, &TickInput::default(), DT, &mut events);

        // The skipped tier is not paid later
        assert_eq!(state.stats.last_speed_tier, 2);
        assert!((state.stats.speed_scale - (base + state.tuning.speed_increment)).abs() < 1e-5);
        let tiers: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::SpeedTierReached { tier, .. } => Some(*tier),
                _ => None,
            })
            .collect();
        assert_eq!(tiers, vec![2]);

        for _ in 0..100 {
            state.stats.score = state.tuning.tier_size * 2;
            tick(&mut state, &TickInput::default(), DT, &mut events);
        }
        assert!((state.stats.speed_scale - (base + state.tuning.speed_increment)).abs() < 1e-5);
    }

    #[test]
    fn test_speed_is_clamped_at_max() {
        let mut state = quiet_running();
        state.stats.speed_scale = state.tuning.max_speed - 0.01;
        state.stats.score = state.tuning.tier_size;
        let mut events = Vec::new();
        tick(&mut state, &TickInput::default(), DT, &mut events);
        assert_eq!(state.stats.speed_scale, state.tuning.max_speed);
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::SpeedTierReached { at_max: true, .. }
        )));
    }

    #[test]
    fn test_ambient_score_scales_with_speed() {
        let mut slow = quiet_running();
        let mut fast = quiet_running();
        fast.stats.speed_scale = fast.tuning.max_speed;
        let mut events = Vec::new();
        for _ in 0..300 {
            tick(&mut slow, &TickInput::default(), DT, &mut events);
            tick(&mut fast, &TickInput::default(), DT, &mut events);
        }
        assert!(slow.stats.score > 0);
        assert!(fast.stats.score > slow.stats.score * 3);
    }

    #[test]
    fn test_offscreen_entities_are_culled_before_collision() {
        let mut state = quiet_running();
        let scale = state.tuning.hitbox_scale;
        let ground = state.ground_line();
        let (ow, oh) = (state.tuning.obstacle_width, state.tuning.obstacle_height);
        let ps = state.tuning.pickup_size;

        // Trailing edges already past the left boundary
        let obstacle_x = -ow - 1.0;
        let center_x = obstacle_x + ow / 2.0;
        state.push_entity(EntityKind::Obstacle, Vec2::new(obstacle_x, ground - oh));

        // Park the character off the field, centered on the obstacle
        let character = &mut state.character;
        character.pos.x = center_x - character.size.x / 2.0;
        let center_y = character.pos.y + character.size.y / 2.0;
        state.push_entity(
            EntityKind::RestorativePickup,
            Vec2::new(center_x - ps / 2.0, center_y - ps / 2.0),
        );
        state.stats.lives = 2;

        let character_box = state.character.hitbox(scale);
        assert!(character_box.overlaps(&state.obstacles[0].hitbox(scale)));
        assert!(character_box.overlaps(&state.pickups[0].hitbox(scale)));

        let mut events = Vec::new();
        tick(&mut state, &TickInput::default(), DT, &mut events);
        assert!(state.obstacles.is_empty());
        assert!(state.pickups.is_empty());
        assert_eq!(state.stats.lives, 2);
        assert_eq!(state.stats.beans_collected, 0);
        assert!(!events.iter().any(|e| matches!(
            e,
            GameEvent::LifeLost { .. } | GameEvent::PickupCollected { .. }
        )));
    }

    #[test]
    fn test_spawns_land_at_right_edge_in_order() {
        let mut state = running(42);
        let mut events = Vec::new();
        // ~3.4 s: first obstacle (2 s) and first pickup (3 s) are due
        for _ in 0..205 {
            tick(&mut state, &TickInput::default(), DT, &mut events);
        }
        assert!(!state.obstacles.is_empty());
        assert!(!state.pickups.is_empty());
        let ground = state.ground_line();
        for ob in &state.obstacles {
            assert!(ob.pos.x <= state.tuning.field_width);
            assert_eq!(ob.pos.y + ob.size.y, ground);
        }
        for pair in state.obstacles.windows(2) {
            assert!(pair[0].id < pair[1].id);
            assert!(pair[0].pos.x < pair[1].pos.x);
        }
        assert_eq!(state.spawner.pickups_spawned as usize, state.pickups.len());
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = running(99999);
        let mut b = running(99999);
        let inputs = [jump(), TickInput::default(), TickInput::default()];
        let mut events = Vec::new();
        for i in 0..2000 {
            let input = &inputs[i % inputs.len()];
            tick(&mut a, input, DT, &mut events);
            tick(&mut b, input, DT, &mut events);
        }
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
