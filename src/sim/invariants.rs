//! Structural invariants of a run
//!
//! Checked after every tick in debug builds. A violation is a bug in the
//! simulation, never something a player can cause.

use std::fmt;

use super::state::{GamePhase, GameState};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InvariantViolation {
    LivesAboveMax { lives: u8, max: u8 },
    RunningWithoutLives,
    TerminalWithLives { lives: u8 },
    SpeedOutOfRange { speed: f32 },
    NegativeTimer { timer: &'static str },
    ScoreDecreased { before: u64, after: u64 },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LivesAboveMax { lives, max } => write!(f, "lives {lives} above max {max}"),
            Self::RunningWithoutLives => write!(f, "running with zero lives"),
            Self::TerminalWithLives { lives } => write!(f, "terminal with {lives} lives left"),
            Self::SpeedOutOfRange { speed } => write!(f, "speed scale {speed} outside tuning range"),
            Self::NegativeTimer { timer } => write!(f, "timer {timer} went negative"),
            Self::ScoreDecreased { before, after } => {
                write!(f, "score decreased from {before} to {after}")
            }
        }
    }
}

impl std::error::Error for InvariantViolation {}

/// Check the invariants that hold at every tick boundary
pub fn check(state: &GameState) -> Result<(), InvariantViolation> {
    let stats = &state.stats;
    let tuning = &state.tuning;

    if stats.lives > tuning.max_lives {
        return Err(InvariantViolation::LivesAboveMax {
            lives: stats.lives,
            max: tuning.max_lives,
        });
    }
    match state.phase {
        GamePhase::Running if stats.lives == 0 => {
            return Err(InvariantViolation::RunningWithoutLives);
        }
        GamePhase::Terminal if stats.lives > 0 => {
            return Err(InvariantViolation::TerminalWithLives { lives: stats.lives });
        }
        _ => {}
    }
    if !(stats.speed_scale >= tuning.base_speed && stats.speed_scale <= tuning.max_speed) {
        return Err(InvariantViolation::SpeedOutOfRange {
            speed: stats.speed_scale,
        });
    }

    let timers = [
        ("score_timer_ms", stats.score_timer_ms),
        ("tier_cooldown_ms", stats.tier_cooldown_ms),
        ("obstacle_timer_ms", state.spawner.obstacle_timer_ms),
        ("pickup_timer_ms", state.spawner.pickup_timer_ms),
    ];
    for (timer, value) in timers {
        if value < 0.0 {
            return Err(InvariantViolation::NegativeTimer { timer });
        }
    }
    Ok(())
}

/// Score may only grow while a run is live
pub fn check_score_progress(before: u64, after: u64) -> Result<(), InvariantViolation> {
    if after < before {
        Err(InvariantViolation::ScoreDecreased { before, after })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Domain;
    use crate::tuning::Tuning;

    fn running() -> GameState {
        let mut state = GameState::new(Domain::Fire, Tuning::desktop(), 5);
        state.phase = GamePhase::Running;
        state
    }

    #[test]
    fn test_fresh_run_is_consistent() {
        assert_eq!(check(&running()), Ok(()));
    }

    #[test]
    fn test_detects_lives_phase_mismatch() {
        let mut state = running();
        state.stats.lives = 0;
        assert_eq!(check(&state), Err(InvariantViolation::RunningWithoutLives));

        state.phase = GamePhase::Terminal;
        assert_eq!(check(&state), Ok(()));

        state.stats.lives = 1;
        assert_eq!(
            check(&state),
            Err(InvariantViolation::TerminalWithLives { lives: 1 })
        );
    }

    #[test]
    fn test_detects_speed_and_lives_overflow() {
        let mut state = running();
        state.stats.speed_scale = state.tuning.max_speed + 0.5;
        assert!(matches!(
            check(&state),
            Err(InvariantViolation::SpeedOutOfRange { .. })
        ));

        let mut state = running();
        state.stats.lives = state.tuning.max_lives + 1;
        assert!(matches!(
            check(&state),
            Err(InvariantViolation::LivesAboveMax { .. })
        ));
    }

    #[test]
    fn test_score_progress() {
        assert_eq!(check_score_progress(10, 10), Ok(()));
        assert!(check_score_progress(10, 9).is_err());
    }
}
