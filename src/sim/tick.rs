//! Fixed timestep simulation tick
//!
//! Moves the paddle, advances every ball once, hands hit events to the
//! listeners and reports how the turn stands afterwards.

use super::ball::BallId;
use super::state::Level;
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Let the simulation steer the paddle towards the lowest ball
    pub autopilot: bool,
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No turn in progress; call [`Level::start_turn`]
    Idle,
    Running,
    /// The last block went this tick
    LevelCleared,
    /// The last ball went this tick and lives remain
    TurnLost,
    /// The last ball went this tick with the last life
    GameOver,
}

impl Level {
    pub fn tick(&mut self, input: &TickInput, dt: f64) -> TickOutcome {
        tick(self, input, dt)
    }
}

/// Advance the level by one fixed timestep
pub fn tick(level: &mut Level, input: &TickInput, dt: f64) -> TickOutcome {
    if !level.turn_active {
        return TickOutcome::Idle;
    }
    level.ticks += 1;

    let direction = if input.autopilot {
        autopilot_direction(level)
    } else {
        f64::from(u8::from(input.right)) - f64::from(u8::from(input.left))
    };
    if direction != 0.0 {
        if let Some(paddle) = level
            .paddle
            .and_then(|id| level.env.get_mut(id))
            .and_then(|s| s.as_paddle_mut())
        {
            paddle.slide(direction, dt, BORDER_SIZE, WINDOW_WIDTH - BORDER_SIZE);
        }
    }

    // Balls removed mid-tick are skipped; balls never join mid-tick.
    let ids: Vec<BallId> = level.balls.iter().map(|b| b.id).collect();
    let approach = level.settings.approach_factor;
    for id in ids {
        let Some(ball) = level.balls.iter_mut().find(|b| b.id == id) else {
            continue;
        };
        let report = ball.advance_with(&mut level.env, dt, approach);
        if let Some(event) = report.event {
            level.dispatch(&event);
        }
    }

    if level.counters.blocks_remaining == 0 && !level.cleared {
        level.cleared = true;
        level.counters.score += level.settings.level_clear_bonus;
        log::info!(
            "Level '{}' cleared after {} ticks, score {}",
            level.spec.name,
            level.ticks,
            level.counters.score
        );
        return TickOutcome::LevelCleared;
    }

    if level.counters.balls_remaining == 0 {
        level.turn_active = false;
        level.counters.lives = level.counters.lives.saturating_sub(1);
        if level.counters.lives == 0 {
            log::info!("Game over, final score {}", level.counters.score);
            return TickOutcome::GameOver;
        }
        log::info!("Turn lost, {} lives left", level.counters.lives);
        return TickOutcome::TurnLost;
    }

    TickOutcome::Running
}

/// Steer under the lowest ball, aiming a little off-centre so it leaves at an angle
fn autopilot_direction(level: &Level) -> f64 {
    let Some(paddle) = level.paddle() else {
        return 0.0;
    };
    let falling = level.balls.iter().filter(|b| b.velocity.dy > 0.0);
    let Some(ball) = falling
        .max_by(|a, b| a.center.y.total_cmp(&b.center.y))
        .or_else(|| level.balls.iter().max_by(|a, b| a.center.y.total_cmp(&b.center.y)))
    else {
        return 0.0;
    };

    let rect = paddle.rect();
    let offset = (level.ticks as f64 * 0.01).sin() * rect.width * 0.3;
    let target = ball.center.x - offset;
    let dead_band = (paddle.speed / f64::from(FRAMES_PER_SECOND)).max(1.0);

    let center = rect.center().x;
    if target < center - dead_band {
        -1.0
    } else if target > center + dead_band {
        1.0
    } else {
        0.0
    }
}
