//! Brickfall - a brick breaker collision engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, collisions, level state)
//! - `settings`: Data-driven tolerances and scoring

pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::{Level, LevelSpec, Tolerance};

/// Game configuration constants
pub mod consts {
    /// Play field dimensions
    pub const WINDOW_WIDTH: f64 = 800.0;
    pub const WINDOW_HEIGHT: f64 = 600.0;
    pub const BORDER_SIZE: f64 = 25.0;

    /// Default frame rate of the fixed-step loop
    pub const FRAMES_PER_SECOND: u32 = 60;

    /// Ball defaults
    pub const BALL_RADIUS: f64 = 5.0;
    pub const BALL_START_X: f64 = 400.0;
    pub const BALL_START_Y: f64 = 500.0;

    /// Paddle defaults
    pub const PADDLE_HEIGHT: f64 = 15.0;
    /// Gap between paddle bottom and window bottom, as a share of the border
    pub const PADDLE_FLOOR_GAP: f64 = 0.3 * BORDER_SIZE;

    /// Kill zone strip below the paddle (replaces the bottom border)
    pub const KILL_ZONE_X: f64 = -1000.0;
    pub const KILL_ZONE_Y: f64 = 596.0;
    pub const KILL_ZONE_WIDTH: f64 = 2800.0;
    pub const KILL_ZONE_HEIGHT: f64 = 5.0;

    /// Share of the distance to a collision point the ball covers on impact
    pub const APPROACH_FACTOR: f64 = 0.9999;

    /// Default tolerances
    pub const POINT_EPSILON: f64 = 0.1;
    pub const EDGE_EPSILON: f64 = 1e-9;
    pub const SLOPE_EPSILON: f64 = 0.001;
    pub const ORIENTATION_EPSILON: f64 = 1e-9;

    /// Paddle launch angles per zone, left to right (degrees, 0 = up).
    /// `None` keeps the side-based bounce.
    pub const PADDLE_ZONE_ANGLES: [Option<f64>; 5] =
        [Some(300.0), Some(330.0), None, Some(30.0), Some(60.0)];
}

/// Approximate float comparison
#[inline]
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() <= epsilon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_eq() {
        assert!(approx_eq(1.0, 1.05, 0.1));
        assert!(!approx_eq(1.0, 1.2, 0.1));
        assert!(approx_eq(-3.0, -3.0, 0.0));
    }
}
