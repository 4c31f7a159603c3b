//! Velocity as change in position per unit time
//!
//! Angles are in degrees, measured clockwise from "up" (0 = up, 90 = right),
//! matching screen coordinates where y grows downward.

use serde::{Deserialize, Serialize};

use super::point::Point;
use super::rect::Sides;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity {
    pub dx: f64,
    pub dy: f64,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { dx: 0.0, dy: 0.0 };

    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    pub fn from_angle_and_speed(angle_degrees: f64, speed: f64) -> Self {
        let angle = angle_degrees.to_radians();
        Self {
            dx: speed * angle.sin(),
            dy: -speed * angle.cos(),
        }
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.dx.hypot(self.dy)
    }

    /// Heading in degrees in `[0, 360)`, clockwise from up
    pub fn angle(&self) -> f64 {
        self.dx.atan2(-self.dy).to_degrees().rem_euclid(360.0)
    }

    /// Position after moving for `dt` from `point`
    #[inline]
    pub fn apply_to_point(&self, point: Point, dt: f64) -> Point {
        Point::new(point.x + dt * self.dx, point.y + dt * self.dy)
    }

    /// Bounce off the struck sides of a rectangle.
    ///
    /// Each struck side forces the matching component to point away from the
    /// surface: top sends the ball up, bottom down, left leftward, right
    /// rightward. A flat rectangle reports both opposite faces at once; the
    /// face met is the one facing the incoming ball, so that component is
    /// simply reversed. Magnitudes are preserved, so speed never changes.
    pub fn reflect(self, sides: Sides) -> Self {
        let mut v = self;
        match (sides.top, sides.bottom) {
            (true, true) => v.dy = -v.dy,
            (true, false) => v.dy = -v.dy.abs(),
            (false, true) => v.dy = v.dy.abs(),
            (false, false) => {}
        }
        match (sides.left, sides.right) {
            (true, true) => v.dx = -v.dx,
            (true, false) => v.dx = -v.dx.abs(),
            (false, true) => v.dx = v.dx.abs(),
            (false, false) => {}
        }
        v
    }
}
