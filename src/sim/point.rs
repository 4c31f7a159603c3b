//! Point primitives and orientation tests
//!
//! Points are plain `DVec2` values. Every tolerance-sensitive predicate takes
//! its epsilon explicitly so the play field scale can be tuned in settings.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::approx_eq;
use crate::consts::{EDGE_EPSILON, ORIENTATION_EPSILON, POINT_EPSILON, SLOPE_EPSILON};

/// A 2D point in play field coordinates (y grows downward)
pub type Point = DVec2;

/// Epsilons used by the geometric predicates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// Coarse positional tolerance (pixel scale): point equality, fallback side classification
    pub point: f64,
    /// Tight tolerance for deciding which edge a collision point lies on
    pub edge: f64,
    /// Vertical line detection on the x delta
    pub slope: f64,
    /// Zero test for the orientation determinant
    pub orientation: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            point: POINT_EPSILON,
            edge: EDGE_EPSILON,
            slope: SLOPE_EPSILON,
            orientation: ORIENTATION_EPSILON,
        }
    }
}

impl Tolerance {
    /// Exact predicates, useful in tests
    pub const EXACT: Tolerance = Tolerance {
        point: 0.0,
        edge: 0.0,
        slope: 0.0,
        orientation: 0.0,
    };

    /// Tolerant point equality (both axes within `point`)
    #[inline]
    pub fn points_eq(&self, a: Point, b: Point) -> bool {
        approx_eq(a.x, b.x, self.point) && approx_eq(a.y, b.y, self.point)
    }

    /// True if the segment `a`-`b` has no length
    #[inline]
    pub fn is_degenerate(&self, a: Point, b: Point) -> bool {
        approx_eq(a.x, b.x, self.orientation) && approx_eq(a.y, b.y, self.orientation)
    }
}

/// Turn direction of an ordered point triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

impl Orientation {
    /// The orientation of the same triple with the last two points swapped
    pub fn reversed(self) -> Self {
        match self {
            Orientation::Collinear => Orientation::Collinear,
            Orientation::Clockwise => Orientation::CounterClockwise,
            Orientation::CounterClockwise => Orientation::Clockwise,
        }
    }
}

/// Euclidean distance
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Orientation of `(p, p1, p2)`.
///
/// Sign of `(p1 - p) x (p2 - p)`, which equals the classic
/// `(p1.x - p.x)(p2.y - p1.y) - (p1.y - p.y)(p2.x - p1.x)`. Magnitudes at or
/// below `epsilon` count as collinear. Written so that swapping `p1` and `p2`
/// negates the determinant bit for bit.
pub fn orientation(p: Point, p1: Point, p2: Point, epsilon: f64) -> Orientation {
    let u = p1 - p;
    let v = p2 - p;
    let det = u.x * v.y - u.y * v.x;

    if det.abs() <= epsilon {
        Orientation::Collinear
    } else if det > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// True if `p` lies within the bounding box of `a`-`b`, grown by `epsilon`.
///
/// Only meaningful once `p` is known to be collinear with the segment.
#[inline]
pub fn on_segment(p: Point, a: Point, b: Point, epsilon: f64) -> bool {
    p.x <= a.x.max(b.x) + epsilon
        && p.x >= a.x.min(b.x) - epsilon
        && p.y <= a.y.max(b.y) + epsilon
        && p.y >= a.y.min(b.y) - epsilon
}

/// The candidate nearest to `p`; ties keep the first encountered.
///
/// Returns `None` for an empty candidate list.
pub fn closest(p: Point, candidates: &[Point]) -> Option<Point> {
    let mut best: Option<(Point, f64)> = None;
    for &candidate in candidates {
        let d = distance(p, candidate);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((candidate, d)),
        }
    }
    best.map(|(point, _)| point)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        assert!((distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_orientation_basic() {
        // Screen coordinates: y grows down, so this turn is clockwise on screen
        let o = orientation(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            ORIENTATION_EPSILON,
        );
        assert_eq!(o, Orientation::Clockwise);

        let o = orientation(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
            ORIENTATION_EPSILON,
        );
        assert_eq!(o, Orientation::Collinear);
    }

    #[test]
    fn test_orientation_epsilon_absorbs_noise() {
        let p = Point::new(0.0, 0.0);
        let a = Point::new(1.0, 1.0);
        let b = Point::new(2.0, 2.0 + 1e-12);
        assert_eq!(orientation(p, a, b, 1e-9), Orientation::Collinear);
        assert_ne!(orientation(p, a, b, 0.0), Orientation::Collinear);
    }

    #[test]
    fn test_orientation_symmetry() {
        let p = Point::new(3.5, -2.0);
        let a = Point::new(10.0, 7.25);
        let b = Point::new(-4.0, 1.0);
        let forward = orientation(p, a, b, ORIENTATION_EPSILON);
        let backward = orientation(p, b, a, ORIENTATION_EPSILON);
        assert_eq!(forward.reversed(), backward);
    }

    #[test]
    fn test_on_segment() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!(on_segment(Point::new(5.0, 0.0), a, b, 0.0));
        assert!(!on_segment(Point::new(11.0, 0.0), a, b, 0.0));
        assert!(on_segment(Point::new(10.05, 0.05), a, b, 0.1));
    }

    #[test]
    fn test_closest() {
        let p = Point::new(0.0, 0.0);
        assert_eq!(closest(p, &[]), None);

        let candidates = [
            Point::new(5.0, 0.0),
            Point::new(0.0, 2.0),
            Point::new(-2.0, 0.0),
        ];
        // Tie between (0, 2) and (-2, 0): first one wins
        assert_eq!(closest(p, &candidates), Some(Point::new(0.0, 2.0)));
    }

    #[test]
    fn test_points_eq_checks_both_axes() {
        let tol = Tolerance::default();
        assert!(tol.points_eq(Point::new(1.0, 1.0), Point::new(1.05, 0.95)));
        assert!(!tol.points_eq(Point::new(1.0, 1.0), Point::new(1.0, 5.0)));
    }
}
