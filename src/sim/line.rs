//! Line segments and segment intersection
//!
//! Travel segments are built fresh every tick from a ball's center and its
//! projected end-of-frame position; rectangle edges are built on demand.

use serde::{Deserialize, Serialize};

use super::point::{Orientation, Point, Tolerance, closest, on_segment, orientation};
use super::rect::Rect;

/// A directed segment from `start` to `end`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point,
    pub end: Point,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    #[inline]
    pub fn middle(&self) -> Point {
        (self.start + self.end) * 0.5
    }

    /// Vertical within the slope tolerance
    #[inline]
    pub fn is_vertical(&self, tol: Tolerance) -> bool {
        (self.start.x - self.end.x).abs() < tol.slope
    }

    /// Slope `dy/dx`, `None` for vertical segments
    pub fn slope(&self, tol: Tolerance) -> Option<f64> {
        if self.is_vertical(tol) {
            return None;
        }
        let d = self.end - self.start;
        Some(d.y / d.x)
    }

    /// Same segment in either direction, endpoints compared with the point tolerance
    pub fn approx_eq(&self, other: &Line, tol: Tolerance) -> bool {
        (tol.points_eq(self.start, other.start) && tol.points_eq(self.end, other.end))
            || (tol.points_eq(self.start, other.end) && tol.points_eq(self.end, other.start))
    }

    /// Four-orientation segment intersection test.
    ///
    /// General case: each segment's endpoints fall on different sides of the
    /// other. Degenerate case: an endpoint is collinear with the other segment
    /// and lies within its bounding box (touching or overlapping segments).
    /// Zero-length segments never intersect.
    pub fn is_intersecting(&self, other: &Line, tol: Tolerance) -> bool {
        if tol.is_degenerate(self.start, self.end) || tol.is_degenerate(other.start, other.end) {
            return false;
        }

        let (p1, q1) = (self.start, self.end);
        let (p2, q2) = (other.start, other.end);
        let eps = tol.orientation;

        let o1 = orientation(p1, q1, p2, eps);
        let o2 = orientation(p1, q1, q2, eps);
        let o3 = orientation(p2, q2, p1, eps);
        let o4 = orientation(p2, q2, q1, eps);

        if o1 != o2 && o3 != o4 {
            return true;
        }

        (o1 == Orientation::Collinear && on_segment(p2, p1, q1, 0.0))
            || (o2 == Orientation::Collinear && on_segment(q2, p1, q1, 0.0))
            || (o3 == Orientation::Collinear && on_segment(p1, p2, q2, 0.0))
            || (o4 == Orientation::Collinear && on_segment(q1, p2, q2, 0.0))
    }

    /// Intersection point of two segments.
    ///
    /// Precondition: `self.is_intersecting(other, tol)`. The result is
    /// meaningless otherwise; use [`Line::intersection_with`] when the test
    /// has not been made. Collinear overlapping segments yield the overlap
    /// endpoint closest to `self.start`.
    pub fn intersection_point(&self, other: &Line, tol: Tolerance) -> Point {
        debug_assert!(
            self.is_intersecting(other, tol),
            "intersection_point called on disjoint segments {self:?} / {other:?}"
        );

        let d1 = self.end - self.start;
        let d2 = other.end - other.start;

        if (d1.x * d2.y - d1.y * d2.x).abs() <= tol.orientation {
            return self.overlap_point(other, tol);
        }

        match (self.slope(tol), other.slope(tol)) {
            // y = m(x - x0) + y0 of the other line at the vertical's x
            (None, Some(m2)) => {
                let x = self.start.x;
                Point::new(x, m2 * (x - other.start.x) + other.start.y)
            }
            (Some(m1), None) => {
                let x = other.start.x;
                Point::new(x, m1 * (x - self.start.x) + self.start.y)
            }
            (Some(m1), Some(m2)) => {
                let (x1, y1) = (self.start.x, self.start.y);
                let (x2, y2) = (other.start.x, other.start.y);
                let x = (y2 - y1 + m1 * x1 - m2 * x2) / (m1 - m2);
                let mut y = m1 * (x - x1) + y1;
                // Horizontal edges give their exact y back
                if d2.y == 0.0 {
                    y = y2;
                } else if d1.y == 0.0 {
                    y = y1;
                }
                Point::new(x, y)
            }
            // Both vertical but not parallel within tolerance: nearly coincident
            (None, None) => self.overlap_point(other, tol),
        }
    }

    /// Checked intersection: `None` when the segments do not meet
    pub fn intersection_with(&self, other: &Line, tol: Tolerance) -> Option<Point> {
        self.is_intersecting(other, tol)
            .then(|| self.intersection_point(other, tol))
    }

    /// Closest point to `self.start` where this segment crosses an edge of `rect`
    pub fn closest_intersection_to_start(&self, rect: &Rect, tol: Tolerance) -> Option<Point> {
        closest(self.start, &rect.intersection_points(self, tol))
    }

    /// Shared endpoint of two overlapping collinear segments nearest to `self.start`
    fn overlap_point(&self, other: &Line, tol: Tolerance) -> Point {
        let eps = tol.orientation;
        let candidates: Vec<Point> = [self.start, self.end, other.start, other.end]
            .into_iter()
            .filter(|&p| {
                on_segment(p, self.start, self.end, eps)
                    && on_segment(p, other.start, other.end, eps)
            })
            .collect();
        closest(self.start, &candidates).unwrap_or(self.start)
    }
}
