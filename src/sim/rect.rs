//! Axis-aligned rectangles for blocks, borders and the paddle
//!
//! A rectangle is defined by its top-left corner, width and height
//! (y grows downward). Corners and edges are derived on demand, clockwise
//! from the top-left:
//! - corners: top-left, top-right, bottom-right, bottom-left
//! - edges: top (left to right), right (top to bottom),
//!   bottom (left to right), left (top to bottom)

use serde::{Deserialize, Serialize};

use super::line::Line;
use super::point::{Point, Tolerance, on_segment};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub top_left: Point,
    /// Horizontal extent (never negative)
    pub width: f64,
    /// Vertical extent (never negative)
    pub height: f64,
}

/// Which edges of a rectangle a point lies on (corners set two flags)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sides {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Sides {
    pub fn any(&self) -> bool {
        self.top || self.right || self.bottom || self.left
    }

    pub fn is_corner(&self) -> bool {
        (self.top || self.bottom) && (self.left || self.right)
    }
}

impl Rect {
    /// Negative sizes are clamped to zero
    pub fn new(top_left: Point, width: f64, height: f64) -> Self {
        if width < 0.0 || height < 0.0 {
            log::warn!(
                "Clamping negative rectangle size {}x{} at {:?}",
                width,
                height,
                top_left
            );
        }
        Self {
            top_left,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn from_coords(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(Point::new(x, y), width, height)
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.top_left.x
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.top_left.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.top_left.y
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top_left.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.top_left.x + self.width / 2.0,
            self.top_left.y + self.height / 2.0,
        )
    }

    /// Corner points, clockwise from top-left
    pub fn corners(&self) -> [Point; 4] {
        [
            self.top_left,
            Point::new(self.right(), self.top()),
            Point::new(self.right(), self.bottom()),
            Point::new(self.left(), self.bottom()),
        ]
    }

    /// Boundary edges, clockwise: top, right, bottom, left
    pub fn edges(&self) -> [Line; 4] {
        let [tl, tr, br, bl] = self.corners();
        [
            Line::new(tl, tr),
            Line::new(tr, br),
            Line::new(bl, br),
            Line::new(tl, bl),
        ]
    }

    pub fn top_edge(&self) -> Line {
        self.edges()[0]
    }

    pub fn right_edge(&self) -> Line {
        self.edges()[1]
    }

    pub fn bottom_edge(&self) -> Line {
        self.edges()[2]
    }

    pub fn left_edge(&self) -> Line {
        self.edges()[3]
    }

    /// Intersections of `segment` with each edge it crosses, in edge order
    pub fn intersection_points(&self, segment: &Line, tol: Tolerance) -> Vec<Point> {
        self.edges()
            .iter()
            .filter(|edge| segment.is_intersecting(edge, tol))
            .map(|edge| segment.intersection_point(edge, tol))
            .collect()
    }

    /// Inclusive containment test
    pub fn contains(&self, point: Point) -> bool {
        self.left() <= point.x
            && point.x <= self.right()
            && self.top() <= point.y
            && point.y <= self.bottom()
    }

    pub fn is_on_top(&self, point: Point, epsilon: f64) -> bool {
        let edge = self.top_edge();
        on_segment(point, edge.start, edge.end, epsilon)
    }

    pub fn is_on_right(&self, point: Point, epsilon: f64) -> bool {
        let edge = self.right_edge();
        on_segment(point, edge.start, edge.end, epsilon)
    }

    pub fn is_on_bottom(&self, point: Point, epsilon: f64) -> bool {
        let edge = self.bottom_edge();
        on_segment(point, edge.start, edge.end, epsilon)
    }

    pub fn is_on_left(&self, point: Point, epsilon: f64) -> bool {
        let edge = self.left_edge();
        on_segment(point, edge.start, edge.end, epsilon)
    }

    fn sides_within(&self, point: Point, epsilon: f64) -> Sides {
        Sides {
            top: self.is_on_top(point, epsilon),
            right: self.is_on_right(point, epsilon),
            bottom: self.is_on_bottom(point, epsilon),
            left: self.is_on_left(point, epsilon),
        }
    }

    /// Classify the edges a boundary point lies on.
    ///
    /// Collision points are snapped onto the edge they cross, so the tight
    /// `edge` epsilon decides first. Only a point that misses every edge at
    /// that precision is classified with the coarse `point` epsilon.
    pub fn sides_at(&self, point: Point, tol: Tolerance) -> Sides {
        let sides = self.sides_within(point, tol.edge);
        if sides.any() {
            sides
        } else {
            self.sides_within(point, tol.point)
        }
    }

    /// True if the point lies on any edge
    pub fn point_on_boundary(&self, point: Point, tol: Tolerance) -> bool {
        self.sides_at(point, tol).any()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners_clockwise() {
        let rect = Rect::from_coords(10.0, 20.0, 30.0, 40.0);
        assert_eq!(
            rect.corners(),
            [
                Point::new(10.0, 20.0),
                Point::new(40.0, 20.0),
                Point::new(40.0, 60.0),
                Point::new(10.0, 60.0),
            ]
        );
    }

    #[test]
    fn test_edges_directionality() {
        let rect = Rect::from_coords(0.0, 0.0, 10.0, 5.0);
        let [top, right, bottom, left] = rect.edges();
        assert_eq!(top, Line::from_coords(0.0, 0.0, 10.0, 0.0));
        assert_eq!(right, Line::from_coords(10.0, 0.0, 10.0, 5.0));
        assert_eq!(bottom, Line::from_coords(0.0, 5.0, 10.0, 5.0));
        assert_eq!(left, Line::from_coords(0.0, 0.0, 0.0, 5.0));
    }

    #[test]
    fn test_negative_size_clamped() {
        let rect = Rect::from_coords(0.0, 0.0, -5.0, 3.0);
        assert_eq!(rect.width, 0.0);
        assert_eq!(rect.height, 3.0);
    }

    #[test]
    fn test_contains_inclusive() {
        let rect = Rect::from_coords(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Point::new(0.0, 0.0)));
        assert!(rect.contains(Point::new(10.0, 10.0)));
        assert!(rect.contains(Point::new(5.0, 5.0)));
        assert!(!rect.contains(Point::new(10.01, 5.0)));
    }

    #[test]
    fn test_intersection_points() {
        let tol = Tolerance::default();
        let rect = Rect::from_coords(0.0, 0.0, 10.0, 10.0);
        let through = Line::from_coords(5.0, -5.0, 5.0, 15.0);
        let points = rect.intersection_points(&through, tol);
        assert_eq!(points, vec![Point::new(5.0, 0.0), Point::new(5.0, 10.0)]);

        let outside = Line::from_coords(20.0, -5.0, 20.0, 15.0);
        assert!(rect.intersection_points(&outside, tol).is_empty());
    }

    #[test]
    fn test_sides_at() {
        let tol = Tolerance::default();
        let rect = Rect::from_coords(0.0, 0.0, 10.0, 10.0);

        let top = rect.sides_at(Point::new(5.0, 0.0), tol);
        assert!(top.top && !top.left && !top.right && !top.bottom);

        let corner = rect.sides_at(Point::new(10.0, 10.0), tol);
        assert!(corner.right && corner.bottom && corner.is_corner());

        // Slight float drift still lands on the edge
        let drifted = rect.sides_at(Point::new(0.0000001, 4.0), tol);
        assert!(drifted.left && !drifted.top && !drifted.bottom);
        assert!(!rect.point_on_boundary(Point::new(5.0, 5.0), tol));
    }

    #[test]
    fn test_top_hit_near_left_end_is_not_a_corner() {
        let tol = Tolerance::default();
        let rect = Rect::from_coords(225.0, 100.0, 50.0, 25.0);
        let sides = rect.sides_at(Point::new(225.05, 100.0), tol);
        assert!(sides.top);
        assert!(!sides.left && !sides.is_corner());

        let corner = rect.sides_at(Point::new(225.0, 100.0), tol);
        assert!(corner.top && corner.left);
    }

    #[test]
    fn test_flat_rect_reports_both_faces() {
        let tol = Tolerance::default();
        let rect = Rect::from_coords(350.0, 200.0, 100.0, 0.0);
        let sides = rect.sides_at(Point::new(400.0, 200.0), tol);
        assert!(sides.top && sides.bottom);
        assert!(!sides.left && !sides.right);
    }

    #[test]
    fn test_zero_area_rect_is_never_struck() {
        let tol = Tolerance::default();
        let rect = Rect::from_coords(5.0, 5.0, 0.0, 0.0);
        let through = Line::from_coords(0.0, 0.0, 10.0, 10.0);
        assert!(rect.intersection_points(&through, tol).is_empty());
    }
}
