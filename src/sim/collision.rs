//! Collidable surfaces and the collision environment
//!
//! The environment owns every surface a ball can strike and answers one
//! question: what does this travel segment hit first? It never moves
//! anything itself.

use serde::{Deserialize, Serialize};

use super::ball::BallId;
use super::block::{Block, Border, KillZone};
use super::events::HitEvent;
use super::line::Line;
use super::paddle::Paddle;
use super::point::{Point, Tolerance};
use super::rect::Rect;
use super::velocity::Velocity;

/// Handle to a collidable owned by an [`Environment`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CollidableId(pub u32);

/// Broad category of a surface, used by listeners and the paddle lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceKind {
    Block,
    Border,
    KillZone,
    Paddle,
}

/// Everything a surface learns about an impact
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    /// The surface being hit
    pub collidable: CollidableId,
    /// The ball doing the hitting
    pub ball: BallId,
    /// Ball center at impact (already moved up to the collision point)
    pub ball_center: Point,
    /// Where the travel segment met the surface's rectangle
    pub point: Point,
    /// Tolerances of the owning environment
    pub tolerance: Tolerance,
}

/// Outcome of a hit: the ball's new velocity and an optional notification
#[derive(Debug, Clone, Copy)]
pub struct HitResponse {
    pub velocity: Velocity,
    pub event: Option<HitEvent>,
}

impl HitResponse {
    /// Bounce without notifying anyone
    pub fn silent(velocity: Velocity) -> Self {
        Self {
            velocity,
            event: None,
        }
    }
}

/// Anything a ball can bounce off
pub trait Collidable {
    /// Bounding rectangle used for collision queries
    fn collision_rect(&self) -> Rect;

    fn kind(&self) -> SurfaceKind;

    /// Compute the ball's outgoing velocity. May update the surface's own
    /// state (durability) and report an event for listeners.
    fn hit(&mut self, hit: &Hit, velocity: Velocity) -> HitResponse;
}

/// Nearest collision along a travel segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionInfo {
    pub point: Point,
    pub collidable: CollidableId,
}

/// Owner of the collidable set for one level playthrough
#[derive(Debug, Clone)]
pub struct Environment<C> {
    /// Play field extent for generic bounds checks
    bounds: Rect,
    tolerance: Tolerance,
    /// Insertion order is the tie-break order
    entries: Vec<(CollidableId, C)>,
    next_id: u32,
}

impl<C: Collidable> Environment<C> {
    pub fn new(bounds: Rect, tolerance: Tolerance) -> Self {
        Self {
            bounds,
            tolerance,
            entries: Vec::new(),
            next_id: 1,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add a collidable, returning its handle
    pub fn add(&mut self, collidable: C) -> CollidableId {
        let id = CollidableId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, collidable));
        id
    }

    /// Remove a collidable. Removing an absent handle is a no-op.
    pub fn remove(&mut self, id: CollidableId) -> Option<C> {
        let index = self.entries.iter().position(|(entry_id, _)| *entry_id == id)?;
        Some(self.entries.remove(index).1)
    }

    pub fn contains(&self, id: CollidableId) -> bool {
        self.entries.iter().any(|(entry_id, _)| *entry_id == id)
    }

    pub fn get(&self, id: CollidableId) -> Option<&C> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, c)| c)
    }

    pub fn get_mut(&mut self, id: CollidableId) -> Option<&mut C> {
        self.entries
            .iter_mut()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, c)| c)
    }

    /// Collidables in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (CollidableId, &C)> {
        self.entries.iter().map(|(id, c)| (*id, c))
    }

    /// Rectangle of the first paddle, if one is present
    pub fn paddle_rect(&self) -> Option<Rect> {
        self.entries
            .iter()
            .find(|(_, c)| c.kind() == SurfaceKind::Paddle)
            .map(|(_, c)| c.collision_rect())
    }

    /// Nearest collision along `trajectory`, or `None` if nothing is crossed.
    ///
    /// One pass keeps the best `(point, owner)` pair. Only a strictly closer
    /// point replaces the current best, so equidistant hits (a point on an
    /// edge shared by adjacent blocks) go to the earliest-added collidable.
    pub fn get_closest_collision(&self, trajectory: &Line) -> Option<CollisionInfo> {
        let mut best: Option<(CollisionInfo, f64)> = None;

        for (id, collidable) in &self.entries {
            let rect = collidable.collision_rect();
            let Some(point) = trajectory.closest_intersection_to_start(&rect, self.tolerance)
            else {
                continue;
            };

            let dist = trajectory.start.distance(point);
            let closer = best.is_none_or(|(_, best_dist)| dist < best_dist);
            if closer {
                best = Some((
                    CollisionInfo {
                        point,
                        collidable: *id,
                    },
                    dist,
                ));
            }
        }

        best.map(|(info, _)| info)
    }

    /// First collidable whose boundary passes through `point`
    pub fn collidable_at(&self, point: Point) -> Option<CollidableId> {
        self.entries
            .iter()
            .find(|(_, c)| c.collision_rect().point_on_boundary(point, self.tolerance))
            .map(|(id, _)| *id)
    }

    /// Inclusive containment against the play field extent
    pub fn is_in_bounds(&self, point: Point) -> bool {
        self.bounds.contains(point)
    }
}

/// The closed set of surfaces a level is built from
#[derive(Debug, Clone)]
pub enum Surface {
    Block(Block),
    Border(Border),
    KillZone(KillZone),
    Paddle(Paddle),
}

impl Surface {
    pub fn as_block(&self) -> Option<&Block> {
        match self {
            Surface::Block(block) => Some(block),
            _ => None,
        }
    }

    pub fn as_paddle(&self) -> Option<&Paddle> {
        match self {
            Surface::Paddle(paddle) => Some(paddle),
            _ => None,
        }
    }

    pub fn as_paddle_mut(&mut self) -> Option<&mut Paddle> {
        match self {
            Surface::Paddle(paddle) => Some(paddle),
            _ => None,
        }
    }
}

impl Collidable for Surface {
    fn collision_rect(&self) -> Rect {
        match self {
            Surface::Block(block) => block.collision_rect(),
            Surface::Border(border) => border.collision_rect(),
            Surface::KillZone(zone) => zone.collision_rect(),
            Surface::Paddle(paddle) => paddle.collision_rect(),
        }
    }

    fn kind(&self) -> SurfaceKind {
        match self {
            Surface::Block(_) => SurfaceKind::Block,
            Surface::Border(_) => SurfaceKind::Border,
            Surface::KillZone(_) => SurfaceKind::KillZone,
            Surface::Paddle(_) => SurfaceKind::Paddle,
        }
    }

    fn hit(&mut self, hit: &Hit, velocity: Velocity) -> HitResponse {
        match self {
            Surface::Block(block) => block.hit(hit, velocity),
            Surface::Border(border) => border.hit(hit, velocity),
            Surface::KillZone(zone) => zone.hit(hit, velocity),
            Surface::Paddle(paddle) => paddle.hit(hit, velocity),
        }
    }
}
