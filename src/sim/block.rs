//! Rectangular surfaces: breakable blocks, borders and the kill zone

use serde::{Deserialize, Serialize};

use super::collision::{Collidable, Hit, HitResponse, SurfaceKind};
use super::events::HitEvent;
use super::rect::Rect;
use super::velocity::Velocity;

/// A breakable block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    rect: Rect,
    /// Hits left before the block is destroyed
    durability: u32,
}

impl Block {
    pub fn new(rect: Rect, durability: u32) -> Self {
        Self { rect, durability }
    }

    pub fn durability(&self) -> u32 {
        self.durability
    }

    pub fn is_destroyed(&self) -> bool {
        self.durability == 0
    }
}

impl Collidable for Block {
    fn collision_rect(&self) -> Rect {
        self.rect
    }

    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Block
    }

    fn hit(&mut self, hit: &Hit, velocity: Velocity) -> HitResponse {
        self.durability = self.durability.saturating_sub(1);

        let sides = self.rect.sides_at(hit.point, hit.tolerance);
        HitResponse {
            velocity: velocity.reflect(sides),
            event: Some(HitEvent {
                surface: SurfaceKind::Block,
                collidable: hit.collidable,
                ball: hit.ball,
                point: hit.point,
                durability: Some(self.durability),
            }),
        }
    }
}

/// Indestructible wall around the play field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Border {
    rect: Rect,
}

impl Border {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }
}

impl Collidable for Border {
    fn collision_rect(&self) -> Rect {
        self.rect
    }

    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Border
    }

    fn hit(&mut self, hit: &Hit, velocity: Velocity) -> HitResponse {
        let sides = self.rect.sides_at(hit.point, hit.tolerance);
        HitResponse {
            velocity: velocity.reflect(sides),
            event: Some(HitEvent {
                surface: SurfaceKind::Border,
                collidable: hit.collidable,
                ball: hit.ball,
                point: hit.point,
                durability: None,
            }),
        }
    }
}

/// Strip below the paddle; a ball touching it is lost
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KillZone {
    rect: Rect,
}

impl KillZone {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }
}

impl Collidable for KillZone {
    fn collision_rect(&self) -> Rect {
        self.rect
    }

    fn kind(&self) -> SurfaceKind {
        SurfaceKind::KillZone
    }

    /// No bounce: the ball keeps its velocity and a listener removes it
    fn hit(&mut self, hit: &Hit, velocity: Velocity) -> HitResponse {
        HitResponse {
            velocity,
            event: Some(HitEvent {
                surface: SurfaceKind::KillZone,
                collidable: hit.collidable,
                ball: hit.ball,
                point: hit.point,
                durability: None,
            }),
        }
    }
}
