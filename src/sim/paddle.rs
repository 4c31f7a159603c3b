//! The player's paddle
//!
//! The paddle is split into five equal-width zones. The outer four launch
//! the ball at fixed angles (keeping its speed); the middle zone bounces it
//! off whichever side was struck, like a block.

use serde::{Deserialize, Serialize};

use super::collision::{Collidable, Hit, HitResponse, SurfaceKind};
use super::point::Point;
use super::rect::Rect;
use super::velocity::Velocity;
use crate::consts::{
    PADDLE_FLOOR_GAP, PADDLE_HEIGHT, PADDLE_ZONE_ANGLES, WINDOW_HEIGHT, WINDOW_WIDTH,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    rect: Rect,
    /// Horizontal speed in units per second
    pub speed: f64,
}

impl Paddle {
    pub fn new(rect: Rect, speed: f64) -> Self {
        Self { rect, speed }
    }

    /// A paddle of the given width centred at the bottom of the play field
    pub fn centered(width: f64, speed: f64) -> Self {
        let x = (WINDOW_WIDTH - width) / 2.0;
        let y = WINDOW_HEIGHT - PADDLE_FLOOR_GAP - PADDLE_HEIGHT;
        Self::new(Rect::from_coords(x, y, width, PADDLE_HEIGHT), speed)
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Move horizontally by `direction * speed * dt`, staying within `[min_x, max_x]`
    pub fn slide(&mut self, direction: f64, dt: f64, min_x: f64, max_x: f64) {
        let max_left = (max_x - self.rect.width).max(min_x);
        let x = self.rect.left() + direction * self.speed * dt;
        self.rect.top_left.x = x.clamp(min_x, max_left);
    }

    /// Launch angle for a contact at `x`, `None` for the middle zone or off the paddle.
    ///
    /// The four angled zones own their boundaries: a contact exactly at the
    /// edge of the middle zone still launches the ball at an angle.
    pub fn zone_angle(&self, x: f64) -> Option<f64> {
        let zone_width = self.rect.width / PADDLE_ZONE_ANGLES.len() as f64;
        if zone_width <= 0.0 || x < self.rect.left() || x > self.rect.right() {
            return None;
        }
        let offset = x - self.rect.left();
        let zone = if offset < zone_width {
            0
        } else if offset <= 2.0 * zone_width {
            1
        } else if offset < 3.0 * zone_width {
            2
        } else if offset <= 4.0 * zone_width {
            3
        } else {
            4
        };
        PADDLE_ZONE_ANGLES[zone]
    }

    pub fn center(&self) -> Point {
        self.rect.center()
    }
}

impl Collidable for Paddle {
    fn collision_rect(&self) -> Rect {
        self.rect
    }

    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Paddle
    }

    fn hit(&mut self, hit: &Hit, velocity: Velocity) -> HitResponse {
        let new_velocity = match self.zone_angle(hit.point.x) {
            Some(angle) => Velocity::from_angle_and_speed(angle, velocity.speed()),
            None => velocity.reflect(self.rect.sides_at(hit.point, hit.tolerance)),
        };
        HitResponse::silent(new_velocity)
    }
}
