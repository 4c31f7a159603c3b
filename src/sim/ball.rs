//! Ball entity and its per-tick stepper
//!
//! Each tick a ball either travels its full segment or stops just short of
//! the first surface it would strike and takes that surface's bounce.
//! At most one bounce happens per tick: a very fast ball can tunnel through
//! thin geometry, which the fixed 60 Hz step keeps out of normal play.

use serde::{Deserialize, Serialize};

use super::collision::{Collidable, CollisionInfo, Environment, Hit};
use super::events::HitEvent;
use super::line::Line;
use super::point::Point;
use super::velocity::Velocity;
use crate::consts::{APPROACH_FACTOR, BALL_RADIUS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BallId(pub u32);

/// A moving circular body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: BallId,
    pub center: Point,
    radius: f64,
    pub velocity: Velocity,
}

/// What happened to a ball during one step
#[derive(Debug, Clone, Copy, Default)]
pub struct StepReport {
    /// The surface struck this tick, if any
    pub collision: Option<CollisionInfo>,
    /// Notification produced by the struck surface
    pub event: Option<HitEvent>,
}

impl Ball {
    pub fn new(id: BallId, center: Point, radius: f64, velocity: Velocity) -> Self {
        Self {
            id,
            center,
            radius,
            velocity,
        }
    }

    /// Ball with the default radius
    pub fn with_velocity(id: BallId, center: Point, velocity: Velocity) -> Self {
        Self::new(id, center, BALL_RADIUS, velocity)
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Where the ball would be after `dt` with nothing in the way
    pub fn trajectory(&self, dt: f64) -> Line {
        Line::new(self.center, self.velocity.apply_to_point(self.center, dt))
    }

    /// Advance one tick with the default approach factor
    pub fn advance<C: Collidable>(&mut self, env: &mut Environment<C>, dt: f64) -> StepReport {
        self.advance_with(env, dt, APPROACH_FACTOR)
    }

    /// Advance one tick.
    ///
    /// On impact the center covers `approach` (just under 1.0) of the
    /// distance to the collision point so the next tick does not start on the
    /// surface it just bounced off.
    pub fn advance_with<C: Collidable>(
        &mut self,
        env: &mut Environment<C>,
        dt: f64,
        approach: f64,
    ) -> StepReport {
        self.escape_paddle(env);

        let trajectory = self.trajectory(dt);
        let Some(info) = env.get_closest_collision(&trajectory) else {
            self.center = trajectory.end;
            log::trace!("Ball {:?} moved to {:?}", self.id, self.center);
            return StepReport::default();
        };

        self.center += (info.point - self.center) * approach;

        let hit = Hit {
            collidable: info.collidable,
            ball: self.id,
            ball_center: self.center,
            point: info.point,
            tolerance: env.tolerance(),
        };

        let Some(surface) = env.get_mut(info.collidable) else {
            log::warn!("Collision with missing collidable {:?}", info.collidable);
            return StepReport {
                collision: Some(info),
                event: None,
            };
        };

        let kind = surface.kind();
        let response = surface.hit(&hit, self.velocity);
        self.velocity = response.velocity;

        log::debug!(
            "Ball {:?} hit {:?} {:?} at ({:.2}, {:.2}) -> velocity ({:.2}, {:.2})",
            self.id,
            kind,
            info.collidable,
            info.point.x,
            info.point.y,
            self.velocity.dx,
            self.velocity.dy
        );

        StepReport {
            collision: Some(info),
            event: response.event,
        }
    }

    /// Lift the ball out of the paddle if it ended up inside it
    fn escape_paddle<C: Collidable>(&mut self, env: &Environment<C>) {
        if let Some(paddle) = env.paddle_rect() {
            if paddle.contains(self.center) {
                self.center.y = paddle.top() - self.radius;
                log::debug!("Ball {:?} lifted out of paddle to y={:.2}", self.id, self.center.y);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::block::Block;
    use crate::sim::collision::Surface;
    use crate::sim::paddle::Paddle;
    use crate::sim::point::Tolerance;
    use crate::sim::rect::Rect;

    fn env() -> Environment<Surface> {
        Environment::new(Rect::from_coords(0.0, 0.0, 800.0, 600.0), Tolerance::default())
    }

    fn ball() -> Ball {
        Ball::with_velocity(BallId(1), Point::new(400.0, 300.0), Velocity::new(0.0, -200.0))
    }

    fn block(x: f64, y: f64, width: f64, height: f64, durability: u32) -> Surface {
        Surface::Block(Block::new(Rect::from_coords(x, y, width, height), durability))
    }

    #[test]
    fn test_short_step_misses_block() {
        let mut env = env();
        env.add(block(350.0, 100.0, 100.0, 20.0, 1));

        let mut ball = ball();
        let report = ball.advance(&mut env, 0.1);
        assert!(report.collision.is_none());
        assert_eq!(ball.center, Point::new(400.0, 280.0));
        assert_eq!(ball.velocity, Velocity::new(0.0, -200.0));
    }

    #[test]
    fn test_long_step_bounces_off_block() {
        let mut env = env();
        let id = env.add(block(350.0, 100.0, 100.0, 20.0, 1));

        let mut ball = ball();
        let report = ball.advance(&mut env, 1.0);
        let info = report.collision.expect("should collide");
        assert_eq!(info.collidable, id);
        assert_eq!(info.point, Point::new(400.0, 120.0));

        // 99.99% of the way from y=300 to y=120
        assert_eq!(ball.center.x, 400.0);
        assert!((ball.center.y - 120.018).abs() < 1e-9);
        assert!(ball.velocity.dy > 0.0);
        assert!((ball.velocity.speed() - 200.0).abs() < 1e-9);
        assert!(report.event.is_some());
    }

    #[test]
    fn test_only_nearest_surface_is_hit() {
        let mut env = env();
        let far = env.add(block(350.0, 100.0, 100.0, 20.0, 3));
        let near = env.add(block(350.0, 200.0, 100.0, 20.0, 3));

        let mut ball = ball();
        let report = ball.advance(&mut env, 1.0);
        assert_eq!(report.collision.map(|c| c.collidable), Some(near));

        let durability = |id| {
            env.get(id)
                .and_then(Surface::as_block)
                .map(Block::durability)
        };
        assert_eq!(durability(near), Some(2));
        assert_eq!(durability(far), Some(3));
    }

    #[test]
    fn test_ball_inside_paddle_is_lifted() {
        let mut env = env();
        let paddle = Paddle::new(Rect::from_coords(300.0, 570.0, 200.0, 15.0), 300.0);
        env.add(Surface::Paddle(paddle));

        let start = Point::new(400.0, 575.0);
        let mut ball = Ball::with_velocity(BallId(1), start, Velocity::new(0.0, -2.0));
        let report = ball.advance(&mut env, 0.5);
        assert!(report.collision.is_none());
        assert_eq!(ball.center, Point::new(400.0, 570.0 - BALL_RADIUS - 1.0));
    }

    #[test]
    fn test_hit_next_to_block_seam_keeps_dx() {
        let mut env = env();
        env.add(block(175.0, 100.0, 50.0, 25.0, 3));
        let right = env.add(block(225.0, 100.0, 50.0, 25.0, 3));

        let start = Point::new(215.05, 50.0);
        let mut ball = Ball::with_velocity(BallId(1), start, Velocity::new(10.0, 50.0));
        let report = ball.advance(&mut env, 1.0);

        assert_eq!(report.collision.map(|c| c.collidable), Some(right));
        assert_eq!(ball.velocity, Velocity::new(10.0, -50.0));
    }

    #[test]
    fn test_flat_block_bounces_from_either_face() {
        let mut env = env();
        let id = env.add(block(350.0, 200.0, 100.0, 0.0, 5));

        let from_above = Point::new(400.0, 100.0);
        let mut ball = Ball::with_velocity(BallId(1), from_above, Velocity::new(0.0, 200.0));
        let report = ball.advance(&mut env, 1.0);
        assert_eq!(report.collision.map(|c| c.point), Some(Point::new(400.0, 200.0)));
        assert_eq!(ball.velocity, Velocity::new(0.0, -200.0));

        let from_below = Point::new(400.0, 300.0);
        let mut ball = Ball::with_velocity(BallId(2), from_below, Velocity::new(0.0, -200.0));
        ball.advance(&mut env, 1.0);
        assert_eq!(ball.velocity, Velocity::new(0.0, 200.0));

        let durability = env
            .get(id)
            .and_then(Surface::as_block)
            .map(Block::durability);
        assert_eq!(durability, Some(3));
    }
}
