//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order for collidables, id order for balls)
//! - No rendering or platform dependencies

pub mod ball;
pub mod block;
pub mod collision;
pub mod events;
pub mod line;
pub mod paddle;
pub mod point;
pub mod rect;
pub mod state;
pub mod tick;
pub mod velocity;

pub use ball::{Ball, BallId, StepReport};
pub use block::{Block, Border, KillZone};
pub use collision::{
    Collidable, CollidableId, CollisionInfo, Environment, Hit, HitResponse, Surface, SurfaceKind,
};
pub use events::{BallRemover, BlockRemover, Effect, Effects, HitEvent, HitListener, ScoreTracker};
pub use line::Line;
pub use paddle::Paddle;
pub use point::{Orientation, Point, Tolerance, closest, distance, on_segment, orientation};
pub use rect::{Rect, Sides};
pub use state::{BlockSpec, Counters, Level, LevelSpec};
pub use tick::{TickInput, TickOutcome, tick};
pub use velocity::Velocity;
