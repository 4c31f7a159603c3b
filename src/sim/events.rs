//! Hit notifications and the listeners that react to them
//!
//! Surfaces report hits as [`HitEvent`]s. Listeners never mutate the level
//! directly: they queue [`Effect`]s, which the level applies once the
//! current ball step has finished. Blocks and balls are therefore never
//! removed while the collidable set is being scanned.

use serde::{Deserialize, Serialize};

use super::ball::BallId;
use super::collision::{CollidableId, SurfaceKind};
use super::point::Point;

/// A surface was struck by a ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitEvent {
    pub surface: SurfaceKind,
    pub collidable: CollidableId,
    pub ball: BallId,
    pub point: Point,
    /// Remaining durability after the hit (blocks only)
    pub durability: Option<u32>,
}

impl HitEvent {
    /// A block hit that used up the last durability point
    pub fn destroyed_block(&self) -> bool {
        self.surface == SurfaceKind::Block && self.durability == Some(0)
    }
}

/// A deferred change to the level requested by a listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    RemoveBlock(CollidableId),
    RemoveBall(BallId),
    AddScore(u64),
}

/// Queue of effects collected while dispatching one event
#[derive(Debug, Default)]
pub struct Effects {
    queue: Vec<Effect>,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: Effect) {
        self.queue.push(effect);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, Effect> {
        self.queue.drain(..)
    }
}

/// Observer of hit events
pub trait HitListener {
    fn on_hit(&mut self, event: &HitEvent, effects: &mut Effects);
}

/// Awards points for block hits
#[derive(Debug, Clone)]
pub struct ScoreTracker {
    pub hit_points: u64,
    pub destroy_points: u64,
}

impl ScoreTracker {
    pub fn new(hit_points: u64, destroy_points: u64) -> Self {
        Self {
            hit_points,
            destroy_points,
        }
    }
}

impl HitListener for ScoreTracker {
    fn on_hit(&mut self, event: &HitEvent, effects: &mut Effects) {
        if event.surface != SurfaceKind::Block {
            return;
        }
        effects.push(Effect::AddScore(self.hit_points));
        if event.destroyed_block() {
            effects.push(Effect::AddScore(self.destroy_points));
        }
    }
}

/// Removes blocks that have run out of durability
#[derive(Debug, Clone, Default)]
pub struct BlockRemover;

impl HitListener for BlockRemover {
    fn on_hit(&mut self, event: &HitEvent, effects: &mut Effects) {
        if event.destroyed_block() {
            effects.push(Effect::RemoveBlock(event.collidable));
        }
    }
}

/// Removes balls that fall into the kill zone
#[derive(Debug, Clone, Default)]
pub struct BallRemover;

impl HitListener for BallRemover {
    fn on_hit(&mut self, event: &HitEvent, effects: &mut Effects) {
        if event.surface == SurfaceKind::KillZone {
            effects.push(Effect::RemoveBall(event.ball));
        }
    }
}
