//! Level definition and live level state
//!
//! A [`Level`] is the explicitly owned context for one playthrough: it owns
//! the collision environment, the balls, the listeners and the counters.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, BallId};
use super::block::{Block, Border, KillZone};
use super::collision::{CollidableId, Environment, Surface};
use super::events::{
    BallRemover, BlockRemover, Effect, Effects, HitEvent, HitListener, ScoreTracker,
};
use super::paddle::Paddle;
use super::point::Point;
use super::rect::Rect;
use super::velocity::Velocity;
use crate::consts::*;
use crate::settings::Settings;

/// One block in a level layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockSpec {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub durability: u32,
}

/// Static description of a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSpec {
    pub name: String,
    pub paddle_width: f64,
    pub paddle_speed: f64,
    /// Initial ball velocities as `(angle_degrees, speed)`
    pub ball_velocities: Vec<(f64, f64)>,
    pub blocks: Vec<BlockSpec>,
}

impl LevelSpec {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// A 6 x 12 brick wall with seeded durabilities
    pub fn demo(seed: u64) -> Self {
        const ROWS: usize = 6;
        const COLUMNS: usize = 12;
        const BLOCK_WIDTH: f64 = 50.0;
        const BLOCK_HEIGHT: f64 = 25.0;
        const TOP: f64 = 100.0;

        let mut rng = Pcg32::seed_from_u64(seed);
        let left = WINDOW_WIDTH - BORDER_SIZE - COLUMNS as f64 * BLOCK_WIDTH;

        let mut blocks = Vec::with_capacity(ROWS * COLUMNS);
        for row in 0..ROWS {
            for column in 0..COLUMNS {
                blocks.push(BlockSpec {
                    x: left + column as f64 * BLOCK_WIDTH,
                    y: TOP + row as f64 * BLOCK_HEIGHT,
                    width: BLOCK_WIDTH,
                    height: BLOCK_HEIGHT,
                    durability: rng.random_range(1..=3),
                });
            }
        }

        Self {
            name: format!("Demo {seed}"),
            paddle_width: 100.0,
            paddle_speed: 450.0,
            ball_velocities: vec![(330.0, 300.0), (30.0, 300.0)],
            blocks,
        }
    }
}

/// Score and progress counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub score: u64,
    pub lives: u32,
    pub blocks_remaining: u32,
    pub balls_remaining: u32,
}

/// Live state of one level playthrough
pub struct Level {
    pub(crate) spec: LevelSpec,
    pub(crate) settings: Settings,
    pub(crate) env: Environment<Surface>,
    /// Sorted by id
    pub(crate) balls: Vec<Ball>,
    pub(crate) paddle: Option<CollidableId>,
    pub(crate) listeners: Vec<Box<dyn HitListener>>,
    pub(crate) counters: Counters,
    /// A turn is in progress (paddle and balls spawned, not yet lost)
    pub(crate) turn_active: bool,
    pub(crate) cleared: bool,
    /// Ticks simulated so far
    pub(crate) ticks: u64,
    next_ball_id: u32,
}

impl Level {
    /// Build borders, kill zone and blocks, and register the built-in listeners
    pub fn new(spec: LevelSpec, settings: Settings) -> Self {
        let bounds = Rect::from_coords(0.0, 0.0, WINDOW_WIDTH, WINDOW_HEIGHT);
        let mut env = Environment::new(bounds, settings.tolerance);

        for rect in [
            Rect::from_coords(0.0, BORDER_SIZE, WINDOW_WIDTH, BORDER_SIZE),
            Rect::from_coords(0.0, BORDER_SIZE, BORDER_SIZE, WINDOW_HEIGHT),
            Rect::from_coords(
                WINDOW_WIDTH - BORDER_SIZE,
                BORDER_SIZE,
                BORDER_SIZE,
                WINDOW_HEIGHT,
            ),
        ] {
            env.add(Surface::Border(Border::new(rect)));
        }
        env.add(Surface::KillZone(KillZone::new(Rect::from_coords(
            KILL_ZONE_X,
            KILL_ZONE_Y,
            KILL_ZONE_WIDTH,
            KILL_ZONE_HEIGHT,
        ))));

        let listeners: Vec<Box<dyn HitListener>> = vec![
            Box::new(BlockRemover),
            Box::new(ScoreTracker::new(
                settings.block_hit_score,
                settings.block_destroy_score,
            )),
            Box::new(BallRemover),
        ];

        let counters = Counters {
            lives: settings.lives,
            ..Default::default()
        };

        let mut level = Self {
            spec,
            settings,
            env,
            balls: Vec::new(),
            paddle: None,
            listeners,
            counters,
            turn_active: false,
            cleared: false,
            ticks: 0,
            next_ball_id: 1,
        };

        let blocks = level.spec.blocks.clone();
        for block in &blocks {
            if block.durability == 0 {
                log::warn!("Skipping block at ({}, {}) with no durability", block.x, block.y);
                continue;
            }
            level.add_block(
                Rect::from_coords(block.x, block.y, block.width, block.height),
                block.durability,
            );
        }

        log::info!(
            "Level '{}' built: {} blocks, {} collidables",
            level.spec.name,
            level.counters.blocks_remaining,
            level.env.len()
        );
        level
    }

    pub fn spec(&self) -> &LevelSpec {
        &self.spec
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn environment(&self) -> &Environment<Surface> {
        &self.env
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    pub fn paddle(&self) -> Option<&Paddle> {
        self.paddle
            .and_then(|id| self.env.get(id))
            .and_then(Surface::as_paddle)
    }

    pub fn is_cleared(&self) -> bool {
        self.cleared
    }

    pub fn is_turn_active(&self) -> bool {
        self.turn_active
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Register an extra hit listener
    pub fn add_listener(&mut self, listener: Box<dyn HitListener>) {
        self.listeners.push(listener);
    }

    /// Add a block and count it as remaining
    pub fn add_block(&mut self, rect: Rect, durability: u32) -> CollidableId {
        self.counters.blocks_remaining += 1;
        self.env.add(Surface::Block(Block::new(rect, durability)))
    }

    /// Remove a block. Returns false if `id` is not a block in this level.
    pub fn remove_block(&mut self, id: CollidableId) -> bool {
        if self.env.get(id).and_then(Surface::as_block).is_none() {
            return false;
        }
        self.env.remove(id);
        self.counters.blocks_remaining = self.counters.blocks_remaining.saturating_sub(1);
        log::debug!(
            "Removed block {:?}, {} remaining",
            id,
            self.counters.blocks_remaining
        );
        true
    }

    /// Add a ball at the starting point
    pub fn spawn_ball(&mut self, velocity: Velocity) -> BallId {
        let id = BallId(self.next_ball_id);
        self.next_ball_id += 1;
        self.balls.push(Ball::with_velocity(
            id,
            Point::new(BALL_START_X, BALL_START_Y),
            velocity,
        ));
        self.counters.balls_remaining += 1;
        id
    }

    /// Remove a ball. Returns false if it was already gone.
    pub fn remove_ball(&mut self, id: BallId) -> bool {
        let Some(index) = self.balls.iter().position(|b| b.id == id) else {
            return false;
        };
        self.balls.remove(index);
        self.counters.balls_remaining = self.counters.balls_remaining.saturating_sub(1);
        log::debug!("Removed ball {:?}, {} remaining", id, self.counters.balls_remaining);
        true
    }

    /// Replace the paddle with a fresh centred one and spawn the level's balls
    pub fn start_turn(&mut self) {
        if let Some(old) = self.paddle.take() {
            self.env.remove(old);
        }
        let paddle = Paddle::centered(self.spec.paddle_width, self.spec.paddle_speed);
        self.paddle = Some(self.env.add(Surface::Paddle(paddle)));

        let velocities = self.spec.ball_velocities.clone();
        for (angle, speed) in velocities {
            self.spawn_ball(Velocity::from_angle_and_speed(angle, speed));
        }
        self.turn_active = true;

        log::info!(
            "Turn started: {} balls, {} lives, score {}",
            self.balls.len(),
            self.counters.lives,
            self.counters.score
        );
    }

    /// Notify every listener of `event`, then apply what they asked for
    pub(crate) fn dispatch(&mut self, event: &HitEvent) {
        let mut effects = Effects::new();
        for listener in &mut self.listeners {
            listener.on_hit(event, &mut effects);
        }
        for effect in effects.drain() {
            match effect {
                Effect::RemoveBlock(id) => {
                    self.remove_block(id);
                }
                Effect::RemoveBall(id) => {
                    self.remove_ball(id);
                }
                Effect::AddScore(points) => self.counters.score += points,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::{Collidable, SurfaceKind};

    fn single_block_spec() -> LevelSpec {
        LevelSpec {
            name: "test".into(),
            paddle_width: 100.0,
            paddle_speed: 300.0,
            ball_velocities: vec![(0.0, 200.0)],
            blocks: vec![BlockSpec {
                x: 350.0,
                y: 100.0,
                width: 100.0,
                height: 20.0,
                durability: 1,
            }],
        }
    }

    #[test]
    fn test_level_layout() {
        let level = Level::new(single_block_spec(), Settings::default());
        let kinds: Vec<SurfaceKind> = level.environment().iter().map(|(_, c)| c.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                SurfaceKind::Border,
                SurfaceKind::Border,
                SurfaceKind::Border,
                SurfaceKind::KillZone,
                SurfaceKind::Block,
            ]
        );
        assert_eq!(level.counters().blocks_remaining, 1);
        assert_eq!(level.counters().lives, 7);
        assert!(level.paddle().is_none());
    }

    #[test]
    fn test_start_turn_replaces_paddle() {
        let mut level = Level::new(single_block_spec(), Settings::default());
        level.start_turn();
        let first = level.paddle;
        level.start_turn();
        assert_ne!(level.paddle, first);
        let paddles = level
            .environment()
            .iter()
            .filter(|(_, c)| c.kind() == SurfaceKind::Paddle)
            .count();
        assert_eq!(paddles, 1);
        assert_eq!(level.balls().len(), 2);
        assert_eq!(level.counters().balls_remaining, 2);
    }

    #[test]
    fn test_remove_block_twice() {
        let mut level = Level::new(single_block_spec(), Settings::default());
        let id = level
            .environment()
            .iter()
            .find(|(_, c)| c.kind() == SurfaceKind::Block)
            .map(|(id, _)| id)
            .expect("block present");
        assert!(level.remove_block(id));
        assert!(!level.remove_block(id));
        assert_eq!(level.counters().blocks_remaining, 0);
    }

    #[test]
    fn test_demo_is_deterministic() {
        let a = LevelSpec::demo(42);
        let b = LevelSpec::demo(42);
        assert_eq!(a, b);
        assert_eq!(a.blocks.len(), 72);
        assert!(a.blocks.iter().all(|b| (1..=3).contains(&b.durability)));
        assert_eq!(a.blocks[0].x, 175.0);
    }

    #[test]
    fn test_spec_json() {
        let spec = single_block_spec();
        let json = serde_json::to_string(&spec).expect("serializes");
        assert_eq!(LevelSpec::from_json(&json).expect("parses"), spec);
    }
}
