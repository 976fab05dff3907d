//! Simulation state
//!
//! Owns the arena, the live balls and the seeded RNG. Nothing here touches
//! time or I/O; the driver calls [`tick`](super::tick) at a fixed cadence.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::arena::Arena;
use super::ball::{Ball, Variant};
use crate::consts::MAX_AIM_SPEED;
use crate::settings::Settings;

/// Complete simulation state (deterministic for a given seed and spawn sequence)
#[derive(Debug, Clone)]
pub struct Simulation {
    pub settings: Settings,
    pub arena: Arena,
    /// Live balls (spawn order, ids ascending)
    pub balls: Vec<Ball>,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(super) rng: Pcg32,
    next_id: u32,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Simulation {
    pub fn new(settings: Settings) -> Self {
        Self {
            arena: settings.arena(),
            rng: Pcg32::seed_from_u64(settings.seed),
            settings,
            balls: Vec::new(),
            time_ticks: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a ball with the configured variant and radius
    ///
    /// `aim` is the raw aim vector; its length is capped at
    /// [`MAX_AIM_SPEED`] before the profile's velocity factor is applied.
    pub fn spawn_ball(&mut self, pos: Vec2, aim: Vec2) -> u32 {
        let (radius, variant) = (self.settings.ball_radius, self.settings.variant);
        self.spawn_ball_with(pos, aim, radius, variant)
    }

    pub fn spawn_ball_with(&mut self, pos: Vec2, aim: Vec2, radius: f32, variant: Variant) -> u32 {
        let id = self.next_entity_id();
        let pos = self.arena.clamp(pos, radius);
        let ball = Ball::launch(id, pos, aim.clamp_length_max(MAX_AIM_SPEED), radius, variant);
        log::debug!("spawned ball {} at {:?} with velocity {:?}", id, ball.pos, ball.vel);
        self.balls.push(ball);
        id
    }

    pub fn ball(&self, id: u32) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    /// Remove every ball (ids keep increasing)
    pub fn clear(&mut self) {
        self.balls.clear();
    }

    /// Advance one tick
    pub fn tick(&mut self) {
        super::tick(self);
    }

    /// Sum of velocities (all balls have equal unit mass)
    pub fn total_momentum(&self) -> Vec2 {
        self.balls.iter().map(|b| b.vel).sum()
    }

    pub fn kinetic_energy(&self) -> f32 {
        self.balls.iter().map(Ball::kinetic_energy).sum()
    }

    /// Balls with exactly zero velocity
    pub fn resting_count(&self) -> usize {
        self.balls.iter().filter(|b| b.is_resting()).count()
    }
}
