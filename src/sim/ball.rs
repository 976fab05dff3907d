//! Ball kinematics
//!
//! One tick of motion: move by velocity, reflect off the arena walls, then
//! apply air resistance and (for grounded balls) gravity. All coefficients are
//! per-tick values tuned for [`TICK_RATE_HZ`](crate::consts::TICK_RATE_HZ).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::{Arena, Axis, WallContact};
use crate::consts::NEAR_ZERO;

/// Ball motion variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Top-down table: no gravity, every wall damps the ball
    #[default]
    Free,
    /// Side view: gravity pulls toward the ground, which damps and rolls
    Grounded,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Free => "free",
            Variant::Grounded => "grounded",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "free" | "horizontal" => Some(Variant::Free),
            "grounded" | "vertical" => Some(Variant::Grounded),
            _ => None,
        }
    }

    /// Motion coefficients for this variant
    pub fn profile(&self) -> MotionProfile {
        match self {
            Variant::Free => MotionProfile {
                air_resistance: 0.99,
                hit_resistance: 0.8,
                rolling_resistance: None,
                gravity: None,
                velocity_factor: 0.2,
            },
            Variant::Grounded => MotionProfile {
                air_resistance: 0.995,
                hit_resistance: 0.8,
                rolling_resistance: Some(0.98),
                gravity: Some(0.05),
                velocity_factor: 0.07,
            },
        }
    }
}

/// Per-ball motion coefficients, fixed at creation
///
/// A profile with `gravity` set behaves as a grounded ball: the bottom wall is
/// the ground and only ground contact is damped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionProfile {
    /// Velocity multiplier applied every tick
    pub air_resistance: f32,
    /// Velocity multiplier applied on wall impact
    pub hit_resistance: f32,
    /// X multiplier applied on ground contact
    pub rolling_resistance: Option<f32>,
    /// Added to Y velocity every airborne tick
    pub gravity: Option<f32>,
    /// Converts an aim vector into an initial velocity
    pub velocity_factor: f32,
}

impl MotionProfile {
    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.gravity.is_some()
    }
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    /// Center, in local units
    pub pos: Vec2,
    /// Units per tick
    pub vel: Vec2,
    pub radius: f32,
    pub profile: MotionProfile,
}

impl Ball {
    /// Create a ball with a raw initial velocity
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32, variant: Variant) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            profile: variant.profile(),
        }
    }

    /// Create a ball from an aim vector, scaled by the variant's velocity factor
    pub fn launch(id: u32, pos: Vec2, aim: Vec2, radius: f32, variant: Variant) -> Self {
        let profile = variant.profile();
        Self {
            id,
            pos,
            vel: aim * profile.velocity_factor,
            radius,
            profile,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Velocity is exactly zero
    #[inline]
    pub fn is_resting(&self) -> bool {
        self.vel == Vec2::ZERO
    }

    /// Unit-mass kinetic energy
    #[inline]
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.vel.length_squared()
    }

    /// Advance the ball by exactly one tick
    pub fn integrate(&mut self, arena: &Arena) {
        // Snap sub-threshold motion to a full stop. Grounded balls only stop on
        // the ground, never mid-air.
        if !self.is_resting()
            && self.speed() < NEAR_ZERO
            && (!self.profile.is_grounded() || arena.is_on_ground(self.pos, self.radius))
        {
            self.vel = Vec2::ZERO;
            // Collision pushes can leave a ball past a wall
            self.pos = arena.clamp(self.pos, self.radius);
            return;
        }

        self.pos += self.vel;

        for axis in Axis::ALL {
            if let Some(contact) = arena.wall_contact(self.pos, self.radius, axis) {
                self.pos[axis.index()] = contact.boundary;
                self.hit_wall(contact);
            }
        }

        self.vel *= self.profile.air_resistance;

        if let Some(gravity) = self.profile.gravity {
            // On the ground vel.y <= 0 after reflection. A bounce that can't
            // climb out of one tick of gravity would otherwise settle into a
            // reflect/fall cycle that never reaches zero.
            let at_rest = self.vel.y.abs() < NEAR_ZERO || self.vel.y + gravity >= 0.0;
            if arena.is_on_ground(self.pos, self.radius) && at_rest {
                self.vel.y = 0.0;
            } else {
                self.vel.y += gravity;
            }
        }
    }

    /// Damp and reflect velocity after the position was clamped to `contact`
    fn hit_wall(&mut self, contact: WallContact) {
        if self.profile.is_grounded() {
            if contact.is_ground() {
                self.vel.y *= self.profile.hit_resistance;
                self.vel.x *= self.profile.rolling_resistance.unwrap_or(1.0);
            }
        } else {
            self.vel *= self.profile.hit_resistance;
        }

        let i = contact.axis.index();
        self.vel[i] = -self.vel[i];
    }
}
