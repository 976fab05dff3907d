//! Bouncing Balls - a 2D arena physics toy
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball motion, wall reflection, ball/ball collisions)
//! - `settings`: Data-driven configuration (variant, arena, collision strategy)
//! - `platform`: Browser glue exposing the simulation to a JS renderer

pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};
pub use sim::{Arena, Ball, MotionProfile, Separation, Simulation, Variant, resolve, tick};

use glam::Vec2;

/// Simulation constants
///
/// Resistance and gravity coefficients live on [`MotionProfile`](crate::MotionProfile); they are
/// tuned per tick for [`TICK_RATE_HZ`](consts::TICK_RATE_HZ) and must be
/// re-derived if the driver changes its cadence.
pub mod consts {
    /// Reference tick rate the coefficients are tuned for
    pub const TICK_RATE_HZ: u32 = 60;

    /// Speed (units/tick) below which a ball counts as stationary
    pub const NEAR_ZERO: f32 = 0.01;
    /// Extra push added to each ball on de-penetration so the pair
    /// doesn't report as touching on the next tick
    pub const SEPARATION_SLOP: f32 = 0.001;
    /// Time-of-impact rewind is rejected if a ball would move further than
    /// this many radii
    pub const MAX_REWIND_RADII: f32 = 3.0;

    /// Default arena dimensions (3:2 landscape, in local units)
    pub const ARENA_WIDTH: f32 = 100.0;
    pub const ARENA_HEIGHT: f32 = 100.0 * (2.0 / 3.0);

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 1.0;
    /// Longest aim vector accepted on spawn (before the profile's velocity factor)
    pub const MAX_AIM_SPEED: f32 = 30.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
