//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - One call to `tick` is one fixed timestep
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod arena;
pub mod ball;
pub mod collision;
pub mod state;
pub mod tick;

pub use arena::{Arena, Axis, Side, WallContact};
pub use ball::{Ball, MotionProfile, Variant};
pub use collision::{CollisionResult, Separation, ball_ball_collision, resolve};
pub use state::Simulation;
pub use tick::tick;
