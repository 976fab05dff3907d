//! Rectangular arena geometry
//!
//! The arena spans `[0, width] × [0, height]` in local units with Y pointing
//! down, so the `Max` side of the Y axis is the ground for grounded balls.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];

    /// Component index into a `Vec2`
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }
}

/// Which end of an axis a wall sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Left wall (X) or ceiling (Y)
    Min,
    /// Right wall (X) or ground (Y)
    Max,
}

/// A ball touching or crossing one of the arena walls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallContact {
    pub axis: Axis,
    pub side: Side,
    /// Center coordinate on `axis` where the ball just touches the wall
    pub boundary: f32,
}

impl WallContact {
    /// True for the bottom wall, where grounded balls roll and come to rest
    #[inline]
    pub fn is_ground(&self) -> bool {
        self.axis == Axis::Y && self.side == Side::Max
    }
}

/// Immutable arena bounds shared by every ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(crate::consts::ARENA_WIDTH, crate::consts::ARENA_HEIGHT)
    }
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }

    /// Ball-center Y coordinate when resting on the ground
    #[inline]
    pub fn ground(&self, radius: f32) -> f32 {
        self.height - radius
    }

    /// Whether a ball of `radius` at `pos` sits exactly on the ground
    #[inline]
    pub fn is_on_ground(&self, pos: Vec2, radius: f32) -> bool {
        pos.y == self.ground(radius)
    }

    /// Check a ball against both walls of one axis
    ///
    /// Touching counts as contact (`<=` / `>=`), matching the reflection rule.
    pub fn wall_contact(&self, pos: Vec2, radius: f32, axis: Axis) -> Option<WallContact> {
        let coord = pos[axis.index()];
        let extent = self.extent(axis);

        if coord - radius <= 0.0 {
            Some(WallContact {
                axis,
                side: Side::Min,
                boundary: radius,
            })
        } else if coord + radius >= extent {
            Some(WallContact {
                axis,
                side: Side::Max,
                boundary: extent - radius,
            })
        } else {
            None
        }
    }

    /// Whether a ball lies within the wall-containment band on both axes
    pub fn contains(&self, pos: Vec2, radius: f32) -> bool {
        Axis::ALL.iter().all(|&axis| {
            let coord = pos[axis.index()];
            coord >= radius && coord <= self.extent(axis) - radius
        })
    }

    /// Clamp a ball center into the containment band
    ///
    /// Uses `max`/`min` rather than `f32::clamp` so an oversized ball never panics;
    /// it ends up pinned to the min wall instead.
    pub fn clamp(&self, pos: Vec2, radius: f32) -> Vec2 {
        Vec2::new(
            pos.x.min(self.width - radius).max(radius),
            pos.y.min(self.height - radius).max(radius),
        )
    }
}
