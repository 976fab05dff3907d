//! Simulation settings
//!
//! Loaded from JSON by the embedder (native driver or browser glue). Missing
//! fields fall back to their defaults.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, BALL_RADIUS};
use crate::sim::{Arena, Separation, Variant};

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Motion profile for spawned balls
    pub variant: Variant,

    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Balls ===
    /// Radius used by `Simulation::spawn_ball`
    pub ball_radius: f32,
    /// Ball/ball collisions enabled
    pub collisions: bool,
    /// De-penetration strategy
    pub separation: Separation,

    /// RNG seed (only consumed when motionless balls overlap)
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: Variant::Free,

            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            ball_radius: BALL_RADIUS,
            collisions: true,
            separation: Separation::AlongVelocity,

            seed: 0,
        }
    }
}

impl Settings {
    /// Default settings with the given variant
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    pub fn arena(&self) -> Arena {
        Arena::new(self.arena_width, self.arena_height)
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json).map_err(SettingsError::Parse)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        serde_json::to_string_pretty(self).map_err(SettingsError::Parse)
    }

    /// Check the arena can hold at least one ball
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;

        if !positive(self.arena_width) || !positive(self.arena_height) {
            return Err(SettingsError::Invalid("arena dimensions must be positive"));
        }
        if !positive(self.ball_radius) {
            return Err(SettingsError::Invalid("ball radius must be positive"));
        }
        let diameter = self.ball_radius * 2.0;
        if self.arena_width < diameter || self.arena_height < diameter {
            return Err(SettingsError::Invalid("arena is smaller than one ball"));
        }
        Ok(())
    }
}

/// Settings could not be loaded
#[derive(Debug)]
pub enum SettingsError {
    /// Malformed JSON or wrong field types
    Parse(serde_json::Error),
    /// Well-formed but physically meaningless
    Invalid(&'static str),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Parse(err) => write!(f, "failed to parse settings: {err}"),
            SettingsError::Invalid(reason) => write!(f, "invalid settings: {reason}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Parse(err) => Some(err),
            SettingsError::Invalid(_) => None,
        }
    }
}
