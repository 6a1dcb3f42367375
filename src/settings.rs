//! Skater kinematics and world limits
//!
//! Loaded from JSON so the feel can be tuned without a rebuild. Any field left
//! out of the file keeps its default.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Tunable skater settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Kinematics ===
    /// Vertical acceleration while not grounded (negative is down)
    pub gravity: f32,
    /// Forward speed cap; reverse is capped at half of this
    pub max_speed: f32,
    /// Speed gained per second while pushing forward or back
    pub acceleration: f32,
    /// Speed lost per second with no intent
    pub deceleration: f32,
    /// Upward velocity of a flat-ground jump
    pub jump_force: f32,
    /// Turn rate in radians per second
    pub turn_rate: f32,

    // === Rails ===
    /// Extra jump force when popping off a rail
    pub grind_jump_boost: f32,
    /// Minimum horizontal speed when leaving a rail end
    pub rail_exit_min_speed: f32,
    /// Upward velocity added when leaving a rail end
    pub rail_exit_lift: f32,

    // === World ===
    /// Height of the skater's reference point on flat ground
    pub ground_height: f32,
    /// |x| and |z| are clamped to this
    pub boundary_limit: f32,
    /// Smallest velocity magnitude after a boundary rebound
    pub rebound_floor: f32,

    // === Spawn ===
    pub spawn_position: Vec3,
    pub spawn_direction: Vec3,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gravity: -20.0,
            max_speed: 15.0,
            acceleration: 20.0,
            deceleration: 10.0,
            jump_force: 10.0,
            turn_rate: std::f32::consts::PI,

            grind_jump_boost: 2.0,
            rail_exit_min_speed: 9.0,
            rail_exit_lift: 4.0,

            ground_height: 0.2,
            boundary_limit: 49.0,
            rebound_floor: 2.0,

            spawn_position: Vec3::new(0.0, 0.2, 0.0),
            spawn_direction: Vec3::NEG_Z,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read settings from a JSON file
    pub fn read(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Ok(Self::from_json_str(&json)?)
    }

    /// Load settings from a file, falling back to defaults on any failure
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("Using default settings ({}: {err})", path.display());
                Self::default()
            }
        }
    }

    /// Spawn facing, flattened and normalized (falls back to -Z)
    pub fn spawn_facing(&self) -> Vec3 {
        let flat = Vec3::new(self.spawn_direction.x, 0.0, self.spawn_direction.z);
        let dir = flat.normalize_or_zero();
        if dir == Vec3::ZERO { Vec3::NEG_Z } else { dir }
    }
}
