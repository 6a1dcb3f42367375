//! Circular arc profiles for curved ramps
//!
//! Half-pipes and quarter-pipes are modeled in the x/y plane as the lower half
//! of a circle. The profile is constant along z.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The lower half of a circle in the x/y plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcProfile {
    /// Circle center (x, y)
    pub center: Vec2,
    /// Circle radius
    pub radius: f32,
}

impl ArcProfile {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Surface height at world x, or `None` outside the arc's span
    pub fn height_at(&self, x: f32) -> Option<f32> {
        let dx = x - self.center.x;
        if dx.abs() > self.radius {
            return None;
        }
        Some(self.center.y - (self.radius * self.radius - dx * dx).max(0.0).sqrt())
    }

    /// Signed distance from a point to the arc, positive inside the circle
    #[inline]
    pub fn radial_gap(&self, point: Vec2) -> f32 {
        self.radius - (point - self.center).length()
    }

    /// Unit normal pointing from the surface toward the center
    ///
    /// Falls back to straight up when the point is the center itself.
    pub fn inward_normal(&self, point: Vec2) -> Vec2 {
        let n = (self.center - point).normalize_or_zero();
        if n == Vec2::ZERO { Vec2::Y } else { n }
    }

    /// Whether a height is high on the wall (near the lip)
    #[inline]
    pub fn near_lip(&self, height: f32) -> bool {
        height - (self.center.y - self.radius) > self.radius * 0.8
    }
}
