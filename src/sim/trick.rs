//! Aerial tricks and scoring

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Flip and shuvit tricks available in the air
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrickKind {
    Kickflip,
    Heelflip,
    ThreeSixtyFlip,
    Shuvit,
}

impl TrickKind {
    pub fn name(&self) -> &'static str {
        match self {
            TrickKind::Kickflip => "Kickflip",
            TrickKind::Heelflip => "Heelflip",
            TrickKind::ThreeSixtyFlip => "360 Flip",
            TrickKind::Shuvit => "Shuvit",
        }
    }

    /// Full board rotation (Euler x, y, z) at completion
    pub fn target_rotation(&self) -> Vec3 {
        match self {
            TrickKind::Kickflip => Vec3::new(0.0, 0.0, TAU),
            TrickKind::Heelflip => Vec3::new(0.0, 0.0, -TAU),
            TrickKind::ThreeSixtyFlip => Vec3::new(TAU, PI, 0.0),
            TrickKind::Shuvit => Vec3::new(0.0, PI, 0.0),
        }
    }

    /// Seconds to complete
    pub fn duration(&self) -> f32 {
        match self {
            TrickKind::Kickflip | TrickKind::Heelflip => 1.0,
            TrickKind::ThreeSixtyFlip => 1.2,
            TrickKind::Shuvit => 0.8,
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            TrickKind::Kickflip | TrickKind::Heelflip => 100,
            TrickKind::ThreeSixtyFlip => 150,
            TrickKind::Shuvit => 50,
        }
    }
}

/// A trick in flight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrickProgress {
    pub kind: TrickKind,
    /// Seconds since the trick started
    pub elapsed: f32,
}

impl TrickProgress {
    pub fn new(kind: TrickKind) -> Self {
        Self { kind, elapsed: 0.0 }
    }

    /// Fraction complete in [0, 1]
    #[inline]
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.kind.duration()).min(1.0)
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.progress() >= 1.0
    }
}

/// Emitted once when a trick finishes in the air
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompletedTrick {
    pub name: &'static str,
    pub points: u32,
}

impl From<TrickKind> for CompletedTrick {
    fn from(kind: TrickKind) -> Self {
        Self {
            name: kind.name(),
            points: kind.points(),
        }
    }
}
