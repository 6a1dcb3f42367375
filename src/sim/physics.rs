//! Catalog-wide collision queries
//!
//! Scans each park collection in insertion order and returns the first hit,
//! tagged with the surface it came from.

use glam::Vec3;

use super::collision::{
    CollisionResult, box_collision, incline_collision, pipe_collision, rail_collision,
    rail_in_reach, wall_collision,
};
use super::park::{Obstacle, Rail, Ramp, SurfaceKind};
use crate::consts::*;
use crate::settings::Settings;

/// World physics shared by every skater in a park
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Physics {
    /// Vertical acceleration (negative is down)
    pub gravity: f32,
}

impl Default for Physics {
    fn default() -> Self {
        Self { gravity: -20.0 }
    }
}

impl Physics {
    pub fn new(gravity: f32) -> Self {
        Self { gravity }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.gravity)
    }

    /// First obstacle the point collides with
    pub fn check_obstacles(&self, point: Vec3, obstacles: &[Obstacle]) -> CollisionResult {
        obstacles
            .iter()
            .enumerate()
            .map(|(i, obstacle)| {
                let result = match obstacle {
                    Obstacle::Box(b) => box_collision(point, b),
                    Obstacle::Wall(w) => wall_collision(point, w),
                };
                result.on(obstacle.kind(), i)
            })
            .find(|r| r.hit)
            .unwrap_or_else(CollisionResult::miss)
    }

    /// First ramp the point is on or near
    pub fn check_ramps(&self, point: Vec3, ramps: &[Ramp]) -> CollisionResult {
        ramps
            .iter()
            .enumerate()
            .map(|(i, ramp)| {
                let result = match ramp {
                    Ramp::Incline(incline) => incline_collision(point, incline),
                    Ramp::Pipe(pipe) => pipe_collision(point, pipe),
                };
                result.on(ramp.kind(), i)
            })
            .find(|r| r.hit)
            .unwrap_or_else(CollisionResult::miss)
    }

    /// First rail the point touches, with its approach side
    pub fn check_rails(&self, point: Vec3, rails: &[Rail]) -> CollisionResult {
        rails
            .iter()
            .enumerate()
            .map(|(i, rail)| rail_collision(point, rail).on(SurfaceKind::Rail, i))
            .find(|r| r.hit)
            .unwrap_or_else(CollisionResult::miss)
    }

    /// Rail the point is dropping toward, if any
    pub fn scan_rail_approach(&self, point: Vec3, rails: &[Rail]) -> Option<usize> {
        rails.iter().position(|rail| rail_in_reach(point, rail))
    }

    /// Whether the point is resting on top of a box
    pub fn supported_by_obstacle(&self, point: Vec3, obstacles: &[Obstacle]) -> bool {
        obstacles.iter().any(|obstacle| match obstacle {
            Obstacle::Box(b) => {
                let above = point.y - b.top();
                b.covers(point.x, point.z) && (0.0..=SUPPORT_BAND).contains(&above)
            }
            Obstacle::Wall(_) => false,
        })
    }
}
