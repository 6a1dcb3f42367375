//! Collision detection against park surfaces
//!
//! Every test here is a pure function of a point and one surface, so the
//! integrator can test speculative positions freely. Tolerances come from
//! `crate::consts` and are deliberately loose for ramps and rail mounts.

use glam::{Vec2, Vec3};

use super::park::{BoxObstacle, Incline, Pipe, Rail, SurfaceKind, Wall, WallAxis};
use crate::consts::*;

/// Which side a rail contact came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RailApproach {
    /// At or above the top edge: eligible to grind
    FromAbove,
    /// Below the top edge: bounce off
    FromSide,
}

/// Identifies the surface a collision came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceRef {
    pub kind: SurfaceKind,
    /// Index into the matching catalog collection
    pub index: usize,
}

/// Result of a collision check
#[derive(Debug, Clone, Copy)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Surface that was hit (filled in by catalog scans)
    pub surface: Option<SurfaceRef>,
    /// Surface normal at the contact, pointing away from the solid
    pub normal: Vec3,
    /// Penetration depth (for position correction)
    pub penetration: f32,
    /// Set for rail contacts only
    pub approach: Option<RailApproach>,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            surface: None,
            normal: Vec3::ZERO,
            penetration: 0.0,
            approach: None,
        }
    }

    fn contact(normal: Vec3, penetration: f32) -> Self {
        Self {
            hit: true,
            surface: None,
            normal,
            penetration,
            approach: None,
        }
    }

    /// Tag the result with the surface it came from
    pub fn on(mut self, kind: SurfaceKind, index: usize) -> Self {
        self.surface = Some(SurfaceRef { kind, index });
        self
    }

    /// Index of the surface hit, if any
    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.surface.map(|s| s.index)
    }

    /// Whether the normal faces mostly upward (standing on a top face)
    #[inline]
    pub fn is_top_face(&self) -> bool {
        self.normal.y > TOP_FACE_NORMAL_Y
    }
}

#[inline]
fn clamp_penetration(depth: f32) -> f32 {
    depth.clamp(MIN_PENETRATION, MAX_PENETRATION)
}

/// Point against a plain incline
pub fn incline_collision(point: Vec3, ramp: &Incline) -> CollisionResult {
    let half = ramp.dimensions.half();
    let dx = (point.x - ramp.position.x).abs();
    let dz = (point.z - ramp.position.z).abs();
    if dx >= half.x + RAMP_FOOTPRINT_MARGIN || dz >= half.z + RAMP_FOOTPRINT_MARGIN {
        return CollisionResult::miss();
    }

    let surface_y = ramp.height_at(point.z);
    let tolerance = RAMP_BASE_TOLERANCE + ramp.pitch.tan().abs() * RAMP_STEEP_TOLERANCE_GAIN;
    let gap = point.y - surface_y;
    if gap.abs() >= tolerance {
        return CollisionResult::miss();
    }

    CollisionResult::contact(ramp.normal(), (-gap).max(0.0))
}

/// Point against a half-pipe or quarter-pipe
pub fn pipe_collision(point: Vec3, pipe: &Pipe) -> CollisionResult {
    if !pipe.in_footprint(point.x, point.z) {
        return CollisionResult::miss();
    }

    let arc = pipe.profile_at(point.x);
    if point.y > arc.center.y + CURVE_CENTER_HEADROOM {
        return CollisionResult::miss();
    }

    let p = Vec2::new(point.x, point.y);
    let gap = arc.radial_gap(p);
    if gap.abs() >= CURVE_CONTACT_DISTANCE {
        return CollisionResult::miss();
    }

    let n = arc.inward_normal(p);
    CollisionResult::contact(Vec3::new(n.x, n.y, 0.0), gap.abs())
}

/// Point against a rail, classified by approach side
pub fn rail_collision(point: Vec3, rail: &Rail) -> CollisionResult {
    let dims = rail.dimensions;
    let dx = (point.x - rail.position.x).abs();
    let dz = (point.z - rail.position.z).abs();
    if dz >= dims.length / 2.0 + RAIL_LENGTH_MARGIN {
        return CollisionResult::miss();
    }

    let above = point.y - rail.top();
    let reach = dims.height * RAIL_HEIGHT_FACTOR;

    let approach = if above >= -RAIL_ABOVE_THRESHOLD
        && above < reach
        && dx < dims.width * RAIL_ABOVE_WIDTH_FACTOR
    {
        RailApproach::FromAbove
    } else if above < -RAIL_ABOVE_THRESHOLD
        && above > -reach
        && dx < dims.width * RAIL_SIDE_WIDTH_FACTOR
    {
        RailApproach::FromSide
    } else {
        return CollisionResult::miss();
    };

    let normal = match approach {
        RailApproach::FromAbove => Vec3::Y,
        RailApproach::FromSide => {
            let side = if point.x < rail.position.x { -1.0 } else { 1.0 };
            Vec3::new(side, 0.0, 0.0)
        }
    };
    let mut result = CollisionResult::contact(normal, (-above).max(0.0));
    result.approach = Some(approach);
    result
}

/// Looser envelope used to detect a skater dropping toward a rail
pub fn rail_in_reach(point: Vec3, rail: &Rail) -> bool {
    let dims = rail.dimensions;
    (point.x - rail.position.x).abs() < dims.width * RAIL_APPROACH_WIDTH_FACTOR
        && (point.y - rail.top()).abs() < dims.height * RAIL_APPROACH_HEIGHT_FACTOR
        && (point.z - rail.position.z).abs() < dims.length / 2.0 + RAIL_APPROACH_LENGTH_MARGIN
        && point.y > rail.position.y
}

/// Point against a box inflated by the skater's extents
///
/// The face is picked by the axis with the largest penetration relative to
/// its reach, so thin boxes still resolve to the right side.
pub fn box_collision(point: Vec3, obstacle: &BoxObstacle) -> CollisionResult {
    let d = point - obstacle.position;
    let reach = obstacle.dimensions.half() + SKATER_EXTENTS;
    if d.x.abs() >= reach.x || d.y.abs() >= reach.y || d.z.abs() >= reach.z {
        return CollisionResult::miss();
    }

    let rel = d.abs() / reach;
    let (axis, normal) = if rel.x >= rel.y && rel.x >= rel.z {
        (0, Vec3::new(if d.x < 0.0 { -1.0 } else { 1.0 }, 0.0, 0.0))
    } else if rel.y >= rel.z {
        (1, Vec3::new(0.0, if d.y < 0.0 { -1.0 } else { 1.0 }, 0.0))
    } else {
        (2, Vec3::new(0.0, 0.0, if d.z < 0.0 { -1.0 } else { 1.0 }))
    };

    let depth = reach[axis] - d[axis].abs();
    CollisionResult::contact(normal, clamp_penetration(depth))
}

/// Point against a boundary wall plane
pub fn wall_collision(point: Vec3, wall: &Wall) -> CollisionResult {
    let distance = match wall.axis() {
        Some(WallAxis::Z) => (point.z - wall.position.z).abs(),
        Some(WallAxis::X) => (point.x - wall.position.x).abs(),
        None => return CollisionResult::miss(),
    };
    if distance >= WALL_BAND {
        return CollisionResult::miss();
    }

    CollisionResult::contact(wall.inward_normal(), clamp_penetration(WALL_BAND - distance))
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec3, normal: Vec3) -> Vec3 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Reflect and scale by restitution
#[inline]
pub fn bounce(velocity: Vec3, normal: Vec3, restitution: f32) -> Vec3 {
    reflect_velocity(velocity, normal) * restitution
}
