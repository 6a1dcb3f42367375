//! Skate Sim - movement and collision core for an arcade skateboarding game
//!
//! Core modules:
//! - `sim`: Per-frame skater simulation (park geometry, collisions, motion modes, tricks)
//! - `settings`: Data-driven skater kinematics
//! - `error`: Geometry and configuration errors

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{GeometryError, SettingsError};
pub use settings::Settings;

use glam::Vec3;

/// Simulation constants
///
/// Collision tolerances. Tunable kinematics are in `Settings`.
pub mod consts {
    use glam::Vec3;

    /// Fixed simulation timestep used by the demo host
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Half the side length of the square park
    pub const PARK_HALF_SIZE: f32 = 50.0;

    /// Extra footprint around ramps and pipes still counted as contact
    pub const RAMP_FOOTPRINT_MARGIN: f32 = 1.0;
    /// Vertical tolerance above/below an incline surface
    pub const RAMP_BASE_TOLERANCE: f32 = 1.0;
    /// Additional tolerance per unit of |tan(pitch)|
    pub const RAMP_STEEP_TOLERANCE_GAIN: f32 = 0.5;
    /// Inclines steeper than this get a boosted normal
    pub const STEEP_RAMP_ANGLE: f32 = std::f32::consts::PI / 6.0;
    /// Scale on the normal's y component for steep inclines
    pub const STEEP_NORMAL_BOOST: f32 = 1.1;

    /// Radial band around a pipe arc counted as contact
    pub const CURVE_CONTACT_DISTANCE: f32 = 1.0;
    /// Maximum height above the arc center still tested
    pub const CURVE_CENTER_HEADROOM: f32 = 1.0;

    /// Extra rail length counted as contact
    pub const RAIL_LENGTH_MARGIN: f32 = 1.0;
    /// How far below the rail top still counts as "from above"
    pub const RAIL_ABOVE_THRESHOLD: f32 = 0.25;
    /// Lateral reach (in rail widths) for contacts from above
    pub const RAIL_ABOVE_WIDTH_FACTOR: f32 = 3.0;
    /// Lateral reach (in rail widths) for side contacts
    pub const RAIL_SIDE_WIDTH_FACTOR: f32 = 1.5;
    /// Vertical reach (in rail heights) above and below the top
    pub const RAIL_HEIGHT_FACTOR: f32 = 1.5;
    /// Approach envelope, in rail widths
    pub const RAIL_APPROACH_WIDTH_FACTOR: f32 = 3.0;
    /// Approach envelope, in rail heights
    pub const RAIL_APPROACH_HEIGHT_FACTOR: f32 = 4.0;
    /// Approach envelope length margin
    pub const RAIL_APPROACH_LENGTH_MARGIN: f32 = 2.0;

    /// Half extents of the skater used to inflate boxes
    pub const SKATER_EXTENTS: Vec3 = Vec3::new(0.5, 0.1, 0.5);
    /// Penetration depth clamp
    pub const MIN_PENETRATION: f32 = 0.2;
    pub const MAX_PENETRATION: f32 = 1.5;
    /// Distance from a wall plane counted as contact
    pub const WALL_BAND: f32 = 2.0;
    /// Normals with y above this count as a top face
    pub const TOP_FACE_NORMAL_Y: f32 = 0.7;

    /// Default restitution for `bounce`
    pub const DEFAULT_RESTITUTION: f32 = 0.5;
    /// Restitution used by the post-move obstacle push-out
    pub const POST_MOVE_RESTITUTION: f32 = 0.4;

    /// Height kept above a ramp surface after snapping
    pub const SURFACE_CLEARANCE: f32 = 0.05;
    /// Height kept above an obstacle top after landing on it
    pub const OBSTACLE_TOP_CLEARANCE: f32 = 0.2;
    /// Vertical band above a box top that still supports the skater
    pub const SUPPORT_BAND: f32 = 0.3;
}

/// Yaw of a horizontal direction, measured about +Y from +Z
#[inline]
pub fn heading(direction: Vec3) -> f32 {
    direction.x.atan2(direction.z)
}
