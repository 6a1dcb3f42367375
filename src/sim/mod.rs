//! Skater movement simulation
//!
//! Everything that moves the skater lives here. The module stays free of
//! rendering and input devices:
//! - The host supplies `dt` and an input intent each frame
//! - Randomness comes from the skater's own seeded generator
//! - Park surfaces are scanned in insertion order

pub mod arc;
pub mod collision;
mod grind;
pub mod park;
pub mod physics;
mod ramp;
pub mod state;
pub mod tick;
pub mod trick;

pub use arc::ArcProfile;
pub use collision::{CollisionResult, RailApproach, SurfaceRef, bounce, reflect_velocity};
pub use park::{
    BoxObstacle, Dimensions, Incline, Obstacle, ParkModel, Pipe, PipeKind, Rail,
    Ramp, SurfaceKind, SurfaceSpec, Wall, WallAxis,
};
pub use physics::Physics;
pub use state::{
    FrameReport, GrindResponse, GrindStyle, InputIntent, MotionState, SkaterState,
};
pub use tick::Skater;
pub use trick::{CompletedTrick, TrickKind, TrickProgress};
