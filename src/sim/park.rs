//! Static park geometry
//!
//! The catalog is built once (from code or JSON) and never mutated. Surfaces
//! keep their insertion order, which is also the order collision queries scan
//! them in.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::arc::ArcProfile;
use crate::consts::*;
use crate::error::GeometryError;

/// Tag for every kind of surface in the park
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceKind {
    Ramp,
    HalfPipe,
    QuarterPipe,
    Rail,
    Box,
    Wall,
}

/// Axis-aligned size of a surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Extent along x
    pub width: f32,
    /// Extent along y
    pub height: f32,
    /// Extent along z
    pub length: f32,
}

impl Dimensions {
    pub const fn new(width: f32, height: f32, length: f32) -> Self {
        Self {
            width,
            height,
            length,
        }
    }

    /// Half extents as a vector
    #[inline]
    pub fn half(&self) -> Vec3 {
        Vec3::new(self.width, self.height, self.length) * 0.5
    }

    fn validate(&self, kind: SurfaceKind, index: usize) -> Result<(), GeometryError> {
        let values = [self.width, self.height, self.length];
        let reason = if values.iter().any(|v| !v.is_finite()) {
            Some("non-finite extent")
        } else if values.iter().any(|v| *v <= 0.0) {
            Some("extents must be positive")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(GeometryError::InvalidDimensions {
                kind,
                index,
                reason: reason.to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// A plain inclined ramp rising along z
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Incline {
    pub position: Vec3,
    pub dimensions: Dimensions,
    /// Pitch about x in radians; positive rises toward +z
    pub pitch: f32,
}

impl Incline {
    /// Height of the underside of the ramp
    #[inline]
    pub fn base(&self) -> f32 {
        self.position.y - self.dimensions.height / 2.0
    }

    /// Surface height at world z
    pub fn height_at(&self, z: f32) -> f32 {
        let half = self.dimensions.length / 2.0;
        let from_low_end = if self.pitch >= 0.0 {
            z - (self.position.z - half)
        } else {
            (self.position.z + half) - z
        };
        let d = from_low_end.clamp(0.0, self.dimensions.length);
        self.base() + self.pitch.tan().abs() * d
    }

    /// Surface normal; steep ramps get an extra upward bias
    pub fn normal(&self) -> Vec3 {
        let mut n = Vec3::new(0.0, self.pitch.cos(), -self.pitch.sin());
        if self.pitch.abs() > STEEP_RAMP_ANGLE {
            n.y *= STEEP_NORMAL_BOOST;
            n = n.normalize_or_zero();
        }
        n
    }

    /// Angle between the surface and the horizontal
    #[inline]
    pub fn slope(&self) -> f32 {
        self.normal().y.clamp(-1.0, 1.0).acos()
    }
}

/// Half-pipe or quarter-pipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipeKind {
    Half,
    Quarter,
}

/// A curved ramp whose cross-section is a circular arc in x/y
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    pub kind: PipeKind,
    pub position: Vec3,
    pub dimensions: Dimensions,
}

impl Pipe {
    #[inline]
    pub fn radius(&self) -> f32 {
        self.dimensions.width / 2.0
    }

    /// Arc used for a point at world x
    ///
    /// A half-pipe measures the offset from its center line regardless of
    /// side, so the implied circle center sits one radius out on the point's
    /// side. A quarter-pipe measures from its corner edge.
    pub fn profile_at(&self, x: f32) -> ArcProfile {
        let r = self.radius();
        let cy = self.position.y + r;
        let cx = match self.kind {
            PipeKind::Half => {
                let side = if x - self.position.x < 0.0 { -1.0 } else { 1.0 };
                self.position.x + side * r
            }
            PipeKind::Quarter => (self.position.x - self.dimensions.width / 2.0) + r,
        };
        ArcProfile::new(Vec2::new(cx, cy), r)
    }

    /// Whether (x, z) lies inside the pipe's padded footprint
    pub fn in_footprint(&self, x: f32, z: f32) -> bool {
        let half = self.dimensions.half();
        (x - self.position.x).abs() < half.x + RAMP_FOOTPRINT_MARGIN
            && (z - self.position.z).abs() < half.z + RAMP_FOOTPRINT_MARGIN
    }
}

/// Any rideable ramp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Ramp {
    Incline(Incline),
    Pipe(Pipe),
}

impl Ramp {
    pub fn kind(&self) -> SurfaceKind {
        match self {
            Ramp::Incline(_) => SurfaceKind::Ramp,
            Ramp::Pipe(p) => match p.kind {
                PipeKind::Half => SurfaceKind::HalfPipe,
                PipeKind::Quarter => SurfaceKind::QuarterPipe,
            },
        }
    }

    pub fn position(&self) -> Vec3 {
        match self {
            Ramp::Incline(i) => i.position,
            Ramp::Pipe(p) => p.position,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        match self {
            Ramp::Incline(i) => i.dimensions,
            Ramp::Pipe(p) => p.dimensions,
        }
    }
}

/// A grind rail running along z
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rail {
    pub position: Vec3,
    pub dimensions: Dimensions,
}

impl Rail {
    /// Height of the grindable top edge
    #[inline]
    pub fn top(&self) -> f32 {
        self.position.y + self.dimensions.height / 2.0
    }

    /// z of the two ends (min, max)
    #[inline]
    pub fn ends(&self) -> (f32, f32) {
        let half = self.dimensions.length / 2.0;
        (self.position.z - half, self.position.z + half)
    }
}

/// A solid box; `position` is its center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxObstacle {
    pub position: Vec3,
    pub dimensions: Dimensions,
}

impl BoxObstacle {
    #[inline]
    pub fn top(&self) -> f32 {
        self.position.y + self.dimensions.height / 2.0
    }

    /// Whether (x, z) is over the top face
    pub fn covers(&self, x: f32, z: f32) -> bool {
        let half = self.dimensions.half();
        (x - self.position.x).abs() <= half.x && (z - self.position.z).abs() <= half.z
    }
}

/// Horizontal axis a boundary wall faces along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallAxis {
    X,
    Z,
}

/// A boundary wall; only its plane matters for collisions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub position: Vec3,
    pub dimensions: Dimensions,
}

impl Wall {
    /// Dominant horizontal axis of the wall's position
    pub fn axis(&self) -> Option<WallAxis> {
        let (ax, az) = (self.position.x.abs(), self.position.z.abs());
        if ax == 0.0 && az == 0.0 {
            None
        } else if az >= ax {
            Some(WallAxis::Z)
        } else {
            Some(WallAxis::X)
        }
    }

    /// Unit normal pointing back into the park
    pub fn inward_normal(&self) -> Vec3 {
        match self.axis() {
            Some(WallAxis::Z) => Vec3::new(0.0, 0.0, -self.position.z.signum()),
            Some(WallAxis::X) => Vec3::new(-self.position.x.signum(), 0.0, 0.0),
            None => Vec3::ZERO,
        }
    }
}

/// Anything solid the skater bounces off
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Obstacle {
    Box(BoxObstacle),
    Wall(Wall),
}

impl Obstacle {
    pub fn kind(&self) -> SurfaceKind {
        match self {
            Obstacle::Box(_) => SurfaceKind::Box,
            Obstacle::Wall(_) => SurfaceKind::Wall,
        }
    }
}

/// Serialized description of one surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceSpec {
    pub kind: SurfaceKind,
    pub position: Vec3,
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
    /// Pitch in radians; required for plain ramps
    #[serde(default)]
    pub rotation: Option<f32>,
}

/// Boundary wall size when a description leaves it out
const DEFAULT_WALL: Dimensions = Dimensions::new(PARK_HALF_SIZE * 2.0, 1.5, 1.0);

/// The immutable park catalog
#[derive(Debug, Clone, Default)]
pub struct ParkModel {
    ramps: Vec<Ramp>,
    rails: Vec<Rail>,
    obstacles: Vec<Obstacle>,
}

impl ParkModel {
    /// Build a catalog from typed surfaces
    ///
    /// Applies the same geometry checks as `from_specs`. Error indices count
    /// within each collection.
    pub fn new(
        ramps: Vec<Ramp>,
        rails: Vec<Rail>,
        obstacles: Vec<Obstacle>,
    ) -> Result<Self, GeometryError> {
        for (index, ramp) in ramps.iter().enumerate() {
            if let Ramp::Incline(incline) = ramp {
                if !incline.pitch.is_finite() {
                    return Err(GeometryError::MissingPitch { index });
                }
            }
            check_surface(ramp.kind(), index, ramp.position(), ramp.dimensions())?;
        }
        for (index, rail) in rails.iter().enumerate() {
            check_surface(SurfaceKind::Rail, index, rail.position, rail.dimensions)?;
        }
        for (index, obstacle) in obstacles.iter().enumerate() {
            match obstacle {
                Obstacle::Box(b) => check_surface(SurfaceKind::Box, index, b.position, b.dimensions)?,
                Obstacle::Wall(w) => {
                    check_surface(SurfaceKind::Wall, index, w.position, w.dimensions)?;
                    if w.axis().is_none() {
                        return Err(GeometryError::AmbiguousWall { index });
                    }
                }
            }
        }

        log::info!(
            "Park built: {} ramps, {} rails, {} obstacles",
            ramps.len(),
            rails.len(),
            obstacles.len()
        );
        Ok(Self {
            ramps,
            rails,
            obstacles,
        })
    }

    /// An empty flat park
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn ramps(&self) -> &[Ramp] {
        &self.ramps
    }

    pub fn rails(&self) -> &[Rail] {
        &self.rails
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Build a catalog from surface descriptions, validating each one
    pub fn from_specs(specs: &[SurfaceSpec]) -> Result<Self, GeometryError> {
        let mut ramps = Vec::new();
        let mut rails = Vec::new();
        let mut obstacles = Vec::new();
        for (index, spec) in specs.iter().enumerate() {
            let dims = match (spec.kind, spec.dimensions) {
                (_, Some(d)) => d,
                (SurfaceKind::Wall, None) => DEFAULT_WALL,
                (kind, None) => return Err(GeometryError::MissingDimensions { kind, index }),
            };
            check_surface(spec.kind, index, spec.position, dims)?;

            let position = spec.position;
            match spec.kind {
                SurfaceKind::Ramp => {
                    let pitch = spec
                        .rotation
                        .filter(|p| p.is_finite())
                        .ok_or(GeometryError::MissingPitch { index })?;
                    ramps.push(Ramp::Incline(Incline {
                        position,
                        dimensions: dims,
                        pitch,
                    }));
                }
                SurfaceKind::HalfPipe | SurfaceKind::QuarterPipe => {
                    let kind = if spec.kind == SurfaceKind::HalfPipe {
                        PipeKind::Half
                    } else {
                        PipeKind::Quarter
                    };
                    ramps.push(Ramp::Pipe(Pipe {
                        kind,
                        position,
                        dimensions: dims,
                    }));
                }
                SurfaceKind::Rail => rails.push(Rail {
                    position,
                    dimensions: dims,
                }),
                SurfaceKind::Box => obstacles.push(Obstacle::Box(BoxObstacle {
                    position,
                    dimensions: dims,
                })),
                SurfaceKind::Wall => {
                    let wall = Wall {
                        position,
                        dimensions: dims,
                    };
                    if wall.axis().is_none() {
                        return Err(GeometryError::AmbiguousWall { index });
                    }
                    obstacles.push(Obstacle::Wall(wall));
                }
            }
        }

        Self::new(ramps, rails, obstacles)
    }

    /// Parse a JSON array of surface descriptions
    pub fn from_json(json: &str) -> Result<Self, GeometryError> {
        let specs: Vec<SurfaceSpec> = serde_json::from_str(json)?;
        Self::from_specs(&specs)
    }

    /// The stock park: half-pipe, fun box with two ramps, rail, quarter-pipe
    /// and four boundary walls
    pub fn default_park() -> Self {
        let box_size = Dimensions::new(10.0, 2.0, 10.0);
        let ramp_size = Dimensions::new(10.0, 2.0, 5.0);
        let wall_y = DEFAULT_WALL.height / 2.0;
        let ns_wall = DEFAULT_WALL;
        let ew_wall = Dimensions::new(DEFAULT_WALL.length, DEFAULT_WALL.height, DEFAULT_WALL.width);

        let ramps = vec![
            Ramp::Pipe(Pipe {
                kind: PipeKind::Half,
                position: Vec3::new(0.0, 0.0, -30.0),
                dimensions: Dimensions::new(15.0, 6.0, 30.0),
            }),
            Ramp::Incline(Incline {
                position: Vec3::new(15.0, 1.0, 12.5),
                dimensions: ramp_size,
                pitch: -PI / 8.0,
            }),
            Ramp::Incline(Incline {
                position: Vec3::new(15.0, 1.0, -2.5),
                dimensions: ramp_size,
                pitch: PI / 8.0,
            }),
            Ramp::Pipe(Pipe {
                kind: PipeKind::Quarter,
                position: Vec3::new(20.0, 0.0, -15.0),
                dimensions: Dimensions::new(15.0, 5.0, 10.0),
            }),
        ];
        let rails = vec![Rail {
            position: Vec3::new(-15.0, 0.5, 0.0),
            dimensions: Dimensions::new(0.2, 1.0, 15.0),
        }];
        let obstacles = vec![
            Obstacle::Box(BoxObstacle {
                position: Vec3::new(15.0, 1.0, 5.0),
                dimensions: box_size,
            }),
            Obstacle::Wall(Wall {
                position: Vec3::new(0.0, wall_y, -PARK_HALF_SIZE),
                dimensions: ns_wall,
            }),
            Obstacle::Wall(Wall {
                position: Vec3::new(0.0, wall_y, PARK_HALF_SIZE),
                dimensions: ns_wall,
            }),
            Obstacle::Wall(Wall {
                position: Vec3::new(PARK_HALF_SIZE, wall_y, 0.0),
                dimensions: ew_wall,
            }),
            Obstacle::Wall(Wall {
                position: Vec3::new(-PARK_HALF_SIZE, wall_y, 0.0),
                dimensions: ew_wall,
            }),
        ];
        Self {
            ramps,
            rails,
            obstacles,
        }
    }
}

/// Position and extent checks shared by every surface kind
fn check_surface(
    kind: SurfaceKind,
    index: usize,
    position: Vec3,
    dimensions: Dimensions,
) -> Result<(), GeometryError> {
    if !position.is_finite() {
        return Err(GeometryError::NonFinitePosition { kind, index });
    }
    dimensions.validate(kind, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incline(pitch: f32) -> Incline {
        Incline {
            position: Vec3::new(0.0, 1.0, 0.0),
            dimensions: Dimensions::new(10.0, 2.0, 5.0),
            pitch,
        }
    }

    #[test]
    fn test_incline_height_positive_pitch() {
        let ramp = incline(PI / 8.0);
        assert!((ramp.height_at(-2.5) - 0.0).abs() < 1e-5);
        let top = (PI / 8.0).tan() * 5.0;
        assert!((ramp.height_at(2.5) - top).abs() < 1e-4);
        // Clamped past the ends
        assert!((ramp.height_at(10.0) - top).abs() < 1e-4);
        assert!((ramp.height_at(-10.0) - 0.0).abs() < 1e-5);
    }

    #[test]
    fn test_incline_height_negative_pitch() {
        let ramp = incline(-PI / 8.0);
        assert!((ramp.height_at(2.5) - 0.0).abs() < 1e-5);
        assert!(ramp.height_at(-2.5) > ramp.height_at(0.0));
    }

    #[test]
    fn test_incline_normal_faces_downhill() {
        // Rising toward +z: normal leans toward -z
        let n = incline(PI / 8.0).normal();
        assert!(n.z < 0.0 && n.y > 0.0);
        assert!((n.length() - 1.0).abs() < 1e-5);

        let n = incline(-PI / 8.0).normal();
        assert!(n.z > 0.0);
    }

    #[test]
    fn test_steep_incline_normal_boosted() {
        let pitch = PI / 4.0;
        let n = incline(pitch).normal();
        assert!(n.y > pitch.cos());
        assert!((n.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_half_pipe_profile_is_side_agnostic() {
        let pipe = Pipe {
            kind: PipeKind::Half,
            position: Vec3::ZERO,
            dimensions: Dimensions::new(10.0, 5.0, 20.0),
        };
        let right = pipe.profile_at(2.0).height_at(2.0).unwrap();
        let left = pipe.profile_at(-2.0).height_at(-2.0).unwrap();
        assert!((right - left).abs() < 1e-5);
        // Bottom of the bowl one radius out from the center line
        assert!(pipe.profile_at(5.0).height_at(5.0).unwrap().abs() < 1e-5);
    }

    #[test]
    fn test_quarter_pipe_profile_from_corner() {
        let pipe = Pipe {
            kind: PipeKind::Quarter,
            position: Vec3::new(20.0, 0.0, 0.0),
            dimensions: Dimensions::new(10.0, 5.0, 10.0),
        };
        let arc = pipe.profile_at(20.0);
        assert_eq!(arc.center, Vec2::new(20.0, 5.0));
        assert!(arc.height_at(20.0).unwrap().abs() < 1e-5);
    }

    #[test]
    fn test_wall_axis_and_normal() {
        let north = Wall {
            position: Vec3::new(0.0, 0.75, -50.0),
            dimensions: DEFAULT_WALL,
        };
        assert_eq!(north.axis(), Some(WallAxis::Z));
        assert_eq!(north.inward_normal(), Vec3::Z);

        let east = Wall {
            position: Vec3::new(50.0, 0.75, 0.0),
            dimensions: DEFAULT_WALL,
        };
        assert_eq!(east.axis(), Some(WallAxis::X));
        assert_eq!(east.inward_normal(), Vec3::NEG_X);
    }

    #[test]
    fn test_default_park_layout() {
        let park = ParkModel::default_park();
        assert_eq!(park.ramps().len(), 4);
        assert_eq!(park.rails().len(), 1);
        assert_eq!(park.obstacles().len(), 5);
        assert_eq!(park.ramps()[0].kind(), SurfaceKind::HalfPipe);
        assert_eq!(park.ramps()[3].kind(), SurfaceKind::QuarterPipe);
        assert!((park.rails()[0].top() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            { "kind": "rail", "position": [0.0, 0.5, 0.0], "dimensions": { "width": 0.2, "height": 1.0, "length": 10.0 } },
            { "kind": "ramp", "position": [5.0, 1.0, 0.0], "dimensions": { "width": 4.0, "height": 2.0, "length": 4.0 }, "rotation": 0.3 },
            { "kind": "wall", "position": [50.0, 0.75, 0.0] }
        ]"#;
        let park = ParkModel::from_json(json).unwrap();
        assert_eq!(park.rails().len(), 1);
        assert_eq!(park.ramps().len(), 1);
        assert_eq!(park.obstacles().len(), 1);
    }

    #[test]
    fn test_from_specs_rejects_bad_geometry() {
        let missing = SurfaceSpec {
            kind: SurfaceKind::Box,
            position: Vec3::ZERO,
            dimensions: None,
            rotation: None,
        };
        assert!(matches!(
            ParkModel::from_specs(&[missing]),
            Err(GeometryError::MissingDimensions { .. })
        ));

        let no_pitch = SurfaceSpec {
            kind: SurfaceKind::Ramp,
            position: Vec3::ZERO,
            dimensions: Some(Dimensions::new(1.0, 1.0, 1.0)),
            rotation: None,
        };
        assert!(matches!(
            ParkModel::from_specs(&[no_pitch]),
            Err(GeometryError::MissingPitch { .. })
        ));

        let flat = SurfaceSpec {
            kind: SurfaceKind::Rail,
            position: Vec3::ZERO,
            dimensions: Some(Dimensions::new(0.2, 0.0, 5.0)),
            rotation: None,
        };
        assert!(matches!(
            ParkModel::from_specs(&[flat]),
            Err(GeometryError::InvalidDimensions { .. })
        ));

        let centered_wall = SurfaceSpec {
            kind: SurfaceKind::Wall,
            position: Vec3::new(0.0, 1.0, 0.0),
            dimensions: None,
            rotation: None,
        };
        assert!(matches!(
            ParkModel::from_specs(&[centered_wall]),
            Err(GeometryError::AmbiguousWall { .. })
        ));
    }

    #[test]
    fn test_new_validates_typed_surfaces() {
        let centered_wall = Obstacle::Wall(Wall {
            position: Vec3::new(0.0, 0.75, 0.0),
            dimensions: DEFAULT_WALL,
        });
        assert!(matches!(
            ParkModel::new(Vec::new(), Vec::new(), vec![centered_wall]),
            Err(GeometryError::AmbiguousWall { index: 0 })
        ));

        let flat_box = Obstacle::Box(BoxObstacle {
            position: Vec3::new(5.0, 1.0, 5.0),
            dimensions: Dimensions::new(2.0, 0.0, 2.0),
        });
        assert!(matches!(
            ParkModel::new(Vec::new(), Vec::new(), vec![flat_box]),
            Err(GeometryError::InvalidDimensions {
                kind: SurfaceKind::Box,
                ..
            })
        ));

        let lost_rail = Rail {
            position: Vec3::new(f32::NAN, 0.5, 0.0),
            dimensions: Dimensions::new(0.2, 1.0, 5.0),
        };
        assert!(matches!(
            ParkModel::new(Vec::new(), vec![lost_rail], Vec::new()),
            Err(GeometryError::NonFinitePosition {
                kind: SurfaceKind::Rail,
                index: 0
            })
        ));

        let mut bad_ramp = incline(0.3);
        bad_ramp.pitch = f32::INFINITY;
        assert!(matches!(
            ParkModel::new(vec![Ramp::Incline(bad_ramp)], Vec::new(), Vec::new()),
            Err(GeometryError::MissingPitch { index: 0 })
        ));
    }

    #[test]
    fn test_default_park_passes_validation() {
        let park = ParkModel::default_park();
        let rebuilt = ParkModel::new(
            park.ramps().to_vec(),
            park.rails().to_vec(),
            park.obstacles().to_vec(),
        );
        assert!(rebuilt.is_ok());
    }

    #[test]
    fn test_from_json_parse_error() {
        assert!(matches!(
            ParkModel::from_json("not json"),
            Err(GeometryError::Parse(_))
        ));
    }
}
