//! Skater state and per-frame input/output types
//!
//! The motion mode is a single tagged enum so ground, air and grind can never
//! be active at the same time.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::trick::{CompletedTrick, TrickProgress};
use crate::settings::Settings;

/// Stance used while riding a rail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrindStyle {
    FiftyFifty,
    Boardslide,
    FiveO,
    Nosegrind,
    Crooked,
}

/// How held intent changes speed while grinding
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrindResponse {
    /// Speed change per second while pushing forward
    pub forward_rate: f32,
    /// Forward speed cap, as a fraction of max speed
    pub forward_cap: f32,
    /// Speed change per second while pushing back
    pub backward_rate: f32,
    /// Reverse speed floor, as a fraction of max speed
    pub backward_floor: f32,
}

impl GrindStyle {
    /// Cycle order for `toggle`
    pub const ALL: [GrindStyle; 5] = [
        GrindStyle::FiftyFifty,
        GrindStyle::Boardslide,
        GrindStyle::FiveO,
        GrindStyle::Nosegrind,
        GrindStyle::Crooked,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GrindStyle::FiftyFifty => "50-50",
            GrindStyle::Boardslide => "Boardslide",
            GrindStyle::FiveO => "5-0",
            GrindStyle::Nosegrind => "Nosegrind",
            GrindStyle::Crooked => "Crooked",
        }
    }

    /// Next style in cycle order
    pub fn next(&self) -> GrindStyle {
        let i = Self::ALL.iter().position(|s| s == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// Multiplier on direction.x each frame; boardslide steers instead
    pub fn lateral_damping(&self) -> Option<f32> {
        match self {
            GrindStyle::FiftyFifty => Some(0.1),
            GrindStyle::Boardslide => None,
            GrindStyle::FiveO | GrindStyle::Nosegrind => Some(0.2),
            GrindStyle::Crooked => Some(0.3),
        }
    }

    /// Per-frame speed multiplier
    pub fn friction(&self) -> f32 {
        match self {
            GrindStyle::FiftyFifty | GrindStyle::Crooked => 0.993,
            GrindStyle::Boardslide => 1.0,
            GrindStyle::FiveO => 0.997,
            GrindStyle::Nosegrind => 0.995,
        }
    }

    /// Probability of slipping off the rail each frame
    pub fn fall_chance(&self) -> f64 {
        match self {
            GrindStyle::FiftyFifty | GrindStyle::Boardslide => 0.0,
            GrindStyle::FiveO => 0.01,
            GrindStyle::Nosegrind => 0.008,
            GrindStyle::Crooked => 0.015,
        }
    }

    /// Intent response; boardslide steers instead
    pub fn response(&self) -> Option<GrindResponse> {
        match self {
            GrindStyle::FiftyFifty => Some(GrindResponse {
                forward_rate: 6.0,
                forward_cap: 0.95,
                backward_rate: 6.0,
                backward_floor: -0.6,
            }),
            GrindStyle::FiveO | GrindStyle::Nosegrind => Some(GrindResponse {
                forward_rate: 8.0,
                forward_cap: 0.9,
                backward_rate: 8.0,
                backward_floor: -0.6,
            }),
            GrindStyle::Crooked => Some(GrindResponse {
                forward_rate: 10.0,
                forward_cap: 1.0,
                backward_rate: 10.0,
                backward_floor: -0.7,
            }),
            GrindStyle::Boardslide => None,
        }
    }

    /// Board pose (Euler x, y, z) for this stance at the given heading
    pub fn stance(&self, heading: f32) -> Vec3 {
        match self {
            GrindStyle::FiftyFifty => Vec3::new(0.0, heading, 0.0),
            GrindStyle::Boardslide => Vec3::new(0.0, FRAC_PI_2, 0.0),
            GrindStyle::FiveO => Vec3::new(-PI / 12.0, heading, 0.0),
            GrindStyle::Nosegrind => Vec3::new(PI / 12.0, heading, 0.0),
            GrindStyle::Crooked => Vec3::new(PI / 14.0, heading + PI / 12.0, PI / 20.0),
        }
    }
}

/// Mutually exclusive motion modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionState {
    /// Rolling on the ground, a ramp, or an obstacle top
    Ground,
    /// Airborne; `jumping` is set when the skater popped rather than rolled off
    Air { jumping: bool },
    /// Riding the rail at `rail` (index into the park's rails)
    Grind { rail: usize, style: GrindStyle },
}

impl MotionState {
    #[inline]
    pub fn is_ground(&self) -> bool {
        matches!(self, MotionState::Ground)
    }

    #[inline]
    pub fn is_air(&self) -> bool {
        matches!(self, MotionState::Air { .. })
    }

    #[inline]
    pub fn is_grinding(&self) -> bool {
        matches!(self, MotionState::Grind { .. })
    }

    #[inline]
    pub fn is_jumping(&self) -> bool {
        matches!(self, MotionState::Air { jumping: true })
    }

    pub fn grind_rail(&self) -> Option<usize> {
        match self {
            MotionState::Grind { rail, .. } => Some(*rail),
            _ => None,
        }
    }

    pub fn grind_style(&self) -> Option<GrindStyle> {
        match self {
            MotionState::Grind { style, .. } => Some(*style),
            _ => None,
        }
    }

    /// Touch down on a supporting surface
    pub fn land(&mut self) {
        *self = MotionState::Ground;
    }

    /// Leave the ground or rail; a rolling exit keeps any jump in progress
    pub fn take_off(&mut self) {
        let jumping = self.is_jumping();
        *self = MotionState::Air { jumping };
    }

    /// Pop into the air
    pub fn jump(&mut self) {
        *self = MotionState::Air { jumping: true };
    }

    pub fn start_grind(&mut self, rail: usize, style: GrindStyle) {
        *self = MotionState::Grind { rail, style };
    }

    /// Leave the rail into the air
    pub fn leave_rail(&mut self) {
        *self = MotionState::Air { jumping: false };
    }

    /// Change stance without leaving the rail
    pub fn set_grind_style(&mut self, new_style: GrindStyle) {
        if let MotionState::Grind { style, .. } = self {
            *style = new_style;
        }
    }
}

/// Complete kinematic and gameplay state of the skater
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkaterState {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Unit horizontal facing
    pub direction: Vec3,
    /// Signed speed along `direction`
    pub speed: f32,
    pub motion: MotionState,
    /// Rail the skater is dropping toward (cleared every frame)
    pub approaching_rail: Option<usize>,
    /// Style to use on the next mount
    pub preferred_grind_style: Option<GrindStyle>,
    pub current_trick: Option<TrickProgress>,
    /// Board pose for presentation (Euler x, y, z)
    pub board_rotation: Vec3,
}

impl SkaterState {
    /// A skater at rest at the configured spawn point
    pub fn spawn(settings: &Settings) -> Self {
        let direction = settings.spawn_facing();
        Self {
            position: settings.spawn_position,
            velocity: Vec3::ZERO,
            direction,
            speed: 0.0,
            motion: MotionState::Ground,
            approaching_rail: None,
            preferred_grind_style: None,
            current_trick: None,
            board_rotation: Vec3::new(0.0, crate::heading(direction), 0.0),
        }
    }

    /// Horizontal part of the velocity
    #[inline]
    pub fn horizontal_velocity(&self) -> Vec3 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z)
    }

    /// Write `speed` back into the horizontal velocity
    #[inline]
    pub fn sync_velocity_from_speed(&mut self) {
        self.velocity.x = self.direction.x * self.speed;
        self.velocity.z = self.direction.z * self.speed;
    }
}

/// Player intent for one frame
///
/// Movement fields describe keys held down. Action fields are presses that
/// happened since the previous frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,

    pub jump: bool,
    /// Kickflip in the air, nosegrind on a rail
    pub trick_north: bool,
    /// Heelflip in the air, 5-0 on a rail
    pub trick_south: bool,
    /// Shuvit in the air, boardslide on a rail
    pub trick_east: bool,
    /// 360 flip in the air, 50-50 on a rail
    pub trick_west: bool,
    /// Crooked on a rail
    pub grind_style_select: bool,
}

impl InputIntent {
    /// Only forward held
    pub fn forward() -> Self {
        Self {
            forward: true,
            ..Self::default()
        }
    }

    /// Only backward held
    pub fn backward() -> Self {
        Self {
            backward: true,
            ..Self::default()
        }
    }
}

/// What the caller needs to present one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameReport {
    pub position: Vec3,
    pub direction: Vec3,
    pub speed: f32,
    pub on_ground: bool,
    pub in_air: bool,
    pub grinding: bool,
    pub grind_style: Option<GrindStyle>,
    pub approaching_rail: bool,
    pub board_rotation: Vec3,
    /// Set on the frame a trick finishes
    pub completed_trick: Option<CompletedTrick>,
}

impl FrameReport {
    pub fn from_state(state: &SkaterState, completed_trick: Option<CompletedTrick>) -> Self {
        Self {
            position: state.position,
            direction: state.direction,
            speed: state.speed,
            on_ground: state.motion.is_ground(),
            in_air: state.motion.is_air(),
            grinding: state.motion.is_grinding(),
            grind_style: state.motion.grind_style(),
            approaching_rail: state.approaching_rail.is_some(),
            board_rotation: state.board_rotation,
            completed_trick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motion_transitions() {
        let mut m = MotionState::Ground;
        m.jump();
        assert!(m.is_air() && m.is_jumping());

        // Rolling off keeps the jump flag
        m.take_off();
        assert!(m.is_jumping());

        m.land();
        assert!(m.is_ground());
        m.take_off();
        assert_eq!(m, MotionState::Air { jumping: false });

        m.start_grind(0, GrindStyle::FiveO);
        assert!(m.is_grinding());
        assert_eq!(m.grind_rail(), Some(0));
        m.set_grind_style(GrindStyle::Crooked);
        assert_eq!(m.grind_style(), Some(GrindStyle::Crooked));
        m.leave_rail();
        assert_eq!(m, MotionState::Air { jumping: false });
    }

    #[test]
    fn test_set_grind_style_ignored_off_rail() {
        let mut m = MotionState::Ground;
        m.set_grind_style(GrindStyle::Boardslide);
        assert_eq!(m, MotionState::Ground);
    }

    #[test]
    fn test_grind_style_cycle() {
        let mut style = GrindStyle::FiftyFifty;
        for _ in 0..GrindStyle::ALL.len() {
            style = style.next();
        }
        assert_eq!(style, GrindStyle::FiftyFifty);
        assert_eq!(GrindStyle::Crooked.next(), GrindStyle::FiftyFifty);
    }

    #[test]
    fn test_grind_style_table() {
        assert_eq!(GrindStyle::Boardslide.friction(), 1.0);
        assert_eq!(GrindStyle::FiftyFifty.fall_chance(), 0.0);
        assert!(GrindStyle::Crooked.fall_chance() > GrindStyle::FiveO.fall_chance());
        assert!(GrindStyle::Boardslide.lateral_damping().is_none());
        assert!(GrindStyle::Boardslide.response().is_none());
    }

    #[test]
    fn test_spawn() {
        let s = SkaterState::spawn(&Settings::default());
        assert_eq!(s.position, Vec3::new(0.0, 0.2, 0.0));
        assert_eq!(s.direction, Vec3::NEG_Z);
        assert!(s.motion.is_ground());
        assert_eq!(s.speed, 0.0);
    }

    #[test]
    fn test_report_flags_exclusive() {
        let mut s = SkaterState::spawn(&Settings::default());
        for motion in [
            MotionState::Ground,
            MotionState::Air { jumping: true },
            MotionState::Grind {
                rail: 0,
                style: GrindStyle::FiftyFifty,
            },
        ] {
            s.motion = motion;
            let r = FrameReport::from_state(&s, None);
            let count = [r.on_ground, r.in_air, r.grinding]
                .iter()
                .filter(|f| **f)
                .count();
            assert_eq!(count, 1);
        }
    }
}
