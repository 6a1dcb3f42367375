//! Per-frame skater integration
//!
//! `Skater::advance` runs one frame: intent, gravity, a speculative collision
//! pre-check at the next position, a post-move re-check, ground and boundary
//! clamps, then pose and trick updates. Ramp and rail responses live in
//! `ramp.rs` and `grind.rs`.

use std::sync::Arc;

use glam::{Quat, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{CollisionResult, RailApproach, bounce};
use super::park::{Obstacle, ParkModel, Ramp};
use super::physics::Physics;
use super::state::{FrameReport, GrindStyle, InputIntent, SkaterState};
use super::trick::{CompletedTrick, TrickKind, TrickProgress};
use crate::consts::*;
use crate::settings::Settings;

/// Whether the rest of the frame should run after the pre-check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Step {
    Continue,
    /// Left a rail this frame; skip the re-check and ground clamp
    LeftRail,
}

/// Trick keys and what they do on a rail versus in the air
fn trick_keys(input: &InputIntent) -> [(bool, GrindStyle, TrickKind); 4] {
    [
        (input.trick_north, GrindStyle::Nosegrind, TrickKind::Kickflip),
        (input.trick_south, GrindStyle::FiveO, TrickKind::Heelflip),
        (input.trick_west, GrindStyle::FiftyFifty, TrickKind::ThreeSixtyFlip),
        (input.trick_east, GrindStyle::Boardslide, TrickKind::Shuvit),
    ]
}

/// A skater moving through a park
pub struct Skater<R = Pcg32> {
    pub(super) park: Arc<ParkModel>,
    pub(super) physics: Physics,
    pub(super) settings: Settings,
    pub(super) state: SkaterState,
    pub(super) rng: R,
}

impl Skater<Pcg32> {
    /// Skater with default settings and a seeded RNG
    pub fn with_seed(park: Arc<ParkModel>, seed: u64) -> Self {
        let settings = Settings::default();
        let physics = Physics::from_settings(&settings);
        Self::new(park, physics, settings, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Skater<R> {
    pub fn new(park: Arc<ParkModel>, physics: Physics, settings: Settings, rng: R) -> Self {
        let state = SkaterState::spawn(&settings);
        log::info!(
            "Skater spawned at ({:.1}, {:.1}, {:.1})",
            state.position.x,
            state.position.y,
            state.position.z
        );
        Self {
            park,
            physics,
            settings,
            state,
            rng,
        }
    }

    pub fn state(&self) -> &SkaterState {
        &self.state
    }

    pub fn park(&self) -> &ParkModel {
        &self.park
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn position(&self) -> Vec3 {
        self.state.position
    }

    pub fn direction(&self) -> Vec3 {
        self.state.direction
    }

    pub fn speed(&self) -> f32 {
        self.state.speed
    }

    /// Yaw of the facing direction
    pub fn heading(&self) -> f32 {
        crate::heading(self.state.direction)
    }

    pub fn current_trick(&self) -> Option<&TrickProgress> {
        self.state.current_trick.as_ref()
    }

    pub fn grind_style(&self) -> Option<GrindStyle> {
        self.state.motion.grind_style()
    }

    /// Advance the skater by one frame
    pub fn advance(&mut self, input: &InputIntent, dt: f32) -> FrameReport {
        let dt = dt.max(0.0);
        let park = Arc::clone(&self.park);

        self.apply_actions(input);
        self.apply_intent(input, dt);

        if !self.state.motion.is_ground() {
            self.state.velocity.y += self.physics.gravity * dt;
        }

        let was_approaching = self.state.approaching_rail.take().is_some();
        let next = self.state.position + self.state.velocity * dt;

        let step = self.resolve_step(&park, next, input, dt, was_approaching);

        if self.state.motion.is_air() && self.state.velocity.y < 0.0 {
            self.state.approaching_rail = self.physics.scan_rail_approach(next, park.rails());
        }

        if step == Step::Continue {
            let supported = self.recheck_contacts(&park);
            self.clamp_to_ground(supported);
        }

        self.clamp_to_boundary();
        self.resync_speed();
        self.update_pose();
        let completed = self.update_trick(dt);

        FrameReport::from_state(&self.state, completed)
    }

    /// Jump from the ground or a rail; ignored in the air
    pub fn jump(&mut self) {
        let motion = self.state.motion;
        if !(motion.is_ground() || motion.is_grinding()) {
            return;
        }

        let max_speed = self.settings.max_speed;
        let mut force = self.settings.jump_force;
        let mut dir = Vec3::Y;

        if motion.is_grinding() {
            self.state.velocity.z = self.state.speed * rail_sign(self.state.direction);
            force += self.settings.grind_jump_boost;
        }

        let contact = self
            .physics
            .check_ramps(self.state.position, self.park.ramps());
        if let Some(index) = contact.index() {
            let n = contact.normal;
            let sf = (self.state.speed.abs() / max_speed).min(1.0);
            dir = n;
            match self.park.ramps()[index] {
                Ramp::Incline(_) => {
                    force += (1.0 - n.y) * 3.0 * sf * 2.0;
                }
                Ramp::Pipe(_) => {
                    let vertical = 1.0 - n.y.abs();
                    force += vertical * 6.0 * sf * 2.5;
                    self.state.velocity.x += n.x * sf * 5.0;
                    if self.state.speed > max_speed * 0.7 && vertical > 0.7 {
                        force += self.state.speed * 0.8;
                        self.state.speed *= 0.7;
                    }
                }
            }
        }

        self.state.velocity.x += dir.x * force * 0.3;
        self.state.velocity.y = dir.y * force;
        self.state.velocity.z += dir.z * force * 0.3;
        if motion.is_grinding() {
            log::info!("Popped off rail");
        }
        self.state.motion.jump();
        log::debug!("Jump with force {force:.2}");
    }

    /// Start an aerial trick; only in the air with no trick running
    pub fn start_trick(&mut self, kind: TrickKind) -> bool {
        if !self.state.motion.is_air() || self.state.current_trick.is_some() {
            return false;
        }
        log::debug!("Trick started: {}", kind.name());
        self.state.current_trick = Some(TrickProgress::new(kind));
        true
    }

    /// Pick the style for the next mount, and switch to it if already grinding
    pub fn select_grind_style(&mut self, style: GrindStyle) {
        self.state.preferred_grind_style = Some(style);
        if self.state.motion.grind_style().is_some_and(|s| s != style) {
            log::debug!("Grind style: {}", style.name());
            self.state.motion.set_grind_style(style);
        }
    }

    /// Cycle to the next grind style (the current one on a rail, else the preferred one)
    pub fn toggle_grind_style(&mut self) {
        let current = self
            .state
            .motion
            .grind_style()
            .or(self.state.preferred_grind_style)
            .unwrap_or(GrindStyle::FiftyFifty);
        self.select_grind_style(current.next());
    }

    fn apply_actions(&mut self, input: &InputIntent) {
        if input.jump {
            self.jump();
        }

        let near_rail =
            self.state.motion.is_grinding() || self.state.approaching_rail.is_some();
        for (pressed, style, trick) in trick_keys(input) {
            if !pressed {
                continue;
            }
            if near_rail {
                self.select_grind_style(style);
            } else {
                self.start_trick(trick);
            }
        }
        if input.grind_style_select && near_rail {
            self.select_grind_style(GrindStyle::Crooked);
        }
    }

    fn apply_intent(&mut self, input: &InputIntent, dt: f32) {
        let s = &self.settings;
        let state = &mut self.state;

        if input.forward {
            state.speed = (state.speed + s.acceleration * dt).min(s.max_speed);
        } else if input.backward {
            state.speed = (state.speed - s.acceleration * dt).max(-s.max_speed / 2.0);
        } else if state.speed > 0.0 {
            state.speed = (state.speed - s.deceleration * dt).max(0.0);
        } else if state.speed < 0.0 {
            state.speed = (state.speed + s.deceleration * dt).min(0.0);
        }

        let mut turn = 0.0;
        if input.left {
            turn += s.turn_rate * dt;
        }
        if input.right {
            turn -= s.turn_rate * dt;
        }
        if turn != 0.0 {
            state.direction = Quat::from_rotation_y(turn) * state.direction;
        }
        state.direction = flat_unit(state.direction, state.direction);

        state.sync_velocity_from_speed();
    }

    /// Speculative check at the next position: obstacle, then ramp, then rail
    fn resolve_step(
        &mut self,
        park: &ParkModel,
        next: Vec3,
        input: &InputIntent,
        dt: f32,
        was_approaching: bool,
    ) -> Step {
        let obstacle = self.physics.check_obstacles(next, park.obstacles());
        if let Some(index) = obstacle.index() {
            self.block_on_obstacle(&park.obstacles()[index], &obstacle);
            return Step::Continue;
        }

        let ramp = self.physics.check_ramps(next, park.ramps());
        if let Some(index) = ramp.index() {
            match &park.ramps()[index] {
                Ramp::Incline(incline) => self.ride_incline(incline, &ramp, next, dt),
                Ramp::Pipe(pipe) => self.ride_pipe(pipe, &ramp, dt),
            }
            return Step::Continue;
        }

        let rail = self.physics.check_rails(next, park.rails());
        if let Some(index) = rail.index() {
            return match rail.approach {
                Some(RailApproach::FromAbove) => {
                    self.ride_rail(index, &park.rails()[index], next, input, dt, was_approaching)
                }
                Some(RailApproach::FromSide) => {
                    self.bounce_off_rail(&park.rails()[index], dt);
                    Step::Continue
                }
                None => {
                    self.state.position = next;
                    Step::Continue
                }
            };
        }

        self.state.position = next;
        Step::Continue
    }

    /// The next position would be inside an obstacle
    fn block_on_obstacle(&mut self, obstacle: &Obstacle, hit: &CollisionResult) {
        let state = &mut self.state;
        if hit.is_top_face() {
            if let Obstacle::Box(b) = obstacle {
                state.position.y = b.top() + OBSTACLE_TOP_CLEARANCE;
            }
            state.velocity.y = 0.0;
            state.velocity.x *= 0.95;
            state.velocity.z *= 0.95;
            if !state.motion.is_ground() {
                log::debug!("Landed on obstacle");
            }
            state.motion.land();
            return;
        }

        let n = hit.normal;
        let into = state.velocity.dot(n);
        if into < 0.0 {
            state.velocity -= n * into * (1.0 + DEFAULT_RESTITUTION);
            state.position += n * hit.penetration;
        }
    }

    /// Re-check contacts at the resolved position; returns whether something
    /// other than the ground floor is holding the skater up
    fn recheck_contacts(&mut self, park: &ParkModel) -> bool {
        let obstacle = self
            .physics
            .check_obstacles(self.state.position, park.obstacles());
        if obstacle.hit {
            let n = obstacle.normal;
            self.state.position += n * obstacle.penetration * 1.5;
            if self.state.velocity.dot(n) < 0.0 {
                self.state.velocity = bounce(self.state.velocity, n, POST_MOVE_RESTITUTION);
            }
            if obstacle.is_top_face() {
                self.state.velocity.y = 0.0;
                self.state.motion.land();
            }
        }

        let ramp = self.physics.check_ramps(self.state.position, park.ramps());
        if ramp.hit && !self.state.motion.is_grinding() {
            if self.state.motion.is_air() {
                log::debug!("Landed on ramp");
            }
            self.state.motion.land();
        }

        let rail = self.physics.check_rails(self.state.position, park.rails());
        let on_top = rail.approach == Some(RailApproach::FromAbove);
        match (on_top, rail.index(), self.state.motion.is_grinding()) {
            (true, Some(index), false) if !self.state.motion.is_air() => {
                let style = self
                    .state
                    .preferred_grind_style
                    .take()
                    .unwrap_or(GrindStyle::FiftyFifty);
                log::info!("Grinding rail {index}: {}", style.name());
                self.state.motion.start_grind(index, style);
            }
            (false, _, true) => {
                log::info!("Slid off rail");
                self.state.motion.leave_rail();
                if self.state.velocity.y.abs() < 1.0 {
                    self.state.velocity.y += 2.0;
                }
            }
            _ => {}
        }

        ramp.hit
            || obstacle.hit
            || self
                .physics
                .supported_by_obstacle(self.state.position, park.obstacles())
    }

    fn clamp_to_ground(&mut self, supported: bool) {
        let ground = self.settings.ground_height;
        let state = &mut self.state;
        if state.motion.is_grinding() {
            return;
        }

        if state.position.y <= ground {
            state.position.y = ground;
            state.velocity.y = 0.0;
            if state.motion.is_air() {
                log::debug!("Landed");
            }
            state.motion.land();
            if state.current_trick.is_none() {
                state.board_rotation.x = 0.0;
                state.board_rotation.z = 0.0;
            }
        } else if !supported && !state.motion.is_air() {
            state.motion.take_off();
        }
    }

    fn clamp_to_boundary(&mut self) {
        let limit = self.settings.boundary_limit;
        let floor = self.settings.rebound_floor;
        let state = &mut self.state;
        for axis in [0, 2] {
            let p = state.position[axis];
            if p.abs() <= limit {
                continue;
            }
            let side = p.signum();
            state.position[axis] = side * limit;
            let mut v = -state.velocity[axis] * 0.5;
            if v.abs() < floor {
                v = if v == 0.0 { -side * floor } else { v.signum() * floor };
            }
            state.velocity[axis] = v;
        }
    }

    /// Speed magnitude from velocity, signed by travel relative to facing
    ///
    /// On a rail `speed` drives the motion and velocity only mirrors it.
    fn resync_speed(&mut self) {
        if self.state.motion.is_grinding() {
            return;
        }
        let horizontal = self.state.horizontal_velocity();
        let sign = if horizontal.dot(self.state.direction) < 0.0 {
            -1.0
        } else {
            1.0
        };
        self.state.speed = sign * horizontal.length();
    }

    fn update_pose(&mut self) {
        let state = &mut self.state;
        let yaw = crate::heading(state.direction);
        if let Some(style) = state.motion.grind_style() {
            state.board_rotation = style.stance(yaw);
        } else if state.current_trick.is_none() && state.speed.abs() > 0.1 {
            state.board_rotation.y = yaw;
        }
    }

    fn update_trick(&mut self, dt: f32) -> Option<CompletedTrick> {
        let state = &mut self.state;
        let mut trick = state.current_trick.take()?;

        if !state.motion.is_air() {
            log::debug!("Trick bailed: {}", trick.kind.name());
            state.board_rotation.x = 0.0;
            state.board_rotation.z = 0.0;
            return None;
        }

        trick.elapsed += dt;
        let progress = trick.progress();
        let target = trick.kind.target_rotation();
        state.board_rotation.x = target.x * progress;
        state.board_rotation.z = target.z * progress;
        state.board_rotation.y += target.y * progress * dt * 3.0;

        if trick.is_complete() {
            let done = CompletedTrick::from(trick.kind);
            log::info!("Trick landed: {} (+{})", done.name, done.points);
            return Some(done);
        }

        state.current_trick = Some(trick);
        None
    }
}

/// Travel sign along a z-aligned rail; facing straight across counts as +z
#[inline]
pub(super) fn rail_sign(direction: Vec3) -> f32 {
    if direction.z < 0.0 { -1.0 } else { 1.0 }
}

/// Flatten and normalize, falling back when degenerate
#[inline]
pub(super) fn flat_unit(v: Vec3, fallback: Vec3) -> Vec3 {
    let flat = Vec3::new(v.x, 0.0, v.z).normalize_or_zero();
    if flat != Vec3::ZERO {
        return flat;
    }
    let fb = Vec3::new(fallback.x, 0.0, fallback.z).normalize_or_zero();
    if fb == Vec3::ZERO { Vec3::NEG_Z } else { fb }
}
