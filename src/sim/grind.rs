//! Rail mounting, grinding and dismounts

use std::f32::consts::FRAC_PI_4;

use glam::Vec3;
use rand::Rng;

use super::park::Rail;
use super::state::{GrindStyle, InputIntent};
use super::tick::{Skater, Step, flat_unit, rail_sign};

/// Lateral push applied when glancing off a rail's side
const SIDE_PUSH: f32 = 0.5;
/// Distance past a rail end the skater is placed on exit
const EXIT_CLEARANCE: f32 = 0.6;
/// Boardslide steering and centering
const BOARDSLIDE_STEER: f32 = 1.5;
const BOARDSLIDE_CENTERING: f32 = 3.0;

impl<R: Rng> Skater<R> {
    /// Contact from above at `next`: mount, keep grinding, or leave past an end
    pub(super) fn ride_rail(
        &mut self,
        index: usize,
        rail: &Rail,
        next: Vec3,
        input: &InputIntent,
        dt: f32,
        was_approaching: bool,
    ) -> Step {
        let already_on = self.state.motion.grind_rail() == Some(index);

        if !already_on {
            let within = (next.z - rail.position.z).abs() <= rail.dimensions.length / 2.0;
            let rising = self.state.motion.is_air() && self.state.velocity.y > 0.0;
            if !within || rising {
                self.state.position = next;
                return Step::Continue;
            }
            let style = self.choose_mount_style(was_approaching);
            log::info!("Grinding rail {index}: {}", style.name());
            self.state.motion.start_grind(index, style);
            self.state.position.x = rail.position.x;
        }

        let Some(style) = self.state.motion.grind_style() else {
            return Step::Continue;
        };
        let max_speed = self.settings.max_speed;
        let sign = rail_sign(self.state.direction);

        if style == GrindStyle::Boardslide && already_on {
            let steer = match (input.left, input.right) {
                (true, false) => -1.0,
                (false, true) => 1.0,
                _ => 0.0,
            };
            let state = &mut self.state;
            state.velocity.x = steer * BOARDSLIDE_STEER
                + (rail.position.x - state.position.x) * BOARDSLIDE_CENTERING;
            state.position.x += state.velocity.x * dt;
        } else {
            self.state.position.x = rail.position.x;
        }
        self.state.position.y = rail.top();
        self.state.position.z += self.state.speed * sign * dt;

        let (start, end) = rail.ends();
        if self.state.position.z < start || self.state.position.z > end {
            self.exit_rail_end(start, end, sign);
            return Step::LeftRail;
        }

        if let Some(damping) = style.lateral_damping() {
            let d = self.state.direction;
            self.state.direction = flat_unit(Vec3::new(d.x * damping, 0.0, d.z), Vec3::Z * sign);
        }

        match style.response() {
            Some(r) => {
                let state = &mut self.state;
                if input.forward {
                    state.speed =
                        (state.speed + r.forward_rate * dt).min(max_speed * r.forward_cap);
                } else if input.backward {
                    state.speed =
                        (state.speed - r.backward_rate * dt).max(max_speed * r.backward_floor);
                }
            }
            None => {
                let state = &mut self.state;
                if input.forward {
                    state.speed = (state.speed + 7.0 * dt).min(max_speed * 0.9);
                } else if input.backward {
                    state.speed = (state.speed + 5.0 * dt).min(max_speed * 0.7);
                }
            }
        }

        let chance = style.fall_chance();
        if chance > 0.0 && self.rng.random_bool(chance) {
            self.fall_off_rail(rail);
            return Step::LeftRail;
        }

        let state = &mut self.state;
        state.speed *= style.friction();
        if style == GrindStyle::Boardslide && state.speed < max_speed * 0.7 {
            state.speed += 2.0 * dt;
        }
        state.velocity.y = 0.0;

        if style == GrindStyle::Boardslide {
            // Pushing surges the slide along the travel direction
            let surge = if input.forward || input.backward { 1.2 } else { 1.0 };
            state.velocity.z = sign * state.speed.abs() * surge;
        } else {
            state.velocity.z = state.speed * sign;
            state.velocity.x = 0.0;
        }

        Step::Continue
    }

    /// Glancing contact below the top: knock the skater sideways
    pub(super) fn bounce_off_rail(&mut self, rail: &Rail, dt: f32) {
        let state = &mut self.state;
        let away = if state.position.x < rail.position.x { -1.0 } else { 1.0 };
        state.position.x += away * SIDE_PUSH;
        state.velocity.x *= -0.5;
        state.position.z += state.velocity.z * dt;
        state.position.y += state.velocity.y * dt;
    }

    /// Style for a fresh mount
    ///
    /// A style picked while dropping toward the rail wins. Otherwise a steep
    /// approach angle gives a boardslide, a hard landing picks between
    /// nosegrind and 5-0 at random, and anything else is a 50-50.
    fn choose_mount_style(&mut self, was_approaching: bool) -> GrindStyle {
        let preferred = self.state.preferred_grind_style.take();
        if was_approaching {
            if let Some(style) = preferred {
                return style;
            }
        }

        let dir = self.state.direction;
        let angle = dir.x.abs().atan2(dir.z.abs());
        if angle > FRAC_PI_4 {
            GrindStyle::Boardslide
        } else if self.state.velocity.y < -5.0 {
            let threshold = if dir.z > 0.0 { 0.5 } else { 0.7 };
            if self.rng.random::<f32>() > threshold {
                GrindStyle::Nosegrind
            } else {
                GrindStyle::FiveO
            }
        } else {
            GrindStyle::FiftyFifty
        }
    }

    /// Launch off the end of a rail
    fn exit_rail_end(&mut self, start: f32, end: f32, sign: f32) {
        let min_speed = self.settings.rail_exit_min_speed;
        let lift = self.settings.rail_exit_lift;
        let lateral = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };

        let state = &mut self.state;
        let exit_speed = (state.speed.abs() * 1.2).max(min_speed);
        state.velocity.z = sign * exit_speed;
        state.velocity.y += lift;
        state.velocity.x = lateral;
        state.position.z = if state.position.z < start {
            start - EXIT_CLEARANCE
        } else {
            end + EXIT_CLEARANCE
        };
        state.position.y += 0.3;
        state.motion.leave_rail();
        log::info!("Left rail end at {exit_speed:.1} m/s");
    }

    /// Slip off the side of a rail
    fn fall_off_rail(&mut self, rail: &Rail) {
        let side = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let state = &mut self.state;
        state.motion.leave_rail();
        state.velocity.y = 1.0;
        state.velocity.x = side;
        state.position.x = rail.position.x + side * rail.dimensions.width * 3.0;
        log::debug!("Fell off rail");
    }
}
