//! Riding inclines and pipes

use glam::Vec3;
use rand::Rng;

use super::collision::CollisionResult;
use super::park::{Incline, Pipe};
use super::tick::{Skater, flat_unit};
use crate::consts::*;

impl<R: Rng> Skater<R> {
    /// Follow an incline whose contact was predicted at `next`
    pub(super) fn ride_incline(
        &mut self,
        incline: &Incline,
        contact: &CollisionResult,
        next: Vec3,
        dt: f32,
    ) {
        let max_speed = self.settings.max_speed;
        let gravity = self.physics.gravity.abs();
        let state = &mut self.state;

        let ramp_y = incline.height_at(next.z);
        let can_climb = state.position.y >= ramp_y - 1.0
            || state.velocity.y.abs() < 5.0
            || (state.position.z - incline.position.z).abs() > incline.dimensions.length * 0.3;
        if !can_climb {
            state.position += state.velocity * dt;
            return;
        }

        state.position.x += state.velocity.x * dt;
        state.position.z += state.velocity.z * dt;
        state.position.y = ramp_y + SURFACE_CLEARANCE;
        state.motion.land();

        let n = contact.normal;
        let slope = incline.slope();
        let along = slope.sin() * gravity;
        let steepness = (slope * 3.0).min(1.0);

        // Travel direction, not facing: riding backward flips it
        let travel_sign = if state.speed < 0.0 { -1.0 } else { 1.0 };
        let travel = state.direction * travel_sign;
        let downhill = travel.dot(Vec3::new(n.x, 0.0, n.z)) > 0.0 || state.velocity.y < 0.0;

        let mut magnitude = state.speed.abs();
        if downhill {
            magnitude = (magnitude + along * dt * 0.2).min(max_speed * (1.0 + steepness * 0.5));
        } else {
            magnitude -= along * dt * (0.25 + steepness * 0.1);
        }
        state.speed = travel_sign * magnitude;

        if state.speed.abs() < 1.0 && slope > 0.1 {
            state.speed = if state.speed < 0.0 { -1.0 } else { 1.0 };
        }

        state.velocity.y = 0.0;
        state.sync_velocity_from_speed();
    }

    /// Follow a half-pipe or quarter-pipe arc
    pub(super) fn ride_pipe(&mut self, pipe: &Pipe, contact: &CollisionResult, dt: f32) {
        let max_speed = self.settings.max_speed;
        let state = &mut self.state;

        let from_above =
            state.velocity.y <= 0.0 || state.position.y >= pipe.position.y + 0.2;
        if !from_above {
            state.position += state.velocity * dt;
            return;
        }

        state.position.x += state.velocity.x * dt * 0.95;
        state.position.z += state.velocity.z * dt * 0.95;
        state.motion.land();

        let n = contact.normal;
        let sf = (state.speed.abs() / max_speed).min(1.0);

        state.velocity.y = (state.velocity.y * 0.3).max(0.0);
        if n.x.abs() > 0.8 && state.speed.abs() > max_speed * 0.6 {
            state.velocity.y += 0.5 * sf;
        }

        if state.speed > 1.0 {
            state.speed = (state.speed + (state.velocity.y * 0.3).abs()).min(max_speed * 1.2);
            let adapt = 0.2 + n.x.abs() * 0.3;
            let blended = Vec3::new(
                (1.0 - adapt) * state.direction.x + adapt * n.x,
                0.0,
                state.direction.z,
            );
            state.direction = flat_unit(blended, state.direction);
        }

        state.sync_velocity_from_speed();
        state.velocity.x += n.x * (2.0 + sf * 1.5);

        let arc = pipe.profile_at(state.position.x);
        if let Some(height) = arc.height_at(state.position.x) {
            state.position.y = height + SURFACE_CLEARANCE;
            if arc.near_lip(height) && state.speed.abs() < 3.0 {
                let toward_center = if arc.center.x < state.position.x { -1.0 } else { 1.0 };
                state.position.x += toward_center * 0.05;
            }
        }
    }
}
