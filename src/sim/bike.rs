//! Wheelie balance physics
//!
//! The bike pivots on its rear wheel. Throttle lifts the front, gravity pulls
//! it back with a torque proportional to sin(angle), so level is a stable
//! equilibrium and the pull fades smoothly near it.

use super::state::BikeState;
use crate::approach;
use crate::tuning::BikeTuning;

/// Integrate one step of lean physics and throttle speed.
///
/// `throttle` is expected in [0, 1] and `dt` already clamped by the caller.
/// Returns true once the angle has stayed past the crash angle for longer
/// than the grace window.
pub fn update(bike: &mut BikeState, tuning: &BikeTuning, dt: f32, throttle: f32) -> bool {
    let player_torque = throttle * tuning.torque_hold_force;
    let gravity_torque = -bike.angle.sin() * tuning.gravity_restore;
    bike.angular_velocity += (player_torque + gravity_torque) * dt;

    // Damping normalized to a 60 Hz baseline
    bike.angular_velocity *= tuning.damping.powf(dt * 60.0);

    let cap = tuning.angular_velocity_cap;
    bike.angular_velocity = bike.angular_velocity.clamp(-cap, cap);

    bike.angle += bike.angular_velocity * dt;
    if bike.angle.abs() >= tuning.max_angle {
        // Resting on the tail (or the front wheel); nothing left to rotate
        bike.angle = bike.angle.clamp(-tuning.max_angle, tuning.max_angle);
        bike.angular_velocity = 0.0;
    }

    // Dead zone: let small wobbles settle instead of oscillating
    if bike.angle.abs() < tuning.settle_zone {
        bike.angular_velocity *= tuning.settle_decay;
    }

    // Speed ratchets up with sustained throttle and never drops
    bike.speed = (bike.speed + throttle * tuning.acceleration * dt).min(1.0);

    if bike.angle.abs() > tuning.crash_angle {
        bike.crash_timer += dt;
    } else {
        bike.crash_timer = 0.0;
    }

    bike.crash_timer > tuning.crash_grace
}

/// Slide the bike toward its target lane
pub fn steer(bike: &mut BikeState, tuning: &BikeTuning, dt: f32) {
    let target = bike.target_lane.y();
    bike.lane_position = approach(bike.lane_position, target, tuning.lane_change_speed * dt);
}

/// True while the bike is held in a controlled wheelie
pub fn in_wheelie(bike: &BikeState, tuning: &BikeTuning) -> bool {
    bike.angle >= tuning.wheelie_min_angle && bike.angle <= tuning.crash_angle
}
