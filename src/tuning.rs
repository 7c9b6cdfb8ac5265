//! Data-driven game balance
//!
//! Every tunable coefficient of the simulation lives here. Values have
//! sensible defaults and can be overridden from JSON; missing fields keep
//! their default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when validating a tuning table.
#[derive(Debug, Error, PartialEq)]
pub enum TuningError {
    #[error("{field} must be finite (got {value})")]
    NotFinite { field: &'static str, value: f32 },
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be within [{min}, {max}] (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("crash angle {crash_angle} must be below max angle {max_angle}")]
    CrashAngleAboveLimit { crash_angle: f32, max_angle: f32 },
    #[error("invalid tuning json: {0}")]
    Json(String),
}

/// Bike balance coefficients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BikeTuning {
    /// Torque applied at full throttle (rad/s²)
    pub torque_hold_force: f32,
    /// Gravity restoring torque scale, multiplied by -sin(angle)
    pub gravity_restore: f32,
    /// Per-frame damping at the 60 Hz baseline
    pub damping: f32,
    /// Angular velocity limit (rad/s)
    pub angular_velocity_cap: f32,
    /// Angle past which the bike is falling over (rad)
    pub crash_angle: f32,
    /// Time the angle may stay past `crash_angle` before it counts (s)
    pub crash_grace: f32,
    /// Hard angle limit keeping the integrator finite (rad)
    pub max_angle: f32,
    /// Half-width of the near-level dead zone (rad)
    pub settle_zone: f32,
    /// Extra velocity decay applied inside the dead zone
    pub settle_decay: f32,
    /// Speed gained per second at full throttle
    pub acceleration: f32,
    /// Lower bound of the wheelie band used for stats (rad)
    pub wheelie_min_angle: f32,
    /// Lane steering speed (normalized lane units/s)
    pub lane_change_speed: f32,
    /// Distance covered per second at full speed (m)
    pub distance_scale: f32,
}

impl Default for BikeTuning {
    fn default() -> Self {
        Self {
            torque_hold_force: 6.0,
            gravity_restore: 4.0,
            damping: 0.985,
            angular_velocity_cap: 3.0,
            crash_angle: 1.05,
            crash_grace: 0.2,
            max_angle: std::f32::consts::FRAC_PI_2,
            settle_zone: 0.15,
            settle_decay: 0.92,
            acceleration: 2.0,
            wheelie_min_angle: 0.3,
            lane_change_speed: 2.0,
            distance_scale: 60.0,
        }
    }
}

/// Parallax scroll coefficients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldTuning {
    /// Foreground scroll speed at full bike speed (px/s)
    pub scroll_scale: f32,
    /// Width of one background tile, equal to the view width (px)
    pub view_width: f32,
    pub track_factor: f32,
    pub grass_factor: f32,
    pub barriers_factor: f32,
    pub grandstand_factor: f32,
    pub crowd_factor: f32,
    pub sky_factor: f32,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            scroll_scale: 500.0,
            view_width: 800.0,
            track_factor: 1.0,
            grass_factor: 0.9,
            barriers_factor: 0.8,
            grandstand_factor: 0.5,
            crowd_factor: 0.4,
            sky_factor: 0.1,
        }
    }
}

impl WorldTuning {
    /// Foreground scroll rate in view widths per second for a bike speed
    pub fn scroll_rate(&self, speed: f32) -> f32 {
        speed * self.scroll_scale / self.view_width
    }
}

/// Entity spawning coefficients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Seconds between spawns
    pub interval: f32,
    /// Probability that a spawn is an obstacle rather than a coin
    pub obstacle_weight: f32,
    /// Spawn x, just past the right edge
    pub spawn_x: f32,
    /// Entities left of this x are purged
    pub despawn_x: f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            interval: 1.2,
            obstacle_weight: 0.7,
            spawn_x: 1.1,
            despawn_x: -0.1,
        }
    }
}

/// Collision tolerances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionTuning {
    /// Max vertical distance between bike and entity lane
    pub lane_tolerance: f32,
    /// Max horizontal distance between entity and the bike's screen x
    pub hit_tolerance: f32,
}

impl Default for CollisionTuning {
    fn default() -> Self {
        Self {
            lane_tolerance: 0.1,
            hit_tolerance: 0.04,
        }
    }
}

/// Complete tuning table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub bike: BikeTuning,
    pub world: WorldTuning,
    pub spawn: SpawnTuning,
    pub collision: CollisionTuning,
}

impl Tuning {
    /// Parse and validate a tuning table from JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Json(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that every coefficient keeps the simulation well-behaved
    pub fn validate(&self) -> Result<(), TuningError> {
        let b = &self.bike;
        positive("bike.torque_hold_force", b.torque_hold_force)?;
        positive("bike.gravity_restore", b.gravity_restore)?;
        in_range("bike.damping", b.damping, f32::MIN_POSITIVE, 1.0)?;
        positive("bike.angular_velocity_cap", b.angular_velocity_cap)?;
        positive("bike.crash_angle", b.crash_angle)?;
        in_range("bike.crash_grace", b.crash_grace, 0.0, f32::MAX)?;
        positive("bike.max_angle", b.max_angle)?;
        if b.crash_angle >= b.max_angle {
            return Err(TuningError::CrashAngleAboveLimit {
                crash_angle: b.crash_angle,
                max_angle: b.max_angle,
            });
        }
        in_range("bike.settle_zone", b.settle_zone, 0.0, b.crash_angle)?;
        in_range("bike.settle_decay", b.settle_decay, 0.0, 1.0)?;
        positive("bike.acceleration", b.acceleration)?;
        in_range("bike.wheelie_min_angle", b.wheelie_min_angle, 0.0, b.crash_angle)?;
        positive("bike.lane_change_speed", b.lane_change_speed)?;
        in_range("bike.distance_scale", b.distance_scale, 0.0, f32::MAX)?;

        let w = &self.world;
        in_range("world.scroll_scale", w.scroll_scale, 0.0, f32::MAX)?;
        positive("world.view_width", w.view_width)?;
        for (field, factor) in [
            ("world.track_factor", w.track_factor),
            ("world.grass_factor", w.grass_factor),
            ("world.barriers_factor", w.barriers_factor),
            ("world.grandstand_factor", w.grandstand_factor),
            ("world.crowd_factor", w.crowd_factor),
            ("world.sky_factor", w.sky_factor),
        ] {
            in_range(field, factor, 0.0, 1.0)?;
        }

        let s = &self.spawn;
        positive("spawn.interval", s.interval)?;
        in_range("spawn.obstacle_weight", s.obstacle_weight, 0.0, 1.0)?;
        positive("spawn.spawn_x", s.spawn_x)?;
        in_range("spawn.despawn_x", s.despawn_x, f32::MIN, 0.0)?;

        let c = &self.collision;
        positive("collision.lane_tolerance", c.lane_tolerance)?;
        positive("collision.hit_tolerance", c.hit_tolerance)?;
        Ok(())
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(TuningError::NotFinite { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::NotPositive { field, value })
    }
}

fn in_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), TuningError> {
    finite(field, value)?;
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(TuningError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}
