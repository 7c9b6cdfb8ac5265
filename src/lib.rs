//! Throttle Up - a wheelie balance arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bike physics, scrolling, spawning, game state)
//! - `tuning`: Data-driven game balance
//! - `platform`: Browser/native platform abstraction (key/value storage)
//! - `highscores`: Best-score persistence
//! - `settings`: Player preferences

pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscores::BestScore;
pub use settings::{Difficulty, Settings};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Largest frame delta the simulation will integrate (seconds).
    /// Longer gaps (tab backgrounding, dropped frames) are clamped to this.
    pub const MAX_DT: f32 = 0.05;
    /// Nominal frame delta of the host loop (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Fixed on-screen x of the bike (normalized screen widths)
    pub const BIKE_X: f32 = 0.2;

    /// Vertical coordinate of the upper lane (normalized)
    pub const UPPER_LANE_Y: f32 = 0.35;
    /// Vertical coordinate of the lower lane (normalized)
    pub const LOWER_LANE_Y: f32 = 0.65;
}

/// Move `current` toward `target` by at most `max_step`, never overshooting
#[inline]
pub fn approach(current: f32, target: f32, max_step: f32) -> f32 {
    let delta = target - current;
    if delta.abs() <= max_step {
        target
    } else {
        current + max_step.copysign(delta)
    }
}

/// Wrap a scroll offset into the half-open tile range (-1, 0]
#[inline]
pub fn wrap_offset(offset: f32) -> f32 {
    if offset > 0.0 {
        let wrapped = offset % 1.0;
        if wrapped <= 0.0 {
            wrapped
        } else if wrapped - 1.0 <= -1.0 {
            // Too small to survive the subtraction in f32
            0.0
        } else {
            wrapped - 1.0
        }
    } else if offset <= -1.0 {
        offset % 1.0
    } else {
        offset
    }
}
