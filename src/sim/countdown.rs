//! Start-light countdown
//!
//! Two amber lights, one second each, then green. Green fires the race start
//! exactly once and then stays inert until the next `start`.

use serde::{Deserialize, Serialize};

/// Seconds each amber light stays lit
pub const LIGHT_DURATION: f32 = 1.0;

/// Which start light is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CountdownPhase {
    /// Lights off (before the first start)
    #[default]
    Off,
    Yellow1,
    Yellow2,
    /// Race is on
    Green,
}

/// Countdown timer state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    pub phase: CountdownPhase,
    /// Seconds spent in the current phase
    pub timer: f32,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Light the first amber
    pub fn start(&mut self) {
        self.phase = CountdownPhase::Yellow1;
        self.timer = 0.0;
    }

    /// Advance the lights. Returns true only on the tick that turns green.
    pub fn update(&mut self, dt: f32) -> bool {
        if dt <= 0.0 {
            return false;
        }

        let next = match self.phase {
            CountdownPhase::Off | CountdownPhase::Green => return false,
            CountdownPhase::Yellow1 => CountdownPhase::Yellow2,
            CountdownPhase::Yellow2 => CountdownPhase::Green,
        };

        self.timer += dt;
        if self.timer <= LIGHT_DURATION {
            return false;
        }

        self.phase = next;
        self.timer = 0.0;
        next == CountdownPhase::Green
    }

    /// True once the green light is showing
    pub fn is_green(&self) -> bool {
        self.phase == CountdownPhase::Green
    }
}
