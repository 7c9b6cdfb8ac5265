//! Game state and core simulation types
//!
//! One `GameState` holds everything a play session mutates. The host owns it
//! and passes it by reference to `tick`; nothing lives in globals.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::countdown::Countdown;
use super::spawn::SpawnState;
use super::world::WorldState;
use crate::consts::{LOWER_LANE_Y, UPPER_LANE_Y};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the player to start
    #[default]
    Idle,
    /// Start lights running
    Countdown,
    /// Active gameplay
    Racing,
    /// Run ended
    GameOver,
}

/// One of the two fixed lanes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Lane {
    Upper,
    #[default]
    Lower,
}

impl Lane {
    /// Vertical coordinate of the lane (normalized)
    pub fn y(self) -> f32 {
        match self {
            Lane::Upper => UPPER_LANE_Y,
            Lane::Lower => LOWER_LANE_Y,
        }
    }

    /// The other lane
    pub fn other(self) -> Self {
        match self {
            Lane::Upper => Lane::Lower,
            Lane::Lower => Lane::Upper,
        }
    }
}

/// The player's bike
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BikeState {
    /// Lean angle (radians, 0 = level, positive = front wheel up)
    pub angle: f32,
    /// Angular velocity (radians/sec)
    pub angular_velocity: f32,
    /// Forward speed (0..1)
    pub speed: f32,
    /// Current vertical lane coordinate (0..1)
    pub lane_position: f32,
    /// Lane the bike is steering toward
    pub target_lane: Lane,
    /// Seconds spent continuously past the crash angle
    pub crash_timer: f32,
}

impl Default for BikeState {
    fn default() -> Self {
        let lane = Lane::default();
        Self {
            angle: 0.0,
            angular_velocity: 0.0,
            speed: 0.0,
            lane_position: lane.y(),
            target_lane: lane,
            crash_timer: 0.0,
        }
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    /// Held past the crash angle for longer than the grace window
    Flipped,
    /// Rode into an obstacle
    Obstacle,
}

/// Things that happened during a tick, for audio/UI cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new start light is showing
    CountdownLight(super::countdown::CountdownPhase),
    RaceStarted,
    /// Coin collected (entity id)
    CoinCollected(u32),
    Crashed(CrashCause),
    /// Run beat the previous best
    NewBestScore(u64),
}

/// HUD-only statistics for the current run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    /// Seconds spent racing
    pub race_time: f32,
    /// Distance covered (m)
    pub distance: f32,
    /// Total seconds inside the wheelie band
    pub wheelie_time: f32,
    /// Current continuous wheelie (s)
    pub current_wheelie: f32,
    /// Longest continuous wheelie (s)
    pub best_wheelie: f32,
}

/// Complete game state (deterministic for a given seed and input trace)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed
    pub seed: u64,
    /// Balance coefficients for this session
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    pub bike: BikeState,
    pub world: WorldState,
    pub countdown: Countdown,
    /// Spawned entities and the spawn timer
    pub spawner: SpawnState,
    /// Coins collected this run
    pub score: u64,
    /// Best score across runs
    pub best_score: u64,
    pub stats: RunStats,
    /// How the last run ended
    pub crash_cause: Option<CrashCause>,
    /// Events emitted since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Spawn RNG, reseeded from `seed` on every start
    #[serde(skip, default = "idle_rng")]
    pub rng: Pcg32,
}

fn idle_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

impl GameState {
    /// Create a fresh idle session with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a fresh idle session with custom tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            tuning,
            phase: GamePhase::Idle,
            bike: BikeState::default(),
            world: WorldState::default(),
            countdown: Countdown::new(),
            spawner: SpawnState::default(),
            score: 0,
            best_score: 0,
            stats: RunStats::default(),
            crash_cause: None,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Take all events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_racing(&self) -> bool {
        self.phase == GamePhase::Racing
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle_and_level() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.bike.angle, 0.0);
        assert_eq!(state.bike.lane_position, Lane::Lower.y());
        assert!(state.spawner.entities.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_lanes() {
        assert_eq!(Lane::Upper.other(), Lane::Lower);
        assert!(Lane::Upper.y() < Lane::Lower.y());
    }

    #[test]
    fn test_same_seed_same_fresh_state() {
        assert_eq!(GameState::new(42), GameState::new(42));
        assert_ne!(GameState::new(42).rng, GameState::new(43).rng);
    }

    #[test]
    fn test_drain_events_empties_buffer() {
        let mut state = GameState::new(3);
        state.events.push(GameEvent::RaceStarted);
        state.events.push(GameEvent::CoinCollected(1));
        assert_eq!(state.drain_events().len(), 2);
        assert!(state.events.is_empty());
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_serde_roundtrip_restores_rng_default() {
        let state = GameState::new(11);
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.phase, state.phase);
        assert_eq!(back.bike, state.bike);
        assert_eq!(back.world, state.world);
    }
}
