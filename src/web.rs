//! Browser bindings
//!
//! The render/input layer lives in JavaScript. It drives the core through
//! this facade once per animation frame and reads state back for drawing.

use wasm_bindgen::prelude::*;

use crate::highscores::BestScore;
use crate::platform::{KeyValueStore, LocalStore, MemoryStore};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, Lane, Layer, TickInput, start_game, tick};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
    log::info!("Throttle Up core loaded");
}

/// One play session plus its storage
#[wasm_bindgen]
pub struct WheelieGame {
    state: GameState,
    input: TickInput,
    best: BestScore,
    store: Box<dyn KeyValueStore>,
    /// Events from the most recent update
    frame_events: Vec<GameEvent>,
}

#[wasm_bindgen]
impl WheelieGame {
    /// createGame: fresh idle session
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> WheelieGame {
        let store: Box<dyn KeyValueStore> = match LocalStore::open() {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("LocalStorage unavailable ({}), scores will not persist", e);
                Box::new(MemoryStore::new())
            }
        };
        let settings = Settings::load(&*store);
        let best = BestScore::load(&*store);

        let mut state = GameState::with_tuning(seed, settings.tuning());
        state.best_score = best.score;

        WheelieGame {
            state,
            input: TickInput::default(),
            best,
            store,
            frame_events: Vec::new(),
        }
    }

    /// startGame: begin (or restart) a run
    pub fn start(&mut self) {
        start_game(&mut self.state);
    }

    /// updateGame: advance one frame
    pub fn update(&mut self, dt: f32, throttle: f32) {
        self.input.throttle = throttle;
        tick(&mut self.state, &self.input, dt);
        self.input.lane = None;

        // Includes anything start() queued before this frame
        self.frame_events = self.state.drain_events();
        if self.frame_events.contains(&GameEvent::NewBestScore(self.state.score)) {
            if let Err(e) = self.best.submit(self.state.score, &mut *self.store) {
                log::warn!("Could not save best score: {}", e);
            }
        }
    }

    /// Steer toward the upper (true) or lower (false) lane
    pub fn set_lane(&mut self, upper: bool) {
        self.input.lane = Some(if upper { Lane::Upper } else { Lane::Lower });
    }

    /// Events from the last update as JSON, for audio/UI cues
    pub fn events_json(&self) -> String {
        serde_json::to_string(&self.frame_events).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn phase(&self) -> String {
        match self.state.phase {
            GamePhase::Idle => "idle",
            GamePhase::Countdown => "countdown",
            GamePhase::Racing => "racing",
            GamePhase::GameOver => "game_over",
        }
        .to_string()
    }

    /// Start light index: 0 off, 1-2 amber, 3 green
    pub fn countdown_light(&self) -> u8 {
        self.state.countdown.phase as u8
    }

    pub fn angle(&self) -> f32 {
        self.state.bike.angle
    }

    pub fn speed(&self) -> f32 {
        self.state.bike.speed
    }

    pub fn lane_position(&self) -> f32 {
        self.state.bike.lane_position
    }

    /// Tile offset of a background layer by name ("track", "sky", ...)
    pub fn layer_offset(&self, name: &str) -> f32 {
        Layer::ALL
            .iter()
            .find(|l| l.as_str() == name)
            .map(|&l| self.state.world.offset(l))
            .unwrap_or(0.0)
    }

    /// Live entities as JSON
    pub fn entities_json(&self) -> String {
        serde_json::to_string(&self.state.spawner.entities).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn score(&self) -> u32 {
        self.state.score as u32
    }

    pub fn best_score(&self) -> u32 {
        self.best.score as u32
    }

    pub fn distance(&self) -> f32 {
        self.state.stats.distance
    }

    pub fn best_wheelie(&self) -> f32 {
        self.state.stats.best_wheelie
    }
}
