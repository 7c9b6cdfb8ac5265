//! Player preferences
//!
//! Persisted as JSON, separately from the best score.

use serde::{Deserialize, Serialize};

use crate::platform::{KeyValueStore, StorageError};
use crate::tuning::Tuning;

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Casual,
    #[default]
    Standard,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Casual => "Casual",
            Difficulty::Standard => "Standard",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "casual" | "easy" => Some(Difficulty::Casual),
            "standard" | "normal" => Some(Difficulty::Standard),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Seconds between spawns
    pub fn spawn_interval(&self) -> f32 {
        match self {
            Difficulty::Casual => 1.6,
            Difficulty::Standard => 1.2,
            Difficulty::Hard => 0.9,
        }
    }

    /// Share of spawns that are obstacles
    pub fn obstacle_weight(&self) -> f32 {
        match self {
            Difficulty::Casual => 0.55,
            Difficulty::Standard => 0.7,
            Difficulty::Hard => 0.8,
        }
    }

    /// Crash grace window (s)
    pub fn crash_grace(&self) -> f32 {
        match self {
            Difficulty::Casual => 0.35,
            Difficulty::Standard => 0.2,
            Difficulty::Hard => 0.1,
        }
    }

    /// Apply this preset on top of a tuning table
    pub fn apply(&self, tuning: &mut Tuning) {
        tuning.spawn.interval = self.spawn_interval();
        tuning.spawn.obstacle_weight = self.obstacle_weight();
        tuning.bike.crash_grace = self.crash_grace();
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "throttle_up_settings";

    /// Create settings from a difficulty preset
    pub fn from_preset(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }

    /// Default tuning with this difficulty applied
    pub fn tuning(&self) -> Tuning {
        let mut tuning = Tuning::default();
        self.difficulty.apply(&mut tuning);
        tuning
    }

    /// Load settings, falling back to defaults
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring corrupt settings: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Could not read settings: {}", e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        let json = serde_json::to_string(self).map_err(|e| StorageError::Encode {
            key: Self::STORAGE_KEY.to_string(),
            reason: e.to_string(),
        })?;
        store.set(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
