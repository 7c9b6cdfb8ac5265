//! Parallax background scrolling
//!
//! Each layer keeps a tile offset in view widths. Offsets stay in (-1, 0] so
//! the renderer can tile seamlessly no matter how long the run lasts.

use serde::{Deserialize, Serialize};

use crate::tuning::WorldTuning;
use crate::wrap_offset;

/// Background layers, foreground first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layer {
    Track,
    Grass,
    Barriers,
    Grandstand,
    Crowd,
    Sky,
}

impl Layer {
    pub const ALL: [Layer; 6] = [
        Layer::Track,
        Layer::Grass,
        Layer::Barriers,
        Layer::Grandstand,
        Layer::Crowd,
        Layer::Sky,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Layer::Track => "track",
            Layer::Grass => "grass",
            Layer::Barriers => "barriers",
            Layer::Grandstand => "grandstand",
            Layer::Crowd => "crowd",
            Layer::Sky => "sky",
        }
    }

    /// Parallax depth of this layer (1.0 = foreground)
    pub fn scroll_factor(&self, tuning: &WorldTuning) -> f32 {
        match self {
            Layer::Track => tuning.track_factor,
            Layer::Grass => tuning.grass_factor,
            Layer::Barriers => tuning.barriers_factor,
            Layer::Grandstand => tuning.grandstand_factor,
            Layer::Crowd => tuning.crowd_factor,
            Layer::Sky => tuning.sky_factor,
        }
    }
}

/// Scroll state of one layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerScroll {
    pub layer: Layer,
    /// Tile offset in view widths, always in (-1, 0]
    pub offset: f32,
}

/// All layer offsets, in `Layer::ALL` order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    pub layers: [LayerScroll; 6],
}

impl Default for WorldState {
    fn default() -> Self {
        Self {
            layers: Layer::ALL.map(|layer| LayerScroll { layer, offset: 0.0 }),
        }
    }
}

impl WorldState {
    /// Current offset of a layer
    pub fn offset(&self, layer: Layer) -> f32 {
        self.layers
            .iter()
            .find(|l| l.layer == layer)
            .map(|l| l.offset)
            .unwrap_or(0.0)
    }

    /// Scroll every layer for a bike speed
    pub fn update(&mut self, tuning: &WorldTuning, dt: f32, speed: f32) {
        let rate = tuning.scroll_rate(speed);
        for scroll in &mut self.layers {
            let factor = scroll.layer.scroll_factor(tuning);
            scroll.offset = wrap_offset(scroll.offset - rate * factor * dt);
        }
    }
}
