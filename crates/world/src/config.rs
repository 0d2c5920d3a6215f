//! Simulation configuration shared by the runner and tests.

use serde::{Deserialize, Serialize};
use sidecraft_physics::PhysicsParams;

use crate::terrain::GenerationWindow;

/// Chunk loading parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Chebyshev radius, in chunks, loaded around the player every step.
    pub generation_distance: i32,
    /// Chunks farther than this horizontally from the player's chunk are generated empty.
    pub horizontal_window: i32,
    /// Chunks farther than this vertically from the player's chunk are generated empty.
    pub vertical_window: i32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        let window = GenerationWindow::default();
        Self {
            generation_distance: 3,
            horizontal_window: window.horizontal,
            vertical_window: window.vertical,
        }
    }
}

impl GenerationConfig {
    pub fn window(&self) -> GenerationWindow {
        GenerationWindow {
            horizontal: self.horizontal_window,
            vertical: self.vertical_window,
        }
    }
}

/// Everything needed to start a [`Simulation`](crate::Simulation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub seed: u64,
    /// Player spawn, top-left corner of the body.
    pub spawn_x: f64,
    pub spawn_y: f64,
    /// Survival-mode reach, centre to centre.
    pub max_place_distance: f64,
    /// View rectangle used by visible-block queries, before the chunk margin.
    pub view_width: f64,
    pub view_height: f64,
    pub generation: GenerationConfig,
    pub physics: PhysicsParams,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            spawn_x: 0.0,
            spawn_y: -100.0,
            max_place_distance: 250.0,
            view_width: 640.0,
            view_height: 480.0,
            generation: GenerationConfig::default(),
            physics: PhysicsParams::default(),
        }
    }
}

impl SimConfig {
    /// Default configuration with the given world seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}
