//! Cave carving using a 2D fractal mask over (column, elevation).

use crate::biome::SEA_LEVEL;
use crate::noise::{FractalSampler, Signal};

/// Cave generation parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaveParams {
    /// Mask values strictly above this are carved.
    pub threshold: f64,
    /// Caves open only at elevations at least this far below sea level.
    pub min_depth_below_sea: i32,
}

impl Default for CaveParams {
    fn default() -> Self {
        Self {
            threshold: 0.35,
            min_depth_below_sea: 4,
        }
    }
}

/// Decides which terrain cells are left open as cave.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaveCarver {
    params: CaveParams,
}

impl CaveCarver {
    pub fn new(params: CaveParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &CaveParams {
        &self.params
    }

    /// Highest elevation at which a cave can open.
    pub fn ceiling(&self) -> i32 {
        SEA_LEVEL - self.params.min_depth_below_sea
    }

    /// Check if a cell should be carved out
    pub fn is_cave(&self, sampler: &FractalSampler, world_x: i64, elevation: i32) -> bool {
        if elevation > self.ceiling() {
            return false;
        }
        Signal::CAVE.sample_at(sampler, world_x as f64, elevation as f64) > self.params.threshold
    }
}
