//! Biome system for terrain generation.
//!
//! Assigns a [`TerrainType`] to every world column from a continental noise
//! band, refined by a moisture signal, and turns columns into surface heights
//! and block types.

use crate::noise::{FractalSampler, Signal};
use serde::{Deserialize, Serialize};
use sidecraft_core::BlockType;

/// Elevation of the surface at the spawn column.
pub const SPAWN_SURFACE_HEIGHT: i32 = 0;

/// Elevation of sea level; caves only open well below it.
pub const SEA_LEVEL: i32 = 0;

/// Mountain surfaces above this elevation are capped with snow.
pub const SNOW_LINE: i32 = 12;

const BASE_AMPLITUDE: f64 = 12.0;
const DETAIL_AMPLITUDE: f64 = 2.0;
const MOUNTAIN_THRESHOLD: f64 = 0.2;
const MOUNTAIN_BOOST: f64 = 40.0;

/// Terrain classification of a world column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TerrainType {
    Plains,
    Hills,
    Mountains,
    Desert,
    Forest,
    SnowyPlains,
    Swamp,
    Jungle,
    Taiga,
    Savanna,
    Canyon,
}

impl TerrainType {
    /// Get all terrain types (for iteration).
    pub fn all() -> &'static [TerrainType] {
        &[
            TerrainType::Plains,
            TerrainType::Hills,
            TerrainType::Mountains,
            TerrainType::Desert,
            TerrainType::Forest,
            TerrainType::SnowyPlains,
            TerrainType::Swamp,
            TerrainType::Jungle,
            TerrainType::Taiga,
            TerrainType::Savanna,
            TerrainType::Canyon,
        ]
    }

    /// Number of blocks emitted below the surface, surface included.
    pub fn max_depth(self) -> i32 {
        match self {
            TerrainType::Mountains => 30,
            TerrainType::Hills => 22,
            TerrainType::Canyon => 12,
            TerrainType::Desert => 10,
            _ => 16,
        }
    }

    /// Depth of the biome-specific layer between surface and stone.
    pub fn subsurface_depth(self) -> i32 {
        match self {
            TerrainType::Desert => 4,
            TerrainType::Swamp => 2,
            _ => 3,
        }
    }
}

/// The seven ordered continental bands, from the low to the high end of the
/// biome signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TerrainBand {
    Desert,
    Savanna,
    Plains,
    Forest,
    Hills,
    Mountains,
    SnowyPlains,
}

impl TerrainBand {
    /// Upper (exclusive) bound of each band but the last, in band order.
    pub const UPPER_BOUNDS: [f64; 6] = [-0.45, -0.25, -0.08, 0.08, 0.25, 0.45];

    /// Bands in ascending order.
    pub const ORDERED: [TerrainBand; 7] = [
        TerrainBand::Desert,
        TerrainBand::Savanna,
        TerrainBand::Plains,
        TerrainBand::Forest,
        TerrainBand::Hills,
        TerrainBand::Mountains,
        TerrainBand::SnowyPlains,
    ];

    /// Band containing a biome-signal value. Every real value maps to exactly one band.
    pub fn from_signal(value: f64) -> Self {
        let idx = Self::UPPER_BOUNDS
            .iter()
            .position(|&bound| value < bound)
            .unwrap_or(Self::UPPER_BOUNDS.len());
        Self::ORDERED[idx]
    }

    /// Terrain type of this band after moisture refinement.
    pub fn refine(self, moisture: f64) -> TerrainType {
        match self {
            TerrainBand::Desert => TerrainType::Desert,
            TerrainBand::Savanna if moisture > 0.25 => TerrainType::Jungle,
            TerrainBand::Savanna => TerrainType::Savanna,
            TerrainBand::Plains if moisture > 0.3 => TerrainType::Swamp,
            TerrainBand::Plains => TerrainType::Plains,
            TerrainBand::Forest if moisture < -0.25 => TerrainType::Taiga,
            TerrainBand::Forest => TerrainType::Forest,
            TerrainBand::Hills if moisture < -0.3 => TerrainType::Canyon,
            TerrainBand::Hills => TerrainType::Hills,
            TerrainBand::Mountains => TerrainType::Mountains,
            TerrainBand::SnowyPlains => TerrainType::SnowyPlains,
        }
    }
}

/// Column classifier: terrain type, surface height and block type.
#[derive(Debug, Clone)]
pub struct TerrainClassifier {
    sampler: FractalSampler,
    height_offset: i32,
}

impl TerrainClassifier {
    /// Create a classifier from a world seed.
    pub fn new(world_seed: u64) -> Self {
        let sampler = FractalSampler::new(world_seed);
        let height_offset = SPAWN_SURFACE_HEIGHT - raw_surface_height(&sampler, 0);
        Self {
            sampler,
            height_offset,
        }
    }

    /// Sampler shared with the other generation passes.
    pub fn sampler(&self) -> &FractalSampler {
        &self.sampler
    }

    /// Continental band at `world_x` (in block columns).
    pub fn band_at(&self, world_x: i64) -> TerrainBand {
        TerrainBand::from_signal(Signal::BIOME.sample(&self.sampler, world_x as f64))
    }

    /// Terrain type at `world_x` (in block columns).
    pub fn terrain_type_at(&self, world_x: i64) -> TerrainType {
        let moisture = Signal::MOISTURE.sample(&self.sampler, world_x as f64);
        self.band_at(world_x).refine(moisture)
    }

    /// Surface elevation at `world_x`; the spawn column sits at [`SPAWN_SURFACE_HEIGHT`].
    pub fn surface_height_at(&self, world_x: i64) -> i32 {
        raw_surface_height(&self.sampler, world_x) + self.height_offset
    }

    /// Block type at `elevation` in a column whose surface is `surface_height`.
    pub fn block_type_at(
        &self,
        _world_x: i64,
        elevation: i32,
        surface_height: i32,
        terrain: TerrainType,
    ) -> BlockType {
        let depth = (surface_height - elevation).max(0);
        if depth == 0 {
            return surface_block(terrain, surface_height);
        }
        if depth <= terrain.subsurface_depth() {
            return match terrain {
                TerrainType::Desert | TerrainType::Canyon => BlockType::Sand,
                TerrainType::Mountains => BlockType::Stone,
                _ => BlockType::Dirt,
            };
        }
        BlockType::Stone
    }
}

fn surface_block(terrain: TerrainType, surface_height: i32) -> BlockType {
    match terrain {
        TerrainType::Desert | TerrainType::Canyon => BlockType::Sand,
        TerrainType::SnowyPlains | TerrainType::Taiga => BlockType::Snow,
        TerrainType::Mountains if surface_height > SNOW_LINE => BlockType::Snow,
        TerrainType::Mountains => BlockType::Stone,
        _ => BlockType::Grass,
    }
}

fn raw_surface_height(sampler: &FractalSampler, world_x: i64) -> i32 {
    let x = world_x as f64;
    let base = Signal::BASE_HEIGHT.sample(sampler, x) * BASE_AMPLITUDE;
    let detail = Signal::DETAIL.sample(sampler, x) * DETAIL_AMPLITUDE;
    let mask = Signal::MOUNTAIN_MASK.sample(sampler, x);
    let boost = if mask > MOUNTAIN_THRESHOLD {
        (mask - MOUNTAIN_THRESHOLD) * MOUNTAIN_BOOST
    } else {
        0.0
    };
    (base + detail + boost).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_partition_is_ordered_and_total() {
        assert_eq!(TerrainBand::from_signal(-1.0), TerrainBand::Desert);
        assert_eq!(TerrainBand::from_signal(1.0), TerrainBand::SnowyPlains);
        assert_eq!(TerrainBand::from_signal(-0.45), TerrainBand::Savanna);
        assert_eq!(TerrainBand::from_signal(0.0), TerrainBand::Forest);
        assert_eq!(TerrainBand::from_signal(0.45), TerrainBand::SnowyPlains);

        let mut last = TerrainBand::Desert;
        for i in 0..=2000 {
            let band = TerrainBand::from_signal(-1.0 + i as f64 * 0.001);
            assert!(band >= last, "bands must be monotone in the signal");
            last = band;
        }
    }

    #[test]
    fn test_refinement_reaches_every_terrain_type() {
        let mut seen = Vec::new();
        for band in TerrainBand::ORDERED {
            for moisture in [-1.0, 0.0, 1.0] {
                let ty = band.refine(moisture);
                if !seen.contains(&ty) {
                    seen.push(ty);
                }
            }
        }
        assert_eq!(seen.len(), TerrainType::all().len());
    }

    #[test]
    fn test_spawn_column_sits_at_spawn_height() {
        for seed in [0, 1, 42, 12345, u64::MAX] {
            let classifier = TerrainClassifier::new(seed);
            assert_eq!(classifier.surface_height_at(0), SPAWN_SURFACE_HEIGHT);
        }
    }

    #[test]
    fn test_classifier_determinism() {
        let a = TerrainClassifier::new(777);
        let b = TerrainClassifier::new(777);
        for x in -300..300 {
            assert_eq!(a.terrain_type_at(x), b.terrain_type_at(x));
            assert_eq!(a.surface_height_at(x), b.surface_height_at(x));
        }
    }

    #[test]
    fn test_surface_is_continuous_enough_to_walk() {
        let classifier = TerrainClassifier::new(31337);
        for x in -500..500 {
            let step = (classifier.surface_height_at(x + 1) - classifier.surface_height_at(x)).abs();
            assert!(step <= 4, "cliff of {} blocks at column {}", step, x);
        }
    }

    #[test]
    fn test_block_type_layers() {
        let classifier = TerrainClassifier::new(1);
        let at = |elevation, terrain| classifier.block_type_at(0, elevation, 5, terrain);

        assert_eq!(at(5, TerrainType::Plains), BlockType::Grass);
        assert_eq!(at(4, TerrainType::Plains), BlockType::Dirt);
        assert_eq!(at(2, TerrainType::Plains), BlockType::Dirt);
        assert_eq!(at(1, TerrainType::Plains), BlockType::Stone);

        assert_eq!(at(5, TerrainType::Desert), BlockType::Sand);
        assert_eq!(at(1, TerrainType::Desert), BlockType::Sand);
        assert_eq!(at(0, TerrainType::Desert), BlockType::Stone);

        assert_eq!(at(5, TerrainType::SnowyPlains), BlockType::Snow);
        assert_eq!(at(4, TerrainType::SnowyPlains), BlockType::Dirt);
        assert_eq!(at(5, TerrainType::Swamp), BlockType::Grass);
        assert_eq!(at(2, TerrainType::Swamp), BlockType::Stone);
        assert_eq!(at(-40, TerrainType::Jungle), BlockType::Stone);
    }

    #[test]
    fn test_mountain_snow_line() {
        let classifier = TerrainClassifier::new(1);
        let low = classifier.block_type_at(0, SNOW_LINE, SNOW_LINE, TerrainType::Mountains);
        let high =
            classifier.block_type_at(0, SNOW_LINE + 1, SNOW_LINE + 1, TerrainType::Mountains);
        assert_eq!(low, BlockType::Stone);
        assert_eq!(high, BlockType::Snow);
        assert_eq!(
            classifier.block_type_at(0, SNOW_LINE, SNOW_LINE + 1, TerrainType::Mountains),
            BlockType::Stone
        );
    }

    #[test]
    fn test_depth_above_surface_treated_as_surface() {
        let classifier = TerrainClassifier::new(1);
        assert_eq!(
            classifier.block_type_at(0, 9, 5, TerrainType::Forest),
            BlockType::Grass
        );
    }

    #[test]
    fn test_max_depth_ordering() {
        assert!(TerrainType::Mountains.max_depth() > TerrainType::Plains.max_depth());
        assert!(TerrainType::Hills.max_depth() > TerrainType::Plains.max_depth());
        assert!(TerrainType::Desert.max_depth() < TerrainType::Plains.max_depth());
    }
}
