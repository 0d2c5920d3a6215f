//! Biome-specific surface decorations: desert cacti and swamp pools.
//!
//! Each decoration is gated by its own signal and ignores whether a tree
//! grows in the same column.

use crate::biome::TerrainType;
use crate::chunk::CellPos;
use crate::noise::{FractalSampler, Signal};
use sidecraft_core::BlockType;

/// Cactus signal must exceed this.
pub const CACTUS_THRESHOLD: f64 = 0.45;
/// Tallest cactus stack.
pub const MAX_CACTUS_HEIGHT: i32 = 3;
/// Pond signal must exceed this.
pub const POND_THRESHOLD: f64 = 0.3;

/// Decoration cells for one column, bottom-up.
pub fn column_decorations(
    sampler: &FractalSampler,
    col: i64,
    surface: i32,
    terrain: TerrainType,
) -> Vec<(CellPos, BlockType)> {
    let x = col as f64;
    match terrain {
        TerrainType::Desert if Signal::CACTUS.sample(sampler, x) > CACTUS_THRESHOLD => {
            let growth = Signal::CACTUS_HEIGHT.sample_unit(sampler, x);
            let height = 1 + (growth * (MAX_CACTUS_HEIGHT - 1) as f64).round() as i32;
            (1..=height)
                .map(|dy| {
                    (
                        CellPos::at_elevation(col, (surface + dy) as i64),
                        BlockType::Cactus,
                    )
                })
                .collect()
        }
        TerrainType::Swamp if Signal::POND.sample(sampler, x) > POND_THRESHOLD => {
            vec![(
                CellPos::at_elevation(col, (surface + 1) as i64),
                BlockType::Water,
            )]
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cacti_stack_on_desert_surface() {
        let sampler = FractalSampler::new(3);
        let stacks: Vec<_> = (-500..500)
            .map(|col| column_decorations(&sampler, col, 2, TerrainType::Desert))
            .filter(|cells| !cells.is_empty())
            .collect();
        assert!(!stacks.is_empty());
        for cells in stacks {
            assert!((1..=MAX_CACTUS_HEIGHT as usize).contains(&cells.len()));
            for (i, (cell, ty)) in cells.iter().enumerate() {
                assert_eq!(*ty, BlockType::Cactus);
                assert_eq!(cell.elevation(), 3 + i as i64);
            }
        }
    }

    #[test]
    fn test_swamp_pools_are_single_cells() {
        let sampler = FractalSampler::new(3);
        let pools: Vec<_> = (-500..500)
            .map(|col| column_decorations(&sampler, col, -1, TerrainType::Swamp))
            .filter(|cells| !cells.is_empty())
            .collect();
        assert!(!pools.is_empty());
        for cells in pools {
            assert_eq!(cells.len(), 1);
            assert_eq!(cells[0].1, BlockType::Water);
            assert_eq!(cells[0].0.elevation(), 0);
        }
    }

    #[test]
    fn test_other_biomes_are_undecorated() {
        let sampler = FractalSampler::new(3);
        for col in -200..200 {
            assert!(column_decorations(&sampler, col, 0, TerrainType::Forest).is_empty());
            assert!(column_decorations(&sampler, col, 0, TerrainType::Mountains).is_empty());
        }
    }
}
