//! Tree generation for biome decoration.
//!
//! Generates different tree types based on biome characteristics.

use crate::biome::TerrainType;
use crate::chunk::CellPos;
use crate::noise::{FractalSampler, Signal};
use sidecraft_core::BlockType;

/// Trees only grow on surfaces at or above this elevation.
pub const MIN_TREE_SURFACE: i32 = -3;

/// Canopy shape variations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanopyShape {
    /// A 3-wide row above the trunk plus a centre block on top.
    Cap,
    /// Three rows tapering 5, 3, 1 starting at the top trunk block.
    Tapered,
}

/// Per-biome tree parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeSpec {
    /// Vegetation signal must exceed this for a tree to grow.
    pub threshold: f64,
    /// Minimum trunk height.
    pub base_height: i32,
    /// Extra trunk height reached at the top of the height signal.
    pub height_range: i32,
    pub canopy: CanopyShape,
}

impl TreeSpec {
    /// Select tree parameters based on biome.
    pub fn for_terrain(terrain: TerrainType) -> Option<Self> {
        let spec = |threshold, base_height, height_range, canopy| TreeSpec {
            threshold,
            base_height,
            height_range,
            canopy,
        };
        match terrain {
            TerrainType::Forest => Some(spec(0.05, 4, 2, CanopyShape::Cap)),
            TerrainType::Jungle => Some(spec(-0.05, 6, 3, CanopyShape::Cap)),
            TerrainType::Taiga => Some(spec(0.1, 5, 2, CanopyShape::Tapered)),
            TerrainType::Plains => Some(spec(0.45, 3, 1, CanopyShape::Cap)),
            TerrainType::Savanna => Some(spec(0.5, 3, 1, CanopyShape::Cap)),
            TerrainType::Swamp => Some(spec(0.5, 3, 1, CanopyShape::Cap)),
            _ => None, // Deserts, mountains, canyons don't have trees
        }
    }
}

/// Tree structure with position and shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    /// World column of the trunk.
    pub col: i64,
    /// Elevation of the surface the trunk stands on.
    pub surface: i32,
    /// Number of trunk blocks.
    pub trunk_height: i32,
    pub canopy: CanopyShape,
}

impl Tree {
    /// Decide whether a tree grows in this column and how tall it is.
    pub fn at_column(
        sampler: &FractalSampler,
        col: i64,
        surface: i32,
        terrain: TerrainType,
    ) -> Option<Self> {
        let spec = TreeSpec::for_terrain(terrain)?;
        if surface < MIN_TREE_SURFACE {
            return None;
        }
        if Signal::VEGETATION.sample(sampler, col as f64) <= spec.threshold {
            return None;
        }
        let growth = Signal::TREE_HEIGHT.sample_unit(sampler, col as f64);
        let trunk_height = spec.base_height + (growth * spec.height_range as f64).round() as i32;
        Some(Self {
            col,
            surface,
            trunk_height,
            canopy: spec.canopy,
        })
    }

    /// Elevation of the highest trunk block.
    pub fn top(&self) -> i32 {
        self.surface + self.trunk_height
    }

    /// Every cell of the tree: trunk bottom-up, then canopy.
    pub fn cells(&self) -> Vec<(CellPos, BlockType)> {
        let mut cells = Vec::new();
        for elevation in self.surface + 1..=self.top() {
            cells.push((
                CellPos::at_elevation(self.col, elevation as i64),
                BlockType::Wood,
            ));
        }

        let top = self.top();
        match self.canopy {
            CanopyShape::Cap => {
                for dx in -1..=1 {
                    self.push_leaf(&mut cells, dx, top + 1);
                }
                self.push_leaf(&mut cells, 0, top + 2);
            }
            CanopyShape::Tapered => {
                // Widest row wraps the top trunk block.
                for (row, half_width) in [(top, 2), (top + 1, 1), (top + 2, 0)] {
                    for dx in -half_width..=half_width {
                        if row == top && dx == 0 {
                            continue;
                        }
                        self.push_leaf(&mut cells, dx, row);
                    }
                }
            }
        }
        cells
    }

    fn push_leaf(&self, cells: &mut Vec<(CellPos, BlockType)>, dx: i64, elevation: i32) {
        cells.push((
            CellPos::at_elevation(self.col + dx, elevation as i64),
            BlockType::Leaves,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(canopy: CanopyShape) -> Tree {
        Tree {
            col: 10,
            surface: 2,
            trunk_height: 4,
            canopy,
        }
    }

    #[test]
    fn test_trunk_stacks_from_surface() {
        let cells = tree(CanopyShape::Cap).cells();
        let trunk: Vec<_> = cells
            .iter()
            .filter(|(_, ty)| *ty == BlockType::Wood)
            .map(|(cell, _)| cell.elevation())
            .collect();
        assert_eq!(trunk, vec![3, 4, 5, 6]);
        assert!(cells.iter().all(|(cell, ty)| *ty != BlockType::Wood || cell.col == 10));
    }

    #[test]
    fn test_cap_canopy_is_three_wide() {
        let leaves: Vec<_> = tree(CanopyShape::Cap)
            .cells()
            .into_iter()
            .filter(|(_, ty)| *ty == BlockType::Leaves)
            .map(|(cell, _)| (cell.col, cell.elevation()))
            .collect();
        assert_eq!(leaves, vec![(9, 7), (10, 7), (11, 7), (10, 8)]);
    }

    #[test]
    fn test_tapered_canopy_narrows_upward() {
        let leaves: Vec<_> = tree(CanopyShape::Tapered)
            .cells()
            .into_iter()
            .filter(|(_, ty)| *ty == BlockType::Leaves)
            .map(|(cell, _)| (cell.col, cell.elevation()))
            .collect();
        let width_at = |e: i64| leaves.iter().filter(|(_, el)| *el == e).count();
        assert_eq!(width_at(6), 4); // trunk top is not a leaf
        assert_eq!(width_at(7), 3);
        assert_eq!(width_at(8), 1);
        assert!(!leaves.contains(&(10, 6)));
    }

    #[test]
    fn test_barren_terrain_grows_nothing() {
        let sampler = FractalSampler::new(1);
        for col in -200..200 {
            assert!(Tree::at_column(&sampler, col, 0, TerrainType::Desert).is_none());
            assert!(Tree::at_column(&sampler, col, 0, TerrainType::Mountains).is_none());
        }
    }

    #[test]
    fn test_low_surfaces_grow_nothing() {
        let sampler = FractalSampler::new(1);
        for col in -200..200 {
            assert!(
                Tree::at_column(&sampler, col, MIN_TREE_SURFACE - 1, TerrainType::Jungle)
                    .is_none()
            );
        }
    }

    #[test]
    fn test_forests_grow_trees_with_bounded_height() {
        let sampler = FractalSampler::new(1);
        let trees: Vec<_> = (-300..300)
            .filter_map(|col| Tree::at_column(&sampler, col, 0, TerrainType::Forest))
            .collect();
        assert!(!trees.is_empty());
        for t in trees {
            assert!((4..=6).contains(&t.trunk_height));
        }
    }
}
