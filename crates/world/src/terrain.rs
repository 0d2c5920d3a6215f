//! Terrain generation integrating biome, cave, tree and decoration passes.
//!
//! A chunk is filled in three passes whose order is part of the contract:
//! terrain columns, then vegetation, then decorations. Passes never check
//! each other's output, so a later pass may emit a cell an earlier pass
//! already filled; the world index keeps the first.

use crate::biome::{TerrainClassifier, TerrainType};
use crate::caves::CaveCarver;
use crate::chunk::{Block, CellPos, Chunk, ChunkPos, CHUNK_SIZE};
use crate::decor::column_decorations;
use crate::trees::Tree;
use serde::{Deserialize, Serialize};
use sidecraft_core::BlockType;
use tracing::{debug, instrument};

/// Columns outside a chunk whose features may reach into it (widest canopy half-width).
const FEATURE_MARGIN: i64 = 2;

/// Which chunks get content relative to the player's chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationWindow {
    /// Chunks farther than this horizontally from the player's chunk are empty.
    pub horizontal: i32,
    /// Chunks farther than this vertically from the player's chunk are empty.
    pub vertical: i32,
}

impl Default for GenerationWindow {
    fn default() -> Self {
        Self {
            horizontal: 10,
            vertical: 3,
        }
    }
}

impl GenerationWindow {
    /// True when `pos` receives full content while the player is in `focus`.
    pub fn allows(&self, pos: ChunkPos, focus: ChunkPos) -> bool {
        (pos.x - focus.x).abs() <= self.horizontal && (pos.y - focus.y).abs() <= self.vertical
    }
}

/// Cells around the spawn point that generation leaves empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnClearing {
    /// Columns `-half_width..=half_width` are cleared.
    pub half_width: i64,
    /// Lowest cleared elevation.
    pub min_elevation: i64,
    /// Highest cleared elevation.
    pub max_elevation: i64,
}

impl Default for SpawnClearing {
    fn default() -> Self {
        Self {
            half_width: 2,
            min_elevation: 1,
            max_elevation: 5,
        }
    }
}

impl SpawnClearing {
    pub fn contains(&self, cell: CellPos) -> bool {
        cell.col.abs() <= self.half_width
            && (self.min_elevation..=self.max_elevation).contains(&cell.elevation())
    }

    /// True when any cleared cell lies inside `pos`.
    pub fn touches(&self, pos: ChunkPos) -> bool {
        let cols = pos.min_col()..pos.min_col() + CHUNK_SIZE as i64;
        let rows = pos.min_row()..pos.min_row() + CHUNK_SIZE as i64;
        let (top, bottom) = (-self.max_elevation, -self.min_elevation);
        cols.start <= self.half_width
            && cols.end > -self.half_width
            && rows.start <= bottom
            && rows.end > top
    }
}

/// Per-column inputs shared by all passes.
#[derive(Debug, Clone, Copy)]
struct ColumnInfo {
    col: i64,
    surface: i32,
    terrain: TerrainType,
}

/// Terrain generator that fills chunks with blocks.
#[derive(Debug, Clone)]
pub struct ChunkGenerator {
    world_seed: u64,
    classifier: TerrainClassifier,
    caves: CaveCarver,
    window: GenerationWindow,
    clearing: SpawnClearing,
}

impl ChunkGenerator {
    /// Create a new terrain generator from world seed.
    pub fn new(world_seed: u64, window: GenerationWindow) -> Self {
        Self {
            world_seed,
            classifier: TerrainClassifier::new(world_seed),
            caves: CaveCarver::default(),
            window,
            clearing: SpawnClearing::default(),
        }
    }

    pub fn world_seed(&self) -> u64 {
        self.world_seed
    }

    pub fn classifier(&self) -> &TerrainClassifier {
        &self.classifier
    }

    pub fn window(&self) -> GenerationWindow {
        self.window
    }

    pub fn clearing(&self) -> SpawnClearing {
        self.clearing
    }

    /// Generate the chunk at `pos` while the player stands in `focus`.
    ///
    /// Chunks outside the generation window come back empty.
    pub fn generate(&self, pos: ChunkPos, focus: ChunkPos) -> Chunk {
        if !self.window.allows(pos, focus) {
            debug!(%pos, %focus, "chunk outside generation window, left empty");
            return Chunk::new(pos);
        }
        self.generate_full(pos)
    }

    /// Generate the chunk at `pos` ignoring the generation window.
    #[instrument(skip(self), fields(chunk_pos = %pos, world_seed = self.world_seed))]
    pub fn generate_full(&self, pos: ChunkPos) -> Chunk {
        let mut chunk = Chunk::new(pos);
        let clear_spawn = self.clearing.touches(pos);

        let min_col = pos.min_col();
        let max_col = min_col + CHUNK_SIZE as i64 - 1;

        let columns: Vec<ColumnInfo> = (min_col - FEATURE_MARGIN..=max_col + FEATURE_MARGIN)
            .map(|col| ColumnInfo {
                col,
                surface: self.classifier.surface_height_at(col),
                terrain: self.classifier.terrain_type_at(col),
            })
            .collect();
        let inner = &columns[FEATURE_MARGIN as usize..columns.len() - FEATURE_MARGIN as usize];

        let emit = |chunk: &mut Chunk, cell: CellPos, block_type: BlockType| {
            if !pos.contains(cell) {
                return;
            }
            if clear_spawn && self.clearing.contains(cell) {
                return;
            }
            chunk.push(Block::at_cell(cell, block_type));
        };

        // Terrain pass: surface down to biome depth, minus caves.
        for column in inner {
            self.terrain_column(*column, pos, |cell, ty| emit(&mut chunk, cell, ty));
        }
        let terrain_blocks = chunk.len();

        // Vegetation pass: neighbours' canopies may reach into this chunk.
        let sampler = self.classifier.sampler();
        for column in &columns {
            if let Some(tree) = Tree::at_column(sampler, column.col, column.surface, column.terrain)
            {
                for (cell, ty) in tree.cells() {
                    emit(&mut chunk, cell, ty);
                }
            }
        }
        let vegetation_blocks = chunk.len() - terrain_blocks;

        // Decoration pass.
        for column in inner {
            for (cell, ty) in column_decorations(sampler, column.col, column.surface, column.terrain)
            {
                emit(&mut chunk, cell, ty);
            }
        }

        debug!(
            terrain_blocks,
            vegetation_blocks,
            decoration_blocks = chunk.len() - terrain_blocks - vegetation_blocks,
            "Terrain generation complete"
        );
        chunk
    }

    /// Emit the in-chunk part of one terrain column, top-down.
    fn terrain_column(
        &self,
        column: ColumnInfo,
        pos: ChunkPos,
        mut emit: impl FnMut(CellPos, BlockType),
    ) {
        let lowest = column.surface - column.terrain.max_depth() + 1;
        // Rows grow downward, so the chunk's elevation span is inverted.
        let chunk_top = -(pos.min_row() as i32);
        let chunk_bottom = chunk_top - CHUNK_SIZE + 1;
        let high = column.surface.min(chunk_top);
        let low = lowest.max(chunk_bottom);

        let sampler = self.classifier.sampler();
        for elevation in (low..=high).rev() {
            if self.caves.is_cave(sampler, column.col, elevation) {
                continue;
            }
            let ty = self.classifier.block_type_at(
                column.col,
                elevation,
                column.surface,
                column.terrain,
            );
            emit(CellPos::at_elevation(column.col, elevation as i64), ty);
        }
    }
}
