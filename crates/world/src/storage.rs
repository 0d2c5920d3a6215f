use std::collections::BTreeMap;

use sidecraft_physics::HorizontalBounds;
use tracing::debug;

use crate::chunk::{Chunk, ChunkPos, CHUNK_WORLD_SIZE};
use crate::index::WorldIndex;
use crate::terrain::ChunkGenerator;

/// Outcome of one [`ChunkStore::update_around`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadReport {
    /// Chunk containing the player.
    pub player_chunk: ChunkPos,
    /// Chunks generated by this call.
    pub generated: usize,
    /// Horizontal range the player may occupy.
    pub bounds: HorizontalBounds,
}

/// Generated chunks, keyed by position.
/// Uses BTreeMap so iteration order is deterministic across runs.
#[derive(Debug, Clone)]
pub struct ChunkStore {
    generator: ChunkGenerator,
    chunks: BTreeMap<ChunkPos, Chunk>,
    generation_distance: i32,
}

impl ChunkStore {
    /// Create an empty store loading chunks within `generation_distance` of the player.
    pub fn new(generator: ChunkGenerator, generation_distance: i32) -> Self {
        Self {
            generator,
            chunks: BTreeMap::new(),
            generation_distance: generation_distance.max(0),
        }
    }

    pub fn generator(&self) -> &ChunkGenerator {
        &self.generator
    }

    pub fn generation_distance(&self) -> i32 {
        self.generation_distance
    }

    /// Number of generated chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Returns true when nothing has been generated yet.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Attempt to fetch a chunk immutably.
    pub fn get(&self, pos: ChunkPos) -> Option<&Chunk> {
        self.chunks.get(&pos)
    }

    pub fn contains(&self, pos: ChunkPos) -> bool {
        self.chunks.contains_key(&pos)
    }

    /// Iterate over generated chunk positions in sorted order.
    pub fn iter_positions(&self) -> impl Iterator<Item = ChunkPos> + '_ {
        self.chunks.keys().copied()
    }

    /// Generate `pos` if it has never been generated and merge its blocks into `index`.
    ///
    /// Returns true when the chunk was generated by this call. A chunk is
    /// generated at most once per store, even if it came back empty.
    pub fn ensure_loaded(&mut self, pos: ChunkPos, focus: ChunkPos, index: &mut WorldIndex) -> bool {
        if self.chunks.contains_key(&pos) {
            return false;
        }
        let chunk = self.generator.generate(pos, focus);
        let emitted = chunk.len();
        let before = index.len();
        index.extend(chunk.blocks().iter().copied());
        debug!(
            %pos,
            emitted,
            ingested = index.len() - before,
            "chunk loaded"
        );
        self.chunks.insert(pos, chunk);
        true
    }

    /// Ensure every chunk within the generation distance of the player exists.
    pub fn update_around(
        &mut self,
        player_x: f64,
        player_y: f64,
        index: &mut WorldIndex,
    ) -> LoadReport {
        let focus = ChunkPos::containing(player_x, player_y);
        let r = self.generation_distance;
        let mut generated = 0;
        for y in focus.y - r..=focus.y + r {
            for x in focus.x - r..=focus.x + r {
                if self.ensure_loaded(ChunkPos::new(x, y), focus, index) {
                    generated += 1;
                }
            }
        }
        if generated > 0 {
            debug!(%focus, generated, resident = self.chunks.len(), "chunks generated");
        }
        LoadReport {
            player_chunk: focus,
            generated,
            bounds: self.bounds_for(focus),
        }
    }

    /// Horizontal world bounds while the player is in `focus`.
    pub fn bounds_for(&self, focus: ChunkPos) -> HorizontalBounds {
        let span = 2 * self.generation_distance;
        HorizontalBounds {
            min_x: (focus.x - span) as f64 * CHUNK_WORLD_SIZE,
            max_x: (focus.x + span) as f64 * CHUNK_WORLD_SIZE,
        }
    }
}
