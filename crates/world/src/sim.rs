//! Step-driven world simulation: chunk streaming, player physics and edits.

use sidecraft_core::{BlockType, GameMode, SimTick};
use sidecraft_physics::{HorizontalBounds, MoveInput, PhysicsResolver, PlayerState, Rect};
use tracing::{debug, trace};

use crate::chunk::{world_to_block_coordinate, Block, CHUNK_WORLD_SIZE};
use crate::config::SimConfig;
use crate::index::WorldIndex;
use crate::storage::ChunkStore;
use crate::terrain::ChunkGenerator;

/// A single-player world: generated chunks, live blocks and the player body.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimConfig,
    resolver: PhysicsResolver,
    chunks: ChunkStore,
    world: WorldIndex,
    player: PlayerState,
    tick: SimTick,
    bounds: Option<HorizontalBounds>,
}

impl Simulation {
    /// Create a world with nothing generated yet and the player at the spawn point.
    pub fn new(config: SimConfig) -> Self {
        let generator = ChunkGenerator::new(config.seed, config.generation.window());
        let chunks = ChunkStore::new(generator, config.generation.generation_distance);
        debug!(
            seed = config.seed,
            generation_distance = chunks.generation_distance(),
            "simulation created"
        );
        Self {
            resolver: PhysicsResolver::new(config.physics),
            chunks,
            world: WorldIndex::new(),
            player: PlayerState::spawn_at(config.spawn_x, config.spawn_y),
            tick: SimTick::ZERO,
            bounds: None,
            config,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Replace the player state, e.g. to teleport.
    pub fn set_player(&mut self, player: PlayerState) {
        self.player = player;
    }

    pub fn tick(&self) -> SimTick {
        self.tick
    }

    pub fn world(&self) -> &WorldIndex {
        &self.world
    }

    pub fn chunks(&self) -> &ChunkStore {
        &self.chunks
    }

    /// Horizontal bounds computed by the last step.
    pub fn bounds(&self) -> Option<HorizontalBounds> {
        self.bounds
    }

    /// The player's body rectangle.
    pub fn player_rect(&self) -> Rect {
        self.player.rect(self.resolver.params())
    }

    /// Load chunks around the player, then move the player.
    pub fn step(&mut self, input: MoveInput) -> PlayerState {
        let report = self
            .chunks
            .update_around(self.player.x, self.player.y, &mut self.world);
        self.bounds = Some(report.bounds);

        self.resolver
            .step(&mut self.player, input, &self.world, self.bounds);
        self.tick = self.tick.advance(1);

        trace!(
            tick = self.tick.0,
            x = self.player.x,
            y = self.player.y,
            velocity_y = self.player.velocity_y,
            on_ground = self.player.on_ground,
            generated = report.generated,
            "step"
        );
        self.player
    }

    /// Blocks intersecting the view around the player, sorted by (row, column).
    pub fn query_visible_blocks(&self) -> Vec<Block> {
        let centre = self.player_rect().center();
        let width = self.config.view_width + 2.0 * CHUNK_WORLD_SIZE;
        let height = self.config.view_height + 2.0 * CHUNK_WORLD_SIZE;
        let view = Rect::new(
            centre.x - width * 0.5,
            centre.y - height * 0.5,
            width,
            height,
        );
        self.world.overlapping(&view)
    }

    /// Place a block in the grid cell containing `(x, y)`.
    ///
    /// Returns false when the cell is taken, the block would overlap the
    /// player, or (in survival) the cell is out of reach or unsupported.
    /// In creative mode an occupied cell and overlap with the player body are
    /// the only rejections.
    pub fn try_place_block(&mut self, x: f64, y: f64, block_type: BlockType, mode: GameMode) -> bool {
        let bx = world_to_block_coordinate(x);
        let by = world_to_block_coordinate(y);
        if self.world.has(bx, by) {
            return false;
        }

        let block = Block::new(bx, by, block_type);
        let body = self.player_rect();
        if block.rect().intersects(&body) {
            return false;
        }

        if mode == GameMode::Survival {
            let distance = body.center().distance(block.rect().center());
            if distance > self.config.max_place_distance {
                debug!(x = bx, y = by, distance, "placement out of reach");
                return false;
            }
            if !self.world.is_adjacent(bx, by) {
                return false;
            }
        }

        let placed = self.world.insert(block);
        debug!(x = bx, y = by, %block_type, mode = mode.as_str(), "block placed");
        placed
    }

    /// Remove the block in the grid cell containing `(x, y)`.
    pub fn try_remove_block(&mut self, x: f64, y: f64) -> bool {
        let bx = world_to_block_coordinate(x);
        let by = world_to_block_coordinate(y);
        match self.world.remove(bx, by) {
            Some(block) => {
                debug!(x = bx, y = by, block_type = %block.block_type, "block removed");
                true
            }
            None => false,
        }
    }
}
