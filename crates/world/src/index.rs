//! Live block set keyed by grid cell.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use sidecraft_physics::{Rect, SolidQuery};

use crate::chunk::{Block, CellPos, BLOCK_SIZE, GROUND_LEVEL_Y};

/// Spatial hash of every block currently in the world. At most one block per cell.
#[derive(Debug, Clone, Default)]
pub struct WorldIndex {
    blocks: HashMap<CellPos, Block>,
}

impl WorldIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// True when a block's top-left corner is exactly `(x, y)`.
    pub fn has(&self, x: f64, y: f64) -> bool {
        self.get(x, y).is_some()
    }

    /// Block whose top-left corner is exactly `(x, y)`.
    pub fn get(&self, x: f64, y: f64) -> Option<&Block> {
        self.blocks
            .get(&CellPos::containing(x, y))
            .filter(|b| b.x == x && b.y == y)
    }

    /// Block occupying `cell`.
    pub fn get_cell(&self, cell: CellPos) -> Option<&Block> {
        self.blocks.get(&cell)
    }

    /// True when one of the four axis neighbours is occupied, or `(x, y)` sits
    /// on the ground level.
    pub fn is_adjacent(&self, x: f64, y: f64) -> bool {
        y == GROUND_LEVEL_Y
            || self.has(x - BLOCK_SIZE, y)
            || self.has(x + BLOCK_SIZE, y)
            || self.has(x, y - BLOCK_SIZE)
            || self.has(x, y + BLOCK_SIZE)
    }

    /// Add a block unless its cell is taken. Returns whether it was stored.
    pub fn insert(&mut self, block: Block) -> bool {
        match self.blocks.entry(block.cell()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(block);
                true
            }
        }
    }

    /// Remove the block whose top-left corner is exactly `(x, y)`.
    pub fn remove(&mut self, x: f64, y: f64) -> Option<Block> {
        let cell = CellPos::containing(x, y);
        match self.blocks.get(&cell) {
            Some(b) if b.x == x && b.y == y => self.blocks.remove(&cell),
            _ => None,
        }
    }

    /// Iterate over all blocks in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Block> + '_ {
        self.blocks.values()
    }

    /// Blocks in the cells `area` touches, in (row, column) order.
    pub fn within(&self, area: &Rect) -> Vec<Block> {
        let min = CellPos::containing(area.x, area.y);
        let max = CellPos::containing(area.right(), area.bottom());
        let mut found = Vec::new();
        for row in min.row..=max.row {
            for col in min.col..=max.col {
                if let Some(block) = self.blocks.get(&CellPos::new(col, row)) {
                    found.push(*block);
                }
            }
        }
        found
    }

    /// Blocks whose rectangle strictly overlaps `area`, in (row, column) order.
    pub fn overlapping(&self, area: &Rect) -> Vec<Block> {
        let mut found = self.within(area);
        found.retain(|b| b.rect().intersects(area));
        found
    }
}

impl SolidQuery for WorldIndex {
    fn solids_overlapping(&self, area: &Rect) -> Vec<Rect> {
        self.overlapping(area).iter().map(Block::rect).collect()
    }
}

impl Extend<Block> for WorldIndex {
    fn extend<I: IntoIterator<Item = Block>>(&mut self, iter: I) {
        for block in iter {
            self.insert(block);
        }
    }
}
