use std::fmt;

use serde::{Deserialize, Serialize};
use sidecraft_core::BlockType;
use sidecraft_physics::Rect;

/// Edge length of one grid cell in world units.
pub const BLOCK_SIZE: f64 = 50.0;
/// Chunk edge length in blocks.
pub const CHUNK_SIZE: i32 = 10;
/// Chunk edge length in world units.
pub const CHUNK_WORLD_SIZE: f64 = BLOCK_SIZE * CHUNK_SIZE as f64;
/// World y of the designated ground level.
pub const GROUND_LEVEL_Y: f64 = 0.0;

/// Floor a world coordinate onto the block grid.
pub fn world_to_block_coordinate(coord: f64) -> f64 {
    (coord / BLOCK_SIZE).floor() * BLOCK_SIZE
}

/// Grid cell (column, row); row grows downward like world y.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CellPos {
    pub col: i64,
    pub row: i64,
}

impl CellPos {
    pub const fn new(col: i64, row: i64) -> Self {
        Self { col, row }
    }

    /// Cell containing the world point `(x, y)`.
    pub fn containing(x: f64, y: f64) -> Self {
        Self {
            col: (x / BLOCK_SIZE).floor() as i64,
            row: (y / BLOCK_SIZE).floor() as i64,
        }
    }

    /// Cell at terrain column `col` and elevation `elevation` (up-positive).
    pub const fn at_elevation(col: i64, elevation: i64) -> Self {
        Self {
            col,
            row: -elevation,
        }
    }

    /// Up-positive elevation of this cell.
    pub const fn elevation(self) -> i64 {
        -self.row
    }

    /// World coordinates of the top-left corner.
    pub fn origin(self) -> (f64, f64) {
        (self.col as f64 * BLOCK_SIZE, self.row as f64 * BLOCK_SIZE)
    }

    /// Chunk this cell belongs to.
    pub fn chunk(self) -> ChunkPos {
        let size = CHUNK_SIZE as i64;
        ChunkPos::new(
            self.col.div_euclid(size) as i32,
            self.row.div_euclid(size) as i32,
        )
    }
}

/// Chunk coordinate (x, y) in chunk space.
/// Implements Ord for deterministic iteration in BTreeMap/BTreeSet (sorts by x, then y).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct ChunkPos {
    pub x: i32,
    pub y: i32,
}

impl ChunkPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chunk containing the world point `(x, y)`.
    pub fn containing(x: f64, y: f64) -> Self {
        Self {
            x: (x / CHUNK_WORLD_SIZE).floor() as i32,
            y: (y / CHUNK_WORLD_SIZE).floor() as i32,
        }
    }

    /// First grid column covered by this chunk.
    pub fn min_col(self) -> i64 {
        self.x as i64 * CHUNK_SIZE as i64
    }

    /// First grid row covered by this chunk.
    pub fn min_row(self) -> i64 {
        self.y as i64 * CHUNK_SIZE as i64
    }

    /// True when `cell` lies inside this chunk.
    pub fn contains(self, cell: CellPos) -> bool {
        cell.chunk() == self
    }

    /// Chebyshev distance in chunks.
    pub fn chebyshev(self, other: ChunkPos) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One occupied grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub block_type: BlockType,
}

impl Block {
    /// A full-size block whose top-left corner is at `(x, y)`.
    pub fn new(x: f64, y: f64, block_type: BlockType) -> Self {
        Self {
            x,
            y,
            width: BLOCK_SIZE,
            height: BLOCK_SIZE,
            block_type,
        }
    }

    /// A full-size block filling `cell`.
    pub fn at_cell(cell: CellPos, block_type: BlockType) -> Self {
        let (x, y) = cell.origin();
        Self::new(x, y, block_type)
    }

    /// Grid cell this block occupies.
    pub fn cell(&self) -> CellPos {
        CellPos::containing(self.x, self.y)
    }

    /// Collision rectangle.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Generated content of one chunk.
///
/// Blocks are kept in emission order (terrain, vegetation, decorations); two
/// passes may emit the same cell, and only the first survives ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    position: ChunkPos,
    blocks: Vec<Block>,
}

impl Chunk {
    /// An empty chunk.
    pub fn new(position: ChunkPos) -> Self {
        Self {
            position,
            blocks: Vec::new(),
        }
    }

    #[inline]
    pub fn position(&self) -> ChunkPos {
        self.position
    }

    /// Emitted blocks in pass order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Append a block. The caller guarantees the cell lies inside this chunk.
    pub fn push(&mut self, block: Block) {
        debug_assert!(self.position.contains(block.cell()));
        self.blocks.push(block);
    }

    /// Type emitted first for `cell`, if any.
    pub fn first_at(&self, cell: CellPos) -> Option<BlockType> {
        self.blocks
            .iter()
            .find(|b| b.cell() == cell)
            .map(|b| b.block_type)
    }
}
