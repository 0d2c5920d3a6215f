//! Block types and their display metadata.
//!
//! The metadata table is a `static` and is never mutated; simulation code
//! only compares [`BlockType`] values by identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Closed set of block types that can occupy a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum BlockType {
    /// Surface layer of temperate biomes.
    Grass = 0,
    /// Shallow subsurface fill.
    Dirt = 1,
    /// Deep fill and mountain faces.
    Stone = 2,
    /// Desert and canyon fill.
    Sand = 3,
    /// Tree trunks.
    Wood = 4,
    /// Tree canopies.
    Leaves = 5,
    /// Desert cactus stacks.
    Cactus = 6,
    /// Swamp pools.
    Water = 7,
    /// Placeable only.
    Lava = 8,
    /// Cold surfaces and peaks.
    Snow = 9,
}

/// Display metadata for a block type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockInfo {
    /// Stable lowercase name (also the serde/`FromStr` key).
    pub name: &'static str,
    /// RGB fill colour used by presentation layers.
    pub color: (u8, u8, u8),
    /// Short human-readable description.
    pub description: &'static str,
}

static BLOCK_INFO: [BlockInfo; 10] = [
    BlockInfo {
        name: "grass",
        color: (50, 180, 50),
        description: "Topsoil with a layer of grass",
    },
    BlockInfo {
        name: "dirt",
        color: (150, 100, 50),
        description: "Loose soil found below the surface",
    },
    BlockInfo {
        name: "stone",
        color: (120, 120, 120),
        description: "Solid rock that makes up the deep world",
    },
    BlockInfo {
        name: "sand",
        color: (230, 210, 140),
        description: "Fine grains covering deserts and canyons",
    },
    BlockInfo {
        name: "wood",
        color: (110, 75, 40),
        description: "A tree trunk segment",
    },
    BlockInfo {
        name: "leaves",
        color: (40, 140, 40),
        description: "Dense foliage from a tree canopy",
    },
    BlockInfo {
        name: "cactus",
        color: (60, 150, 60),
        description: "A spiny desert plant",
    },
    BlockInfo {
        name: "water",
        color: (60, 100, 220),
        description: "Still water pooled on the surface",
    },
    BlockInfo {
        name: "lava",
        color: (230, 90, 20),
        description: "Molten rock",
    },
    BlockInfo {
        name: "snow",
        color: (240, 240, 250),
        description: "Packed snow on cold ground and high peaks",
    },
];

impl BlockType {
    /// Every block type in declaration order.
    pub const ALL: [BlockType; 10] = [
        BlockType::Grass,
        BlockType::Dirt,
        BlockType::Stone,
        BlockType::Sand,
        BlockType::Wood,
        BlockType::Leaves,
        BlockType::Cactus,
        BlockType::Water,
        BlockType::Lava,
        BlockType::Snow,
    ];

    /// Static metadata for this block type.
    pub fn info(self) -> &'static BlockInfo {
        &BLOCK_INFO[self as usize]
    }

    /// Stable lowercase name.
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// RGB display colour.
    pub fn color(self) -> (u8, u8, u8) {
        self.info().color
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown block name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockTypeError {
    /// The input was empty after trimming.
    #[error("block name cannot be empty")]
    Empty,
    /// No block type carries this name.
    #[error("unknown block type `{0}`")]
    Unknown(String),
}

impl FromStr for BlockType {
    type Err = BlockTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.is_empty() {
            return Err(BlockTypeError::Empty);
        }
        BlockType::ALL
            .iter()
            .copied()
            .find(|ty| ty.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| BlockTypeError::Unknown(name.to_string()))
    }
}
