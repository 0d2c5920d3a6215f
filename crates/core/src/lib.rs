#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod block;

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use block::{BlockInfo, BlockType, BlockTypeError};

/// Fixed simulation tick (one tick per rendered frame).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SimTick(pub u64);

impl SimTick {
    /// First tick in any deterministic timeline.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}

/// Rules applied when the player edits the world.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Any empty cell may be filled.
    Creative,
    /// Placement needs reach and an adjacent support.
    #[default]
    Survival,
}

impl GameMode {
    /// Canonical string key used in configs/logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Creative => "creative",
            Self::Survival => "survival",
        }
    }
}

/// Helper to derive a reproducible RNG from a world seed and a salt domain.
///
/// Distinct salts yield independent streams for the same world seed.
pub fn seeded_rng(world_seed: u64, salt: u64) -> StdRng {
    StdRng::seed_from_u64(world_seed ^ salt.rotate_left(32))
}
