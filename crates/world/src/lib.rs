//! Procedural 2D block world: noise, biomes, chunk generation and streaming,
//! the live block index, and the step-driven simulation built on them.

pub mod biome;
pub mod caves;
mod chunk;
pub mod config;
pub mod decor;
mod index;
pub mod noise;
mod sim;
mod storage;
pub mod terrain;
pub mod trees;

pub use biome::{TerrainBand, TerrainClassifier, TerrainType, SEA_LEVEL, SNOW_LINE};
pub use chunk::*;
pub use config::{GenerationConfig, SimConfig};
pub use crate::noise::{FractalSampler, NoiseField, Signal};
pub use index::WorldIndex;
pub use sim::Simulation;
pub use storage::{ChunkStore, LoadReport};
pub use terrain::{ChunkGenerator, GenerationWindow, SpawnClearing};
