//! Noise generation utilities for terrain generation.
//!
//! [`NoiseField`] wraps a seeded [`Perlin`] generator; [`FractalSampler`] layers
//! octaves of it, and [`Signal`] presets derive independent terrain signals
//! from the one field by sampling it along different y offsets.

use noise::{NoiseFn, Perlin};
use rand::Rng;
use sidecraft_core::seeded_rng;

/// Lattice period of the underlying permutation table.
pub const NOISE_PERIOD: usize = 256;

const PERMUTATION_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Deterministic 2D Perlin noise in `[-1, 1]`, periodic over [`NOISE_PERIOD`].
#[derive(Debug, Clone, Copy)]
pub struct NoiseField {
    perlin: Perlin,
}

impl NoiseField {
    /// Build a field for a 64-bit world seed.
    pub fn new(seed: u64) -> Self {
        Self {
            perlin: Perlin::new(perlin_seed(seed)),
        }
    }

    /// Sample the field at `(x, y)`.
    pub fn sample_2d(&self, x: f64, y: f64) -> f64 {
        self.perlin.get([x, y]).clamp(-1.0, 1.0)
    }
}

/// Fold a world seed into the 32-bit seed `Perlin` takes, mixing all 64 bits.
fn perlin_seed(seed: u64) -> u32 {
    seeded_rng(seed, PERMUTATION_SALT).gen()
}

/// Multi-octave sampler over a single [`NoiseField`].
#[derive(Debug, Clone)]
pub struct FractalSampler {
    field: NoiseField,
}

impl FractalSampler {
    /// Create a sampler owning a field built from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            field: NoiseField::new(seed),
        }
    }

    /// The underlying single-octave field.
    pub fn field(&self) -> &NoiseField {
        &self.field
    }

    /// Normalised sum of `octaves` samples at doubling frequency (starting at
    /// `scale`) and `persistence`-decaying amplitude.
    ///
    /// Returns a value in `[-1.0, 1.0]`; zero octaves yields `0.0`.
    pub fn octave_noise(&self, octaves: u32, persistence: f64, scale: f64, x: f64, y: f64) -> f64 {
        let mut value = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = scale;
        let mut max_value = 0.0;

        for _ in 0..octaves {
            value += self.field.sample_2d(x * frequency, y * frequency) * amplitude;
            max_value += amplitude;

            amplitude *= persistence;
            frequency *= 2.0;
        }

        if max_value == 0.0 {
            return 0.0;
        }
        value / max_value
    }
}

/// Octave preset for one terrain signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Signal {
    /// Number of octaves.
    pub octaves: u32,
    /// Amplitude multiplier between octaves.
    pub persistence: f64,
    /// Base frequency.
    pub scale: f64,
    /// Offset along y separating this signal from the others.
    pub y_offset: f64,
}

impl Signal {
    /// Continental band used for biome selection.
    pub const BIOME: Self = Self::new(2, 0.5, 0.004, 1_000.5);
    /// Moisture used to refine biome bands.
    pub const MOISTURE: Self = Self::new(2, 0.5, 0.011, 1_500.5);
    /// Broad rolling terrain.
    pub const BASE_HEIGHT: Self = Self::new(4, 0.5, 0.012, 0.5);
    /// Fine surface roughness.
    pub const DETAIL: Self = Self::new(3, 0.5, 0.083, 100.5);
    /// Gate for mountain uplift.
    pub const MOUNTAIN_MASK: Self = Self::new(2, 0.5, 0.0055, 200.5);
    /// Cave carving mask, sampled in (column, elevation).
    pub const CAVE: Self = Self::new(3, 0.5, 0.091, 300.5);
    /// Tree presence.
    pub const VEGETATION: Self = Self::new(1, 0.5, 0.413, 400.5);
    /// Tree height variation.
    pub const TREE_HEIGHT: Self = Self::new(1, 0.5, 0.237, 500.5);
    /// Cactus presence.
    pub const CACTUS: Self = Self::new(1, 0.5, 0.531, 600.5);
    /// Cactus height variation.
    pub const CACTUS_HEIGHT: Self = Self::new(1, 0.5, 0.317, 650.5);
    /// Swamp pool presence.
    pub const POND: Self = Self::new(1, 0.5, 0.471, 700.5);

    /// Build a preset.
    pub const fn new(octaves: u32, persistence: f64, scale: f64, y_offset: f64) -> Self {
        Self {
            octaves,
            persistence,
            scale,
            y_offset,
        }
    }

    /// Evaluate this signal for a world column.
    pub fn sample(&self, sampler: &FractalSampler, x: f64) -> f64 {
        self.sample_at(sampler, x, 0.0)
    }

    /// Evaluate this signal at a 2D position.
    pub fn sample_at(&self, sampler: &FractalSampler, x: f64, y: f64) -> f64 {
        sampler.octave_noise(
            self.octaves,
            self.persistence,
            self.scale,
            x,
            y + self.y_offset,
        )
    }

    /// Evaluate and remap from `[-1, 1]` to `[0, 1]`.
    pub fn sample_unit(&self, sampler: &FractalSampler, x: f64) -> f64 {
        (self.sample(sampler, x) + 1.0) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_determinism() {
        let a = NoiseField::new(12345);
        let b = NoiseField::new(12345);

        for x in 0..20 {
            for y in 0..20 {
                let (fx, fy) = (x as f64 * 0.37, y as f64 * 0.53);
                assert_eq!(
                    a.sample_2d(fx, fy).to_bits(),
                    b.sample_2d(fx, fy).to_bits(),
                    "Noise not deterministic at ({}, {})",
                    fx,
                    fy
                );
            }
        }
    }

    #[test]
    fn test_noise_range() {
        let field = NoiseField::new(7);
        for x in 0..200 {
            for y in 0..50 {
                let val = field.sample_2d(x as f64 * 0.13 - 10.0, y as f64 * 0.29 - 5.0);
                assert!((-1.0..=1.0).contains(&val), "value {} out of range", val);
            }
        }
    }

    #[test]
    fn test_lattice_points_are_zero() {
        let field = NoiseField::new(99);
        for x in -5..5 {
            for y in -5..5 {
                assert_eq!(field.sample_2d(x as f64, y as f64), 0.0);
            }
        }
    }

    #[test]
    fn test_noise_is_periodic() {
        let field = NoiseField::new(3);
        let period = NOISE_PERIOD as f64;
        for i in 0..30 {
            let x = i as f64 * 0.71 + 0.1;
            let y = i as f64 * 0.17 + 0.3;
            let base = field.sample_2d(x, y);
            assert!((base - field.sample_2d(x + period, y)).abs() < 1e-9);
            assert!((base - field.sample_2d(x, y - period)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_noise_is_continuous() {
        let field = NoiseField::new(11);
        let step = 1e-4;
        let mut x = -3.0;
        while x < 3.0 {
            let a = field.sample_2d(x, 0.42);
            let b = field.sample_2d(x + step, 0.42);
            assert!((a - b).abs() < 0.01, "jump of {} near x={}", (a - b).abs(), x);
            x += 0.05;
        }
    }

    #[test]
    fn test_perlin_seed_uses_high_bits() {
        assert_ne!(perlin_seed(5), perlin_seed(5 | (1 << 40)));
        assert_eq!(perlin_seed(5), perlin_seed(5));
    }

    #[test]
    fn test_different_seeds_produce_different_noise() {
        let a = NoiseField::new(1);
        let b = NoiseField::new(2);

        let any_different = (0..400).any(|i| {
            let x = (i % 20) as f64 * 0.5 + 0.25;
            let y = (i / 20) as f64 * 0.5 + 0.25;
            (a.sample_2d(x, y) - b.sample_2d(x, y)).abs() > 0.001
        });
        assert!(any_different, "Different seeds should produce different noise");
    }

    #[test]
    fn test_octave_noise_normalised() {
        let sampler = FractalSampler::new(5);
        for octaves in 1..6 {
            for i in 0..100 {
                let v = sampler.octave_noise(octaves, 0.5, 0.05, i as f64 * 3.1, 17.5);
                assert!((-1.0..=1.0).contains(&v));
            }
        }
        assert_eq!(sampler.octave_noise(0, 0.5, 1.0, 3.3, 4.4), 0.0);
    }

    #[test]
    fn test_single_octave_matches_field() {
        let sampler = FractalSampler::new(8);
        let direct = sampler.field().sample_2d(0.1 * 12.3, 0.1 * 4.5);
        let fractal = sampler.octave_noise(1, 0.5, 0.1, 12.3, 4.5);
        assert_eq!(direct, fractal);
    }

    #[test]
    fn test_signal_offsets_decorrelate() {
        let sampler = FractalSampler::new(2024);
        let differing = (0..200)
            .filter(|&x| {
                let x = x as f64;
                (Signal::VEGETATION.sample(&sampler, x) - Signal::CACTUS.sample(&sampler, x))
                    .abs()
                    > 0.01
            })
            .count();
        assert!(differing > 150);
    }

    #[test]
    fn test_signal_unit_range() {
        let sampler = FractalSampler::new(77);
        for x in -100..100 {
            let v = Signal::TREE_HEIGHT.sample_unit(&sampler, x as f64);
            assert!((0.0..=1.0).contains(&v));
        }
    }
}
