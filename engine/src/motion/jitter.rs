//! Perlin Noise Jitter
//!
//! Low-frequency organic drift layered under everything else so a
//! perfectly still camera never looks frozen. Each axis samples a 1D
//! slice of a Perlin field at its own lane offset (`jitter`,
//! `jitter + 1`, `jitter + 2`, ...), scrolled by elapsed time times the
//! profile's noise speed. The base offset is randomized per rig so two
//! rigs never jitter in sync.

use glam::Vec3;
use noise::{NoiseFn, Perlin};
use rand::Rng;

use crate::profile::NoiseSettings;

/// Per-rig Perlin jitter sampler.
#[derive(Debug, Clone)]
pub struct NoiseJitter {
    perlin: Perlin,
    /// Random per-rig lane offset.
    offset: f64,
    /// Elapsed simulation time in seconds.
    elapsed: f64,
}

impl NoiseJitter {
    /// Create a jitter source with a random lane offset.
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        Self::with_seed(rng.r#gen::<u32>(), rng.gen_range(0.0..256.0))
    }

    /// Create a deterministic jitter source (tests, replays).
    pub fn with_seed(seed: u32, offset: f64) -> Self {
        Self {
            perlin: Perlin::new(seed),
            offset,
            elapsed: 0.0,
        }
    }

    /// Advance the noise clock one fixed step.
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += f64::from(dt);
    }

    /// Sample the jitter offsets, returning (position, rotation).
    pub fn sample(&self, settings: &NoiseSettings) -> (Vec3, Vec3) {
        let t = self.elapsed * f64::from(settings.speed);
        let lane = |index: f64| self.perlin.get([t, self.offset + index]) as f32;

        let position = settings.position_amplitude * Vec3::new(lane(0.0), lane(1.0), lane(2.0));
        let rotation = settings.rotation_amplitude * Vec3::new(lane(3.0), lane(4.0), lane(5.0));
        (position, rotation)
    }

    /// Restart the noise clock.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

impl Default for NoiseJitter {
    fn default() -> Self {
        Self::new()
    }
}
