//! Motion Accumulator
//!
//! Folds every per-tick motion contributor into one desired offset pair
//! for the base springs. Contributors are applied in a fixed order each
//! tick: state offset, movement bob, aim bob, noise jitter, then the
//! global force multiplier. Sway and shake bypass the accumulator and
//! are injected into their springs directly.
//!
//! The accumulator owns the bob and jitter clocks so they survive state
//! transitions; only a full rig reset rewinds them.

use glam::Vec3;

use crate::input::CharacterSample;
use crate::motion::bob::{BobCycle, sample_bob};
use crate::motion::jitter::NoiseJitter;
use crate::profile::{MotionProfile, MotionStateSettings};

/// One tick's summed desired offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AccumulatedMotion {
    pub position: Vec3,
    /// Euler offset in radians.
    pub rotation: Vec3,
}

/// Stateful per-tick motion aggregation.
#[derive(Debug, Clone)]
pub struct MotionAccumulator {
    bob: BobCycle,
    jitter: NoiseJitter,
    /// Blend factor for the aim bob contribution, in [0, 1].
    aim_headbob_mod: f32,
}

impl MotionAccumulator {
    pub fn new() -> Self {
        Self {
            bob: BobCycle::new(),
            jitter: NoiseJitter::new(),
            aim_headbob_mod: 1.0,
        }
    }

    /// Deterministic accumulator for tests and replays.
    pub fn with_seed(seed: u32) -> Self {
        Self {
            bob: BobCycle::new(),
            jitter: NoiseJitter::with_seed(seed, 0.0),
            aim_headbob_mod: 1.0,
        }
    }

    /// Sum all contributors for one fixed tick.
    ///
    /// `visualizing` switches movement bob from step-cycle driving to
    /// manual time advance so preview states animate while the
    /// character stands still.
    pub fn accumulate(
        &mut self,
        dt: f32,
        profile: &MotionProfile,
        state: &MotionStateSettings,
        sample: &CharacterSample,
        visualizing: bool,
    ) -> AccumulatedMotion {
        let mut acc = AccumulatedMotion::default();

        // Static state offset. Suppressed while reloading so the lowered
        // stance does not fight the reload animation.
        if let Some(offset) = &state.offset {
            if !sample.reloading {
                acc.position += offset.position;
                acc.rotation += offset.rotation;
            }
        }

        // Movement bob, phase driven by the controller's step cycle so
        // footfalls and camera dips stay in sync. Contributes only
        // while the phase is actually advancing; a stationary or
        // airborne character gets no bob, not a frozen wave sample.
        if let Some(bob) = &state.bob {
            if visualizing {
                self.bob.advance(dt, bob.speed);
            } else if sample.grounded && sample.moving {
                self.bob.set_cycle(sample.step_cycle);
            }
            if visualizing || (sample.grounded && sample.moving) {
                let (pos, rot) = sample_bob(bob, self.bob.phase());
                acc.position += pos;
                acc.rotation += rot;
            }
        }

        // Stationary aim bob, blended by the aim-headbob modifier.
        if sample.aiming {
            self.bob.advance_aim(dt, profile.aim_bob.speed);
            let (pos, rot) = sample_bob(&profile.aim_bob, self.bob.aim_phase());
            acc.position += pos * self.aim_headbob_mod;
            acc.rotation += rot * self.aim_headbob_mod;
        }

        // Perlin jitter. Aiming swaps in the quieter aim profile.
        self.jitter.advance(dt);
        let noise = if sample.aiming {
            Some(&profile.aim_noise)
        } else {
            state.noise.as_ref()
        };
        if let Some(noise) = noise {
            let (pos, rot) = self.jitter.sample(noise);
            acc.position += pos;
            acc.rotation += rot;
        }

        acc.position *= profile.force_multiplier;
        acc.rotation *= profile.force_multiplier;
        acc
    }

    /// Consume the footstep trigger raised by the bob cycle.
    pub fn take_step_trigger(&mut self) -> bool {
        self.bob.take_step_trigger()
    }

    /// Set the aim bob blend factor, clamped to [0, 1].
    pub fn set_aim_headbob_mod(&mut self, value: f32) {
        self.aim_headbob_mod = value.clamp(0.0, 1.0);
    }

    pub fn aim_headbob_mod(&self) -> f32 {
        self.aim_headbob_mod
    }

    /// Rewind the bob and jitter clocks.
    pub fn reset(&mut self) {
        self.bob.reset();
        self.jitter.reset();
    }
}

impl Default for MotionAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
