//! Shake Scheduler
//!
//! Timed oscillating disturbances (explosions, scripted rumbles). Each
//! shake is an independent instance: per-axis sine waves at the
//! profile's speed, with randomized phase and sign so repeated shakes
//! never look identical, under a linear decay envelope. Active shakes
//! are summed each tick and the result is fed to the dedicated shake
//! springs as a velocity impulse, so overlapping shakes stack and the
//! tail smooths out instead of cutting off.
//!
//! Finished instances are removed on the same tick their duration
//! elapses.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::profile::ShakeSettings;

/// One running shake.
#[derive(Debug, Clone)]
struct ShakeInstance {
    elapsed: f32,
    duration: f32,
    /// Oscillation frequency in radians per second.
    speed: f32,
    /// Overall magnitude (explosion falloff, host scale).
    scale: f32,
    position_amplitude: Vec3,
    rotation_amplitude: Vec3,
    /// Random per-axis phases, position then rotation.
    phases: [f32; 6],
    /// Random per-axis signs, position then rotation.
    signs: [f32; 6],
}

impl ShakeInstance {
    fn tick(&mut self, dt: f32) -> (Vec3, Vec3) {
        self.elapsed += dt;
        let decay = (1.0 - self.elapsed / self.duration).clamp(0.0, 1.0);
        let t = self.elapsed * self.speed;

        let axis = |index: usize| (t + self.phases[index]).sin() * self.signs[index];
        let position = self.position_amplitude
            * Vec3::new(axis(0), axis(1), axis(2))
            * decay
            * self.scale;
        let rotation = self.rotation_amplitude
            * Vec3::new(axis(3), axis(4), axis(5))
            * decay
            * self.scale;
        (position, rotation)
    }

    fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Owns and ticks all running shakes for one rig.
#[derive(Debug)]
pub struct ShakeScheduler {
    shakes: Vec<ShakeInstance>,
    rng: StdRng,
}

impl ShakeScheduler {
    pub fn new() -> Self {
        Self {
            shakes: Vec::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic scheduler for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            shakes: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Start a shake at the given magnitude scale.
    ///
    /// Non-positive duration or scale is a no-op.
    pub fn do_shake(&mut self, settings: &ShakeSettings, scale: f32) {
        if settings.duration <= 0.0 || scale <= 0.0 {
            return;
        }
        let mut phases = [0.0; 6];
        let mut signs = [0.0; 6];
        for i in 0..6 {
            phases[i] = self.rng.gen_range(0.0..TAU);
            signs[i] = if self.rng.r#gen::<bool>() { 1.0 } else { -1.0 };
        }
        self.shakes.push(ShakeInstance {
            elapsed: 0.0,
            duration: settings.duration,
            speed: settings.speed,
            scale,
            position_amplitude: settings.position_amplitude,
            rotation_amplitude: settings.rotation_amplitude,
            phases,
            signs,
        });
    }

    /// Start an explosion shake with quadratic distance falloff.
    ///
    /// Returns whether a shake was actually started; at or beyond the
    /// blast radius nothing happens.
    pub fn add_explosion(&mut self, settings: &ShakeSettings, distance: f32, radius: f32) -> bool {
        if radius <= 0.0 || distance >= radius {
            return false;
        }
        let falloff = 1.0 - (distance * distance / (radius * radius)).clamp(0.0, 1.0);
        if falloff <= 0.0 {
            return false;
        }
        self.do_shake(settings, falloff);
        true
    }

    /// Advance all shakes one tick and return the summed forces as
    /// (position, rotation). Finished shakes are dropped.
    pub fn update(&mut self, dt: f32) -> (Vec3, Vec3) {
        let mut position = Vec3::ZERO;
        let mut rotation = Vec3::ZERO;

        let mut i = 0;
        while i < self.shakes.len() {
            let (pos, rot) = self.shakes[i].tick(dt);
            position += pos;
            rotation += rot;
            if self.shakes[i].is_done() {
                self.shakes.swap_remove(i);
            } else {
                i += 1;
            }
        }
        (position, rotation)
    }

    /// Drop every running shake immediately.
    pub fn clear(&mut self) {
        self.shakes.clear();
    }

    /// Number of shakes currently running.
    pub fn active_count(&self) -> usize {
        self.shakes.len()
    }
}

impl Default for ShakeScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> ShakeSettings {
        ShakeSettings {
            duration: 0.5,
            speed: 30.0,
            position_amplitude: Vec3::new(0.05, 0.05, 0.02),
            rotation_amplitude: Vec3::new(0.04, 0.04, 0.03),
        }
    }

    const DT: f32 = 1.0 / 50.0;

    #[test]
    fn shake_produces_motion_then_expires() {
        let mut scheduler = ShakeScheduler::with_seed(1);
        scheduler.do_shake(&settings(), 1.0);
        assert_eq!(scheduler.active_count(), 1);

        let mut peak = 0.0f32;
        for _ in 0..25 {
            let (pos, _) = scheduler.update(DT);
            peak = peak.max(pos.length());
        }
        assert!(peak > 0.0);
        assert_eq!(scheduler.active_count(), 0);
    }

    #[test]
    fn expired_shake_contributes_nothing() {
        let mut scheduler = ShakeScheduler::with_seed(2);
        scheduler.do_shake(&settings(), 1.0);
        for _ in 0..25 {
            scheduler.update(DT);
        }

        let (pos, rot) = scheduler.update(DT);
        assert_eq!(pos, Vec3::ZERO);
        assert_eq!(rot, Vec3::ZERO);
    }

    #[test]
    fn decay_envelope_bounds_amplitude() {
        let mut scheduler = ShakeScheduler::with_seed(3);
        let s = settings();
        scheduler.do_shake(&s, 1.0);

        let mut elapsed = 0.0;
        while scheduler.active_count() > 0 {
            let (pos, _) = scheduler.update(DT);
            elapsed += DT;
            let envelope = (1.0 - elapsed / s.duration).clamp(0.0, 1.0);
            let bound = s.position_amplitude.length() * envelope + 1.0e-5;
            assert!(pos.length() <= bound, "amplitude exceeds decay envelope");
        }
    }

    #[test]
    fn overlapping_shakes_stack() {
        let mut scheduler = ShakeScheduler::with_seed(4);
        scheduler.do_shake(&settings(), 1.0);
        scheduler.do_shake(&settings(), 1.0);
        assert_eq!(scheduler.active_count(), 2);

        for _ in 0..25 {
            scheduler.update(DT);
        }
        assert_eq!(scheduler.active_count(), 0);
    }

    #[test]
    fn explosion_at_radius_is_noop() {
        let mut scheduler = ShakeScheduler::with_seed(5);
        assert!(!scheduler.add_explosion(&settings(), 10.0, 10.0));
        assert!(!scheduler.add_explosion(&settings(), 15.0, 10.0));
        assert_eq!(scheduler.active_count(), 0);
    }

    #[test]
    fn explosion_falloff_scales_with_distance() {
        let s = settings();

        let mut near = ShakeScheduler::with_seed(6);
        let mut far = ShakeScheduler::with_seed(6);
        assert!(near.add_explosion(&s, 1.0, 10.0));
        assert!(far.add_explosion(&s, 9.0, 10.0));

        // Same seed, same waveform; only the falloff scale differs.
        let mut near_peak = 0.0f32;
        let mut far_peak = 0.0f32;
        for _ in 0..25 {
            near_peak = near_peak.max(near.update(DT).0.length());
            far_peak = far_peak.max(far.update(DT).0.length());
        }
        assert!(near_peak > far_peak);
    }

    #[test]
    fn zero_scale_is_noop() {
        let mut scheduler = ShakeScheduler::with_seed(7);
        scheduler.do_shake(&settings(), 0.0);
        assert_eq!(scheduler.active_count(), 0);
    }

    #[test]
    fn clear_drops_all_shakes() {
        let mut scheduler = ShakeScheduler::with_seed(8);
        scheduler.do_shake(&settings(), 1.0);
        scheduler.do_shake(&settings(), 0.5);
        scheduler.clear();
        assert_eq!(scheduler.active_count(), 0);

        let (pos, rot) = scheduler.update(DT);
        assert_eq!(pos, Vec3::ZERO);
        assert_eq!(rot, Vec3::ZERO);
    }
}
