//! Bob Cycle
//!
//! Phase bookkeeping for movement and aim bob. Movement bob is driven
//! by the character controller's normalized step cycle while grounded
//! and moving, or advanced manually in visualize mode; aim bob runs an
//! independent phase that only advances while aiming.
//!
//! Offsets are per-axis cosine waves: X/Z at the cycle frequency, Y at
//! twice the frequency (two vertical dips per stride), shifted by the
//! profile's phase offset. Phases wrap modulo 2π.
//!
//! Footstep forces fire exactly once per half-cycle crossing, detected
//! on the unwrapped phase so step-cycle wrap-around cannot double-fire
//! or skip a step.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::profile::BobSettings;

/// Movement/aim bob phase state.
#[derive(Debug, Clone, Default)]
pub struct BobCycle {
    /// Unwrapped movement phase in radians, monotonically increasing.
    total: f32,
    /// Step cycle value seen last tick, for forward-delta unwrapping.
    last_cycle: f32,
    /// Half-cycle count at the last step-force check.
    last_half_cycle: u32,
    /// Whether a half-cycle boundary was crossed since the last take.
    step_pending: bool,
    /// Independent aim bob phase in radians.
    aim_total: f32,
}

impl BobCycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current movement bob phase in radians, wrapped to [0, 2π).
    pub fn phase(&self) -> f32 {
        self.total.rem_euclid(TAU)
    }

    /// Current aim bob phase in radians, wrapped to [0, 2π).
    pub fn aim_phase(&self) -> f32 {
        self.aim_total.rem_euclid(TAU)
    }

    /// Drive the movement phase from the controller's normalized step
    /// cycle in [0, 1). Wrap-around is treated as forward progress.
    pub fn set_cycle(&mut self, step_cycle: f32) {
        let cycle = step_cycle.rem_euclid(1.0);
        let delta = (cycle - self.last_cycle).rem_euclid(1.0);
        self.last_cycle = cycle;
        self.advance_by(delta * TAU);
    }

    /// Manually advance the movement phase (visualize mode).
    ///
    /// `speed` is in cycles per second.
    pub fn advance(&mut self, dt: f32, speed: f32) {
        self.advance_by(dt * speed * TAU);
    }

    /// Advance the aim bob phase; call only while aiming.
    pub fn advance_aim(&mut self, dt: f32, speed: f32) {
        self.aim_total = (self.aim_total + dt * speed * TAU).rem_euclid(TAU * 1024.0);
    }

    fn advance_by(&mut self, delta: f32) {
        self.total += delta.max(0.0);
        let half_cycle = (self.total / PI) as u32;
        if half_cycle != self.last_half_cycle {
            self.last_half_cycle = half_cycle;
            self.step_pending = true;
        }
        // Keep the unwrapped phase bounded over long sessions.
        if self.total > TAU * 1024.0 {
            self.total -= TAU * 1024.0;
            self.last_half_cycle = (self.total / PI) as u32;
        }
    }

    /// Consume the step trigger. True at most once per half-cycle.
    pub fn take_step_trigger(&mut self) -> bool {
        std::mem::take(&mut self.step_pending)
    }

    /// Zero all phase state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Sample a bob profile at a phase, returning (position, rotation).
pub fn sample_bob(settings: &BobSettings, phase: f32) -> (Vec3, Vec3) {
    let p = phase + settings.phase_offset;
    // Lateral axes at stride frequency, vertical at double.
    let position_wave = Vec3::new(p.cos(), (2.0 * p).cos(), p.cos());
    // Pitch nods twice per stride, yaw/roll follow the stride.
    let rotation_wave = Vec3::new((2.0 * p).cos(), p.cos(), p.cos());
    (
        settings.position_amplitude * position_wave,
        settings.rotation_amplitude * rotation_wave,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> BobSettings {
        BobSettings {
            speed: 1.0,
            position_amplitude: Vec3::new(0.04, 0.05, 0.0),
            rotation_amplitude: Vec3::new(0.01, 0.008, 0.006),
            phase_offset: 0.0,
        }
    }

    #[test]
    fn phase_wraps_modulo_tau() {
        let mut bob = BobCycle::new();
        bob.advance(10.0, 1.0); // ten full cycles
        assert!(bob.phase() >= 0.0 && bob.phase() < TAU);
    }

    #[test]
    fn set_cycle_tracks_forward_progress() {
        let mut bob = BobCycle::new();
        bob.set_cycle(0.25);
        assert!((bob.phase() - 0.25 * TAU).abs() < 1.0e-5);

        bob.set_cycle(0.5);
        assert!((bob.phase() - 0.5 * TAU).abs() < 1.0e-5);
    }

    #[test]
    fn set_cycle_wraparound_is_forward() {
        let mut bob = BobCycle::new();
        bob.set_cycle(0.9);
        let before = bob.phase();

        // 0.9 -> 0.1 is a 0.2-cycle step forward, not a jump backwards.
        bob.set_cycle(0.1);
        let after = bob.phase();
        let delta = (after - before).rem_euclid(TAU);
        assert!((delta - 0.2 * TAU).abs() < 1.0e-4);
    }

    #[test]
    fn step_fires_once_per_half_cycle() {
        let mut bob = BobCycle::new();
        let mut steps = 0;

        // Just past two full cycles in small increments: four
        // half-cycle crossings (the margin keeps the last crossing off
        // a float boundary).
        for i in 1..=210 {
            bob.set_cycle(i as f32 * 0.01);
            if bob.take_step_trigger() {
                steps += 1;
            }
        }
        assert_eq!(steps, 4);
    }

    #[test]
    fn step_trigger_is_consumed() {
        let mut bob = BobCycle::new();
        bob.set_cycle(0.6); // crosses π
        assert!(bob.take_step_trigger());
        assert!(!bob.take_step_trigger());
    }

    #[test]
    fn aim_phase_is_independent() {
        let mut bob = BobCycle::new();
        bob.advance_aim(0.25, 1.0);
        assert!(bob.aim_phase() > 0.0);
        assert_eq!(bob.phase(), 0.0);
    }

    #[test]
    fn sample_at_zero_phase_is_peak_amplitude() {
        let (pos, rot) = sample_bob(&settings(), 0.0);
        // cos(0) = 1 on every wave.
        assert_eq!(pos, settings().position_amplitude);
        assert_eq!(rot, settings().rotation_amplitude);
    }

    #[test]
    fn vertical_runs_at_double_frequency() {
        let s = settings();
        // Half a stride: lateral wave at cos(π) = -1, vertical back at
        // cos(2π) = 1.
        let (pos, _) = sample_bob(&s, PI);
        assert!((pos.x + s.position_amplitude.x).abs() < 1.0e-5);
        assert!((pos.y - s.position_amplitude.y).abs() < 1.0e-5);
    }

    #[test]
    fn phase_offset_shifts_the_wave() {
        let mut s = settings();
        s.phase_offset = PI;
        let (pos, _) = sample_bob(&s, 0.0);
        assert!((pos.x + s.position_amplitude.x).abs() < 1.0e-5);
    }

    #[test]
    fn reset_clears_phases() {
        let mut bob = BobCycle::new();
        bob.set_cycle(0.7);
        bob.advance_aim(1.0, 2.0);
        bob.reset();

        assert_eq!(bob.phase(), 0.0);
        assert_eq!(bob.aim_phase(), 0.0);
        assert!(!bob.take_step_trigger());
    }
}
