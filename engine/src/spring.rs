//! Damped Spring Integrator
//!
//! The smoothing primitive every camera offset passes through. A spring
//! tracks a 3-axis value toward a target with per-axis stiffness and
//! damping, so target jumps (state changes, recoil kicks, shakes) turn
//! into continuous motion instead of visual snaps.
//!
//! # Integration model
//!
//! Per axis, normalized to a 50 Hz reference tick so behavior does not
//! drift with the host's fixed timestep:
//!
//! ```text
//! steps     = dt * 50.0
//! velocity += (target - value) * stiffness * steps
//! velocity *= damping ^ steps
//! value    += velocity * steps
//! ```
//!
//! `damping` is a velocity retention factor in (0, 1): lower values
//! bleed velocity faster. Within the documented valid range
//! (stiffness and damping both in (0, 0.4], dt <= 1/30) the discrete
//! system has real sub-unit eigenvalues, so convergence is monotone
//! with no visible overshoot.
//!
//! # Modes
//!
//! - [`SpringMode::Override`]: the spring value replaces a transform
//!   channel wholesale. Injected forces become the new target (the
//!   per-tick accumulated pose).
//! - [`SpringMode::Additive`]: the spring value is layered on top of the
//!   base transform and relaxes back toward zero. Injected forces are
//!   velocity impulses (recoil, shake, queued forces).
//!
//! The mode is fixed at construction and never changes.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Reference fixed tick rate the spring constants are tuned against.
pub const REFERENCE_TICK_RATE: f32 = 50.0;

/// Upper bound of the documented stable range for stiffness and damping.
pub const MAX_STABLE_CONSTANT: f32 = 0.4;

/// Smallest accepted force distribution divisor. Guards the division;
/// inputs below this are treated as maximally sharp.
pub const MIN_DISTRIBUTION: f32 = 1.0e-3;

/// Delta time clamp bounds, matching the rest of the engine.
const MIN_DT: f32 = 0.0001;
const MAX_DT: f32 = 0.1;

/// Per-axis spring constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringSettings {
    /// Pull strength toward the target, per axis.
    pub stiffness: Vec3,
    /// Velocity retention factor per reference tick, per axis (0..1).
    pub damping: Vec3,
}

impl SpringSettings {
    /// Create settings with per-axis constants.
    pub fn new(stiffness: Vec3, damping: Vec3) -> Self {
        Self { stiffness, damping }
    }

    /// Create settings with the same constants on all three axes.
    pub fn uniform(stiffness: f32, damping: f32) -> Self {
        Self {
            stiffness: Vec3::splat(stiffness),
            damping: Vec3::splat(damping),
        }
    }

    /// Check whether all constants lie in the documented stable range.
    pub fn is_stable(&self) -> bool {
        let in_range = |v: Vec3| {
            v.min_element() > 0.0 && v.max_element() <= MAX_STABLE_CONSTANT
        };
        in_range(self.stiffness) && in_range(self.damping)
    }
}

impl Default for SpringSettings {
    fn default() -> Self {
        Self::uniform(0.12, 0.25)
    }
}

/// How a spring's value is applied to the camera transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpringMode {
    /// Value replaces the channel; forces set the target.
    Override,
    /// Value is added on top; forces are velocity impulses, target stays
    /// at rest so the spring relaxes back to zero.
    Additive,
}

/// A 3-axis damped spring with pending force injection.
///
/// `value` and `velocity` are continuous physical quantities: only
/// [`Spring::tick`] advances them and only [`Spring::reset`] clears
/// them. Re-tuning via [`Spring::adjust`] never touches them, so state
/// transitions stay smooth.
#[derive(Debug, Clone)]
pub struct Spring {
    mode: SpringMode,
    settings: SpringSettings,
    value: Vec3,
    velocity: Vec3,
    target: Vec3,
    /// Forces accumulated since the last tick, already distribution-scaled.
    pending: Vec3,
    pending_dirty: bool,
    /// Extra value-toward-target pull used only by recoil springs.
    lerp_speed: Option<f32>,
}

impl Spring {
    /// Create an override-mode spring (base pose channels).
    pub fn overriding(settings: SpringSettings) -> Self {
        Self::with_mode(SpringMode::Override, settings)
    }

    /// Create an additive-mode spring (force/shake channels).
    pub fn additive(settings: SpringSettings) -> Self {
        Self::with_mode(SpringMode::Additive, settings)
    }

    /// Create an additive-mode spring with an extra lerp-speed pull.
    ///
    /// Only the recoil springs are built this way; the asymmetry is
    /// inherited from the original tuning and kept intentionally.
    pub fn additive_with_lerp(settings: SpringSettings, lerp_speed: f32) -> Self {
        let mut spring = Self::with_mode(SpringMode::Additive, settings);
        spring.lerp_speed = Some(lerp_speed.max(0.0));
        spring
    }

    fn with_mode(mode: SpringMode, settings: SpringSettings) -> Self {
        Self {
            mode,
            settings,
            value: Vec3::ZERO,
            velocity: Vec3::ZERO,
            target: Vec3::ZERO,
            pending: Vec3::ZERO,
            pending_dirty: false,
            lerp_speed: None,
        }
    }

    /// The spring's application mode, fixed at construction.
    pub fn mode(&self) -> SpringMode {
        self.mode
    }

    /// Current smoothed value.
    pub fn value(&self) -> Vec3 {
        self.value
    }

    /// Current velocity.
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Current target.
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Active spring constants.
    pub fn settings(&self) -> SpringSettings {
        self.settings
    }

    /// Hot-swap the spring constants without resetting value/velocity.
    ///
    /// Used when the active motion state changes; only the convergence
    /// rate of subsequent ticks changes, never the current state.
    pub fn adjust(&mut self, settings: SpringSettings) {
        self.settings = settings;
    }

    /// Inject a force, scaled by its distribution divisor.
    ///
    /// `distribution` is expected in (0, 1]; larger values spread the
    /// force wider and weaken its immediate effect (footsteps), smaller
    /// values sharpen it (recoil). The force lands on the next tick:
    /// override springs fold the pending sum into the target, additive
    /// springs take it as a velocity impulse.
    pub fn add_force(&mut self, force: Vec3, distribution: f32) {
        self.pending += force / distribution.max(MIN_DISTRIBUTION);
        self.pending_dirty = true;
    }

    /// Advance one fixed timestep.
    pub fn tick(&mut self, dt: f32) {
        let dt = dt.clamp(MIN_DT, MAX_DT);

        if self.pending_dirty {
            match self.mode {
                SpringMode::Override => self.target = self.pending,
                SpringMode::Additive => self.velocity += self.pending,
            }
            self.pending = Vec3::ZERO;
            self.pending_dirty = false;
        }

        let steps = dt * REFERENCE_TICK_RATE;
        let retention = Vec3::new(
            self.settings.damping.x.powf(steps),
            self.settings.damping.y.powf(steps),
            self.settings.damping.z.powf(steps),
        );

        self.velocity += (self.target - self.value) * self.settings.stiffness * steps;
        self.velocity *= retention;
        self.value += self.velocity * steps;

        if let Some(lerp_speed) = self.lerp_speed {
            let t = (lerp_speed * dt).clamp(0.0, 1.0);
            self.value = self.value.lerp(self.target, t);
        }
    }

    /// Zero value, velocity, target and any pending forces immediately.
    ///
    /// No interpolation; used on respawn/death.
    pub fn reset(&mut self) {
        self.value = Vec3::ZERO;
        self.velocity = Vec3::ZERO;
        self.target = Vec3::ZERO;
        self.pending = Vec3::ZERO;
        self.pending_dirty = false;
    }

    /// Whether the spring has effectively settled at its target.
    pub fn is_at_rest(&self, epsilon: f32) -> bool {
        (self.target - self.value).length() < epsilon && self.velocity.length() < epsilon
    }
}
