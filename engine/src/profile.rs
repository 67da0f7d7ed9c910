//! Motion Profile Configuration
//!
//! All per-state and global tuning for the camera rig, as plain data.
//! A profile is loaded once at startup (JSON on disk, or the built-in
//! defaults) and is read-only afterwards; the rig only ever holds a
//! shared reference to it.
//!
//! JSON is used for the same reason the asset files use it elsewhere:
//! profiles are authored and diffed by hand.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::motion::StateId;
use crate::spring::{MAX_STABLE_CONSTANT, SpringSettings};

// ============================================================================
// BUILDING BLOCKS
// ============================================================================

/// Cyclic bob wave parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BobSettings {
    /// Cycle frequency in cycles per second. Drives the phase in
    /// visualize/aim mode; gameplay bob is driven by the step cycle.
    pub speed: f32,
    /// Positional wave amplitude per axis (meters).
    pub position_amplitude: Vec3,
    /// Rotational wave amplitude per axis (radians).
    pub rotation_amplitude: Vec3,
    /// Phase offset applied before sampling the waves (radians).
    pub phase_offset: f32,
}

/// Static pose offset for a motion state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OffsetSettings {
    pub position: Vec3,
    /// Euler offset in radians.
    pub rotation: Vec3,
}

/// Perlin jitter parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseSettings {
    /// Noise field scroll speed.
    pub speed: f32,
    pub position_amplitude: Vec3,
    pub rotation_amplitude: Vec3,
}

/// One-shot force fired on each bob half-cycle (footstep thump).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepForce {
    pub position: Vec3,
    pub rotation: Vec3,
    /// Distribution divisor in (0, 1]; wide for footsteps.
    pub distribution: f32,
}

/// A force applied a fixed delay after being scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DelayedForce {
    pub position: Vec3,
    pub rotation: Vec3,
    /// Distribution divisor in (0, 1].
    pub distribution: f32,
    /// Seconds between scheduling and firing.
    pub delay: f32,
}

impl DelayedForce {
    /// A rotation-only kick, fired after `delay` seconds.
    pub fn rotation(rotation: Vec3, distribution: f32, delay: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation,
            distribution,
            delay,
        }
    }

    /// Scale both channels, keeping distribution and delay.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            position: self.position * factor,
            rotation: self.rotation * factor,
            ..*self
        }
    }
}

/// Spring constants for the base pose channels of one motion state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateSprings {
    pub position: SpringSettings,
    pub rotation: SpringSettings,
}

impl Default for StateSprings {
    fn default() -> Self {
        Self {
            position: SpringSettings::uniform(0.12, 0.25),
            rotation: SpringSettings::uniform(0.12, 0.3),
        }
    }
}

/// Shake tuning: duration, oscillation speed and per-axis amplitudes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShakeSettings {
    /// Total lifetime in seconds.
    pub duration: f32,
    /// Oscillation frequency in radians per second.
    pub speed: f32,
    pub position_amplitude: Vec3,
    pub rotation_amplitude: Vec3,
}

/// Sway tuning shared by all states.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwaySettings {
    /// Look-input sway scale per rotation axis.
    pub look_scale: Vec3,
    /// Magnitude clamp on the look sway force.
    pub max_look_sway: f32,
    /// Look sway multiplier applied while aiming.
    pub aim_multiplier: f32,
    /// Roll per unit of lateral velocity.
    pub strafe_rotation_scale: f32,
    /// Lateral position shift per unit of lateral velocity.
    pub strafe_position_scale: f32,
    /// Pitch dip per unit of downward velocity.
    pub fall_rotation_scale: f32,
    /// Floor clamp on the fall sway axis.
    pub max_fall_sway: f32,
    /// Distribution divisor for all sway force injections.
    pub distribution: f32,
}

// ============================================================================
// PER-STATE SETTINGS
// ============================================================================

/// Tuning for one discrete motion state. `None` disables a contributor
/// for that state entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionStateSettings {
    #[serde(default)]
    pub bob: Option<BobSettings>,
    #[serde(default)]
    pub offset: Option<OffsetSettings>,
    #[serde(default)]
    pub noise: Option<NoiseSettings>,
    #[serde(default)]
    pub step_force: Option<StepForce>,
    /// Delayed forces scheduled when this state is entered.
    #[serde(default)]
    pub enter_forces: Vec<DelayedForce>,
    /// Delayed forces scheduled when this state is left.
    #[serde(default)]
    pub exit_forces: Vec<DelayedForce>,
    #[serde(default)]
    pub springs: StateSprings,
}

impl Default for MotionStateSettings {
    fn default() -> Self {
        Self {
            bob: None,
            offset: None,
            noise: None,
            step_force: None,
            enter_forces: Vec::new(),
            exit_forces: Vec::new(),
            springs: StateSprings::default(),
        }
    }
}

// ============================================================================
// IMPACT FORCE PRESETS
// ============================================================================

/// Reaction forces for character events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactForces {
    /// Fired shortly after a jump starts.
    pub jump: DelayedForce,
    /// Base fall-impact force, scaled by impact speed.
    pub fall: DelayedForce,
    /// Fall-impact speed scale and cap on the resulting multiplier.
    pub fall_speed_scale: f32,
    pub fall_max_scale: f32,
    /// Base damage kick, scaled by hit magnitude and oriented along the
    /// hit direction.
    pub damage: DelayedForce,
}

impl Default for ImpactForces {
    fn default() -> Self {
        Self {
            jump: DelayedForce::rotation(Vec3::new(0.045, 0.0, 0.0), 0.6, 0.05),
            fall: DelayedForce {
                position: Vec3::new(0.0, -0.02, 0.0),
                rotation: Vec3::new(0.06, 0.0, 0.0),
                distribution: 0.5,
                delay: 0.0,
            },
            fall_speed_scale: 0.12,
            fall_max_scale: 3.0,
            damage: DelayedForce {
                position: Vec3::ZERO,
                rotation: Vec3::new(0.05, 0.05, 0.02),
                distribution: 0.35,
                delay: 0.0,
            },
        }
    }
}

// ============================================================================
// PROFILE
// ============================================================================

/// The complete read-only tuning set for one camera rig.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionProfile {
    pub idle: MotionStateSettings,
    pub walk: MotionStateSettings,
    pub run: MotionStateSettings,
    pub crouch: MotionStateSettings,
    pub prone: MotionStateSettings,

    /// Stationary bob used while aiming, mixed under the rig's
    /// aim-headbob modifier.
    pub aim_bob: BobSettings,
    /// Jitter profile that replaces the state noise while aiming.
    pub aim_noise: NoiseSettings,

    pub sway: SwaySettings,
    pub explosion_shake: ShakeSettings,
    pub impact: ImpactForces,

    /// Extra lerp pull for the recoil springs only.
    pub recoil_lerp_speed: f32,
    pub recoil_springs: StateSprings,
    /// Constants for the dedicated shake springs.
    pub shake_springs: StateSprings,

    /// Global multiplier applied to the accumulated offset before it is
    /// fed to the base springs.
    pub force_multiplier: f32,
}

impl MotionProfile {
    /// Settings for a given motion state.
    pub fn state(&self, id: StateId) -> &MotionStateSettings {
        match id {
            StateId::Idle => &self.idle,
            StateId::Walk => &self.walk,
            StateId::Run => &self.run,
            StateId::Crouch => &self.crouch,
            StateId::Prone => &self.prone,
        }
    }

    /// Parse and validate a profile from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ProfileError> {
        let profile: Self = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Check every tuning value a broken hand-edit could push out of
    /// range. Structural errors are caught by serde; this catches the
    /// values that would destabilize the springs at runtime.
    pub fn validate(&self) -> Result<(), ProfileError> {
        let states = [
            (StateId::Idle, &self.idle),
            (StateId::Walk, &self.walk),
            (StateId::Run, &self.run),
            (StateId::Crouch, &self.crouch),
            (StateId::Prone, &self.prone),
        ];
        for (id, state) in states {
            check_springs(&state.springs, &format!("{id:?} state"))?;
            if let Some(step) = &state.step_force {
                check_distribution(step.distribution, &format!("{id:?} step force"))?;
            }
            for force in state.enter_forces.iter().chain(&state.exit_forces) {
                check_distribution(force.distribution, &format!("{id:?} enter/exit force"))?;
            }
        }

        check_springs(&self.recoil_springs, "recoil")?;
        check_springs(&self.shake_springs, "shake")?;
        check_distribution(self.sway.distribution, "sway")?;
        for (force, what) in [
            (&self.impact.jump, "jump impact"),
            (&self.impact.fall, "fall impact"),
            (&self.impact.damage, "damage impact"),
        ] {
            check_distribution(force.distribution, what)?;
        }

        if self.recoil_lerp_speed < 0.0 {
            return Err(ProfileError::Invalid(format!(
                "recoil_lerp_speed {} is negative",
                self.recoil_lerp_speed
            )));
        }
        if self.explosion_shake.duration <= 0.0 {
            return Err(ProfileError::Invalid(format!(
                "explosion shake duration {} is not positive",
                self.explosion_shake.duration
            )));
        }
        if self.force_multiplier <= 0.0 {
            return Err(ProfileError::Invalid(format!(
                "force_multiplier {} is not positive",
                self.force_multiplier
            )));
        }
        Ok(())
    }

    /// Load a profile from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Write the profile as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ProfileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl Default for MotionProfile {
    fn default() -> Self {
        let walk_bob = BobSettings {
            speed: 1.6,
            position_amplitude: Vec3::new(0.035, 0.045, 0.0),
            rotation_amplitude: Vec3::new(0.012, 0.008, 0.01),
            phase_offset: 0.0,
        };
        let run_bob = BobSettings {
            speed: 2.2,
            position_amplitude: Vec3::new(0.06, 0.085, 0.0),
            rotation_amplitude: Vec3::new(0.025, 0.015, 0.02),
            phase_offset: 0.0,
        };
        let idle_noise = NoiseSettings {
            speed: 0.4,
            position_amplitude: Vec3::new(0.004, 0.004, 0.0),
            rotation_amplitude: Vec3::new(0.003, 0.003, 0.002),
        };

        Self {
            idle: MotionStateSettings {
                noise: Some(idle_noise),
                ..Default::default()
            },
            walk: MotionStateSettings {
                bob: Some(walk_bob),
                noise: Some(idle_noise),
                step_force: Some(StepForce {
                    position: Vec3::new(0.0, -0.012, 0.0),
                    rotation: Vec3::new(0.01, 0.0, 0.0),
                    distribution: 0.9,
                }),
                ..Default::default()
            },
            run: MotionStateSettings {
                bob: Some(run_bob),
                noise: Some(idle_noise),
                step_force: Some(StepForce {
                    position: Vec3::new(0.0, -0.025, 0.0),
                    rotation: Vec3::new(0.02, 0.0, 0.0),
                    distribution: 0.8,
                }),
                enter_forces: vec![DelayedForce::rotation(
                    Vec3::new(0.02, 0.0, 0.0),
                    0.7,
                    0.0,
                )],
                springs: StateSprings {
                    position: SpringSettings::uniform(0.16, 0.25),
                    rotation: SpringSettings::uniform(0.16, 0.3),
                },
                ..Default::default()
            },
            crouch: MotionStateSettings {
                bob: Some(BobSettings {
                    speed: 1.2,
                    position_amplitude: Vec3::new(0.02, 0.025, 0.0),
                    rotation_amplitude: Vec3::new(0.008, 0.005, 0.006),
                    phase_offset: 0.0,
                }),
                offset: Some(OffsetSettings {
                    position: Vec3::new(0.0, -0.45, 0.0),
                    rotation: Vec3::ZERO,
                }),
                noise: Some(idle_noise),
                enter_forces: vec![DelayedForce::rotation(
                    Vec3::new(0.03, 0.0, 0.0),
                    0.8,
                    0.0,
                )],
                exit_forces: vec![DelayedForce::rotation(
                    Vec3::new(-0.02, 0.0, 0.0),
                    0.8,
                    0.05,
                )],
                ..Default::default()
            },
            prone: MotionStateSettings {
                offset: Some(OffsetSettings {
                    position: Vec3::new(0.0, -1.2, 0.0),
                    rotation: Vec3::ZERO,
                }),
                noise: Some(idle_noise),
                enter_forces: vec![DelayedForce::rotation(
                    Vec3::new(0.06, 0.0, 0.01),
                    0.6,
                    0.0,
                )],
                exit_forces: vec![DelayedForce::rotation(
                    Vec3::new(-0.04, 0.0, 0.0),
                    0.7,
                    0.1,
                )],
                springs: StateSprings {
                    position: SpringSettings::uniform(0.08, 0.25),
                    rotation: SpringSettings::uniform(0.08, 0.3),
                },
                ..Default::default()
            },

            aim_bob: BobSettings {
                speed: 0.9,
                position_amplitude: Vec3::new(0.002, 0.003, 0.0),
                rotation_amplitude: Vec3::new(0.002, 0.001, 0.001),
                phase_offset: 0.0,
            },
            aim_noise: NoiseSettings {
                speed: 0.25,
                position_amplitude: Vec3::new(0.001, 0.001, 0.0),
                rotation_amplitude: Vec3::new(0.001, 0.001, 0.0005),
            },

            sway: SwaySettings {
                look_scale: Vec3::new(0.0012, 0.0012, 0.0006),
                max_look_sway: 0.08,
                aim_multiplier: 1.6,
                strafe_rotation_scale: 0.006,
                strafe_position_scale: 0.004,
                fall_rotation_scale: 0.008,
                max_fall_sway: 0.12,
                distribution: 1.0,
            },
            explosion_shake: ShakeSettings {
                duration: 0.65,
                speed: 34.0,
                position_amplitude: Vec3::new(0.05, 0.05, 0.02),
                rotation_amplitude: Vec3::new(0.04, 0.04, 0.03),
            },
            impact: ImpactForces::default(),

            recoil_lerp_speed: 24.0,
            recoil_springs: StateSprings {
                position: SpringSettings::uniform(0.2, 0.2),
                rotation: SpringSettings::uniform(0.2, 0.25),
            },
            shake_springs: StateSprings {
                position: SpringSettings::uniform(0.25, 0.2),
                rotation: SpringSettings::uniform(0.25, 0.2),
            },

            force_multiplier: 1.0,
        }
    }
}

// ============================================================================
// VALIDATION HELPERS
// ============================================================================

fn check_springs(springs: &StateSprings, what: &str) -> Result<(), ProfileError> {
    if !springs.position.is_stable() || !springs.rotation.is_stable() {
        return Err(ProfileError::Invalid(format!(
            "{what}: spring constants outside (0, {MAX_STABLE_CONSTANT}]"
        )));
    }
    Ok(())
}

fn check_distribution(value: f32, what: &str) -> Result<(), ProfileError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ProfileError::Invalid(format!(
            "{what}: distribution {value} outside (0, 1]"
        )))
    }
}

// ============================================================================
// ERROR TYPE
// ============================================================================

/// Errors that can occur while loading or saving a motion profile.
#[derive(Debug)]
pub enum ProfileError {
    /// Standard I/O error.
    Io(std::io::Error),
    /// JSON serialization/deserialization error.
    Json(serde_json::Error),
    /// Structurally valid profile with out-of-range tuning values.
    Invalid(String),
}

impl std::fmt::Display for ProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileError::Io(e) => write!(f, "IO error: {e}"),
            ProfileError::Json(e) => write!(f, "JSON error: {e}"),
            ProfileError::Invalid(reason) => write!(f, "invalid profile: {reason}"),
        }
    }
}

impl std::error::Error for ProfileError {}

impl From<std::io::Error> for ProfileError {
    fn from(e: std::io::Error) -> Self {
        ProfileError::Io(e)
    }
}

impl From<serde_json::Error> for ProfileError {
    fn from(e: serde_json::Error) -> Self {
        ProfileError::Json(e)
    }
}
