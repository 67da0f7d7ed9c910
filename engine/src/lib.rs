//! Springcam Engine Library
//!
//! A host-agnostic first-person camera motion simulation. Bob, sway,
//! noise jitter, recoil, delayed forces and shakes are blended through
//! critically-damped springs into a single smoothed position/rotation
//! offset that a rendering layer applies on top of the camera transform.
//!
//! The crate owns no loop of its own: the host calls
//! [`rig::CameraRig::tick_fixed`] at a fixed rate (physics step) and
//! [`rig::CameraRig::tick_variable`] at the presentation rate, then reads
//! [`rig::CameraRig::current_offset`].
//!
//! # Modules
//!
//! - [`spring`] - 3-axis damped spring integrator with force injection
//! - [`profile`] - read-only motion profile configuration (JSON)
//! - [`motion`] - per-tick offset aggregation: bob, sway, jitter, states
//! - [`shake`] - time-bounded decaying shake instances
//! - [`forces`] - delayed force queue
//! - [`rig`] - the owning camera rig simulation
//!
//! # Example
//!
//! ```ignore
//! use springcam_engine::prelude::*;
//! use std::sync::Arc;
//!
//! let profile = Arc::new(MotionProfile::default());
//! let mut rig = CameraRig::new(profile);
//!
//! // Fixed step (e.g. 50 Hz):
//! let mut sample = CharacterSample::default();
//! sample.moving = true;
//! sample.grounded = true;
//! rig.tick_fixed(1.0 / 50.0, &sample);
//!
//! // Presentation step:
//! let offset = rig.tick_variable(1.0 / 144.0);
//! camera_position += offset.position;
//! ```

pub mod events;
pub mod forces;
pub mod input;
pub mod motion;
pub mod profile;
pub mod rig;
pub mod shake;
pub mod spring;

// Re-export the types a host loop typically needs.
pub use events::{CharacterEvent, ExplosionEvent};
pub use input::CharacterSample;
pub use profile::{MotionProfile, ProfileError};
pub use rig::{CameraOffset, CameraRig};
pub use spring::{Spring, SpringMode, SpringSettings};

/// Convenience imports for host code.
pub mod prelude {
    pub use crate::events::{CharacterEvent, ExplosionEvent};
    pub use crate::forces::DelayedForceQueue;
    pub use crate::input::CharacterSample;
    pub use crate::motion::StateId;
    pub use crate::profile::{DelayedForce, MotionProfile, ProfileError, ShakeSettings};
    pub use crate::rig::{CameraOffset, CameraRig};
    pub use crate::spring::{Spring, SpringMode, SpringSettings};
}
