//! Character Events
//!
//! One-shot gameplay events the host forwards to the rig. Typed enums
//! instead of a string/event-bus indirection: the compiler enumerates
//! every reaction the rig must have.

use glam::Vec3;

/// Events that trigger an impact reaction on the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CharacterEvent {
    /// The character left the ground under its own power.
    Jump,
    /// The character landed. `speed` is the downward impact speed in
    /// meters per second.
    FallImpact { speed: f32 },
    /// The character took a hit. `direction` points from the hit source
    /// toward the character, in the character's local frame.
    Damage { direction: Vec3, magnitude: f32 },
    /// The character respawned; all transient camera motion is dropped.
    Respawn,
}

/// An explosion near the character, shaking the camera with distance
/// falloff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplosionEvent {
    /// Distance from the character to the blast center, in meters.
    pub distance: f32,
    /// Blast radius in meters. At or beyond this distance the shake is
    /// a no-op.
    pub radius: f32,
}
