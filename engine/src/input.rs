//! Character Sample
//!
//! Snapshot of the character controller state the rig reads each fixed
//! tick. The rig never reaches into the controller; the host fills one
//! of these per tick and hands it in, which keeps the simulation
//! headless and trivially scriptable in tests.

use glam::{Vec2, Vec3};

/// Per-tick character controller snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CharacterSample {
    /// Raw look input for this tick (x = yaw, y = pitch).
    pub look_delta: Vec2,
    /// Velocity in the character's local frame (+X right, +Y up).
    pub local_velocity: Vec3,
    /// Normalized stride progress in [0, 1), wrapping each stride.
    pub step_cycle: f32,
    pub grounded: bool,
    pub moving: bool,
    pub aiming: bool,
    pub running: bool,
    pub crouching: bool,
    pub prone: bool,
    pub reloading: bool,
}
