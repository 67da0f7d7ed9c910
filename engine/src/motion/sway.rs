//! Camera Sway
//!
//! Reactive offsets derived from look input and character velocity.
//! Sway is never written into the accumulated pose directly: each
//! component is emitted as its own spring force so it still passes
//! through the base springs' smoothing.
//!
//! Three components:
//! - Look sway: mouse delta scaled per axis, magnitude-clamped, and
//!   amplified while aiming (magnified optics magnify motion).
//! - Strafe sway: roll and lateral shift from local sideways velocity.
//! - Fall sway: pitch dip from downward velocity, floor-clamped so
//!   terminal-velocity falls do not fold the camera over.

use glam::{Vec2, Vec3};

use crate::profile::SwaySettings;

/// Sway forces for one tick, one entry per injection.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SwayForces {
    /// Rotation force from look input.
    pub look_rotation: Vec3,
    /// Roll from lateral movement.
    pub strafe_rotation: Vec3,
    /// Lateral position shift from movement.
    pub strafe_position: Vec3,
    /// Pitch dip while falling.
    pub fall_rotation: Vec3,
}

/// Compute this tick's sway forces.
///
/// `look_delta` is the raw look input for the tick; `local_velocity` is
/// the character velocity in its own frame (+X right, +Y up, -Z
/// forward).
pub fn compute_sway(
    settings: &SwaySettings,
    look_delta: Vec2,
    local_velocity: Vec3,
    aiming: bool,
) -> SwayForces {
    // Pitch follows vertical look, yaw and roll follow horizontal.
    let mut look = Vec3::new(look_delta.y, look_delta.x, look_delta.x) * settings.look_scale;
    look = look.clamp_length_max(settings.max_look_sway);
    if aiming {
        look *= settings.aim_multiplier;
    }

    let lateral = local_velocity.x;
    let strafe_rotation = Vec3::new(0.0, 0.0, -lateral * settings.strafe_rotation_scale);
    let strafe_position = Vec3::new(lateral * settings.strafe_position_scale, 0.0, 0.0);

    // Only downward velocity contributes; the floor clamp bounds the
    // dip on the pitch axis.
    let fall_speed = (-local_velocity.y).max(0.0);
    let dip = (-fall_speed * settings.fall_rotation_scale).max(-settings.max_fall_sway);
    let fall_rotation = Vec3::new(dip, 0.0, 0.0);

    SwayForces {
        look_rotation: look,
        strafe_rotation,
        strafe_position,
        fall_rotation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> SwaySettings {
        SwaySettings {
            look_scale: Vec3::new(0.002, 0.002, 0.001),
            max_look_sway: 0.05,
            aim_multiplier: 2.0,
            strafe_rotation_scale: 0.01,
            strafe_position_scale: 0.005,
            fall_rotation_scale: 0.01,
            max_fall_sway: 0.1,
            distribution: 1.0,
        }
    }

    #[test]
    fn no_input_no_sway() {
        let sway = compute_sway(&settings(), Vec2::ZERO, Vec3::ZERO, false);
        assert_eq!(sway, SwayForces::default());
    }

    #[test]
    fn look_sway_follows_input() {
        let sway = compute_sway(&settings(), Vec2::new(5.0, 0.0), Vec3::ZERO, false);
        assert!(sway.look_rotation.y > 0.0); // yaw from horizontal look
        assert!(sway.look_rotation.z > 0.0); // roll from horizontal look
        assert_eq!(sway.look_rotation.x, 0.0);
    }

    #[test]
    fn look_sway_is_clamped() {
        let sway = compute_sway(&settings(), Vec2::new(1.0e5, 1.0e5), Vec3::ZERO, false);
        assert!(sway.look_rotation.length() <= settings().max_look_sway + 1.0e-5);
    }

    #[test]
    fn aiming_amplifies_look_sway() {
        let input = Vec2::new(3.0, 1.0);
        let hip = compute_sway(&settings(), input, Vec3::ZERO, false);
        let aim = compute_sway(&settings(), input, Vec3::ZERO, true);
        assert!(aim.look_rotation.length() > hip.look_rotation.length());
    }

    #[test]
    fn aim_multiplier_applies_after_clamp() {
        // A clamped look sway can exceed the clamp while aiming.
        let sway = compute_sway(&settings(), Vec2::new(1.0e5, 0.0), Vec3::ZERO, true);
        assert!(sway.look_rotation.length() > settings().max_look_sway);
    }

    #[test]
    fn strafe_rolls_against_movement() {
        let sway = compute_sway(&settings(), Vec2::ZERO, Vec3::new(4.0, 0.0, 0.0), false);
        assert!(sway.strafe_rotation.z < 0.0);
        assert!(sway.strafe_position.x > 0.0);

        let sway = compute_sway(&settings(), Vec2::ZERO, Vec3::new(-4.0, 0.0, 0.0), false);
        assert!(sway.strafe_rotation.z > 0.0);
    }

    #[test]
    fn fall_sway_only_from_downward_velocity() {
        let rising = compute_sway(&settings(), Vec2::ZERO, Vec3::new(0.0, 6.0, 0.0), false);
        assert_eq!(rising.fall_rotation, Vec3::ZERO);

        let falling = compute_sway(&settings(), Vec2::ZERO, Vec3::new(0.0, -6.0, 0.0), false);
        assert!(falling.fall_rotation.x < 0.0);
    }

    #[test]
    fn fall_sway_is_floor_clamped() {
        let terminal = compute_sway(
            &settings(),
            Vec2::ZERO,
            Vec3::new(0.0, -1.0e4, 0.0),
            false,
        );
        assert!((terminal.fall_rotation.x + settings().max_fall_sway).abs() < 1.0e-6);
    }
}
