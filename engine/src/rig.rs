//! Camera Rig
//!
//! The top-level simulation object. One rig owns the six springs (base
//! position/rotation in override mode, recoil and shake pairs in
//! additive mode), the motion state machine, the accumulator, the shake
//! scheduler and the delayed-force queue, and wires them together into
//! the fixed-tick pipeline:
//!
//! 1. advance the clock, fire due queued forces into the recoil springs
//! 2. evaluate the state machine; on a transition, schedule exit/enter
//!    forces and re-tune the base springs (state is never reset)
//! 3. accumulate bob/offset/noise into the base spring targets
//! 4. inject sway forces into the base springs
//! 5. feed the summed shake output to the shake springs
//! 6. integrate all six springs
//!
//! The variable-rate update only checks queued-force due times and
//! reads the smoothed offset back; all mutation of spring state happens
//! in the fixed update so results are framerate independent.
//!
//! The profile is an injected shared reference. A rig without a profile
//! is inert: it logs a warning once and skips every tick.

use std::sync::Arc;

use glam::Vec3;

use crate::events::{CharacterEvent, ExplosionEvent};
use crate::forces::DelayedForceQueue;
use crate::input::CharacterSample;
use crate::motion::{MotionAccumulator, MotionStateMachine, StateId};
use crate::motion::sway::compute_sway;
use crate::profile::{DelayedForce, MotionProfile, ShakeSettings};
use crate::shake::ShakeScheduler;
use crate::spring::{Spring, SpringSettings};

// ============================================================================
// OUTPUT
// ============================================================================

/// The rig's smoothed output for one frame. Position in meters,
/// rotation as Euler radians; the host applies both on top of the
/// camera's gameplay transform.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraOffset {
    pub position: Vec3,
    pub rotation: Vec3,
}

// ============================================================================
// RIG
// ============================================================================

/// Spring-smoothed first-person camera motion simulation.
pub struct CameraRig {
    profile: Option<Arc<MotionProfile>>,

    base_position: Spring,
    base_rotation: Spring,
    recoil_position: Spring,
    recoil_rotation: Spring,
    shake_position: Spring,
    shake_rotation: Spring,

    state_machine: MotionStateMachine,
    accumulator: MotionAccumulator,
    shakes: ShakeScheduler,
    queued: DelayedForceQueue,

    physics_enabled: bool,
    missing_profile_logged: bool,
}

impl CameraRig {
    /// Create a rig with the given tuning profile.
    pub fn new(profile: Arc<MotionProfile>) -> Self {
        let mut rig = Self::empty();
        rig.set_profile(profile);
        rig
    }

    /// Create a rig with no profile. Inert until [`Self::set_profile`]
    /// is called.
    pub fn empty() -> Self {
        Self {
            profile: None,
            base_position: Spring::overriding(SpringSettings::default()),
            base_rotation: Spring::overriding(SpringSettings::default()),
            recoil_position: Spring::additive(SpringSettings::default()),
            recoil_rotation: Spring::additive(SpringSettings::default()),
            shake_position: Spring::additive(SpringSettings::default()),
            shake_rotation: Spring::additive(SpringSettings::default()),
            state_machine: MotionStateMachine::new(),
            accumulator: MotionAccumulator::new(),
            shakes: ShakeScheduler::new(),
            queued: DelayedForceQueue::new(),
            physics_enabled: true,
            missing_profile_logged: false,
        }
    }

    /// Deterministic rig for tests: seeded jitter and shake randomness.
    pub fn with_seed(profile: Arc<MotionProfile>, seed: u64) -> Self {
        let mut rig = Self::new(profile);
        rig.accumulator = MotionAccumulator::with_seed(seed as u32);
        rig.shakes = ShakeScheduler::with_seed(seed);
        rig
    }

    /// Install a profile and rebuild the springs from its constants.
    /// Spring state (value/velocity) is preserved.
    pub fn set_profile(&mut self, profile: Arc<MotionProfile>) {
        let state = self.state_machine.current();
        let springs = &profile.state(state).springs;
        self.base_position.adjust(springs.position);
        self.base_rotation.adjust(springs.rotation);

        self.recoil_position =
            Spring::additive_with_lerp(profile.recoil_springs.position, profile.recoil_lerp_speed);
        self.recoil_rotation =
            Spring::additive_with_lerp(profile.recoil_springs.rotation, profile.recoil_lerp_speed);
        self.shake_position.adjust(profile.shake_springs.position);
        self.shake_rotation.adjust(profile.shake_springs.rotation);

        self.profile = Some(profile);
        self.missing_profile_logged = false;
    }

    pub fn profile(&self) -> Option<&Arc<MotionProfile>> {
        self.profile.as_ref()
    }

    // ========================================================================
    // SIMULATION STEPS
    // ========================================================================

    /// Advance the simulation one fixed timestep.
    pub fn tick_fixed(&mut self, dt: f32, sample: &CharacterSample) {
        if !self.physics_enabled {
            return;
        }
        let Some(profile) = self.profile.clone() else {
            if !self.missing_profile_logged {
                log::warn!("camera rig ticked without a motion profile; skipping");
                self.missing_profile_logged = true;
            }
            return;
        };
        let dt = dt.clamp(0.0001, 0.1);

        self.queued.advance(dt);
        Self::drain_queued(
            &mut self.queued,
            &mut self.recoil_position,
            &mut self.recoil_rotation,
        );

        let visualizing = self.state_machine.forced().is_some();
        if let Some(transition) = self.state_machine.evaluate(sample) {
            log::debug!(
                "camera motion state: {:?} -> {:?}",
                transition.from,
                transition.to
            );
            for force in &profile.state(transition.from).exit_forces {
                self.queued.schedule(force);
            }
            for force in &profile.state(transition.to).enter_forces {
                self.queued.schedule(force);
            }
            let springs = &profile.state(transition.to).springs;
            self.base_position.adjust(springs.position);
            self.base_rotation.adjust(springs.rotation);
        }

        let state = profile.state(self.state_machine.current());
        let motion = self
            .accumulator
            .accumulate(dt, &profile, state, sample, visualizing);
        self.base_position.add_force(motion.position, 1.0);
        self.base_rotation.add_force(motion.rotation, 1.0);

        // Footstep thump. The trigger is consumed either way so a step
        // taken while aiming does not fire later.
        let stepped = self.accumulator.take_step_trigger();
        if stepped && !sample.aiming {
            if let Some(step) = &state.step_force {
                self.recoil_position.add_force(step.position, step.distribution);
                self.recoil_rotation.add_force(step.rotation, step.distribution);
            }
        }

        let sway = compute_sway(
            &profile.sway,
            sample.look_delta,
            sample.local_velocity,
            sample.aiming,
        );
        self.base_position
            .add_force(sway.strafe_position, profile.sway.distribution);
        self.base_rotation.add_force(
            sway.look_rotation + sway.strafe_rotation + sway.fall_rotation,
            profile.sway.distribution,
        );

        let (shake_pos, shake_rot) = self.shakes.update(dt);
        if shake_pos != Vec3::ZERO || shake_rot != Vec3::ZERO {
            self.shake_position.add_force(shake_pos, 1.0);
            self.shake_rotation.add_force(shake_rot, 1.0);
        }

        self.base_position.tick(dt);
        self.base_rotation.tick(dt);
        self.recoil_position.tick(dt);
        self.recoil_rotation.tick(dt);
        self.shake_position.tick(dt);
        self.shake_rotation.tick(dt);
    }

    /// Presentation step, called once per rendered frame. Delivers any
    /// queued forces that came due since the last fixed tick and reads
    /// the current offset back. Never advances spring state; `_dt` is
    /// accepted for host-loop symmetry only.
    pub fn tick_variable(&mut self, _dt: f32) -> CameraOffset {
        if self.physics_enabled && self.profile.is_some() {
            Self::drain_queued(
                &mut self.queued,
                &mut self.recoil_position,
                &mut self.recoil_rotation,
            );
        }
        self.current_offset()
    }

    /// The combined smoothed offset: base values plus every additive
    /// spring layered on top.
    pub fn current_offset(&self) -> CameraOffset {
        CameraOffset {
            position: self.base_position.value()
                + self.recoil_position.value()
                + self.shake_position.value(),
            rotation: self.base_rotation.value()
                + self.recoil_rotation.value()
                + self.shake_rotation.value(),
        }
    }

    fn drain_queued(
        queued: &mut DelayedForceQueue,
        recoil_position: &mut Spring,
        recoil_rotation: &mut Spring,
    ) {
        queued.fire_due(|force| {
            recoil_position.add_force(force.position, force.distribution);
            recoil_rotation.add_force(force.rotation, force.distribution);
        });
    }

    // ========================================================================
    // EVENTS
    // ========================================================================

    /// React to a one-shot character event.
    pub fn handle_event(&mut self, event: &CharacterEvent) {
        let Some(profile) = self.profile.clone() else {
            return;
        };
        match event {
            CharacterEvent::Jump => self.queued.schedule(&profile.impact.jump),
            CharacterEvent::FallImpact { speed } => {
                let scale = (speed.abs() * profile.impact.fall_speed_scale)
                    .min(profile.impact.fall_max_scale);
                self.queued.schedule(&profile.impact.fall.scaled(scale));
            }
            CharacterEvent::Damage {
                direction,
                magnitude,
            } => {
                let base = &profile.impact.damage;
                let dir = direction.normalize_or_zero();
                // Pitch away from the hit, yaw/roll toward its side.
                let rotation = Vec3::new(
                    base.rotation.x,
                    base.rotation.y * dir.x.signum(),
                    base.rotation.z * dir.x.signum(),
                ) * *magnitude;
                self.queued.schedule(&DelayedForce {
                    position: base.position * *magnitude,
                    rotation,
                    distribution: base.distribution,
                    delay: base.delay,
                });
            }
            CharacterEvent::Respawn => self.reset(),
        }
    }

    /// Shake the camera from an explosion, with quadratic distance
    /// falloff. Returns whether the blast was close enough to matter.
    pub fn add_explosion_shake(&mut self, explosion: &ExplosionEvent) -> bool {
        let Some(profile) = self.profile.clone() else {
            return false;
        };
        self.shakes
            .add_explosion(&profile.explosion_shake, explosion.distance, explosion.radius)
    }

    /// Start a shake with explicit settings and magnitude scale.
    pub fn do_shake(&mut self, settings: &ShakeSettings, scale: f32) {
        self.shakes.do_shake(settings, scale);
    }

    // ========================================================================
    // FORCE INJECTION
    // ========================================================================

    /// Kick the recoil position spring directly (weapon fire, impacts).
    pub fn add_position_force(&mut self, force: Vec3, distribution: f32) {
        self.recoil_position.add_force(force, distribution);
    }

    /// Kick the recoil rotation spring directly.
    pub fn add_rotation_force(&mut self, force: Vec3, distribution: f32) {
        self.recoil_rotation.add_force(force, distribution);
    }

    /// Schedule a force to fire after its delay.
    pub fn play_delayed_force(&mut self, force: &DelayedForce) {
        self.queued.schedule(force);
    }

    /// Schedule a batch of delayed forces.
    pub fn play_delayed_forces(&mut self, forces: &[DelayedForce]) {
        for force in forces {
            self.queued.schedule(force);
        }
    }

    /// Drop all scheduled forces that have not fired yet.
    pub fn clear_queued_forces(&mut self) {
        self.queued.clear();
    }

    // ========================================================================
    // CONTROL
    // ========================================================================

    /// Force a motion state for preview, or `None` to resume gameplay
    /// selection.
    pub fn set_visualized_state(&mut self, state: Option<StateId>) {
        self.state_machine.set_forced(state);
    }

    /// Pause or resume the simulation. While paused, ticks are skipped
    /// and the offset freezes in place.
    pub fn set_physics_enabled(&mut self, enabled: bool) {
        self.physics_enabled = enabled;
    }

    pub fn physics_enabled(&self) -> bool {
        self.physics_enabled
    }

    /// Blend factor for the aim bob contribution, clamped to [0, 1].
    pub fn set_aim_headbob_mod(&mut self, value: f32) {
        self.accumulator.set_aim_headbob_mod(value);
    }

    /// The motion state active this tick.
    pub fn current_state(&self) -> StateId {
        self.state_machine.current()
    }

    /// Hard reset: zero every spring, return the state machine to Idle,
    /// rewind the accumulator clocks and drop all shakes and queued
    /// forces. Used on respawn.
    pub fn reset(&mut self) {
        self.base_position.reset();
        self.base_rotation.reset();
        self.recoil_position.reset();
        self.recoil_rotation.reset();
        self.shake_position.reset();
        self.shake_rotation.reset();
        self.state_machine.reset();
        self.accumulator.reset();
        self.shakes.clear();
        self.queued.clear();

        if let Some(profile) = &self.profile {
            let springs = &profile.state(StateId::Idle).springs;
            self.base_position.adjust(springs.position);
            self.base_rotation.adjust(springs.rotation);
        }
    }
}
