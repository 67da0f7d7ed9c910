//! Delayed Force Queue
//!
//! Forces scheduled now and fired a fixed delay later: jump kicks that
//! land after the leg push, stance-change thumps offset from the
//! transition. The queue runs on the simulation clock, which only
//! advances in the fixed update, so due times are framerate
//! independent.
//!
//! Firing order among forces due on the same tick is unspecified; the
//! springs sum pending forces, so order never affects the result.

use glam::Vec3;

use crate::profile::DelayedForce;

/// A scheduled force with an absolute due time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueuedForce {
    pub position: Vec3,
    pub rotation: Vec3,
    /// Distribution divisor in (0, 1].
    pub distribution: f32,
    /// Simulation clock time at which the force fires.
    pub fires_at: f32,
}

/// Time-ordered force delivery on the fixed-update clock.
#[derive(Debug, Clone, Default)]
pub struct DelayedForceQueue {
    pending: Vec<QueuedForce>,
    clock: f32,
}

impl DelayedForceQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a force `delay` seconds from now. A non-positive delay
    /// fires on the next drain.
    pub fn schedule(&mut self, force: &DelayedForce) {
        self.pending.push(QueuedForce {
            position: force.position,
            rotation: force.rotation,
            distribution: force.distribution,
            fires_at: self.clock + force.delay.max(0.0),
        });
    }

    /// Advance the queue clock one fixed step.
    pub fn advance(&mut self, dt: f32) {
        self.clock += dt;
    }

    /// Deliver every force whose due time has passed. Safe to call from
    /// the variable update as well: it reads the clock without moving
    /// it.
    pub fn fire_due(&mut self, mut apply: impl FnMut(&QueuedForce)) {
        let clock = self.clock;
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].fires_at <= clock {
                let force = self.pending.swap_remove(i);
                apply(&force);
            } else {
                i += 1;
            }
        }
    }

    /// Drop all scheduled forces without firing them.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 50.0;

    fn force(delay: f32) -> DelayedForce {
        DelayedForce::rotation(Vec3::new(0.05, 0.0, 0.0), 0.5, delay)
    }

    #[test]
    fn zero_delay_fires_on_next_drain() {
        let mut queue = DelayedForceQueue::new();
        queue.schedule(&force(0.0));

        let mut fired = Vec::new();
        queue.fire_due(|f| fired.push(*f));
        assert_eq!(fired.len(), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn force_waits_for_its_delay() {
        let mut queue = DelayedForceQueue::new();
        queue.schedule(&force(0.1));

        // 4 ticks = 0.08s, not yet due.
        for _ in 0..4 {
            queue.advance(DT);
        }
        let mut fired = 0;
        queue.fire_due(|_| fired += 1);
        assert_eq!(fired, 0);

        queue.advance(DT);
        queue.advance(DT);
        queue.fire_due(|_| fired += 1);
        assert_eq!(fired, 1);
    }

    #[test]
    fn fire_due_without_advance_keeps_pending() {
        let mut queue = DelayedForceQueue::new();
        queue.schedule(&force(0.1));

        // A variable-rate drain between fixed steps must not consume
        // forces early.
        queue.fire_due(|_| panic!("fired before due"));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn forces_due_together_all_fire() {
        let mut queue = DelayedForceQueue::new();
        queue.schedule(&force(0.02));
        queue.schedule(&force(0.02));
        queue.schedule(&force(0.5));
        queue.advance(DT);
        queue.advance(DT);

        let mut fired = 0;
        queue.fire_due(|_| fired += 1);
        assert_eq!(fired, 2);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn negative_delay_is_clamped() {
        let mut queue = DelayedForceQueue::new();
        queue.schedule(&force(-1.0));

        let mut fired = 0;
        queue.fire_due(|_| fired += 1);
        assert_eq!(fired, 1);
    }

    #[test]
    fn clear_drops_pending_forces() {
        let mut queue = DelayedForceQueue::new();
        queue.schedule(&force(0.0));
        queue.schedule(&force(0.2));
        queue.clear();
        assert!(queue.is_empty());

        queue.fire_due(|_| panic!("cleared force fired"));
    }

    #[test]
    fn delivered_force_keeps_payload() {
        let mut queue = DelayedForceQueue::new();
        let scheduled = DelayedForce {
            position: Vec3::new(0.0, -0.02, 0.0),
            rotation: Vec3::new(0.06, 0.0, 0.0),
            distribution: 0.4,
            delay: 0.0,
        };
        queue.schedule(&scheduled);

        queue.fire_due(|f| {
            assert_eq!(f.position, scheduled.position);
            assert_eq!(f.rotation, scheduled.rotation);
            assert_eq!(f.distribution, scheduled.distribution);
        });
    }
}
