//! Per-Tick Motion Aggregation
//!
//! Everything that produces the desired camera pose for one fixed tick:
//! the discrete motion state machine, the bob cycle, sway, Perlin
//! jitter and the accumulator that folds them into a single force for
//! the base springs.

pub mod accumulator;
pub mod bob;
pub mod jitter;
pub mod state_machine;
pub mod sway;

pub use accumulator::{AccumulatedMotion, MotionAccumulator};
pub use bob::BobCycle;
pub use jitter::NoiseJitter;
pub use state_machine::{MotionStateMachine, StateId, Transition};
pub use sway::{SwayForces, compute_sway};
