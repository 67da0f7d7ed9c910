//! Spring integrator tests exercised through the public API.

use glam::Vec3;
use springcam_engine::spring::{Spring, SpringSettings};

const DT_50: f32 = 1.0 / 50.0;
const DT_30: f32 = 1.0 / 30.0;

// ============================================================================
// CONVERGENCE
// ============================================================================

#[test]
fn target_jump_converges_without_overshoot() {
    // Unit target jump at the reference rate: within 1% after four
    // seconds, peak never visibly above the target.
    let mut spring = Spring::overriding(SpringSettings::uniform(0.1, 0.25));
    spring.add_force(Vec3::X, 1.0);

    let mut peak = f32::MIN;
    for _ in 0..200 {
        spring.tick(DT_50);
        peak = peak.max(spring.value().x);
    }

    assert!((spring.value().x - 1.0).abs() < 0.01);
    assert!(peak <= 1.05, "peak {peak} overshoots");
}

#[test]
fn convergence_holds_at_lower_tick_rates() {
    // The step normalization keeps the same constants usable at 30 Hz.
    let mut spring = Spring::overriding(SpringSettings::uniform(0.1, 0.25));
    spring.add_force(Vec3::X, 1.0);

    let mut peak = f32::MIN;
    for _ in 0..150 {
        spring.tick(DT_30);
        peak = peak.max(spring.value().x);
    }

    assert!((spring.value().x - 1.0).abs() < 0.02);
    assert!(peak <= 1.05);
}

#[test]
fn per_axis_constants_are_independent() {
    // A stiff X axis must converge faster than a soft Z axis without
    // either influencing the other.
    let settings = SpringSettings::new(
        Vec3::new(0.3, 0.1, 0.05),
        Vec3::new(0.25, 0.25, 0.25),
    );
    let mut spring = Spring::overriding(settings);
    spring.add_force(Vec3::ONE, 1.0);

    for _ in 0..40 {
        spring.tick(DT_50);
    }

    let v = spring.value();
    assert!(v.x > v.y);
    assert!(v.y > v.z);
    assert!(v.z > 0.0);
}

// ============================================================================
// STATE MANAGEMENT
// ============================================================================

#[test]
fn retuning_mid_flight_never_jumps() {
    let mut spring = Spring::overriding(SpringSettings::uniform(0.08, 0.25));
    spring.add_force(Vec3::X, 1.0);

    let mut previous = 0.0f32;
    for i in 0..120 {
        if i == 40 {
            spring.adjust(SpringSettings::uniform(0.35, 0.15));
        }
        spring.tick(DT_50);
        let current = spring.value().x;
        assert!(
            (current - previous).abs() < 0.2,
            "discontinuity at tick {i}"
        );
        previous = current;
    }
    assert!((spring.value().x - 1.0).abs() < 0.02);
}

#[test]
fn reset_clears_pending_forces_too() {
    let mut spring = Spring::additive(SpringSettings::default());
    spring.add_force(Vec3::splat(5.0), 0.2);
    spring.reset();

    // A force injected before the reset must not fire afterwards.
    spring.tick(DT_50);
    assert_eq!(spring.value(), Vec3::ZERO);
    assert_eq!(spring.velocity(), Vec3::ZERO);
}

#[test]
fn at_rest_detection() {
    let mut spring = Spring::additive(SpringSettings::uniform(0.2, 0.25));
    assert!(spring.is_at_rest(1.0e-6));

    spring.add_force(Vec3::X, 1.0);
    spring.tick(DT_50);
    assert!(!spring.is_at_rest(1.0e-3));

    for _ in 0..500 {
        spring.tick(DT_50);
    }
    assert!(spring.is_at_rest(1.0e-3));
}

// ============================================================================
// SETTINGS
// ============================================================================

#[test]
fn settings_json_round_trip() {
    let settings = SpringSettings::new(
        Vec3::new(0.1, 0.2, 0.3),
        Vec3::new(0.25, 0.3, 0.35),
    );
    let json = serde_json::to_string(&settings).unwrap();
    let loaded: SpringSettings = serde_json::from_str(&json).unwrap();
    assert_eq!(settings, loaded);
}

#[test]
fn stability_check_rejects_out_of_range_constants() {
    assert!(SpringSettings::uniform(0.4, 0.4).is_stable());
    assert!(!SpringSettings::uniform(0.41, 0.25).is_stable());
    assert!(!SpringSettings::uniform(0.0, 0.25).is_stable());
    assert!(!SpringSettings::new(Vec3::new(0.1, 0.1, 0.5), Vec3::splat(0.25)).is_stable());
}
