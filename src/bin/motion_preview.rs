//! Headless camera motion preview.
//!
//! Runs the rig through each motion state at a fixed 50 Hz and prints
//! the smoothed offset, so profile tuning can be eyeballed without a
//! renderer. Pass a profile JSON path to preview a custom profile;
//! otherwise the built-in defaults are used.

use std::path::Path;
use std::sync::Arc;

use springcam_engine::prelude::*;

const TICK: f32 = 1.0 / 50.0;
const SECONDS_PER_STATE: f32 = 2.0;

fn main() {
    env_logger::init();

    let profile = match std::env::args().nth(1) {
        Some(path) => match MotionProfile::load(Path::new(&path)) {
            Ok(profile) => {
                log::info!("loaded profile from {path}");
                profile
            }
            Err(err) => {
                eprintln!("failed to load profile {path}: {err}");
                std::process::exit(1);
            }
        },
        None => MotionProfile::default(),
    };

    let mut rig = CameraRig::new(Arc::new(profile));
    let sample = CharacterSample::default();

    for state in [
        StateId::Idle,
        StateId::Walk,
        StateId::Run,
        StateId::Crouch,
        StateId::Prone,
    ] {
        println!("=== {state:?} ===");
        rig.set_visualized_state(Some(state));

        let ticks = (SECONDS_PER_STATE / TICK) as usize;
        for i in 0..ticks {
            rig.tick_fixed(TICK, &sample);
            let offset = rig.tick_variable(TICK);

            // One printed row per tenth of a second.
            if i % 5 == 0 {
                let t = i as f32 * TICK;
                println!(
                    "t={t:5.2}  pos=({:+.4}, {:+.4}, {:+.4})  rot=({:+.4}, {:+.4}, {:+.4})",
                    offset.position.x,
                    offset.position.y,
                    offset.position.z,
                    offset.rotation.x,
                    offset.rotation.y,
                    offset.rotation.z,
                );
            }
        }
    }

    println!("=== Explosion ===");
    rig.set_visualized_state(None);
    rig.add_explosion_shake(&ExplosionEvent {
        distance: 3.0,
        radius: 12.0,
    });
    for i in 0..50 {
        rig.tick_fixed(TICK, &sample);
        let offset = rig.tick_variable(TICK);
        if i % 5 == 0 {
            println!(
                "t={:5.2}  pos_len={:.4}  rot_len={:.4}",
                i as f32 * TICK,
                offset.position.length(),
                offset.rotation.length(),
            );
        }
    }
}
