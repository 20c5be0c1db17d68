//! Robot Walk
//!
//! Builds the robot rig and replays a scripted key timeline at a fixed 60 Hz
//! tick, logging where the rig ends up. No window or renderer is involved.
//!
//! ```text
//! RUST_LOG=info cargo run -p robot_walk -- [config.json]
//! ```

use std::time::Duration;

use marionette::prelude::*;

const TICK_RATE: f64 = 60.0;
const REPORT_INTERVAL: f32 = 0.5;

/// (seconds, key, state)
const TIMELINE: &[(f32, Key, ButtonState)] = &[
    (0.5, Key::W, ButtonState::Pressed),
    (0.8, Key::E, ButtonState::Pressed),
    (1.1, Key::E, ButtonState::Released),
    (2.5, Key::W, ButtonState::Released),
    (2.6, Key::Key5, ButtonState::Pressed),
    (3.4, Key::Key5, ButtonState::Released),
    (4.0, Key::Space, ButtonState::Pressed),
    (4.1, Key::Space, ButtonState::Released),
    (4.2, Key::Space, ButtonState::Pressed),
    (4.3, Key::Space, ButtonState::Released),
    (5.0, Key::ShiftLeft, ButtonState::Pressed),
    (6.0, Key::ShiftLeft, ButtonState::Released),
    (6.0, Key::ArrowRight, ButtonState::Pressed),
    (7.0, Key::ArrowRight, ButtonState::Released),
    (7.2, Key::S, ButtonState::Pressed),
    (8.2, Key::S, ButtonState::Released),
    (8.5, Key::Key8, ButtonState::Pressed),
    (9.5, Key::Key8, ButtonState::Released),
];

const DURATION: f32 = 10.5;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => RigConfig::from_path(&path)?,
        None => RigConfig::default(),
    };

    let mut scene = Scene::new();
    let mut controller = RobotController::new(&mut scene, &config)?;
    let mut intent = InputIntentState::new();
    let nodes = controller.rig().nodes;
    for (key, gesture) in controller.bindings().iter() {
        log::debug!("bound {key} -> {gesture:?}");
    }

    let step = Duration::from_secs_f64(1.0 / TICK_RATE);
    let mut timer = Timer::new();
    let mut pending = TIMELINE.iter().peekable();
    let mut next_report = 0.0;
    let mut ignored = 0usize;

    while timer.elapsed_seconds() < DURATION {
        let now = timer.elapsed_seconds();
        while let Some(&&(at, key, state)) = pending.peek() {
            if at > now {
                break;
            }
            pending.next();
            let outcome = controller.handle_key(key, state, &mut intent);
            log::info!("t={now:.2}s {key} {state:?} -> {outcome:?}");
            if !outcome.is_applied() {
                ignored += 1;
            }
        }

        timer.tick_fixed(step);
        controller.tick(timer.dt_seconds(), &mut intent, &mut scene);

        if timer.elapsed_seconds() >= next_report {
            next_report += REPORT_INTERVAL;
            let root = scene.world_position(nodes.root).unwrap_or_default();
            let torso = scene.world_position(nodes.torso).unwrap_or_default();
            log::info!(
                "t={:.2}s root=({:.2}, {:.2}, {:.2}) torso=({:.2}, {:.2}, {:.2})",
                timer.elapsed_seconds(),
                root.x,
                root.y,
                root.z,
                torso.x,
                torso.y,
                torso.z
            );
        }
    }

    let rig = controller.rig();
    println!("Replayed {} frames ({:.2}s)", timer.frame_count, timer.elapsed_seconds());
    println!("  travel:   {:.3}", rig.locomotion.travel());
    for id in JointId::ALL {
        println!("  {:<8}  {:.1}°", id.name(), rig.joint(id).angle().to_degrees());
    }
    println!("  ignored gestures: {ignored}");

    Ok(())
}
