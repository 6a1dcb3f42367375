//! Skate Sim demo host
//!
//! Loads settings and a park, then drives one skater through a scripted
//! session at a fixed timestep and logs what happens.
//!
//! Usage: `skate-sim [settings.json] [park.json]`

use std::sync::Arc;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use skate_sim::Settings;
use skate_sim::consts::SIM_DT;
use skate_sim::sim::{FrameReport, InputIntent, ParkModel, Physics, Skater};

/// Seed for the demo skater's RNG
const DEMO_SEED: u64 = 0x5EED_5CA7;

/// A run of frames with the same held keys
struct Segment {
    frames: u32,
    input: InputIntent,
}

impl Segment {
    fn hold(frames: u32, input: InputIntent) -> Self {
        Self { frames, input }
    }

    /// One frame with an action pressed, then the given keys held
    fn press(input: InputIntent) -> Self {
        Self { frames: 1, input }
    }
}

fn script() -> Vec<Segment> {
    let forward = InputIntent::forward();
    vec![
        Segment::hold(90, forward),
        Segment::press(InputIntent {
            jump: true,
            trick_east: true,
            ..forward
        }),
        Segment::hold(70, forward),
        Segment::hold(
            40,
            InputIntent {
                left: true,
                ..forward
            },
        ),
        Segment::hold(60, forward),
        Segment::press(InputIntent {
            jump: true,
            trick_north: true,
            ..forward
        }),
        Segment::hold(90, forward),
        Segment::hold(60, InputIntent::backward()),
        Segment::hold(120, InputIntent::default()),
    ]
}

fn load_park(path: Option<&str>) -> ParkModel {
    let Some(path) = path else {
        return ParkModel::default_park();
    };
    match std::fs::read_to_string(path) {
        Ok(json) => match ParkModel::from_json(&json) {
            Ok(park) => {
                log::info!("Loaded park from {path}");
                park
            }
            Err(e) => {
                log::warn!("Invalid park {path}: {e}; using default park");
                ParkModel::default_park()
            }
        },
        Err(e) => {
            log::warn!("Could not read park {path}: {e}; using default park");
            ParkModel::default_park()
        }
    }
}

fn mode(report: &FrameReport) -> &'static str {
    if report.grinding {
        "grinding"
    } else if report.in_air {
        "air"
    } else {
        "ground"
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Skate Sim starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let settings = match args.first() {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    let park = Arc::new(load_park(args.get(1).map(String::as_str)));
    let physics = Physics::from_settings(&settings);
    let mut skater = Skater::new(park, physics, settings, Pcg32::seed_from_u64(DEMO_SEED));
    log::info!(
        "Riding a park with {} ramps, {} rails, {} obstacles",
        skater.park().ramps().len(),
        skater.park().rails().len(),
        skater.park().obstacles().len()
    );

    let mut score: u32 = 0;
    let mut tricks = 0;
    let mut last_mode = "ground";
    let mut frame = 0u32;

    for segment in script() {
        for _ in 0..segment.frames {
            let report = skater.advance(&segment.input, SIM_DT);
            frame += 1;

            let now = mode(&report);
            if now != last_mode {
                log::debug!(
                    "Frame {frame}: {last_mode} -> {now} at ({:.2}, {:.2}, {:.2})",
                    report.position.x,
                    report.position.y,
                    report.position.z
                );
                last_mode = now;
            }
            if let Some(trick) = report.completed_trick {
                score += trick.points;
                tricks += 1;
            }
        }
    }

    let end = skater.position();
    println!(
        "{frame} frames, {tricks} tricks, score {score}, finished at ({:.2}, {:.2}, {:.2})",
        end.x, end.y, end.z
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library only on wasm; the host drives `Skater::advance` directly
}
