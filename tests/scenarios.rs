//! Multi-frame sessions driven through the public API

use std::sync::Arc;

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use skate_sim::Settings;
use skate_sim::consts::SIM_DT;
use skate_sim::sim::{
    Dimensions, GrindStyle, InputIntent, ParkModel, Physics, Rail, Skater,
};

fn skater_at(park: ParkModel, position: Vec3, seed: u64) -> Skater {
    let settings = Settings {
        spawn_position: position,
        ..Settings::default()
    };
    let physics = Physics::from_settings(&settings);
    Skater::new(Arc::new(park), physics, settings, Pcg32::seed_from_u64(seed))
}

fn single_rail() -> ParkModel {
    ParkModel::new(
        Vec::new(),
        vec![Rail {
            position: Vec3::new(0.0, 0.5, 0.0),
            dimensions: Dimensions::new(0.2, 1.0, 10.0),
        }],
        Vec::new(),
    )
    .expect("valid park")
}

#[test]
fn test_rail_round_trip() {
    // Start on the deck just above the rail top, facing -z along it
    let mut skater = skater_at(single_rail(), Vec3::new(0.0, 1.05, 4.0), 11);

    let first = skater.advance(&InputIntent::forward(), SIM_DT);
    assert!(first.grinding);
    assert_eq!(first.grind_style, Some(GrindStyle::FiftyFifty));

    let mut left_rail = false;
    let mut landed = false;
    for _ in 0..600 {
        let report = skater.advance(&InputIntent::forward(), SIM_DT);
        if !left_rail {
            if report.grinding {
                assert_eq!(report.position.y, 1.0);
                continue;
            }
            left_rail = true;
            assert!(report.in_air);
            assert!(skater.state().velocity.y > 0.0);
            assert!(report.position.z < -5.0);
        } else if report.on_ground {
            landed = true;
            break;
        } else {
            assert!(!report.grinding);
        }
    }
    assert!(left_rail, "never left the rail");
    assert!(landed, "never landed after the rail");
    assert!(skater.position().z < -5.0);
}

#[test]
fn test_shuvit_scores_on_flat_ground() {
    let mut skater = skater_at(ParkModel::empty(), Vec3::new(0.0, 0.2, 0.0), 2);

    let pop = InputIntent {
        jump: true,
        trick_east: true,
        ..InputIntent::default()
    };
    let first = skater.advance(&pop, SIM_DT);
    assert!(first.in_air);
    assert!(skater.current_trick().is_some());

    let mut score = 0;
    let mut landed_tricks = Vec::new();
    for _ in 0..120 {
        let report = skater.advance(&InputIntent::default(), SIM_DT);
        if let Some(trick) = report.completed_trick {
            score += trick.points;
            landed_tricks.push(trick.name);
        }
        if report.on_ground {
            break;
        }
    }
    assert_eq!(landed_tricks, vec!["Shuvit"]);
    assert_eq!(score, 50);
    assert!(skater.state().motion.is_ground());
}

#[test]
fn test_long_trick_bails_on_landing() {
    let mut skater = skater_at(ParkModel::empty(), Vec3::new(0.0, 0.2, 0.0), 2);

    let pop = InputIntent {
        jump: true,
        trick_west: true,
        ..InputIntent::default()
    };
    skater.advance(&pop, SIM_DT);
    assert!(skater.current_trick().is_some());

    let mut completed = 0;
    for _ in 0..120 {
        let report = skater.advance(&InputIntent::default(), SIM_DT);
        if report.completed_trick.is_some() {
            completed += 1;
        }
        if report.on_ground {
            assert_eq!(report.board_rotation.x, 0.0);
            assert_eq!(report.board_rotation.z, 0.0);
            break;
        }
    }
    assert_eq!(completed, 0);
    assert!(skater.current_trick().is_none());
}

#[test]
fn test_json_park_round_trip() {
    let json = r#"[
        {"kind": "rail", "position": [0.0, 0.5, 0.0], "dimensions": {"width": 0.2, "height": 1.0, "length": 10.0}},
        {"kind": "wall", "position": [0.0, 0.75, -50.0]}
    ]"#;
    let park = ParkModel::from_json(json).expect("valid park");
    assert_eq!(park.rails().len(), 1);
    assert_eq!(park.obstacles().len(), 1);

    let mut skater = skater_at(park, Vec3::new(0.0, 1.05, 4.0), 4);
    assert!(skater.advance(&InputIntent::forward(), SIM_DT).grinding);
}

#[test]
fn test_default_park_session_stays_sane() {
    let mut skater = skater_at(ParkModel::default_park(), Vec3::new(0.0, 0.2, 0.0), 99);
    let limit = skater.settings().boundary_limit;

    let forward = InputIntent::forward();
    let mut inputs = Vec::new();
    for lap in 0..6 {
        inputs.extend(std::iter::repeat_n(forward, 80));
        inputs.push(InputIntent {
            jump: true,
            trick_north: lap % 2 == 0,
            trick_east: lap % 2 == 1,
            ..forward
        });
        inputs.extend(std::iter::repeat_n(
            InputIntent {
                left: lap % 3 != 2,
                right: lap % 3 == 2,
                ..forward
            },
            40,
        ));
        inputs.extend(std::iter::repeat_n(InputIntent::backward(), 20));
    }

    for input in &inputs {
        let report = skater.advance(input, SIM_DT);
        assert!(report.position.is_finite());
        assert!(report.speed.is_finite());
        assert!(report.position.x.abs() <= limit + 1e-3);
        assert!(report.position.z.abs() <= limit + 1e-3);
        assert!(report.position.y > -1.0);
        let modes = [report.on_ground, report.in_air, report.grinding];
        assert_eq!(modes.iter().filter(|m| **m).count(), 1);
    }
}
