//! Hello, environment monitor and spirit level on the simulated board.

use core::time::Duration;

use pi_workshop::activities::environment::{Comfort, EnvironmentMonitor};
use pi_workshop::activities::hello::Hello;
use pi_workshop::activities::spirit_level::{SpiritLevel, Tilt};
use pi_workshop::adapters::sim::SimBoard;
use pi_workshop::app::events::ActivityEvent;
use pi_workshop::config::{EnvironmentConfig, HelloConfig, SpiritLevelConfig};
use pi_workshop::display::{BLUE, GREEN, OFF, RED};
use pi_workshop::sensors::{Acceleration, EnvironmentReading};

use crate::mock_hw::{colour_sequence, run_for};

fn room(temperature_c: f32) -> EnvironmentReading {
    EnvironmentReading {
        temperature_c,
        humidity_pct: 40.0,
        pressure_mbar: 1010.0,
    }
}

// ── Hello ─────────────────────────────────────────────────────

#[test]
fn hello_scrolls_once_and_finishes() {
    let mut board = SimBoard::new();
    let mut hello = Hello::new(HelloConfig::default());
    let (outcome, sink) = run_for(&mut hello, &mut board, Duration::from_secs(600));

    assert!(!outcome.interrupted);
    assert!(outcome.summary.shown);
    assert!(sink.contains(&ActivityEvent::MessageShown {
        text: "Hello Pi Workshop!".into()
    }));
    assert!(board.frames().iter().any(|f| f.iter().any(|(_, _, c)| c == GREEN)));
    assert!(board.last_frame().unwrap().is_uniform(OFF));
}

#[test]
fn hello_scroll_is_not_cut_short_by_a_stop() {
    let mut board = SimBoard::new();
    let mut hello = Hello::new(HelloConfig::default());
    let (outcome, _) = run_for(&mut hello, &mut board, Duration::from_millis(200));

    // A scroll in progress always completes.
    assert!(outcome.summary.shown);
    assert!(!outcome.interrupted);
    assert!(board.last_frame().unwrap().is_uniform(OFF));
}

// ── Environment monitor ───────────────────────────────────────

#[test]
fn environment_classifies_each_reading() {
    let mut board = SimBoard::new().with_environment(|t| {
        if t < Duration::from_secs(3) {
            room(26.0)
        } else if t < Duration::from_secs(6) {
            room(22.0)
        } else {
            room(18.0)
        }
    });
    let mut monitor = EnvironmentMonitor::new(EnvironmentConfig::default());
    let (outcome, sink) = run_for(&mut monitor, &mut board, Duration::from_secs(9));

    assert!(outcome.interrupted);
    let s = &outcome.summary;
    assert_eq!(s.readings, 3);
    for status in Comfort::ALL {
        assert_eq!(s.per_status.count(status), 1, "{status:?}");
    }
    assert_eq!(s.last.map(|r| r.temperature_c), Some(18.0));
    assert_eq!(colour_sequence(board.frames()), vec![OFF, RED, GREEN, BLUE, OFF]);
    assert_eq!(
        sink.count(|e| matches!(e, ActivityEvent::EnvironmentRead { .. })),
        3
    );
}

#[test]
fn environment_boundaries_are_comfortable() {
    let mut board = SimBoard::new().with_environment(|t| {
        if t < Duration::from_secs(3) {
            room(25.0)
        } else {
            room(20.0)
        }
    });
    let mut monitor = EnvironmentMonitor::new(EnvironmentConfig::default());
    let (outcome, _) = run_for(&mut monitor, &mut board, Duration::from_secs(6));

    assert_eq!(outcome.summary.per_status.count(Comfort::Comfortable), 2);
    assert_eq!(outcome.summary.per_status.count(Comfort::Hot), 0);
    assert_eq!(outcome.summary.per_status.count(Comfort::Cold), 0);
}

#[test]
fn environment_applies_temperature_offset() {
    let mut board = SimBoard::new().with_environment(|_| room(27.0));
    let cfg = EnvironmentConfig {
        temperature_offset_c: 3.0,
        ..EnvironmentConfig::default()
    };
    let mut monitor = EnvironmentMonitor::new(cfg);
    let (outcome, _) = run_for(&mut monitor, &mut board, Duration::from_secs(3));

    assert_eq!(outcome.summary.per_status.count(Comfort::Comfortable), 1);
    assert_eq!(outcome.summary.last.map(|r| r.temperature_c), Some(24.0));
}

// ── Spirit level ──────────────────────────────────────────────

#[test]
fn spirit_level_follows_the_tilt() {
    let mut board = SimBoard::new().with_acceleration(|t| {
        if t < Duration::from_secs(1) {
            Acceleration::AT_REST
        } else if t < Duration::from_secs(2) {
            // 30 degrees nose down
            Acceleration::new(0.5, 0.0, 0.866)
        } else {
            // 30 degrees to the right
            Acceleration::new(0.0, -0.5, 0.866)
        }
    });
    let mut level = SpiritLevel::new(SpiritLevelConfig::default());
    let (outcome, sink) = run_for(&mut level, &mut board, Duration::from_secs(3));

    let samples = &outcome.summary.samples;
    assert_eq!(samples.total(), 30);
    assert_eq!(samples.count(Tilt::Level), 10);
    assert_eq!(samples.count(Tilt::Forward), 10);
    assert_eq!(samples.count(Tilt::Right), 10);
    assert_eq!(samples.count(Tilt::Backward), 0);

    let first_forward = sink.events.iter().find_map(|e| match e {
        ActivityEvent::TiltSample {
            tilt: Tilt::Forward,
            pitch,
            ..
        } => Some(*pitch),
        _ => None,
    });
    assert!((first_forward.unwrap() + 30.0).abs() < 0.1);
    assert!(board.last_frame().unwrap().is_uniform(OFF));
}
