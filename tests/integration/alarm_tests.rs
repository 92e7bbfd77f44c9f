//! Intruder alarm: triggers, cooldown, evidence photos and the log.

use core::time::Duration;
use std::fs;

use pi_workshop::activities::alarm::{IntruderAlarm, Trigger};
use pi_workshop::adapters::sim::{SimBoard, SimCamera};
use pi_workshop::app::events::ActivityEvent;
use pi_workshop::app::ports::{Camera, CaptureSettings};
use pi_workshop::archive::ALARM_LOG;
use pi_workshop::config::AlarmConfig;
use pi_workshop::display::{GREEN, OFF, RED, YELLOW};
use pi_workshop::sensors::{Acceleration, EnvironmentReading};

use crate::mock_hw::{colour_sequence, run_for, scratch_dir};

const SCROLL: Duration = Duration::from_millis(50);

fn alarm(dir: &std::path::Path, debug: bool) -> IntruderAlarm<SimCamera> {
    let cfg = AlarmConfig {
        photos_dir: Some(dir.to_path_buf()),
        debug,
        ..AlarmConfig::default()
    };
    IntruderAlarm::new(cfg, CaptureSettings::default(), SCROLL, SimCamera::new())
}

fn warm_after(secs: u64) -> impl FnMut(Duration) -> EnvironmentReading + Send + 'static {
    move |t| EnvironmentReading {
        temperature_c: if t >= Duration::from_secs(secs) { 24.0 } else { 22.0 },
        humidity_pct: 40.0,
        pressure_mbar: 1012.0,
    }
}

fn shaken_during(windows: &'static [(u64, u64)]) -> impl FnMut(Duration) -> Acceleration + Send {
    move |t| {
        let shaken = windows
            .iter()
            .any(|&(a, b)| t >= Duration::from_secs(a) && t < Duration::from_secs(b));
        if shaken {
            Acceleration::new(0.0, 0.0, 1.5)
        } else {
            Acceleration::AT_REST
        }
    }
}

#[test]
fn heat_then_motion_with_cooldown_between() {
    let dir = scratch_dir("alarm_full");
    let mut board = SimBoard::new()
        .with_environment(warm_after(20))
        .with_acceleration(shaken_during(&[(40, 41), (70, 71)]));
    let mut activity = alarm(&dir, true);
    let (outcome, sink) = run_for(&mut activity, &mut board, Duration::from_secs(80));

    assert!(outcome.interrupted);
    let s = &outcome.summary;
    // The 40 s shake falls inside the cooldown after the heat alarm.
    assert_eq!(s.triggers, vec![Trigger::Heat, Trigger::Motion]);
    assert_eq!(s.alarms, 2);
    for (path, tag) in s.evidence.iter().zip(["HEAT", "MOTION"]) {
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(&format!("INTRUDER_{tag}_2024-03-14_")), "{name}");
        assert!(path.is_file());
    }

    let log = fs::read_to_string(dir.join(ALARM_LOG)).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains(" | Trigger: HEAT | Photo: INTRUDER_HEAT_"));
    assert!(lines[1].contains(" | Trigger: MOTION | Photo: INTRUDER_MOTION_"));

    assert!(sink.contains(&ActivityEvent::AlarmCalibrated { baseline_c: 22.0 }));
    assert!(sink.contains(&ActivityEvent::AlarmArmed));
    assert_eq!(
        sink.count(|e| matches!(e, ActivityEvent::CooldownStarted { .. })),
        2
    );
    assert!(sink.count(|e| matches!(e, ActivityEvent::AlarmReading { .. })) > 10);

    let colours = colour_sequence(board.frames());
    assert!(colours.contains(&RED));
    assert!(colours.contains(&YELLOW));
    assert!(colours.contains(&GREEN));
    assert!(board.last_frame().unwrap().is_uniform(OFF));
    assert_eq!(activity.camera().captures().len(), 2);
    assert!(!activity.camera().is_running());
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn quiet_room_never_triggers() {
    let dir = scratch_dir("alarm_quiet");
    let mut board = SimBoard::new();
    let mut activity = alarm(&dir, false);
    let (outcome, sink) = run_for(&mut activity, &mut board, Duration::from_secs(60));

    assert_eq!(outcome.summary.alarms, 0);
    assert!(!dir.join(ALARM_LOG).exists());
    assert_eq!(
        sink.count(|e| matches!(e, ActivityEvent::AlarmReading { .. })),
        0
    );
    let countdown: Vec<u32> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            ActivityEvent::Countdown { remaining } => Some(*remaining),
            _ => None,
        })
        .collect();
    assert_eq!(countdown, vec![5, 4, 3, 2, 1]);
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn heat_and_motion_together_share_one_alarm() {
    let dir = scratch_dir("alarm_both");
    let mut board = SimBoard::new()
        .with_environment(warm_after(15))
        .with_acceleration(shaken_during(&[(15, 16)]));
    let mut activity = alarm(&dir, false);
    let (outcome, sink) = run_for(&mut activity, &mut board, Duration::from_secs(30));

    assert_eq!(outcome.summary.triggers, vec![Trigger::HeatAndMotion]);
    assert!(sink.events.iter().any(|e| matches!(
        e,
        ActivityEvent::IntruderDetected {
            trigger: Trigger::HeatAndMotion,
            ..
        }
    )));
    let _ = fs::remove_dir_all(dir);
}
