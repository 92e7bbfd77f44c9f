//! Candid camera and time-lapse with the simulated camera.

use core::time::Duration;
use std::fs;

use pi_workshop::activities::camera::CandidCamera;
use pi_workshop::adapters::sim::{SimBoard, SimCamera};
use pi_workshop::app::events::ActivityEvent;
use pi_workshop::app::ports::{Camera, Clock};
use pi_workshop::config::{CameraConfig, TimelapseConfig};
use pi_workshop::display::{GREEN, OFF, RED, YELLOW};

use crate::mock_hw::{colour_sequence, run_for, scratch_dir};

const SCROLL: Duration = Duration::from_millis(50);

fn file_name(path: &std::path::Path) -> String {
    path.file_name().unwrap().to_string_lossy().into_owned()
}

#[test]
fn single_photo_after_countdown() {
    let dir = scratch_dir("camera_single");
    let cfg = CameraConfig {
        photos_dir: Some(dir.clone()),
        ..CameraConfig::default()
    };
    let mut board = SimBoard::new();
    let mut camera = CandidCamera::new(cfg, SCROLL, SimCamera::new());
    let (outcome, sink) = run_for(&mut camera, &mut board, Duration::from_secs(600));

    assert!(!outcome.interrupted);
    let photos = &outcome.summary.photos;
    assert_eq!(photos.len(), 1);
    let name = file_name(&photos[0]);
    assert!(name.starts_with("photo_2024-03-14_09-3"), "{name}");
    assert!(name.ends_with(".jpg"));
    assert!(photos[0].is_file());
    assert_eq!(outcome.summary.folder, dir);

    assert!(sink.contains(&ActivityEvent::FolderCreated { path: dir.clone() }));
    let countdown: Vec<u32> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            ActivityEvent::Countdown { remaining } => Some(*remaining),
            _ => None,
        })
        .collect();
    assert_eq!(countdown, vec![3, 2, 1]);

    let colours = colour_sequence(board.frames());
    let red = colours.iter().position(|&c| c == RED).unwrap();
    let yellow = colours.iter().position(|&c| c == YELLOW).unwrap();
    let green = colours.iter().position(|&c| c == GREEN).unwrap();
    assert!(red < yellow && yellow < green);
    assert!(board.last_frame().unwrap().is_uniform(OFF));

    assert_eq!(camera.camera().starts(), 1);
    assert_eq!(camera.camera().stops(), 1);
    assert!(!camera.camera().is_running());
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn timelapse_numbers_photos_in_their_own_folder() {
    let dir = scratch_dir("camera_timelapse");
    let cfg = CameraConfig {
        photos_dir: Some(dir.clone()),
        timelapse: TimelapseConfig {
            enabled: true,
            photos: 3,
            ..TimelapseConfig::default()
        },
        ..CameraConfig::default()
    };
    let mut board = SimBoard::new();
    let mut camera = CandidCamera::new(cfg, SCROLL, SimCamera::new());
    let (outcome, sink) = run_for(&mut camera, &mut board, Duration::from_secs(600));

    assert!(!outcome.interrupted);
    let photos = &outcome.summary.photos;
    assert_eq!(photos.len(), 4);

    let single = file_name(&photos[0]);
    let stamp = single
        .strip_prefix("photo_")
        .and_then(|s| s.strip_suffix(".jpg"))
        .unwrap();
    let folder = dir.join(format!("timelapse_{stamp}"));
    for (i, p) in photos[1..].iter().enumerate() {
        assert_eq!(*p, folder.join(format!("timelapse_{:03}.jpg", i + 1)));
        assert!(p.is_file());
    }

    let progress: Vec<(u32, u32)> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            ActivityEvent::TimelapseProgress { index, total, .. } => Some((*index, *total)),
            _ => None,
        })
        .collect();
    assert_eq!(progress, vec![(1, 3), (2, 3), (3, 3)]);
    assert!(sink.contains(&ActivityEvent::TimelapseStarted {
        folder: folder.clone(),
        photos: 3,
        interval: Duration::from_secs(10),
    }));

    // Two 10 s intervals between three photos, none after the last.
    assert!(board.now() >= Duration::from_secs(20));
    assert!(board.now() < Duration::from_secs(40));
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn stop_during_warmup_releases_the_camera() {
    let dir = scratch_dir("camera_interrupt");
    let cfg = CameraConfig {
        photos_dir: Some(dir.clone()),
        ..CameraConfig::default()
    };
    let mut board = SimBoard::new();
    let mut camera = CandidCamera::new(cfg, SCROLL, SimCamera::new());
    let (outcome, sink) = run_for(&mut camera, &mut board, Duration::from_secs(1));

    assert!(outcome.interrupted);
    assert!(outcome.summary.photos.is_empty());
    assert!(!camera.camera().is_running());
    assert_eq!(camera.camera().stops(), 1);
    assert!(sink.contains(&ActivityEvent::Stopped {
        activity: "camera",
        interrupted: true
    }));
    assert!(board.last_frame().unwrap().is_uniform(OFF));
    let _ = fs::remove_dir_all(dir);
}
