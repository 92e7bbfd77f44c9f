//! Boot-time IP display.

use core::time::Duration;
use std::net::Ipv4Addr;

use pi_workshop::activities::boot_ip::BootIp;
use pi_workshop::adapters::sim::SimBoard;
use pi_workshop::app::events::ActivityEvent;
use pi_workshop::config::BootIpConfig;
use pi_workshop::display::{Rotation, OFF};

use crate::mock_hw::run_for;

#[test]
fn shows_address_once_network_is_up() {
    let lan = Ipv4Addr::new(192, 168, 1, 42);
    let mut board = SimBoard::new().with_network([None, Some(Ipv4Addr::LOCALHOST), Some(lan)]);
    let mut activity = BootIp::new(BootIpConfig::default());
    let (outcome, sink) = run_for(&mut activity, &mut board, Duration::from_secs(3600));

    assert!(!outcome.interrupted);
    assert_eq!(outcome.summary.address, Some(lan));
    assert_eq!(outcome.summary.attempts, 2);
    assert!(outcome.summary.connected());
    assert_eq!(board.rotation(), Rotation::R180);
    assert!(sink.contains(&ActivityEvent::IpFound { addr: lan }));
    assert!(sink.contains(&ActivityEvent::NoNetwork {
        attempt: 2,
        max_attempts: 10
    }));
    assert!(!sink.contains(&ActivityEvent::NetworkFailed));
    assert!(board.last_frame().unwrap().is_uniform(OFF));
}

#[test]
fn gives_up_after_max_attempts() {
    let mut board = SimBoard::new();
    let cfg = BootIpConfig {
        max_attempts: 3,
        ..BootIpConfig::default()
    };
    let mut activity = BootIp::new(cfg);
    let (outcome, sink) = run_for(&mut activity, &mut board, Duration::from_secs(3600));

    assert!(!outcome.interrupted);
    assert!(!outcome.summary.connected());
    assert_eq!(outcome.summary.attempts, 3);
    assert_eq!(
        sink.count(|e| matches!(e, ActivityEvent::NoNetwork { .. })),
        3
    );
    assert!(sink.contains(&ActivityEvent::NetworkFailed));
    assert!(outcome.summary.to_string().contains("after 3 attempts"));
}

#[test]
fn boot_delay_can_be_interrupted() {
    let mut board = SimBoard::new();
    let mut activity = BootIp::new(BootIpConfig::default());
    let (outcome, sink) = run_for(&mut activity, &mut board, Duration::from_secs(5));

    assert!(outcome.interrupted);
    assert_eq!(outcome.summary.attempts, 0);
    assert!(sink.contains(&ActivityEvent::WaitingForNetwork {
        delay: Duration::from_secs(15)
    }));
}
