//! Joystick basics, digital dice and the reaction game.

use core::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use pi_workshop::activities::dice::DigitalDice;
use pi_workshop::activities::direction_colour;
use pi_workshop::activities::joystick::JoystickBasics;
use pi_workshop::activities::reaction::{ReactionGame, RoundOutcome, CHALLENGES};
use pi_workshop::adapters::sim::SimBoard;
use pi_workshop::app::events::ActivityEvent;
use pi_workshop::config::{DiceConfig, JoystickConfig, ReactionConfig};
use pi_workshop::display::{GREY, OFF, RED};
use pi_workshop::sensors::Acceleration;
use pi_workshop::stick::{Action, Direction, StickEvent};

use crate::mock_hw::{colour_sequence, run_for};

fn secs(s: f32) -> Duration {
    Duration::from_secs_f32(s)
}

// ── Joystick basics ───────────────────────────────────────────

#[test]
fn joystick_counts_presses_and_ignores_releases() {
    let mut board = SimBoard::new()
        .schedule(Duration::from_millis(100), StickEvent::pressed(Direction::Up))
        .schedule(
            Duration::from_millis(150),
            StickEvent {
                direction: Direction::Up,
                action: Action::Released,
            },
        )
        .schedule(Duration::from_millis(500), StickEvent::pressed(Direction::Up))
        .schedule(Duration::from_secs(1), StickEvent::pressed(Direction::Left));
    let mut joystick = JoystickBasics::new(JoystickConfig::default());
    let (outcome, sink) = run_for(&mut joystick, &mut board, Duration::from_secs(3));

    assert!(outcome.interrupted);
    let presses = &outcome.summary.presses;
    assert_eq!(presses.total(), 3);
    assert_eq!(presses.count(Direction::Up), 2);
    assert_eq!(presses.count(Direction::Left), 1);
    assert_eq!(presses.most_common(), Some((Direction::Up, 2)));

    assert!(sink.contains(&ActivityEvent::StickPressed {
        direction: Direction::Up,
        count: 2
    }));
    assert_eq!(
        colour_sequence(board.frames()),
        vec![
            OFF,
            RED,
            OFF,
            RED,
            OFF,
            direction_colour(Direction::Left),
            OFF
        ]
    );
    assert!(outcome.summary.to_string().contains("Most pressed: UP (2 times)"));
}

#[test]
fn joystick_without_presses_reports_zero() {
    let mut board = SimBoard::new();
    let mut joystick = JoystickBasics::new(JoystickConfig::default());
    let (outcome, _) = run_for(&mut joystick, &mut board, Duration::from_secs(1));
    assert_eq!(outcome.summary.presses.total(), 0);
    assert!(outcome.summary.to_string().contains("Total presses: 0"));
}

// ── Dice ──────────────────────────────────────────────────────

fn shaken_once() -> SimBoard {
    SimBoard::new().with_acceleration(|t| {
        if t >= Duration::from_secs(1) && t < secs(1.2) {
            Acceleration::new(1.2, 0.8, 1.0)
        } else {
            Acceleration::AT_REST
        }
    })
}

#[test]
fn one_shake_rolls_once() {
    let mut board = shaken_once();
    let mut dice = DigitalDice::new(DiceConfig::default(), StdRng::seed_from_u64(7));
    let (outcome, sink) = run_for(&mut dice, &mut board, Duration::from_secs(10));

    let s = &outcome.summary;
    assert_eq!(s.history.len(), 1);
    assert!((1..=6).contains(&s.history[0]));
    assert_eq!(s.faces.total(), 1);
    assert_eq!(s.faces.count(s.history[0]), 1);
    assert_eq!(sink.count(|e| matches!(e, ActivityEvent::ShakeDetected)), 1);
    assert!(sink.contains(&ActivityEvent::DiceRolled {
        face: s.history[0],
        total_rolls: 1
    }));
    assert_eq!(
        sink.count(|e| matches!(e, ActivityEvent::DiceReady { .. })),
        1
    );
}

#[test]
fn same_seed_same_rolls() {
    let play = || {
        let mut board = SimBoard::new().with_acceleration(|t| {
            // Shaken for the first 200 ms of every 5 s.
            if t.as_millis() % 5000 < 200 {
                Acceleration::new(0.0, 0.0, 2.0)
            } else {
                Acceleration::AT_REST
            }
        });
        let mut dice = DigitalDice::new(DiceConfig::default(), StdRng::seed_from_u64(42));
        run_for(&mut dice, &mut board, Duration::from_secs(30)).0.summary
    };
    let a = play();
    let b = play();
    assert!(a.history.len() >= 5);
    assert_eq!(a.history, b.history);
    let avg = a.average().unwrap();
    assert!((1.0..=6.0).contains(&avg));
}

#[test]
fn no_shake_no_rolls() {
    let mut board = SimBoard::new();
    let mut dice = DigitalDice::new(DiceConfig::default(), StdRng::seed_from_u64(1));
    let (outcome, _) = run_for(&mut dice, &mut board, Duration::from_secs(5));
    assert!(outcome.summary.history.is_empty());
    assert!(outcome.summary.to_string().contains("No rolls recorded"));
    assert!(board.last_frame().unwrap().is_uniform(OFF));
}

// ── Reaction game ─────────────────────────────────────────────

/// Presses the matching direction `delay` after a challenge colour appears.
fn perfect_player(delay: Duration) -> SimBoard {
    let mut seen: Option<(Duration, Direction)> = None;
    SimBoard::new()
        .schedule(Duration::from_millis(200), StickEvent::pressed(Direction::Middle))
        .with_responder(move |now, frame| {
            let Some(d) = CHALLENGES
                .iter()
                .copied()
                .find(|&d| frame.is_uniform(direction_colour(d)))
            else {
                seen = None;
                return None;
            };
            match seen {
                Some((since, s)) if s == d && now.saturating_sub(since) >= delay => {
                    seen = None;
                    Some(StickEvent::pressed(d))
                }
                Some((_, s)) if s == d => None,
                _ => {
                    seen = Some((now, d));
                    None
                }
            }
        })
}

#[test]
fn reaction_perfect_player_wins_every_round() {
    let mut board = perfect_player(Duration::from_millis(250));
    let cfg = ReactionConfig {
        rounds: 3,
        ..ReactionConfig::default()
    };
    let mut game = ReactionGame::new(cfg, StdRng::seed_from_u64(3));
    let (outcome, sink) = run_for(&mut game, &mut board, Duration::from_secs(120));

    assert!(!outcome.interrupted);
    let s = &outcome.summary;
    assert_eq!(s.played(), 3);
    assert_eq!(s.correct(), 3);
    assert_eq!(s.correct() + s.wrong() + s.too_early(), s.played());
    assert!((s.accuracy() - 100.0).abs() < 1e-3);
    assert!(s
        .times
        .times()
        .iter()
        .all(|&t| t == Duration::from_millis(250)));
    assert_eq!(sink.count(|e| matches!(e, ActivityEvent::Challenge { .. })), 3);
    assert!(sink.contains(&ActivityEvent::RoundStarted { round: 3, rounds: 3 }));
    assert!(s.rating().is_some());
    assert!(board.last_frame().unwrap().is_uniform(OFF));
}

#[test]
fn reaction_press_during_wait_is_too_early() {
    let mut board = SimBoard::new()
        .schedule(Duration::from_millis(200), StickEvent::pressed(Direction::Middle))
        // The round starts at 1.2 s and waits at least a second.
        .schedule(Duration::from_millis(1700), StickEvent::pressed(Direction::Up));
    let cfg = ReactionConfig {
        rounds: 1,
        ..ReactionConfig::default()
    };
    let mut game = ReactionGame::new(cfg, StdRng::seed_from_u64(9));
    let (outcome, sink) = run_for(&mut game, &mut board, Duration::from_secs(60));

    assert!(!outcome.interrupted);
    let s = &outcome.summary;
    assert_eq!(s.outcomes, vec![RoundOutcome::TooEarly]);
    assert!(s.times.is_empty());
    assert!(s.rating().is_none());
    assert!(sink.contains(&ActivityEvent::TooEarly));
    assert_eq!(sink.count(|e| matches!(e, ActivityEvent::Challenge { .. })), 0);
    assert!(s.to_string().contains("No successful reactions"));
}

#[test]
fn reaction_wrong_direction_is_recorded() {
    // Answers MIDDLE, never a valid challenge, on the second poll that
    // sees the challenge colour (the first one is the stale-input flush).
    let mut sightings = 0u32;
    let mut board = SimBoard::new()
        .schedule(Duration::from_millis(200), StickEvent::pressed(Direction::Middle))
        .with_responder(move |_, frame| {
            let challenged = CHALLENGES
                .iter()
                .any(|&d| frame.is_uniform(direction_colour(d)));
            if !challenged {
                sightings = 0;
                return None;
            }
            sightings += 1;
            (sightings == 2).then(|| StickEvent::pressed(Direction::Middle))
        });
    let cfg = ReactionConfig {
        rounds: 2,
        ..ReactionConfig::default()
    };
    let mut game = ReactionGame::new(cfg, StdRng::seed_from_u64(11));
    let (outcome, _) = run_for(&mut game, &mut board, Duration::from_secs(60));

    let s = &outcome.summary;
    assert_eq!(s.wrong(), 2);
    assert_eq!(s.correct(), 0);
    assert!(s.outcomes.iter().all(|o| matches!(
        o,
        RoundOutcome::Wrong {
            pressed: Direction::Middle,
            ..
        }
    )));
    assert_eq!(s.accuracy(), 0.0);
}

#[test]
fn reaction_press_during_result_counts_in_next_round() {
    // Fixed 1 s wait: round 1 starts at 1.2 s, the challenge shows at
    // 2.2 s, the answer lands at 2.45 s and RED/GREEN stays up until 3.45 s.
    let mut board = perfect_player(Duration::from_millis(250))
        .schedule(Duration::from_millis(3000), StickEvent::pressed(Direction::Up));
    let cfg = ReactionConfig {
        rounds: 2,
        min_wait_ms: 1000,
        max_wait_ms: 1000,
        ..ReactionConfig::default()
    };
    let mut game = ReactionGame::new(cfg, StdRng::seed_from_u64(21));
    let (outcome, sink) = run_for(&mut game, &mut board, Duration::from_secs(60));

    let s = &outcome.summary;
    assert_eq!(s.played(), 2);
    assert!(matches!(s.outcomes[0], RoundOutcome::Correct(_)));
    assert_eq!(s.outcomes[1], RoundOutcome::TooEarly);
    assert_eq!(sink.count(|e| matches!(e, ActivityEvent::Challenge { .. })), 1);
}

#[test]
fn reaction_with_no_rounds_plays_nothing() {
    let mut board = SimBoard::new()
        .schedule(Duration::from_millis(200), StickEvent::pressed(Direction::Middle));
    let cfg = ReactionConfig {
        rounds: 0,
        ..ReactionConfig::default()
    };
    let mut game = ReactionGame::new(cfg, StdRng::seed_from_u64(2));
    let (outcome, sink) = run_for(&mut game, &mut board, Duration::from_secs(10));

    assert!(!outcome.interrupted);
    assert_eq!(outcome.summary.played(), 0);
    assert!(!sink.contains(&ActivityEvent::RoundStarted { round: 1, rounds: 0 }));
}

#[test]
fn reaction_waits_for_middle_button() {
    let mut board = SimBoard::new()
        .schedule(Duration::from_millis(300), StickEvent::pressed(Direction::Up));
    let mut game = ReactionGame::new(ReactionConfig::default(), StdRng::seed_from_u64(5));
    let (outcome, sink) = run_for(&mut game, &mut board, Duration::from_secs(5));

    assert!(outcome.interrupted);
    assert_eq!(outcome.summary.played(), 0);
    assert!(sink.contains(&ActivityEvent::WaitingForStart));
    assert!(!board.frames().iter().any(|f| f.is_uniform(GREY)));
}
