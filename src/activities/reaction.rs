//! Reaction game: wait for the colour, then push the matching direction as
//! fast as possible.
//!
//! Each round ends in exactly one of: correct, wrong direction, too early.

use core::fmt;
use core::time::Duration;

use rand::Rng;

use super::{direction_colour, first_press};
use crate::app::events::ActivityEvent;
use crate::app::ports::{Clock, Joystick, LedMatrix};
use crate::app::runner::{Activity, Flow, Session};
use crate::config::ReactionConfig;
use crate::display::scroll::show_message;
use crate::display::{GREEN, GREY, OFF, RED};
use crate::error::Result;
use crate::stats::{Rating, ReactionStats};
use crate::stick::Direction;

/// Directions that can be asked for. Middle only starts the game.
pub const CHALLENGES: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

const START_DELAY: Duration = Duration::from_secs(1);
const RESPONSE_POLL: Duration = Duration::from_millis(10);
const RATING_SCROLL: Duration = Duration::from_millis(50);

/// Per-round feedback tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Amazing,
    Excellent,
    Good,
    NotBad,
}

impl Feedback {
    pub fn from_reaction(t: Duration) -> Self {
        match t.as_secs_f64() {
            s if s < 0.2 => Self::Amazing,
            s if s < 0.3 => Self::Excellent,
            s if s < 0.5 => Self::Good,
            _ => Self::NotBad,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Amazing => "AMAZING! Lightning fast!",
            Self::Excellent => "EXCELLENT! Very quick!",
            Self::Good => "GOOD! Nice reflexes!",
            Self::NotBad => "Not bad... but you can do better!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    WaitingForStart,
    Round(u32),
    Finished,
}

/// How one round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Correct(Duration),
    Wrong { pressed: Direction, expected: Direction },
    TooEarly,
}

pub struct ReactionGame<R> {
    cfg: ReactionConfig,
    rng: R,
    phase: Phase,
    outcomes: Vec<RoundOutcome>,
    times: ReactionStats,
}

impl<R: Rng> ReactionGame<R> {
    pub fn new(cfg: ReactionConfig, rng: R) -> Self {
        Self {
            cfg,
            rng,
            phase: Phase::WaitingForStart,
            outcomes: Vec::new(),
            times: ReactionStats::default(),
        }
    }

    fn wait_for_start<H>(&mut self, hw: &mut H, session: &mut Session<'_>) -> Result<Phase>
    where
        H: LedMatrix + Joystick + Clock + ?Sized,
    {
        let started = hw
            .poll_events()?
            .iter()
            .any(|e| e.is_press() && e.direction == Direction::Middle);
        if started {
            if self.cfg.rounds == 0 {
                return Ok(Phase::Finished);
            }
            session.pause(hw, START_DELAY)?;
            return Ok(Phase::Round(1));
        }
        session.pause(hw, Duration::from_millis(self.cfg.poll_ms))?;
        Ok(Phase::WaitingForStart)
    }

    /// Play one round; returns how it ended.
    fn play_round<H>(&mut self, hw: &mut H, session: &mut Session<'_>) -> Result<RoundOutcome>
    where
        H: LedMatrix + Joystick + Clock + ?Sized,
    {
        hw.clear(GREY)?;
        let wait = Duration::from_millis(
            self.rng
                .gen_range(self.cfg.min_wait_ms..=self.cfg.max_wait_ms),
        );
        let poll = Duration::from_millis(self.cfg.poll_ms);

        // Presses made during the previous result still count as early.
        let started = hw.now();
        while hw.now().saturating_sub(started) < wait {
            if first_press(hw)?.is_some() {
                return Ok(RoundOutcome::TooEarly);
            }
            session.pause(hw, poll)?;
        }

        let expected = CHALLENGES[self.rng.gen_range(0..CHALLENGES.len())];
        hw.clear(direction_colour(expected))?;
        hw.poll_events()?;
        let shown = hw.now();
        session.emit(ActivityEvent::Challenge {
            direction: expected,
        });

        let pressed = loop {
            if let Some(d) = first_press(hw)? {
                break d;
            }
            session.pause(hw, RESPONSE_POLL)?;
        };
        let reaction = hw.now().saturating_sub(shown);

        Ok(if pressed == expected {
            RoundOutcome::Correct(reaction)
        } else {
            RoundOutcome::Wrong { pressed, expected }
        })
    }

    fn finish<H>(&mut self, hw: &mut H) -> Result<()>
    where
        H: LedMatrix + Clock + ?Sized,
    {
        if let Some(rating) = self.times.rating() {
            show_message(hw, rating.label(), RATING_SCROLL, GREEN, OFF)?;
        }
        hw.clear(OFF)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReactionSummary {
    pub rounds: u32,
    pub outcomes: Vec<RoundOutcome>,
    pub times: ReactionStats,
}

impl ReactionSummary {
    pub fn played(&self) -> usize {
        self.outcomes.len()
    }

    pub fn correct(&self) -> usize {
        self.count(|o| matches!(o, RoundOutcome::Correct(_)))
    }

    pub fn wrong(&self) -> usize {
        self.count(|o| matches!(o, RoundOutcome::Wrong { .. }))
    }

    pub fn too_early(&self) -> usize {
        self.count(|o| matches!(o, RoundOutcome::TooEarly))
    }

    /// Correct answers as a share of all configured rounds.
    pub fn accuracy(&self) -> f32 {
        if self.rounds == 0 {
            return 0.0;
        }
        self.correct() as f32 * 100.0 / self.rounds as f32
    }

    pub fn rating(&self) -> Option<Rating> {
        self.times.rating()
    }

    fn count(&self, pred: impl Fn(&RoundOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

fn ms(d: Duration) -> u128 {
    d.as_millis()
}

impl fmt::Display for ReactionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== GAME OVER - FINAL RESULTS ===")?;
        writeln!(f, "   Correct: {}/{}", self.correct(), self.rounds)?;
        writeln!(f, "   Wrong direction: {}", self.wrong())?;
        writeln!(f, "   Too early: {}", self.too_early())?;
        if self.correct() > 0 {
            writeln!(f, "   Accuracy: {:.1}%", self.accuracy())?;
        }
        let (Some(best), Some(worst), Some(avg), Some(rating)) = (
            self.times.best(),
            self.times.worst(),
            self.times.average(),
            self.rating(),
        ) else {
            writeln!(f, "No successful reactions recorded!")?;
            return writeln!(f, "   Try again and wait for the color before pressing!");
        };
        writeln!(f, "   Best: {} ms", ms(best))?;
        writeln!(f, "   Worst: {} ms", ms(worst))?;
        writeln!(f, "   Average: {} ms", ms(avg))?;
        let all: Vec<String> = self
            .times
            .times()
            .iter()
            .map(|&t| format!("{}ms", ms(t)))
            .collect();
        writeln!(f, "   All times: {}", all.join(" "))?;
        writeln!(f, "Rating: {} {rating}", "*".repeat(rating.stars()))
    }
}

impl<H, R> Activity<H> for ReactionGame<R>
where
    H: LedMatrix + Joystick + Clock + ?Sized,
    R: Rng,
{
    type Summary = ReactionSummary;

    fn name(&self) -> &'static str {
        "reaction"
    }

    fn setup(&mut self, hw: &mut H, session: &mut Session<'_>) -> Result<()> {
        hw.clear(OFF)?;
        hw.poll_events()?;
        session.emit(ActivityEvent::WaitingForStart);
        Ok(())
    }

    fn step(&mut self, hw: &mut H, session: &mut Session<'_>) -> Result<Flow> {
        let phase = self.phase;
        self.phase = match phase {
            Phase::WaitingForStart => self.wait_for_start(hw, session)?,
            Phase::Round(round) => {
                session.emit(ActivityEvent::RoundStarted {
                    round,
                    rounds: self.cfg.rounds,
                });
                let outcome = self.play_round(hw, session)?;
                self.outcomes.push(outcome);

                match outcome {
                    RoundOutcome::Correct(t) => {
                        self.times.record(t);
                        hw.clear(GREEN)?;
                        session.emit(ActivityEvent::Correct {
                            reaction: t,
                            feedback: Feedback::from_reaction(t),
                        });
                    }
                    RoundOutcome::Wrong { pressed, expected } => {
                        hw.clear(RED)?;
                        session.emit(ActivityEvent::WrongDirection { pressed, expected });
                    }
                    RoundOutcome::TooEarly => {
                        hw.clear(RED)?;
                        session.emit(ActivityEvent::TooEarly);
                    }
                }
                session.pause(hw, Duration::from_millis(self.cfg.result_ms))?;
                hw.clear(OFF)?;
                if outcome != RoundOutcome::TooEarly {
                    session.pause(hw, Duration::from_millis(self.cfg.gap_ms))?;
                }

                if round >= self.cfg.rounds {
                    self.finish(hw)?;
                    Phase::Finished
                } else {
                    Phase::Round(round + 1)
                }
            }
            Phase::Finished => Phase::Finished,
        };
        Ok(match self.phase {
            Phase::Finished => Flow::Done,
            _ => Flow::Continue,
        })
    }

    fn cleanup(&mut self, hw: &mut H, _session: &mut Session<'_>) -> Result<()> {
        hw.clear(OFF)
    }

    fn summary(&self) -> ReactionSummary {
        ReactionSummary {
            rounds: self.cfg.rounds,
            outcomes: self.outcomes.clone(),
            times: self.times.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_tiers_are_strict() {
        assert_eq!(Feedback::from_reaction(Duration::from_millis(199)), Feedback::Amazing);
        assert_eq!(Feedback::from_reaction(Duration::from_millis(200)), Feedback::Excellent);
        assert_eq!(Feedback::from_reaction(Duration::from_millis(300)), Feedback::Good);
        assert_eq!(Feedback::from_reaction(Duration::from_millis(500)), Feedback::NotBad);
    }

    #[test]
    fn summary_counts_partition_rounds() {
        let mut times = ReactionStats::default();
        times.record(Duration::from_millis(240));
        let s = ReactionSummary {
            rounds: 3,
            outcomes: vec![
                RoundOutcome::Correct(Duration::from_millis(240)),
                RoundOutcome::TooEarly,
                RoundOutcome::Wrong {
                    pressed: Direction::Up,
                    expected: Direction::Down,
                },
            ],
            times,
        };
        assert_eq!(s.correct() + s.wrong() + s.too_early(), s.played());
        assert!((s.accuracy() - 33.333_332).abs() < 1e-3);
        let text = s.to_string();
        assert!(text.contains("Correct: 1/3"));
        assert!(text.contains("Best: 240 ms"));
        assert!(text.contains("Rating: ***** ELITE"));
    }

    #[test]
    fn summary_without_successes() {
        let s = ReactionSummary {
            rounds: 5,
            outcomes: vec![RoundOutcome::TooEarly; 5],
            times: ReactionStats::default(),
        };
        let text = s.to_string();
        assert!(text.contains("No successful reactions"));
        assert!(!text.contains("Accuracy"));
    }
}
