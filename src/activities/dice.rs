//! Digital dice: shake the board to roll.

use core::fmt;
use core::time::Duration;

use rand::Rng;

use crate::app::events::ActivityEvent;
use crate::app::ports::{Clock, LedMatrix, MotionSensors};
use crate::app::runner::{Activity, Flow, Session};
use crate::config::DiceConfig;
use crate::display::patterns::dice_face;
use crate::display::{GREEN, OFF};
use crate::error::Result;
use crate::sensors::Acceleration;
use crate::stats::{bar, Tally};

const SETTLE: Duration = Duration::from_millis(300);
const CONFIRM: Duration = Duration::from_millis(200);
const AFTER_ROLL: Duration = Duration::from_secs(1);

/// A shake is total acceleration strictly above `threshold` g.
pub fn is_shake(a: Acceleration, threshold: f32) -> bool {
    a.magnitude() > threshold
}

pub struct DigitalDice<R> {
    cfg: DiceConfig,
    rng: R,
    history: Vec<u8>,
    faces: Tally<u8>,
}

impl<R: Rng> DigitalDice<R> {
    pub fn new(cfg: DiceConfig, rng: R) -> Self {
        Self {
            cfg,
            rng,
            history: Vec::new(),
            faces: Tally::new(1..=6),
        }
    }

    fn roll(&mut self) -> u8 {
        self.rng.gen_range(1..=6)
    }
}

fn show_face<H: LedMatrix + ?Sized>(hw: &mut H, face: u8) -> Result<()> {
    match dice_face(face) {
        Some(frame) => hw.set_frame(&frame),
        None => hw.clear(OFF),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiceSummary {
    pub history: Vec<u8>,
    pub faces: Tally<u8>,
}

impl DiceSummary {
    pub fn average(&self) -> Option<f64> {
        if self.history.is_empty() {
            return None;
        }
        let sum: u32 = self.history.iter().map(|&f| u32::from(f)).sum();
        Some(f64::from(sum) / self.history.len() as f64)
    }
}

impl fmt::Display for DiceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== DICE ROLLING STATISTICS ===")?;
        let (Some(avg), Some(most), Some(least)) = (
            self.average(),
            self.faces.most_common(),
            self.faces.least_common(),
        ) else {
            return writeln!(f, "No rolls recorded - you didn't shake the Pi!");
        };
        writeln!(f, "Total rolls: {}", self.history.len())?;
        writeln!(f, "Roll history: {:?}", self.history)?;
        writeln!(f, "Frequency:")?;
        for (face, n) in self.faces.iter() {
            writeln!(
                f,
                "  {face}: {n:2} times ({:5.1}%) {}",
                self.faces.percentage(face),
                bar(n)
            )?;
        }
        writeln!(f, "Most rolled: {} ({} times)", most.0, most.1)?;
        writeln!(f, "Least rolled: {} ({} times)", least.0, least.1)?;
        writeln!(f, "Average roll: {avg:.2}")?;
        writeln!(f, "   (Expected average: 3.50)")
    }
}

impl<H, R> Activity<H> for DigitalDice<R>
where
    H: LedMatrix + MotionSensors + Clock + ?Sized,
    R: Rng,
{
    type Summary = DiceSummary;

    fn name(&self) -> &'static str {
        "dice"
    }

    fn setup(&mut self, hw: &mut H, session: &mut Session<'_>) -> Result<()> {
        let face = self.roll();
        show_face(hw, face)?;
        session.emit(ActivityEvent::DiceReady { face });
        Ok(())
    }

    fn step(&mut self, hw: &mut H, session: &mut Session<'_>) -> Result<Flow> {
        if is_shake(hw.acceleration()?, self.cfg.shake_threshold_g) {
            session.emit(ActivityEvent::ShakeDetected);

            let frame_time = Duration::from_millis(self.cfg.animation_ms);
            for _ in 0..self.cfg.animation_frames {
                let face = self.roll();
                show_face(hw, face)?;
                session.pause(hw, frame_time)?;
            }

            let face = self.roll();
            show_face(hw, face)?;
            session.pause(hw, SETTLE)?;
            hw.clear(GREEN)?;
            session.pause(hw, CONFIRM)?;
            show_face(hw, face)?;

            self.history.push(face);
            self.faces.record(face);
            session.emit(ActivityEvent::DiceRolled {
                face,
                total_rolls: self.history.len(),
            });
            session.pause(hw, AFTER_ROLL)?;
        }
        session.pause(hw, Duration::from_millis(self.cfg.poll_ms))?;
        Ok(Flow::Continue)
    }

    fn cleanup(&mut self, hw: &mut H, _session: &mut Session<'_>) -> Result<()> {
        hw.clear(OFF)
    }

    fn summary(&self) -> DiceSummary {
        DiceSummary {
            history: self.history.clone(),
            faces: self.faces.clone(),
        }
    }
}
