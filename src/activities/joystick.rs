//! Joystick basics: every press lights the matrix in the direction's
//! colour and is counted. Statistics are printed on exit.

use core::fmt;
use core::time::Duration;

use super::direction_colour;
use crate::app::events::ActivityEvent;
use crate::app::ports::{Clock, Joystick, LedMatrix};
use crate::app::runner::{Activity, Flow, Session};
use crate::config::JoystickConfig;
use crate::display::OFF;
use crate::error::Result;
use crate::stats::{bar, Tally};
use crate::stick::Direction;

pub struct JoystickBasics {
    cfg: JoystickConfig,
    presses: Tally<Direction>,
}

impl JoystickBasics {
    pub fn new(cfg: JoystickConfig) -> Self {
        Self {
            cfg,
            presses: Tally::new(Direction::ALL),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JoystickSummary {
    pub presses: Tally<Direction>,
}

impl fmt::Display for JoystickSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.presses.total();
        writeln!(f, "=== JOYSTICK STATISTICS ===")?;
        writeln!(f, "Total presses: {total}")?;
        for (direction, n) in self.presses.iter() {
            writeln!(
                f,
                "{:6}: {n:3} ({:5.1}%) {}",
                direction.name().to_uppercase(),
                self.presses.percentage(direction),
                bar(n)
            )?;
        }
        if let Some((direction, n)) = self.presses.most_common() {
            writeln!(
                f,
                "Most pressed: {} ({n} times)",
                direction.name().to_uppercase()
            )?;
        }
        Ok(())
    }
}

impl<H> Activity<H> for JoystickBasics
where
    H: LedMatrix + Joystick + Clock + ?Sized,
{
    type Summary = JoystickSummary;

    fn name(&self) -> &'static str {
        "joystick"
    }

    fn setup(&mut self, hw: &mut H, _session: &mut Session<'_>) -> Result<()> {
        hw.clear(OFF)
    }

    fn step(&mut self, hw: &mut H, session: &mut Session<'_>) -> Result<Flow> {
        let events = hw.poll_events()?;
        let mut pressed = false;
        for event in events.into_iter().filter(|e| e.is_press()) {
            pressed = true;
            let Some(count) = self.presses.record(event.direction) else {
                continue;
            };
            hw.clear(direction_colour(event.direction))?;
            session.emit(ActivityEvent::StickPressed {
                direction: event.direction,
                count,
            });
            session.pause(hw, Duration::from_millis(self.cfg.flash_ms))?;
            hw.clear(OFF)?;
        }
        if !pressed {
            session.pause(hw, Duration::from_millis(self.cfg.poll_ms))?;
        }
        Ok(Flow::Continue)
    }

    fn cleanup(&mut self, hw: &mut H, _session: &mut Session<'_>) -> Result<()> {
        hw.clear(OFF)
    }

    fn summary(&self) -> JoystickSummary {
        JoystickSummary {
            presses: self.presses.clone(),
        }
    }
}
