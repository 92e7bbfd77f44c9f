//! Scroll a greeting across the matrix once.

use core::fmt;
use core::time::Duration;

use crate::app::events::ActivityEvent;
use crate::app::ports::{Clock, LedMatrix};
use crate::app::runner::{Activity, Flow, Session};
use crate::config::HelloConfig;
use crate::display::scroll::show_message;
use crate::display::OFF;
use crate::error::Result;

pub struct Hello {
    cfg: HelloConfig,
    shown: bool,
}

impl Hello {
    pub fn new(cfg: HelloConfig) -> Self {
        Self { cfg, shown: false }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelloSummary {
    pub message: String,
    pub shown: bool,
}

impl fmt::Display for HelloSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.shown {
            writeln!(f, "Message displayed successfully!")
        } else {
            writeln!(f, "Message was not displayed.")
        }
    }
}

impl<H> Activity<H> for Hello
where
    H: LedMatrix + Clock + ?Sized,
{
    type Summary = HelloSummary;

    fn name(&self) -> &'static str {
        "hello"
    }

    fn setup(&mut self, _hw: &mut H, _session: &mut Session<'_>) -> Result<()> {
        Ok(())
    }

    fn step(&mut self, hw: &mut H, session: &mut Session<'_>) -> Result<Flow> {
        show_message(
            hw,
            &self.cfg.message,
            Duration::from_millis(self.cfg.scroll_ms),
            self.cfg.colour,
            self.cfg.background,
        )?;
        hw.clear(OFF)?;
        self.shown = true;
        session.emit(ActivityEvent::MessageShown {
            text: self.cfg.message.clone(),
        });
        Ok(Flow::Done)
    }

    fn cleanup(&mut self, hw: &mut H, _session: &mut Session<'_>) -> Result<()> {
        hw.clear(OFF)
    }

    fn summary(&self) -> HelloSummary {
        HelloSummary {
            message: self.cfg.message.clone(),
            shown: self.shown,
        }
    }
}
