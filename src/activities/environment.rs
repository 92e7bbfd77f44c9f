//! Environment monitor: temperature, humidity and pressure every few
//! seconds, with the matrix coloured by how the temperature feels.

use core::fmt;
use core::time::Duration;

use crate::app::events::ActivityEvent;
use crate::app::ports::{Clock, EnvironmentSensors, LedMatrix};
use crate::app::runner::{Activity, Flow, Session};
use crate::config::EnvironmentConfig;
use crate::display::{Rgb, BLUE, GREEN, OFF, RED};
use crate::error::Result;
use crate::sensors::EnvironmentReading;
use crate::stats::Tally;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comfort {
    Hot,
    Comfortable,
    Cold,
}

impl Comfort {
    pub const ALL: [Self; 3] = [Self::Hot, Self::Comfortable, Self::Cold];

    /// Both bounds are strict: exactly `hot_above` is still comfortable.
    pub fn classify(temperature_c: f32, hot_above: f32, cold_below: f32) -> Self {
        if temperature_c > hot_above {
            Self::Hot
        } else if temperature_c < cold_below {
            Self::Cold
        } else {
            Self::Comfortable
        }
    }

    pub fn colour(self) -> Rgb {
        match self {
            Self::Hot => RED,
            Self::Comfortable => GREEN,
            Self::Cold => BLUE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Hot => "Hot!",
            Self::Comfortable => "Comfortable!",
            Self::Cold => "Cold!",
        }
    }
}

pub struct EnvironmentMonitor {
    cfg: EnvironmentConfig,
    tally: Tally<Comfort>,
    last: Option<EnvironmentReading>,
}

impl EnvironmentMonitor {
    pub fn new(cfg: EnvironmentConfig) -> Self {
        Self {
            cfg,
            tally: Tally::new(Comfort::ALL),
            last: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentSummary {
    pub readings: u32,
    pub per_status: Tally<Comfort>,
    pub last: Option<EnvironmentReading>,
}

impl fmt::Display for EnvironmentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== ENVIRONMENT MONITOR STOPPED ===")?;
        writeln!(f, "Readings taken: {}", self.readings)?;
        for (status, n) in self.per_status.iter() {
            writeln!(f, "  {:<13} {n}", status.label())?;
        }
        if let Some(r) = self.last {
            writeln!(
                f,
                "Last reading: {:.1}\u{b0}C, {:.1}%, {:.1} mb",
                r.temperature_c, r.humidity_pct, r.pressure_mbar
            )?;
        }
        writeln!(f, "Display cleared. Goodbye!")
    }
}

impl<H> Activity<H> for EnvironmentMonitor
where
    H: LedMatrix + EnvironmentSensors + Clock + ?Sized,
{
    type Summary = EnvironmentSummary;

    fn name(&self) -> &'static str {
        "environment"
    }

    fn setup(&mut self, hw: &mut H, _session: &mut Session<'_>) -> Result<()> {
        hw.clear(OFF)
    }

    fn step(&mut self, hw: &mut H, session: &mut Session<'_>) -> Result<Flow> {
        let mut reading = hw.read_environment()?;
        reading.temperature_c -= self.cfg.temperature_offset_c;
        let reading = reading.rounded();

        let comfort = Comfort::classify(
            reading.temperature_c,
            self.cfg.hot_above_c,
            self.cfg.cold_below_c,
        );
        hw.clear(comfort.colour())?;
        self.tally.record(comfort);
        self.last = Some(reading);
        session.emit(ActivityEvent::EnvironmentRead { reading, comfort });

        session.pause(hw, Duration::from_millis(self.cfg.interval_ms))?;
        Ok(Flow::Continue)
    }

    fn cleanup(&mut self, hw: &mut H, _session: &mut Session<'_>) -> Result<()> {
        hw.clear(OFF)
    }

    fn summary(&self) -> EnvironmentSummary {
        EnvironmentSummary {
            readings: self.tally.total(),
            per_status: self.tally.clone(),
            last: self.last,
        }
    }
}
