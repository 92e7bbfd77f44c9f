//! Digital spirit level: light the edge of the matrix that points down.

use core::fmt;
use core::time::Duration;

use crate::app::events::ActivityEvent;
use crate::app::ports::{Clock, LedMatrix, MotionSensors};
use crate::app::runner::{Activity, Flow, Session};
use crate::config::SpiritLevelConfig;
use crate::display::patterns::{edge_frame, level_frame, Edge};
use crate::display::{Frame, CYAN, OFF};
use crate::error::Result;
use crate::sensors::signed_angle;
use crate::stats::Tally;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tilt {
    /// Nose down, bottom edge lit.
    Forward,
    /// Nose up, top edge lit.
    Backward,
    Right,
    Left,
    Level,
}

impl Tilt {
    pub const ALL: [Self; 5] = [
        Self::Forward,
        Self::Backward,
        Self::Right,
        Self::Left,
        Self::Level,
    ];

    /// Classify signed pitch and roll (degrees in `(-180, 180]`).
    ///
    /// Pitch is checked before roll and every comparison is strict.
    pub fn classify(pitch: f32, roll: f32, threshold: f32) -> Self {
        if pitch < -threshold {
            Self::Forward
        } else if pitch > threshold {
            Self::Backward
        } else if roll < -threshold {
            Self::Right
        } else if roll > threshold {
            Self::Left
        } else {
            Self::Level
        }
    }

    pub fn frame(self) -> Frame {
        match self {
            Self::Forward => edge_frame(Edge::Bottom, CYAN),
            Self::Backward => edge_frame(Edge::Top, CYAN),
            Self::Right => edge_frame(Edge::Right, CYAN),
            Self::Left => edge_frame(Edge::Left, CYAN),
            Self::Level => level_frame(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Forward => "Tilted FORWARD (bottom down)",
            Self::Backward => "Tilted BACKWARD (top down)",
            Self::Right => "Tilted RIGHT",
            Self::Left => "Tilted LEFT",
            Self::Level => "LEVEL",
        }
    }
}

pub struct SpiritLevel {
    cfg: SpiritLevelConfig,
    samples: Tally<Tilt>,
}

impl SpiritLevel {
    pub fn new(cfg: SpiritLevelConfig) -> Self {
        Self {
            cfg,
            samples: Tally::new(Tilt::ALL),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpiritLevelSummary {
    pub samples: Tally<Tilt>,
}

impl fmt::Display for SpiritLevelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== DIGITAL SPIRIT LEVEL STOPPED ===")?;
        writeln!(f, "Samples: {}", self.samples.total())?;
        for (tilt, n) in self.samples.iter() {
            writeln!(f, "  {:<30} {n:4} ({:5.1}%)", tilt.label(), self.samples.percentage(tilt))?;
        }
        writeln!(f, "Display cleared. Goodbye!")
    }
}

impl<H> Activity<H> for SpiritLevel
where
    H: LedMatrix + MotionSensors + Clock + ?Sized,
{
    type Summary = SpiritLevelSummary;

    fn name(&self) -> &'static str {
        "spirit-level"
    }

    fn setup(&mut self, hw: &mut H, _session: &mut Session<'_>) -> Result<()> {
        hw.clear(OFF)
    }

    fn step(&mut self, hw: &mut H, session: &mut Session<'_>) -> Result<Flow> {
        let o = hw.orientation()?;
        let pitch = signed_angle(o.pitch);
        let roll = signed_angle(o.roll);
        let tilt = Tilt::classify(pitch, roll, self.cfg.threshold_deg);

        hw.set_frame(&tilt.frame())?;
        self.samples.record(tilt);
        session.emit(ActivityEvent::TiltSample { tilt, pitch, roll });

        session.pause(hw, Duration::from_millis(self.cfg.interval_ms))?;
        Ok(Flow::Continue)
    }

    fn cleanup(&mut self, hw: &mut H, _session: &mut Session<'_>) -> Result<()> {
        hw.clear(OFF)
    }

    fn summary(&self) -> SpiritLevelSummary {
        SpiritLevelSummary {
            samples: self.samples.clone(),
        }
    }
}
