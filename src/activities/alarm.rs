//! Intruder alarm: watch for a temperature rise or movement, then flash,
//! photograph and log the intruder.
//!
//! ```text
//!            trigger && !cooldown
//!   Armed ────────────────────────▶ Triggered ──▶ (photo, log) ──▶ Cooldown
//!     ▲                                                              │
//!     └───────────────── cooldown elapsed ───────────────────────────┘
//! ```
//!
//! The matrix shows exactly one of green (armed), red (triggered) or
//! yellow (cooldown). Both triggers compare strictly, and there is no
//! cooldown before the first alarm.

use core::fmt;
use core::time::Duration;
use std::path::PathBuf;

use log::{info, warn};

use super::{countdown_tick, flash};
use crate::app::events::ActivityEvent;
use crate::app::ports::{
    Camera, CaptureSettings, Clock, EnvironmentSensors, LedMatrix, MotionSensors,
};
use crate::app::runner::{Activity, Flow, Session};
use crate::archive::{alarm_log_line, timestamp, PhotoArchive, ALARM_LOG};
use crate::config::AlarmConfig;
use crate::display::{Rotation, GREEN, OFF, RED, YELLOW};
use crate::error::Result;

const CONFIRM_FLASHES: u32 = 3;
const CONFIRM_FLASH: Duration = Duration::from_millis(200);

/// What tripped the alarm. The tag goes into file names and the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Heat,
    Motion,
    HeatAndMotion,
}

impl Trigger {
    pub fn from_flags(heat: bool, motion: bool) -> Option<Self> {
        match (heat, motion) {
            (true, true) => Some(Self::HeatAndMotion),
            (true, false) => Some(Self::Heat),
            (false, true) => Some(Self::Motion),
            (false, false) => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Heat => "HEAT",
            Self::Motion => "MOTION",
            Self::HeatAndMotion => "HEAT+MOTION",
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Outcome of one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Armed,
    Cooldown,
    Triggered(Trigger),
}

/// Decide the alarm state from the current deltas.
pub fn judge(
    temp_change: f32,
    movement: f32,
    in_cooldown: bool,
    temp_threshold: f32,
    movement_threshold: f32,
) -> Verdict {
    let trigger = Trigger::from_flags(temp_change > temp_threshold, movement > movement_threshold);
    match trigger {
        Some(t) if !in_cooldown => Verdict::Triggered(t),
        _ if in_cooldown => Verdict::Cooldown,
        _ => Verdict::Armed,
    }
}

/// True while `now` is less than `cooldown` after the last alarm.
pub fn in_cooldown(last_alarm: Option<Duration>, now: Duration, cooldown: Duration) -> bool {
    last_alarm.is_some_and(|t| now.saturating_sub(t) < cooldown)
}

pub struct IntruderAlarm<C> {
    cfg: AlarmConfig,
    capture: CaptureSettings,
    scroll: Duration,
    camera: C,
    archive: PhotoArchive,
    baseline_c: f32,
    last_alarm: Option<Duration>,
    evidence: Vec<PathBuf>,
    triggers: Vec<Trigger>,
}

impl<C: Camera> IntruderAlarm<C> {
    pub fn new(cfg: AlarmConfig, capture: CaptureSettings, scroll: Duration, camera: C) -> Self {
        let archive = PhotoArchive::new(cfg.photos_dir());
        Self {
            cfg,
            capture,
            scroll,
            camera,
            archive,
            baseline_c: 0.0,
            last_alarm: None,
            evidence: Vec::new(),
            triggers: Vec::new(),
        }
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    fn respond<H>(
        &mut self,
        hw: &mut H,
        session: &mut Session<'_>,
        trigger: Trigger,
        current_c: f32,
    ) -> Result<()>
    where
        H: LedMatrix + Clock + ?Sized,
    {
        flash(
            hw,
            session,
            RED,
            self.cfg.flash_count,
            Duration::from_millis(self.cfg.flash_ms),
        )?;
        hw.clear(RED)?;
        session.pause(hw, Duration::from_millis(self.cfg.exposure_ms))?;

        let stamp = timestamp(&hw.local_time());
        let file = format!("INTRUDER_{}_{stamp}.jpg", trigger.tag());
        let path = self.archive.path_for(&file);
        self.camera.capture_file(&path)?;
        self.archive
            .append_line(ALARM_LOG, &alarm_log_line(&stamp, trigger.tag(), &file))?;
        info!("alarm evidence saved to {}", path.display());
        self.evidence.push(path.clone());
        self.triggers.push(trigger);
        session.emit(ActivityEvent::EvidenceSaved { path });

        flash(hw, session, GREEN, CONFIRM_FLASHES, CONFIRM_FLASH)?;

        self.baseline_c = current_c;
        self.last_alarm = Some(hw.now());
        session.emit(ActivityEvent::CooldownStarted {
            cooldown: Duration::from_millis(self.cfg.cooldown_ms),
        });
        hw.clear(GREEN)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlarmSummary {
    pub folder: PathBuf,
    pub alarms: usize,
    pub evidence: Vec<PathBuf>,
    pub triggers: Vec<Trigger>,
}

impl fmt::Display for AlarmSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== SYSTEM DISARMED ===")?;
        writeln!(f, "Alarms raised: {}", self.alarms)?;
        for (path, trigger) in self.evidence.iter().zip(&self.triggers) {
            writeln!(f, "  [{trigger}] {}", path.display())?;
        }
        writeln!(f, "All evidence stored in: {}", self.folder.display())?;
        writeln!(f, "Check {ALARM_LOG} for event history")
    }
}

impl<H, C> Activity<H> for IntruderAlarm<C>
where
    H: LedMatrix + EnvironmentSensors + MotionSensors + Clock + ?Sized,
    C: Camera,
{
    type Summary = AlarmSummary;

    fn name(&self) -> &'static str {
        "alarm"
    }

    fn setup(&mut self, hw: &mut H, session: &mut Session<'_>) -> Result<()> {
        self.camera.start(&self.capture)?;
        if self.archive.ensure()? {
            session.emit(ActivityEvent::FolderCreated {
                path: self.archive.dir().to_path_buf(),
            });
        }

        self.baseline_c = hw.temperature()?;
        hw.set_rotation(Rotation::R0)?;
        session.pause(hw, Duration::from_millis(self.cfg.settle_ms))?;
        session.emit(ActivityEvent::AlarmCalibrated {
            baseline_c: self.baseline_c,
        });

        for n in (1..=self.cfg.arm_countdown).rev() {
            countdown_tick(hw, session, n, YELLOW, YELLOW, self.scroll, Duration::ZERO)?;
        }
        hw.clear(GREEN)?;
        session.emit(ActivityEvent::AlarmArmed);
        Ok(())
    }

    fn step(&mut self, hw: &mut H, session: &mut Session<'_>) -> Result<Flow> {
        let current_c = hw.temperature()?;
        let accel = hw.acceleration()?;
        let temp_change = (current_c - self.baseline_c).abs();
        let movement = accel.deviation_from_rest();
        let cooling = in_cooldown(
            self.last_alarm,
            hw.now(),
            Duration::from_millis(self.cfg.cooldown_ms),
        );

        if self.cfg.debug {
            session.emit(ActivityEvent::AlarmReading {
                temp_change,
                movement,
            });
        }

        match judge(
            temp_change,
            movement,
            cooling,
            self.cfg.temp_threshold_c,
            self.cfg.movement_threshold_g,
        ) {
            Verdict::Triggered(trigger) => {
                warn!("intruder detected: {trigger}");
                session.emit(ActivityEvent::IntruderDetected {
                    trigger,
                    temp_change,
                    movement,
                });
                self.respond(hw, session, trigger, current_c)?;
            }
            Verdict::Cooldown => hw.clear(YELLOW)?,
            Verdict::Armed => hw.clear(GREEN)?,
        }

        session.pause(hw, Duration::from_millis(self.cfg.poll_ms))?;
        Ok(Flow::Continue)
    }

    fn cleanup(&mut self, hw: &mut H, _session: &mut Session<'_>) -> Result<()> {
        let cleared = hw.clear(OFF);
        self.camera.stop()?;
        cleared
    }

    fn summary(&self) -> AlarmSummary {
        AlarmSummary {
            folder: self.archive.dir().to_path_buf(),
            alarms: self.evidence.len(),
            evidence: self.evidence.clone(),
            triggers: self.triggers.clone(),
        }
    }
}
