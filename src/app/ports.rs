//! Port traits: the hexagonal boundary between activities and the board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Activity (pure logic)
//! ```
//!
//! Driven adapters (LED matrix, sensors, joystick, camera, clock, event
//! sinks, config storage) implement these traits. Activities consume them
//! through generics, so no activity touches `/dev` or sysfs directly and
//! every one of them runs unchanged against the simulated board.

use core::time::Duration;
use std::net::Ipv4Addr;
use std::path::Path;

use chrono::NaiveDateTime;
use embedded_hal::delay::DelayNs;

use crate::config::WorkshopConfig;
use crate::display::{Frame, Rgb, Rotation};
use crate::error::Result;
use crate::sensors::{Acceleration, EnvironmentReading, Orientation};
use crate::stick::StickEvent;

// ───────────────────────────────────────────────────────────────
// LED matrix (driven adapter: activity → display)
// ───────────────────────────────────────────────────────────────

pub trait LedMatrix {
    /// Replace the whole 8x8 image.
    fn set_frame(&mut self, frame: &Frame) -> Result<()>;

    /// Fill the matrix with one colour (`OFF` turns it dark).
    fn clear(&mut self, colour: Rgb) -> Result<()> {
        self.set_frame(&Frame::filled(colour))
    }

    /// Rotation applied to every subsequent frame.
    fn set_rotation(&mut self, rotation: Rotation) -> Result<()>;
}

// ───────────────────────────────────────────────────────────────
// Sensors (driven adapter: hardware → activity)
// ───────────────────────────────────────────────────────────────

/// Temperature, humidity and pressure in display units.
pub trait EnvironmentSensors {
    /// Degrees Celsius.
    fn temperature(&mut self) -> Result<f32>;
    /// Relative humidity in percent.
    fn humidity(&mut self) -> Result<f32>;
    /// Millibar.
    fn pressure(&mut self) -> Result<f32>;

    fn read_environment(&mut self) -> Result<EnvironmentReading> {
        Ok(EnvironmentReading {
            temperature_c: self.temperature()?,
            humidity_pct: self.humidity()?,
            pressure_mbar: self.pressure()?,
        })
    }
}

pub trait MotionSensors {
    /// Raw accelerometer vector in g.
    fn acceleration(&mut self) -> Result<Acceleration>;
    /// Pitch, roll and yaw in degrees, each in `[0, 360)`.
    fn orientation(&mut self) -> Result<Orientation>;
}

// ───────────────────────────────────────────────────────────────
// Joystick (driven adapter: hardware → activity)
// ───────────────────────────────────────────────────────────────

pub trait Joystick {
    /// Every event received since the last call, oldest first. Never blocks.
    fn poll_events(&mut self) -> Result<Vec<StickEvent>>;
}

// ───────────────────────────────────────────────────────────────
// Camera (driven adapter: activity → hardware)
// ───────────────────────────────────────────────────────────────

/// Still-capture parameters handed to [`Camera::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureSettings {
    pub width: u32,
    pub height: u32,
    pub hflip: bool,
    pub vflip: bool,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            hflip: false,
            vflip: true,
        }
    }
}

pub trait Camera {
    fn start(&mut self, settings: &CaptureSettings) -> Result<()>;

    /// Capture one JPEG to `path`. Fails with `CameraError::NotRunning`
    /// unless [`start`](Self::start) succeeded first.
    fn capture_file(&mut self, path: &Path) -> Result<()>;

    /// Release the camera. Calling it on a stopped camera is a no-op.
    fn stop(&mut self) -> Result<()>;

    fn is_running(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Network probe
// ───────────────────────────────────────────────────────────────

pub trait NetworkProbe {
    /// Outbound IPv4 address of this machine, `None` when offline.
    fn local_ipv4(&mut self) -> Option<Ipv4Addr>;
}

// ───────────────────────────────────────────────────────────────
// Clock
// ───────────────────────────────────────────────────────────────

/// Monotonic and wall-clock time, plus sleeping via [`DelayNs`].
pub trait Clock: DelayNs {
    /// Monotonic time since the clock was created.
    fn now(&self) -> Duration;

    /// Local wall-clock time, used for photo and log timestamps.
    fn local_time(&self) -> NaiveDateTime;

    fn sleep(&mut self, duration: Duration) {
        let whole_ms = duration.as_millis();
        let ms = u32::try_from(whole_ms).unwrap_or(u32::MAX);
        if ms > 0 {
            self.delay_ms(ms);
        }
        let rest_ns = duration.subsec_nanos() % 1_000_000;
        if rest_ns > 0 {
            self.delay_ns(rest_ns);
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink (driven adapter: activity → console / logs)
// ───────────────────────────────────────────────────────────────

/// Activities narrate what they do through structured
/// [`ActivityEvent`](super::events::ActivityEvent)s. The adapter decides
/// how they are shown.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::ActivityEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port
// ───────────────────────────────────────────────────────────────

/// Loads and persists [`WorkshopConfig`].
///
/// Implementations validate before saving and after loading; an invalid
/// value is rejected with [`ConfigError::ValidationFailed`], never clamped.
pub trait ConfigPort {
    /// Returns [`WorkshopConfig::default()`] if nothing is stored yet.
    fn load(&self) -> core::result::Result<WorkshopConfig, ConfigError>;

    fn save(&self, config: &WorkshopConfig) -> core::result::Result<(), ConfigError>;
}

/// Errors from [`ConfigPort`] operations.
#[derive(Debug)]
pub enum ConfigError {
    /// Stored config could not be deserialized.
    Corrupted(String),
    /// A field failed range validation. The string names the field and rule.
    ValidationFailed(&'static str),
    /// Storage read or write failed.
    Io(String),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted(msg) => write!(f, "config corrupted: {msg}"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
            Self::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for crate::error::Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}
