//! Unified error types for the workshop activities.
//!
//! A single `Error` enum that every adapter and activity converts into, so
//! the runner's cleanup path handles failures uniformly. Hardware and I/O
//! failures are not retried: they end the activity after cleanup has run.

use core::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug)]
pub enum Error {
    /// The LED matrix rejected a write.
    Display(DisplayError),
    /// A sensor could not be read or returned unparsable data.
    Sensor(SensorError),
    /// The camera could not be started or failed to capture.
    Camera(CameraError),
    /// A required device node was not found on this system.
    DeviceNotFound(&'static str),
    /// Configuration is invalid or could not be loaded.
    Config(String),
    /// Filesystem failure while saving photos or the alarm log.
    Io { path: PathBuf, source: std::io::Error },
    /// The user asked the activity to stop. Not a failure: the runner
    /// turns it into a normal, interrupted finish.
    Interrupted,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Display(e) => write!(f, "display: {e}"),
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Camera(e) => write!(f, "camera: {e}"),
            Self::DeviceNotFound(name) => write!(f, "device not found: {name}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Io { path, source } => write!(f, "I/O on {}: {source}", path.display()),
            Self::Interrupted => write!(f, "interrupted"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl Error {
    /// Wrap an `io::Error` together with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

// ---------------------------------------------------------------------------
// Display errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// Pixel coordinate outside the 8x8 grid.
    OutOfBounds { x: usize, y: usize },
    /// The framebuffer accepted fewer bytes than a full frame.
    ShortWrite,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { x, y } => write!(f, "pixel ({x}, {y}) outside 8x8 matrix"),
            Self::ShortWrite => write!(f, "short framebuffer write"),
        }
    }
}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Self::Display(e)
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SensorError {
    /// A sysfs attribute could not be read.
    ReadFailed(String),
    /// A sysfs attribute did not contain a number.
    Parse(String),
    /// The scripted simulation ran out of samples and has no fallback.
    NoSamples,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed(attr) => write!(f, "failed to read {attr}"),
            Self::Parse(attr) => write!(f, "unparsable value in {attr}"),
            Self::NoSamples => write!(f, "no samples available"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Camera errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    /// `capture_file` was called before `start` (or after `stop`).
    NotRunning,
    /// The capture tool could not be spawned.
    SpawnFailed(String),
    /// The capture tool exited unsuccessfully.
    CaptureFailed { status: Option<i32> },
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRunning => write!(f, "camera is not running"),
            Self::SpawnFailed(tool) => write!(f, "could not run {tool}"),
            Self::CaptureFailed { status: Some(code) } => {
                write!(f, "capture failed (exit status {code})")
            }
            Self::CaptureFailed { status: None } => write!(f, "capture killed by signal"),
        }
    }
}

impl From<CameraError> for Error {
    fn from(e: CameraError) -> Self {
        Self::Camera(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
