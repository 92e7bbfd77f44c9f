//! Sysfs reader for one Linux IIO device.
//!
//! Reads `in_<channel>_raw` plus the optional `_offset` and `_scale`
//! attributes. A missing scale falls back to the shared `in_<kind>_scale`
//! (the accelerometer publishes one scale for all three axes), then to 1.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use super::sysfs::SysfsRoot;
use crate::error::{Error, Result, SensorError};
use crate::sensors::iio::{parse_attr, Channel};

pub const HUMIDITY_DRIVER: &str = "hts221";
pub const PRESSURE_DRIVER: &str = "lps25h";
pub const ACCEL_DRIVER: &str = "lsm9ds1_accel";

#[derive(Debug, Clone)]
pub struct IioDevice {
    dir: PathBuf,
}

impl IioDevice {
    /// Find the IIO device whose driver name is `driver`.
    pub fn find(root: &SysfsRoot, driver: &'static str) -> Result<Self> {
        root.find_device("sys/bus/iio/devices", "iio:device", "name", driver)
            .map(Self::at)
            .ok_or(Error::DeviceNotFound(driver))
            .inspect(|dev| info!("{driver} at {}", dev.dir.display()))
    }

    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Read `channel`, e.g. `temp`, `pressure` or `accel_x`. `kind` names
    /// the shared attribute prefix (`accel` for `accel_x`).
    pub fn channel(&self, channel: &str, kind: &str) -> Result<Channel> {
        let raw = self.required(&format!("in_{channel}_raw"))?;
        let offset = self.optional(&format!("in_{channel}_offset"))?.unwrap_or(0.0);
        let scale = match self.optional(&format!("in_{channel}_scale"))? {
            Some(s) => s,
            None => self.optional(&format!("in_{kind}_scale"))?.unwrap_or(1.0),
        };
        Ok(Channel { raw, offset, scale })
    }

    fn required(&self, attr: &str) -> Result<f64> {
        let path = self.dir.join(attr);
        let text = fs::read_to_string(&path)
            .map_err(|_| SensorError::ReadFailed(display(&path)))?;
        Ok(parse_attr(attr, &text)?)
    }

    fn optional(&self, attr: &str) -> Result<Option<f64>> {
        let path = self.dir.join(attr);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(parse_attr(attr, &text)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(_) => Err(SensorError::ReadFailed(display(&path)).into()),
        }
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
