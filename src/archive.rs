//! Photo folders and the alarm log.
//!
//! File names embed a local timestamp formatted `%Y-%m-%d_%H-%M-%S`, so
//! they sort chronologically and never contain `:`.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use log::debug;

use crate::error::{Error, Result};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";
pub const ALARM_LOG: &str = "alarm_log.txt";

pub fn timestamp(t: &NaiveDateTime) -> String {
    t.format(TIMESTAMP_FORMAT).to_string()
}

/// `<timestamp> | Trigger: <tag> | Photo: <file>` plus newline.
pub fn alarm_log_line(timestamp: &str, trigger_tag: &str, photo: &str) -> String {
    format!("{timestamp} | Trigger: {trigger_tag} | Photo: {photo}\n")
}

/// A directory that photos are saved into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoArchive {
    dir: PathBuf,
}

impl PhotoArchive {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the directory (and parents). Returns `true` if it did not
    /// exist before.
    pub fn ensure(&self) -> Result<bool> {
        if self.dir.is_dir() {
            return Ok(false);
        }
        fs::create_dir_all(&self.dir).map_err(|e| Error::io(&self.dir, e))?;
        debug!("created {}", self.dir.display());
        Ok(true)
    }

    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    /// A sub-archive inside this one, created on the spot.
    pub fn subfolder(&self, name: &str) -> Result<Self> {
        let sub = Self::new(self.dir.join(name));
        sub.ensure()?;
        Ok(sub)
    }

    /// Append one line to `name` inside the archive, creating it if needed.
    pub fn append_line(&self, name: &str, line: &str) -> Result<()> {
        let path = self.path_for(name);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| Error::io(&path, e))?;
        file.write_all(line.as_bytes())
            .map_err(|e| Error::io(&path, e))
    }
}
