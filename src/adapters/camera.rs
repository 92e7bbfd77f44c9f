//! Camera adapter driving the `rpicam-still` command-line tool.
//!
//! Each capture spawns one short-lived process. `start` only checks that
//! the tool runs and exits cleanly, then remembers the settings; the
//! activities do the lighting warm-up themselves.

use std::path::Path;
use std::process::{Command, Stdio};

use log::{debug, info};

use crate::app::ports::{Camera, CaptureSettings};
use crate::error::{CameraError, Result};

pub struct RpicamCamera {
    program: String,
    settings: Option<CaptureSettings>,
}

impl RpicamCamera {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            settings: None,
        }
    }

    /// Arguments for one still capture into `path`.
    pub fn capture_args(settings: &CaptureSettings, path: &Path) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "-n".into(),
            "-t".into(),
            "1".into(),
            "--width".into(),
            settings.width.to_string(),
            "--height".into(),
            settings.height.to_string(),
        ];
        if settings.hflip {
            args.push("--hflip".into());
        }
        if settings.vflip {
            args.push("--vflip".into());
        }
        args.push("-o".into());
        args.push(path.display().to_string());
        args
    }
}

impl Camera for RpicamCamera {
    fn start(&mut self, settings: &CaptureSettings) -> Result<()> {
        let status = Command::new(&self.program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|_| CameraError::SpawnFailed(self.program.clone()))?;
        debug!("{} --version: {status}", self.program);
        if !status.success() {
            return Err(CameraError::CaptureFailed {
                status: status.code(),
            }
            .into());
        }
        info!(
            "camera ready: {}x{} hflip={} vflip={}",
            settings.width, settings.height, settings.hflip, settings.vflip
        );
        self.settings = Some(*settings);
        Ok(())
    }

    fn capture_file(&mut self, path: &Path) -> Result<()> {
        let settings = self.settings.ok_or(CameraError::NotRunning)?;
        let status = Command::new(&self.program)
            .args(Self::capture_args(&settings, path))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|_| CameraError::SpawnFailed(self.program.clone()))?;
        if !status.success() {
            return Err(CameraError::CaptureFailed {
                status: status.code(),
            }
            .into());
        }
        debug!("captured {}", path.display());
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        if self.settings.take().is_some() {
            info!("camera stopped");
        }
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.settings.is_some()
    }
}
