//! Candid camera: a 3-2-1 countdown on the matrix, then a photo. With the
//! time-lapse option enabled it goes on to take a numbered series into a
//! fresh sub-folder.
//!
//! | phase     | countdown colours    | pause per tick | file name                  |
//! |-----------|----------------------|----------------|----------------------------|
//! | single    | red, yellow, green   | 0.5 s          | `photo_<ts>.jpg`           |
//! | time-lapse| yellow               | 0.3 s          | `timelapse_<ts>/timelapse_NNN.jpg` |

use core::fmt;
use core::time::Duration;
use std::path::PathBuf;

use log::info;

use super::countdown_tick;
use crate::app::events::ActivityEvent;
use crate::app::ports::{Camera, Clock, LedMatrix};
use crate::app::runner::{Activity, Flow, Session};
use crate::archive::{timestamp, PhotoArchive};
use crate::config::CameraConfig;
use crate::display::{Rgb, GREEN, OFF, RED, WHITE, YELLOW};
use crate::error::Result;

const SINGLE_COUNTDOWN: [(u32, Rgb); 3] = [(3, RED), (2, YELLOW), (1, GREEN)];

enum Phase {
    Single,
    Timelapse { folder: PhotoArchive, next: u32 },
    Finished,
}

pub struct CandidCamera<C> {
    cfg: CameraConfig,
    scroll: Duration,
    camera: C,
    archive: PhotoArchive,
    phase: Phase,
    /// Timestamp of the single photo; names the time-lapse folder.
    stamp: String,
    photos: Vec<PathBuf>,
}

impl<C: Camera> CandidCamera<C> {
    pub fn new(cfg: CameraConfig, scroll: Duration, camera: C) -> Self {
        let archive = PhotoArchive::new(cfg.photos_dir());
        Self {
            cfg,
            scroll,
            camera,
            archive,
            phase: Phase::Single,
            stamp: String::new(),
            photos: Vec::new(),
        }
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    fn snap<H>(&mut self, hw: &mut H, path: PathBuf) -> Result<PathBuf>
    where
        H: LedMatrix + Clock + ?Sized,
    {
        hw.clear(GREEN)?;
        self.camera.capture_file(&path)?;
        hw.clear(OFF)?;
        info!("captured {}", path.display());
        self.photos.push(path.clone());
        Ok(path)
    }

    fn single<H>(&mut self, hw: &mut H, session: &mut Session<'_>) -> Result<Phase>
    where
        H: LedMatrix + Clock + ?Sized,
    {
        let pause = Duration::from_millis(self.cfg.countdown_pause_ms);
        for (n, fill) in SINGLE_COUNTDOWN {
            countdown_tick(hw, session, n, fill, WHITE, self.scroll, pause)?;
        }
        self.stamp = timestamp(&hw.local_time());
        let path = self.archive.path_for(&format!("photo_{}.jpg", self.stamp));
        let path = self.snap(hw, path)?;
        session.emit(ActivityEvent::PhotoSaved { path });

        if !self.cfg.timelapse.enabled {
            return Ok(Phase::Finished);
        }
        let folder = self.archive.subfolder(&format!("timelapse_{}", self.stamp))?;
        session.emit(ActivityEvent::TimelapseStarted {
            folder: folder.dir().to_path_buf(),
            photos: self.cfg.timelapse.photos,
            interval: Duration::from_millis(self.cfg.timelapse.interval_ms),
        });
        Ok(Phase::Timelapse { folder, next: 1 })
    }

    fn timelapse<H>(
        &mut self,
        hw: &mut H,
        session: &mut Session<'_>,
        folder: PhotoArchive,
        index: u32,
    ) -> Result<Phase>
    where
        H: LedMatrix + Clock + ?Sized,
    {
        let tl = &self.cfg.timelapse;
        let total = tl.photos;
        let pause = Duration::from_millis(tl.countdown_pause_ms);
        let interval = Duration::from_millis(tl.interval_ms);
        for n in (1..=3).rev() {
            countdown_tick(hw, session, n, YELLOW, WHITE, self.scroll, pause)?;
        }
        let path = folder.path_for(&format!("timelapse_{index:03}.jpg"));
        let path = self.snap(hw, path)?;
        session.emit(ActivityEvent::TimelapseProgress { index, total, path });

        if index >= total {
            return Ok(Phase::Finished);
        }
        session.pause(hw, interval)?;
        Ok(Phase::Timelapse {
            folder,
            next: index + 1,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraSummary {
    pub folder: PathBuf,
    pub photos: Vec<PathBuf>,
}

impl fmt::Display for CameraSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== CAMERA SHUT DOWN ===")?;
        writeln!(f, "Photos taken: {}", self.photos.len())?;
        for p in &self.photos {
            writeln!(f, "  {}", p.display())?;
        }
        writeln!(f, "All photos are in: {}", self.folder.display())
    }
}

impl<H, C> Activity<H> for CandidCamera<C>
where
    H: LedMatrix + Clock + ?Sized,
    C: Camera,
{
    type Summary = CameraSummary;

    fn name(&self) -> &'static str {
        "camera"
    }

    fn setup(&mut self, hw: &mut H, session: &mut Session<'_>) -> Result<()> {
        if self.archive.ensure()? {
            session.emit(ActivityEvent::FolderCreated {
                path: self.archive.dir().to_path_buf(),
            });
        }
        self.camera.start(&self.cfg.capture_settings())?;
        let warmup = Duration::from_millis(self.cfg.warmup_ms);
        session.emit(ActivityEvent::CameraWarmingUp { warmup });
        session.pause(hw, warmup)
    }

    fn step(&mut self, hw: &mut H, session: &mut Session<'_>) -> Result<Flow> {
        let phase = core::mem::replace(&mut self.phase, Phase::Finished);
        self.phase = match phase {
            Phase::Single => self.single(hw, session)?,
            Phase::Timelapse { folder, next } => self.timelapse(hw, session, folder, next)?,
            Phase::Finished => Phase::Finished,
        };
        Ok(match self.phase {
            Phase::Finished => Flow::Done,
            _ => Flow::Continue,
        })
    }

    fn cleanup(&mut self, hw: &mut H, _session: &mut Session<'_>) -> Result<()> {
        let stopped = self.camera.stop();
        hw.clear(OFF)?;
        stopped
    }

    fn summary(&self) -> CameraSummary {
        CameraSummary {
            folder: self.archive.dir().to_path_buf(),
            photos: self.photos.clone(),
        }
    }
}
