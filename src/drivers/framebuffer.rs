//! Sense HAT LED matrix framebuffer driver.
//!
//! The `rpisense-fb` kernel driver exposes the matrix as a 128-byte
//! framebuffer: 64 pixels, row-major, each an RGB565 little-endian word.
//! A frame is written in one positioned write at offset 0.

use std::fs::{File, OpenOptions};
use std::os::unix::fs::FileExt;
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::sysfs::SysfsRoot;
use crate::display::{to_rgb565, Frame, Rotation, SIZE};
use crate::error::{Error, Result};

/// Name the kernel driver publishes in `/sys/class/graphics/fb*/name`.
pub const FB_NAME: &str = "RPi-Sense FB";

/// Size of one full frame in bytes.
pub const FRAME_BYTES: usize = SIZE * SIZE * 2;

/// Pack `frame`, after applying `rotation`, into framebuffer layout.
pub fn encode(frame: &Frame, rotation: Rotation) -> [u8; FRAME_BYTES] {
    let mut buf = [0u8; FRAME_BYTES];
    for (x, y, colour) in frame.rotated(rotation).iter() {
        let i = (y * SIZE + x) * 2;
        buf[i..i + 2].copy_from_slice(&to_rgb565(colour).to_le_bytes());
    }
    buf
}

pub struct FramebufferDriver {
    file: File,
    path: PathBuf,
    rotation: Rotation,
}

impl FramebufferDriver {
    /// Find the Sense HAT framebuffer under `root` and open it.
    pub fn open(root: &SysfsRoot) -> Result<Self> {
        let entry = root
            .find_device("sys/class/graphics", "fb", "name", FB_NAME)
            .ok_or(Error::DeviceNotFound(FB_NAME))?;
        let node = entry
            .file_name()
            .map(|n| root.path("dev").join(n))
            .ok_or(Error::DeviceNotFound(FB_NAME))?;
        Self::open_path(node)
    }

    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .write(true)
            .open(&path)
            .map_err(|e| Error::io(&path, e))?;
        info!("LED matrix on {}", path.display());
        Ok(Self {
            file,
            path,
            rotation: Rotation::R0,
        })
    }

    pub fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        let buf = encode(frame, self.rotation);
        self.file
            .write_all_at(&buf, 0)
            .map_err(|e| Error::io(&self.path, e))
    }

    pub fn set_rotation(&mut self, rotation: Rotation) {
        debug!("matrix rotation {} deg", rotation.degrees());
        self.rotation = rotation;
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }
}
