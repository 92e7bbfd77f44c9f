//! Sense HAT joystick driver (Linux evdev).
//!
//! The device node is opened non-blocking. Each [`poll`](JoystickDriver::poll)
//! reads whatever `input_event` records the kernel has queued, decodes the
//! key records and appends them to a bounded [`StickEventQueue`]; a read
//! that would block simply means "nothing new".
//!
//! `struct input_event` is a `timeval` (two C longs) followed by
//! `u16 type`, `u16 code`, `i32 value`, all native-endian: 24 bytes on
//! 64-bit Linux, 16 bytes on 32-bit Raspberry Pi OS.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use log::{info, warn};

use super::sysfs::SysfsRoot;
use crate::error::{Error, Result};
use crate::stick::{decode, StickEvent, StickEventQueue};

/// Name reported in `/sys/class/input/event*/device/name`.
pub const JOYSTICK_NAME: &str = "Raspberry Pi Sense HAT Joystick";

const O_NONBLOCK: i32 = 0o4000;
const TIMEVAL_BYTES: usize = 2 * core::mem::size_of::<usize>();
pub const EVENT_BYTES: usize = TIMEVAL_BYTES + 8;
const READ_BATCH: usize = 16;

/// Decode every complete `input_event` record in `bytes`.
pub fn parse_records(bytes: &[u8]) -> impl Iterator<Item = StickEvent> + '_ {
    bytes.chunks_exact(EVENT_BYTES).filter_map(|rec| {
        let body = &rec[TIMEVAL_BYTES..];
        let ev_type = u16::from_ne_bytes([body[0], body[1]]);
        let code = u16::from_ne_bytes([body[2], body[3]]);
        let value = i32::from_ne_bytes([body[4], body[5], body[6], body[7]]);
        decode(ev_type, code, value)
    })
}

pub struct JoystickDriver {
    file: File,
    path: PathBuf,
    queue: StickEventQueue,
    partial: Vec<u8>,
    reported_drops: u32,
}

impl JoystickDriver {
    pub fn open(root: &SysfsRoot) -> Result<Self> {
        let entry = root
            .find_device("sys/class/input", "event", "device/name", JOYSTICK_NAME)
            .ok_or(Error::DeviceNotFound(JOYSTICK_NAME))?;
        let node = entry
            .file_name()
            .map(|n| root.path("dev/input").join(n))
            .ok_or(Error::DeviceNotFound(JOYSTICK_NAME))?;
        Self::open_path(node)
    }

    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .custom_flags(O_NONBLOCK)
            .open(&path)
            .map_err(|e| Error::io(&path, e))?;
        info!("joystick on {}", path.display());
        Ok(Self {
            file,
            path,
            queue: StickEventQueue::new(),
            partial: Vec::new(),
            reported_drops: 0,
        })
    }

    /// Pull pending records from the kernel into the queue.
    pub fn poll(&mut self) -> Result<()> {
        let mut buf = [0u8; EVENT_BYTES * READ_BATCH];
        loop {
            match self.file.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    self.partial.extend_from_slice(&buf[..n]);
                    let whole = self.partial.len() / EVENT_BYTES * EVENT_BYTES;
                    for ev in parse_records(&self.partial[..whole]) {
                        self.queue.push(ev);
                    }
                    self.partial.drain(..whole);
                }
                Err(e) if e.kind() == ErrorKind::WouldBlock => break,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::io(&self.path, e)),
            }
        }
        if self.queue.dropped() > self.reported_drops {
            self.reported_drops = self.queue.dropped();
            warn!("joystick queue full, {} events dropped", self.reported_drops);
        }
        Ok(())
    }

    /// Poll, then hand out every queued event.
    pub fn take_events(&mut self) -> Result<Vec<StickEvent>> {
        self.poll()?;
        Ok(self.queue.drain())
    }
}
