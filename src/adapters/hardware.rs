//! Hardware adapter: bridges the real Sense HAT to the port traits.
//!
//! Owns the framebuffer, joystick and IIO drivers plus the system clock and
//! the network probe. This is the only module that touches `/dev` and
//! `/sys`. The LED matrix is required; the other devices are looked up at
//! open time and only reported missing when an activity actually uses them,
//! so `hello` still works on a HAT whose sensor overlay is not loaded.

use core::time::Duration;
use std::net::Ipv4Addr;

use chrono::NaiveDateTime;
use embedded_hal::delay::DelayNs;
use log::warn;

use super::network::UdpRouteProbe;
use super::time::SystemClock;
use crate::app::ports::{
    Clock, EnvironmentSensors, Joystick, LedMatrix, MotionSensors, NetworkProbe,
};
use crate::display::{Frame, Rotation};
use crate::drivers::evdev::{JoystickDriver, JOYSTICK_NAME};
use crate::drivers::framebuffer::FramebufferDriver;
use crate::drivers::iio_device::{IioDevice, ACCEL_DRIVER, HUMIDITY_DRIVER, PRESSURE_DRIVER};
use crate::drivers::sysfs::SysfsRoot;
use crate::error::{Error, Result};
use crate::sensors::iio::{accel_g, humidity_pct, pressure_mbar, temperature_c};
use crate::sensors::motion::orientation_from_accel;
use crate::sensors::{Acceleration, Orientation};

/// Concrete adapter that combines all HAT peripherals behind port traits.
pub struct SenseHatAdapter {
    matrix: FramebufferDriver,
    joystick: Option<JoystickDriver>,
    humidity: Option<IioDevice>,
    pressure: Option<IioDevice>,
    accel: Option<IioDevice>,
    clock: SystemClock,
    network: UdpRouteProbe,
}

fn optional<T>(found: Result<T>) -> Option<T> {
    match found {
        Ok(dev) => Some(dev),
        Err(e) => {
            warn!("{e}");
            None
        }
    }
}

impl SenseHatAdapter {
    /// Open every peripheral found under `root` (normally `/`).
    pub fn open(root: &SysfsRoot) -> Result<Self> {
        Ok(Self {
            matrix: FramebufferDriver::open(root)?,
            joystick: optional(JoystickDriver::open(root)),
            humidity: optional(IioDevice::find(root, HUMIDITY_DRIVER)),
            pressure: optional(IioDevice::find(root, PRESSURE_DRIVER)),
            accel: optional(IioDevice::find(root, ACCEL_DRIVER)),
            clock: SystemClock::new(),
            network: UdpRouteProbe::default(),
        })
    }

    fn humidity_dev(&self) -> Result<&IioDevice> {
        self.humidity
            .as_ref()
            .ok_or(Error::DeviceNotFound(HUMIDITY_DRIVER))
    }

    fn pressure_dev(&self) -> Result<&IioDevice> {
        self.pressure
            .as_ref()
            .ok_or(Error::DeviceNotFound(PRESSURE_DRIVER))
    }
}

// ── LedMatrix ─────────────────────────────────────────────────

impl LedMatrix for SenseHatAdapter {
    fn set_frame(&mut self, frame: &Frame) -> Result<()> {
        self.matrix.write_frame(frame)
    }

    fn set_rotation(&mut self, rotation: Rotation) -> Result<()> {
        self.matrix.set_rotation(rotation);
        Ok(())
    }
}

// ── Sensors ───────────────────────────────────────────────────

impl EnvironmentSensors for SenseHatAdapter {
    fn temperature(&mut self) -> Result<f32> {
        let ch = self.humidity_dev()?.channel("temp", "temp")?;
        Ok(temperature_c(&ch))
    }

    fn humidity(&mut self) -> Result<f32> {
        let ch = self
            .humidity_dev()?
            .channel("humidityrelative", "humidityrelative")?;
        Ok(humidity_pct(&ch))
    }

    fn pressure(&mut self) -> Result<f32> {
        let ch = self.pressure_dev()?.channel("pressure", "pressure")?;
        Ok(pressure_mbar(&ch))
    }
}

impl MotionSensors for SenseHatAdapter {
    fn acceleration(&mut self) -> Result<Acceleration> {
        let dev = self
            .accel
            .as_ref()
            .ok_or(Error::DeviceNotFound(ACCEL_DRIVER))?;
        let x = accel_g(&dev.channel("accel_x", "accel")?);
        let y = accel_g(&dev.channel("accel_y", "accel")?);
        let z = accel_g(&dev.channel("accel_z", "accel")?);
        Ok(Acceleration::new(x, y, z))
    }

    fn orientation(&mut self) -> Result<Orientation> {
        Ok(orientation_from_accel(self.acceleration()?))
    }
}

// ── Joystick ──────────────────────────────────────────────────

impl Joystick for SenseHatAdapter {
    fn poll_events(&mut self) -> Result<Vec<crate::stick::StickEvent>> {
        self.joystick
            .as_mut()
            .ok_or(Error::DeviceNotFound(JOYSTICK_NAME))?
            .take_events()
    }
}

// ── Network / clock ───────────────────────────────────────────

impl NetworkProbe for SenseHatAdapter {
    fn local_ipv4(&mut self) -> Option<Ipv4Addr> {
        self.network.local_ipv4()
    }
}

impl DelayNs for SenseHatAdapter {
    fn delay_ns(&mut self, ns: u32) {
        self.clock.delay_ns(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.clock.delay_ms(ms);
    }
}

impl Clock for SenseHatAdapter {
    fn now(&self) -> Duration {
        self.clock.now()
    }

    fn local_time(&self) -> NaiveDateTime {
        self.clock.local_time()
    }

    fn sleep(&mut self, duration: Duration) {
        self.clock.sleep(duration);
    }
}
