//! Linux device drivers for the Sense HAT peripherals.

pub mod evdev;
pub mod framebuffer;
pub mod iio_device;
pub mod sysfs;
