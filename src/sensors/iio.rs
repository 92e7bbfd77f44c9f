//! Linux IIO channel decoding.
//!
//! The Sense HAT sensors are bound to kernel IIO drivers (`hts221`,
//! `lps25h`, `lsm9ds1_accel`). Each channel exposes `*_raw`, and optionally
//! `*_offset` and `*_scale`, in sysfs. The processed value is
//! `(raw + offset) * scale`, in the IIO base unit of the channel:
//!
//! | channel            | IIO unit      | display unit |
//! |--------------------|---------------|--------------|
//! | `temp`             | milli °C      | °C           |
//! | `humidityrelative` | milli percent | %            |
//! | `pressure`         | kPa           | mbar         |
//! | `accel_*`          | m/s²          | g            |

use crate::error::SensorError;

/// Standard gravity, m/s² per g.
pub const STANDARD_GRAVITY: f32 = 9.806_65;

/// Raw/offset/scale triple read from one IIO channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Channel {
    pub raw: f64,
    pub offset: f64,
    pub scale: f64,
}

impl Channel {
    pub fn processed(&self) -> f64 {
        (self.raw + self.offset) * self.scale
    }
}

/// Parse a sysfs attribute value (trailing newline allowed).
pub fn parse_attr(name: &str, text: &str) -> Result<f64, SensorError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| SensorError::Parse(name.to_string()))
}

pub fn temperature_c(ch: &Channel) -> f32 {
    (ch.processed() / 1000.0) as f32
}

pub fn humidity_pct(ch: &Channel) -> f32 {
    (ch.processed() / 1000.0) as f32
}

pub fn pressure_mbar(ch: &Channel) -> f32 {
    (ch.processed() * 10.0) as f32
}

pub fn accel_g(ch: &Channel) -> f32 {
    ch.processed() as f32 / STANDARD_GRAVITY
}
