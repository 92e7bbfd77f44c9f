//! Sensor readings and the small amount of maths the activities need.
//!
//! Adapters produce these values; activities only ever compare them to
//! constants or to a baseline captured at start.

pub mod iio;
pub mod motion;

/// One environment sample, already in display units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnvironmentReading {
    /// Degrees Celsius.
    pub temperature_c: f32,
    /// Relative humidity, percent.
    pub humidity_pct: f32,
    /// Millibar (hPa).
    pub pressure_mbar: f32,
}

impl EnvironmentReading {
    /// Copy with every field rounded to one decimal place.
    pub fn rounded(&self) -> Self {
        Self {
            temperature_c: round1(self.temperature_c),
            humidity_pct: round1(self.humidity_pct),
            pressure_mbar: round1(self.pressure_mbar),
        }
    }
}

/// Raw accelerometer vector in g (1.0 = earth gravity).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Acceleration {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Acceleration {
    /// A board lying flat and still.
    pub const AT_REST: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Length of the vector in g.
    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// How far the total acceleration is from 1 g (still board).
    pub fn deviation_from_rest(&self) -> f32 {
        (self.magnitude() - 1.0).abs()
    }
}

/// Orientation angles in degrees, each in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    pub pitch: f32,
    pub roll: f32,
    pub yaw: f32,
}

/// Map an angle in `[0, 360)` onto `(-180, 180]`.
pub fn signed_angle(deg: f32) -> f32 {
    if deg > 180.0 { deg - 360.0 } else { deg }
}

/// Round to one decimal place, as printed to students.
pub fn round1(v: f32) -> f32 {
    (v * 10.0).round() / 10.0
}
