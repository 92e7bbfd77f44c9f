//! Orientation from the gravity vector.
//!
//! Only the accelerometer is used, so yaw is always reported as 0. Pitch
//! and roll are returned in `[0, 360)` like the Sense HAT library does;
//! callers that want signed tilt use [`signed_angle`](super::signed_angle).

use super::{Acceleration, Orientation};

/// Wrap any angle in degrees into `[0, 360)`.
pub fn wrap_degrees(deg: f32) -> f32 {
    let w = deg.rem_euclid(360.0);
    // rem_euclid can return exactly 360.0 for tiny negative inputs.
    if w >= 360.0 { 0.0 } else { w }
}

/// Pitch and roll of a board at rest whose accelerometer reads `a`.
pub fn orientation_from_accel(a: Acceleration) -> Orientation {
    let roll = a.y.atan2(a.z).to_degrees();
    let pitch = (-a.x).atan2((a.y * a.y + a.z * a.z).sqrt()).to_degrees();
    Orientation {
        pitch: wrap_degrees(pitch),
        roll: wrap_degrees(roll),
        yaw: 0.0,
    }
}
