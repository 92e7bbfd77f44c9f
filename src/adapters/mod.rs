//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements                     | Connects to                 |
//! |---------------|--------------------------------|-----------------------------|
//! | `hardware`    | LedMatrix, EnvironmentSensors, | Sense HAT framebuffer,      |
//! |               | MotionSensors, Joystick, Clock | evdev joystick, IIO sysfs   |
//! | `camera`      | Camera                         | `rpicam-still`              |
//! | `config_file` | ConfigPort                     | JSON file                   |
//! | `log_sink`    | EventSink                      | stdout / `log` facade       |
//! | `network`     | NetworkProbe                   | UDP routing table lookup    |
//! | `sim`         | every hardware port            | virtual time, in memory     |
//! | `time`        | Clock                          | `Instant` + `chrono::Local` |

pub mod camera;
pub mod config_file;
pub mod hardware;
pub mod log_sink;
pub mod network;
pub mod sim;
pub mod time;
