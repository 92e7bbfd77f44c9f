//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that runs complete activities against
//! the simulated board. Virtual time makes a ten-minute session finish
//! instantly, and no real hardware is required.

mod alarm_tests;
mod boot_ip_tests;
mod camera_tests;
mod input_tests;
mod mock_hw;
mod monitor_tests;
