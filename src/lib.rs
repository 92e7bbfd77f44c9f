//! Sense HAT classroom activities.
//!
//! Small programs for a Raspberry Pi with a Sense HAT: scrolling text,
//! an environment monitor, a spirit level, a photo booth and time-lapse,
//! an intruder alarm, joystick basics, shake-to-roll dice, a reaction game
//! and a boot-time IP display. Every activity runs against the real HAT or
//! a simulated board with virtual time.

#![deny(unused_must_use)]

pub mod activities;
pub mod adapters;
pub mod app;
pub mod archive;
pub mod config;
pub mod display;
pub mod drivers;
pub mod error;
pub mod sensors;
pub mod shutdown;
pub mod stats;
pub mod stick;
