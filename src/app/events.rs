//! Outbound activity events.
//!
//! Activities emit these through the [`EventSink`](super::ports::EventSink)
//! port instead of printing. The console adapter turns them into the
//! classroom narration; tests record them and assert on the sequence.

use core::time::Duration;
use std::net::Ipv4Addr;
use std::path::PathBuf;

use crate::activities::alarm::Trigger;
use crate::activities::environment::Comfort;
use crate::activities::reaction::Feedback;
use crate::activities::spirit_level::Tilt;
use crate::sensors::EnvironmentReading;
use crate::stick::Direction;

/// Structured events emitted by the activities.
#[derive(Debug, Clone, PartialEq)]
pub enum ActivityEvent {
    // ── Lifecycle ─────────────────────────────────────────────
    Started { activity: &'static str },
    Stopped { activity: &'static str, interrupted: bool },

    // ── Display ───────────────────────────────────────────────
    MessageShown { text: String },
    /// One tick of a 3-2-1 (or 5..1) countdown.
    Countdown { remaining: u32 },

    // ── Environment monitor ───────────────────────────────────
    EnvironmentRead { reading: EnvironmentReading, comfort: Comfort },

    // ── Spirit level ──────────────────────────────────────────
    TiltSample { tilt: Tilt, pitch: f32, roll: f32 },

    // ── Camera ────────────────────────────────────────────────
    FolderCreated { path: PathBuf },
    CameraWarmingUp { warmup: Duration },
    PhotoSaved { path: PathBuf },
    TimelapseStarted { folder: PathBuf, photos: u32, interval: Duration },
    TimelapseProgress { index: u32, total: u32, path: PathBuf },

    // ── Intruder alarm ────────────────────────────────────────
    AlarmCalibrated { baseline_c: f32 },
    AlarmArmed,
    AlarmReading { temp_change: f32, movement: f32 },
    IntruderDetected { trigger: Trigger, temp_change: f32, movement: f32 },
    EvidenceSaved { path: PathBuf },
    CooldownStarted { cooldown: Duration },

    // ── Joystick ──────────────────────────────────────────────
    StickPressed { direction: Direction, count: u32 },

    // ── Dice ──────────────────────────────────────────────────
    DiceReady { face: u8 },
    ShakeDetected,
    DiceRolled { face: u8, total_rolls: usize },

    // ── Reaction game ─────────────────────────────────────────
    WaitingForStart,
    RoundStarted { round: u32, rounds: u32 },
    Challenge { direction: Direction },
    TooEarly,
    Correct { reaction: Duration, feedback: Feedback },
    WrongDirection { pressed: Direction, expected: Direction },

    // ── Boot IP ───────────────────────────────────────────────
    WaitingForNetwork { delay: Duration },
    IpFound { addr: Ipv4Addr },
    NoNetwork { attempt: u32, max_attempts: u32 },
    NetworkFailed,
}
