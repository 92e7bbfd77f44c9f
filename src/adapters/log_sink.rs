//! Event sink adapters.
//!
//! [`ConsoleSink`] prints the classroom narration to stdout for a student
//! watching the terminal. [`LogEventSink`] sends the same lines through the
//! `log` facade, for headless runs (boot services) where only the journal
//! is read.

use std::io::Write;

use log::info;

use crate::app::events::ActivityEvent;
use crate::app::ports::EventSink;

/// One human-readable line for `event`.
pub fn render(event: &ActivityEvent) -> String {
    use ActivityEvent as E;
    match event {
        E::Started { activity } => format!("=== {} STARTING === (Ctrl+C to stop)", activity.to_uppercase()),
        E::Stopped { activity, interrupted: true } => format!("=== {} STOPPED ===", activity.to_uppercase()),
        E::Stopped { activity, interrupted: false } => format!("=== {} FINISHED ===", activity.to_uppercase()),
        E::MessageShown { text } => format!("Scrolled \"{text}\""),
        E::Countdown { remaining } => format!("   {remaining}..."),
        E::EnvironmentRead { reading, comfort } => format!(
            "Temperature: {:.1}\u{b0}C | Humidity: {:.1}% | Pressure: {:.1} mb | STATUS: {}",
            reading.temperature_c,
            reading.humidity_pct,
            reading.pressure_mbar,
            comfort.label()
        ),
        E::TiltSample { tilt, .. } => tilt.label().to_string(),
        E::FolderCreated { path } => format!("Created folder: {}", path.display()),
        E::CameraWarmingUp { warmup } => {
            format!("Camera adjusting to lighting ({:.1} s)...", warmup.as_secs_f32())
        }
        E::PhotoSaved { path } => format!("SNAP! Photo saved: {}", path.display()),
        E::TimelapseStarted { folder, photos, interval } => format!(
            "Time-lapse: {photos} photos, one every {} s, into {}",
            interval.as_secs(),
            folder.display()
        ),
        E::TimelapseProgress { index, total, path } => {
            format!("Photo {index}/{total} captured: {}", path.display())
        }
        E::AlarmCalibrated { baseline_c } => format!("Baseline temperature: {baseline_c:.1}\u{b0}C"),
        E::AlarmArmed => "SYSTEM ARMED - Monitoring for intruders...".to_string(),
        E::AlarmReading { temp_change, movement } => {
            format!("[DEBUG] Temp: {temp_change:.2}\u{b0}C | Movement: {movement:.2}g")
        }
        E::IntruderDetected { trigger, temp_change, movement } => format!(
            "INTRUDER DETECTED! Trigger: {trigger} (temp +{temp_change:.1}\u{b0}C, movement {movement:.2}g)"
        ),
        E::EvidenceSaved { path } => format!("Evidence saved: {}", path.display()),
        E::CooldownStarted { cooldown } => {
            format!("Alarm cooldown: {} seconds", cooldown.as_secs())
        }
        E::StickPressed { direction, count } => format!(
            "{:6} pressed! (Total: {count:2} times)",
            direction.name().to_uppercase()
        ),
        E::DiceReady { face } => format!("Initial dice face: {face}. Waiting for shake..."),
        E::ShakeDetected => "Shake detected! Rolling...".to_string(),
        E::DiceRolled { face, total_rolls } => {
            format!("You rolled: {face} (Total rolls: {total_rolls})")
        }
        E::WaitingForStart => "Press MIDDLE button to start...".to_string(),
        E::RoundStarted { round, rounds } => format!("Round {round}/{rounds} - wait for the colour!"),
        E::Challenge { direction } => format!("GO! Press {}!", direction.name().to_uppercase()),
        E::TooEarly => "TOO EARLY! Wait for the color!".to_string(),
        E::Correct { reaction, feedback } => format!(
            "CORRECT! Reaction time: {} ms. {}",
            reaction.as_millis(),
            feedback.message()
        ),
        E::WrongDirection { pressed, expected } => format!(
            "WRONG! You pressed {}, needed {}",
            pressed.name().to_uppercase(),
            expected.name().to_uppercase()
        ),
        E::WaitingForNetwork { delay } => {
            format!("Waiting {} s for WiFi connection...", delay.as_secs())
        }
        E::IpFound { addr } => format!("Connected! IP Address: {addr}"),
        E::NoNetwork { attempt, max_attempts } => {
            format!("No WiFi yet... attempt {attempt}/{max_attempts}")
        }
        E::NetworkFailed => "Failed to connect to WiFi after multiple attempts".to_string(),
    }
}

/// Prints every event to stdout. Live alarm readings overwrite one line.
#[derive(Default)]
pub struct ConsoleSink {
    inline_pending: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for ConsoleSink {
    fn emit(&mut self, event: &ActivityEvent) {
        let line = render(event);
        let mut out = std::io::stdout().lock();
        // stdout going away (closed pipe) is not worth aborting an activity.
        if matches!(event, ActivityEvent::AlarmReading { .. }) {
            let _ = write!(out, "\r{line}");
            let _ = out.flush();
            self.inline_pending = true;
            return;
        }
        if self.inline_pending {
            let _ = writeln!(out);
            self.inline_pending = false;
        }
        let _ = writeln!(out, "{line}");
    }
}

/// Adapter that logs every [`ActivityEvent`] at info level.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &ActivityEvent) {
        info!("{}", render(event));
    }
}
