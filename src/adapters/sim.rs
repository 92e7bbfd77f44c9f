//! Simulated Sense HAT.
//!
//! Lets every activity run on a laptop (`--simulate`) and in tests. Time is
//! virtual: sleeping advances [`SimClock`] instantly, so a ten-minute
//! time-lapse finishes in milliseconds. Sensors are closures of that virtual
//! time, the joystick replays a script, and every frame written to the
//! matrix is recorded.

use core::time::Duration;
use std::collections::VecDeque;
use std::fs;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use embedded_hal::delay::DelayNs;
use log::debug;

use crate::activities::direction_colour;
use crate::activities::reaction::CHALLENGES;
use crate::app::ports::{
    Camera, CaptureSettings, Clock, EnvironmentSensors, Joystick, LedMatrix, MotionSensors,
    NetworkProbe,
};
use crate::display::{Frame, Rotation};
use crate::error::{CameraError, Error, Result};
use crate::sensors::motion::orientation_from_accel;
use crate::sensors::{Acceleration, EnvironmentReading, Orientation};
use crate::shutdown::StopSignal;
use crate::stick::{Direction, StickEvent, StickEventQueue};

type EnvFn = Box<dyn FnMut(Duration) -> EnvironmentReading + Send>;
type AccelFn = Box<dyn FnMut(Duration) -> Acceleration + Send>;
type Responder = Box<dyn FnMut(Duration, &Frame) -> Option<StickEvent> + Send>;

// ── SimClock ──────────────────────────────────────────────────

/// Virtual clock. Optionally requests a stop once a deadline passes, which
/// is how tests end activities that otherwise loop forever.
pub struct SimClock {
    now: Duration,
    start: NaiveDateTime,
    deadline: Option<(Duration, StopSignal)>,
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SimClock {
    pub fn new() -> Self {
        let start = NaiveDate::from_ymd_opt(2024, 3, 14)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .unwrap_or_default();
        Self {
            now: Duration::ZERO,
            start,
            deadline: None,
        }
    }

    pub fn starting_at(start: NaiveDateTime) -> Self {
        Self {
            start,
            ..Self::new()
        }
    }

    /// Request `stop` once virtual time reaches `at`.
    pub fn stop_at(&mut self, at: Duration, stop: StopSignal) {
        self.deadline = Some((at, stop));
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
        if let Some((at, stop)) = &self.deadline {
            if self.now >= *at {
                stop.request();
            }
        }
    }
}

impl DelayNs for SimClock {
    fn delay_ns(&mut self, ns: u32) {
        self.advance(Duration::from_nanos(u64::from(ns)));
    }
}

impl Clock for SimClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn local_time(&self) -> NaiveDateTime {
        let elapsed = chrono::Duration::from_std(self.now).unwrap_or_default();
        self.start + elapsed
    }

    fn sleep(&mut self, duration: Duration) {
        self.advance(duration);
    }
}

// ── SimBoard ──────────────────────────────────────────────────

/// In-memory board implementing every hardware port.
pub struct SimBoard {
    pub clock: SimClock,
    frames: Vec<Frame>,
    rotation: Rotation,
    environment: EnvFn,
    accel: AccelFn,
    script: VecDeque<(Duration, StickEvent)>,
    responder: Option<Responder>,
    pending: StickEventQueue,
    network: VecDeque<Option<Ipv4Addr>>,
    network_fallback: Option<Ipv4Addr>,
}

impl Default for SimBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl SimBoard {
    /// A quiet room: 22 °C, 45 %, 1013 mbar, board lying flat and still,
    /// no network.
    pub fn new() -> Self {
        Self {
            clock: SimClock::new(),
            frames: Vec::new(),
            rotation: Rotation::R0,
            environment: Box::new(|_| EnvironmentReading {
                temperature_c: 22.0,
                humidity_pct: 45.0,
                pressure_mbar: 1013.0,
            }),
            accel: Box::new(|_| Acceleration::AT_REST),
            script: VecDeque::new(),
            responder: None,
            pending: StickEventQueue::new(),
            network: VecDeque::new(),
            network_fallback: None,
        }
    }

    /// A lively board for `--simulate`. The room slowly warms and cools,
    /// the board rocks gently and is shaken every 7 s, the network comes up
    /// on the third probe, and the joystick presses itself: MIDDLE at 1 s,
    /// a direction every 3 s, and the right answer 250 ms after a reaction
    /// challenge appears.
    pub fn demo() -> Self {
        let mut board = Self::new()
            .with_environment(|t| {
                let s = t.as_secs_f32();
                EnvironmentReading {
                    temperature_c: 22.5 + 4.0 * (s / 20.0).sin(),
                    humidity_pct: 45.0 + 5.0 * (s / 30.0).cos(),
                    pressure_mbar: 1013.0 + (s / 60.0).sin(),
                }
            })
            .with_acceleration(|t| {
                if t.as_millis() % 7000 < 200 {
                    return Acceleration::new(1.2, 0.8, 1.0);
                }
                let s = t.as_secs_f32();
                let x = 0.5 * (s / 3.0).sin();
                let y = 0.4 * (s / 4.0).sin();
                Acceleration::new(x, y, (1.0 - x * x - y * y).sqrt())
            })
            .with_network([None, None, Some(Ipv4Addr::new(192, 168, 4, 23))])
            .schedule(Duration::from_secs(1), StickEvent::pressed(Direction::Middle));
        for (i, d) in Direction::ALL.iter().cycle().take(40).enumerate() {
            let at = Duration::from_secs(3 * (i as u64 + 1));
            board = board.schedule(at, StickEvent::pressed(*d));
        }

        let mut shown: Option<(Duration, Direction)> = None;
        board.with_responder(move |now, frame| {
            let challenge = CHALLENGES
                .iter()
                .copied()
                .find(|&d| frame.is_uniform(direction_colour(d)));
            let Some(d) = challenge else {
                shown = None;
                return None;
            };
            match shown {
                Some((since, seen)) if seen == d => {
                    if now.saturating_sub(since) >= Duration::from_millis(250) {
                        shown = None;
                        return Some(StickEvent::pressed(d));
                    }
                }
                _ => shown = Some((now, d)),
            }
            None
        })
    }

    pub fn with_environment(
        mut self,
        f: impl FnMut(Duration) -> EnvironmentReading + Send + 'static,
    ) -> Self {
        self.environment = Box::new(f);
        self
    }

    pub fn with_acceleration(
        mut self,
        f: impl FnMut(Duration) -> Acceleration + Send + 'static,
    ) -> Self {
        self.accel = Box::new(f);
        self
    }

    /// Deliver `event` once virtual time reaches `at`. Events are kept in
    /// time order.
    pub fn schedule(mut self, at: Duration, event: StickEvent) -> Self {
        let pos = self.script.partition_point(|(t, _)| *t <= at);
        self.script.insert(pos, (at, event));
        self
    }

    /// Consulted on every joystick poll with the current time and the frame
    /// on the matrix. Used to play the reaction game automatically.
    pub fn with_responder(
        mut self,
        f: impl FnMut(Duration, &Frame) -> Option<StickEvent> + Send + 'static,
    ) -> Self {
        self.responder = Some(Box::new(f));
        self
    }

    /// Answers for successive network probes; the last one repeats.
    pub fn with_network(mut self, answers: impl IntoIterator<Item = Option<Ipv4Addr>>) -> Self {
        self.network = answers.into_iter().collect();
        self
    }

    /// Queue an event for the next poll.
    pub fn push_event(&mut self, event: StickEvent) {
        self.pending.push(event);
    }

    /// Every frame written so far, in logical (unrotated) orientation.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }
}

impl LedMatrix for SimBoard {
    fn set_frame(&mut self, frame: &Frame) -> Result<()> {
        self.frames.push(*frame);
        Ok(())
    }

    fn set_rotation(&mut self, rotation: Rotation) -> Result<()> {
        debug!("sim: rotation {}", rotation.degrees());
        self.rotation = rotation;
        Ok(())
    }
}

impl EnvironmentSensors for SimBoard {
    fn temperature(&mut self) -> Result<f32> {
        Ok((self.environment)(self.clock.now()).temperature_c)
    }

    fn humidity(&mut self) -> Result<f32> {
        Ok((self.environment)(self.clock.now()).humidity_pct)
    }

    fn pressure(&mut self) -> Result<f32> {
        Ok((self.environment)(self.clock.now()).pressure_mbar)
    }

    fn read_environment(&mut self) -> Result<EnvironmentReading> {
        Ok((self.environment)(self.clock.now()))
    }
}

impl MotionSensors for SimBoard {
    fn acceleration(&mut self) -> Result<Acceleration> {
        Ok((self.accel)(self.clock.now()))
    }

    fn orientation(&mut self) -> Result<Orientation> {
        let a = self.acceleration()?;
        Ok(orientation_from_accel(a))
    }
}

impl Joystick for SimBoard {
    fn poll_events(&mut self) -> Result<Vec<StickEvent>> {
        let now = self.clock.now();
        while let Some((at, event)) = self.script.front().copied() {
            if at > now {
                break;
            }
            self.script.pop_front();
            self.pending.push(event);
        }
        if let Some(respond) = self.responder.as_mut() {
            let frame = self.frames.last().copied().unwrap_or_default();
            if let Some(event) = respond(now, &frame) {
                self.pending.push(event);
            }
        }
        Ok(self.pending.drain())
    }
}

impl NetworkProbe for SimBoard {
    fn local_ipv4(&mut self) -> Option<Ipv4Addr> {
        if let Some(answer) = self.network.pop_front() {
            self.network_fallback = answer;
            return answer;
        }
        self.network_fallback
    }
}

impl DelayNs for SimBoard {
    fn delay_ns(&mut self, ns: u32) {
        self.clock.delay_ns(ns);
    }
}

impl Clock for SimBoard {
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

// ── SimCamera ─────────────────────────────────────────────────

/// Camera that writes a tiny placeholder file per capture.
#[derive(Debug, Default)]
pub struct SimCamera {
    settings: Option<CaptureSettings>,
    captures: Vec<PathBuf>,
    starts: u32,
    stops: u32,
}

impl SimCamera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn captures(&self) -> &[PathBuf] {
        &self.captures
    }

    pub fn starts(&self) -> u32 {
        self.starts
    }

    pub fn stops(&self) -> u32 {
        self.stops
    }

    pub fn settings(&self) -> Option<CaptureSettings> {
        self.settings
    }
}

impl Camera for SimCamera {
    fn start(&mut self, settings: &CaptureSettings) -> Result<()> {
        debug!("sim camera: {}x{}", settings.width, settings.height);
        self.settings = Some(*settings);
        self.starts += 1;
        Ok(())
    }

    fn capture_file(&mut self, path: &Path) -> Result<()> {
        let Some(settings) = self.settings else {
            return Err(CameraError::NotRunning.into());
        };
        let body = format!("simulated {}x{} still\n", settings.width, settings.height);
        fs::write(path, body).map_err(|e| Error::io(path, e))?;
        self.captures.push(path.to_path_buf());
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        if self.settings.take().is_some() {
            self.stops += 1;
        }
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.settings.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::RED;

    #[test]
    fn sleeping_advances_virtual_time_and_wall_clock() {
        let mut board = SimBoard::new();
        let t0 = board.local_time();
        board.sleep(Duration::from_millis(1500));
        board.delay_ms(500);
        assert_eq!(board.now(), Duration::from_secs(2));
        assert_eq!(board.local_time() - t0, chrono::Duration::seconds(2));
    }

    #[test]
    fn deadline_requests_stop() {
        let stop = StopSignal::new();
        let mut clock = SimClock::new();
        clock.stop_at(Duration::from_secs(1), stop.clone());
        clock.sleep(Duration::from_millis(999));
        assert!(!stop.is_requested());
        clock.sleep(Duration::from_millis(1));
        assert!(stop.is_requested());
    }

    #[test]
    fn scripted_events_arrive_when_due() {
        let mut board = SimBoard::new()
            .schedule(Duration::from_secs(2), StickEvent::pressed(Direction::Left))
            .schedule(Duration::from_secs(1), StickEvent::pressed(Direction::Up));
        assert!(board.poll_events().unwrap().is_empty());
        board.sleep(Duration::from_secs(1));
        assert_eq!(
            board.poll_events().unwrap(),
            vec![StickEvent::pressed(Direction::Up)]
        );
        board.sleep(Duration::from_secs(5));
        assert_eq!(
            board.poll_events().unwrap(),
            vec![StickEvent::pressed(Direction::Left)]
        );
        assert!(board.poll_events().unwrap().is_empty());
    }

    #[test]
    fn network_answers_repeat_the_last_one() {
        let lan = Ipv4Addr::new(192, 168, 0, 9);
        let mut board = SimBoard::new().with_network([None, Some(lan)]);
        assert_eq!(board.local_ipv4(), None);
        assert_eq!(board.local_ipv4(), Some(lan));
        assert_eq!(board.local_ipv4(), Some(lan));
    }

    #[test]
    fn frames_are_recorded() {
        let mut board = SimBoard::new();
        board.clear(RED).unwrap();
        assert!(board.last_frame().unwrap().is_uniform(RED));
        assert_eq!(board.frames().len(), 1);
    }

    #[test]
    fn camera_requires_start() {
        let mut cam = SimCamera::new();
        let path = std::env::temp_dir().join("pi_workshop_sim_cam_never.jpg");
        assert!(matches!(
            cam.capture_file(&path),
            Err(Error::Camera(CameraError::NotRunning))
        ));
        cam.start(&CaptureSettings::default()).unwrap();
        assert!(cam.is_running());
        cam.stop().unwrap();
        cam.stop().unwrap();
        assert_eq!(cam.stops(), 1);
    }
}
