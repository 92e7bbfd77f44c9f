//! Activity runner: setup, step loop, cleanup.
//!
//! ```text
//!   setup ──▶ step ──▶ step ──▶ … ──▶ Done / Ctrl-C / error
//!                                          │
//!                                          ▼
//!                                  cleanup (exactly once)
//! ```
//!
//! Every activity is a plain loop. The runner owns the parts they all
//! share: checking the stop flag between steps, turning an interrupt into a
//! normal finish, and calling `cleanup` exactly once no matter how the loop
//! ended. A cleanup failure is logged and only returned when the run itself
//! succeeded, so it never hides the first error.

use core::time::Duration;

use log::{debug, info, warn};

use super::events::ActivityEvent;
use super::ports::{Clock, EventSink};
use crate::error::{Error, Result};
use crate::shutdown::StopSignal;

/// Longest uninterrupted sleep inside [`Session::pause`].
const PAUSE_SLICE: Duration = Duration::from_millis(50);

/// What the runner should do after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Done,
}

/// Per-run context handed to every activity hook.
pub struct Session<'a> {
    sink: &'a mut dyn EventSink,
    stop: &'a StopSignal,
}

impl<'a> Session<'a> {
    pub fn new(sink: &'a mut dyn EventSink, stop: &'a StopSignal) -> Self {
        Self { sink, stop }
    }

    pub fn emit(&mut self, event: ActivityEvent) {
        self.sink.emit(&event);
    }

    pub fn stop_requested(&self) -> bool {
        self.stop.is_requested()
    }

    /// Sleep for `duration`, waking every 50 ms to check the stop flag.
    ///
    /// Returns [`Error::Interrupted`] as soon as a stop is seen. Must not be
    /// used from `cleanup`, where the flag is usually already set.
    pub fn pause<C: Clock + ?Sized>(&self, clock: &mut C, duration: Duration) -> Result<()> {
        let mut left = duration;
        loop {
            if self.stop.is_requested() {
                return Err(Error::Interrupted);
            }
            if left.is_zero() {
                return Ok(());
            }
            let slice = left.min(PAUSE_SLICE);
            clock.sleep(slice);
            left -= slice;
        }
    }
}

/// A classroom activity driven by [`run`].
pub trait Activity<H: ?Sized> {
    /// Statistics printed when the activity ends.
    type Summary;

    fn name(&self) -> &'static str;

    /// One-off preparation before the first step.
    fn setup(&mut self, hw: &mut H, session: &mut Session<'_>) -> Result<()>;

    /// One loop iteration.
    fn step(&mut self, hw: &mut H, session: &mut Session<'_>) -> Result<Flow>;

    /// Release hardware and clear the display. Called exactly once.
    fn cleanup(&mut self, hw: &mut H, session: &mut Session<'_>) -> Result<()>;

    fn summary(&self) -> Self::Summary;
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome<S> {
    pub summary: S,
    /// True when the run ended because of Ctrl-C rather than on its own.
    pub interrupted: bool,
}

/// Run `activity` to completion or interruption.
pub fn run<H, A>(
    activity: &mut A,
    hw: &mut H,
    sink: &mut dyn EventSink,
    stop: &StopSignal,
) -> Result<RunOutcome<A::Summary>>
where
    H: ?Sized,
    A: Activity<H>,
{
    let name = activity.name();
    info!("starting activity {name}");
    let mut session = Session::new(sink, stop);
    session.emit(ActivityEvent::Started { activity: name });

    let driven = drive(activity, hw, &mut session);
    let cleaned = activity.cleanup(hw, &mut session);

    let interrupted = match driven {
        Ok(interrupted) => interrupted,
        Err(Error::Interrupted) => true,
        Err(e) => {
            if let Err(ce) = cleaned {
                warn!("{name}: cleanup failed after error: {ce}");
            }
            return Err(e);
        }
    };
    cleaned?;

    if interrupted {
        debug!("{name}: stopped by user");
    }
    session.emit(ActivityEvent::Stopped {
        activity: name,
        interrupted,
    });
    Ok(RunOutcome {
        summary: activity.summary(),
        interrupted,
    })
}

/// Setup then step until done. `Ok(true)` means the stop flag ended it.
fn drive<H, A>(activity: &mut A, hw: &mut H, session: &mut Session<'_>) -> Result<bool>
where
    H: ?Sized,
    A: Activity<H>,
{
    activity.setup(hw, session)?;
    loop {
        if session.stop_requested() {
            return Ok(true);
        }
        match activity.step(hw, session)? {
            Flow::Continue => {}
            Flow::Done => return Ok(false),
        }
    }
}
