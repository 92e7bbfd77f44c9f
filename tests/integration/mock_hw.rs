//! Shared fixtures for the activity tests.
//!
//! The simulated board itself lives in the library (`adapters::sim`);
//! this module adds an event recorder and scratch directories.

use core::time::Duration;
use std::path::PathBuf;

use pi_workshop::adapters::sim::SimBoard;
use pi_workshop::app::events::ActivityEvent;
use pi_workshop::app::ports::EventSink;
use pi_workshop::app::runner::{run, Activity, RunOutcome};
use pi_workshop::display::Frame;
use pi_workshop::shutdown::StopSignal;

// ── RecordingSink ─────────────────────────────────────────────

/// Keeps every event for later assertions.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<ActivityEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&ActivityEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn contains(&self, event: &ActivityEvent) -> bool {
        self.events.contains(event)
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &ActivityEvent) {
        self.events.push(event.clone());
    }
}

// ── Helpers ───────────────────────────────────────────────────

/// Run `activity` on `board`, stopping it after `limit` of virtual time.
pub fn run_for<A>(
    activity: &mut A,
    board: &mut SimBoard,
    limit: Duration,
) -> (RunOutcome<A::Summary>, RecordingSink)
where
    A: Activity<SimBoard>,
{
    let stop = StopSignal::new();
    board.clock.stop_at(limit, stop.clone());
    let mut sink = RecordingSink::new();
    let outcome = run(activity, board, &mut sink, &stop).unwrap();
    (outcome, sink)
}

/// Fresh, empty directory under the system temp dir.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "pi_workshop_it_{name}_{}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

/// Uniform colours shown, with consecutive repeats collapsed.
#[allow(dead_code)]
pub fn colour_sequence(frames: &[Frame]) -> Vec<(u8, u8, u8)> {
    let mut out: Vec<(u8, u8, u8)> = Vec::new();
    for f in frames {
        let Some(c) = f.get(0, 0) else { continue };
        if f.is_uniform(c) && out.last() != Some(&c) {
            out.push(c);
        }
    }
    out
}
