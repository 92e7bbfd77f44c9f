//! Application core: ports, events and the activity runner.
//!
//! Nothing in here touches hardware. Activities talk to the board through
//! the **port traits** in [`ports`], narrate through [`events`], and are
//! driven by [`runner::run`], which keeps them testable against the
//! simulated board.

pub mod events;
pub mod ports;
pub mod runner;
