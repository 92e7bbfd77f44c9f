//! Show the board's IP address on the matrix after boot, so a headless Pi
//! can be found on the classroom network.

use core::fmt;
use core::time::Duration;
use std::net::Ipv4Addr;

use log::{info, warn};

use crate::app::events::ActivityEvent;
use crate::app::ports::{Clock, LedMatrix, NetworkProbe};
use crate::app::runner::{Activity, Flow, Session};
use crate::config::BootIpConfig;
use crate::display::scroll::show_message;
use crate::display::{Rotation, BLUE, GREEN, OFF, RED};
use crate::error::Result;

const SCROLL: Duration = Duration::from_millis(50);

/// Loopback means "no route", as does no answer at all.
pub fn usable_address(addr: Option<Ipv4Addr>) -> Option<Ipv4Addr> {
    addr.filter(|a| !a.is_loopback() && !a.is_unspecified())
}

pub struct BootIp {
    cfg: BootIpConfig,
    attempts: u32,
    found: Option<Ipv4Addr>,
}

impl BootIp {
    pub fn new(cfg: BootIpConfig) -> Self {
        Self {
            cfg,
            attempts: 0,
            found: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootIpSummary {
    pub address: Option<Ipv4Addr>,
    pub attempts: u32,
}

impl BootIpSummary {
    pub fn connected(&self) -> bool {
        self.address.is_some()
    }
}

impl fmt::Display for BootIpSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.address {
            Some(addr) => writeln!(f, "IP display complete ({addr}). Exiting."),
            None => writeln!(
                f,
                "Failed to connect to WiFi after {} attempts",
                self.attempts
            ),
        }
    }
}

impl<H> Activity<H> for BootIp
where
    H: LedMatrix + NetworkProbe + Clock + ?Sized,
{
    type Summary = BootIpSummary;

    fn name(&self) -> &'static str {
        "show-ip"
    }

    fn setup(&mut self, hw: &mut H, session: &mut Session<'_>) -> Result<()> {
        let rotation = Rotation::from_degrees(self.cfg.rotation_deg).unwrap_or_default();
        hw.set_rotation(rotation)?;
        let delay = Duration::from_millis(self.cfg.boot_delay_ms);
        session.emit(ActivityEvent::WaitingForNetwork { delay });
        show_message(hw, "Boot...", SCROLL, BLUE, OFF)?;
        session.pause(hw, delay)
    }

    fn step(&mut self, hw: &mut H, session: &mut Session<'_>) -> Result<Flow> {
        if let Some(addr) = usable_address(hw.local_ipv4()) {
            info!("network up, address {addr}");
            self.found = Some(addr);
            session.emit(ActivityEvent::IpFound { addr });
            let text = format!("IP: {addr}");
            for _ in 0..self.cfg.repeats {
                show_message(hw, &text, SCROLL, GREEN, OFF)?;
                session.pause(hw, Duration::from_millis(self.cfg.repeat_pause_ms))?;
            }
            hw.clear(OFF)?;
            return Ok(Flow::Done);
        }

        self.attempts += 1;
        session.emit(ActivityEvent::NoNetwork {
            attempt: self.attempts,
            max_attempts: self.cfg.max_attempts,
        });
        show_message(hw, "No WiFi", SCROLL, RED, OFF)?;
        session.pause(hw, Duration::from_millis(self.cfg.retry_ms))?;

        if self.attempts >= self.cfg.max_attempts {
            warn!("no network after {} attempts", self.attempts);
            session.emit(ActivityEvent::NetworkFailed);
            show_message(hw, "WiFi FAILED - Check settings", SCROLL, RED, OFF)?;
            hw.clear(OFF)?;
            return Ok(Flow::Done);
        }
        Ok(Flow::Continue)
    }

    fn cleanup(&mut self, hw: &mut H, _session: &mut Session<'_>) -> Result<()> {
        hw.clear(OFF)
    }

    fn summary(&self) -> BootIpSummary {
        BootIpSummary {
            address: self.found,
            attempts: self.attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_and_missing_mean_offline() {
        assert_eq!(usable_address(None), None);
        assert_eq!(usable_address(Some(Ipv4Addr::LOCALHOST)), None);
        assert_eq!(usable_address(Some(Ipv4Addr::UNSPECIFIED)), None);
        let lan = Ipv4Addr::new(192, 168, 1, 42);
        assert_eq!(usable_address(Some(lan)), Some(lan));
    }
}
