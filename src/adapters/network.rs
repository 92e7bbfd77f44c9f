//! Outbound-address probe.
//!
//! Connecting a UDP socket sends nothing; it only asks the kernel which
//! local address would route to the target. No route means no network.

use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};

use log::debug;

use crate::app::ports::NetworkProbe;

/// Private address that never has to answer.
pub const PROBE_TARGET: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(10, 255, 255, 255)), 1);

#[derive(Debug, Clone, Copy)]
pub struct UdpRouteProbe {
    target: SocketAddr,
}

impl Default for UdpRouteProbe {
    fn default() -> Self {
        Self::new(PROBE_TARGET)
    }
}

impl UdpRouteProbe {
    pub fn new(target: SocketAddr) -> Self {
        Self { target }
    }

    fn probe(&self) -> std::io::Result<IpAddr> {
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
        socket.connect(self.target)?;
        Ok(socket.local_addr()?.ip())
    }
}

impl NetworkProbe for UdpRouteProbe {
    fn local_ipv4(&mut self) -> Option<Ipv4Addr> {
        match self.probe() {
            Ok(IpAddr::V4(addr)) => Some(addr),
            Ok(IpAddr::V6(_)) => None,
            Err(e) => {
                debug!("no route to {}: {e}", self.target);
                None
            }
        }
    }
}
