//! Interrupt flag shared between the Ctrl-C handler and the activity loop.
//!
//! The handler only stores `true`; the loop polls [`StopSignal::is_requested`]
//! once per iteration and between long waits, then runs cleanup.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::info;

#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    flag: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route Ctrl-C (SIGINT) into this signal. Only one handler may be
    /// installed per process.
    pub fn install_ctrlc(&self) -> Result<(), ctrlc::Error> {
        let flag = Arc::clone(&self.flag);
        ctrlc::set_handler(move || {
            flag.store(true, Ordering::Release);
        })?;
        info!("Ctrl-C handler installed");
        Ok(())
    }

    pub fn request(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_requested(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let a = StopSignal::new();
        let b = a.clone();
        assert!(!b.is_requested());
        a.request();
        assert!(b.is_requested());
    }
}
