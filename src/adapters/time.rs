//! Uptime clock adapter.
//!
//! [`UptimeClock`] implements the [`Clock`] port.  On the board it reads
//! the ESP-IDF high-resolution timer (`esp_timer_get_time`, microseconds
//! since boot); on the host it measures from construction with
//! [`std::time::Instant`].

use crate::app::ports::Clock;

#[derive(Debug, Clone, Copy)]
pub struct UptimeClock {
    #[cfg(not(target_os = "espidf"))]
    origin: std::time::Instant,
}

impl Default for UptimeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl UptimeClock {
    #[cfg(target_os = "espidf")]
    pub fn new() -> Self {
        Self {}
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }

    fn micros(&self) -> u64 {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: the system timer is always running and the call only reads it.
            let us = unsafe { esp_idf_svc::sys::esp_timer_get_time() };
            us.max(0) as u64
        }

        #[cfg(not(target_os = "espidf"))]
        {
            u64::try_from(self.origin.elapsed().as_micros()).unwrap_or(u64::MAX)
        }
    }
}

impl Clock for UptimeClock {
    fn now_ms(&self) -> u64 {
        self.micros() / 1_000
    }
}
