//! Task Watchdog Timer (TWDT) driver.
//!
//! Resets the board if the main loop stops for longer than
//! [`WATCHDOG_TIMEOUT_MS`].  The loop feeds it once per iteration; the
//! longest legitimate stall is the 3 s paused-state hold check.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::{
    ESP_OK, esp_task_wdt_add, esp_task_wdt_config_t, esp_task_wdt_reconfigure, esp_task_wdt_reset,
};

pub const WATCHDOG_TIMEOUT_MS: u32 = 8_000;

pub struct Watchdog {
    subscribed: bool,
}

impl Default for Watchdog {
    fn default() -> Self {
        Self::new()
    }
}

impl Watchdog {
    /// Subscribe the calling task.  Failure leaves the watchdog inert.
    #[cfg(target_os = "espidf")]
    pub fn new() -> Self {
        let cfg = esp_task_wdt_config_t {
            timeout_ms: WATCHDOG_TIMEOUT_MS,
            idle_core_mask: 0,
            trigger_panic: true,
        };
        // SAFETY: called once from the main task before the loop starts.
        let subscribed = unsafe {
            let ret = esp_task_wdt_reconfigure(&cfg);
            if ret != ESP_OK {
                log::warn!("watchdog: reconfigure returned {}", ret);
            }
            esp_task_wdt_add(core::ptr::null_mut()) == ESP_OK
        };
        if subscribed {
            log::info!("watchdog: armed ({} ms)", WATCHDOG_TIMEOUT_MS);
        } else {
            log::warn!("watchdog: subscribe failed");
        }
        Self { subscribed }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Self {
        log::info!("watchdog(sim): no-op");
        Self { subscribed: false }
    }

    pub fn is_active(&self) -> bool {
        self.subscribed
    }

    /// Must run at least once per timeout period.
    pub fn feed(&self) {
        #[cfg(target_os = "espidf")]
        if self.subscribed {
            // SAFETY: resets the current task's TWDT entry only.
            unsafe {
                esp_task_wdt_reset();
            }
        }
    }
}
