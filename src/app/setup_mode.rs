//! Black-button hold classifier for the settings portal screen.
//!
//! While the portal runs, the black button is sampled every loop:
//!
//! - held for at least [`RESTART_HOLD_MS`] and then released → [`SetupAction::Restart`]
//! - held for [`FACTORY_RESET_HOLD_MS`] → [`SetupAction::FactoryReset`] right away
//!
//! Shorter holds do nothing.

/// Hold time that arms a restart on release.
pub const RESTART_HOLD_MS: u64 = 3_000;
/// Hold time that wipes the settings document.
pub const FACTORY_RESET_HOLD_MS: u64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupAction {
    /// Leave setup mode and reboot into the timer.
    Restart,
    /// Delete the settings document, then reboot.
    FactoryReset,
}

#[derive(Debug, Default)]
pub struct SetupHoldMonitor {
    pressed_since: Option<u64>,
    restart_armed: bool,
}

impl SetupHoldMonitor {
    pub const fn new() -> Self {
        Self {
            pressed_since: None,
            restart_armed: false,
        }
    }

    /// Feed the current (active-high) button level.
    pub fn update(&mut self, pressed: bool, now_ms: u64) -> Option<SetupAction> {
        match (self.pressed_since, pressed) {
            (Some(since), true) => {
                let held = now_ms.saturating_sub(since);
                if held >= FACTORY_RESET_HOLD_MS {
                    return Some(SetupAction::FactoryReset);
                }
                if held >= RESTART_HOLD_MS {
                    self.restart_armed = true;
                }
                None
            }
            (Some(_), false) => {
                self.pressed_since = None;
                None
            }
            (None, true) => {
                self.pressed_since = Some(now_ms);
                None
            }
            (None, false) => self.restart_armed.then_some(SetupAction::Restart),
        }
    }
}
