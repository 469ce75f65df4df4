//! Piezo buzzer driver (active buzzer on a plain GPIO).
//!
//! Pulses are timed by an internal [`SoftTimer`]; `poll()` must run every
//! loop iteration to end them on time.
//!
//! A double beep is a three-stage chain driven by the `double` flag:
//!
//! ```text
//!  beep_double()        first pulse ends        pause ends          second pulse ends
//!  ── ON (100ms) ──▶ OFF, arm pause (100ms) ──▶ ON (100ms) ──▶ OFF
//! ```

use embedded_hal::digital::OutputPin;
use log::warn;

use super::soft_timer::SoftTimer;

/// Length of a short beep and of the gap inside a double beep.
pub const SHORT_BEEP_MS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// End of the current pulse.
    Silence,
    /// End of the gap inside a double beep.
    SecondPulse,
}

pub struct Buzzer<P> {
    pin: P,
    enabled: bool,
    active: bool,
    double: bool,
    timer: SoftTimer<Stage>,
}

impl<P: OutputPin> Buzzer<P> {
    /// Take ownership of the pin and drive it low.
    pub fn new(pin: P, enabled: bool) -> Self {
        let mut buzzer = Self {
            pin,
            enabled,
            active: false,
            double: false,
            timer: SoftTimer::new(),
        };
        buzzer.write(false);
        buzzer
    }

    /// Gate all future beeps.  A pulse already sounding runs to its end.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// `true` while the output is asserted.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Sound for `duration_ms`.  Restarts the pulse if one is running.
    pub fn beep(&mut self, duration_ms: u32, now_ms: u64) {
        if !self.enabled {
            return;
        }
        self.write(true);
        self.active = true;
        self.timer.arm_timer(Stage::Silence, duration_ms, now_ms);
    }

    pub fn beep_short(&mut self, now_ms: u64) {
        self.beep(SHORT_BEEP_MS, now_ms);
    }

    /// Two short beeps separated by a short gap.
    pub fn beep_double(&mut self, now_ms: u64) {
        if !self.enabled {
            return;
        }
        self.beep_short(now_ms);
        self.double = true;
    }

    /// Advance the pulse timing.  Call every loop iteration.
    pub fn poll(&mut self, now_ms: u64) {
        match self.timer.poll(now_ms) {
            Some(Stage::Silence) => {
                self.write(false);
                self.active = false;
                if self.double {
                    self.timer
                        .arm_timer(Stage::SecondPulse, SHORT_BEEP_MS, now_ms);
                }
            }
            Some(Stage::SecondPulse) => {
                self.double = false;
                self.beep_short(now_ms);
            }
            None => {}
        }
    }

    fn write(&mut self, high: bool) {
        let result = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if let Err(e) = result {
            warn!("buzzer: pin write failed: {:?}", e);
        }
    }
}
