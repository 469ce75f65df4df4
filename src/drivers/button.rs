//! Polled, debounced push-button with edge callbacks.
//!
//! ## Hardware
//!
//! Momentary switch to GND with the internal pull-up enabled, so the raw
//! level is active-low.  [`Pull::Down`] covers switches wired to VCC.
//!
//! ## Debounce
//!
//! `poll()` runs once per loop iteration.  A raw level that differs from
//! the accepted state is only accepted once [`DEBOUNCE_MS`] have passed
//! since the previous accepted change; bounces inside that window are
//! ignored outright.  Every accepted change hands back the matching edge
//! callback, if one is registered.
//!
//! | Transition      | Edge    | Callback      |
//! |-----------------|---------|---------------|
//! | released→pressed | posedge | `on_posedge`  |
//! | pressed→released | negedge | `on_negedge`  |

use embedded_hal::digital::InputPin;
use log::debug;

/// Minimum time between two accepted level changes.
pub const DEBOUNCE_MS: u64 = 50;

/// Electrical wiring of the switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pull {
    /// Pull-up resistor, switch to GND: low level = pressed.
    Up,
    /// Pull-down resistor, switch to VCC: high level = pressed.
    Down,
}

/// Logical transition of the debounced state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Pos,
    Neg,
}

pub struct Button<P, H> {
    pin: P,
    pull: Pull,
    pressed: bool,
    last_change_ms: u64,
    on_posedge: Option<H>,
    on_negedge: Option<H>,
}

impl<P: InputPin, H: Copy> Button<P, H> {
    pub fn new(pin: P, pull: Pull) -> Self {
        Self {
            pin,
            pull,
            pressed: false,
            last_change_ms: 0,
            on_posedge: None,
            on_negedge: None,
        }
    }

    /// Register the callback for released→pressed.
    pub fn set_posedge(&mut self, handler: H) {
        self.on_posedge = Some(handler);
    }

    /// Register the callback for pressed→released.
    pub fn set_negedge(&mut self, handler: H) {
        self.on_negedge = Some(handler);
    }

    /// Debounced state: `true` while the button is held.
    pub fn get(&self) -> bool {
        self.pressed
    }

    /// Sample the pin and run the debounce filter.
    ///
    /// Returns the edge callback to invoke when a change was accepted and
    /// a handler is registered for it.
    pub fn poll(&mut self, now_ms: u64) -> Option<H> {
        match self.poll_edge(now_ms)? {
            Edge::Pos => self.on_posedge,
            Edge::Neg => self.on_negedge,
        }
    }

    /// Like [`poll`](Self::poll) but reports the raw edge instead of the
    /// registered handler.
    pub fn poll_edge(&mut self, now_ms: u64) -> Option<Edge> {
        let level = self.read_pressed()?;
        if level == self.pressed || now_ms < self.last_change_ms.saturating_add(DEBOUNCE_MS) {
            return None;
        }
        self.pressed = level;
        self.last_change_ms = now_ms;
        Some(if level { Edge::Pos } else { Edge::Neg })
    }

    fn read_pressed(&mut self) -> Option<bool> {
        match self.pin.is_high() {
            Ok(high) => Some(match self.pull {
                Pull::Up => !high,
                Pull::Down => high,
            }),
            Err(e) => {
                debug!("button read failed: {:?}", e);
                None
            }
        }
    }
}
