//! Outbound application events.
//!
//! The [`TimerApp`](super::service::TimerApp) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  The adapter on the other
//! side decides what to do with them; the firmware logs them.

use crate::fsm::GameState;

/// Stored text of a changed pref (`"180"`, `"8"`, `"2"`).
pub type PrefValue = heapless::String<8>;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The timer has booted (carries the initial state).
    Started(GameState),

    /// The match moved between states.
    StateChanged { from: GameState, to: GameState },

    /// A button shortcut changed and persisted a pref.
    PrefChanged { key: &'static str, value: PrefValue },
}
