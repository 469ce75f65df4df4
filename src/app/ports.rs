//! Port traits: the hexagonal boundary between the timer core and the board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ TimerApp / MatchContext (domain)
//! ```
//!
//! Driven adapters (clock, displays, settings document, prefs store) implement
//! these traits.  Digital I/O goes through the `embedded-hal` pin traits
//! directly.  The domain never touches a peripheral or a file.
//!
//! [`Board`] bundles the concrete adapter types for one build target so the
//! state machine can name them with a single type parameter.

use core::fmt;

use embedded_hal::digital::{InputPin, OutputPin};

use crate::graphics::color::Color;

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond counter.  Must never go backwards within a session.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → LED matrix)
// ───────────────────────────────────────────────────────────────

/// Bitmaps the adapters know how to draw.  Large variants target the
/// 32×16 audience matrix, small ones the 16×8 player matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    WifiLarge,
    WifiSmall,
    BrightnessLarge,
    BrightnessSmall,
}

/// Draw primitives of one LED matrix.
///
/// The core decides what goes where; fonts, text size and pixel mapping
/// belong to the adapter.  Nothing is visible until [`show`](Self::show).
pub trait DisplaySurface {
    fn clear(&mut self);

    /// Raw panel brightness (0–255).
    fn set_brightness(&mut self, level: u8);

    /// Text baseline origin for the next [`print`](Self::print).
    fn set_cursor(&mut self, x: i16, y: i16);

    fn set_text_color(&mut self, color: Color);

    /// Draw text at the cursor, no wrapping.
    fn print(&mut self, text: &str);

    /// Filled rectangle.
    fn draw_rect(&mut self, x: i16, y: i16, w: i16, h: i16, color: Color);

    fn draw_line(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, color: Color);

    fn draw_icon(&mut self, icon: Icon, x: i16, y: i16, color: Color);

    /// Push the frame to the panel.
    fn show(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Settings port (driven adapter: settings portal document → domain)
// ───────────────────────────────────────────────────────────────

/// Read-only view of the settings written by the web portal.
pub trait SettingsPort {
    /// Raw value for `key`, or an empty string when unset.
    fn load_setting(&self, key: &str) -> String;
}

// ───────────────────────────────────────────────────────────────
// Prefs port (driven adapter: domain ↔ NVS / flash)
// ───────────────────────────────────────────────────────────────

/// Small key-value store for values adjusted during play
/// (`total_time`, `brightness`, `mode`) so they survive a reboot.
pub trait PrefsPort {
    /// Stored value, or an empty string when the key is missing.
    fn get(&self, key: &str) -> String;

    /// Insert or replace a value.  Writes MUST be atomic.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Board bundle
// ───────────────────────────────────────────────────────────────

/// Concrete adapter types for one target.
pub trait Board {
    type Clock: Clock;
    type Display: DisplaySurface;
    type Input: InputPin;
    type Output: OutputPin;
    type Prefs: PrefsPort;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`PrefsPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Key is empty or longer than the backend allows.
    InvalidKey,
    /// Storage partition is full.
    Full,
    /// Generic I/O error from the storage backend.
    IoError,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKey => write!(f, "invalid key"),
            Self::Full => write!(f, "storage full"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for StorageError {}
