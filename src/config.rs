//! Match configuration
//!
//! [`MatchConfig`] holds everything the settings portal controls. It is read
//! once at boot through the [`SettingsPort`] and never changes during a
//! session. [`MatchPrefs`] holds the three values adjusted from the buttons
//! (`total_time`, `brightness`, `mode`), persisted through the [`PrefsPort`].
//!
//! Parsing never fails: blank or unknown strings fall back to defaults and
//! malformed numbers parse as zero before clamping.

use heapless::String;
use serde::{Deserialize, Serialize};

use crate::app::ports::{PrefsPort, SettingsPort};
use crate::graphics::color::Color;
use crate::graphics::overlay::{BRIGHTNESS_DEFAULT, Brightness};

/// Main loop period.
pub const FRAME_INTERVAL_MS: u32 = 25;

/// Longest portal message kept.
pub const MESSAGE_CAPACITY: usize = 64;

pub type Message = String<MESSAGE_CAPACITY>;

// Persisted pref keys.
pub const PREF_TOTAL_TIME: &str = "total_time";
pub const PREF_BRIGHTNESS: &str = "brightness";
pub const PREF_MODE: &str = "mode";

/// Match length used when nothing is stored.
pub const DEFAULT_TOTAL_TIME: u16 = 90;

/// Settings from the web portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    // --- Messages ---
    pub msg_intro: Message,
    pub msg_rumble: Message,
    pub msg_get_ready: Message,
    pub msg_game_over: Message,

    // --- Colours ---
    pub color_intro: Color,
    pub color_pre: Color,
    pub color_timer: Color,

    // --- Display flags ---
    /// Draw the blue/red side bars.
    pub show_aux_lights: bool,
    /// Draw dim bars for players who are not ready.
    pub show_dim_lights: bool,
    /// Scroll "<COLOR> READY" when a player readies up.
    pub show_ready: bool,

    // --- Behaviour ---
    /// Return to standby on its own after game over.
    pub auto_reset: bool,
    pub buzzer_on: bool,

    // --- Timing (seconds) ---
    pub min_time: u16,
    pub max_time: u16,
    /// Step for the black+green shortcut.
    pub interval_time: u16,
    /// Get-ready message duration, 0 skips it.
    pub pre_time: u8,
    /// "GO!" duration, overlaps the first seconds of the match.
    pub go_time: u8,
    pub game_over_time: u8,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            msg_intro: Message::new(),
            msg_rumble: Message::new(),
            msg_get_ready: Message::new(),
            msg_game_over: Message::new(),

            color_intro: Color::Red,
            color_pre: Color::Red,
            color_timer: Color::Red,

            show_aux_lights: false,
            show_dim_lights: false,
            show_ready: false,

            auto_reset: false,
            buzzer_on: true,

            min_time: 30,
            max_time: 180,
            interval_time: 15,
            pre_time: 5,
            go_time: 2,
            game_over_time: 5,
        }
    }
}

impl MatchConfig {
    /// Read every portal key. Missing keys take their defaults.
    pub fn from_settings(settings: &impl SettingsPort) -> Self {
        let get = |key: &str| settings.load_setting(key);
        Self {
            msg_intro: message(&get("msg_intro")),
            msg_rumble: message(&get("msg_rumble")),
            msg_get_ready: message(&get("msg_get_ready")),
            msg_game_over: message(&get("msg_game_over")),

            color_intro: Color::from_name(&get("color_intro")),
            color_pre: Color::from_name(&get("color_pre")),
            color_timer: Color::from_name(&get("color_timer")),

            show_aux_lights: parse_flag(&get("show_aux_lights")),
            show_dim_lights: parse_flag(&get("show_dim_lights")),
            show_ready: parse_flag(&get("show_ready")),

            auto_reset: parse_flag(&get("auto_reset")),
            buzzer_on: get("buzzer_on") != "false",

            min_time: parse_min_time(&get("min_time")),
            max_time: parse_max_time(&get("max_time")),
            interval_time: parse_interval(&get("interval_time")),
            pre_time: parse_seconds_or_off(&get("pre_time"), 5),
            go_time: parse_seconds_or_off(&get("go_time"), 2),
            game_over_time: parse_seconds_or_off(&get("game_over_time"), 5),
        }
    }

    /// Clamp a stored match length into `[min_time, max_time]`.
    pub fn clamp_total_time(&self, secs: u16) -> u16 {
        secs.max(self.min_time).min(self.max_time)
    }

    /// Black+green step: add one interval, wrap to `min_time` past `max_time`.
    pub fn next_total_time(&self, current: u16) -> u16 {
        match current.checked_add(self.interval_time) {
            Some(next) if next <= self.max_time => next,
            _ => self.min_time,
        }
    }
}

// ---------------------------------------------------------------------------
// Player mode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerMode {
    #[default]
    TwoPlayers,
    ThreePlayers,
    Rumble,
}

impl PlayerMode {
    /// Decode the stored `mode` pref. Unknown values mean rumble.
    pub fn from_pref(value: i32) -> Self {
        match value {
            0 => Self::TwoPlayers,
            1 => Self::ThreePlayers,
            _ => Self::Rumble,
        }
    }

    pub const fn pref_value(self) -> &'static str {
        match self {
            Self::TwoPlayers => "0",
            Self::ThreePlayers => "1",
            Self::Rumble => "2",
        }
    }

    /// 2P → 3P → Rumble → 2P.
    pub const fn next(self) -> Self {
        match self {
            Self::TwoPlayers => Self::ThreePlayers,
            Self::ThreePlayers => Self::Rumble,
            Self::Rumble => Self::TwoPlayers,
        }
    }

    /// Scrolling text and colour shown when the mode is selected.
    pub const fn announcement(self) -> (&'static str, Color) {
        match self {
            Self::TwoPlayers => ("2 PLAYERS", Color::Blue),
            Self::ThreePlayers => ("3 PLAYERS", Color::Green),
            Self::Rumble => ("RUMBLE MODE", Color::Red),
        }
    }
}

// ---------------------------------------------------------------------------
// Persisted prefs
// ---------------------------------------------------------------------------

/// Button-adjustable values restored at boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchPrefs {
    pub total_time: u16,
    pub brightness: Brightness,
    pub mode: PlayerMode,
}

impl MatchPrefs {
    pub fn load(prefs: &impl PrefsPort, config: &MatchConfig) -> Self {
        let total = prefs.get(PREF_TOTAL_TIME);
        let total_time = if total.is_empty() {
            DEFAULT_TOTAL_TIME
        } else {
            clamp_to_u16(parse_int(&total))
        };

        let brightness = prefs.get(PREF_BRIGHTNESS);
        let brightness = if brightness.is_empty() {
            BRIGHTNESS_DEFAULT
        } else {
            parse_int(&brightness).clamp(0, i32::from(u8::MAX)) as u8
        };

        Self {
            total_time: config.clamp_total_time(total_time),
            brightness: Brightness::new(brightness),
            mode: PlayerMode::from_pref(parse_int(&prefs.get(PREF_MODE))),
        }
    }
}

// ---------------------------------------------------------------------------
// String parsers
// ---------------------------------------------------------------------------

/// Portal checkboxes store `"true"` or `"trueselected"`.
pub fn parse_flag(value: &str) -> bool {
    matches!(value, "true" | "trueselected")
}

pub fn parse_min_time(value: &str) -> u16 {
    match value {
        "0:15" => 15,
        "0:45" => 45,
        "1:00" => 60,
        "1:30" => 90,
        _ => 30,
    }
}

pub fn parse_max_time(value: &str) -> u16 {
    match value {
        "2:00" => 120,
        "4:00" => 240,
        "5:00" => 300,
        _ => 180,
    }
}

pub fn parse_interval(value: &str) -> u16 {
    match value {
        "0:01" => 1,
        "0:02" => 2,
        "0:05" => 5,
        "0:10" => 10,
        "0:30" => 30,
        _ => 15,
    }
}

/// `"Off"` is zero, blank takes `default`, otherwise the leading digit.
pub fn parse_seconds_or_off(value: &str, default: u8) -> u8 {
    if value == "Off" {
        return 0;
    }
    match value.chars().next() {
        None => default,
        Some(c) => c.to_digit(10).map_or(0, |d| d as u8),
    }
}

/// Leading optional sign and digits, zero when there are none.
pub fn parse_int(value: &str) -> i32 {
    let s = value.trim_start();
    let (neg, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let mut n: i32 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        n = n.saturating_mul(10).saturating_add(i32::from(b - b'0'));
    }
    if neg { -n } else { n }
}

fn clamp_to_u16(n: i32) -> u16 {
    n.clamp(0, i32::from(u16::MAX)) as u16
}

fn message(text: &str) -> Message {
    let mut out = Message::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
