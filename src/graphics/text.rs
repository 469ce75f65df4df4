//! Text animation state: what is on screen and where.
//!
//! One message at a time.  Static text sits centred; dynamic text enters
//! from the right edge (x = 32) and moves one column left per frame.  Once
//! the whole string has left the panel (x < −8·len) the position wraps back
//! to 32 and [`step`](TextAnimation::step) reports [`Step::Wrapped`] so the
//! renderer can release the completion trigger.

use core::fmt::Write;

use heapless::String;

use super::color::Color;

/// Longest message kept; longer text is cut on a character boundary.
pub const TEXT_CAPACITY: usize = 64;

/// Column where scrolling text enters (panel width).
pub const SCROLL_START_X: i16 = 32;

/// Horizontal advance per glyph on the audience panel.
pub const GLYPH_ADVANCE: i16 = 8;

/// Outcome of one animation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Static text, nothing moved.
    Still,
    /// Scrolled one column left.
    Moved,
    /// Text fully left the panel; position reset to the right edge.
    Wrapped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextAnimation {
    content: String<TEXT_CAPACITY>,
    color: Color,
    xpos: i16,
    scrolling: bool,
}

impl Default for TextAnimation {
    fn default() -> Self {
        Self {
            content: String::new(),
            color: Color::Red,
            xpos: 0,
            scrolling: false,
        }
    }
}

impl TextAnimation {
    /// Centred (or placed at `xpos`) non-moving text.
    pub fn set_static(&mut self, text: &str, color: Color, xpos: Option<i16>) {
        let content = truncate(text);
        let xpos = xpos.unwrap_or_else(|| centre_x(char_len(&content)));
        *self = Self {
            content,
            color,
            xpos,
            scrolling: false,
        };
    }

    /// Scrolling text entering from the right edge.
    pub fn set_dynamic(&mut self, text: &str, color: Color) {
        *self = Self {
            content: truncate(text),
            color,
            xpos: SCROLL_START_X,
            scrolling: true,
        };
    }

    /// Advance one frame.
    pub fn step(&mut self) -> Step {
        if !self.scrolling {
            return Step::Still;
        }
        self.xpos -= 1;
        if self.xpos < -self.width() {
            self.xpos = SCROLL_START_X;
            return Step::Wrapped;
        }
        Step::Moved
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn xpos(&self) -> i16 {
        self.xpos
    }

    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    /// Rendered width in columns.
    pub fn width(&self) -> i16 {
        char_len(&self.content).saturating_mul(GLYPH_ADVANCE)
    }
}

/// Clock text: `M:SS`, or `M SS` for the blinking-colon phase.
pub fn format_time(secs: u16, colon: bool) -> String<8> {
    let mut out = String::new();
    let sep = if colon { ':' } else { ' ' };
    // Max "1092:15" fits in 8 bytes.
    let _ = write!(out, "{}{}{:02}", secs / 60, sep, secs % 60);
    out
}

fn centre_x(len: i16) -> i16 {
    15_i16.saturating_sub(len.saturating_mul(3))
}

fn char_len(s: &str) -> i16 {
    s.chars().count().min(i16::MAX as usize) as i16
}

fn truncate(text: &str) -> String<TEXT_CAPACITY> {
    let mut out = String::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
