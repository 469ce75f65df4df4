//! Player-ready bars and the brightness HUD.
//!
//! ## Ready bar geometry
//!
//! | Mode          | Player | Audience rect (x,y,w,h) | Player line (x0..=x1, y=0) |
//! |---------------|--------|-------------------------|----------------------------|
//! | three players | green  | (8, 0, 16, 2)           | 4..=11                     |
//! |               | blue   | (0, 0, 6, 2)  *aux*     | 13..=15                    |
//! |               | red    | (26, 0, 6, 2) *aux*     | 0..=2                      |
//! | two players   | blue   | (0, 0, 14, 2) *aux*     | 9..=15                     |
//! |               | red    | (18, 0, 14, 2) *aux*    | 0..=6                      |
//!
//! *aux* bars are drawn only when auxiliary lights are enabled.  A player who
//! is not ready gets a dim bar when dim lights are enabled, nothing otherwise.

use crate::app::ports::{DisplaySurface, Icon};

use super::color::Color;

/// Brightness steps offered by the black+blue shortcut.
pub const BRIGHTNESS_MIN: u8 = 1;
pub const BRIGHTNESS_MAX: u8 = 8;
/// Level used when nothing is stored.
pub const BRIGHTNESS_DEFAULT: u8 = 2;

/// Player ready flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadyFlags {
    pub red: bool,
    pub blue: bool,
    pub green: bool,
}

impl ReadyFlags {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Which bars to draw and how.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadyLayout {
    pub three_players: bool,
    pub show_aux_lights: bool,
    pub show_dim_lights: bool,
}

/// Panel brightness level, always within `1..=8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brightness(u8);

impl Default for Brightness {
    fn default() -> Self {
        Self(BRIGHTNESS_DEFAULT)
    }
}

impl Brightness {
    pub fn new(level: u8) -> Self {
        Self(level.clamp(BRIGHTNESS_MIN, BRIGHTNESS_MAX))
    }

    pub fn level(self) -> u8 {
        self.0
    }

    /// Next step up, 8 wraps to 1.
    pub fn next(self) -> Self {
        if self.0 >= BRIGHTNESS_MAX {
            Self(BRIGHTNESS_MIN)
        } else {
            Self(self.0 + 1)
        }
    }

    /// Raw value for the 32×16 audience panel.
    pub fn audience_raw(self) -> u8 {
        self.0 * 10 + 10
    }

    /// Raw value for the 16×8 player panel.
    pub fn player_raw(self) -> u8 {
        self.0 * 10
    }
}

struct Bar {
    rect: (i16, i16, i16, i16),
    line: (i16, i16),
    lit: Color,
    dim: Color,
}

const GREEN_CENTRE: Bar = Bar {
    rect: (8, 0, 16, 2),
    line: (4, 11),
    lit: Color::Green,
    dim: Color::GreenDim,
};
const BLUE_SIDE: Bar = Bar {
    rect: (0, 0, 6, 2),
    line: (13, 15),
    lit: Color::Blue,
    dim: Color::BlueDim,
};
const RED_SIDE: Bar = Bar {
    rect: (26, 0, 6, 2),
    line: (0, 2),
    lit: Color::Red,
    dim: Color::RedDim,
};
const BLUE_HALF: Bar = Bar {
    rect: (0, 0, 14, 2),
    line: (9, 15),
    lit: Color::Blue,
    dim: Color::BlueDim,
};
const RED_HALF: Bar = Bar {
    rect: (18, 0, 14, 2),
    line: (0, 6),
    lit: Color::Red,
    dim: Color::RedDim,
};

/// Draw the ready bars for the current layout.
pub fn draw_players_ready<D: DisplaySurface>(
    flags: ReadyFlags,
    layout: ReadyLayout,
    audience: &mut D,
    player: &mut D,
) {
    let mut bar = |b: &Bar, ready: bool| {
        let color = if ready {
            b.lit
        } else if layout.show_dim_lights {
            b.dim
        } else {
            return;
        };
        let (x, y, w, h) = b.rect;
        audience.draw_rect(x, y, w, h, color);
        player.draw_line(b.line.0, 0, b.line.1, 0, color);
    };

    if layout.three_players {
        bar(&GREEN_CENTRE, flags.green);
        if layout.show_aux_lights {
            bar(&BLUE_SIDE, flags.blue);
            bar(&RED_SIDE, flags.red);
        }
    } else if layout.show_aux_lights {
        bar(&BLUE_HALF, flags.blue);
        bar(&RED_HALF, flags.red);
    }
}

/// Brightness icon plus the level digit.
pub fn draw_brightness<D: DisplaySurface>(level: Brightness, audience: &mut D, player: &mut D) {
    let mut digit = heapless::String::<4>::new();
    let _ = core::fmt::Write::write_fmt(&mut digit, format_args!("{}", level.level()));

    audience.draw_icon(Icon::BrightnessLarge, 1, 2, Color::White);
    player.draw_icon(Icon::BrightnessSmall, 0, 0, Color::White);

    audience.set_cursor(20, 12);
    player.set_cursor(10, 6);
    audience.set_text_color(Color::White);
    player.set_text_color(Color::White);
    audience.print(&digit);
    player.print(&digit);
}
