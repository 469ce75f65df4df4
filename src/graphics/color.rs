//! Matrix colours (RGB565) and the colour names used by the settings portal.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    Blue,
    BlueDim,
    Red,
    RedDim,
    Green,
    GreenDim,
    Cyan,
    Magenta,
    Yellow,
    White,
}

impl Color {
    /// Parse a portal colour name.  Anything unrecognised is red.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Blue" => Self::Blue,
            "White" => Self::White,
            "Green" => Self::Green,
            "Cyan" => Self::Cyan,
            "Magenta" => Self::Magenta,
            "Yellow" => Self::Yellow,
            _ => Self::Red,
        }
    }

    /// Panel colour word.
    pub const fn rgb565(self) -> u16 {
        match self {
            Self::Blue => 0x001F,
            Self::BlueDim => 0x0011,
            Self::Red => 0xF800,
            Self::RedDim => 0x8000,
            Self::Green => 0x07E0,
            Self::GreenDim => 0x0300,
            Self::Cyan => 0x07FF,
            Self::Magenta => 0xF81F,
            Self::Yellow => 0xFFE0,
            Self::White => 0xFFFF,
        }
    }
}
