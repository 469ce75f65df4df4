//! Console display adapter.
//!
//! Implements [`DisplaySurface`] by summarising each frame (brightness,
//! printed text, bars and icons, colours as RGB565 words) and logging it whenever it differs from
//! the previous one.  Used on boards without a matrix driver and in host
//! simulation.

use core::fmt::Write;

use heapless::String;
use log::debug;

use crate::app::ports::{DisplaySurface, Icon};
use crate::graphics::color::Color;

const SUMMARY_CAPACITY: usize = 128;

pub struct LogDisplay {
    name: &'static str,
    brightness: u8,
    cursor: (i16, i16),
    color: Color,
    frame: String<SUMMARY_CAPACITY>,
    last: String<SUMMARY_CAPACITY>,
}

impl LogDisplay {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            brightness: 0,
            cursor: (0, 0),
            color: Color::White,
            frame: String::new(),
            last: String::new(),
        }
    }

    /// Summary of the last frame pushed with `show()`.
    pub fn last_frame(&self) -> &str {
        &self.last
    }

    fn note(&mut self, args: core::fmt::Arguments<'_>) {
        // Overflow truncates the summary.
        let _ = self.frame.write_fmt(args);
        let _ = self.frame.push(' ');
    }
}

impl DisplaySurface for LogDisplay {
    fn clear(&mut self) {
        self.frame.clear();
    }

    fn set_brightness(&mut self, level: u8) {
        self.brightness = level;
    }

    fn set_cursor(&mut self, x: i16, y: i16) {
        self.cursor = (x, y);
    }

    fn set_text_color(&mut self, color: Color) {
        self.color = color;
    }

    fn print(&mut self, text: &str) {
        let (x, y) = self.cursor;
        let color = self.color;
        self.note(format_args!("\"{}\"@{},{}/{:04X}", text, x, y, color.rgb565()));
    }

    fn draw_rect(&mut self, x: i16, y: i16, w: i16, h: i16, color: Color) {
        self.note(format_args!("rect({},{},{},{})/{:04X}", x, y, w, h, color.rgb565()));
    }

    fn draw_line(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, color: Color) {
        self.note(format_args!("line({},{}-{},{})/{:04X}", x0, y0, x1, y1, color.rgb565()));
    }

    fn draw_icon(&mut self, icon: Icon, x: i16, y: i16, _color: Color) {
        self.note(format_args!("{:?}@{},{}", icon, x, y));
    }

    fn show(&mut self) {
        if self.frame != self.last {
            debug!("{} [b={}] {}", self.name, self.brightness, self.frame);
            self.last = self.frame.clone();
        }
    }
}
