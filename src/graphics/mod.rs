//! Frame composer for the two LED matrices.
//!
//! [`Graphics`] owns the text animation, the ready-bar state, the
//! brightness HUD and two independent soft timers:
//!
//! - `scroll_done` (trigger mode): completion callback of a scrolling
//!   message, released the frame the text wraps.
//! - `hud_timer` (timer mode): hides the brightness HUD after one second.
//!
//! Each loop iteration the owner calls [`advance`](Graphics::advance),
//! invokes the callback it may return, then calls
//! [`draw`](Graphics::draw).  The frame in which the text wraps draws no
//! text at all, so the wrapped position never shows up as a one-frame
//! glitch.

pub mod color;
pub mod overlay;
pub mod text;

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::app::ports::{DisplaySurface, Icon};
use crate::drivers::soft_timer::SoftTimer;

use color::Color;
use overlay::{Brightness, ReadyFlags, ReadyLayout};
use text::{Step, TextAnimation};

/// How long the brightness HUD stays up after a change.
pub const BRIGHTNESS_HUD_MS: u32 = 1_000;

/// Text baseline on the audience panel; the player panel uses half.
const AUDIENCE_TEXT_Y: i16 = 12;
const PLAYER_TEXT_Y: i16 = 6;

/// The two discrete player-ready LEDs next to the buttons.
pub struct ReadyLeds<P> {
    pub red: P,
    pub blue: P,
}

impl<P: OutputPin> ReadyLeds<P> {
    fn write(&mut self, flags: ReadyFlags) {
        for (pin, on) in [(&mut self.red, flags.red), (&mut self.blue, flags.blue)] {
            let result = if on { pin.set_high() } else { pin.set_low() };
            if let Err(e) = result {
                warn!("ready LED write failed: {:?}", e);
            }
        }
    }
}

pub struct Graphics<C> {
    text: TextAnimation,
    scroll_done: SoftTimer<C>,
    hud_timer: SoftTimer<()>,
    show_hud: bool,
    skip_text: bool,
    brightness: Brightness,
    brightness_dirty: bool,
    ready: ReadyFlags,
    layout: ReadyLayout,
    show_player_bar: bool,
}

impl<C> Default for Graphics<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Graphics<C> {
    pub fn new() -> Self {
        Self {
            text: TextAnimation::default(),
            scroll_done: SoftTimer::new(),
            hud_timer: SoftTimer::new(),
            show_hud: false,
            skip_text: false,
            brightness: Brightness::default(),
            brightness_dirty: true,
            ready: ReadyFlags::default(),
            layout: ReadyLayout::default(),
            show_player_bar: false,
        }
    }

    // ── Text ──────────────────────────────────────────────────

    /// Centred, non-moving text.
    pub fn text_static(&mut self, text: &str, color: Color) {
        self.text.set_static(text, color, None);
    }

    /// Non-moving text at an explicit column.
    pub fn text_static_at(&mut self, text: &str, color: Color, xpos: i16) {
        self.text.set_static(text, color, Some(xpos));
    }

    /// Scrolling text with no completion action.  Drops any completion
    /// callback still pending from an earlier message.
    pub fn text_dynamic(&mut self, text: &str, color: Color) {
        self.text.set_dynamic(text, color);
        self.cancel_completion();
    }

    /// Scrolling text that releases `on_complete` when it has fully
    /// scrolled off the panel.
    pub fn text_dynamic_then(&mut self, text: &str, color: Color, on_complete: C) {
        self.text.set_dynamic(text, color);
        self.scroll_done.arm_trigger(on_complete);
    }

    pub fn text(&self) -> &TextAnimation {
        &self.text
    }

    /// Drop a pending scroll-completion callback.  Returns `true` if one was
    /// armed.
    pub fn cancel_completion(&mut self) -> bool {
        self.scroll_done.cancel()
    }

    /// `true` while a scroll-completion callback is pending.
    pub fn has_pending_completion(&self) -> bool {
        self.scroll_done.is_armed()
    }

    // ── Brightness ────────────────────────────────────────────

    pub fn set_brightness(&mut self, level: Brightness) {
        self.brightness = level;
        self.brightness_dirty = true;
    }

    pub fn brightness(&self) -> Brightness {
        self.brightness
    }

    /// Step brightness (8 wraps to 1) and show the HUD for one second.
    pub fn change_brightness(&mut self, now_ms: u64) -> Brightness {
        self.set_brightness(self.brightness.next());
        self.show_hud = true;
        self.hud_timer.arm_timer((), BRIGHTNESS_HUD_MS, now_ms);
        self.brightness
    }

    pub fn is_hud_visible(&self) -> bool {
        self.show_hud
    }

    // ── Ready bars ────────────────────────────────────────────

    pub fn set_ready(&mut self, flags: ReadyFlags) {
        self.ready = flags;
    }

    pub fn ready(&self) -> ReadyFlags {
        self.ready
    }

    pub fn set_layout(&mut self, layout: ReadyLayout) {
        self.layout = layout;
    }

    pub fn layout(&self) -> ReadyLayout {
        self.layout
    }

    /// Start drawing ready bars under the text.  Stays on for the session.
    pub fn show_player_bar(&mut self) {
        self.show_player_bar = true;
    }

    // ── Frame loop ────────────────────────────────────────────

    /// Advance timers and the animation by one frame.
    ///
    /// Returns the scroll-completion callback when the text wrapped this
    /// frame.  Text is frozen while the brightness HUD is up.
    pub fn advance(&mut self, now_ms: u64) -> Option<C> {
        if self.hud_timer.poll(now_ms).is_some() {
            self.show_hud = false;
        }
        if self.show_hud {
            return None;
        }
        match self.text.step() {
            Step::Wrapped => {
                self.skip_text = true;
                self.scroll_done.fire()
            }
            Step::Still | Step::Moved => None,
        }
    }

    /// Compose and push one frame to both panels and the ready LEDs.
    pub fn draw<D: DisplaySurface, P: OutputPin>(
        &mut self,
        audience: &mut D,
        player: &mut D,
        leds: &mut ReadyLeds<P>,
    ) {
        if self.brightness_dirty {
            audience.set_brightness(self.brightness.audience_raw());
            player.set_brightness(self.brightness.player_raw());
            self.brightness_dirty = false;
        }

        audience.clear();
        player.clear();

        if self.show_hud {
            overlay::draw_brightness(self.brightness, audience, player);
        } else {
            if !core::mem::take(&mut self.skip_text) {
                self.draw_text(audience, player);
            }
            if self.show_player_bar {
                overlay::draw_players_ready(self.ready, self.layout, audience, player);
                leds.write(self.ready);
            }
        }

        audience.show();
        player.show();
    }

    fn draw_text<D: DisplaySurface>(&self, audience: &mut D, player: &mut D) {
        let x = self.text.xpos();
        audience.set_cursor(x, AUDIENCE_TEXT_Y);
        player.set_cursor(x / 2, PLAYER_TEXT_Y);
        audience.set_text_color(self.text.color());
        player.set_text_color(self.text.color());
        audience.print(self.text.content());
        player.print(self.text.content());
    }
}

/// Static Wi-Fi symbol shown while the settings portal runs.
pub fn show_wifi<D: DisplaySurface>(audience: &mut D, player: &mut D) {
    audience.clear();
    player.clear();
    audience.set_brightness(32);
    player.set_brightness(24);
    audience.draw_icon(Icon::WifiLarge, 8, 3, Color::Cyan);
    player.draw_icon(Icon::WifiSmall, 4, 0, Color::Cyan);
    audience.show();
    player.show();
}
