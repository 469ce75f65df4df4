//! Button handlers, registered as posedge callbacks.
//!
//! Black drives the match (skip, pause, resume, reset).  The colour buttons
//! only act in standby: alone they toggle that player's ready flag, with
//! black held they adjust settings.
//!
//! | Held  | Pressed | Standby action                         |
//! |-------|---------|----------------------------------------|
//! | black | green   | match length += interval (wraps)       |
//! | black | blue    | brightness step, HUD for one second    |
//! | black | red     | player mode 2P → 3P → Rumble           |

use log::{debug, info};

use crate::app::ports::Board;
use crate::config::{PREF_BRIGHTNESS, PREF_MODE, PREF_TOTAL_TIME, PlayerMode};
use crate::graphics::color::Color;
use crate::graphics::overlay::ReadyFlags;

use super::GameState;
use super::context::MatchContext;
use super::states;

/// Black held this long while paused resets the match.
pub const LONG_PRESS_MS: u64 = 3_000;

// ═══════════════════════════════════════════════════════════════════════════
//  Black
// ═══════════════════════════════════════════════════════════════════════════

pub fn black_pressed<B: Board>(ctx: &mut MatchContext<B>) {
    debug!("black pressed in {}", ctx.state.name());
    match ctx.state {
        GameState::Startup => {
            ctx.beep_short();
            states::num_players(ctx);
        }
        GameState::Standby => states::standby(ctx),
        GameState::PreCountdown => {
            ctx.beep(states::LONG_BEEP_MS);
            states::reset(ctx);
        }
        GameState::Countdown => {
            ctx.beep(states::LONG_BEEP_MS);
            states::pause(ctx);
        }
        GameState::Paused => {
            if held_for_long_press(ctx) {
                info!("long press: match reset");
                ctx.beep(states::TICK_BEEP_MS);
                states::reset(ctx);
            } else {
                ctx.beep_short();
                states::pre_countdown_msg(ctx);
            }
        }
        GameState::GameOver => {
            ctx.beep(states::TICK_BEEP_MS);
            states::reset(ctx);
        }
    }
}

/// Bounded busy-wait on the black button.  Returns `true` once it has been
/// held for [`LONG_PRESS_MS`], `false` as soon as it is released.  Display
/// refresh stalls for the duration.
fn held_for_long_press<B: Board>(ctx: &mut MatchContext<B>) -> bool {
    let start = ctx.now();
    while ctx.buttons.black.get() {
        let now = ctx.now();
        if now >= start + LONG_PRESS_MS {
            return true;
        }
        ctx.buttons.black.poll_edge(now);
    }
    false
}

// ═══════════════════════════════════════════════════════════════════════════
//  Colour buttons
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy)]
enum Player {
    Red,
    Blue,
    Green,
}

impl Player {
    fn flag(self, flags: &mut ReadyFlags) -> &mut bool {
        match self {
            Self::Red => &mut flags.red,
            Self::Blue => &mut flags.blue,
            Self::Green => &mut flags.green,
        }
    }

    fn ready_message(self) -> (&'static str, Color) {
        match self {
            Self::Red => ("RED READY", Color::Red),
            Self::Blue => ("BLUE READY", Color::Blue),
            Self::Green => ("GREEN READY", Color::Green),
        }
    }
}

/// Toggle one player's ready flag; in rumble mode start the rumble instead.
fn toggle_ready<B: Board>(ctx: &mut MatchContext<B>, player: Player) {
    ctx.beep_double();
    if ctx.mode == PlayerMode::Rumble {
        states::rumble(ctx);
        return;
    }

    let mut flags = ctx.ready();
    let flag = player.flag(&mut flags);
    *flag = !*flag;
    let now_ready = *flag;
    ctx.set_ready(flags);
    if !now_ready {
        return;
    }

    if ctx.config.show_ready {
        let (text, color) = player.ready_message();
        ctx.graphics
            .text_dynamic_then(text, color, states::check_players_ready::<B>);
    } else {
        states::check_players_ready(ctx);
    }
}

pub fn green_pressed<B: Board>(ctx: &mut MatchContext<B>) {
    if ctx.state != GameState::Standby {
        return;
    }
    if ctx.buttons.black.get() {
        ctx.beep_short();
        ctx.total_time = ctx.config.next_total_time(ctx.total_time);
        let value = ctx.total_time.to_string();
        ctx.save_pref(PREF_TOTAL_TIME, &value);
        states::standby(ctx);
    } else if ctx.mode == PlayerMode::ThreePlayers {
        // Green plays only in three-player mode.
        toggle_ready(ctx, Player::Green);
    }
}

pub fn blue_pressed<B: Board>(ctx: &mut MatchContext<B>) {
    if ctx.state != GameState::Standby {
        return;
    }
    if ctx.buttons.black.get() {
        ctx.beep_short();
        let now = ctx.now();
        let level = ctx.graphics.change_brightness(now);
        let value = level.level().to_string();
        ctx.save_pref(PREF_BRIGHTNESS, &value);
    } else {
        toggle_ready(ctx, Player::Blue);
    }
}

pub fn red_pressed<B: Board>(ctx: &mut MatchContext<B>) {
    if ctx.state != GameState::Standby {
        return;
    }
    if ctx.buttons.black.get() {
        ctx.beep_short();
        let mode = ctx.mode.next();
        ctx.save_pref(PREF_MODE, mode.pref_value());
        let mut flags = ctx.ready();
        flags.clear();
        ctx.set_ready(flags);
        ctx.apply_mode(mode);
        states::num_players(ctx);
    } else {
        toggle_ready(ctx, Player::Red);
    }
}
