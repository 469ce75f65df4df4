//! Match steps.
//!
//! Every step is a plain `fn(&mut MatchContext)`.  A step updates the
//! display and buzzer and then hands the next step to the state timer or to
//! the scroll-completion trigger.  Nothing here blocks.
//!
//! ```text
//!  intro ─▶ num_players ─▶ standby
//!  ready ─▶ pre_countdown_msg ─▶ 3 ─▶ 2 ─▶ 1 ─▶ go ─▶ A ⇄ B ─▶ game_over ─▶ post_game_over
//! ```

use log::{debug, info};

use crate::app::ports::Board;
use crate::graphics::color::Color;
use crate::graphics::text::format_time;

use super::GameState;
use super::context::MatchContext;

/// Half of the blinking-colon cycle on the running clock.
pub const COUNTDOWN_PHASE_MS: u32 = 500;
/// Gap between the 3, 2, 1 digits.
pub const PRE_COUNT_STEP_MS: u32 = 1_000;
/// Beep on each of 3, 2, 1 and on a long black press.
pub const TICK_BEEP_MS: u32 = 250;
/// Beep on black during the pre-countdown and on pause.
pub const LONG_BEEP_MS: u32 = 1_000;
/// Game-over beep when no game-over message time is configured.
pub const FINAL_BEEP_MS: u32 = 2_000;

fn secs_to_ms(secs: u8) -> u32 {
    u32::from(secs) * 1_000
}

fn clock_secs(time_remaining: i16) -> u16 {
    time_remaining.max(0) as u16
}

// ═══════════════════════════════════════════════════════════════════════════
//  Reset and game over
// ═══════════════════════════════════════════════════════════════════════════

/// Back to standby: cancel pending steps and clear every ready flag.
pub fn reset<B: Board>(ctx: &mut MatchContext<B>) {
    ctx.set_state(GameState::Standby);
    if ctx.state_timer.cancel() {
        debug!("pending step cancelled");
    }
    if ctx.graphics.cancel_completion() {
        debug!("pending scroll completion cancelled");
    }
    let mut flags = ctx.ready();
    flags.clear();
    ctx.set_ready(flags);
    standby(ctx);
}

/// After the game-over message: reset, or freeze on "0:00".
pub fn post_game_over<B: Board>(ctx: &mut MatchContext<B>) {
    if ctx.config.auto_reset {
        reset(ctx);
    } else {
        let color = ctx.config.color_timer;
        ctx.graphics.text_static("0:00", color);
    }
}

pub fn game_over<B: Board>(ctx: &mut MatchContext<B>) {
    ctx.set_state(GameState::GameOver);
    info!("match over");
    let secs = ctx.config.game_over_time;
    if secs > 0 {
        ctx.beep(secs_to_ms(secs));
        let msg = ctx.config.msg_game_over.clone();
        ctx.graphics.text_dynamic(&msg, Color::Red);
        ctx.schedule(post_game_over::<B>, secs_to_ms(secs));
    } else {
        ctx.beep(FINAL_BEEP_MS);
        post_game_over(ctx);
    }
}

/// Freeze the clock.  The time lost to the "GO!" overlap on resume is taken
/// off up front.
pub fn pause<B: Board>(ctx: &mut MatchContext<B>) {
    ctx.set_state(GameState::Paused);
    ctx.state_timer.cancel();
    let overlap = i16::from(ctx.config.go_time) - 1;
    ctx.time_remaining = (ctx.time_remaining - overlap).max(0);
    info!("paused with {} s left", ctx.time_remaining);
    ctx.graphics.text_dynamic("PAUSED", Color::Yellow);
}

// ═══════════════════════════════════════════════════════════════════════════
//  Running clock
// ═══════════════════════════════════════════════════════════════════════════

/// Phase A: one second gone, colon on.
pub fn countdown_a<B: Board>(ctx: &mut MatchContext<B>) {
    ctx.time_remaining = (ctx.time_remaining - 1).max(0);
    let text = format_time(clock_secs(ctx.time_remaining), true);
    let color = ctx.config.color_timer;
    ctx.graphics.text_static(&text, color);
    ctx.schedule(countdown_b::<B>, COUNTDOWN_PHASE_MS);
}

/// Phase B: colon off.  Ends the match after the last second.
pub fn countdown_b<B: Board>(ctx: &mut MatchContext<B>) {
    let text = format_time(clock_secs(ctx.time_remaining), false);
    let color = ctx.config.color_timer;
    ctx.graphics.text_static(&text, color);
    if ctx.time_remaining <= 1 {
        ctx.schedule(game_over::<B>, COUNTDOWN_PHASE_MS);
    } else {
        ctx.schedule(countdown_a::<B>, COUNTDOWN_PHASE_MS);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Pre-countdown
// ═══════════════════════════════════════════════════════════════════════════

pub fn pre_countdown_go<B: Board>(ctx: &mut MatchContext<B>) {
    ctx.set_state(GameState::Countdown);
    let secs = ctx.config.go_time;
    if secs > 0 {
        ctx.beep(secs_to_ms(secs));
        ctx.graphics.text_static("GO!", Color::Green);
        ctx.schedule(countdown_a::<B>, secs_to_ms(secs));
    } else {
        ctx.beep(LONG_BEEP_MS);
        countdown_a(ctx);
    }
}

fn pre_count_digit<B: Board>(ctx: &mut MatchContext<B>, digit: &str, next: super::StepFn<B>) {
    ctx.beep(TICK_BEEP_MS);
    let color = ctx.config.color_pre;
    ctx.graphics.text_static(digit, color);
    ctx.schedule(next, PRE_COUNT_STEP_MS);
}

pub fn pre_countdown_1<B: Board>(ctx: &mut MatchContext<B>) {
    pre_count_digit(ctx, "1", pre_countdown_go::<B>);
}

pub fn pre_countdown_2<B: Board>(ctx: &mut MatchContext<B>) {
    pre_count_digit(ctx, "2", pre_countdown_1::<B>);
}

pub fn pre_countdown_3<B: Board>(ctx: &mut MatchContext<B>) {
    pre_count_digit(ctx, "3", pre_countdown_2::<B>);
}

/// Get-ready message, skipped when its time is zero.  Also the resume path
/// out of pause, so the remaining time is left alone.
pub fn pre_countdown_msg<B: Board>(ctx: &mut MatchContext<B>) {
    ctx.set_state(GameState::PreCountdown);
    let secs = ctx.config.pre_time;
    if secs > 0 {
        let msg = ctx.config.msg_get_ready.clone();
        let color = ctx.config.color_pre;
        ctx.graphics.text_dynamic(&msg, color);
        ctx.schedule(pre_countdown_3::<B>, secs_to_ms(secs));
    } else {
        pre_countdown_3(ctx);
    }
}

/// Load the clock for a fresh match and start the pre-countdown.
pub fn ready<B: Board>(ctx: &mut MatchContext<B>) {
    let go = i16::from(ctx.config.go_time);
    ctx.time_remaining = (ctx.total_time.min(i16::MAX as u16) as i16) - go + 1;
    info!("match ready: {} s", ctx.total_time);
    pre_countdown_msg(ctx);
}

// ═══════════════════════════════════════════════════════════════════════════
//  Standby
// ═══════════════════════════════════════════════════════════════════════════

/// Rumble mode skips the ready check: scroll the message, then start.
pub fn rumble<B: Board>(ctx: &mut MatchContext<B>) {
    let msg = ctx.config.msg_rumble.clone();
    ctx.graphics.text_dynamic_then(&msg, Color::Red, ready::<B>);
}

/// Static clock showing the configured match length.
pub fn standby<B: Board>(ctx: &mut MatchContext<B>) {
    let text = format_time(ctx.total_time, true);
    let color = ctx.config.color_timer;
    ctx.graphics.text_static(&text, color);
    ctx.graphics.show_player_bar();
}

/// Announce the player mode, then show the standby clock.
pub fn num_players<B: Board>(ctx: &mut MatchContext<B>) {
    ctx.set_state(GameState::Standby);
    let (text, color) = ctx.mode.announcement();
    ctx.graphics.text_dynamic_then(text, color, standby::<B>);
}

pub fn intro<B: Board>(ctx: &mut MatchContext<B>) {
    let msg = ctx.config.msg_intro.clone();
    let color = ctx.config.color_intro;
    ctx.graphics.text_dynamic_then(&msg, color, num_players::<B>);
}

/// Start the match once every player of the current mode is ready,
/// otherwise go back to the standby clock.  Rumble never waits on flags.
pub fn check_players_ready<B: Board>(ctx: &mut MatchContext<B>) {
    use crate::config::PlayerMode;

    let flags = ctx.ready();
    let all_ready = match ctx.mode {
        PlayerMode::ThreePlayers => flags.blue && flags.green && flags.red,
        PlayerMode::TwoPlayers => flags.blue && flags.red,
        PlayerMode::Rumble => return,
    };
    if all_ready {
        ctx.set_state(GameState::PreCountdown);
        ready(ctx);
    } else {
        standby(ctx);
    }
}
