//! Match state machine.
//!
//! Unlike a table-driven FSM, every transition here is a plain `fn` pointer
//! that runs either from a button edge or from a soft-timer/trigger
//! completion.  Each step does its work (beep, text, timers) and then arms
//! the next step, so the whole match is a chain of [`StepFn`]s held one at
//! a time by the state timer or the scroll-completion trigger.
//!
//! ```text
//!  STARTUP ──[intro scrolled / black]──▶ mode announcement ──▶ STANDBY
//!                                                               │
//!                          [all players ready / rumble message] │
//!                                                               ▼
//!   ┌──────────────────────────────────────────────── PRE_COUNTDOWN
//!   │                                 get-ready ─▶ 3 ─▶ 2 ─▶ 1 ─▶ GO!
//!   │                                                              │
//!   │ [black]           ┌──[black: short press]── PAUSED ◀─[black]─┤
//!   │                   │                            │             ▼
//!   │                   └──────▶ PRE_COUNTDOWN       │        COUNTDOWN
//!   │                                     [hold 3 s] │   (A ⇄ B every 500 ms)
//!   ▼                                                ▼             │
//!  reset() ◀────────────[black / auto reset]──── GAME_OVER ◀──[0:01]
//! ```
//!
//! All handlers receive `&mut MatchContext`, which owns every piece of
//! mutable state.  There are no globals.

pub mod context;
pub mod input;
pub mod states;


use context::MatchContext;

/// A match step or button handler.  Soft timers and button edges store these
/// and the owner invokes them with the context once released.
pub type StepFn<B> = fn(&mut MatchContext<B>);

/// Which phase of the match is active.  Exactly one at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GameState {
    /// Intro message scrolling after boot.
    #[default]
    Startup = 0,
    /// Clock shown, waiting for players.
    Standby = 1,
    /// Get-ready message and the 3-2-1 count.
    PreCountdown = 2,
    /// "GO!" and the running clock.
    Countdown = 3,
    Paused = 4,
    GameOver = 5,
}

impl GameState {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Startup => "Startup",
            Self::Standby => "Standby",
            Self::PreCountdown => "PreCountdown",
            Self::Countdown => "Countdown",
            Self::Paused => "Paused",
            Self::GameOver => "GameOver",
        }
    }
}
