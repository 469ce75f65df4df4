//! Application service: the hexagonal core.
//!
//! [`TimerApp`] owns the [`MatchContext`] and runs the polling loop one
//! iteration at a time.  All I/O flows through the board adapters held by
//! the context, so the whole service runs on the host against mocks.
//!
//! ```text
//!  SettingsPort ──▶ ┌─────────────────────────┐ ──▶ EventSink
//!  PrefsPort   ◀──▶ │        TimerApp          │
//!  buttons     ──▶  │ timer · buttons · render │ ──▶ displays, buzzer, LEDs
//!                   └─────────────────────────┘
//! ```

use log::info;

use crate::config::{MatchConfig, MatchPrefs};
use crate::fsm::context::{BoardParts, MatchContext};
use crate::fsm::{GameState, states};

use super::events::AppEvent;
use super::ports::{Board, EventSink, SettingsPort};

/// Boot beep.
pub const STARTUP_BEEP_MS: u32 = 500;

// ───────────────────────────────────────────────────────────────
// TimerApp
// ───────────────────────────────────────────────────────────────

pub struct TimerApp<B: Board> {
    ctx: MatchContext<B>,
    tick_count: u64,
}

impl<B: Board> TimerApp<B> {
    /// Read settings and stored prefs, then wire the match context.
    ///
    /// Does **not** start the intro: call [`start`](Self::start) next.
    pub fn new(parts: BoardParts<B>, settings: &impl SettingsPort) -> Self {
        let config = MatchConfig::from_settings(settings);
        let prefs = MatchPrefs::load(&parts.prefs, &config);
        info!(
            "settings loaded: total={} s, mode={:?}, brightness={}",
            prefs.total_time,
            prefs.mode,
            prefs.brightness.level()
        );
        Self {
            ctx: MatchContext::new(parts, config, prefs),
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Beep, then scroll the intro (or go straight to the mode announcement
    /// when there is no intro message).
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.ctx.beep(STARTUP_BEEP_MS);
        if self.ctx.config.msg_intro.is_empty() {
            states::num_players(&mut self.ctx);
        } else {
            states::intro(&mut self.ctx);
        }
        sink.emit(&AppEvent::Started(self.ctx.state));
        info!("TimerApp started in {}", self.ctx.state.name());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// One loop iteration: state timer → buttons → render → buzzer.
    pub fn tick(&mut self, sink: &mut impl EventSink) {
        self.tick_count += 1;
        let prev_state = self.ctx.state;

        // 1. Pending match step
        self.ctx.poll_state_timer();

        // 2. Buttons (may run handlers)
        self.ctx.poll_buttons();

        // 3. Animation and frame
        self.ctx.render();

        // 4. Buzzer pulses
        self.ctx.poll_buzzer();

        // 5. Events
        let new_state = self.ctx.state;
        if new_state != prev_state {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: new_state,
            });
        }
        while let Some(event) = self.ctx.pop_event() {
            sink.emit(&event);
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> GameState {
        self.ctx.state
    }

    /// Loop iterations since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn context(&self) -> &MatchContext<B> {
        &self.ctx
    }
}
