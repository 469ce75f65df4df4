//! Shared mutable context threaded through every step and button handler.
//!
//! `MatchContext` owns everything a step can touch: match settings and
//! prefs, the state timer, the renderer, the buzzer, the four buttons and
//! the board adapters.  A step borrows it mutably for its whole run, so
//! there is never more than one writer.

use heapless::Deque;
use log::{info, warn};

use crate::app::events::{AppEvent, PrefValue};
use crate::app::ports::{Board, Clock, PrefsPort};
use crate::config::{MatchConfig, MatchPrefs, PlayerMode};
use crate::drivers::button::{Button, Pull};
use crate::drivers::buzzer::Buzzer;
use crate::drivers::soft_timer::SoftTimer;
use crate::graphics::overlay::{ReadyFlags, ReadyLayout};
use crate::graphics::{Graphics, ReadyLeds};

use super::{GameState, StepFn, input};

/// Pref-change events kept until the service drains them.
const EVENT_BACKLOG: usize = 4;

// ---------------------------------------------------------------------------
// Board parts
// ---------------------------------------------------------------------------

/// Every peripheral the match needs, already initialised.
pub struct BoardParts<B: Board> {
    pub clock: B::Clock,
    pub audience: B::Display,
    pub player: B::Display,
    pub black: B::Input,
    pub blue: B::Input,
    pub red: B::Input,
    pub green: B::Input,
    pub buzzer: B::Output,
    pub led_red: B::Output,
    pub led_blue: B::Output,
    pub prefs: B::Prefs,
}

/// The four game buttons, all wired active-low.
pub struct Buttons<B: Board> {
    pub black: Button<B::Input, StepFn<B>>,
    pub blue: Button<B::Input, StepFn<B>>,
    pub red: Button<B::Input, StepFn<B>>,
    pub green: Button<B::Input, StepFn<B>>,
}

// ---------------------------------------------------------------------------
// MatchContext
// ---------------------------------------------------------------------------

pub struct MatchContext<B: Board> {
    // -- Match --
    pub state: GameState,
    pub config: MatchConfig,
    /// Match length in seconds, adjustable from standby.
    pub total_time: u16,
    pub mode: PlayerMode,
    /// Seconds left on the running clock.
    pub time_remaining: i16,

    // -- Scheduling --
    /// Holds the next step of the match sequence.
    pub state_timer: SoftTimer<StepFn<B>>,

    // -- Output --
    pub graphics: Graphics<StepFn<B>>,
    pub buzzer: Buzzer<B::Output>,
    pub audience: B::Display,
    pub player: B::Display,
    pub leds: ReadyLeds<B::Output>,

    // -- Input --
    pub buttons: Buttons<B>,
    pub clock: B::Clock,

    // -- Persistence --
    pub prefs: B::Prefs,
    events: Deque<AppEvent, EVENT_BACKLOG>,
}

impl<B: Board> MatchContext<B> {
    /// Wire the parts together and register the button handlers.  Nothing is
    /// shown until the first step runs.
    pub fn new(parts: BoardParts<B>, config: MatchConfig, prefs: MatchPrefs) -> Self {
        let mut graphics = Graphics::new();
        graphics.set_brightness(prefs.brightness);
        graphics.set_layout(layout_for(&config, prefs.mode));

        let mut buttons = Buttons {
            black: Button::new(parts.black, Pull::Up),
            blue: Button::new(parts.blue, Pull::Up),
            red: Button::new(parts.red, Pull::Up),
            green: Button::new(parts.green, Pull::Up),
        };
        buttons.black.set_posedge(input::black_pressed::<B>);
        buttons.blue.set_posedge(input::blue_pressed::<B>);
        buttons.red.set_posedge(input::red_pressed::<B>);
        buttons.green.set_posedge(input::green_pressed::<B>);

        let buzzer = Buzzer::new(parts.buzzer, config.buzzer_on);

        Self {
            state: GameState::Startup,
            total_time: prefs.total_time,
            mode: prefs.mode,
            time_remaining: 0,
            config,
            state_timer: SoftTimer::new(),
            graphics,
            buzzer,
            audience: parts.audience,
            player: parts.player,
            leds: ReadyLeds {
                red: parts.led_red,
                blue: parts.led_blue,
            },
            buttons,
            clock: parts.clock,
            prefs: parts.prefs,
            events: Deque::new(),
        }
    }

    pub fn now(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn set_state(&mut self, next: GameState) {
        if next != self.state {
            info!("state: {} -> {}", self.state.name(), next.name());
            self.state = next;
        }
    }

    /// Arm the state timer with the next step.  Replaces any pending step.
    pub fn schedule(&mut self, step: StepFn<B>, delay_ms: u32) {
        let now = self.now();
        self.state_timer.arm_timer(step, delay_ms, now);
    }

    // ── Ready flags ───────────────────────────────────────────

    pub fn ready(&self) -> ReadyFlags {
        self.graphics.ready()
    }

    pub fn set_ready(&mut self, flags: ReadyFlags) {
        self.graphics.set_ready(flags);
    }

    /// Re-derive the bar layout after a mode change.
    pub fn apply_mode(&mut self, mode: PlayerMode) {
        self.mode = mode;
        self.graphics.set_layout(layout_for(&self.config, mode));
    }

    // ── Buzzer shortcuts ──────────────────────────────────────

    pub fn beep(&mut self, duration_ms: u32) {
        let now = self.now();
        self.buzzer.beep(duration_ms, now);
    }

    pub fn beep_short(&mut self) {
        let now = self.now();
        self.buzzer.beep_short(now);
    }

    pub fn beep_double(&mut self) {
        let now = self.now();
        self.buzzer.beep_double(now);
    }

    // ── Prefs ─────────────────────────────────────────────────

    /// Persist a button-adjusted value.  Failures are logged and dropped.
    pub fn save_pref(&mut self, key: &'static str, value: &str) {
        if let Err(e) = self.prefs.set(key, value) {
            warn!("pref {} not saved: {}", key, e);
            return;
        }
        info!("pref {} = {}", key, value);
        let mut stored = PrefValue::new();
        for c in value.chars() {
            if stored.push(c).is_err() {
                break;
            }
        }
        if self.events.is_full() {
            self.events.pop_front();
        }
        let _ = self.events.push_back(AppEvent::PrefChanged { key, value: stored });
    }

    /// Next queued pref-change event.
    pub fn pop_event(&mut self) -> Option<AppEvent> {
        self.events.pop_front()
    }

    // ── Loop phases ───────────────────────────────────────────

    /// Run the pending match step if its delay has elapsed.
    pub fn poll_state_timer(&mut self) {
        let now = self.now();
        if let Some(step) = self.state_timer.poll(now) {
            step(self);
        }
    }

    /// Sample the buttons in black, blue, red, green order and run any
    /// handler released by a press.
    pub fn poll_buttons(&mut self) {
        let now = self.now();
        if let Some(handler) = self.buttons.black.poll(now) {
            handler(self);
        }
        let now = self.now();
        if let Some(handler) = self.buttons.blue.poll(now) {
            handler(self);
        }
        let now = self.now();
        if let Some(handler) = self.buttons.red.poll(now) {
            handler(self);
        }
        let now = self.now();
        if let Some(handler) = self.buttons.green.poll(now) {
            handler(self);
        }
    }

    /// Advance the animation, run a released completion step, then draw.
    pub fn render(&mut self) {
        let now = self.now();
        if let Some(step) = self.graphics.advance(now) {
            step(self);
        }
        self.graphics
            .draw(&mut self.audience, &mut self.player, &mut self.leds);
    }

    pub fn poll_buzzer(&mut self) {
        let now = self.now();
        self.buzzer.poll(now);
    }
}

fn layout_for(config: &MatchConfig, mode: PlayerMode) -> ReadyLayout {
    ReadyLayout {
        three_players: mode == PlayerMode::ThreePlayers,
        show_aux_lights: config.show_aux_lights,
        show_dim_lights: config.show_dim_lights,
    }
}
