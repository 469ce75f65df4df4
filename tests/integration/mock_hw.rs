//! Mock board for integration tests.
//!
//! Every adapter keeps its state behind `Rc` so a test can hold a handle
//! (press a button, move the clock, read prefs) after the parts have been
//! moved into the [`TimerApp`].

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::convert::Infallible;
use std::rc::Rc;

use brickclock::app::events::AppEvent;
use brickclock::app::ports::{
    Board, Clock, DisplaySurface, EventSink, Icon, PrefsPort, SettingsPort, StorageError,
};
use brickclock::app::service::TimerApp;
use brickclock::fsm::GameState;
use brickclock::fsm::context::{BoardParts, MatchContext};
use brickclock::graphics::color::Color;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

/// Loop period used by the rig.
pub const TICK_MS: u64 = 10;

// ── Clock ─────────────────────────────────────────────────────

/// Manually driven clock.  With a non-zero auto step every read moves time
/// forward, which lets busy-wait loops terminate.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
    step: Rc<Cell<u64>>,
}

#[allow(dead_code)]
impl ManualClock {
    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn get(&self) -> u64 {
        self.now.get()
    }

    pub fn set_auto_step(&self, ms: u64) {
        self.step.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        let t = self.now.get();
        self.now.set(t + self.step.get());
        t
    }
}

// ── Pins ──────────────────────────────────────────────────────

/// Shared GPIO line.  As an input it models an active-low button; as an
/// output it records the driven level.
#[derive(Clone)]
pub struct MockPin {
    level: Rc<Cell<bool>>,
    release_after: Rc<Cell<Option<u32>>>,
    writes: Rc<Cell<u32>>,
}

#[allow(dead_code)]
impl MockPin {
    /// Idle high: a released button, or an output not yet driven.
    pub fn new() -> Self {
        Self {
            level: Rc::new(Cell::new(true)),
            release_after: Rc::new(Cell::new(None)),
            writes: Rc::new(Cell::new(0)),
        }
    }

    pub fn set_pressed(&self, pressed: bool) {
        self.level.set(!pressed);
    }

    /// Let the button go after `reads` more samples.
    pub fn release_after_reads(&self, reads: u32) {
        self.release_after.set(Some(reads));
    }

    pub fn is_driven_high(&self) -> bool {
        self.level.get()
    }

    pub fn write_count(&self) -> u32 {
        self.writes.get()
    }
}

impl Default for MockPin {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        match self.release_after.get() {
            Some(0) => {
                self.level.set(true);
                self.release_after.set(None);
            }
            Some(n) => self.release_after.set(Some(n - 1)),
            None => {}
        }
        Ok(self.level.get())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        self.is_high().map(|high| !high)
    }
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.level.set(false);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.level.set(true);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

// ── Display ───────────────────────────────────────────────────

/// Keeps what the last committed frame contained.
#[derive(Default)]
pub struct RecordingDisplay {
    pub brightness: Option<u8>,
    pub frames: usize,
    pub last_text: Vec<String>,
    pub last_rects: Vec<(i16, i16, i16, i16, Color)>,
    pub last_icons: Vec<Icon>,
    text: Vec<String>,
    rects: Vec<(i16, i16, i16, i16, Color)>,
    icons: Vec<Icon>,
}

impl DisplaySurface for RecordingDisplay {
    fn clear(&mut self) {
        self.text.clear();
        self.rects.clear();
        self.icons.clear();
    }
    fn set_brightness(&mut self, level: u8) {
        self.brightness = Some(level);
    }
    fn set_cursor(&mut self, _x: i16, _y: i16) {}
    fn set_text_color(&mut self, _color: Color) {}
    fn print(&mut self, text: &str) {
        self.text.push(text.to_owned());
    }
    fn draw_rect(&mut self, x: i16, y: i16, w: i16, h: i16, color: Color) {
        self.rects.push((x, y, w, h, color));
    }
    fn draw_line(&mut self, _x0: i16, _y0: i16, _x1: i16, _y1: i16, _color: Color) {}
    fn draw_icon(&mut self, icon: Icon, _x: i16, _y: i16, _color: Color) {
        self.icons.push(icon);
    }
    fn show(&mut self) {
        self.frames += 1;
        self.last_text = self.text.clone();
        self.last_rects = self.rects.clone();
        self.last_icons = self.icons.clone();
    }
}

// ── Prefs and settings ────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MemPrefs {
    values: Rc<RefCell<HashMap<String, String>>>,
    fail_writes: Rc<Cell<bool>>,
}

#[allow(dead_code)]
impl MemPrefs {
    pub fn with(pairs: &[(&str, &str)]) -> Self {
        let prefs = Self::default();
        for (k, v) in pairs {
            prefs.values.borrow_mut().insert((*k).to_owned(), (*v).to_owned());
        }
        prefs
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl PrefsPort for MemPrefs {
    fn get(&self, key: &str) -> String {
        self.value(key).unwrap_or_default()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::IoError);
        }
        self.values.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

pub struct MapSettings(HashMap<String, String>);

impl MapSettings {
    pub fn with(pairs: &[(&str, &str)]) -> Self {
        Self(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        )
    }
}

impl SettingsPort for MapSettings {
    fn load_setting(&self, key: &str) -> String {
        self.0.get(key).cloned().unwrap_or_default()
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn transitions(&self) -> Vec<(GameState, GameState)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::StateChanged { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    pub fn pref_changes(&self) -> Vec<(&'static str, String)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::PrefChanged { key, value } => Some((*key, value.as_str().to_owned())),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Board ─────────────────────────────────────────────────────

pub struct MockBoard;

impl Board for MockBoard {
    type Clock = ManualClock;
    type Display = RecordingDisplay;
    type Input = MockPin;
    type Output = MockPin;
    type Prefs = MemPrefs;
}

#[derive(Debug, Clone, Copy)]
pub enum Btn {
    Black,
    Blue,
    Red,
    Green,
}

/// A booted timer plus handles to its inputs.
pub struct Rig {
    pub app: TimerApp<MockBoard>,
    pub sink: RecordingSink,
    pub clock: ManualClock,
    pub prefs: MemPrefs,
    pub buzzer: MockPin,
    pub led_red: MockPin,
    pub led_blue: MockPin,
    black: MockPin,
    blue: MockPin,
    red: MockPin,
    green: MockPin,
}

#[allow(dead_code)]
impl Rig {
    /// Build and start the timer at t = 1 s.
    pub fn boot(settings: &[(&str, &str)], prefs: &[(&str, &str)]) -> Self {
        let clock = ManualClock::default();
        clock.set(1_000);
        let prefs = MemPrefs::with(prefs);
        let (black, blue, red, green) = (MockPin::new(), MockPin::new(), MockPin::new(), MockPin::new());
        let (buzzer, led_red, led_blue) = (MockPin::new(), MockPin::new(), MockPin::new());

        let parts = BoardParts::<MockBoard> {
            clock: clock.clone(),
            audience: RecordingDisplay::default(),
            player: RecordingDisplay::default(),
            black: black.clone(),
            blue: blue.clone(),
            red: red.clone(),
            green: green.clone(),
            buzzer: buzzer.clone(),
            led_red: led_red.clone(),
            led_blue: led_blue.clone(),
            prefs: prefs.clone(),
        };
        let mut app = TimerApp::new(parts, &MapSettings::with(settings));
        let mut sink = RecordingSink::default();
        app.start(&mut sink);

        Self {
            app,
            sink,
            clock,
            prefs,
            buzzer,
            led_red,
            led_blue,
            black,
            blue,
            red,
            green,
        }
    }

    pub fn pin(&self, btn: Btn) -> MockPin {
        match btn {
            Btn::Black => self.black.clone(),
            Btn::Blue => self.blue.clone(),
            Btn::Red => self.red.clone(),
            Btn::Green => self.green.clone(),
        }
    }

    pub fn tick(&mut self) {
        self.clock.advance(TICK_MS);
        self.app.tick(&mut self.sink);
    }

    pub fn run_ms(&mut self, ms: u64) {
        for _ in 0..ms / TICK_MS {
            self.tick();
        }
    }

    /// Tick until `done` holds or `limit_ms` passes.  Returns whether it held.
    pub fn run_until(&mut self, limit_ms: u64, done: impl Fn(&MatchContext<MockBoard>) -> bool) -> bool {
        for _ in 0..limit_ms / TICK_MS {
            if done(self.app.context()) {
                return true;
            }
            self.tick();
        }
        done(self.app.context())
    }

    pub fn press(&mut self, btn: Btn) {
        self.pin(btn).set_pressed(true);
        self.run_ms(100);
    }

    pub fn release(&mut self, btn: Btn) {
        self.pin(btn).set_pressed(false);
        self.run_ms(100);
    }

    pub fn tap(&mut self, btn: Btn) {
        self.press(btn);
        self.release(btn);
    }

    /// Black held while `btn` is tapped.
    pub fn chord(&mut self, btn: Btn) {
        self.press(Btn::Black);
        self.tap(btn);
        self.release(Btn::Black);
    }

    pub fn state(&self) -> GameState {
        self.app.state()
    }

    pub fn ctx(&self) -> &MatchContext<MockBoard> {
        self.app.context()
    }

    /// Text currently held by the animation.
    pub fn text(&self) -> String {
        self.ctx().graphics.text().content().to_owned()
    }

    /// Wait for the standby clock after boot.
    pub fn settle_in_standby(&mut self) {
        let clock = brickclock::graphics::text::format_time(self.ctx().total_time, true);
        let clock = clock.as_str().to_owned();
        assert!(
            self.run_until(10_000, |c| c.state == GameState::Standby
                && c.graphics.text().content() == clock),
            "standby clock never shown"
        );
    }
}
