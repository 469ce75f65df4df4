//! BrickClock firmware: main entry point.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                    │
//! │                                                             │
//! │  UptimeClock       LogDisplay ×2   NvsPrefs    JsonSettings │
//! │  (Clock)           (Display)       (Prefs)     (Settings)   │
//! │  PinDriver ×7 (buttons, buzzer, ready LEDs)   LogEventSink  │
//! │                                                             │
//! │  ──────────────── Port Trait Boundary ───────────────────   │
//! │                                                             │
//! │  ┌───────────────────────────────────────────────────────┐  │
//! │  │           TimerApp (pure logic, polled loop)          │  │
//! │  │  state timer · buttons · renderer · buzzer            │  │
//! │  └───────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Pin map
//!
//! | Signal        | GPIO | Wiring                 |
//! |---------------|------|------------------------|
//! | black button  | 4    | to GND, pull-up        |
//! | blue button   | 5    | to GND, pull-up        |
//! | red button    | 6    | to GND, pull-up        |
//! | green button  | 7    | to GND, pull-up        |
//! | buzzer        | 15   | active high            |
//! | red ready LED | 16   | active high            |
//! | blue ready LED| 17   | active high            |

use anyhow::Result;
use log::{info, warn};

use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::gpio::{AnyIOPin, AnyOutputPin, Input, Output, PinDriver, Pull};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::reset;
use esp_idf_svc::nvs::EspDefaultNvsPartition;

use brickclock::adapters::log_display::LogDisplay;
use brickclock::adapters::log_sink::LogEventSink;
use brickclock::adapters::nvs::NvsPrefs;
use brickclock::adapters::settings::{JsonSettings, SETTINGS_PATH};
use brickclock::adapters::time::UptimeClock;
use brickclock::app::ports::{Board, Clock};
use brickclock::app::service::TimerApp;
use brickclock::app::setup_mode::{SetupAction, SetupHoldMonitor};
use brickclock::config::FRAME_INTERVAL_MS;
use brickclock::drivers::watchdog::Watchdog;
use brickclock::error::Error;
use brickclock::fsm::context::BoardParts;
use brickclock::graphics;

// ── Board binding ─────────────────────────────────────────────

struct Esp32Board;

impl Board for Esp32Board {
    type Clock = UptimeClock;
    type Display = LogDisplay;
    type Input = PinDriver<'static, AnyIOPin, Input>;
    type Output = PinDriver<'static, AnyOutputPin, Output>;
    type Prefs = NvsPrefs;
}

fn button(pin: AnyIOPin) -> Result<PinDriver<'static, AnyIOPin, Input>> {
    let mut driver = PinDriver::input(pin)?;
    driver.set_pull(Pull::Up)?;
    Ok(driver)
}

fn output(pin: AnyOutputPin) -> Result<PinDriver<'static, AnyOutputPin, Output>> {
    let mut driver = PinDriver::output(pin)?;
    driver.set_low()?;
    Ok(driver)
}

// ── Setup mode ────────────────────────────────────────────────

/// Wi-Fi symbol on both panels until a black-button hold asks to leave.
/// Portal serving runs in its own component; this loop only watches black.
fn setup_mode(
    black: &mut PinDriver<'static, AnyIOPin, Input>,
    audience: &mut LogDisplay,
    player: &mut LogDisplay,
    clock: &UptimeClock,
    watchdog: &Watchdog,
) -> ! {
    info!("setup mode: hold black 3 s and release to restart, 10 s to factory reset");
    graphics::show_wifi(audience, player);

    let mut monitor = SetupHoldMonitor::new();
    loop {
        watchdog.feed();
        match monitor.update(black.is_low(), clock.now_ms()) {
            Some(SetupAction::Restart) => {
                info!("setup mode: restart");
                reset::restart();
            }
            Some(SetupAction::FactoryReset) => {
                warn!("setup mode: factory reset");
                if let Err(e) = JsonSettings::remove(SETTINGS_PATH) {
                    warn!("factory reset: {}", e);
                }
                reset::restart();
            }
            None => FreeRtos::delay_ms(FRAME_INTERVAL_MS),
        }
    }
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  BrickClock v{}                     ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let peripherals =
        Peripherals::take().map_err(|_| Error::Init("peripherals already taken"))?;
    let pins = peripherals.pins;
    let watchdog = Watchdog::new();

    // ── 2. Peripherals ────────────────────────────────────────
    let mut black = button(pins.gpio4.downgrade())?;
    let blue = button(pins.gpio5.downgrade())?;
    let red = button(pins.gpio6.downgrade())?;
    let green = button(pins.gpio7.downgrade())?;
    let buzzer = output(pins.gpio15.downgrade_output())?;
    let led_red = output(pins.gpio16.downgrade_output())?;
    let led_blue = output(pins.gpio17.downgrade_output())?;

    let clock = UptimeClock::new();
    let mut audience = LogDisplay::new("audience");
    let mut player = LogDisplay::new("player");

    // ── 3. Setup mode if black is held at power-on ────────────
    if black.is_low() {
        setup_mode(&mut black, &mut audience, &mut player, &clock, &watchdog);
    }

    // ── 4. Settings and prefs ─────────────────────────────────
    let settings = JsonSettings::load(SETTINGS_PATH).unwrap_or_else(|e| {
        warn!("{}, using defaults", e);
        JsonSettings::default()
    });
    let prefs = NvsPrefs::new(EspDefaultNvsPartition::take()?).map_err(Error::from)?;

    // ── 5. Timer core ─────────────────────────────────────────
    let parts: BoardParts<Esp32Board> = BoardParts {
        clock,
        audience,
        player,
        black,
        blue,
        red,
        green,
        buzzer,
        led_red,
        led_blue,
        prefs,
    };
    let mut app = TimerApp::new(parts, &settings);
    let mut sink = LogEventSink::new();
    app.start(&mut sink);

    // ── 6. Main loop ──────────────────────────────────────────
    loop {
        app.tick(&mut sink);
        watchdog.feed();
        FreeRtos::delay_ms(FRAME_INTERVAL_MS);
    }
}
