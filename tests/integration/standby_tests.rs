//! Standby controls: ready flags and black-held setting chords.

use brickclock::config::PlayerMode;
use brickclock::fsm::GameState;
use brickclock::graphics::BRIGHTNESS_HUD_MS;
use brickclock::graphics::overlay::Brightness;

use super::mock_hw::{Btn, Rig};

fn standby(settings: &[(&str, &str)], prefs: &[(&str, &str)]) -> Rig {
    let mut rig = Rig::boot(settings, prefs);
    rig.settle_in_standby();
    rig
}

// ── Settings chords ──────────────────────────────────────────

#[test]
fn black_green_steps_match_length_and_persists() {
    let mut rig = standby(&[], &[]);
    rig.chord(Btn::Green);

    assert_eq!(rig.ctx().total_time, 105);
    assert_eq!(rig.text(), "1:45");
    assert_eq!(rig.prefs.value("total_time").as_deref(), Some("105"));
    assert_eq!(rig.sink.pref_changes(), [("total_time", "105".to_owned())]);
    assert_eq!(rig.state(), GameState::Standby);
}

#[test]
fn match_length_wraps_past_max() {
    let mut rig = standby(&[("max_time", "2:00")], &[("total_time", "120")]);
    rig.chord(Btn::Green);
    assert_eq!(rig.ctx().total_time, 30);
    assert_eq!(rig.text(), "0:30");
}

#[test]
fn black_blue_steps_brightness_with_hud() {
    let mut rig = standby(&[], &[("brightness", "7")]);

    rig.press(Btn::Black);
    rig.press(Btn::Blue);
    assert_eq!(rig.ctx().graphics.brightness().level(), 8);
    assert!(rig.ctx().graphics.is_hud_visible());
    assert_eq!(
        rig.ctx().audience.brightness,
        Some(Brightness::new(8).audience_raw())
    );
    assert_eq!(
        rig.ctx().player.brightness,
        Some(Brightness::new(8).player_raw())
    );
    assert_eq!(rig.ctx().audience.last_text, ["8"]);
    assert!(!rig.ctx().audience.last_icons.is_empty());

    rig.release(Btn::Blue);
    rig.tap(Btn::Blue);
    assert_eq!(rig.ctx().graphics.brightness().level(), 1);
    assert_eq!(rig.prefs.value("brightness").as_deref(), Some("1"));
    rig.release(Btn::Black);

    rig.run_ms(u64::from(BRIGHTNESS_HUD_MS));
    assert!(!rig.ctx().graphics.is_hud_visible());
    assert_eq!(rig.ctx().audience.last_text, ["1:30"]);
    // Adjusting brightness never toggles a ready flag.
    assert!(!rig.ctx().ready().blue);
}

#[test]
fn black_red_cycles_player_mode() {
    let mut rig = standby(&[], &[]);
    rig.tap(Btn::Blue);
    assert!(rig.ctx().ready().blue);

    rig.chord(Btn::Red);
    assert_eq!(rig.ctx().mode, PlayerMode::ThreePlayers);
    assert_eq!(rig.text(), "3 PLAYERS");
    assert_eq!(rig.prefs.value("mode").as_deref(), Some("1"));
    assert!(!rig.ctx().ready().blue);
    assert!(rig.ctx().graphics.layout().three_players);

    rig.chord(Btn::Red);
    assert_eq!(rig.ctx().mode, PlayerMode::Rumble);
    assert_eq!(rig.text(), "RUMBLE MODE");

    rig.chord(Btn::Red);
    assert_eq!(rig.ctx().mode, PlayerMode::TwoPlayers);
    assert_eq!(rig.prefs.value("mode").as_deref(), Some("0"));
}

#[test]
fn failed_pref_write_still_applies_change() {
    let mut rig = standby(&[], &[]);
    rig.prefs.fail_writes(true);
    rig.chord(Btn::Green);

    assert_eq!(rig.ctx().total_time, 105);
    assert_eq!(rig.prefs.value("total_time"), None);
    assert!(rig.sink.pref_changes().is_empty());
}

#[test]
fn stored_prefs_survive_reboot() {
    let mut rig = standby(&[], &[]);
    rig.chord(Btn::Green);
    rig.chord(Btn::Red);

    let stored = [
        ("total_time", rig.prefs.value("total_time").unwrap_or_default()),
        ("mode", rig.prefs.value("mode").unwrap_or_default()),
    ];
    let stored: Vec<(&str, &str)> = stored.iter().map(|(k, v)| (*k, v.as_str())).collect();
    let rebooted = Rig::boot(&[], &stored);
    assert_eq!(rebooted.ctx().total_time, 105);
    assert_eq!(rebooted.ctx().mode, PlayerMode::ThreePlayers);
    assert_eq!(rebooted.text(), "3 PLAYERS");
}

// ── Ready flags ──────────────────────────────────────────────

#[test]
fn three_players_wait_for_green() {
    let mut rig = standby(&[], &[("mode", "1")]);
    rig.tap(Btn::Blue);
    rig.tap(Btn::Red);
    assert_eq!(rig.state(), GameState::Standby);

    rig.tap(Btn::Green);
    assert_eq!(rig.state(), GameState::PreCountdown);
}

#[test]
fn green_is_ignored_with_two_players() {
    let mut rig = standby(&[], &[]);
    rig.tap(Btn::Green);
    assert!(!rig.ctx().ready().green);
    assert_eq!(rig.state(), GameState::Standby);
}

#[test]
fn second_press_withdraws_ready() {
    let mut rig = standby(&[], &[]);
    rig.tap(Btn::Blue);
    rig.tap(Btn::Blue);
    rig.tap(Btn::Red);
    assert_eq!(rig.state(), GameState::Standby);
    assert!(rig.ctx().ready().red);
    assert!(!rig.ctx().ready().blue);
}

#[test]
fn ready_messages_scroll_before_start() {
    let mut rig = standby(&[("show_ready", "true")], &[]);
    rig.tap(Btn::Blue);
    assert_eq!(rig.text(), "BLUE READY");
    assert_eq!(rig.state(), GameState::Standby);
    assert!(rig.run_until(3_000, |c| c.graphics.text().content() == "1:30"));

    rig.tap(Btn::Red);
    assert_eq!(rig.text(), "RED READY");
    assert_eq!(rig.state(), GameState::Standby);
    assert!(rig.run_until(3_000, |c| c.state == GameState::PreCountdown));
}

#[test]
fn rumble_starts_on_blue_or_red_but_not_green() {
    let mut rig = standby(&[("msg_rumble", "FIGHT")], &[("mode", "2")]);
    rig.tap(Btn::Green);
    assert_eq!(rig.text(), "1:30");

    rig.tap(Btn::Blue);
    assert_eq!(rig.text(), "FIGHT");
    assert_eq!(rig.state(), GameState::Standby);
    assert!(rig.run_until(3_000, |c| c.state == GameState::PreCountdown));
    assert_eq!(rig.ctx().time_remaining, 89);
}
