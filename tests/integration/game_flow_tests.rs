//! Boot, intro and full-match scenarios.

use brickclock::app::events::AppEvent;
use brickclock::fsm::GameState;

use super::mock_hw::{Btn, Rig};

/// Short match with no get-ready phase.
const QUICK_MATCH: &[(&str, &str)] = &[("min_time", "0:15"), ("pre_time", "Off")];

fn quick_rig(extra: &[(&str, &str)]) -> Rig {
    let mut settings = QUICK_MATCH.to_vec();
    settings.extend_from_slice(extra);
    let mut rig = Rig::boot(&settings, &[("total_time", "15")]);
    rig.settle_in_standby();
    rig
}

// ── Boot ─────────────────────────────────────────────────────

#[test]
fn intro_scrolls_then_mode_then_standby_clock() {
    let mut rig = Rig::boot(&[("msg_intro", "HI")], &[]);

    assert_eq!(rig.state(), GameState::Startup);
    assert_eq!(rig.text(), "HI");
    assert_eq!(rig.sink.events, [AppEvent::Started(GameState::Startup)]);

    assert!(rig.run_until(2_000, |c| c.graphics.text().content() == "2 PLAYERS"));
    assert_eq!(rig.state(), GameState::Standby);

    rig.settle_in_standby();
    assert_eq!(rig.text(), "1:30");
    assert_eq!(
        rig.sink.transitions(),
        [(GameState::Startup, GameState::Standby)]
    );
}

#[test]
fn black_skips_the_intro() {
    let mut rig = Rig::boot(&[("msg_intro", "A VERY LONG WELCOME MESSAGE")], &[]);
    rig.run_ms(100);
    assert_eq!(rig.state(), GameState::Startup);

    rig.tap(Btn::Black);
    assert_eq!(rig.state(), GameState::Standby);
    assert_eq!(rig.text(), "2 PLAYERS");
}

#[test]
fn startup_beep_ends() {
    let mut rig = Rig::boot(&[], &[]);
    assert!(rig.buzzer.is_driven_high());
    rig.run_ms(600);
    assert!(!rig.buzzer.is_driven_high());
}

#[test]
fn buzzer_off_setting_keeps_output_low() {
    let mut rig = Rig::boot(&[("buzzer_on", "false")], &[]);
    assert!(!rig.buzzer.is_driven_high());
    rig.settle_in_standby();
    rig.tap(Btn::Blue);
    assert!(!rig.buzzer.is_driven_high());
}

// ── Full match ───────────────────────────────────────────────

#[test]
fn two_player_match_runs_to_game_over_and_resets() {
    let mut rig = quick_rig(&[]);
    assert_eq!(rig.text(), "0:15");

    rig.tap(Btn::Blue);
    assert_eq!(rig.state(), GameState::Standby);
    assert!(rig.ctx().ready().blue);

    rig.tap(Btn::Red);
    assert_eq!(rig.state(), GameState::PreCountdown);
    assert_eq!(rig.ctx().time_remaining, 14);

    assert!(rig.run_until(4_000, |c| c.state == GameState::Countdown));
    assert_eq!(rig.text(), "GO!");

    assert!(rig.run_until(20_000, |c| c.state == GameState::GameOver));
    assert!(rig.run_until(6_000, |c| c.graphics.text().content() == "0:00"));
    assert_eq!(rig.state(), GameState::GameOver);

    assert_eq!(
        rig.sink.transitions(),
        [
            (GameState::Standby, GameState::PreCountdown),
            (GameState::PreCountdown, GameState::Countdown),
            (GameState::Countdown, GameState::GameOver),
        ]
    );

    rig.tap(Btn::Black);
    assert_eq!(rig.state(), GameState::Standby);
    assert_eq!(rig.text(), "0:15");
    assert!(!rig.ctx().ready().blue);
    assert!(!rig.ctx().ready().red);
}

#[test]
fn auto_reset_returns_to_standby_after_game_over() {
    let mut rig = quick_rig(&[("auto_reset", "true"), ("game_over_time", "Off")]);
    rig.tap(Btn::Blue);
    rig.tap(Btn::Red);

    assert!(rig.run_until(25_000, |c| c.state == GameState::Standby));
    assert_eq!(rig.text(), "0:15");
    assert!(rig
        .sink
        .transitions()
        .contains(&(GameState::Countdown, GameState::Standby)));
}

#[test]
fn game_over_message_scrolls_before_final_clock() {
    let mut rig = quick_rig(&[("msg_game_over", "TIME")]);
    rig.tap(Btn::Blue);
    rig.tap(Btn::Red);

    assert!(rig.run_until(25_000, |c| c.state == GameState::GameOver));
    assert_eq!(rig.text(), "TIME");
    assert!(rig.ctx().graphics.text().is_scrolling());
}

#[test]
fn ready_leds_follow_flags() {
    let mut rig = quick_rig(&[]);
    assert!(!rig.led_blue.is_driven_high());

    rig.tap(Btn::Blue);
    rig.tick();
    assert!(rig.led_blue.is_driven_high());
    assert!(!rig.led_red.is_driven_high());

    rig.tap(Btn::Blue);
    rig.tick();
    assert!(!rig.led_blue.is_driven_high());
}
