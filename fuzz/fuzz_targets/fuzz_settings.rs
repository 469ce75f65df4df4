//! Fuzz target: settings document
//!
//! Feeds arbitrary text to `JsonSettings::parse` and, when it parses,
//! builds a `MatchConfig` from it, verifying:
//! - No panics under arbitrary input
//! - Match-length bounds stay ordered (`min_time <= max_time`)
//! - Phase lengths stay single-digit seconds
//!
//! cargo fuzz run fuzz_settings

#![no_main]

use brickclock::adapters::settings::JsonSettings;
use brickclock::config::MatchConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    let Ok(settings) = JsonSettings::parse(text) else {
        return;
    };
    let config = MatchConfig::from_settings(&settings);

    assert!(config.min_time <= config.max_time);
    assert!(config.interval_time > 0);
    assert!(config.pre_time <= 9);
    assert!(config.go_time <= 9);
    assert!(config.game_over_time <= 9);

    let next = config.next_total_time(config.clamp_total_time(u16::MAX));
    assert!((config.min_time..=config.max_time).contains(&next));
});
