//! Fuzz target: stored prefs
//!
//! Loads `MatchPrefs` from arbitrary stored strings and verifies:
//! - No panics under arbitrary input
//! - `total_time` always lands inside the configured bounds
//! - Brightness always lands in `1..=8`
//!
//! cargo fuzz run fuzz_prefs

#![no_main]

use std::collections::HashMap;

use brickclock::app::ports::{PrefsPort, StorageError};
use brickclock::config::{MatchConfig, MatchPrefs, PREF_BRIGHTNESS, PREF_MODE, PREF_TOTAL_TIME};
use libfuzzer_sys::fuzz_target;

struct MemPrefs(HashMap<&'static str, String>);

impl PrefsPort for MemPrefs {
    fn get(&self, key: &str) -> String {
        self.0.get(key).cloned().unwrap_or_default()
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let mut fields = text.splitn(3, '\n');
    let mut prefs = MemPrefs(HashMap::new());
    for key in [PREF_TOTAL_TIME, PREF_BRIGHTNESS, PREF_MODE] {
        if let Some(value) = fields.next() {
            prefs.0.insert(key, value.to_owned());
        }
    }

    let config = MatchConfig::default();
    let loaded = MatchPrefs::load(&prefs, &config);

    assert!((config.min_time..=config.max_time).contains(&loaded.total_time));
    assert!((1..=8).contains(&loaded.brightness.level()));
    // Mode decoding is total.
    let _ = loaded.mode.next().pref_value();
});
