//! NVS (Non-Volatile Storage) prefs adapter.
//!
//! Implements [`PrefsPort`] for the three button-adjusted values
//! (`total_time`, `brightness`, `mode`), stored as short strings in the
//! `"pref"` namespace.
//!
//! - **`target_os = "espidf"`**: ESP-IDF NVS via `EspNvs`.  Each
//!   `nvs_set_str` commit is atomic.
//! - **otherwise**: an in-memory map for host-side simulation and tests.

use log::info;

use crate::app::ports::{PrefsPort, StorageError};

#[cfg(not(target_os = "espidf"))]
use std::{cell::RefCell, collections::HashMap};

#[cfg(target_os = "espidf")]
use esp_idf_svc::nvs::{EspDefaultNvsPartition, EspNvs, NvsDefault};

/// NVS namespace holding the prefs.
pub const PREFS_NAMESPACE: &str = "pref";

/// NVS key names are limited to 15 bytes.
const MAX_KEY_LEN: usize = 15;

/// Longest stored value read back.
const MAX_VALUE_LEN: usize = 32;

pub struct NvsPrefs {
    #[cfg(target_os = "espidf")]
    nvs: EspNvs<NvsDefault>,
    #[cfg(not(target_os = "espidf"))]
    store: RefCell<HashMap<String, String>>,
}

impl NvsPrefs {
    /// Open the prefs namespace read-write on the default partition.
    #[cfg(target_os = "espidf")]
    pub fn new(partition: EspDefaultNvsPartition) -> Result<Self, StorageError> {
        let nvs = EspNvs::new(partition, PREFS_NAMESPACE, true).map_err(|e| {
            log::warn!("NvsPrefs: open failed: {}", e);
            StorageError::IoError
        })?;
        info!("NvsPrefs: namespace '{}' open", PREFS_NAMESPACE);
        Ok(Self { nvs })
    }

    /// In-memory store for host builds.
    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Result<Self, StorageError> {
        info!("NvsPrefs: simulation backend");
        Ok(Self {
            store: RefCell::new(HashMap::new()),
        })
    }

    fn check_key(key: &str) -> Result<(), StorageError> {
        if key.is_empty() || key.len() > MAX_KEY_LEN {
            return Err(StorageError::InvalidKey);
        }
        Ok(())
    }
}

impl PrefsPort for NvsPrefs {
    fn get(&self, key: &str) -> String {
        if Self::check_key(key).is_err() {
            return String::new();
        }

        #[cfg(target_os = "espidf")]
        {
            let mut buf = [0u8; MAX_VALUE_LEN + 1];
            match self.nvs.get_str(key, &mut buf) {
                Ok(Some(value)) => value.to_owned(),
                Ok(None) => String::new(),
                Err(e) => {
                    log::warn!("NvsPrefs: read '{}' failed: {}", key, e);
                    String::new()
                }
            }
        }

        #[cfg(not(target_os = "espidf"))]
        {
            self.store.borrow().get(key).cloned().unwrap_or_default()
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::check_key(key)?;
        if value.len() > MAX_VALUE_LEN {
            return Err(StorageError::Full);
        }

        #[cfg(target_os = "espidf")]
        {
            self.nvs.set_str(key, value).map_err(|e| {
                log::warn!("NvsPrefs: write '{}' failed: {}", key, e);
                StorageError::IoError
            })
        }

        #[cfg(not(target_os = "espidf"))]
        {
            self.store
                .borrow_mut()
                .insert(key.to_owned(), value.to_owned());
            Ok(())
        }
    }
}
