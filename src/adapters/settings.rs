//! Settings document adapter.
//!
//! The web portal saves its form as one flat JSON object
//! (`{"msg_intro": "WELCOME", "go_time": "3", ...}`).  [`JsonSettings`]
//! implements [`SettingsPort`] over that object.  String values are
//! returned as-is, other JSON values in their JSON text form.

use log::{info, warn};
use serde_json::{Map, Value};

use crate::app::ports::SettingsPort;
use crate::error::Error;

/// Where the portal writes the document on the flash filesystem.
pub const SETTINGS_PATH: &str = "/spiffs/settings.json";

#[derive(Debug, Default, Clone)]
pub struct JsonSettings {
    values: Map<String, Value>,
}

impl JsonSettings {
    /// Parse a settings document.  Blank text is an empty document.
    pub fn parse(text: &str) -> Result<Self, Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(values)) => Ok(Self { values }),
            Ok(_) => Err(Error::Settings("document is not a JSON object")),
            Err(e) => {
                warn!("settings: parse error: {}", e);
                Err(Error::Settings("malformed JSON"))
            }
        }
    }

    /// Load the document from `path`.  A missing file gives empty settings
    /// (every key at its default); a corrupt one is an error.
    pub fn load(path: &str) -> Result<Self, Error> {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let settings = Self::parse(&text)?;
                info!("settings: {} keys from {}", settings.values.len(), path);
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("settings: {} not found, using defaults", path);
                Ok(Self::default())
            }
            Err(e) => {
                warn!("settings: read {} failed: {}", path, e);
                Err(Error::Settings("settings file unreadable"))
            }
        }
    }

    /// Delete the settings document (factory reset).
    pub fn remove(path: &str) -> Result<(), Error> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(_) => Err(Error::Settings("settings file not removable")),
        }
    }
}

impl SettingsPort for JsonSettings {
    fn load_setting(&self, key: &str) -> String {
        match self.values.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}
