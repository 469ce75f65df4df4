//! Unified error type for the timer firmware.
//!
//! The match core itself never fails: port errors are logged and dropped
//! where they happen. This type covers boot, where the binary wraps it in
//! `anyhow`.

use core::fmt;

use crate::app::ports::StorageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The prefs store rejected an operation.
    Storage(StorageError),
    /// The settings document could not be read or parsed.
    Settings(&'static str),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "storage: {e}"),
            Self::Settings(msg) => write!(f, "settings: {msg}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}
