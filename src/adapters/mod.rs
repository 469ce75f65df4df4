//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements    | Connects to                     |
//! |---------------|---------------|---------------------------------|
//! | `log_display` | DisplaySurface| Serial log (matrix stand-in)    |
//! | `log_sink`    | EventSink     | Serial log output               |
//! | `nvs`         | PrefsPort     | NVS / in-memory store           |
//! | `settings`    | SettingsPort  | Portal JSON document on flash   |
//! | `time`        | Clock         | ESP32 system timer              |

pub mod log_display;
pub mod log_sink;
pub mod nvs;
pub mod settings;
pub mod time;
