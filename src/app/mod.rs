//! Application core: match orchestration with no direct I/O.
//!
//! Hardware is reached only through the **port traits** in [`ports`] and
//! the `embedded-hal` pin traits, so everything here runs on the host
//! against mock adapters.

pub mod events;
pub mod ports;
pub mod service;
pub mod setup_mode;
