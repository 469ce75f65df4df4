//! Polled peripheral drivers and the soft timer they share.

pub mod button;
pub mod buzzer;
pub mod soft_timer;
pub mod watchdog;
