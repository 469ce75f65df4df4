//! Cooperative one-shot timer / trigger ("soft ISR").
//!
//! A [`SoftTimer`] holds at most one pending callback.  It is armed in one
//! of two modes:
//!
//! | Mode    | Armed by          | Fires when                              |
//! |---------|-------------------|-----------------------------------------|
//! | Timer   | [`arm_timer`]     | [`poll`] observes `now >= due`          |
//! | Trigger | [`arm_trigger`]   | the owner calls [`fire`]                |
//!
//! Arming always replaces whatever was pending: there is no queue.  A
//! later animation pre-empts an earlier scheduled transition simply by
//! arming the same instance again.
//!
//! The timer never calls anything itself.  `poll` and `fire` disarm and
//! hand the callback back to the owner, who invokes it with whatever
//! context it needs.  Because the instance is already disarmed by then,
//! the callback is free to re-arm it.
//!
//! [`arm_timer`]: SoftTimer::arm_timer
//! [`arm_trigger`]: SoftTimer::arm_trigger
//! [`poll`]: SoftTimer::poll
//! [`fire`]: SoftTimer::fire

/// How a pending callback is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    /// Released by `poll` once the due time has passed.
    Timer,
    /// Released only by an explicit `fire`.
    Trigger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Release {
    At { due_ms: u64 },
    OnFire,
}

#[derive(Debug)]
struct Pending<C> {
    release: Release,
    callback: C,
}

/// One pending one-shot callback, released by time or by explicit signal.
#[derive(Debug)]
pub struct SoftTimer<C> {
    pending: Option<Pending<C>>,
}

impl<C> Default for SoftTimer<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> SoftTimer<C> {
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Arm in trigger mode.  Any unfired callback is discarded.
    pub fn arm_trigger(&mut self, callback: C) {
        self.pending = Some(Pending {
            release: Release::OnFire,
            callback,
        });
    }

    /// Arm in timer mode, due `delay_ms` after `now_ms`.
    /// Any unfired callback is discarded.
    pub fn arm_timer(&mut self, callback: C, delay_ms: u32, now_ms: u64) {
        self.pending = Some(Pending {
            release: Release::At {
                due_ms: now_ms.saturating_add(u64::from(delay_ms)),
            },
            callback,
        });
    }

    /// Drop the pending callback without releasing it.
    /// Returns `true` if something was armed.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Mode of the pending callback, `None` when disarmed.
    pub fn mode(&self) -> Option<TimerMode> {
        self.pending.as_ref().map(|p| match p.release {
            Release::At { .. } => TimerMode::Timer,
            Release::OnFire => TimerMode::Trigger,
        })
    }

    /// Absolute due time of a timer-mode arm.
    pub fn due_ms(&self) -> Option<u64> {
        match self.pending.as_ref()?.release {
            Release::At { due_ms } => Some(due_ms),
            Release::OnFire => None,
        }
    }

    /// Service a timer-mode arm.  Call every loop iteration.
    ///
    /// Returns the callback exactly once, on the first call where
    /// `now_ms` has reached the due time.  Trigger-mode arms are left
    /// untouched.
    pub fn poll(&mut self, now_ms: u64) -> Option<C> {
        match self.pending.as_ref()?.release {
            Release::At { due_ms } if now_ms >= due_ms => self.take(),
            _ => None,
        }
    }

    /// Release a trigger-mode arm.
    ///
    /// A no-op returning `None` when nothing is armed or when the pending
    /// callback is a timer-mode arm (those only release through `poll`).
    pub fn fire(&mut self) -> Option<C> {
        match self.pending.as_ref()?.release {
            Release::OnFire => self.take(),
            Release::At { .. } => None,
        }
    }

    fn take(&mut self) -> Option<C> {
        self.pending.take().map(|p| p.callback)
    }
}
