//! Pre-start countdown timer with one-shot ready capture.
//!
//! The timer is a wall-clock-based state machine. It does not use internal
//! threads - the caller is responsible for calling `tick(now_ms)`
//! periodically and passing the current time to every command.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Counting -> Sealed
//!   \        \
//!    `--------`-> Cancelled
//! ```
//!
//! Sealing is one-way: once the countdown reaches zero it cannot be
//! un-sealed, and the [`Event::CountdownSealed`] signal fires exactly once.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::events::Event;

/// Default countdown length: 7 minutes.
pub const DEFAULT_PRESTART_MS: u64 = 420_000;

/// Repaint cadence hint at full motion.
pub const REPAINT_FULL_MS: u64 = 250;
/// Repaint cadence hint under reduced motion.
pub const REPAINT_REDUCED_MS: u64 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrestartState {
    Idle,
    Counting,
    Sealed,
    Cancelled,
}

/// Countdown timer for the pre-start phase.
///
/// Counts down from `total_ms` to zero and lets the caller capture, at most
/// once, the elapsed time since start as the "ready latency".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrestartTimer {
    total_ms: u64,
    state: PrestartState,
    /// Timestamp (ms) passed to `start()`.
    started_at_ms: Option<u64>,
    /// Raw elapsed-at-tap value; captured once, never overwritten.
    ready_at_ms: Option<u64>,
    reduced_motion: bool,
}

impl PrestartTimer {
    /// Create a timer counting down from `total_ms`.
    pub fn new(total_ms: u64) -> Result<Self, ValidationError> {
        if total_ms == 0 {
            return Err(ValidationError::NotPositive {
                field: "prestart total_ms",
                value: 0,
            });
        }
        Ok(Self {
            total_ms,
            state: PrestartState::Idle,
            started_at_ms: None,
            ready_at_ms: None,
            reduced_motion: false,
        })
    }

    /// Lower the repaint cadence; expiry and ready-capture semantics are
    /// identical either way.
    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> PrestartState {
        self.state
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ms
    }

    pub fn is_sealed(&self) -> bool {
        self.state == PrestartState::Sealed
    }

    /// The raw captured ready latency, if any.
    pub fn ready_at_ms(&self) -> Option<u64> {
        self.ready_at_ms
    }

    /// The captured latency clamped to `[0, total_ms]` for downstream
    /// consumers (scoring validates against this range).
    pub fn clamped_ready_ms(&self) -> Option<u64> {
        self.ready_at_ms.map(|ms| ms.min(self.total_ms))
    }

    /// Remaining milliseconds at `now_ms`. Full `total_ms` before start,
    /// zero after sealing.
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        match self.state {
            PrestartState::Idle => self.total_ms,
            PrestartState::Sealed => 0,
            PrestartState::Counting | PrestartState::Cancelled => {
                let started = self.started_at_ms.unwrap_or(now_ms);
                self.total_ms.saturating_sub(now_ms.saturating_sub(started))
            }
        }
    }

    /// Remaining milliseconds for repaint purposes: quantized to whole
    /// seconds under reduced motion, raw otherwise.
    pub fn display_ms(&self, now_ms: u64) -> u64 {
        let remaining = self.remaining_ms(now_ms);
        if self.reduced_motion {
            remaining / 1_000 * 1_000
        } else {
            remaining
        }
    }

    /// Suggested repaint interval for the rendering layer.
    pub fn repaint_interval_ms(&self) -> u64 {
        if self.reduced_motion {
            REPAINT_REDUCED_MS
        } else {
            REPAINT_FULL_MS
        }
    }

    /// mm:ss display value, ceiling-rounded to the nearest whole second so
    /// that 999 ms remaining reads `00:01`, not `00:00`.
    pub fn display_remaining(&self, now_ms: u64) -> String {
        let secs = self.remaining_ms(now_ms).div_ceil(1_000);
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin the countdown. No-op unless the timer is `Idle`.
    pub fn start(&mut self, now_ms: u64) {
        if self.state == PrestartState::Idle {
            self.state = PrestartState::Counting;
            self.started_at_ms = Some(now_ms);
        }
    }

    /// Capture the ready latency. Idempotent after the first call; a no-op
    /// before start, after sealing, and after cancellation.
    pub fn tap_ready(&mut self, now_ms: u64) -> Option<Event> {
        if self.state != PrestartState::Counting || self.ready_at_ms.is_some() {
            return None;
        }
        let started = self.started_at_ms?;
        let elapsed = now_ms.saturating_sub(started);
        self.ready_at_ms = Some(elapsed);
        Some(Event::ReadyCaptured {
            elapsed_ms: elapsed,
            at: Utc::now(),
        })
    }

    /// Call periodically. Returns `Some(Event::CountdownSealed)` exactly
    /// once, on the tick where the countdown reaches zero.
    pub fn tick(&mut self, now_ms: u64) -> Option<Event> {
        if self.state != PrestartState::Counting {
            return None;
        }
        if self.remaining_ms(now_ms) > 0 {
            return None;
        }
        self.state = PrestartState::Sealed;
        Some(Event::CountdownSealed {
            total_ms: self.total_ms,
            ready_captured: self.ready_at_ms.is_some(),
            at: Utc::now(),
        })
    }

    /// Tear the timer down. Safe at any time; once cancelled no tick seals
    /// and no tap captures. A sealed timer stays sealed.
    pub fn cancel(&mut self) {
        if self.state != PrestartState::Sealed {
            self.state = PrestartState::Cancelled;
        }
    }
}

impl Default for PrestartTimer {
    fn default() -> Self {
        Self::new(DEFAULT_PRESTART_MS).expect("default duration is positive")
    }
}
