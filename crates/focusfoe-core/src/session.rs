//! The single-owner session record.
//!
//! The Session is the only piece of state touched by more than one
//! component, so mutation goes through narrow entry points: [`Session::apply`]
//! is the only way `state` changes, [`Session::capture_ready`] is the only
//! way the ready fields are set (and only once per session). Everything else
//! reads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{TransitionError, ValidationError};
use crate::events::Event;
use crate::flow::{self, FlowAction, FlowState};
use crate::scoring::{MultiplierInput, WrapGrade};

/// The mutable record of one focus attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    state: FlowState,
    ready_pressed: bool,
    ready_at_ms: Option<u64>,
    multiplier_penalty: bool,
    rating: Option<u8>,
    /// What the user committed to work on.
    pub target: Option<String>,
    /// Planned block length in minutes.
    pub duration_min: Option<u32>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl Session {
    /// A fresh session in `PreStart` with every field cleared.
    pub fn new() -> Self {
        Self {
            state: FlowState::PreStart,
            ready_pressed: false,
            ready_at_ms: None,
            multiplier_penalty: false,
            rating: None,
            target: None,
            duration_min: None,
            start_time: None,
            end_time: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// True once the ready timestamp has been captured. Holds iff
    /// [`Session::ready_at_ms`] is `Some`.
    pub fn ready_pressed(&self) -> bool {
        self.ready_pressed
    }

    pub fn ready_at_ms(&self) -> Option<u64> {
        self.ready_at_ms
    }

    /// Set when the countdown sealed without a ready capture.
    pub fn multiplier_penalty(&self) -> bool {
        self.multiplier_penalty
    }

    /// Self-assessed 0-100 grade, if submitted.
    pub fn rating(&self) -> Option<u8> {
        self.rating
    }

    /// Build the scoring input for this session.
    ///
    /// The ready timestamp is forwarded only when it was captured; a
    /// penalized session scores as if the user never confirmed readiness.
    pub fn multiplier_input(&self, prestart_total_ms: u64, wrap_grade: WrapGrade) -> MultiplierInput {
        MultiplierInput {
            ready_at_ms: self.ready_at_ms,
            prestart_total_ms,
            wrap_grade,
        }
    }

    // ── Mutation entry points ────────────────────────────────────────

    /// Apply a flow action, storing the new state on success.
    ///
    /// `Reset` clears every session field and reports [`Event::SessionReset`];
    /// all other accepted actions report [`Event::FlowAdvanced`]. Undefined
    /// pairs leave the session untouched and propagate the error.
    pub fn apply(&mut self, action: FlowAction) -> Result<Event, TransitionError> {
        let from = self.state;
        let to = flow::transition(from, action)?;

        if action == FlowAction::Reset {
            *self = Self::new();
            return Ok(Event::SessionReset {
                from,
                at: Utc::now(),
            });
        }

        self.state = to;
        Ok(Event::FlowAdvanced {
            from,
            to,
            action,
            at: Utc::now(),
        })
    }

    /// Record the one-shot ready capture. Write-once: returns `true` the
    /// first time, `false` (and changes nothing) on every later call.
    pub fn capture_ready(&mut self, elapsed_ms: u64) -> bool {
        if self.ready_pressed {
            return false;
        }
        self.ready_pressed = true;
        self.ready_at_ms = Some(elapsed_ms);
        true
    }

    /// Record the countdown seal outcome: flags the multiplier penalty when
    /// the session sealed without a ready capture.
    pub fn record_seal(&mut self) {
        if !self.ready_pressed {
            self.multiplier_penalty = true;
        }
    }

    /// Store the self-assessed grade. Fails for values outside [0, 100].
    pub fn set_rating(&mut self, rating: i64) -> Result<(), ValidationError> {
        if !(0..=100).contains(&rating) {
            return Err(ValidationError::OutOfRange {
                field: "rating",
                value: rating,
                min: 0,
                max: 100,
            });
        }
        self.rating = Some(rating as u8);
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_starts_in_pre_start() {
        let s = Session::new();
        assert_eq!(s.state(), FlowState::PreStart);
        assert!(!s.ready_pressed());
        assert!(s.ready_at_ms().is_none());
        assert!(!s.multiplier_penalty());
    }

    #[test]
    fn apply_advances_state() {
        let mut s = Session::new();
        let event = s.apply(FlowAction::LockIn).unwrap();
        assert_eq!(s.state(), FlowState::LockIn);
        assert!(matches!(
            event,
            Event::FlowAdvanced {
                from: FlowState::PreStart,
                to: FlowState::LockIn,
                ..
            }
        ));
    }

    #[test]
    fn apply_rejects_undefined_action_without_mutating() {
        let mut s = Session::new();
        assert!(s.apply(FlowAction::Claim).is_err());
        assert_eq!(s.state(), FlowState::PreStart);
    }

    #[test]
    fn reset_clears_all_fields() {
        let mut s = Session::new();
        s.apply(FlowAction::LockIn).unwrap();
        s.capture_ready(1234);
        s.set_rating(88).unwrap();
        s.target = Some("write the report".into());

        let event = s.apply(FlowAction::Reset).unwrap();
        assert!(matches!(
            event,
            Event::SessionReset {
                from: FlowState::LockIn,
                ..
            }
        ));
        assert_eq!(s.state(), FlowState::PreStart);
        assert!(!s.ready_pressed());
        assert!(s.ready_at_ms().is_none());
        assert!(s.rating().is_none());
        assert!(s.target.is_none());
    }

    #[test]
    fn capture_ready_is_write_once() {
        let mut s = Session::new();
        assert!(s.capture_ready(5_000));
        assert!(!s.capture_ready(9_000));
        assert_eq!(s.ready_at_ms(), Some(5_000));
        assert!(s.ready_pressed());
    }

    #[test]
    fn seal_without_ready_sets_penalty() {
        let mut s = Session::new();
        s.record_seal();
        assert!(s.multiplier_penalty());
    }

    #[test]
    fn seal_after_ready_does_not_penalize() {
        let mut s = Session::new();
        s.capture_ready(10_000);
        s.record_seal();
        assert!(!s.multiplier_penalty());
    }

    #[test]
    fn rating_is_range_checked() {
        let mut s = Session::new();
        assert!(s.set_rating(101).is_err());
        assert!(s.set_rating(-1).is_err());
        assert!(s.rating().is_none());
        s.set_rating(0).unwrap();
        assert_eq!(s.rating(), Some(0));
        s.set_rating(100).unwrap();
        assert_eq!(s.rating(), Some(100));
    }

    #[test]
    fn multiplier_input_forwards_ready_state() {
        let mut s = Session::new();
        let input = s.multiplier_input(420_000, WrapGrade::B);
        assert!(input.ready_at_ms.is_none());

        s.capture_ready(30_000);
        let input = s.multiplier_input(420_000, WrapGrade::A);
        assert_eq!(input.ready_at_ms, Some(30_000));
        assert_eq!(input.prestart_total_ms, 420_000);
    }
}
