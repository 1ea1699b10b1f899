//! Session scoring: multiplier and final score.
//!
//! Two pure functions. [`session_multiplier`] turns the ready timing and the
//! wrap-up grade into a scalar in `[0.6, 2.0]`; [`session_score`] applies it
//! to base points. The constants are the behavioral contract and are kept at
//! their literal values.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Starting point before boosts and adjustments.
pub const BASE_MULTIPLIER: f64 = 1.0;
/// Flat penalty when the user never confirmed readiness.
pub const MISSED_READY_PENALTY: f64 = 0.25;
/// Boost when the ready tap lands at the last possible moment.
pub const LATE_BOOST_MIN: f64 = 0.05;
/// Boost when the ready tap lands immediately.
pub const EARLY_BOOST_MAX: f64 = 0.25;
/// Grade adjustment for an A wrap-up.
pub const GRADE_A_ADJUST: f64 = 0.10;
/// Grade adjustment for a C wrap-up.
pub const GRADE_C_ADJUST: f64 = -0.10;
/// Lower clamp of the final multiplier.
pub const MULTIPLIER_FLOOR: f64 = 0.6;
/// Upper clamp of the final multiplier.
pub const MULTIPLIER_CEIL: f64 = 2.0;

/// Self-assessed wrap-up grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WrapGrade {
    A,
    B,
    C,
}

impl WrapGrade {
    fn adjustment(self) -> f64 {
        match self {
            WrapGrade::A => GRADE_A_ADJUST,
            WrapGrade::B => 0.0,
            WrapGrade::C => GRADE_C_ADJUST,
        }
    }
}

/// Input to [`session_multiplier`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultiplierInput {
    /// Captured ready latency; `None` when the user never confirmed.
    pub ready_at_ms: Option<u64>,
    /// Total pre-start countdown length.
    pub prestart_total_ms: u64,
    pub wrap_grade: WrapGrade,
}

/// Compute the session multiplier.
///
/// Base 1.0; a missed ready tap costs a flat 0.25, otherwise an earlier tap
/// earns a larger boost, linearly interpolated between [`LATE_BOOST_MIN`]
/// and [`EARLY_BOOST_MAX`]. The wrap-up grade shifts the result by ±0.10,
/// and the final value is clamped to `[0.6, 2.0]`.
pub fn session_multiplier(input: &MultiplierInput) -> Result<f64, ValidationError> {
    if input.prestart_total_ms == 0 {
        return Err(ValidationError::NotPositive {
            field: "prestart_total_ms",
            value: 0,
        });
    }
    if let Some(ready) = input.ready_at_ms {
        if ready > input.prestart_total_ms {
            return Err(ValidationError::OutOfRange {
                field: "ready_at_ms",
                value: ready as i64,
                min: 0,
                max: input.prestart_total_ms as i64,
            });
        }
    }

    let mut multiplier = BASE_MULTIPLIER;
    match input.ready_at_ms {
        None => multiplier -= MISSED_READY_PENALTY,
        Some(ready) => {
            let progress = 1.0 - (ready as f64 / input.prestart_total_ms as f64);
            multiplier += LATE_BOOST_MIN + (EARLY_BOOST_MAX - LATE_BOOST_MIN) * progress;
        }
    }
    multiplier += input.wrap_grade.adjustment();

    Ok(multiplier.clamp(MULTIPLIER_FLOOR, MULTIPLIER_CEIL))
}

/// Final score: `round(base_points × multiplier)`.
///
/// Both inputs must be non-negative.
pub fn session_score(base_points: f64, multiplier: f64) -> Result<i64, ValidationError> {
    if !(base_points >= 0.0) {
        return Err(ValidationError::Negative {
            field: "base_points",
            value: base_points,
        });
    }
    if !(multiplier >= 0.0) {
        return Err(ValidationError::Negative {
            field: "multiplier",
            value: multiplier,
        });
    }
    Ok((base_points * multiplier).round() as i64)
}
