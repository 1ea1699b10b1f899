//! Session-completion export and the local snapshot.
//!
//! The engine's only outward surface: a flat completion record handed
//! opaquely (as JSON) to an external persistence collaborator, and the
//! snapshot shape that mirrors the session plus bounded history arrays.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::flow::FlowState;
use crate::session::Session;

/// Upper bound of the self-assessed grade.
pub const GRADE_MAX: i64 = 100;
/// Upper bound of the reported ready latency: 5 minutes.
pub const LATENCY_MAX_MS: i64 = 300_000;
/// History arrays keep this many most-recent entries for display.
pub const HISTORY_CAP: usize = 14;

/// Check a grade is an integer in [0, 100].
pub fn validate_grade(value: i64) -> Result<u8, ValidationError> {
    if !(0..=GRADE_MAX).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: "grade",
            value,
            min: 0,
            max: GRADE_MAX,
        });
    }
    Ok(value as u8)
}

/// Check a latency is within [0, 300000] ms.
pub fn validate_latency(value: u64) -> Result<u64, ValidationError> {
    if value as i64 > LATENCY_MAX_MS {
        return Err(ValidationError::OutOfRange {
            field: "latency_ms",
            value: value as i64,
            min: 0,
            max: LATENCY_MAX_MS,
        });
    }
    Ok(value)
}

/// Weather at completion time, as reported by the (external) weather
/// collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub lat: f64,
    pub lon: f64,
    pub code: i32,
    pub temp_c: f64,
    pub wind: f64,
}

/// Flat record describing one completed day. Serialized and handed to the
/// persistence collaborator; the engine does not know how it is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRecord {
    /// YYYY-MM-DD.
    pub date: String,
    pub day_index: u32,
    pub streak_after: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_nighter: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub went_well: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub went_poorly: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherSnapshot>,
}

impl CompletionRecord {
    pub fn new(on: NaiveDate, day_index: u32, streak_after: u32) -> Self {
        Self {
            date: on.format("%Y-%m-%d").to_string(),
            day_index,
            streak_after,
            grade: None,
            latency_ms: None,
            all_nighter: None,
            went_well: None,
            went_poorly: None,
            weather: None,
        }
    }

    /// Re-check the bounded fields before hand-off.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(grade) = self.grade {
            validate_grade(grade as i64)?;
        }
        if let Some(latency) = self.latency_ms {
            validate_latency(latency)?;
        }
        Ok(())
    }

    /// The opaque wire form for the persistence collaborator.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Local snapshot: the session mirror plus accumulated history, bounded to
/// the most recent [`HISTORY_CAP`] entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalSnapshot {
    pub day_index: u32,
    pub streak: u32,
    /// Mirror of the session fields at last capture.
    pub state: Option<FlowState>,
    pub ready_pressed: bool,
    pub multiplier_penalty: bool,
    pub target: Option<String>,
    pub duration_min: Option<u32>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub rating: Option<u8>,
    /// Most recent grades, oldest first.
    pub grades: Vec<u8>,
    /// Most recent ready latencies, oldest first.
    pub latencies: Vec<u64>,
}

impl LocalSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh the mirrored session fields.
    pub fn capture(&mut self, session: &Session) {
        self.state = Some(session.state());
        self.ready_pressed = session.ready_pressed();
        self.multiplier_penalty = session.multiplier_penalty();
        self.target = session.target.clone();
        self.duration_min = session.duration_min;
        self.start_time = session.start_time;
        self.end_time = session.end_time;
        self.rating = session.rating();
    }

    /// Roll a finished session into the history and produce the completion
    /// record for export. Advances `day_index` and `streak`.
    pub fn record_completion(
        &mut self,
        session: &Session,
        latency_ms: Option<u64>,
        all_nighter: bool,
        on: NaiveDate,
    ) -> Result<CompletionRecord, ValidationError> {
        let grade = match session.rating() {
            Some(rating) => Some(validate_grade(rating as i64)?),
            None => None,
        };
        let latency = match latency_ms {
            Some(ms) => Some(validate_latency(ms)?),
            None => None,
        };

        self.capture(session);
        if let Some(g) = grade {
            push_bounded(&mut self.grades, g);
        }
        if let Some(ms) = latency {
            push_bounded(&mut self.latencies, ms);
        }
        self.day_index += 1;
        self.streak += 1;

        let mut record = CompletionRecord::new(on, self.day_index, self.streak);
        record.grade = grade;
        record.latency_ms = latency;
        record.all_nighter = Some(all_nighter);
        Ok(record)
    }

    /// A missed day resets the streak; the day counter keeps going.
    pub fn break_streak(&mut self) {
        self.streak = 0;
    }
}

fn push_bounded<T>(history: &mut Vec<T>, value: T) {
    history.push(value);
    if history.len() > HISTORY_CAP {
        let excess = history.len() - HISTORY_CAP;
        history.drain(..excess);
    }
}
