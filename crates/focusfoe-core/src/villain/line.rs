use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One antagonist line. Immutable once enqueued; `created_at` is assigned
/// at enqueue time and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VillainLine {
    pub id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl VillainLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}
