use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::flow::{FlowAction, FlowState};

/// Every externally meaningful state change in the engine produces an Event.
/// The rendering layer polls for events; the engine never calls into the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    FlowAdvanced {
        from: FlowState,
        to: FlowState,
        action: FlowAction,
        at: DateTime<Utc>,
    },
    /// The session was reset to `PreStart` and all fields were cleared.
    SessionReset {
        from: FlowState,
        at: DateTime<Utc>,
    },
    /// The one-shot ready tap was captured during the countdown.
    ReadyCaptured {
        elapsed_ms: u64,
        at: DateTime<Utc>,
    },
    /// The pre-start countdown reached zero. Fires exactly once.
    CountdownSealed {
        total_ms: u64,
        ready_captured: bool,
        at: DateTime<Utc>,
    },
    /// A villain line moved from the queue to the display list.
    LineDispatched {
        line_id: Uuid,
        dwell_ms: u64,
        at: DateTime<Utc>,
    },
    /// The last dwell elapsed with nothing left to dispatch.
    QueueDrained {
        displayed: usize,
        at: DateTime<Utc>,
    },
    /// The queue and display list were emptied by `clear()`.
    QueueCleared {
        dropped: usize,
        at: DateTime<Utc>,
    },
    TypingStarted {
        chars: usize,
        at: DateTime<Utc>,
    },
    /// All characters were revealed. Fires exactly once per invocation.
    TypingCompleted {
        chars: usize,
        at: DateTime<Utc>,
    },
}
