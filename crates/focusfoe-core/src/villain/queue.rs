//! Dwell-paced FIFO dispatch of villain lines.
//!
//! Lines enter an internal queue and move, strictly one at a time, to the
//! externally observable display list. Each dispatched line dwells for a
//! duration proportional to its length before the next one moves. The
//! scheduler is tick-driven: a single dequeue can happen per dwell cycle,
//! so dispatch is serialized by construction.

use std::collections::VecDeque;

use chrono::Utc;

use crate::events::Event;
use crate::villain::VillainLine;

/// Shortest dwell, applied to very short lines.
pub const DWELL_FLOOR_MS: u64 = 600;
/// Longest dwell, applied to very long lines.
pub const DWELL_CEIL_MS: u64 = 8_000;
/// Per-character dwell cost.
pub const DWELL_PER_CHAR_MS: u64 = 28;

/// Dwell time for a line: `clamp(600, 8000, chars × 28)`.
fn dwell_for(text: &str) -> u64 {
    (text.chars().count() as u64 * DWELL_PER_CHAR_MS).clamp(DWELL_FLOOR_MS, DWELL_CEIL_MS)
}

/// Serializes delivery of enqueued lines into the display list.
#[derive(Debug, Default)]
pub struct MessageQueueScheduler {
    queue: VecDeque<VillainLine>,
    displayed: Vec<VillainLine>,
    /// Instant the current dwell ends; `None` when idle.
    dwell_until_ms: Option<u64>,
}

impl MessageQueueScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Lines dispatched so far, in exact enqueue order.
    pub fn displayed(&self) -> &[VillainLine] {
        &self.displayed
    }

    /// Lines still waiting to be dispatched.
    pub fn queued_len(&self) -> usize {
        self.queue.len()
    }

    /// Idle means no dwell in progress; the next enqueue dispatches
    /// immediately.
    pub fn is_idle(&self) -> bool {
        self.dwell_until_ms.is_none()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Stamp and enqueue a line. When the scheduler is idle the line
    /// dispatches immediately and the dwell starts; otherwise it waits its
    /// turn.
    pub fn enqueue(&mut self, text: impl Into<String>, now_ms: u64) -> Option<Event> {
        let line = VillainLine::new(text);
        self.queue.push_back(line);
        if self.is_idle() {
            return self.dispatch_next(now_ms);
        }
        None
    }

    /// Call periodically. Dispatches the next line once the current dwell
    /// elapses, or reports `QueueDrained` when nothing is left.
    pub fn tick(&mut self, now_ms: u64) -> Option<Event> {
        let due = self.dwell_until_ms?;
        if now_ms < due {
            return None;
        }
        if self.queue.is_empty() {
            self.dwell_until_ms = None;
            return Some(Event::QueueDrained {
                displayed: self.displayed.len(),
                at: Utc::now(),
            });
        }
        self.dispatch_next(now_ms)
    }

    /// Empty the queue, reset the display list, and halt any pending
    /// dispatch. The next enqueue starts fresh.
    pub fn clear(&mut self) -> Event {
        let dropped = self.queue.len();
        self.queue.clear();
        self.displayed.clear();
        self.dwell_until_ms = None;
        Event::QueueCleared {
            dropped,
            at: Utc::now(),
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn dispatch_next(&mut self, now_ms: u64) -> Option<Event> {
        let line = self.queue.pop_front()?;
        let dwell_ms = dwell_for(&line.text);
        let line_id = line.id;
        self.displayed.push(line);
        self.dwell_until_ms = Some(now_ms + dwell_ms);
        Some(Event::LineDispatched {
            line_id,
            dwell_ms,
            at: Utc::now(),
        })
    }
}
