//! Char-by-char text reveal.
//!
//! Reveals one string into a [`TextSink`] one character per scheduled tick,
//! with random jitter on the inter-character delay. Tick-driven like every
//! timed component: the caller pumps `tick(sink, now_ms)` and the renderer
//! never touches the sink outside those calls, so cancellation can never
//! leave a stale tick mutating a discarded sink.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Typing -> Done
//!           |
//!           `-> Idle (cancel)
//! ```

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use serde::{Deserialize, Serialize};

use chrono::Utc;

use crate::events::Event;

/// Where revealed text lands. The sink is passed into every call that
/// writes, so a missing sink is unrepresentable.
pub trait TextSink {
    /// Replace the sink's entire text content.
    fn set_text(&mut self, text: &str);
    fn text(&self) -> &str;
}

/// In-memory sink that counts content mutations.
#[derive(Debug, Clone, Default)]
pub struct BufferSink {
    text: String,
    mutations: usize,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `set_text` has been called.
    pub fn mutation_count(&self) -> usize {
        self.mutations
    }
}

impl TextSink for BufferSink {
    fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.mutations += 1;
    }

    fn text(&self) -> &str {
        &self.text
    }
}

/// Empty the sink's text content synchronously.
pub fn clear_sink<S: TextSink>(sink: &mut S) {
    sink.set_text("");
}

/// Typewriter options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypewriterConfig {
    /// Base inter-character delay.
    pub speed_ms: u64,
    /// Random ± variance added per character.
    pub jitter_ms: u64,
    /// Visual-only flag; carried through to the rendering layer, inert here.
    pub neon: bool,
    /// Trailing cursor glyph kept at the end of content during typing and
    /// removed on completion.
    pub caret: Option<String>,
    /// Text written immediately before typing begins.
    pub prefix: Option<String>,
    /// Fixed jitter seed; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            speed_ms: 50,
            jitter_ms: 6,
            neon: false,
            caret: None,
            prefix: None,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypewriterState {
    Idle,
    Typing,
    Done,
}

/// Reveals a string into a sink one character at a time.
#[derive(Debug, Clone)]
pub struct TypewriterRenderer {
    config: TypewriterConfig,
    chars: Vec<char>,
    revealed: usize,
    /// Instant the next character is due; `None` outside `Typing`.
    next_due_ms: Option<u64>,
    state: TypewriterState,
    rng: Pcg64Mcg,
}

impl TypewriterRenderer {
    pub fn new(config: TypewriterConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => Pcg64Mcg::seed_from_u64(seed),
            None => Pcg64Mcg::from_entropy(),
        };
        Self {
            config,
            chars: Vec::new(),
            revealed: 0,
            next_due_ms: None,
            state: TypewriterState::Idle,
            rng,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TypewriterState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == TypewriterState::Done
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin revealing `text`. Writes the prefix immediately; empty text
    /// completes synchronously without scheduling a tick.
    pub fn start<S: TextSink>(&mut self, sink: &mut S, text: &str, now_ms: u64) -> Event {
        self.chars = text.chars().collect();
        self.revealed = 0;

        if self.chars.is_empty() {
            if let Some(prefix) = &self.config.prefix {
                sink.set_text(prefix);
            }
            self.state = TypewriterState::Done;
            self.next_due_ms = None;
            return Event::TypingCompleted {
                chars: 0,
                at: Utc::now(),
            };
        }

        if let Some(prefix) = &self.config.prefix {
            sink.set_text(prefix);
        }
        self.state = TypewriterState::Typing;
        let delay = self.next_delay();
        self.next_due_ms = Some(now_ms + delay);
        Event::TypingStarted {
            chars: self.chars.len(),
            at: Utc::now(),
        }
    }

    /// Call periodically. Reveals at most one character per call once its
    /// delay has elapsed; returns `Some(Event::TypingCompleted)` exactly
    /// once, on the tick that reveals the final character.
    pub fn tick<S: TextSink>(&mut self, sink: &mut S, now_ms: u64) -> Option<Event> {
        if self.state != TypewriterState::Typing {
            return None;
        }
        let due = self.next_due_ms?;
        if now_ms < due {
            return None;
        }

        self.revealed += 1;
        sink.set_text(&self.content(true));

        if self.revealed == self.chars.len() {
            if self.config.caret.is_some() {
                sink.set_text(&self.content(false));
            }
            self.state = TypewriterState::Done;
            self.next_due_ms = None;
            return Some(Event::TypingCompleted {
                chars: self.chars.len(),
                at: Utc::now(),
            });
        }

        let delay = self.next_delay();
        self.next_due_ms = Some(now_ms + delay);
        None
    }

    /// Stop without completing. No further tick mutates the sink; safe at
    /// any time.
    pub fn cancel(&mut self) {
        if self.state == TypewriterState::Typing {
            self.state = TypewriterState::Idle;
        }
        self.next_due_ms = None;
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// `max(0, speed + (±1) × random_int(0, jitter))`.
    fn next_delay(&mut self) -> u64 {
        let speed = self.config.speed_ms;
        if self.config.jitter_ms == 0 {
            return speed;
        }
        let jitter = self.rng.gen_range(0..=self.config.jitter_ms);
        if self.rng.gen_bool(0.5) {
            speed + jitter
        } else {
            speed.saturating_sub(jitter)
        }
    }

    fn content(&self, with_caret: bool) -> String {
        let mut out = String::new();
        if let Some(prefix) = &self.config.prefix {
            out.push_str(prefix);
        }
        out.extend(self.chars.iter().take(self.revealed));
        if with_caret {
            if let Some(caret) = &self.config.caret {
                out.push_str(caret);
            }
        }
        out
    }
}

impl Default for TypewriterRenderer {
    fn default() -> Self {
        Self::new(TypewriterConfig::default())
    }
}
