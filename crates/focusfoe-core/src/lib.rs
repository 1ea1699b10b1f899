//! # Focusfoe Core Library
//!
//! This library provides the core session engine for Focusfoe, a gamified
//! focus-session companion. The user commits to a timed focus block, the
//! engine captures a voluntary "ready" tap during the pre-start countdown,
//! computes a performance multiplier from it, and walks the session through
//! a fixed sequence of phases while an in-app antagonist delivers its lines
//! on a paced cadence.
//!
//! ## Architecture
//!
//! - **Timed components are wall-clock state machines**: no internal
//!   threads, the caller invokes `tick(now_ms)` periodically and applies
//!   the returned events. Teardown (`cancel()` / `clear()`) is safe at any
//!   time and nothing fires afterwards.
//! - **Events**: every externally meaningful state change produces an
//!   [`Event`]; the rendering layer polls for them.
//! - **Single-owner session state**: the [`Session`] record is mutated only
//!   through its narrow entry points, never directly by other components.
//!
//! ## Key Components
//!
//! - [`Session`] / [`flow::transition`]: lifecycle state machine
//! - [`PrestartTimer`]: countdown and one-shot ready capture
//! - [`scoring`]: pure multiplier and score functions
//! - [`MessageQueueScheduler`]: FIFO, dwell-paced antagonist line delivery
//! - [`TypewriterRenderer`]: char-by-char text reveal with jitter

pub mod config;
pub mod error;
pub mod events;
pub mod export;
pub mod flow;
pub mod prestart;
pub mod scoring;
pub mod session;
pub mod villain;

pub use config::EngineConfig;
pub use error::{ConfigError, CoreError, TransitionError, ValidationError};
pub use events::Event;
pub use export::{CompletionRecord, LocalSnapshot, WeatherSnapshot};
pub use flow::{FlowAction, FlowState};
pub use prestart::PrestartTimer;
pub use scoring::{session_multiplier, session_score, MultiplierInput, WrapGrade};
pub use session::Session;
pub use villain::{
    BufferSink, MessageQueueScheduler, TextSink, TypewriterConfig, TypewriterRenderer,
    TypewriterState, VillainLine,
};
