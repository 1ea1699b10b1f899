//! The antagonist message pipeline: queued lines, dwell-paced dispatch, and
//! the typewriter reveal. Independent of the flow state machine; phase
//! transition handlers enqueue lines opportunistically.

mod catalog;
mod line;
mod queue;
mod typewriter;

pub use catalog::lines_for;
pub use line::VillainLine;
pub use queue::{MessageQueueScheduler, DWELL_CEIL_MS, DWELL_FLOOR_MS, DWELL_PER_CHAR_MS};
pub use typewriter::{
    clear_sink, BufferSink, TextSink, TypewriterConfig, TypewriterRenderer, TypewriterState,
};
