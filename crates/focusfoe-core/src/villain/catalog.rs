//! Canned antagonist lines, keyed by session phase.
//!
//! The engine ships with a default script the way a timer ships with a
//! default schedule; callers pick from here (or bring their own text) and
//! enqueue on phase transitions.

use crate::flow::FlowState;

/// The default lines for a phase. May be empty for phases where the
/// antagonist stays quiet.
pub fn lines_for(state: FlowState) -> &'static [&'static str] {
    match state {
        FlowState::PreStart => &[
            "Oh, you're back. Let's see how long this lasts.",
            "The clock is ticking. It always is.",
        ],
        FlowState::LockIn => &[
            "Committing already? Bold.",
            "Say it like you mean it this time.",
        ],
        FlowState::FocusSetup => &[
            "Pick something hard. Or don't, I'll enjoy it either way.",
        ],
        FlowState::FocusRunning => &[
            "I'll be watching. Quietly. Mostly.",
            "Every second you drift, I get a little stronger.",
        ],
        FlowState::Checkpoint => &[
            "Pausing? Interesting choice.",
        ],
        FlowState::SelfRate => &[
            "Be honest. I'll know if you aren't.",
        ],
        FlowState::Recap => &[
            "So that happened. Write it down before you forget.",
        ],
        FlowState::RewardGate => &[
            "Fine. You earned it. This once.",
        ],
        FlowState::PostActions => &[
            "Same time tomorrow. Don't make me come find you.",
        ],
    }
}
