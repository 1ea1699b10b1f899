//! Session lifecycle state machine.
//!
//! The nine phases form a directed path with a small number of back-edges.
//! [`transition`] is the single source of truth: a pure function over the
//! declared table. Undefined `(state, action)` pairs fail with
//! [`TransitionError::InvalidTransition`] rather than silently returning
//! the same state.
//!
//! ```text
//! PreStart -> LockIn -> FocusSetup -> FocusRunning <-> Checkpoint
//!                                          |               |
//!                                          v               v
//!                                       SelfRate -> Recap -> RewardGate -> PostActions
//! ```

use serde::{Deserialize, Serialize};

use crate::error::TransitionError;

/// One of the nine phases a session passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    PreStart,
    LockIn,
    FocusSetup,
    FocusRunning,
    Checkpoint,
    SelfRate,
    Recap,
    RewardGate,
    PostActions,
}

impl FlowState {
    /// All nine states, in path order.
    pub const ALL: [FlowState; 9] = [
        FlowState::PreStart,
        FlowState::LockIn,
        FlowState::FocusSetup,
        FlowState::FocusRunning,
        FlowState::Checkpoint,
        FlowState::SelfRate,
        FlowState::Recap,
        FlowState::RewardGate,
        FlowState::PostActions,
    ];
}

/// An action a caller may attempt against the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowAction {
    LockIn,
    Confirm,
    Begin,
    Pause,
    Resume,
    Finish,
    SubmitRating,
    Continue,
    Claim,
    Skip,
    Back,
    Discard,
    /// Valid from every state; returns to `PreStart`.
    Reset,
}

/// Compute the next state for `(current, action)`.
///
/// Pure and total over the declared table. Callers apply the returned
/// state; nothing is mutated here.
pub fn transition(current: FlowState, action: FlowAction) -> Result<FlowState, TransitionError> {
    use FlowAction as A;
    use FlowState as S;

    let next = match (current, action) {
        (_, A::Reset) => S::PreStart,

        (S::PreStart, A::LockIn) => S::LockIn,

        (S::LockIn, A::Confirm) => S::FocusSetup,
        (S::LockIn, A::Back) => S::PreStart,

        (S::FocusSetup, A::Begin) => S::FocusRunning,
        (S::FocusSetup, A::Back) => S::LockIn,

        (S::FocusRunning, A::Pause) => S::Checkpoint,
        (S::FocusRunning, A::Finish) => S::SelfRate,

        (S::Checkpoint, A::Resume) => S::FocusRunning,
        (S::Checkpoint, A::Finish) => S::SelfRate,

        (S::SelfRate, A::SubmitRating) => S::Recap,
        (S::SelfRate, A::Discard) => S::PreStart,

        (S::Recap, A::Continue) => S::RewardGate,
        (S::Recap, A::Discard) => S::PreStart,

        (S::RewardGate, A::Claim) => S::PostActions,
        (S::RewardGate, A::Skip) => S::PostActions,

        (state, action) => return Err(TransitionError::InvalidTransition { state, action }),
    };
    Ok(next)
}
