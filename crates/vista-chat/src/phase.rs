//! Turn phase state machine with validated transitions.
//!
//! A turn moves through:
//! Idle -> UserAppended -> Thinking -> Classified -> Streaming
//! Streaming -> DirectiveValidating -> DirectiveApplied -> Idle
//! Streaming -> DirectiveSkipped -> Idle
//!
//! Any phase may move to ErrorDisplayed, which only returns to Idle.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where the current turn is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    /// No turn in flight.
    #[default]
    Idle,
    /// The user message has been appended.
    UserAppended,
    /// Waiting out the simulated thinking latency.
    Thinking,
    /// The reply and directive have been produced.
    Classified,
    /// The reply is being revealed.
    Streaming,
    /// A directive is being validated and resolved.
    DirectiveValidating,
    /// The directive was applied to the widget state.
    DirectiveApplied,
    /// The reply carried no directive.
    DirectiveSkipped,
    /// The turn failed and the fallback message was shown.
    ErrorDisplayed,
}

impl fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnPhase::Idle => write!(f, "idle"),
            TurnPhase::UserAppended => write!(f, "user_appended"),
            TurnPhase::Thinking => write!(f, "thinking"),
            TurnPhase::Classified => write!(f, "classified"),
            TurnPhase::Streaming => write!(f, "streaming"),
            TurnPhase::DirectiveValidating => write!(f, "directive_validating"),
            TurnPhase::DirectiveApplied => write!(f, "directive_applied"),
            TurnPhase::DirectiveSkipped => write!(f, "directive_skipped"),
            TurnPhase::ErrorDisplayed => write!(f, "error_displayed"),
        }
    }
}

impl TurnPhase {
    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &TurnPhase) -> bool {
        if *target == TurnPhase::ErrorDisplayed {
            return *self != TurnPhase::ErrorDisplayed;
        }
        matches!(
            (self, target),
            (TurnPhase::Idle, TurnPhase::UserAppended)
                | (TurnPhase::UserAppended, TurnPhase::Thinking)
                | (TurnPhase::Thinking, TurnPhase::Classified)
                | (TurnPhase::Classified, TurnPhase::Streaming)
                | (TurnPhase::Streaming, TurnPhase::DirectiveValidating)
                | (TurnPhase::Streaming, TurnPhase::DirectiveSkipped)
                | (TurnPhase::DirectiveValidating, TurnPhase::DirectiveApplied)
                | (TurnPhase::DirectiveApplied, TurnPhase::Idle)
                | (TurnPhase::DirectiveSkipped, TurnPhase::Idle)
                | (TurnPhase::ErrorDisplayed, TurnPhase::Idle)
        )
    }
}
