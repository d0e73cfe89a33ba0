//! Error types for the conversation pipeline.

use vista_action::ActionError;
use vista_widget::WidgetError;

use crate::phase::TurnPhase;

/// Errors from the chat engine.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("a turn is already in progress")]
    Busy,
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
    #[error("invalid turn transition: {0} -> {1}")]
    InvalidTransition(TurnPhase, TurnPhase),
    #[error("state lock poisoned: {0}")]
    StatePoisoned(String),
    #[error("response error: {0}")]
    Response(String),
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error(transparent)]
    Widget(#[from] WidgetError),
}

impl ChatError {
    /// Error family tag used when reporting.
    pub fn kind(&self) -> &'static str {
        match self {
            ChatError::Action(_) => "ActionError",
            ChatError::Widget(_) => "WidgetError",
            _ => "ChatError",
        }
    }

    /// Stable machine-readable code, used in logs.
    pub fn code(&self) -> &'static str {
        match self {
            ChatError::Busy => "CHAT_BUSY",
            ChatError::EmptyMessage => "EMPTY_MESSAGE",
            ChatError::MessageTooLong(_) => "MESSAGE_TOO_LONG",
            ChatError::InvalidTransition(_, _) => "INVALID_TRANSITION",
            ChatError::StatePoisoned(_) => "STATE_POISONED",
            ChatError::Response(_) => "RESPONSE_ERROR",
            ChatError::Action(err) => err.code(),
            ChatError::Widget(err) => err.code(),
        }
    }
}
