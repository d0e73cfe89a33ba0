//! In-memory conversation and widget state.
//!
//! Both are owned by the orchestrator behind `Arc<Mutex<_>>` and only change
//! through the methods here.

use std::fmt;
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vista_action::Directive;
use vista_core::Timestamp;
use vista_widget::MountedWidget;

use crate::error::ChatError;
use crate::phase::TurnPhase;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub text: String,
    /// Text revealed so far while streaming.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub displayed_text: Option<String>,
    pub sender: Sender,
    pub timestamp: Timestamp,
    #[serde(default)]
    pub streaming: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directive: Option<Directive>,
}

impl Message {
    fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            displayed_text: None,
            sender,
            timestamp: Timestamp::now(),
            streaming: false,
            directive: None,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, text)
    }

    /// Assistant message that will be filled in by the streaming renderer.
    pub fn streaming_placeholder(text: impl Into<String>, directive: Option<Directive>) -> Self {
        Self {
            displayed_text: Some(String::new()),
            streaming: true,
            directive,
            ..Self::new(Sender::Assistant, text)
        }
    }

    /// What a display should show right now.
    pub fn visible_text(&self) -> &str {
        match &self.displayed_text {
            Some(revealed) if self.streaming => revealed,
            _ => &self.text,
        }
    }

    pub fn format_time(&self) -> String {
        self.timestamp.format_time()
    }
}

/// Partial update applied by [`ConversationState::update_message`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessagePatch {
    pub text: Option<String>,
    pub displayed_text: Option<String>,
    pub streaming: Option<bool>,
}

/// Messages plus the flags describing the turn in flight.
#[derive(Debug, Default)]
pub struct ConversationState {
    messages: Vec<Message>,
    busy: bool,
    thinking: bool,
    phase: TurnPhase,
    generation: u64,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Append a message and return its index.
    pub fn push_message(&mut self, message: Message) -> usize {
        self.messages.push(message);
        self.messages.len() - 1
    }

    /// Apply `patch` to the message at `index`. Out-of-range indices are ignored.
    pub fn update_message(&mut self, index: usize, patch: MessagePatch) -> bool {
        let Some(message) = self.messages.get_mut(index) else {
            tracing::debug!(index, "Ignoring update for missing message");
            return false;
        };
        if let Some(text) = patch.text {
            message.text = text;
        }
        if let Some(displayed) = patch.displayed_text {
            message.displayed_text = Some(displayed);
        }
        if let Some(streaming) = patch.streaming {
            message.streaming = streaming;
        }
        true
    }

    /// Append one character to the revealed text of the message at `index`.
    pub fn append_revealed(&mut self, index: usize, ch: char) -> bool {
        match self.messages.get_mut(index) {
            Some(message) => {
                message.displayed_text.get_or_insert_with(String::new).push(ch);
                true
            }
            None => false,
        }
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    pub fn set_thinking(&mut self, thinking: bool) {
        self.thinking = thinking;
    }

    /// Move to `to`, rejecting transitions the turn lifecycle does not allow.
    pub fn advance(&mut self, to: TurnPhase) -> Result<(), ChatError> {
        if !self.phase.can_transition_to(&to) {
            return Err(ChatError::InvalidTransition(self.phase, to));
        }
        tracing::debug!(from = %self.phase, to = %to, "Turn phase advanced");
        self.phase = to;
        Ok(())
    }

    /// Start a turn: check-and-set busy, append the user message.
    ///
    /// Returns the generation the turn runs under.
    pub fn begin_turn(&mut self, user_message: Message) -> Result<u64, ChatError> {
        if self.busy {
            return Err(ChatError::Busy);
        }
        self.advance(TurnPhase::UserAppended)?;
        self.generation += 1;
        self.messages.push(user_message);
        self.busy = true;
        Ok(self.generation)
    }

    /// Finish a successful turn.
    pub fn finish_turn(&mut self) -> Result<(), ChatError> {
        self.busy = false;
        self.thinking = false;
        self.advance(TurnPhase::Idle)
    }

    /// Fail the turn: clear flags and append `fallback` as an assistant message.
    pub fn fail_turn(&mut self, fallback: &str) {
        self.busy = false;
        self.thinking = false;
        if let Some(last) = self.messages.last_mut() {
            last.streaming = false;
        }
        self.messages.push(Message::assistant(fallback));
        self.phase = TurnPhase::ErrorDisplayed;
    }

    /// Drop every message and invalidate any turn in flight.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.busy = false;
        self.thinking = false;
        self.phase = TurnPhase::Idle;
        self.generation += 1;
    }
}

/// The visualization currently on screen.
#[derive(Debug, Default)]
pub struct WidgetState {
    current: Option<MountedWidget>,
    processing: bool,
    previous_directive: Option<Directive>,
}

impl WidgetState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&MountedWidget> {
        self.current.as_ref()
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn previous_directive(&self) -> Option<&Directive> {
        self.previous_directive.as_ref()
    }

    pub fn set_processing(&mut self, processing: bool) {
        self.processing = processing;
    }

    /// Show `mounted` and remember `directive` for follow-up requests.
    pub fn apply(&mut self, mounted: MountedWidget, directive: Directive) {
        self.current = Some(mounted);
        self.previous_directive = Some(directive);
        self.processing = false;
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.processing = false;
        self.previous_directive = None;
    }
}

/// Lock `mutex`, mapping poisoning to [`ChatError::StatePoisoned`].
pub(crate) fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> Result<MutexGuard<'a, T>, ChatError> {
    mutex
        .lock()
        .map_err(|e| ChatError::StatePoisoned(format!("{} lock poisoned: {}", what, e)))
}
