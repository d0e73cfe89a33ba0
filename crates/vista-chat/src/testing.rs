//! Mock collaborators for driving turns deterministically.
//!
//! No real delays unless asked for and no terminal; everything is recorded
//! for assertions.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use vista_action::Directive;

use crate::engine::{AssistantResponse, Responder};
use crate::error::ChatError;
use crate::observer::ConversationObserver;
use crate::state::{Message, Sender};
use crate::timer::Timer;

// ============================================================================
// Recording Timer
// ============================================================================

/// Timer that returns immediately and records every requested delay.
#[derive(Debug, Default)]
pub struct RecordingTimer {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Timer for RecordingTimer {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
        tokio::task::yield_now().await;
    }
}

// ============================================================================
// Recording Observer
// ============================================================================

/// One notification received by [`RecordingObserver`].
#[derive(Debug, Clone, PartialEq)]
pub enum ObservedEvent {
    Messages(Vec<Message>),
    MessageUpdated(usize, Message),
    Busy(bool),
    Scroll,
    DirectiveApplied(Directive),
}

/// Observer that records every notification in order.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ObservedEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ObservedEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Busy indicator values in the order they were reported.
    pub fn busy_transitions(&self) -> Vec<bool> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ObservedEvent::Busy(b) => Some(b),
                _ => None,
            })
            .collect()
    }

    /// Visible text of the last assistant message at each display update.
    pub fn revealed_texts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ObservedEvent::Messages(msgs) => msgs
                    .iter()
                    .rev()
                    .find(|m| m.sender == Sender::Assistant)
                    .map(|m| m.visible_text().to_string()),
                ObservedEvent::MessageUpdated(_, m) if m.sender == Sender::Assistant => {
                    Some(m.visible_text().to_string())
                }
                _ => None,
            })
            .collect()
    }

    pub fn scroll_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ObservedEvent::Scroll))
            .count()
    }

    pub fn applied_directives(&self) -> Vec<Directive> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ObservedEvent::DirectiveApplied(d) => Some(d),
                _ => None,
            })
            .collect()
    }

    /// The most recent message snapshot, if any.
    pub fn last_messages(&self) -> Option<Vec<Message>> {
        self.events().into_iter().rev().find_map(|e| match e {
            ObservedEvent::Messages(msgs) => Some(msgs),
            _ => None,
        })
    }

    fn record(&self, event: ObservedEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl ConversationObserver for RecordingObserver {
    fn messages_changed(&self, messages: &[Message]) {
        self.record(ObservedEvent::Messages(messages.to_vec()));
    }

    fn message_updated(&self, index: usize, message: &Message) {
        self.record(ObservedEvent::MessageUpdated(index, message.clone()));
    }

    fn busy_changed(&self, busy: bool) {
        self.record(ObservedEvent::Busy(busy));
    }

    fn scroll(&self) {
        self.record(ObservedEvent::Scroll);
    }

    fn directive_applied(&self, directive: &Directive) {
        self.record(ObservedEvent::DirectiveApplied(directive.clone()));
    }
}

// ============================================================================
// Mock Responder
// ============================================================================

/// Responder that returns queued responses in order.
#[derive(Debug, Default)]
pub struct MockResponder {
    responses: Mutex<VecDeque<Result<AssistantResponse, ChatError>>>,
    /// Inputs seen, with the previous directive passed alongside.
    pub requests: Mutex<Vec<(String, Option<Directive>)>>,
    sleeps_on_latency: bool,
}

impl MockResponder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `simulate_latency` sleep on the tokio clock for the full
    /// duration, so tests under `start_paused` can act mid-thinking.
    pub fn with_real_latency(mut self) -> Self {
        self.sleeps_on_latency = true;
        self
    }

    /// Queue a successful response.
    pub fn queue_response(&self, message: impl Into<String>, directive: Option<Directive>) {
        self.responses.lock().unwrap().push_back(Ok(AssistantResponse {
            message: message.into(),
            directive,
        }));
    }

    /// Queue a failure.
    pub fn queue_error(&self, error: ChatError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_requests(&self) -> Vec<(String, Option<Directive>)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Responder for MockResponder {
    async fn simulate_latency(&self, duration: Duration) {
        if self.sleeps_on_latency {
            tokio::time::sleep(duration).await;
        } else {
            tokio::task::yield_now().await;
        }
    }

    async fn respond(
        &self,
        input: &str,
        previous: Option<&Directive>,
    ) -> Result<AssistantResponse, ChatError> {
        self.requests
            .lock()
            .unwrap()
            .push((input.to_string(), previous.cloned()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ChatError::Response("no mock response queued".into())))
    }
}
