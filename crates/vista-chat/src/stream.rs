//! Typewriter-style reveal of assistant replies.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::ChatError;
use crate::observer::ConversationObserver;
use crate::state::{lock, ConversationState, MessagePatch};
use crate::timer::Timer;

/// Addresses a message within a specific turn generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef {
    pub index: usize,
    pub generation: u64,
}

/// How a reveal ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Every character was revealed and the message finalized.
    Completed,
    /// The target message did not exist; nothing was changed.
    MissingTarget,
    /// The conversation moved on (reset) before the reveal finished.
    Superseded,
}

/// Reveals text one character at a time with a fixed delay.
pub struct StreamingRenderer {
    timer: Arc<dyn Timer>,
    char_delay: Duration,
}

impl StreamingRenderer {
    pub fn new(timer: Arc<dyn Timer>, char_delay: Duration) -> Self {
        Self { timer, char_delay }
    }

    /// Reveal `full_text` into the message at `target`.
    ///
    /// Each step re-checks the generation so a reset stops a stale stream
    /// without touching the new conversation. The state lock is released
    /// before every suspension.
    pub async fn reveal(
        &self,
        conversation: &Mutex<ConversationState>,
        target: MessageRef,
        full_text: &str,
        observer: &dyn ConversationObserver,
    ) -> Result<RevealOutcome, ChatError> {
        {
            let mut state = lock(conversation, "conversation")?;
            if !state.is_current(target.generation) {
                return Ok(RevealOutcome::Superseded);
            }
            let marked = state.update_message(
                target.index,
                MessagePatch {
                    displayed_text: Some(String::new()),
                    streaming: Some(true),
                    ..Default::default()
                },
            );
            if !marked {
                tracing::debug!(index = target.index, "Reveal target missing");
                return Ok(RevealOutcome::MissingTarget);
            }
        }

        for ch in full_text.chars() {
            let updated = {
                let mut state = lock(conversation, "conversation")?;
                if !state.is_current(target.generation) {
                    tracing::debug!(generation = target.generation, "Reveal superseded");
                    return Ok(RevealOutcome::Superseded);
                }
                if !state.append_revealed(target.index, ch) {
                    return Ok(RevealOutcome::MissingTarget);
                }
                match state.messages().get(target.index) {
                    Some(message) => message.clone(),
                    None => return Ok(RevealOutcome::MissingTarget),
                }
            };
            observer.message_updated(target.index, &updated);
            self.timer.sleep(self.char_delay).await;
            observer.scroll();
        }

        let mut state = lock(conversation, "conversation")?;
        if !state.is_current(target.generation) {
            return Ok(RevealOutcome::Superseded);
        }
        state.update_message(
            target.index,
            MessagePatch {
                text: Some(full_text.to_string()),
                streaming: Some(false),
                ..Default::default()
            },
        );
        Ok(RevealOutcome::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Message;
    use crate::testing::{ObservedEvent, RecordingObserver, RecordingTimer};

    fn setup(text: &str) -> (Mutex<ConversationState>, MessageRef) {
        let mut state = ConversationState::new();
        let generation = state.begin_turn(Message::user("q")).unwrap();
        let index = state.push_message(Message::streaming_placeholder(text, None));
        (Mutex::new(state), MessageRef { index, generation })
    }

    fn renderer(timer: Arc<RecordingTimer>) -> StreamingRenderer {
        StreamingRenderer::new(timer, Duration::from_millis(30))
    }

    #[tokio::test]
    async fn test_reveal_hi_in_two_steps() {
        let (conversation, target) = setup("Hi");
        let timer = Arc::new(RecordingTimer::new());
        let observer = RecordingObserver::new();

        let outcome = renderer(timer.clone())
            .reveal(&conversation, target, "Hi", &observer)
            .await
            .unwrap();

        assert_eq!(outcome, RevealOutcome::Completed);
        assert_eq!(observer.revealed_texts(), vec!["H", "Hi"]);
        // Per-character updates carry only the target message.
        assert!(observer
            .events()
            .iter()
            .all(|e| !matches!(e, ObservedEvent::Messages(_))));
        assert_eq!(observer.scroll_count(), 2);
        assert_eq!(timer.sleeps(), vec![Duration::from_millis(30); 2]);

        let state = conversation.lock().unwrap();
        let msg = &state.messages()[target.index];
        assert!(!msg.streaming);
        assert_eq!(msg.text, "Hi");
        assert_eq!(msg.visible_text(), "Hi");
    }

    #[tokio::test]
    async fn test_reveal_updates_address_target_index() {
        let (conversation, target) = setup("ok");
        let observer = RecordingObserver::new();
        renderer(Arc::new(RecordingTimer::new()))
            .reveal(&conversation, target, "ok", &observer)
            .await
            .unwrap();

        let updates: Vec<(usize, String)> = observer
            .events()
            .into_iter()
            .filter_map(|e| match e {
                ObservedEvent::MessageUpdated(index, msg) => {
                    Some((index, msg.visible_text().to_string()))
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            updates,
            vec![(target.index, "o".to_string()), (target.index, "ok".to_string())]
        );
    }

    #[tokio::test]
    async fn test_reveal_counts_unicode_scalars() {
        let (conversation, target) = setup("héllo");
        let timer = Arc::new(RecordingTimer::new());
        renderer(timer.clone())
            .reveal(&conversation, target, "héllo", &RecordingObserver::new())
            .await
            .unwrap();
        assert_eq!(timer.sleeps().len(), 5);
    }

    #[tokio::test]
    async fn test_reveal_empty_text_finalizes_immediately() {
        let (conversation, target) = setup("");
        let timer = Arc::new(RecordingTimer::new());
        let observer = RecordingObserver::new();
        let outcome = renderer(timer.clone())
            .reveal(&conversation, target, "", &observer)
            .await
            .unwrap();
        assert_eq!(outcome, RevealOutcome::Completed);
        assert!(timer.sleeps().is_empty());
        assert!(observer.events().is_empty());
        assert!(!conversation.lock().unwrap().messages()[target.index].streaming);
    }

    #[tokio::test]
    async fn test_reveal_missing_target_is_noop() {
        let (conversation, target) = setup("Hi");
        let missing = MessageRef {
            index: 42,
            ..target
        };
        let observer = RecordingObserver::new();
        let outcome = renderer(Arc::new(RecordingTimer::new()))
            .reveal(&conversation, missing, "Hi", &observer)
            .await
            .unwrap();
        assert_eq!(outcome, RevealOutcome::MissingTarget);
        assert!(observer.events().is_empty());
        assert_eq!(conversation.lock().unwrap().messages().len(), 2);
    }

    #[tokio::test]
    async fn test_reveal_stale_generation_is_superseded() {
        let (conversation, target) = setup("Hi");
        conversation.lock().unwrap().clear();
        let outcome = renderer(Arc::new(RecordingTimer::new()))
            .reveal(&conversation, target, "Hi", &RecordingObserver::new())
            .await
            .unwrap();
        assert_eq!(outcome, RevealOutcome::Superseded);
        assert!(conversation.lock().unwrap().messages().is_empty());
    }
}
