//! Outbound notifications for displays and indicators.

use vista_action::Directive;

use crate::state::Message;

/// Receives state changes from a running turn.
///
/// Every method defaults to a no-op so implementors only handle what they
/// render. Called without any state lock held.
pub trait ConversationObserver: Send + Sync {
    /// The message list changed; `messages` is a snapshot.
    fn messages_changed(&self, _messages: &[Message]) {}

    /// The message at `index` changed in place, e.g. one more character was
    /// revealed. The rest of the list is unchanged.
    fn message_updated(&self, _index: usize, _message: &Message) {}

    /// The busy indicator should be shown or hidden.
    fn busy_changed(&self, _busy: bool) {}

    /// New content was revealed and the view should follow it.
    fn scroll(&self) {}

    /// A directive was validated, resolved and applied.
    fn directive_applied(&self, _directive: &Directive) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ConversationObserver for NoopObserver {}
