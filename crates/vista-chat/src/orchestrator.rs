//! Conversation orchestrator: sequences a single turn end to end.
//!
//! Appends the user message, waits out the thinking latency, classifies,
//! streams the reply and applies any directive. Every failure inside a turn
//! is contained here: it is logged and replaced by a fallback message.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex};

use futures::FutureExt;
use vista_action::{ActionError, ActionValidator, Directive};
use vista_core::ChatConfig;
use vista_widget::{
    MountedWidget, WidgetComponent, WidgetDescriptor, WidgetRegistry, WidgetResolver,
};

use crate::engine::{Responder, ResponseEngine};
use crate::error::ChatError;
use crate::observer::{ConversationObserver, NoopObserver};
use crate::phase::TurnPhase;
use crate::state::{lock, ConversationState, Message, WidgetState};
use crate::stream::{MessageRef, RevealOutcome, StreamingRenderer};
use crate::timer::Timer;

/// Shown in place of a reply when a turn fails.
pub const FALLBACK_ERROR_MESSAGE: &str = "Sorry, an error occurred while processing your message.";

/// How a submitted turn ended.
#[derive(Debug)]
pub enum TurnOutcome {
    /// The reply was fully streamed.
    Completed { directive_applied: bool },
    /// The turn failed and the fallback message was shown.
    Failed,
    /// The input was refused before any state changed.
    Rejected(ChatError),
    /// A reset happened while the turn was running.
    Superseded,
}

impl TurnOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, TurnOutcome::Completed { .. })
    }
}

/// Coordinates responder, renderer, validator and resolver over shared state.
pub struct ConversationOrchestrator {
    responder: Arc<dyn Responder>,
    validator: ActionValidator,
    resolver: WidgetResolver,
    renderer: StreamingRenderer,
    observer: Arc<dyn ConversationObserver>,
    conversation: Arc<Mutex<ConversationState>>,
    widgets: Arc<Mutex<WidgetState>>,
    config: ChatConfig,
}

impl ConversationOrchestrator {
    /// Create an orchestrator using the rule-based engine and default widgets.
    pub fn new(config: ChatConfig, timer: Arc<dyn Timer>) -> Self {
        let responder: Arc<dyn Responder> = Arc::new(ResponseEngine::new(Arc::clone(&timer)));
        let renderer = StreamingRenderer::new(timer, config.typewriter_delay());

        Self {
            responder,
            validator: ActionValidator,
            resolver: WidgetResolver::default(),
            renderer,
            observer: Arc::new(NoopObserver),
            conversation: Arc::new(Mutex::new(ConversationState::new())),
            widgets: Arc::new(Mutex::new(WidgetState::new())),
            config,
        }
    }

    pub fn with_responder(mut self, responder: Arc<dyn Responder>) -> Self {
        self.responder = responder;
        self
    }

    pub fn with_resolver(mut self, resolver: WidgetResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn ConversationObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    // ---- Queries ----

    pub fn messages(&self) -> Result<Vec<Message>, ChatError> {
        Ok(lock(&self.conversation, "conversation")?.messages().to_vec())
    }

    pub fn is_busy(&self) -> Result<bool, ChatError> {
        Ok(lock(&self.conversation, "conversation")?.is_busy())
    }

    pub fn is_thinking(&self) -> Result<bool, ChatError> {
        Ok(lock(&self.conversation, "conversation")?.is_thinking())
    }

    pub fn phase(&self) -> Result<TurnPhase, ChatError> {
        Ok(lock(&self.conversation, "conversation")?.phase())
    }

    /// Descriptor of the widget currently on screen.
    pub fn current_widget(&self) -> Result<Option<WidgetDescriptor>, ChatError> {
        Ok(lock(&self.widgets, "widget")?
            .current()
            .map(|mounted| mounted.descriptor.clone()))
    }

    pub fn previous_directive(&self) -> Result<Option<Directive>, ChatError> {
        Ok(lock(&self.widgets, "widget")?.previous_directive().cloned())
    }

    pub fn widget_processing(&self) -> Result<bool, ChatError> {
        Ok(lock(&self.widgets, "widget")?.is_processing())
    }

    pub fn registry(&self) -> &Arc<WidgetRegistry> {
        self.resolver.registry()
    }

    /// Bind a component name at runtime. The last registration wins.
    pub fn register_widget(
        &self,
        name: impl Into<String>,
        component: Arc<dyn WidgetComponent>,
    ) -> Option<Arc<dyn WidgetComponent>> {
        self.resolver.registry().register(name, component)
    }

    // ---- Turns ----

    /// Run one conversational turn for `text`.
    ///
    /// Never returns an error: failures end as [`TurnOutcome::Failed`] with
    /// the fallback message appended, refused input as
    /// [`TurnOutcome::Rejected`].
    pub async fn submit_turn(&self, text: &str) -> TurnOutcome {
        if let Err(e) = self.check_input(text) {
            tracing::warn!(code = e.code(), error = %e, "Input rejected");
            return TurnOutcome::Rejected(e);
        }

        let (generation, snapshot) = match self.begin_turn(text) {
            Ok(started) => started,
            Err(e) => {
                tracing::warn!(code = e.code(), error = %e, "Turn rejected");
                return TurnOutcome::Rejected(e);
            }
        };
        tracing::info!(generation, "Turn started");

        let turn = async {
            self.observer.messages_changed(&snapshot);
            self.run_turn(text, generation).await
        };
        match AssertUnwindSafe(turn).catch_unwind().await {
            Ok(Ok(outcome)) => {
                tracing::info!(generation, outcome = ?outcome, "Turn finished");
                outcome
            }
            Ok(Err(e)) => self.fail_turn(generation, &e),
            Err(payload) => {
                tracing::error!(panic = %panic_message(payload.as_ref()), "Turn panicked");
                let error = ChatError::Action(ActionError::processing(Some("process_message"), None));
                self.fail_turn(generation, &error)
            }
        }
    }

    fn check_input(&self, text: &str) -> Result<(), ChatError> {
        if text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if text.chars().count() > self.config.max_message_length {
            return Err(ChatError::MessageTooLong(self.config.max_message_length));
        }
        Ok(())
    }

    fn begin_turn(&self, text: &str) -> Result<(u64, Vec<Message>), ChatError> {
        let mut state = lock(&self.conversation, "conversation")?;
        let generation = state.begin_turn(Message::user(text))?;
        Ok((generation, state.messages().to_vec()))
    }

    async fn run_turn(&self, input: &str, generation: u64) -> Result<TurnOutcome, ChatError> {
        let started = self.with_current(generation, |state| {
            state.set_thinking(true);
            state.advance(TurnPhase::Thinking)
        })?;
        if started.is_none() {
            return Ok(TurnOutcome::Superseded);
        }
        self.observer.busy_changed(true);

        self.responder
            .simulate_latency(self.config.thinking_delay())
            .await;

        let still_current = self.with_current(generation, |state| {
            state.set_thinking(false);
            Ok(())
        })?;
        if still_current.is_none() {
            return Ok(TurnOutcome::Superseded);
        }

        let previous = lock(&self.widgets, "widget")?.previous_directive().cloned();
        let response = self.responder.respond(input, previous.as_ref()).await?;
        tracing::debug!(
            directive = ?response.directive.as_ref().map(Directive::kind),
            "Response classified"
        );

        let index = self.with_current(generation, |state| {
            state.advance(TurnPhase::Classified)?;
            let index = state.push_message(Message::streaming_placeholder(
                response.message.clone(),
                response.directive.clone(),
            ));
            state.advance(TurnPhase::Streaming)?;
            Ok(index)
        })?;
        let Some(index) = index else {
            return Ok(TurnOutcome::Superseded);
        };

        let target = MessageRef { index, generation };
        match self
            .renderer
            .reveal(&self.conversation, target, &response.message, self.observer.as_ref())
            .await?
        {
            RevealOutcome::Completed => {}
            RevealOutcome::Superseded => return Ok(TurnOutcome::Superseded),
            RevealOutcome::MissingTarget => {
                return Err(ChatError::Response("reply message disappeared".to_string()))
            }
        }

        let directive_applied = match response.directive {
            Some(directive) => {
                if !self.apply_directive(generation, directive)? {
                    return Ok(TurnOutcome::Superseded);
                }
                true
            }
            None => {
                let skipped =
                    self.with_current(generation, |state| state.advance(TurnPhase::DirectiveSkipped))?;
                if skipped.is_none() {
                    return Ok(TurnOutcome::Superseded);
                }
                false
            }
        };

        let snapshot = self.with_current(generation, |state| {
            state.finish_turn()?;
            Ok(state.messages().to_vec())
        })?;
        let Some(snapshot) = snapshot else {
            return Ok(TurnOutcome::Superseded);
        };
        self.observer.busy_changed(false);
        self.observer.messages_changed(&snapshot);
        self.observer.scroll();

        Ok(TurnOutcome::Completed { directive_applied })
    }

    /// Validate, resolve and apply `directive` for the turn `generation`.
    ///
    /// Returns `Ok(false)` when the turn was superseded.
    fn apply_directive(&self, generation: u64, directive: Directive) -> Result<bool, ChatError> {
        let started = self.with_current(generation, |state| {
            state.advance(TurnPhase::DirectiveValidating)
        })?;
        if started.is_none() {
            return Ok(false);
        }

        lock(&self.widgets, "widget")?.set_processing(true);
        let mounted = match self.validate_and_mount(&directive) {
            Ok(mounted) => mounted,
            Err(e) => {
                lock(&self.widgets, "widget")?.set_processing(false);
                return Err(e);
            }
        };

        {
            let mut conversation = lock(&self.conversation, "conversation")?;
            let mut widgets = lock(&self.widgets, "widget")?;
            if !conversation.is_current(generation) {
                widgets.set_processing(false);
                return Ok(false);
            }
            widgets.apply(mounted, directive.clone());
            conversation.advance(TurnPhase::DirectiveApplied)?;
        }

        tracing::info!(
            directive = directive.kind(),
            title = ?directive.title(),
            "Directive applied"
        );
        self.observer.directive_applied(&directive);
        Ok(true)
    }

    fn validate_and_mount(&self, directive: &Directive) -> Result<MountedWidget, ChatError> {
        self.validator.check(directive)?;
        Ok(self.resolver.mount(directive)?)
    }

    /// Show a directive that did not come from a turn, e.g. decoded JSON.
    ///
    /// Refused while a turn is running. On success it becomes the previous
    /// directive for follow-up requests.
    pub fn show_directive(&self, directive: Directive) -> Result<(), ChatError> {
        if lock(&self.conversation, "conversation")?.is_busy() {
            return Err(ChatError::Busy);
        }
        let mounted = self.validate_and_mount(&directive)?;
        lock(&self.widgets, "widget")?.apply(mounted, directive.clone());
        tracing::info!(
            directive = directive.kind(),
            title = ?directive.title(),
            "Directive shown"
        );
        self.observer.directive_applied(&directive);
        Ok(())
    }

    /// Run `f` against the conversation if `generation` is still current.
    fn with_current<R>(
        &self,
        generation: u64,
        f: impl FnOnce(&mut ConversationState) -> Result<R, ChatError>,
    ) -> Result<Option<R>, ChatError> {
        let mut state = lock(&self.conversation, "conversation")?;
        if !state.is_current(generation) {
            tracing::debug!(generation, "Turn superseded");
            return Ok(None);
        }
        f(&mut state).map(Some)
    }

    fn fail_turn(&self, generation: u64, error: &ChatError) -> TurnOutcome {
        report_error(error);

        let snapshot = {
            let mut state = self.conversation.lock().unwrap_or_else(|e| {
                tracing::warn!("Conversation lock poisoned while failing turn");
                e.into_inner()
            });
            self.conversation.clear_poison();
            if !state.is_current(generation) {
                return TurnOutcome::Superseded;
            }
            state.fail_turn(FALLBACK_ERROR_MESSAGE);
            let snapshot = state.messages().to_vec();
            if let Err(e) = state.advance(TurnPhase::Idle) {
                tracing::warn!(error = %e, "Could not return to idle after failure");
            }
            snapshot
        };
        {
            let mut widgets = self.widgets.lock().unwrap_or_else(|e| e.into_inner());
            self.widgets.clear_poison();
            widgets.set_processing(false);
        }

        // State is settled above; a panicking observer must not undo that.
        let notified = std::panic::catch_unwind(AssertUnwindSafe(|| {
            self.observer.busy_changed(false);
            self.observer.messages_changed(&snapshot);
            self.observer.scroll();
        }));
        if notified.is_err() {
            tracing::error!("Observer panicked while reporting a failed turn");
        }
        TurnOutcome::Failed
    }

    /// Clear the conversation and the widget, abandoning any turn in flight.
    pub fn reset(&self) -> Result<(), ChatError> {
        let (snapshot, was_busy) = {
            let mut conversation = lock(&self.conversation, "conversation")?;
            let mut widgets = lock(&self.widgets, "widget")?;
            let was_busy = conversation.is_busy();
            conversation.clear();
            widgets.clear();
            (conversation.messages().to_vec(), was_busy)
        };

        tracing::info!(was_busy, "Conversation reset");
        if was_busy {
            self.observer.busy_changed(false);
        }
        self.observer.messages_changed(&snapshot);
        Ok(())
    }
}

/// Best-effort text of a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}

/// Log a turn failure with its kind, code and cause chain.
fn report_error(error: &ChatError) {
    let mut causes = Vec::new();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        causes.push(cause.to_string());
        source = cause.source();
    }
    tracing::error!(
        kind = error.kind(),
        code = error.code(),
        error = %error,
        causes = ?causes,
        "Turn failed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::AssistantResponse;
    use crate::testing::{MockResponder, RecordingObserver, RecordingTimer};
    use async_trait::async_trait;
    use std::time::Duration;
    use vista_action::ChartDirective;

    struct PanickingResponder;

    #[async_trait]
    impl Responder for PanickingResponder {
        async fn simulate_latency(&self, _duration: Duration) {}

        async fn respond(
            &self,
            _input: &str,
            _previous: Option<&Directive>,
        ) -> Result<AssistantResponse, ChatError> {
            panic!("responder blew up");
        }
    }

    struct PanickingObserver;

    impl ConversationObserver for PanickingObserver {
        fn busy_changed(&self, _busy: bool) {
            panic!("indicator blew up");
        }
    }

    fn orchestrator() -> (ConversationOrchestrator, Arc<RecordingObserver>) {
        let observer = Arc::new(RecordingObserver::new());
        let orch = ConversationOrchestrator::new(ChatConfig::default(), Arc::new(RecordingTimer::new()))
            .with_observer(observer.clone());
        (orch, observer)
    }

    fn with_mock(responder: Arc<MockResponder>) -> (ConversationOrchestrator, Arc<RecordingObserver>) {
        let (orch, observer) = orchestrator();
        (orch.with_responder(responder), observer)
    }

    fn fallback_count(orch: &ConversationOrchestrator) -> usize {
        orch.messages()
            .unwrap()
            .iter()
            .filter(|m| m.text == FALLBACK_ERROR_MESSAGE)
            .count()
    }

    #[tokio::test]
    async fn test_greeting_turn() {
        let (orch, observer) = orchestrator();
        let outcome = orch.submit_turn("hello").await;
        assert!(matches!(
            outcome,
            TurnOutcome::Completed {
                directive_applied: false
            }
        ));

        let messages = orch.messages().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].text, "hello");
        assert_eq!(messages[1].text, "Hello handsome");
        assert!(!messages[1].streaming);
        assert!(!orch.is_busy().unwrap());
        assert!(!orch.is_thinking().unwrap());
        assert_eq!(orch.phase().unwrap(), TurnPhase::Idle);
        assert_eq!(observer.busy_transitions(), vec![true, false]);
        assert!(orch.current_widget().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sales_turn_applies_chart() {
        let (orch, observer) = orchestrator();
        let outcome = orch.submit_turn("show sales").await;
        assert!(matches!(
            outcome,
            TurnOutcome::Completed {
                directive_applied: true
            }
        ));

        let widget = orch.current_widget().unwrap().unwrap();
        assert_eq!(widget.component_name, "WidgetChart");
        assert_eq!(widget.props["title"], "Sales Overview");
        assert!(matches!(
            orch.previous_directive().unwrap(),
            Some(Directive::Chart(_))
        ));
        assert!(!orch.widget_processing().unwrap());
        assert_eq!(observer.applied_directives().len(), 1);

        let reply = orch.messages().unwrap().pop().unwrap();
        assert!(reply.directive.is_some());
    }

    #[tokio::test]
    async fn test_invalid_directive_fails_turn() {
        let responder = Arc::new(MockResponder::new());
        responder.queue_response(
            "Here is a chart",
            Some(Directive::Chart(ChartDirective::new(
                "Broken",
                vec![1.0, 2.0],
                vec!["a".into()],
            ))),
        );
        let (orch, observer) = with_mock(responder);

        let outcome = orch.submit_turn("chart please").await;
        assert!(matches!(outcome, TurnOutcome::Failed));
        assert!(!orch.is_busy().unwrap());
        assert_eq!(fallback_count(&orch), 1);
        assert!(orch.current_widget().unwrap().is_none());
        assert!(orch.previous_directive().unwrap().is_none());
        assert!(!orch.widget_processing().unwrap());
        assert_eq!(observer.busy_transitions(), vec![true, false]);
        assert_eq!(orch.phase().unwrap(), TurnPhase::Idle);
    }

    #[tokio::test]
    async fn test_responder_error_fails_turn() {
        let responder = Arc::new(MockResponder::new());
        responder.queue_error(ChatError::Response("backend down".into()));
        let (orch, _observer) = with_mock(responder);

        assert!(matches!(orch.submit_turn("x").await, TurnOutcome::Failed));
        let messages = orch.messages().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].text, FALLBACK_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_unsupported_directive_fails_turn() {
        let responder = Arc::new(MockResponder::new());
        responder.queue_response("metric", Some(Directive::Unsupported));
        let (orch, _observer) = with_mock(responder);

        assert!(matches!(orch.submit_turn("x").await, TurnOutcome::Failed));
        assert_eq!(fallback_count(&orch), 1);
    }

    #[tokio::test]
    async fn test_missing_widget_fails_turn() {
        let (orch, _observer) = orchestrator();
        let orch = orch.with_resolver(WidgetResolver::new(Arc::new(WidgetRegistry::empty())));

        assert!(matches!(orch.submit_turn("show sales").await, TurnOutcome::Failed));
        assert_eq!(fallback_count(&orch), 1);
        assert!(!orch.is_busy().unwrap());
    }

    #[tokio::test]
    async fn test_panicking_responder_fails_turn() {
        let (orch, _observer) = orchestrator();
        let orch = orch.with_responder(Arc::new(PanickingResponder));

        let outcome = orch.submit_turn("hello").await;
        assert!(matches!(outcome, TurnOutcome::Failed));
        assert!(!orch.is_busy().unwrap());
        assert!(!orch.is_thinking().unwrap());
        assert_eq!(orch.phase().unwrap(), TurnPhase::Idle);
        assert_eq!(fallback_count(&orch), 1);

        // Not stuck busy: the next turn runs (and fails the same way).
        assert!(matches!(orch.submit_turn("again").await, TurnOutcome::Failed));
        assert_eq!(fallback_count(&orch), 2);
    }

    #[tokio::test]
    async fn test_panicking_observer_fails_turn() {
        let orch = ConversationOrchestrator::new(ChatConfig::default(), Arc::new(RecordingTimer::new()))
            .with_observer(Arc::new(PanickingObserver));

        assert!(matches!(orch.submit_turn("hello").await, TurnOutcome::Failed));
        assert!(!orch.is_busy().unwrap());
        let messages = orch.messages().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].text, FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn test_panic_message_payloads() {
        let owned: Box<dyn Any + Send> = Box::new(String::from("owned"));
        let borrowed: Box<dyn Any + Send> = Box::new("static");
        let other: Box<dyn Any + Send> = Box::new(7u8);
        assert_eq!(panic_message(owned.as_ref()), "owned");
        assert_eq!(panic_message(borrowed.as_ref()), "static");
        assert_eq!(panic_message(other.as_ref()), "non-string panic payload");
    }

    #[tokio::test]
    async fn test_turn_after_failure_succeeds() {
        let responder = Arc::new(MockResponder::new());
        responder.queue_error(ChatError::Response("first".into()));
        responder.queue_response("fine", None);
        let (orch, _observer) = with_mock(responder);

        orch.submit_turn("a").await;
        assert!(orch.submit_turn("b").await.is_completed());
        assert_eq!(orch.messages().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_empty_input_rejected_without_state_change() {
        let (orch, observer) = orchestrator();
        let outcome = orch.submit_turn("   ").await;
        assert!(matches!(outcome, TurnOutcome::Rejected(ChatError::EmptyMessage)));
        assert!(orch.messages().unwrap().is_empty());
        assert!(observer.events().is_empty());
    }

    #[tokio::test]
    async fn test_long_input_rejected() {
        let config = ChatConfig {
            max_message_length: 5,
            ..ChatConfig::default()
        };
        let orch = ConversationOrchestrator::new(config, Arc::new(RecordingTimer::new()));
        let outcome = orch.submit_turn("too long").await;
        assert!(matches!(outcome, TurnOutcome::Rejected(ChatError::MessageTooLong(5))));
        assert!(orch.messages().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_previous_directive_passed_to_responder() {
        let responder = Arc::new(MockResponder::new());
        let chart = Directive::Chart(ChartDirective::new("S", vec![1.0], vec!["a".into()]));
        responder.queue_response("chart", Some(chart.clone()));
        responder.queue_response("ok", None);
        let (orch, _observer) = with_mock(responder.clone());

        orch.submit_turn("one").await;
        orch.submit_turn("two").await;
        let requests = responder.recorded_requests();
        assert_eq!(requests[0], ("one".to_string(), None));
        assert_eq!(requests[1], ("two".to_string(), Some(chart)));
    }

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let (orch, observer) = orchestrator();
        orch.submit_turn("show sales").await;
        orch.reset().unwrap();

        assert!(orch.messages().unwrap().is_empty());
        assert!(orch.current_widget().unwrap().is_none());
        assert!(orch.previous_directive().unwrap().is_none());
        assert_eq!(orch.phase().unwrap(), TurnPhase::Idle);
        assert_eq!(observer.last_messages(), Some(vec![]));
    }

    #[tokio::test]
    async fn test_show_directive_applies_outside_turn() {
        let (orch, observer) = orchestrator();
        let chart = Directive::Chart(ChartDirective::new("Ext", vec![1.0], vec!["a".into()]));
        orch.show_directive(chart.clone()).unwrap();
        assert_eq!(orch.previous_directive().unwrap(), Some(chart));
        assert_eq!(observer.applied_directives().len(), 1);

        let err = orch.show_directive(Directive::Unsupported).unwrap_err();
        assert_eq!(err.kind(), "ActionError");
    }

    #[test]
    fn test_register_widget_returns_previous() {
        #[derive(Debug)]
        struct Custom;
        impl WidgetComponent for Custom {
            fn name(&self) -> &str {
                "custom"
            }
        }

        let (orch, _observer) = orchestrator();
        assert!(orch.register_widget("WidgetCustom", Arc::new(Custom)).is_none());
        assert!(orch.registry().has("WidgetCustom"));
        let previous = orch.register_widget("WidgetChart", Arc::new(Custom)).unwrap();
        assert_eq!(previous.name(), "WidgetChart");
    }

    #[test]
    fn test_report_error_handles_chain() {
        let err: ChatError = vista_action::ActionError::processing(
            Some("decode"),
            Some(Box::new(std::io::Error::other("truncated"))),
        )
        .into();
        report_error(&err);
        assert_eq!(err.code(), "ACTION_ERROR");
    }
}
