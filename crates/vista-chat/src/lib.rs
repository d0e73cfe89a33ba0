//! Conversational turn pipeline for Vista.
//!
//! Classifies user input into a reply and an optional visualization
//! directive, streams the reply character by character, and applies the
//! directive through the widget resolver.

pub mod engine;
pub mod error;
pub mod observer;
pub mod orchestrator;
pub mod phase;
pub mod state;
pub mod stream;
pub mod testing;
pub mod timer;

pub use engine::{AssistantResponse, Responder, ResponseEngine, ResponseRule};
pub use error::ChatError;
pub use observer::{ConversationObserver, NoopObserver};
pub use orchestrator::{ConversationOrchestrator, TurnOutcome, FALLBACK_ERROR_MESSAGE};
pub use phase::TurnPhase;
pub use state::{ConversationState, Message, MessagePatch, Sender, WidgetState};
pub use stream::{MessageRef, RevealOutcome, StreamingRenderer};
pub use timer::{Timer, TokioTimer};
