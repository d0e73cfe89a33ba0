//! Rule-based response engine.
//!
//! Classifies lowercased input against a fixed, ordered rule list; the first
//! matching rule decides the reply and the optional directive. The previous
//! directive is consulted so follow-ups like "show it as a table instead"
//! can rewrite what is already on screen.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use vista_action::{ActionTransformer, ChartDirective, Directive};

use crate::error::ChatError;
use crate::timer::Timer;

pub const SWITCH_TO_LIST_REPLY: &str = "Sure, switching to list view.";
pub const SWITCH_TO_CHART_REPLY: &str = "Sure, switching to chart view.";
pub const SALES_REPLY: &str = "I've analyzed the 2025 data. Revenue is up 15%.";
pub const GREETING_REPLY: &str = "Hello handsome";
pub const DEFAULT_REPLY: &str = "Please type 'sales' to see a sample chart.";

/// Thinking latency used when the caller has no configured value.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(2000);

const SALES_KEYWORDS: [&str; 4] = ["sale", "analyze", "chart", "show"];
const GREETING_KEYWORDS: [&str; 2] = ["hello", "hi"];

/// Reply text plus the directive to apply, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantResponse {
    pub message: String,
    pub directive: Option<Directive>,
}

impl AssistantResponse {
    fn text(message: &str) -> Self {
        Self {
            message: message.to_string(),
            directive: None,
        }
    }
}

/// Produces assistant responses for the orchestrator.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Wait out the simulated thinking time.
    async fn simulate_latency(&self, duration: Duration);

    /// Produce the response to `input` given the directive currently shown.
    async fn respond(
        &self,
        input: &str,
        previous: Option<&Directive>,
    ) -> Result<AssistantResponse, ChatError>;
}

/// The classification rules, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseRule {
    /// "instead" + ("table" | "list") while a chart is shown.
    SwitchToTable,
    /// "instead" + "chart" while a table is shown.
    SwitchToChart,
    /// Any of "sale", "analyze", "chart", "show".
    SalesChart,
    /// "hello" or "hi".
    Greeting,
    /// Nothing else matched.
    Fallback,
}

impl ResponseRule {
    pub const ORDERED: [ResponseRule; 5] = [
        ResponseRule::SwitchToTable,
        ResponseRule::SwitchToChart,
        ResponseRule::SalesChart,
        ResponseRule::Greeting,
        ResponseRule::Fallback,
    ];

    /// `input` must already be lowercased.
    fn matches(self, input: &str, previous: Option<&Directive>) -> bool {
        match self {
            ResponseRule::SwitchToTable => {
                input.contains("instead")
                    && (input.contains("table") || input.contains("list"))
                    && matches!(previous, Some(Directive::Chart(_)))
            }
            ResponseRule::SwitchToChart => {
                input.contains("instead")
                    && input.contains("chart")
                    && matches!(previous, Some(Directive::Table(_)))
            }
            ResponseRule::SalesChart => SALES_KEYWORDS.iter().any(|k| input.contains(k)),
            ResponseRule::Greeting => GREETING_KEYWORDS.iter().any(|k| input.contains(k)),
            ResponseRule::Fallback => true,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ResponseRule::SwitchToTable => "switch_to_table",
            ResponseRule::SwitchToChart => "switch_to_chart",
            ResponseRule::SalesChart => "sales_chart",
            ResponseRule::Greeting => "greeting",
            ResponseRule::Fallback => "fallback",
        }
    }
}

/// The canned monthly sales chart.
pub fn sales_overview() -> ChartDirective {
    ChartDirective::new(
        "Sales Overview",
        vec![
            10.0, 20.0, 15.0, 30.0, 25.0, 35.0, 40.0, 50.0, 90.0, 70.0, 80.0, 100.0,
        ],
        [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ]
        .iter()
        .map(|m| m.to_string())
        .collect(),
    )
}

/// Deterministic rule-list classifier.
pub struct ResponseEngine {
    timer: Arc<dyn Timer>,
    transformer: ActionTransformer,
}

impl ResponseEngine {
    pub fn new(timer: Arc<dyn Timer>) -> Self {
        Self {
            timer,
            transformer: ActionTransformer,
        }
    }

    /// First rule matching `input` (case-insensitive) and `previous`.
    pub fn match_rule(&self, input: &str, previous: Option<&Directive>) -> ResponseRule {
        let lower = input.to_lowercase();
        ResponseRule::ORDERED
            .into_iter()
            .find(|rule| rule.matches(&lower, previous))
            .unwrap_or(ResponseRule::Fallback)
    }

    /// Classify `input` into a reply and an optional directive.
    ///
    /// Pure: identical arguments always produce identical responses.
    pub fn classify(&self, input: &str, previous: Option<&Directive>) -> AssistantResponse {
        let rule = self.match_rule(input, previous);
        tracing::debug!(rule = rule.name(), "Input classified");

        match rule {
            ResponseRule::SwitchToTable => AssistantResponse {
                message: SWITCH_TO_LIST_REPLY.to_string(),
                directive: previous
                    .and_then(Directive::as_chart)
                    .map(|chart| Directive::Table(self.transformer.chart_to_table(chart))),
            },
            ResponseRule::SwitchToChart => AssistantResponse {
                message: SWITCH_TO_CHART_REPLY.to_string(),
                directive: previous.and_then(Directive::as_table).and_then(|table| {
                    match self.transformer.table_to_chart(table) {
                        Ok(chart) => Some(Directive::Chart(chart)),
                        Err(e) => {
                            tracing::warn!(error = %e, "Table to chart conversion failed");
                            None
                        }
                    }
                }),
            },
            ResponseRule::SalesChart => AssistantResponse {
                message: SALES_REPLY.to_string(),
                directive: Some(Directive::Chart(sales_overview())),
            },
            ResponseRule::Greeting => AssistantResponse::text(GREETING_REPLY),
            ResponseRule::Fallback => AssistantResponse::text(DEFAULT_REPLY),
        }
    }
}

#[async_trait]
impl Responder for ResponseEngine {
    async fn simulate_latency(&self, duration: Duration) {
        self.timer.sleep(duration).await;
    }

    async fn respond(
        &self,
        input: &str,
        previous: Option<&Directive>,
    ) -> Result<AssistantResponse, ChatError> {
        Ok(self.classify(input, previous))
    }
}
