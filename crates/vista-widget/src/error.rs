//! Error types for widget generation and resolution.

use vista_action::BoxError;

/// Errors raised while turning a directive into a mounted widget.
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("No widget for directive type: {0}")]
    UnsupportedDirective(String),
    #[error("Widget component not found: {0}")]
    ComponentNotFound(String),
    #[error("{message}")]
    Load {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl WidgetError {
    /// Stable machine-readable code, used in logs.
    pub fn code(&self) -> &'static str {
        match self {
            WidgetError::UnsupportedDirective(_) => "UNSUPPORTED_DIRECTIVE",
            WidgetError::ComponentNotFound(_) => "WIDGET_NOT_FOUND",
            WidgetError::Load { .. } => "WIDGET_ERROR",
        }
    }

    /// Wrap an arbitrary failure as a generic widget error.
    pub fn load(widget: Option<&str>, source: Option<BoxError>) -> Self {
        let message = match widget {
            Some(name) => format!("Failed to load widget: {}", name),
            None => "Widget error occurred".to_string(),
        };
        WidgetError::Load { message, source }
    }
}
