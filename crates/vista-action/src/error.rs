//! Error types for directive processing.

/// Boxed underlying cause carried by the generic error variants.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while validating, converting or applying a directive.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("Invalid directive: {0}")]
    InvalidDirective(String),
    #[error("Directive conversion failed: {0}")]
    ConversionFailed(String),
    #[error("{message}")]
    Processing {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl ActionError {
    /// Stable machine-readable code, used in logs.
    pub fn code(&self) -> &'static str {
        match self {
            ActionError::InvalidDirective(_) => "INVALID_DIRECTIVE",
            ActionError::ConversionFailed(_) => "CONVERSION_FAILED",
            ActionError::Processing { .. } => "ACTION_ERROR",
        }
    }

    /// Wrap an arbitrary failure as a generic action error.
    ///
    /// `context` names what was being processed; `source` is the underlying
    /// cause when there is one.
    pub fn processing(context: Option<&str>, source: Option<BoxError>) -> Self {
        let message = match context {
            Some(ctx) => format!("Failed to process action: {}", ctx),
            None => "Action error occurred".to_string(),
        };
        ActionError::Processing { message, source }
    }
}
