//! Structural validation of directives.

use crate::error::ActionError;
use crate::types::Directive;

/// Checks directive shape before it is handed to the widget layer.
///
/// A chart is valid when its data and labels have equal length (both empty
/// included). A table is valid for any number of rows; row shape is not
/// inspected. Unsupported directives are never valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionValidator;

impl ActionValidator {
    pub fn validate(&self, directive: &Directive) -> bool {
        self.check(directive).is_ok()
    }

    /// Like [`validate`](Self::validate), but reports why a directive failed.
    pub fn check(&self, directive: &Directive) -> Result<(), ActionError> {
        match directive {
            Directive::Chart(chart) => {
                if chart.data.len() == chart.labels.len() {
                    Ok(())
                } else {
                    Err(ActionError::InvalidDirective(format!(
                        "chart has {} data points but {} labels",
                        chart.data.len(),
                        chart.labels.len()
                    )))
                }
            }
            Directive::Table(_) => Ok(()),
            Directive::Unsupported => Err(ActionError::InvalidDirective(
                "unsupported directive type".to_string(),
            )),
        }
    }
}
