//! Conversion between chart and table directives.
//!
//! The two directions are not exact inverses: titles pick up a
//! `" (List View)"` marker on the way to a table, and only the first literal
//! occurrence of that marker is removed on the way back.

use serde_json::Value;

use crate::error::ActionError;
use crate::types::{number_value, ChartDirective, Row, TableDirective};

/// Marker appended to a chart title when it is shown as a list.
pub const LIST_VIEW_SUFFIX: &str = " (List View)";

const DEFAULT_TABLE_TITLE: &str = "Data List";
const DEFAULT_CHART_TITLE: &str = "Chart";

/// Rewrites a directive into the other visualization shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionTransformer;

impl ActionTransformer {
    /// Convert a chart into `{label, value}` rows, one per data point.
    ///
    /// A missing or empty label at index `i` becomes `"Item {i+1}"`.
    pub fn chart_to_table(&self, chart: &ChartDirective) -> TableDirective {
        let rows = chart
            .data
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let label = chart
                    .labels
                    .get(i)
                    .filter(|l| !l.is_empty())
                    .cloned()
                    .unwrap_or_else(|| format!("Item {}", i + 1));
                let mut row = Row::new();
                row.insert("label".to_string(), Value::String(label));
                row.insert("value".to_string(), number_value(*value));
                row
            })
            .collect();

        let title = if chart.title.is_empty() {
            DEFAULT_TABLE_TITLE.to_string()
        } else {
            format!("{}{}", chart.title, LIST_VIEW_SUFFIX)
        };

        tracing::debug!(points = chart.data.len(), "Converted chart to table");
        TableDirective::new(title, rows)
    }

    /// Convert `{label, value}` rows back into parallel chart series.
    ///
    /// Fails when a row has no numeric `value`. A missing label becomes an
    /// empty string; a non-string label is kept as its JSON text.
    pub fn table_to_chart(&self, table: &TableDirective) -> Result<ChartDirective, ActionError> {
        let mut data = Vec::with_capacity(table.rows.len());
        let mut labels = Vec::with_capacity(table.rows.len());

        for (i, row) in table.rows.iter().enumerate() {
            let value = row.get("value").and_then(Value::as_f64).ok_or_else(|| {
                ActionError::ConversionFailed(format!("row {} has no numeric value", i + 1))
            })?;
            let label = match row.get("label") {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            };
            data.push(value);
            labels.push(label);
        }

        let title = table.title.replacen(LIST_VIEW_SUFFIX, "", 1);
        let title = if title.is_empty() {
            DEFAULT_CHART_TITLE.to_string()
        } else {
            title
        };

        tracing::debug!(rows = table.rows.len(), "Converted table to chart");
        Ok(ChartDirective::new(title, data, labels))
    }
}
