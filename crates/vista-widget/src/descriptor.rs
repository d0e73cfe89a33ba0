//! Widget descriptors derived from directives.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use vista_action::{number_value, ChartDirective, Directive, TableDirective};

/// Registry name of the built-in chart component.
pub const CHART_WIDGET: &str = "WidgetChart";
/// Registry name of the built-in table component.
pub const TABLE_WIDGET: &str = "WidgetTable";

/// Properties passed to a widget component.
pub type Props = Map<String, Value>;

/// A component name paired with the props it should be mounted with.
///
/// Only ever built from a [`Directive`] via [`WidgetDescriptor::from_directive`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetDescriptor {
    pub component_name: String,
    pub props: Props,
}

impl WidgetDescriptor {
    /// Build the descriptor for a directive, or `None` for unsupported ones.
    pub fn from_directive(directive: &Directive) -> Option<Self> {
        match directive {
            Directive::Chart(chart) => Some(Self::chart(chart)),
            Directive::Table(table) => Some(Self::table(table)),
            Directive::Unsupported => None,
        }
    }

    fn chart(chart: &ChartDirective) -> Self {
        let title = if chart.title.is_empty() {
            "Chart Data"
        } else {
            chart.title.as_str()
        };

        let mut props = Props::new();
        props.insert("title".to_string(), Value::from(title));
        let data = chart.data.iter().copied().map(number_value).collect();
        props.insert("data".to_string(), Value::Array(data));
        props.insert("labels".to_string(), Value::from(chart.labels.clone()));

        Self {
            component_name: CHART_WIDGET.to_string(),
            props,
        }
    }

    fn table(table: &TableDirective) -> Self {
        let title = if table.title.is_empty() {
            "Data Table"
        } else {
            table.title.as_str()
        };

        // Explicit columns win even when empty.
        let columns = match &table.columns {
            Some(columns) => columns.clone(),
            None => table
                .rows
                .first()
                .map(|row| row.keys().map(|k| capitalize(k)).collect())
                .unwrap_or_default(),
        };

        let rows = table.rows.iter().cloned().map(Value::Object).collect();

        let mut props = Props::new();
        props.insert("title".to_string(), Value::from(title));
        props.insert("columns".to_string(), Value::from(columns));
        props.insert("rows".to_string(), Value::Array(rows));

        Self {
            component_name: TABLE_WIDGET.to_string(),
            props,
        }
    }
}

/// Uppercase the first character of `key`, leaving the rest untouched.
fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
