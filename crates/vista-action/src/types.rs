//! Directive types exchanged between the response engine and the widget layer.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single table record: string keys mapped to arbitrary JSON values.
pub type Row = Map<String, Value>;

/// A structured instruction describing which visualization to show.
///
/// Serialized with a `type` discriminant (`show_chart`, `show_table`). Any
/// other tag decodes to [`Directive::Unsupported`], which never validates and
/// never resolves to a widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Directive {
    #[serde(rename = "show_chart")]
    Chart(ChartDirective),
    #[serde(rename = "show_table")]
    Table(TableDirective),
    #[serde(other, rename = "unsupported")]
    Unsupported,
}

impl Directive {
    /// Wire tag of this directive.
    pub fn kind(&self) -> &'static str {
        match self {
            Directive::Chart(_) => "show_chart",
            Directive::Table(_) => "show_table",
            Directive::Unsupported => "unsupported",
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Directive::Chart(chart) => Some(&chart.title),
            Directive::Table(table) => Some(&table.title),
            Directive::Unsupported => None,
        }
    }

    pub fn as_chart(&self) -> Option<&ChartDirective> {
        match self {
            Directive::Chart(chart) => Some(chart),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&TableDirective> {
        match self {
            Directive::Table(table) => Some(table),
            _ => None,
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())
    }
}

impl From<ChartDirective> for Directive {
    fn from(chart: ChartDirective) -> Self {
        Directive::Chart(chart)
    }
}

impl From<TableDirective> for Directive {
    fn from(table: TableDirective) -> Self {
        Directive::Table(table)
    }
}

/// JSON number for a data point: integral values within `i64` range become
/// integers (`10`, not `10.0`), everything else stays a float.
pub fn number_value(v: f64) -> Value {
    if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
        Value::from(v as i64)
    } else {
        Value::from(v)
    }
}

/// Series data for a chart widget.
///
/// `data` and `labels` are parallel sequences; the validator rejects a chart
/// whose lengths differ.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartDirective {
    pub data: Vec<f64>,
    pub labels: Vec<String>,
    pub title: String,
}

impl ChartDirective {
    pub fn new(title: impl Into<String>, data: Vec<f64>, labels: Vec<String>) -> Self {
        Self {
            data,
            labels,
            title: title.into(),
        }
    }
}

/// Tabular records for a table widget.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableDirective {
    pub rows: Vec<Row>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    pub title: String,
}

impl TableDirective {
    pub fn new(title: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            rows,
            columns: None,
            title: title.into(),
        }
    }

    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = Some(columns);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_value_integral_and_fractional() {
        assert_eq!(number_value(10.0), json!(10));
        assert_eq!(number_value(-3.0), json!(-3));
        assert_eq!(number_value(20.5), json!(20.5));
        assert_eq!(number_value(1e300), json!(1e300));
        assert!(number_value(f64::NAN).is_null());
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(Directive::Chart(ChartDirective::default()).kind(), "show_chart");
        assert_eq!(Directive::Table(TableDirective::default()).kind(), "show_table");
        assert_eq!(Directive::Unsupported.kind(), "unsupported");
        assert_eq!(Directive::Unsupported.to_string(), "unsupported");
    }

    #[test]
    fn test_chart_deserializes_from_tagged_json() {
        let directive: Directive = serde_json::from_value(json!({
            "type": "show_chart",
            "data": [1, 2.5],
            "labels": ["a", "b"],
            "title": "Revenue"
        }))
        .unwrap();
        let chart = directive.as_chart().unwrap();
        assert_eq!(chart.data, vec![1.0, 2.5]);
        assert_eq!(chart.labels, vec!["a", "b"]);
        assert_eq!(chart.title, "Revenue");
    }

    #[test]
    fn test_table_deserializes_with_columns() {
        let directive: Directive = serde_json::from_value(json!({
            "type": "show_table",
            "rows": [{"name": "x"}],
            "columns": ["Name"],
            "title": "People"
        }))
        .unwrap();
        let table = directive.as_table().unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.columns.as_deref(), Some(&["Name".to_string()][..]));
    }

    #[test]
    fn test_missing_fields_default() {
        let directive: Directive = serde_json::from_value(json!({"type": "show_chart"})).unwrap();
        assert_eq!(directive, Directive::Chart(ChartDirective::default()));
    }

    #[test]
    fn test_unknown_tag_is_unsupported() {
        let directive: Directive =
            serde_json::from_value(json!({"type": "show_metric", "value": 3})).unwrap();
        assert_eq!(directive, Directive::Unsupported);
        assert!(directive.title().is_none());

        let directive: Directive = serde_json::from_value(json!({"type": "show_list"})).unwrap();
        assert_eq!(directive, Directive::Unsupported);
    }

    #[test]
    fn test_chart_serializes_with_tag() {
        let directive = Directive::from(ChartDirective::new("T", vec![1.0], vec!["a".into()]));
        let value = serde_json::to_value(&directive).unwrap();
        assert_eq!(value["type"], "show_chart");
        assert_eq!(value["title"], "T");
    }

    #[test]
    fn test_table_without_columns_omits_field() {
        let directive = Directive::from(TableDirective::new("T", vec![]));
        let value = serde_json::to_value(&directive).unwrap();
        assert_eq!(value["type"], "show_table");
        assert!(value.get("columns").is_none());
    }

    #[test]
    fn test_accessors_are_variant_specific() {
        let chart = Directive::from(ChartDirective::default());
        assert!(chart.as_chart().is_some());
        assert!(chart.as_table().is_none());

        let table = Directive::from(TableDirective::default().with_columns(vec!["A".into()]));
        assert!(table.as_table().is_some());
        assert!(table.as_chart().is_none());
    }
}
