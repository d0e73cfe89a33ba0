//! Shared value types.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Epoch-millisecond timestamp attached to chat messages.
///
/// Millisecond precision keeps the ordering of the two halves of a turn
/// stable even when they are appended within the same second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp_millis())
    }

    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.0).unwrap_or_default()
    }

    /// Format as a two-digit `HH:MM` wall-clock time in the local timezone.
    pub fn format_time(&self) -> String {
        self.to_datetime()
            .with_timezone(&Local)
            .format("%H:%M")
            .to_string()
    }
}
