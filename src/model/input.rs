//! Serialized timeline input envelope.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Everything the data manager needs, as one JSON document.
///
/// Record collections stay untyped here; they are parsed (and malformed
/// entries skipped) by the data manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineInput {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub max_capacity: f64,
    #[serde(default)]
    pub elements: Vec<Value>,
    #[serde(default)]
    pub elements_done: Vec<Value>,
    #[serde(default)]
    pub capacities: Vec<Value>,
    #[serde(default)]
    pub stages: Vec<Value>,
}

impl TimelineInput {
    /// An input covering `[start_date, end_date]` with no records.
    #[must_use]
    pub const fn empty(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            max_capacity: 0.0,
            elements: Vec::new(),
            elements_done: Vec::new(),
            capacities: Vec::new(),
            stages: Vec::new(),
        }
    }

    /// Number of days in the range; zero when `start_date > end_date`.
    #[must_use]
    pub fn day_count(&self) -> usize {
        if self.start_date > self.end_date {
            0
        } else {
            (self.end_date - self.start_date).num_days() as usize + 1
        }
    }
}
