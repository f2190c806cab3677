//! Typed boundary records parsed from host JSON.

use crate::utils::parse_iso_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Parse issues
// ============================================================================

/// Why a raw record was skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordIssue {
    #[error("null entry")]
    Null,

    #[error("entry is not an object")]
    NotAnObject,

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' is not a valid date: {value}")]
    InvalidDate { field: &'static str, value: String },
}

fn as_object(value: &Value) -> Result<&Map<String, Value>, RecordIssue> {
    match value {
        Value::Null => Err(RecordIssue::Null),
        Value::Object(map) => Ok(map),
        _ => Err(RecordIssue::NotAnObject),
    }
}

/// A non-empty string field. Numbers are accepted and rendered as text, so
/// `"pre_id": 42` and `"pre_id": "42"` are the same identifier.
fn text_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A numeric field; numeric strings are accepted.
fn number_field(map: &Map<String, Value>, key: &str) -> Option<f64> {
    let number = match map.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|v| v.is_finite())
}

/// A date field. `Ok(None)` when absent or null, `Err` when present but not
/// an ISO date.
fn date_field(
    map: &Map<String, Value>,
    key: &'static str,
) -> Result<Option<NaiveDate>, RecordIssue> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => parse_iso_date(s).map(Some).ok_or_else(|| {
            RecordIssue::InvalidDate {
                field: key,
                value: s.clone(),
            }
        }),
        Some(other) => Err(RecordIssue::InvalidDate {
            field: key,
            value: other.to_string(),
        }),
    }
}

/// An optional date: unparseable values are dropped with a debug trace.
fn optional_date(map: &Map<String, Value>, key: &'static str) -> Option<NaiveDate> {
    date_field(map, key).unwrap_or_else(|issue| {
        tracing::debug!("Ignoring optional field: {issue}");
        None
    })
}

/// A list of identifiers given as an array or a comma-separated string.
fn id_list(map: &Map<String, Value>, key: &str) -> Vec<String> {
    match map.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn parse_all<T>(
    values: &[Value],
    kind: &str,
    parse: impl Fn(&Value) -> Result<T, RecordIssue>,
) -> Vec<T> {
    values
        .iter()
        .enumerate()
        .filter_map(|(i, value)| match parse(value) {
            Ok(record) => Some(record),
            Err(issue) => {
                tracing::debug!("Skipping {kind} record #{i}: {issue}");
                None
            }
        })
        .collect()
}

// ============================================================================
// Element nature and status
// ============================================================================

/// What kind of work item an element is (`nat`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementNature {
    Activity,
    Delivrable,
    Task,
    Other,
}

impl ElementNature {
    /// Parse a `nat` value. Unknown values map to [`ElementNature::Other`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "activity" => Self::Activity,
            "delivrable" | "deliverable" => Self::Delivrable,
            "task" => Self::Task,
            _ => Self::Other,
        }
    }
}

/// Element status vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementStatus {
    Validated,
    Finished,
    Pending,
    InProgress,
    Other(String),
}

impl ElementStatus {
    /// Parse a status, case-insensitively.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let normalized = value.trim().to_lowercase();
        match normalized.as_str() {
            "validated" => Self::Validated,
            "finished" => Self::Finished,
            "pending" => Self::Pending,
            "inprogress" => Self::InProgress,
            _ => Self::Other(normalized),
        }
    }

    /// Generic completion, independent of the element's nature.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Validated | Self::Finished)
    }

    /// Generic pending state, independent of the element's nature.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }

    /// Completion as counted for a given nature.
    ///
    /// Delivrables only complete once validated: a finished delivrable still
    /// awaits validation.
    #[must_use]
    pub const fn completes(&self, nature: ElementNature) -> bool {
        match nature {
            ElementNature::Delivrable => matches!(self, Self::Validated),
            ElementNature::Activity | ElementNature::Task => self.is_completed(),
            ElementNature::Other => false,
        }
    }
}

// ============================================================================
// Element
// ============================================================================

/// A work item landing on one day, optionally spanning `sdate..=edate`.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementRecord {
    pub pre_id: String,
    /// Day the element is bucketed on: `date`, else `sdate`, else `edate`
    pub date: NaiveDate,
    pub sdate: Option<NaiveDate>,
    pub edate: Option<NaiveDate>,
    pub nature: ElementNature,
    pub status: Option<ElementStatus>,
    pub color: Option<String>,
    pub project_id: Option<String>,
    pub label: Option<String>,
    pub raw: Value,
}

impl ElementRecord {
    /// Parse a raw element, reporting why it was rejected.
    pub fn parse(value: &Value) -> Result<Self, RecordIssue> {
        let map = as_object(value)?;
        let pre_id = text_field(map, "pre_id").ok_or(RecordIssue::MissingField("pre_id"))?;
        let sdate = optional_date(map, "sdate");
        let edate = optional_date(map, "edate");
        let date = date_field(map, "date")?
            .or(sdate)
            .or(edate)
            .ok_or(RecordIssue::MissingField("date"))?;

        Ok(Self {
            pre_id,
            date,
            sdate,
            edate,
            nature: text_field(map, "nat").map_or(ElementNature::Other, |n| ElementNature::parse(&n)),
            status: text_field(map, "status").map(|s| ElementStatus::parse(&s)),
            color: text_field(map, "pcolor"),
            project_id: text_field(map, "prj_id"),
            label: text_field(map, "label"),
            raw: value.clone(),
        })
    }

    /// Parse a raw element, or `None` for malformed input.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        Self::parse(value)
            .map_err(|issue| tracing::debug!("Skipping element record: {issue}"))
            .ok()
    }

    /// The element's span when it carries both `sdate` and `edate`.
    #[must_use]
    pub fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.sdate, self.edate) {
            (Some(s), Some(e)) if s <= e => Some((s, e)),
            (Some(s), Some(e)) => Some((e, s)),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status.as_ref().is_some_and(ElementStatus::is_completed)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status.as_ref().is_some_and(ElementStatus::is_pending)
    }
}

/// Parse every well-formed element, skipping the rest.
#[must_use]
pub fn parse_elements(values: &[Value]) -> Vec<ElementRecord> {
    parse_all(values, "element", ElementRecord::parse)
}

// ============================================================================
// Capacity
// ============================================================================

/// Workload figures for one date.
#[derive(Debug, Clone, PartialEq)]
pub struct CapacityRecord {
    pub date: NaiveDate,
    /// Effective capacity
    pub capeff: f64,
    /// Booked workload
    pub buseff: f64,
    /// Completed workload
    pub compeff: f64,
    pub eicon: Option<String>,
}

impl CapacityRecord {
    pub fn parse(value: &Value) -> Result<Self, RecordIssue> {
        let map = as_object(value)?;
        let date = date_field(map, "date")?.ok_or(RecordIssue::MissingField("date"))?;
        Ok(Self {
            date,
            capeff: number_field(map, "capeff").unwrap_or(0.0),
            buseff: number_field(map, "buseff").unwrap_or(0.0),
            compeff: number_field(map, "compeff").unwrap_or(0.0),
            eicon: text_field(map, "eicon"),
        })
    }

    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        Self::parse(value)
            .map_err(|issue| tracing::debug!("Skipping capacity record: {issue}"))
            .ok()
    }
}

#[must_use]
pub fn parse_capacities(values: &[Value]) -> Vec<CapacityRecord> {
    parse_all(values, "capacity", CapacityRecord::parse)
}

// ============================================================================
// Stage
// ============================================================================

/// A project stage or milestone spanning `sdate..=edate`.
#[derive(Debug, Clone, PartialEq)]
pub struct StageRecord {
    pub id: String,
    pub sdate: NaiveDate,
    /// Always `>= sdate`; milestones without `edate` end on `sdate`
    pub edate: NaiveDate,
    /// Raw `type` value, `"stage"` when absent
    pub kind: String,
    pub color: Option<String>,
    pub project_id: Option<String>,
    pub label: Option<String>,
    /// Element ids related to this stage (`elm_filtered`)
    pub related: Vec<String>,
    pub raw: Value,
}

impl StageRecord {
    pub fn parse(value: &Value) -> Result<Self, RecordIssue> {
        let map = as_object(value)?;
        let id = text_field(map, "id")
            .or_else(|| text_field(map, "sta_id"))
            .or_else(|| text_field(map, "pre_id"))
            .ok_or(RecordIssue::MissingField("id"))?;
        let sdate = date_field(map, "sdate")?.ok_or(RecordIssue::MissingField("sdate"))?;
        let edate = date_field(map, "edate")?.unwrap_or(sdate);
        let (sdate, edate) = if edate < sdate {
            tracing::debug!("Stage {id} ends before it starts; swapping dates");
            (edate, sdate)
        } else {
            (sdate, edate)
        };

        Ok(Self {
            id,
            sdate,
            edate,
            kind: text_field(map, "type").unwrap_or_else(|| "stage".to_string()),
            color: text_field(map, "pcolor"),
            project_id: text_field(map, "prj_id"),
            label: text_field(map, "label"),
            related: id_list(map, "elm_filtered"),
            raw: value.clone(),
        })
    }

    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        Self::parse(value)
            .map_err(|issue| tracing::debug!("Skipping stage record: {issue}"))
            .ok()
    }
}

#[must_use]
pub fn parse_stages(values: &[Value]) -> Vec<StageRecord> {
    parse_all(values, "stage", StageRecord::parse)
}
