//! Per-day aggregated summary.

use chrono::NaiveDate;
use indexmap::IndexSet;
use serde::{Serialize, Serializer};

/// Workload ratio at or below which a day is not flagged.
pub const WARNING_RATIO: f64 = 0.80;

/// Workload ratio above which a day is overloaded.
pub const CRITICAL_RATIO: f64 = 1.00;

/// Severity of a day's `buseff / capeff` workload ratio.
///
/// Bands are closed at their upper bound: exactly 80% is still `Normal`,
/// exactly 100% is still `Warning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum AlertLevel {
    #[default]
    Normal,
    Warning,
    Critical,
}

impl AlertLevel {
    /// Classify a workload. Zero, negative or missing capacity is `Normal`.
    #[must_use]
    pub fn from_workload(buseff: f64, capeff: f64) -> Self {
        if capeff <= 0.0 || !capeff.is_finite() || !buseff.is_finite() {
            return Self::Normal;
        }
        let ratio = buseff / capeff;
        if ratio <= WARNING_RATIO {
            Self::Normal
        } else if ratio <= CRITICAL_RATIO {
            Self::Warning
        } else {
            Self::Critical
        }
    }

    /// Numeric level in `{0, 1, 2}`.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Warning => 1,
            Self::Critical => 2,
        }
    }
}

impl Serialize for AlertLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

/// One calendar date's aggregated summary.
///
/// Produced wholesale by the data manager and never mutated afterwards.
/// `pre_ids` keeps insertion order for display but compares as a set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Day {
    pub date: NaiveDate,
    pub activity_total: u32,
    pub activity_completed: u32,
    pub delivrable_total: u32,
    pub delivrable_completed: u32,
    pub task_total: u32,
    pub task_completed: u32,
    pub element_completed: u32,
    pub element_pending: u32,
    pub pre_ids: IndexSet<String>,
    pub capeff: f64,
    pub buseff: f64,
    pub compeff: f64,
    pub eicon: Option<String>,
    pub alert_level: AlertLevel,
    /// `buseff / max_capacity`, clamped to `[0, 1]`
    pub workload_fraction: f64,
    /// Number of stages whose span covers this day
    pub stage_count: u32,
}

impl Day {
    /// An empty day with no elements and no capacity.
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            activity_total: 0,
            activity_completed: 0,
            delivrable_total: 0,
            delivrable_completed: 0,
            task_total: 0,
            task_completed: 0,
            element_completed: 0,
            element_pending: 0,
            pre_ids: IndexSet::new(),
            capeff: 0.0,
            buseff: 0.0,
            compeff: 0.0,
            eicon: None,
            alert_level: AlertLevel::Normal,
            workload_fraction: 0.0,
            stage_count: 0,
        }
    }

    /// Number of distinct elements on this day.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.pre_ids.len()
    }

    #[must_use]
    pub fn has_capacity(&self) -> bool {
        self.capeff > 0.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pre_ids.is_empty() && !self.has_capacity() && self.stage_count == 0
    }
}
