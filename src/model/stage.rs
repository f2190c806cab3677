//! Stage bars and their row layout.

use super::records::ElementNature;
use serde::Serialize;
use serde_json::Value;

/// What a bar represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BarKind {
    Stage,
    Milestone,
    Activity,
    Delivrable,
    Task,
    Element,
}

impl BarKind {
    /// Interpret a stage's `type` value.
    #[must_use]
    pub fn from_type(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "milestone" => Self::Milestone,
            other => match ElementNature::parse(other) {
                ElementNature::Other => Self::Stage,
                nature => Self::from_nature(nature),
            },
        }
    }

    #[must_use]
    pub const fn from_nature(nature: ElementNature) -> Self {
        match nature {
            ElementNature::Activity => Self::Activity,
            ElementNature::Delivrable => Self::Delivrable,
            ElementNature::Task => Self::Task,
            ElementNature::Other => Self::Element,
        }
    }
}

/// A horizontal span placed in a stage row.
///
/// Indices are inclusive day indices already clamped to the timeline, with
/// `start_index <= end_index`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageBar {
    pub id: String,
    pub kind: BarKind,
    pub start_index: usize,
    pub end_index: usize,
    pub color: Option<String>,
    pub project_id: Option<String>,
    pub label: Option<String>,
    /// Related element ids
    pub related: Vec<String>,
    /// Fraction of related elements completed; `None` without related ids
    pub progress: Option<f64>,
    /// Host payload, passed through untouched
    pub raw: Value,
}

impl StageBar {
    /// Number of days covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end_index - self.start_index + 1
    }

    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        self.start_index <= index && index <= self.end_index
    }

    /// Whether two bars may not share a row.
    ///
    /// Bars conflict when their inclusive spans intersect, except when one
    /// bar ends exactly on the index where a later-starting bar begins.
    #[must_use]
    pub fn conflicts_with(&self, other: &Self) -> bool {
        let lo = self.start_index.max(other.start_index);
        let hi = self.end_index.min(other.end_index);
        if lo > hi {
            return false;
        }
        if lo < hi {
            return true;
        }
        let touching = |a: &Self, b: &Self| a.end_index == lo && b.start_index == lo && a.start_index < lo;
        !(touching(self, other) || touching(other, self))
    }
}

/// One display row: non-conflicting bars ordered left to right.
pub type StageRow = Vec<StageBar>;

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(start: usize, end: usize) -> StageBar {
        StageBar {
            id: format!("{start}-{end}"),
            kind: BarKind::Stage,
            start_index: start,
            end_index: end,
            color: None,
            project_id: None,
            label: None,
            related: Vec::new(),
            progress: None,
            raw: Value::Null,
        }
    }

    #[test]
    fn test_disjoint_and_overlapping() {
        assert!(!bar(0, 4).conflicts_with(&bar(6, 9)));
        assert!(bar(0, 4).conflicts_with(&bar(3, 9)));
        assert!(bar(3, 9).conflicts_with(&bar(0, 4)));
    }

    #[test]
    fn test_touching_is_allowed() {
        assert!(!bar(0, 5).conflicts_with(&bar(5, 9)));
        assert!(!bar(5, 9).conflicts_with(&bar(0, 5)));
        assert!(!bar(0, 5).conflicts_with(&bar(5, 5)));
    }

    #[test]
    fn test_containment_and_identical_points_conflict() {
        assert!(bar(3, 7).conflicts_with(&bar(5, 5)));
        assert!(bar(5, 5).conflicts_with(&bar(5, 5)));
        assert!(bar(5, 5).conflicts_with(&bar(5, 9)));
    }

    #[test]
    fn test_bar_kind_from_type() {
        assert_eq!(BarKind::from_type("milestone"), BarKind::Milestone);
        assert_eq!(BarKind::from_type("stage"), BarKind::Stage);
        assert_eq!(BarKind::from_type("delivrable"), BarKind::Delivrable);
        assert_eq!(BarKind::from_type("phase"), BarKind::Stage);
    }

    #[test]
    fn test_len_and_contains() {
        let b = bar(2, 4);
        assert_eq!(b.len(), 3);
        assert!(b.contains(2) && b.contains(4));
        assert!(!b.contains(5));
    }
}
