//! Inclusive day-index windows.

use serde::Serialize;

/// A closed interval `[start, end]` over day indices.
///
/// Ranges compare and hash by value, so two windows with the same bounds
/// are interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct VisibleRange {
    start: usize,
    end: usize,
}

impl VisibleRange {
    /// Create a range. `start` must not exceed `end`.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "VisibleRange start {start} > end {end}");
        Self {
            start: start.min(end),
            end,
        }
    }

    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    /// Whether `[other_start, other_end]` shares at least one index with
    /// this range. Touching bounds count.
    #[must_use]
    pub const fn overlaps(&self, other_start: usize, other_end: usize) -> bool {
        self.start <= other_end && other_start <= self.end
    }

    /// Number of indices covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Always false: a closed range covers at least one index.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterate the covered indices in ascending order.
    pub fn indices(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }
}

impl std::fmt::Display for VisibleRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
