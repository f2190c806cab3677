//! Windowed item building over a full-length virtual canvas.
//!
//! Only indices inside the visible range are handed to the item builder;
//! everything else exists solely as canvas extent. Items sit on the same
//! `day_width - day_margin` grid the scroll calculations use.

use crate::scroll::{VisibleRange, max_scroll_offset};
use serde::Serialize;

/// A built item and its absolute position on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedItem<T> {
    pub index: usize,
    /// Leading edge in pixels from the canvas origin
    pub offset: f64,
    pub item: T,
}

/// Lazily materializes the items of a horizontally laid out day strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LazyViewport {
    total_items: usize,
    day_step: f64,
    viewport_width: f64,
}

impl LazyViewport {
    /// `day_step` is the distance between two neighbouring day origins.
    #[must_use]
    pub fn new(total_items: usize, day_step: f64, viewport_width: f64) -> Self {
        Self {
            total_items,
            day_step: if day_step.is_finite() { day_step.max(0.0) } else { 0.0 },
            viewport_width: viewport_width.max(0.0),
        }
    }

    #[must_use]
    pub const fn total_items(&self) -> usize {
        self.total_items
    }

    #[must_use]
    pub const fn day_step(&self) -> f64 {
        self.day_step
    }

    /// Full canvas width: every item laid out side by side.
    #[must_use]
    pub fn canvas_extent(&self) -> f64 {
        self.total_items as f64 * self.day_step
    }

    #[must_use]
    pub fn item_offset(&self, index: usize) -> f64 {
        index as f64 * self.day_step
    }

    #[must_use]
    pub fn max_scroll_offset(&self) -> f64 {
        max_scroll_offset(self.total_items, self.viewport_width, self.day_step, 0.0)
    }

    /// Clamp an offset request to `[0, max_scroll_offset]`.
    #[must_use]
    pub fn clamp_offset(&self, offset: f64) -> f64 {
        if offset.is_nan() {
            return 0.0;
        }
        offset.clamp(0.0, self.max_scroll_offset())
    }

    /// Indices of `range` that exist, or `None` when nothing does.
    #[must_use]
    pub fn materialized_range(&self, range: VisibleRange) -> Option<VisibleRange> {
        let last = self.total_items.checked_sub(1)?;
        if range.start() > last {
            return None;
        }
        Some(VisibleRange::new(range.start(), range.end().min(last)))
    }

    /// Build the items of `range`, calling `builder` once per existing index.
    pub fn build<T>(
        &self,
        range: VisibleRange,
        mut builder: impl FnMut(usize) -> T,
    ) -> Vec<PositionedItem<T>> {
        let Some(range) = self.materialized_range(range) else {
            return Vec::new();
        };
        range
            .indices()
            .map(|index| PositionedItem {
                index,
                offset: self.item_offset(index),
                item: builder(index),
            })
            .collect()
    }
}
