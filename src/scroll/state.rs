//! Vertical auto-scroll decisions.
//!
//! Calculation produces an immutable [`ScrollState`]; the action layer only
//! ever consults [`should_trigger_scroll`] and the state's target offset.

use crate::model::StageRow;
use serde::Serialize;

/// Snapshot handed from scroll calculation to the scroll action.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScrollState {
    pub center_date_index: usize,
    /// Vertical offset to move to, if any row is active at the center day
    pub target_vertical_offset: Option<f64>,
    pub enable_auto_scroll: bool,
    /// Whether the center moved towards earlier dates
    pub scrolling_left: bool,
}

impl ScrollState {
    #[must_use]
    pub const fn new(center_date_index: usize) -> Self {
        Self {
            center_date_index,
            target_vertical_offset: None,
            enable_auto_scroll: false,
            scrolling_left: false,
        }
    }

    #[must_use]
    pub const fn with_target(mut self, offset: f64) -> Self {
        self.target_vertical_offset = Some(offset);
        self
    }

    #[must_use]
    pub const fn with_auto_scroll(mut self, enabled: bool) -> Self {
        self.enable_auto_scroll = enabled;
        self
    }

    #[must_use]
    pub const fn with_scrolling_left(mut self, left: bool) -> Self {
        self.scrolling_left = left;
        self
    }
}

/// Whether the action layer should move the vertical viewport.
#[must_use]
pub const fn should_trigger_scroll(state: &ScrollState) -> bool {
    state.enable_auto_scroll && state.target_vertical_offset.is_some()
}

/// Build the [`ScrollState`] for a new center day.
///
/// The target offset is the top of the first row holding a bar that covers
/// `center_date_index`, with rows stacked every `row_extent` pixels.
#[must_use]
pub fn calculate_scroll_state(
    center_date_index: usize,
    previous_center: Option<usize>,
    rows: &[StageRow],
    row_extent: f64,
    enable_auto_scroll: bool,
) -> ScrollState {
    let target = rows
        .iter()
        .position(|row| row.iter().any(|bar| bar.contains(center_date_index)))
        .map(|row| row as f64 * row_extent);

    ScrollState {
        center_date_index,
        target_vertical_offset: target,
        enable_auto_scroll,
        scrolling_left: previous_center.is_some_and(|previous| center_date_index < previous),
    }
}
