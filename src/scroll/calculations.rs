//! Offset and index conversions for a horizontally scrolling day strip.
//!
//! All functions are total: negative or oversized offsets are clamped, and
//! degenerate geometry (no days, a non-positive day step, non-finite input)
//! produces index 0 or a single-index range instead of a panic.

use super::range::VisibleRange;

/// Distance between two neighbouring day origins, or `None` when the
/// geometry cannot be scrolled.
fn step(day_width: f64, day_margin: f64) -> Option<f64> {
    let step = day_width - day_margin;
    (step.is_finite() && step > 0.0).then_some(step)
}

/// Scroll offset that brings day `index` to the leading edge.
#[must_use]
pub fn offset_for_index(index: usize, day_width: f64, day_margin: f64) -> f64 {
    index as f64 * (day_width - day_margin)
}

/// Day index under the horizontal center of the viewport.
///
/// Rounds half away from zero, then clamps to `[0, total_days - 1]`.
#[must_use]
pub fn calculate_center_date_index(
    scroll_offset: f64,
    viewport_width: f64,
    day_width: f64,
    day_margin: f64,
    total_days: usize,
) -> usize {
    if total_days == 0 {
        return 0;
    }
    let Some(step) = step(day_width, day_margin) else {
        return 0;
    };
    let center = ((scroll_offset + viewport_width.max(0.0) / 2.0) / step).round();
    if !center.is_finite() || center <= 0.0 {
        return 0;
    }
    let last = total_days - 1;
    if center >= last as f64 {
        last
    } else {
        center as usize
    }
}

/// Number of whole or partial days that fit in the viewport.
#[must_use]
pub fn visible_day_count(viewport_width: f64, day_width: f64, day_margin: f64) -> usize {
    let Some(step) = step(day_width, day_margin) else {
        return 0;
    };
    let count = (viewport_width / step).ceil();
    if count.is_finite() && count > 0.0 {
        count as usize
    } else {
        0
    }
}

/// Buffered window of day indices around `center_index`.
///
/// Both bounds are clamped to `[0, total_days]`.
#[must_use]
pub fn calculate_visible_range(
    center_index: usize,
    viewport_width: f64,
    day_width: f64,
    day_margin: f64,
    total_days: usize,
    buffer_days: usize,
) -> VisibleRange {
    let half = (visible_day_count(viewport_width, day_width, day_margin) / 2) as i64;
    let center = i64::try_from(center_index).unwrap_or(i64::MAX);
    let buffer = i64::try_from(buffer_days).unwrap_or(i64::MAX);
    let upper = i64::try_from(total_days).unwrap_or(i64::MAX);

    let start = center.saturating_sub(half).saturating_sub(buffer).clamp(0, upper);
    let end = center.saturating_add(half).saturating_add(buffer).clamp(0, upper);
    let range = VisibleRange::new(start as usize, end.max(start) as usize);
    tracing::trace!("visible range {range} around center {center_index}");
    range
}

/// Largest scroll offset that still shows content, for a canvas of
/// `total_days` columns.
#[must_use]
pub fn max_scroll_offset(
    total_days: usize,
    viewport_width: f64,
    day_width: f64,
    day_margin: f64,
) -> f64 {
    let Some(step) = step(day_width, day_margin) else {
        return 0.0;
    };
    let content = total_days as f64 * step;
    (content - viewport_width.max(0.0)).max(0.0)
}
