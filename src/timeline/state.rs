//! Scroll orchestration for one timeline instance.

use super::host::{DayDetail, TimelineHost};
use crate::config::{ConfigRegistry, TimelineConfig};
use crate::controller::TimelineController;
use crate::data::{FormattedDays, FormattedRows, TimelineDataManager};
use crate::error::Result;
use crate::model::{Day, TimelineInput, parse_elements};
use crate::scroll::{
    ScrollState, VisibleRange, calculate_scroll_state, offset_for_index, should_trigger_scroll,
};
use crate::timers::{Debouncer, LoadingGate};
use crate::utils::{day_offset, format_iso_date};
use crate::viewport::{LazyViewport, PositionedItem};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

// ============================================================================
// Auto-scroll animation
// ============================================================================

/// A linear horizontal scroll from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoScroll {
    from: f64,
    to: f64,
    started: Instant,
    duration: Duration,
}

impl AutoScroll {
    #[must_use]
    pub const fn new(from: f64, to: f64, started: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            started,
            duration,
        }
    }

    #[must_use]
    pub const fn target(&self) -> f64 {
        self.to
    }

    #[must_use]
    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }

    /// Interpolated offset at `now`.
    #[must_use]
    pub fn offset_at(&self, now: Instant) -> f64 {
        if self.is_finished(now) {
            return self.to;
        }
        let progress =
            now.saturating_duration_since(self.started).as_secs_f64() / self.duration.as_secs_f64();
        (self.to - self.from).mul_add(progress, self.from)
    }
}

// ============================================================================
// Timeline state
// ============================================================================

/// Wires scroll events, timers and data formatting together for one
/// timeline, reporting to a [`TimelineHost`].
///
/// All methods take the current [`Instant`] where time matters; the state
/// never reads the clock on its own. After [`dispose`](Self::dispose) every
/// method is a no-op.
#[derive(Debug)]
pub struct TimelineState<H: TimelineHost> {
    config: Arc<TimelineConfig>,
    host: H,
    data: TimelineDataManager,
    input: TimelineInput,
    days: FormattedDays,
    rows: FormattedRows,
    controller: TimelineController,
    auto_scroll: Option<AutoScroll>,
    vertical_debounce: Debouncer,
    vertical_offset: f64,
    enable_auto_scroll: bool,
    scroll_state: Option<ScrollState>,
    /// Center day at the last vertical recompute
    scroll_anchor: Option<usize>,
    reported_date: Option<Option<NaiveDate>>,
    last_center: Option<usize>,
    loading: LoadingGate,
    disposed: bool,
}

impl<H: TimelineHost> TimelineState<H> {
    /// Build a timeline from the registry's configuration.
    ///
    /// Fails with [`crate::TimelineError::ConfigNotInitialized`] when the
    /// registry has not been initialized.
    pub fn new(
        registry: &ConfigRegistry,
        host: H,
        input: TimelineInput,
        viewport_width: f64,
    ) -> Result<Self> {
        Ok(Self::with_config(registry.get()?, host, input, viewport_width))
    }

    #[must_use]
    pub fn with_config(
        config: Arc<TimelineConfig>,
        host: H,
        input: TimelineInput,
        viewport_width: f64,
    ) -> Self {
        let mut data = TimelineDataManager::new();
        let (days, rows) = format_input(&mut data, &input);
        let controller = TimelineController::new(&config, days.len(), viewport_width);

        Self {
            vertical_debounce: Debouncer::new(config.vertical_debounce()),
            loading: LoadingGate::new(config.loading_threshold()),
            config,
            host,
            data,
            input,
            days,
            rows,
            controller,
            auto_scroll: None,
            vertical_offset: 0.0,
            enable_auto_scroll: true,
            scroll_state: None,
            scroll_anchor: None,
            reported_date: None,
            last_center: None,
            disposed: false,
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    #[must_use]
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    pub const fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub const fn input(&self) -> &TimelineInput {
        &self.input
    }

    #[must_use]
    pub fn days(&self) -> FormattedDays {
        Arc::clone(&self.days)
    }

    #[must_use]
    pub fn rows(&self) -> FormattedRows {
        Arc::clone(&self.rows)
    }

    #[must_use]
    pub const fn controller(&self) -> &TimelineController {
        &self.controller
    }

    #[must_use]
    pub const fn visible_range(&self) -> VisibleRange {
        self.controller.visible_range()
    }

    #[must_use]
    pub const fn center_index(&self) -> usize {
        self.controller.center_index()
    }

    #[must_use]
    pub const fn horizontal_offset(&self) -> f64 {
        self.controller.scroll_offset()
    }

    #[must_use]
    pub const fn vertical_offset(&self) -> f64 {
        self.vertical_offset
    }

    /// Result of the most recent vertical recompute.
    #[must_use]
    pub const fn scroll_state(&self) -> Option<ScrollState> {
        self.scroll_state
    }

    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.auto_scroll.is_some()
    }

    #[must_use]
    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// ISO date of the center day.
    #[must_use]
    pub fn current_date(&self) -> Option<String> {
        self.days
            .get(self.center_index())
            .map(|day| format_iso_date(day.date))
    }

    /// Canvas geometry of the current days and viewport.
    #[must_use]
    pub fn viewport(&self) -> LazyViewport {
        LazyViewport::new(
            self.days.len(),
            self.config.day_step(),
            self.controller.viewport_width(),
        )
    }

    /// The days inside the visible window, positioned on the canvas.
    #[must_use]
    pub fn visible_days(&self) -> Vec<PositionedItem<&Day>> {
        let days: &[Day] = &self.days;
        self.viewport().build(self.visible_range(), |index| &days[index])
    }

    // ------------------------------------------------------------------------
    // Data
    // ------------------------------------------------------------------------

    /// Replace the input collections. Returns whether the formatted days
    /// changed.
    pub fn set_input(&mut self, input: TimelineInput, now: Instant) -> bool {
        if self.disposed {
            return false;
        }
        self.input = input;
        let (days, rows) = format_input(&mut self.data, &self.input);
        let changed = !Arc::ptr_eq(&days, &self.days);
        self.days = days;
        self.rows = rows;
        self.controller.set_total_days(self.days.len());
        self.reclamp();
        self.sync_center(now);
        changed
    }

    pub fn set_viewport_width(&mut self, width: f64, now: Instant) {
        if self.disposed {
            return;
        }
        self.controller.set_viewport_width(width);
        self.reclamp();
        self.sync_center(now);
    }

    pub const fn set_auto_scroll(&mut self, enabled: bool) {
        self.enable_auto_scroll = enabled;
    }

    // ------------------------------------------------------------------------
    // Scrolling
    // ------------------------------------------------------------------------

    /// A user-driven horizontal scroll. Cancels any running auto-scroll.
    ///
    /// The offset is clamped to `[0, max_scroll_offset]`.
    pub fn on_horizontal_scroll(&mut self, offset: f64, now: Instant) {
        if self.disposed {
            return;
        }
        if self.auto_scroll.take().is_some() {
            tracing::debug!("Auto-scroll cancelled by user scroll");
        }
        self.apply_horizontal(offset, now);
    }

    /// A user-driven vertical scroll. Postpones the vertical recompute until
    /// scrolling has been quiet for the debounce interval.
    pub fn on_vertical_scroll(&mut self, offset: f64, now: Instant) {
        if self.disposed {
            return;
        }
        if offset.is_finite() {
            self.vertical_offset = offset.max(0.0);
        }
        self.vertical_debounce.trigger(now);
    }

    /// Animate towards day `index`, clamped into the timeline.
    ///
    /// Returns the target offset, or `None` when there is nothing to scroll.
    pub fn scroll_to_index(&mut self, index: i64, now: Instant) -> Option<f64> {
        if self.disposed || self.days.is_empty() {
            return None;
        }
        let last = self.days.len() - 1;
        let clamped = usize::try_from(index.max(0)).map_or(last, |i| i.min(last));
        if i64::try_from(clamped).ok() != Some(index) {
            tracing::debug!("Scroll target {index} clamped to {clamped}");
        }

        let target = self.viewport().clamp_offset(offset_for_index(
            clamped,
            self.config.day_width,
            self.config.day_margin,
        ));

        let duration = self.config.animation_duration();
        if duration.is_zero() {
            self.auto_scroll = None;
            self.apply_horizontal(target, now);
        } else {
            self.auto_scroll = Some(AutoScroll::new(
                self.horizontal_offset(),
                target,
                now,
                duration,
            ));
        }
        Some(target)
    }

    /// Animate towards `date`. Dates outside the timeline clamp to its ends.
    pub fn scroll_to_date(&mut self, date: NaiveDate, now: Instant) -> Option<f64> {
        let origin = self.days.first()?.date;
        self.scroll_to_index(day_offset(origin, date), now)
    }

    /// Advance animations and timers to `now`.
    ///
    /// Returns the new [`ScrollState`] when the vertical debounce fired.
    pub fn tick(&mut self, now: Instant) -> Option<ScrollState> {
        if self.disposed {
            return None;
        }

        if let Some(animation) = self.auto_scroll {
            if animation.is_finished(now) {
                self.auto_scroll = None;
            }
            self.apply_horizontal(animation.offset_at(now), now);
        }

        if !self.vertical_debounce.poll(now) {
            return None;
        }
        let center = self.center_index();
        let state = calculate_scroll_state(
            center,
            self.scroll_anchor,
            &self.rows,
            self.config.row_extent(),
            self.enable_auto_scroll,
        );
        self.scroll_anchor = Some(center);
        if should_trigger_scroll(&state)
            && let Some(target) = state.target_vertical_offset
        {
            self.vertical_offset = target;
        }
        self.scroll_state = Some(state);
        Some(state)
    }

    // ------------------------------------------------------------------------
    // Loading indicator
    // ------------------------------------------------------------------------

    pub fn begin_loading(&mut self, now: Instant) {
        if !self.disposed {
            self.loading.begin(now);
        }
    }

    pub fn end_loading(&mut self) {
        self.loading.end();
    }

    pub fn is_loading_visible(&mut self, now: Instant) -> bool {
        !self.disposed && self.loading.is_visible(now)
    }

    // ------------------------------------------------------------------------
    // Interaction
    // ------------------------------------------------------------------------

    /// Open the detail view of day `index`. Returns false for unknown days.
    pub fn tap_day(&mut self, index: usize) -> bool {
        if self.disposed {
            return false;
        }
        let Some(day) = self.days.get(index) else {
            tracing::debug!("Tap on missing day {index}");
            return false;
        };

        let mut seen = HashSet::new();
        let elements = parse_elements(&self.input.elements)
            .into_iter()
            .chain(parse_elements(&self.input.elements_done))
            .filter(|element| element.date == day.date && seen.insert(element.pre_id.clone()))
            .map(|element| element.raw)
            .collect();

        let detail = DayDetail::from_day(day, elements);
        self.host.open_day_detail(&detail);
        true
    }

    /// Cancel timers and animations and release the controller.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.auto_scroll = None;
        self.vertical_debounce.cancel();
        self.loading.end();
        self.controller.dispose();
        self.disposed = true;
        tracing::debug!("Timeline disposed");
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn apply_horizontal(&mut self, offset: f64, now: Instant) {
        let offset = self.viewport().clamp_offset(offset);
        self.controller.update_scroll_offset(offset);
        self.sync_center(now);
    }

    /// Pull the offset back inside the canvas after it shrank.
    fn reclamp(&mut self) {
        let offset = self.horizontal_offset();
        let clamped = self.viewport().clamp_offset(offset);
        if clamped != offset {
            tracing::debug!("Scroll offset {offset} clamped to {clamped}");
            self.controller.update_scroll_offset(clamped);
        }
    }

    /// Report a new center date to the host and schedule a vertical
    /// recompute when the center day moved.
    fn sync_center(&mut self, now: Instant) {
        let center = self.center_index();
        let date = self.days.get(center).map(|day| day.date);
        if self.reported_date != Some(date) {
            self.reported_date = Some(date);
            let text = date.map(format_iso_date);
            self.host.update_current_date(text.as_deref());
        }
        if self.last_center != Some(center) {
            self.last_center = Some(center);
            self.vertical_debounce.trigger(now);
        }
    }
}

fn format_input(
    data: &mut TimelineDataManager,
    input: &TimelineInput,
) -> (FormattedDays, FormattedRows) {
    let days = data.formatted_days(
        input.start_date,
        input.end_date,
        &input.elements,
        &input.elements_done,
        &input.capacities,
        &input.stages,
        input.max_capacity,
    );
    let rows = data.formatted_timeline_rows(
        input.start_date,
        input.end_date,
        &days,
        &input.stages,
        &input.elements,
    );
    (days, rows)
}
