//! Observable owner of the current scroll offset and visible window.

use crate::config::TimelineConfig;
use crate::scroll::{VisibleRange, calculate_center_date_index, calculate_visible_range};

/// Handle returned by [`TimelineController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(VisibleRange)>;

/// Single source of truth for which day window is visible.
///
/// [`update_scroll_offset`](Self::update_scroll_offset) recomputes the center
/// day and buffered window and notifies listeners only when the window value
/// actually changes.
pub struct TimelineController {
    day_width: f64,
    day_margin: f64,
    buffer_days: usize,
    viewport_width: f64,
    total_days: usize,
    scroll_offset: f64,
    center_index: usize,
    visible_range: VisibleRange,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
    disposed: bool,
}

impl std::fmt::Debug for TimelineController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimelineController")
            .field("viewport_width", &self.viewport_width)
            .field("total_days", &self.total_days)
            .field("scroll_offset", &self.scroll_offset)
            .field("visible_range", &self.visible_range)
            .field("listeners", &self.listeners.len())
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

impl TimelineController {
    /// Create a controller positioned at offset 0.
    #[must_use]
    pub fn new(config: &TimelineConfig, total_days: usize, viewport_width: f64) -> Self {
        let mut controller = Self {
            day_width: config.day_width,
            day_margin: config.day_margin,
            buffer_days: config.buffer_days,
            viewport_width,
            total_days,
            scroll_offset: 0.0,
            center_index: 0,
            visible_range: VisibleRange::default(),
            listeners: Vec::new(),
            next_listener: 0,
            disposed: false,
        };
        let (center, range) = controller.compute();
        controller.center_index = center;
        controller.visible_range = range;
        controller
    }

    #[must_use]
    pub const fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    #[must_use]
    pub const fn center_index(&self) -> usize {
        self.center_index
    }

    #[must_use]
    pub const fn visible_range(&self) -> VisibleRange {
        self.visible_range
    }

    #[must_use]
    pub const fn total_days(&self) -> usize {
        self.total_days
    }

    #[must_use]
    pub const fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    #[must_use]
    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Register a listener called with each new visible range.
    pub fn subscribe(&mut self, listener: impl FnMut(VisibleRange) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        if !self.disposed {
            self.listeners.push((id, Box::new(listener)));
        }
        id
    }

    /// Remove a listener. Unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Apply a new horizontal scroll offset.
    ///
    /// Returns whether listeners were notified.
    pub fn update_scroll_offset(&mut self, offset: f64) -> bool {
        if self.disposed {
            return false;
        }
        self.scroll_offset = if offset.is_finite() { offset } else { 0.0 };
        self.refresh()
    }

    /// Resize the viewport; notifies when the window changes.
    pub fn set_viewport_width(&mut self, width: f64) -> bool {
        if self.disposed {
            return false;
        }
        self.viewport_width = width.max(0.0);
        self.refresh()
    }

    /// Change the number of days, e.g. after the date range was replaced.
    pub fn set_total_days(&mut self, total_days: usize) -> bool {
        if self.disposed {
            return false;
        }
        self.total_days = total_days;
        self.refresh()
    }

    /// Drop every listener. Later updates are ignored.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.listeners.clear();
        self.disposed = true;
        tracing::debug!("Timeline controller disposed");
    }

    fn compute(&self) -> (usize, VisibleRange) {
        let center = calculate_center_date_index(
            self.scroll_offset,
            self.viewport_width,
            self.day_width,
            self.day_margin,
            self.total_days,
        );
        let range = calculate_visible_range(
            center,
            self.viewport_width,
            self.day_width,
            self.day_margin,
            self.total_days,
            self.buffer_days,
        );
        (center, range)
    }

    fn refresh(&mut self) -> bool {
        let (center, range) = self.compute();
        self.center_index = center;
        if range == self.visible_range {
            tracing::trace!("Visible range unchanged at {range}, notification suppressed");
            return false;
        }
        self.visible_range = range;
        for (_, listener) in &mut self.listeners {
            listener(range);
        }
        true
    }
}
