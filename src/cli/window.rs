//! Window command handler.
//!
//! Implements the `window` subcommand: what a viewport at a given scroll
//! offset would show.

use super::common::{OutputTarget, load_input, to_json, write_output};
use crate::config::{ConfigRegistry, TimelineConfig};
use crate::scroll::{ScrollState, VisibleRange};
use crate::timeline::{NoopHost, TimelineState};
use crate::utils::format_iso_date;
use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

/// Window command configuration
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub input: PathBuf,
    pub output_file: Option<PathBuf>,
    /// Horizontal scroll offset in pixels
    pub offset: f64,
    /// Viewport width in pixels
    pub viewport: f64,
}

#[derive(Debug, Serialize)]
struct WindowReport {
    total_days: usize,
    center_index: usize,
    center_date: Option<String>,
    visible_range: VisibleRange,
    dates: Vec<String>,
    canvas_offsets: Vec<f64>,
    scroll_state: Option<ScrollState>,
    vertical_offset: f64,
}

/// Run the window command.
pub fn run_window(config: WindowConfig, timeline_config: TimelineConfig) -> Result<()> {
    let input = load_input(&config.input)?;

    let mut registry = ConfigRegistry::new();
    registry.initialize(timeline_config);
    let mut timeline = TimelineState::new(&registry, NoopHost, input, config.viewport)?;

    let now = Instant::now();
    timeline.on_horizontal_scroll(config.offset, now);
    // Let the vertical debounce settle so the auto-scroll target is known.
    let settled = now + timeline.config().vertical_debounce();
    let scroll_state = timeline.tick(settled);

    let visible = timeline.visible_days();
    let report = WindowReport {
        total_days: timeline.days().len(),
        center_index: timeline.center_index(),
        center_date: timeline.current_date(),
        visible_range: timeline.visible_range(),
        dates: visible.iter().map(|item| format_iso_date(item.item.date)).collect(),
        canvas_offsets: visible.iter().map(|item| item.offset).collect(),
        scroll_state,
        vertical_offset: timeline.vertical_offset(),
    };
    tracing::debug!(
        "Window {} builds {} of {} days",
        report.visible_range,
        report.dates.len(),
        report.total_days
    );

    let text = to_json(&report)?;
    timeline.dispose();
    write_output(&text, &OutputTarget::from_option(config.output_file))
}
