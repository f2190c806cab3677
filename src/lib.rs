//! **Data formatting and viewport windowing for horizontally scrolling timelines.**
//!
//! `timeline-strip` is the engine underneath a calendar-like strip of days:
//! each day annotated with activity counts, capacity and workload alerts,
//! and overlapping stage bars. It does not draw anything. It turns raw host
//! records into immutable per-day summaries and packed bar rows, and turns
//! continuous scroll offsets into discrete, buffered windows of day indices
//! so a renderer only ever builds what is on screen.
//!
//! ## Core Concepts & Modules
//!
//! - **[`data`]**: [`TimelineDataManager`] aggregates elements, capacities and
//!   stages into [`Day`]s and packs stage bars into non-overlapping rows.
//!   Results are memoized by content fingerprint; an unchanged call returns
//!   the very same `Arc`.
//! - **[`scroll`]**: pure offset ↔ index math, [`VisibleRange`], and the
//!   auto-scroll decision ([`should_trigger_scroll`]).
//! - **[`controller`]**: [`TimelineController`], the observable owner of the
//!   current offset and visible window.
//! - **[`viewport`]**: [`LazyViewport`] builds only the items inside a window.
//! - **[`timeline`]**: [`TimelineState`] wires scroll events, timers and data
//!   together and reports to a [`TimelineHost`].
//! - **[`config`]**: validated [`TimelineConfig`], presets, YAML files and the
//!   initialize-once [`ConfigRegistry`].
//!
//! ## Getting Started
//!
//! ```no_run
//! use std::time::Instant;
//! use timeline_strip::{ConfigRegistry, NoopHost, TimelineConfig, TimelineInput, TimelineState};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut registry = ConfigRegistry::new();
//!     registry.initialize(TimelineConfig::default());
//!
//!     let input: TimelineInput = serde_json::from_str(&std::fs::read_to_string("timeline.json")?)?;
//!     let mut timeline = TimelineState::new(&registry, NoopHost, input, 1280.0)?;
//!
//!     timeline.on_horizontal_scroll(2400.0, Instant::now());
//!     for item in timeline.visible_days() {
//!         println!("{} at {}px: {} elements", item.item.date, item.offset, item.item.element_count());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Recoverable input
//!
//! Malformed records are skipped, out-of-range scroll targets are clamped and
//! invalid configuration values fall back to defaults. These paths log through
//! `tracing` and never return an error.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // usize↔f64 casts are pervasive in pixel and index math; values are
    // bounded by the day count of a timeline
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Variable names like `start`/`end` or `lo`/`hi` are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod scroll;
pub mod timeline;
pub mod timers;
pub mod utils;
pub mod viewport;

// Re-export main types for convenience
pub use config::{ConfigError, Validatable};
pub use config::{ConfigOverrides, ConfigPreset, ConfigRegistry, TimelineConfig};
pub use controller::{ListenerId, TimelineController};
pub use data::{CacheStats, FormattedDays, FormattedRows, TimelineDataManager};
pub use error::{ErrorContext, OptionContext, Result, TimelineError};
pub use model::{AlertLevel, BarKind, Day, StageBar, StageRow, TimelineInput};
pub use scroll::{
    ScrollState, VisibleRange, calculate_center_date_index, calculate_scroll_state,
    calculate_visible_range, offset_for_index, should_trigger_scroll,
};
pub use timeline::{DayDetail, NoopHost, TimelineHost, TimelineState};
pub use timers::{Debouncer, LoadingGate, Timer, TimerState};
pub use viewport::{LazyViewport, PositionedItem};
