//! Configuration types for timeline-strip.
//!
//! Provides the geometry and timing settings shared by the scroll math, the
//! controller, the viewport, and the orchestration layer.

use super::defaults::{
    DEFAULT_ANIMATION_DURATION_MS, DEFAULT_BUFFER_DAYS, DEFAULT_DATES_HEIGHT, DEFAULT_DAY_MARGIN,
    DEFAULT_DAY_WIDTH, DEFAULT_LOADING_THRESHOLD_MS, DEFAULT_ROW_HEIGHT, DEFAULT_ROW_MARGIN,
    DEFAULT_VERTICAL_DEBOUNCE_MS,
};
use super::validation::{ConfigError, FIELD_SPECS, Validatable, field_spec};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

// ============================================================================
// Timeline Configuration
// ============================================================================

/// Geometry and timing settings for one timeline.
///
/// Construct it through [`TimelineConfig::from_map`] (tolerant intake that
/// falls back to defaults), a preset, or the builder, and hand it to a
/// [`ConfigRegistry`](super::ConfigRegistry) once at application start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TimelineConfig {
    /// Width of one day column in pixels
    pub day_width: f64,
    /// Overlap between neighbouring day columns in pixels
    pub day_margin: f64,
    /// Height of the dates header in pixels
    pub dates_height: f64,
    /// Height of one stage row in pixels
    pub row_height: f64,
    /// Vertical gap between stage rows in pixels
    pub row_margin: f64,
    /// Days rendered beyond each side of the visible viewport
    pub buffer_days: usize,
    /// Duration of programmatic scroll animations in milliseconds
    pub animation_duration_ms: u64,
    /// Quiet period before a vertical scroll is acted upon, in milliseconds
    pub vertical_debounce_ms: u64,
    /// Delay before the loading indicator becomes visible, in milliseconds
    pub loading_threshold_ms: u64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            day_width: DEFAULT_DAY_WIDTH,
            day_margin: DEFAULT_DAY_MARGIN,
            dates_height: DEFAULT_DATES_HEIGHT,
            row_height: DEFAULT_ROW_HEIGHT,
            row_margin: DEFAULT_ROW_MARGIN,
            buffer_days: DEFAULT_BUFFER_DAYS,
            animation_duration_ms: DEFAULT_ANIMATION_DURATION_MS,
            vertical_debounce_ms: DEFAULT_VERTICAL_DEBOUNCE_MS,
            loading_threshold_ms: DEFAULT_LOADING_THRESHOLD_MS,
        }
    }
}

impl TimelineConfig {
    /// Create a new `TimelineConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `TimelineConfig` builder.
    pub fn builder() -> TimelineConfigBuilder {
        TimelineConfigBuilder::default()
    }

    /// Horizontal distance between the origins of two neighbouring days.
    #[must_use]
    pub fn day_step(&self) -> f64 {
        self.day_width - self.day_margin
    }

    /// Vertical distance between the tops of two neighbouring rows.
    #[must_use]
    pub fn row_extent(&self) -> f64 {
        self.row_height + self.row_margin
    }

    #[must_use]
    pub const fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    #[must_use]
    pub const fn vertical_debounce(&self) -> Duration {
        Duration::from_millis(self.vertical_debounce_ms)
    }

    #[must_use]
    pub const fn loading_threshold(&self) -> Duration {
        Duration::from_millis(self.loading_threshold_ms)
    }

    /// Read a field by its configuration key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<f64> {
        let value = match key {
            "day_width" => self.day_width,
            "day_margin" => self.day_margin,
            "dates_height" => self.dates_height,
            "row_height" => self.row_height,
            "row_margin" => self.row_margin,
            "buffer_days" => self.buffer_days as f64,
            "animation_duration_ms" => self.animation_duration_ms as f64,
            "vertical_debounce_ms" => self.vertical_debounce_ms as f64,
            "loading_threshold_ms" => self.loading_threshold_ms as f64,
            _ => return None,
        };
        Some(value)
    }

    /// Write a field by its configuration key. The value must already be
    /// checked against the field's spec.
    fn set(&mut self, key: &str, value: f64) {
        match key {
            "day_width" => self.day_width = value,
            "day_margin" => self.day_margin = value,
            "dates_height" => self.dates_height = value,
            "row_height" => self.row_height = value,
            "row_margin" => self.row_margin = value,
            "buffer_days" => self.buffer_days = value as usize,
            "animation_duration_ms" => self.animation_duration_ms = value as u64,
            "vertical_debounce_ms" => self.vertical_debounce_ms = value as u64,
            "loading_threshold_ms" => self.loading_threshold_ms = value as u64,
            _ => {}
        }
    }

    /// Build a configuration from a flat key/value map.
    ///
    /// Keys that are unknown, of the wrong type, or out of range keep their
    /// default and emit a warning. This never fails.
    #[must_use]
    pub fn from_map(map: &Map<String, Value>) -> Self {
        Self::from_map_with_overrides(map, &ConfigOverrides::default())
    }

    /// Build a configuration from a flat map, then apply programmatic
    /// overrides, which take precedence over map-supplied values.
    #[must_use]
    pub fn from_map_with_overrides(map: &Map<String, Value>, overrides: &ConfigOverrides) -> Self {
        Self::default().merge(map, overrides)
    }

    /// Layer a flat map and then overrides over this configuration, e.g. a
    /// preset. Same fallback rules as [`from_map`](Self::from_map).
    #[must_use]
    pub fn merge(self, map: &Map<String, Value>, overrides: &ConfigOverrides) -> Self {
        let mut config = self;

        for (key, raw) in map {
            let Some(spec) = field_spec(key) else {
                tracing::warn!("Ignoring unknown timeline configuration key '{key}'");
                continue;
            };
            match spec.check_json(raw) {
                Ok(value) => config.set(spec.key, value),
                Err(e) => warn_fallback(&e, config.get(spec.key)),
            }
        }

        overrides.apply_to(&mut config);
        config.enforce_margin_below_width();
        config
    }

    /// Return a copy with every invalid field reset to its default.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let mut config = self.clone();
        for spec in FIELD_SPECS {
            let Some(value) = config.get(spec.key) else {
                continue;
            };
            if let Err(e) = spec.check(value) {
                let fallback = defaults.get(spec.key).unwrap_or_default();
                warn_fallback(&e, Some(fallback));
                config.set(spec.key, fallback);
            }
        }
        config.enforce_margin_below_width();
        config
    }

    /// `day_margin` must stay below `day_width` or every offset computation
    /// degenerates. Falls back to the default margin, then to zero.
    fn enforce_margin_below_width(&mut self) {
        if self.day_margin < self.day_width {
            return;
        }
        let fallback = if DEFAULT_DAY_MARGIN < self.day_width {
            DEFAULT_DAY_MARGIN
        } else {
            0.0
        };
        tracing::warn!(
            "day_margin ({}) must be smaller than day_width ({}); using {}",
            self.day_margin,
            self.day_width,
            fallback
        );
        self.day_margin = fallback;
    }
}

fn warn_fallback(error: &ConfigError, fallback: Option<f64>) {
    match fallback {
        Some(value) => tracing::warn!("Invalid timeline configuration ({error}); using {value}"),
        None => tracing::warn!("Invalid timeline configuration ({error})"),
    }
}

// ============================================================================
// Programmatic overrides
// ============================================================================

/// Programmatic settings layered over map- or file-supplied values.
///
/// Each `Some` field wins over the map; invalid overrides are ignored with a
/// warning and the underlying value is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub day_width: Option<f64>,
    pub day_margin: Option<f64>,
    pub dates_height: Option<f64>,
    pub row_height: Option<f64>,
    pub row_margin: Option<f64>,
    pub buffer_days: Option<usize>,
    pub animation_duration_ms: Option<u64>,
    pub vertical_debounce_ms: Option<u64>,
    pub loading_threshold_ms: Option<u64>,
}

impl ConfigOverrides {
    fn entries(&self) -> [(&'static str, Option<f64>); 9] {
        [
            ("day_width", self.day_width),
            ("day_margin", self.day_margin),
            ("dates_height", self.dates_height),
            ("row_height", self.row_height),
            ("row_margin", self.row_margin),
            ("buffer_days", self.buffer_days.map(|v| v as f64)),
            ("animation_duration_ms", self.animation_duration_ms.map(|v| v as f64)),
            ("vertical_debounce_ms", self.vertical_debounce_ms.map(|v| v as f64)),
            ("loading_threshold_ms", self.loading_threshold_ms.map(|v| v as f64)),
        ]
    }

    /// Whether no override is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().iter().all(|(_, v)| v.is_none())
    }

    /// Apply every valid override onto `config`.
    pub fn apply_to(&self, config: &mut TimelineConfig) {
        for (key, value) in self.entries() {
            let (Some(value), Some(spec)) = (value, field_spec(key)) else {
                continue;
            };
            match spec.check(value) {
                Ok(value) => config.set(key, value),
                Err(e) => warn_fallback(&e, config.get(key)),
            }
        }
    }
}

// ============================================================================
// Builder for TimelineConfig
// ============================================================================

/// Builder for constructing `TimelineConfig` with fluent API.
///
/// The built configuration is sanitized, so invalid values fall back to
/// their defaults.
#[derive(Debug, Default)]
#[must_use]
pub struct TimelineConfigBuilder {
    config: TimelineConfig,
}

impl TimelineConfigBuilder {
    /// Start from an existing configuration, e.g. a preset.
    pub const fn from_config(config: TimelineConfig) -> Self {
        Self { config }
    }

    pub const fn day_width(mut self, width: f64) -> Self {
        self.config.day_width = width;
        self
    }

    pub const fn day_margin(mut self, margin: f64) -> Self {
        self.config.day_margin = margin;
        self
    }

    pub const fn dates_height(mut self, height: f64) -> Self {
        self.config.dates_height = height;
        self
    }

    pub const fn row_height(mut self, height: f64) -> Self {
        self.config.row_height = height;
        self
    }

    pub const fn row_margin(mut self, margin: f64) -> Self {
        self.config.row_margin = margin;
        self
    }

    pub const fn buffer_days(mut self, days: usize) -> Self {
        self.config.buffer_days = days;
        self
    }

    pub const fn animation_duration_ms(mut self, ms: u64) -> Self {
        self.config.animation_duration_ms = ms;
        self
    }

    pub const fn vertical_debounce_ms(mut self, ms: u64) -> Self {
        self.config.vertical_debounce_ms = ms;
        self
    }

    pub const fn loading_threshold_ms(mut self, ms: u64) -> Self {
        self.config.loading_threshold_ms = ms;
        self
    }

    /// Build the `TimelineConfig`.
    #[must_use]
    pub fn build(self) -> TimelineConfig {
        if self.config.is_valid() {
            self.config
        } else {
            self.config.sanitized()
        }
    }
}
