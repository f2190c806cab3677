//! Default values and presets for timeline-strip.

use super::types::TimelineConfig;

// ============================================================================
// Default Value Constants
// ============================================================================

/// Default width of one day column in pixels.
pub const DEFAULT_DAY_WIDTH: f64 = 60.0;

/// Default overlap between day columns in pixels.
pub const DEFAULT_DAY_MARGIN: f64 = 4.0;

/// Default height of the dates header in pixels.
pub const DEFAULT_DATES_HEIGHT: f64 = 80.0;

/// Default height of one stage row in pixels.
pub const DEFAULT_ROW_HEIGHT: f64 = 24.0;

/// Default gap between stage rows in pixels.
pub const DEFAULT_ROW_MARGIN: f64 = 4.0;

/// Default number of days rendered past each edge of the viewport.
pub const DEFAULT_BUFFER_DAYS: usize = 5;

/// Default scroll animation duration in milliseconds.
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 300;

/// Default vertical-scroll debounce in milliseconds.
pub const DEFAULT_VERTICAL_DEBOUNCE_MS: u64 = 150;

/// Default loading indicator threshold in milliseconds.
pub const DEFAULT_LOADING_THRESHOLD_MS: u64 = 200;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named density presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Balanced settings suitable for most screens
    Default,
    /// Narrow days and rows, more of the range on screen
    Compact,
    /// Wide days and tall rows for touch screens
    Comfortable,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Compact => "compact",
            Self::Comfortable => "comfortable",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" | "balanced" => Some(Self::Default),
            "compact" | "dense" => Some(Self::Compact),
            "comfortable" | "touch" | "wide" => Some(Self::Comfortable),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Balanced day width and row height",
            Self::Compact => "Narrow day columns with a larger render buffer",
            Self::Comfortable => "Wide day columns and tall rows for touch input",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Compact, Self::Comfortable]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl TimelineConfig {
    /// Create a `TimelineConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Compact => Self::compact_preset(),
            ConfigPreset::Comfortable => Self::comfortable_preset(),
        }
    }

    /// Compact preset.
    ///
    /// Narrow columns put more days in the viewport, so the buffer is
    /// widened to keep scrolling smooth.
    #[must_use]
    pub fn compact_preset() -> Self {
        Self {
            day_width: 36.0,
            day_margin: 2.0,
            dates_height: 56.0,
            row_height: 18.0,
            row_margin: 2.0,
            buffer_days: 10,
            ..Self::default()
        }
    }

    /// Comfortable preset.
    #[must_use]
    pub fn comfortable_preset() -> Self {
        Self {
            day_width: 96.0,
            day_margin: 6.0,
            dates_height: 100.0,
            row_height: 32.0,
            row_margin: 6.0,
            buffer_days: 3,
            animation_duration_ms: 400,
            ..Self::default()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
