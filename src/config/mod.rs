//! Configuration module for timeline-strip.
//!
//! This module provides:
//! - A typed [`TimelineConfig`] with declared bounds per key
//! - Tolerant intake from flat maps and YAML files (invalid values fall back
//!   to defaults with a warning, never an error)
//! - Programmatic overrides layered over map or file values
//! - Named density presets
//! - An initialize-once [`ConfigRegistry`]
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use timeline_strip::config::{ConfigRegistry, TimelineConfig, ConfigPreset};
//!
//! let mut registry = ConfigRegistry::new();
//! registry.initialize(TimelineConfig::from_preset(ConfigPreset::Compact));
//!
//! let config = registry.get()?;
//! println!("one day spans {}px", config.day_step());
//! ```
//!
//! # Configuration File
//!
//! Place a `.timeline-strip.yaml` file in your working directory or
//! `~/.config/timeline-strip/`:
//!
//! ```yaml
//! day_width: 72
//! buffer_days: 8
//! ```

mod defaults;
pub mod file;
mod registry;
mod types;
mod validation;

pub use defaults::{
    ConfigPreset, DEFAULT_ANIMATION_DURATION_MS, DEFAULT_BUFFER_DAYS, DEFAULT_DATES_HEIGHT,
    DEFAULT_DAY_MARGIN, DEFAULT_DAY_WIDTH, DEFAULT_LOADING_THRESHOLD_MS, DEFAULT_ROW_HEIGHT,
    DEFAULT_ROW_MARGIN, DEFAULT_VERTICAL_DEBOUNCE_MS,
};
pub use registry::ConfigRegistry;
pub use types::{ConfigOverrides, TimelineConfig, TimelineConfigBuilder};
pub use validation::{ConfigError, FIELD_SPECS, FieldKind, FieldSpec, Validatable, field_spec};

pub use file::{
    ConfigFileError, discover_config_file, generate_example_config, load_config_file,
    load_config_file_with_overrides, load_or_default, read_config_map,
};

/// Generate a JSON Schema for the `TimelineConfig` configuration format.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(TimelineConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
