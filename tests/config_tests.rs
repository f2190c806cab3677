//! Integration tests for configuration intake, files, presets and the
//! registry.

use serde_json::{Map, Value, json};
use std::io::Write;
use timeline_strip::config::{
    ConfigFileError, ConfigOverrides, ConfigPreset, ConfigRegistry, TimelineConfig, Validatable,
    generate_json_schema, load_config_file, load_config_file_with_overrides, load_or_default,
};
use timeline_strip::{TimelineError, TimelineInput, TimelineState, timeline::NoopHost};

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn yaml_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .expect("temp file");
    write!(file, "{content}").expect("write temp file");
    file
}

// ============================================================================
// Map intake
// ============================================================================

#[test]
fn test_partial_map_merges_with_defaults() {
    let config = TimelineConfig::from_map(&object(json!({"row_height": 30})));
    let defaults = TimelineConfig::default();
    assert_eq!(config.row_height, 30.0);
    assert_eq!(config.day_width, defaults.day_width);
    assert_eq!(config.buffer_days, defaults.buffer_days);
}

#[test]
fn test_every_invalid_value_falls_back() {
    let config = TimelineConfig::from_map(&object(json!({
        "day_width": "wide",
        "day_margin": -3,
        "dates_height": 5000,
        "row_height": null,
        "buffer_days": 2.5,
        "animation_duration_ms": -1,
    })));
    assert_eq!(config, TimelineConfig::default());
    assert!(config.is_valid());
}

#[test]
fn test_overrides_beat_map_values() {
    let overrides = ConfigOverrides {
        buffer_days: Some(12),
        animation_duration_ms: Some(0),
        ..ConfigOverrides::default()
    };
    let config = TimelineConfig::from_map_with_overrides(
        &object(json!({"buffer_days": 3, "animation_duration_ms": 500})),
        &overrides,
    );
    assert_eq!(config.buffer_days, 12);
    assert_eq!(config.animation_duration_ms, 0);
}

// ============================================================================
// Files
// ============================================================================

#[test]
fn test_yaml_file_with_overrides() {
    let file = yaml_file("day_width: 80\nday_margin: 6\nrow_height: 30\n");
    let overrides = ConfigOverrides {
        row_height: Some(40.0),
        ..ConfigOverrides::default()
    };
    let config = load_config_file_with_overrides(file.path(), &overrides).unwrap();
    assert_eq!(config.day_width, 80.0);
    assert_eq!(config.day_step(), 74.0);
    assert_eq!(config.row_height, 40.0);
}

#[test]
fn test_malformed_yaml_is_a_parse_error() {
    let file = yaml_file("day_width: [unclosed\n");
    assert!(matches!(
        load_config_file(file.path()),
        Err(ConfigFileError::Parse(_))
    ));
}

#[test]
fn test_load_or_default_explicit_file() {
    let file = yaml_file("buffer_days: 9\n");
    let (config, source) = load_or_default(Some(file.path()));
    assert_eq!(config.buffer_days, 9);
    assert_eq!(source.as_deref(), Some(file.path()));
}

#[test]
fn test_schema_lists_fields() {
    let schema = generate_json_schema();
    for key in ["day_width", "buffer_days", "loading_threshold_ms"] {
        assert!(schema.contains(key), "schema is missing {key}");
    }
}

// ============================================================================
// Presets
// ============================================================================

#[test]
fn test_presets_round_trip_names() {
    for preset in ConfigPreset::all() {
        assert_eq!(ConfigPreset::from_name(preset.name()), Some(*preset));
        assert!(!preset.description().is_empty());
    }
}

// ============================================================================
// Registry
// ============================================================================

#[test]
fn test_registry_lifecycle() {
    let mut registry = ConfigRegistry::new();
    assert!(matches!(
        registry.get(),
        Err(TimelineError::ConfigNotInitialized)
    ));

    assert!(registry.initialize(TimelineConfig::compact_preset()));
    assert!(!registry.initialize(TimelineConfig::default()));
    assert_eq!(registry.get().unwrap().day_width, 36.0);

    registry.reset();
    assert!(!registry.is_initialized());
    assert!(registry.get().is_err());
}

#[test]
fn test_registry_sanitizes_on_initialize() {
    let mut registry = ConfigRegistry::new();
    registry.initialize(TimelineConfig {
        day_width: -5.0,
        ..TimelineConfig::default()
    });
    assert!(registry.get().unwrap().is_valid());
}

#[test]
fn test_timeline_requires_initialized_registry() {
    let registry = ConfigRegistry::new();
    let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let input = TimelineInput::empty(start, start);
    let result = TimelineState::new(&registry, NoopHost, input, 800.0);
    match result {
        Err(err) => assert!(err.to_string().contains("ConfigRegistry::initialize")),
        Ok(_) => panic!("expected ConfigNotInitialized"),
    }
}
