#![no_main]
use libfuzzer_sys::fuzz_target;
use timeline_strip::config::{TimelineConfig, Validatable};

/// Fuzz configuration intake.
///
/// Any JSON object must produce a valid configuration: bad values fall back
/// to defaults instead of failing.
fuzz_target!(|data: &[u8]| {
    let Ok(serde_json::Value::Object(map)) = serde_json::from_slice(data) else {
        return;
    };
    let config = TimelineConfig::from_map(&map);
    assert!(config.is_valid(), "{:?}", config.validate());
    assert!(config.day_step() > 0.0);
});
