#![no_main]
use libfuzzer_sys::fuzz_target;
use timeline_strip::model::{CapacityRecord, ElementRecord, StageRecord};

/// Fuzz boundary record parsing with arbitrary JSON values.
///
/// Parsing must reject or accept, never panic. Accepted stages always have
/// an ordered span.
fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    let _ = ElementRecord::from_value(&value);
    let _ = CapacityRecord::from_value(&value);
    if let Some(stage) = StageRecord::from_value(&value) {
        assert!(stage.sdate <= stage.edate);
    }
});
