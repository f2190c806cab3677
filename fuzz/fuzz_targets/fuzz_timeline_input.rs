#![no_main]
use libfuzzer_sys::fuzz_target;
use timeline_strip::{TimelineDataManager, TimelineInput};

/// Fuzz the full formatting path.
///
/// Any document that deserializes as a `TimelineInput` must format into days
/// and rows without panicking, however malformed its records are. Ranges
/// longer than ten years are skipped to keep iterations fast.
fuzz_target!(|data: &[u8]| {
    let Ok(input) = serde_json::from_slice::<TimelineInput>(data) else {
        return;
    };
    if input.day_count() > 3660 {
        return;
    }
    let mut manager = TimelineDataManager::new();
    let days = manager.formatted_days(
        input.start_date,
        input.end_date,
        &input.elements,
        &input.elements_done,
        &input.capacities,
        &input.stages,
        input.max_capacity,
    );
    assert_eq!(days.len(), input.day_count());
    let rows = manager.formatted_timeline_rows(
        input.start_date,
        input.end_date,
        &days,
        &input.stages,
        &input.elements,
    );
    for row in rows.iter() {
        for (i, bar) in row.iter().enumerate() {
            assert!(bar.start_index <= bar.end_index);
            assert!(bar.end_index < days.len());
            for other in &row[i + 1..] {
                assert!(!bar.conflicts_with(other));
            }
        }
    }
});
