//! Integration tests for the timeline data manager.
//!
//! These tests cover aggregation, row packing and the reference-stable
//! caching contract against a shared fixture.

use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use timeline_strip::{
    AlertLevel, FormattedDays, TimelineDataManager, TimelineInput, data::CacheStats,
};

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn sample_input() -> TimelineInput {
    let path = Path::new(FIXTURES_DIR).join("sample_timeline.json");
    let text = std::fs::read_to_string(path).expect("fixture should exist");
    serde_json::from_str(&text).expect("fixture should parse")
}

fn days_of(manager: &mut TimelineDataManager, input: &TimelineInput) -> FormattedDays {
    manager.formatted_days(
        input.start_date,
        input.end_date,
        &input.elements,
        &input.elements_done,
        &input.capacities,
        &input.stages,
        input.max_capacity,
    )
}

fn stage_ids(rows: &[timeline_strip::StageRow]) -> Vec<Vec<&str>> {
    rows.iter()
        .map(|row| row.iter().map(|bar| bar.id.as_str()).collect())
        .collect()
}

// ============================================================================
// Day Aggregation
// ============================================================================

mod aggregation {
    use super::*;

    #[test]
    fn test_one_day_per_date() {
        let input = sample_input();
        let days = days_of(&mut TimelineDataManager::new(), &input);
        assert_eq!(days.len(), 31);
        assert_eq!(days[0].date, input.start_date);
        assert_eq!(days[30].date, input.end_date);
        assert!(days.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_activity_counts_and_dedup() {
        let days = days_of(&mut TimelineDataManager::new(), &sample_input());
        let jan2 = &days[1];
        assert_eq!(jan2.activity_total, 2);
        assert_eq!(jan2.activity_completed, 2);
        assert_eq!(jan2.element_completed, 2);
        let ids: Vec<&str> = jan2.pre_ids.iter().map(String::as_str).collect();
        assert_eq!(ids, vec!["e1", "e2"]);
    }

    #[test]
    fn test_finished_does_not_complete_delivrable() {
        let days = days_of(&mut TimelineDataManager::new(), &sample_input());
        let jan3 = &days[2];
        assert_eq!(jan3.delivrable_total, 2);
        assert_eq!(jan3.delivrable_completed, 1);
        // generic classification still counts both
        assert_eq!(jan3.element_completed, 2);
    }

    #[test]
    fn test_pending_and_other_statuses() {
        let days = days_of(&mut TimelineDataManager::new(), &sample_input());
        let jan4 = &days[3];
        assert_eq!(jan4.task_total, 2);
        assert_eq!(jan4.task_completed, 0);
        assert_eq!(jan4.element_pending, 2);

        let jan5 = &days[4];
        assert_eq!(jan5.activity_total, 1);
        assert_eq!(jan5.activity_completed, 0);
        assert_eq!(jan5.element_completed, 0);
        assert_eq!(jan5.element_pending, 0);
    }

    #[test]
    fn test_elements_done_are_counted() {
        let days = days_of(&mut TimelineDataManager::new(), &sample_input());
        let jan6 = &days[5];
        assert_eq!(jan6.task_total, 1);
        assert_eq!(jan6.task_completed, 1);
    }

    #[test]
    fn test_alert_level_boundaries() {
        let days = days_of(&mut TimelineDataManager::new(), &sample_input());
        // exactly 80%
        assert_eq!(days[1].alert_level, AlertLevel::Normal);
        // 80.1%
        assert_eq!(days[2].alert_level, AlertLevel::Warning);
        // exactly 100%
        assert_eq!(days[3].alert_level, AlertLevel::Warning);
        // 100.1%
        assert_eq!(days[4].alert_level, AlertLevel::Critical);
        // no capacity record
        assert_eq!(days[10].alert_level, AlertLevel::Normal);
        assert_eq!(days[10].capeff, 0.0);
    }

    #[test]
    fn test_capacity_fields_copied() {
        let days = days_of(&mut TimelineDataManager::new(), &sample_input());
        let jan2 = &days[1];
        assert_eq!(jan2.capeff, 10.0);
        assert_eq!(jan2.buseff, 8.0);
        assert_eq!(jan2.compeff, 2.0);
        assert_eq!(jan2.eicon.as_deref(), Some("ok"));
        assert_eq!(jan2.workload_fraction, 1.0);
        assert_eq!(days[2].eicon, None);
    }

    #[test]
    fn test_stage_coverage() {
        let days = days_of(&mut TimelineDataManager::new(), &sample_input());
        assert_eq!(days[0].stage_count, 1);
        // Jan 8 is covered by s2 and s3
        assert_eq!(days[7].stage_count, 2);
        assert_eq!(days[30].stage_count, 0);
    }

    #[test]
    fn test_inverted_range_yields_no_days() {
        let mut input = sample_input();
        std::mem::swap(&mut input.start_date, &mut input.end_date);
        let days = days_of(&mut TimelineDataManager::new(), &input);
        assert!(days.is_empty());
    }

    #[test]
    fn test_alert_level_serializes_as_number() {
        let days = days_of(&mut TimelineDataManager::new(), &sample_input());
        let value = serde_json::to_value(&days[4]).unwrap();
        assert_eq!(value["alert_level"], json!(2));
        assert_eq!(value["date"], json!("2024-01-05"));
    }
}

// ============================================================================
// Row Packing
// ============================================================================

mod rows {
    use super::*;

    #[test]
    fn test_reference_stage_layout() {
        let input = sample_input();
        let mut manager = TimelineDataManager::new();
        let days = days_of(&mut manager, &input);
        let rows = manager.formatted_stage_rows(
            input.start_date,
            input.end_date,
            &days,
            &input.stages,
            &input.elements,
        );

        assert!(rows.len() >= 2);
        assert_eq!(
            stage_ids(&rows),
            vec![vec!["s1", "s2", "s4"], vec!["s3", "s5"]]
        );
        let placed: usize = rows.iter().map(Vec::len).sum();
        assert_eq!(placed, 5);
        for row in rows.iter() {
            for (i, bar) in row.iter().enumerate() {
                for other in &row[i + 1..] {
                    assert!(!bar.conflicts_with(other), "{} overlaps {}", bar.id, other.id);
                }
            }
        }
    }

    #[test]
    fn test_stage_progress_from_related_elements() {
        let input = sample_input();
        let mut manager = TimelineDataManager::new();
        let days = days_of(&mut manager, &input);
        let rows = manager.formatted_stage_rows(
            input.start_date,
            input.end_date,
            &days,
            &input.stages,
            &input.elements,
        );
        let s1 = &rows[0][0];
        assert_eq!(s1.id, "s1");
        assert_eq!(s1.progress, Some(0.5));
        assert_eq!(s1.color.as_deref(), Some("#aa0000"));
        assert_eq!(rows[0][1].progress, None);
    }

    #[test]
    fn test_timeline_rows_add_element_spans() {
        let input = sample_input();
        let mut manager = TimelineDataManager::new();
        let days = days_of(&mut manager, &input);
        let rows = manager.formatted_timeline_rows(
            input.start_date,
            input.end_date,
            &days,
            &input.stages,
            &input.elements,
        );

        assert_eq!(rows.len(), 3);
        let span = &rows[2][0];
        assert_eq!(span.id, "e6");
        assert_eq!((span.start_index, span.end_index), (3, 8));
        assert_eq!(span.progress, Some(0.0));
    }

    #[test]
    fn test_partial_stage_is_clamped() {
        let input = sample_input();
        let stages = vec![
            json!({"id": "early", "sdate": "2023-12-25", "edate": "2024-01-02"}),
            json!({"id": "late", "sdate": "2024-01-30", "edate": "2024-02-20"}),
        ];
        let mut manager = TimelineDataManager::new();
        let days = days_of(&mut manager, &input);
        let rows =
            manager.formatted_stage_rows(input.start_date, input.end_date, &days, &stages, &[]);

        assert_eq!(rows.len(), 1);
        assert_eq!((rows[0][0].start_index, rows[0][0].end_index), (0, 1));
        assert_eq!((rows[0][1].start_index, rows[0][1].end_index), (29, 30));
    }

    #[test]
    fn test_no_days_no_rows() {
        let input = sample_input();
        let mut manager = TimelineDataManager::new();
        let rows = manager.formatted_stage_rows(
            input.start_date,
            input.end_date,
            &[],
            &input.stages,
            &input.elements,
        );
        assert!(rows.is_empty());
    }
}

// ============================================================================
// Caching
// ============================================================================

mod caching {
    use super::*;

    #[test]
    fn test_structurally_equal_arguments_return_same_reference() {
        let input = sample_input();
        let copy = input.clone();
        let mut manager = TimelineDataManager::new();

        let first = days_of(&mut manager, &input);
        let second = days_of(&mut manager, &copy);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(manager.cache_stats(), CacheStats { hits: 1, misses: 1 });
    }

    #[test]
    fn test_any_changed_argument_invalidates() {
        let base = sample_input();
        let mut variants: Vec<(&str, TimelineInput)> = Vec::new();

        let mut v = base.clone();
        v.start_date = v.start_date.succ_opt().unwrap();
        variants.push(("start_date", v));

        let mut v = base.clone();
        v.end_date = v.end_date.succ_opt().unwrap();
        variants.push(("end_date", v));

        let mut v = base.clone();
        v.elements[0]["status"] = json!("pending");
        variants.push(("elements", v));

        let mut v = base.clone();
        v.elements_done.pop();
        variants.push(("elements_done", v));

        let mut v = base.clone();
        v.capacities[0]["buseff"] = json!(9);
        variants.push(("capacities", v));

        let mut v = base.clone();
        v.stages[0]["edate"] = json!("2024-01-04");
        variants.push(("stages", v));

        let mut v = base.clone();
        v.max_capacity = 9.0;
        variants.push(("max_capacity", v));

        for (field, variant) in variants {
            let mut manager = TimelineDataManager::new();
            let original = days_of(&mut manager, &base);
            let changed = days_of(&mut manager, &variant);
            assert!(!Arc::ptr_eq(&original, &changed), "changing {field} must invalidate");
        }
    }

    #[test]
    fn test_content_change_updates_values() {
        let base = sample_input();
        let mut variant = base.clone();
        variant.capacities[0]["buseff"] = json!(9);

        let mut manager = TimelineDataManager::new();
        let _ = days_of(&mut manager, &base);
        let changed = days_of(&mut manager, &variant);
        assert_eq!(changed[1].buseff, 9.0);
        assert_eq!(changed[1].alert_level, AlertLevel::Warning);
    }

    #[test]
    fn test_key_order_does_not_matter() {
        let mut manager = TimelineDataManager::new();
        let input = sample_input();
        let a = vec![json!({"pre_id": "x", "date": "2024-01-02", "nat": "task"})];
        let b = vec![json!({"nat": "task", "date": "2024-01-02", "pre_id": "x"})];

        let first = manager.formatted_days(input.start_date, input.end_date, &a, &[], &[], &[], 0.0);
        let second = manager.formatted_days(input.start_date, input.end_date, &b, &[], &[], &[], 0.0);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_clear_cache_recomputes() {
        let input = sample_input();
        let mut manager = TimelineDataManager::new();
        let first = days_of(&mut manager, &input);
        manager.clear_cache();
        let second = days_of(&mut manager, &input);
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first, second);
    }

    #[test]
    fn test_row_cache_independent_of_day_cache() {
        let input = sample_input();
        let mut manager = TimelineDataManager::new();
        let days = days_of(&mut manager, &input);
        let rows = manager.formatted_stage_rows(
            input.start_date,
            input.end_date,
            &days,
            &input.stages,
            &input.elements,
        );

        let mut other = input.clone();
        other.max_capacity = 1.0;
        let _ = days_of(&mut manager, &other);

        let again = manager.formatted_stage_rows(
            input.start_date,
            input.end_date,
            &days,
            &input.stages,
            &input.elements,
        );
        assert!(Arc::ptr_eq(&rows, &again));
    }
}
