//! Integration tests for timeline orchestration: date callbacks, auto-scroll,
//! vertical debounce, the loading gate and disposal.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use timeline_strip::{
    ConfigRegistry, DayDetail, TimelineConfig, TimelineHost, TimelineInput, TimelineState,
};

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");
const MS: Duration = Duration::from_millis(1);

/// Host that records every callback.
#[derive(Debug, Default)]
struct RecordingHost {
    dates: Vec<Option<String>>,
    details: Vec<DayDetail>,
}

impl TimelineHost for RecordingHost {
    fn update_current_date(&mut self, date: Option<&str>) {
        self.dates.push(date.map(str::to_string));
    }

    fn open_day_detail(&mut self, detail: &DayDetail) {
        self.details.push(detail.clone());
    }
}

fn sample_input() -> TimelineInput {
    let path = Path::new(FIXTURES_DIR).join("sample_timeline.json");
    let text = std::fs::read_to_string(path).expect("fixture should exist");
    serde_json::from_str(&text).expect("fixture should parse")
}

/// Default geometry: 56px per day, 560px viewport shows 10 days.
fn timeline() -> TimelineState<RecordingHost> {
    let mut registry = ConfigRegistry::new();
    assert!(registry.initialize(TimelineConfig::default()));
    TimelineState::new(&registry, RecordingHost::default(), sample_input(), 560.0)
        .expect("registry is initialized")
}

fn timeline_with(config: TimelineConfig) -> TimelineState<RecordingHost> {
    TimelineState::with_config(
        Arc::new(config),
        RecordingHost::default(),
        sample_input(),
        560.0,
    )
}

// ============================================================================
// Current date callback
// ============================================================================

mod current_date {
    use super::*;

    #[test]
    fn test_reports_iso_date_on_change_only() {
        let now = Instant::now();
        let mut timeline = timeline();

        timeline.on_horizontal_scroll(0.0, now);
        timeline.on_horizontal_scroll(10.0, now);
        timeline.on_horizontal_scroll(56.0, now);

        assert_eq!(
            timeline.host().dates,
            vec![Some("2024-01-06".to_string()), Some("2024-01-07".to_string())]
        );
    }

    #[test]
    fn test_reports_none_for_empty_timeline() {
        let now = Instant::now();
        let mut timeline = timeline();
        let mut empty = sample_input();
        std::mem::swap(&mut empty.start_date, &mut empty.end_date);

        timeline.on_horizontal_scroll(0.0, now);
        assert!(timeline.set_input(empty, now));
        assert_eq!(timeline.host().dates.last(), Some(&None));
        assert_eq!(timeline.current_date(), None);
    }

    #[test]
    fn test_unchanged_input_keeps_days() {
        let now = Instant::now();
        let mut timeline = timeline();
        let before = timeline.days();
        assert!(!timeline.set_input(sample_input(), now));
        assert!(Arc::ptr_eq(&before, &timeline.days()));
    }
}

// ============================================================================
// Auto-scroll
// ============================================================================

mod auto_scroll {
    use super::*;

    #[test]
    fn test_scroll_to_date_animates() {
        let now = Instant::now();
        let mut timeline = timeline();
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 11).unwrap();

        assert_eq!(timeline.scroll_to_date(date, now), Some(560.0));
        timeline.tick(now + MS * 150);
        let halfway = timeline.horizontal_offset();
        assert!(halfway > 0.0 && halfway < 560.0, "{halfway}");

        timeline.tick(now + MS * 300);
        assert_eq!(timeline.horizontal_offset(), 560.0);
        assert!(!timeline.is_animating());
    }

    #[test]
    fn test_out_of_range_dates_clamp() {
        let now = Instant::now();
        let mut timeline = timeline();
        let before = chrono::NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
        assert_eq!(timeline.scroll_to_date(before, now), Some(0.0));
    }

    #[test]
    fn test_zero_duration_jumps() {
        let now = Instant::now();
        let mut timeline = timeline_with(TimelineConfig {
            animation_duration_ms: 0,
            ..TimelineConfig::default()
        });
        timeline.scroll_to_index(10, now);
        assert!(!timeline.is_animating());
        assert_eq!(timeline.horizontal_offset(), 560.0);
        assert_eq!(timeline.current_date().as_deref(), Some("2024-01-16"));
    }

    #[test]
    fn test_user_scroll_cancels_in_flight_animation() {
        let now = Instant::now();
        let mut timeline = timeline();
        timeline.scroll_to_index(20, now);
        timeline.tick(now + MS * 100);

        timeline.on_horizontal_scroll(56.0, now + MS * 120);
        timeline.tick(now + MS * 400);
        assert_eq!(timeline.horizontal_offset(), 56.0);
    }
}

// ============================================================================
// Vertical debounce
// ============================================================================

mod vertical {
    use super::*;

    #[test]
    fn test_debounce_coalesces_scroll_events() {
        let now = Instant::now();
        let mut timeline = timeline();
        timeline.tick(now + MS * 1000);

        timeline.on_vertical_scroll(10.0, now + MS * 1000);
        timeline.on_vertical_scroll(20.0, now + MS * 1100);
        assert_eq!(timeline.tick(now + MS * 1200), None);
        assert!(timeline.tick(now + MS * 1250).is_some());
        assert_eq!(timeline.tick(now + MS * 1300), None);
    }

    #[test]
    fn test_auto_scroll_targets_active_row() {
        let now = Instant::now();
        let mut timeline = timeline();

        // Center on Jan 12 (index 11): only s3 in row 1 covers it.
        timeline.on_horizontal_scroll(336.0, now);
        let state = timeline.tick(now + MS * 150).expect("debounce fired");
        assert_eq!(state.center_date_index, 11);
        assert_eq!(state.target_vertical_offset, Some(28.0));
        assert_eq!(timeline.vertical_offset(), 28.0);
    }

    #[test]
    fn test_disabled_auto_scroll_leaves_offset() {
        let now = Instant::now();
        let mut timeline = timeline();
        timeline.set_auto_scroll(false);
        timeline.on_vertical_scroll(90.0, now);
        timeline.on_horizontal_scroll(336.0, now);

        let state = timeline.tick(now + MS * 150).expect("debounce fired");
        assert!(state.target_vertical_offset.is_some());
        assert!(!state.enable_auto_scroll);
        assert_eq!(timeline.vertical_offset(), 90.0);
    }
}

// ============================================================================
// Loading gate
// ============================================================================

mod loading {
    use super::*;

    #[test]
    fn test_short_operation_never_shows_indicator() {
        let now = Instant::now();
        let mut timeline = timeline();
        timeline.begin_loading(now);
        assert!(!timeline.is_loading_visible(now + MS * 199));
        timeline.end_loading();
        assert!(!timeline.is_loading_visible(now + MS * 500));
    }

    #[test]
    fn test_long_operation_shows_until_end() {
        let now = Instant::now();
        let mut timeline = timeline();
        timeline.begin_loading(now);
        assert!(timeline.is_loading_visible(now + MS * 201));
        timeline.end_loading();
        assert!(!timeline.is_loading_visible(now + MS * 202));
    }
}

// ============================================================================
// Day detail and disposal
// ============================================================================

mod interaction {
    use super::*;

    #[test]
    fn test_tap_day_opens_detail() {
        let mut timeline = timeline();
        assert!(timeline.tap_day(1));

        let detail = &timeline.host().details[0];
        assert_eq!(detail.date, "2024-01-02");
        assert_eq!(detail.pre_ids, vec!["e1", "e2"]);
        assert_eq!(detail.elements.len(), 2);
        assert_eq!(detail.capacity.capeff, 10.0);
        assert_eq!(detail.capacity.eicon.as_deref(), Some("ok"));
        assert_eq!(detail.infos.activity_completed, 2);
    }

    #[test]
    fn test_tap_missing_day() {
        let mut timeline = timeline();
        assert!(!timeline.tap_day(31));
        assert!(timeline.host().details.is_empty());
    }

    #[test]
    fn test_dispose_silences_everything() {
        let now = Instant::now();
        let mut timeline = timeline();
        timeline.scroll_to_index(15, now);
        timeline.on_vertical_scroll(5.0, now);
        timeline.begin_loading(now);
        timeline.dispose();

        let reported = timeline.host().dates.len();
        timeline.on_horizontal_scroll(1000.0, now + MS * 10);
        assert_eq!(timeline.tick(now + MS * 1000), None);
        assert!(!timeline.is_loading_visible(now + MS * 1000));
        assert!(timeline.controller().is_disposed());
        assert_eq!(timeline.host().dates.len(), reported);
    }
}

// ============================================================================
// Canvas geometry
// ============================================================================

mod geometry {
    use super::*;

    fn on_screen(timeline: &TimelineState<RecordingHost>) -> Vec<usize> {
        let left = timeline.horizontal_offset();
        let right = left + 560.0;
        let width = timeline.config().day_width;
        timeline
            .visible_days()
            .iter()
            .filter(|item| item.offset < right && item.offset + width > left)
            .map(|item| item.index)
            .collect()
    }

    #[test]
    fn test_every_offset_shows_days() {
        let now = Instant::now();
        let mut timeline = timeline();
        let max = timeline.viewport().max_scroll_offset();
        assert_eq!(max, 1176.0);

        for offset in [0.0, 300.0, 616.0, 1000.0, max, max + 500.0] {
            timeline.on_horizontal_scroll(offset, now);
            let shown = on_screen(&timeline);
            assert!(shown.len() >= 10, "offset {offset}: {shown:?}");
            assert!(shown.contains(&timeline.center_index()), "offset {offset}");
        }
    }

    #[test]
    fn test_scroll_to_date_target_is_on_screen() {
        let now = Instant::now();
        let mut timeline = timeline();
        for day in [1, 12, 25, 31] {
            let date = chrono::NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
            timeline.scroll_to_date(date, now);
            timeline.tick(now + MS * 1000);
            let index = usize::try_from(day - 1).unwrap();
            assert!(on_screen(&timeline).contains(&index), "Jan {day}");
        }
    }

    #[test]
    fn test_negative_offset_is_clamped() {
        let now = Instant::now();
        let mut timeline = timeline();
        timeline.on_horizontal_scroll(-400.0, now);
        assert_eq!(timeline.horizontal_offset(), 0.0);
        assert_eq!(timeline.current_date().as_deref(), Some("2024-01-06"));
    }
}
