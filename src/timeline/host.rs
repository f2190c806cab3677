//! Callbacks from the timeline into the embedding application.

use crate::model::{AlertLevel, Day};
use crate::utils::format_iso_date;
use serde::Serialize;
use serde_json::Value;

/// Receiver for timeline events.
///
/// Both callbacks run synchronously on the thread driving the timeline.
pub trait TimelineHost {
    /// The day under the viewport center changed. `None` when the timeline
    /// has no days.
    fn update_current_date(&mut self, date: Option<&str>);

    /// A day was tapped.
    fn open_day_detail(&mut self, detail: &DayDetail);
}

/// Host that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHost;

impl TimelineHost for NoopHost {
    fn update_current_date(&mut self, _date: Option<&str>) {}

    fn open_day_detail(&mut self, _detail: &DayDetail) {}
}

/// Capacity figures of a tapped day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapacityInfo {
    pub capeff: f64,
    pub buseff: f64,
    pub compeff: f64,
    pub eicon: Option<String>,
    pub alert_level: AlertLevel,
}

/// Per-day counters shown alongside the element list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayInfos {
    pub activity_total: u32,
    pub activity_completed: u32,
    pub delivrable_total: u32,
    pub delivrable_completed: u32,
    pub task_total: u32,
    pub task_completed: u32,
    pub element_completed: u32,
    pub element_pending: u32,
    pub stage_count: u32,
}

/// Everything the host needs to open a day's detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayDetail {
    /// ISO `YYYY-MM-DD`
    pub date: String,
    pub capacity: CapacityInfo,
    pub pre_ids: Vec<String>,
    /// Raw element records landing on this day
    pub elements: Vec<Value>,
    pub infos: DayInfos,
}

impl DayDetail {
    #[must_use]
    pub fn from_day(day: &Day, elements: Vec<Value>) -> Self {
        Self {
            date: format_iso_date(day.date),
            capacity: CapacityInfo {
                capeff: day.capeff,
                buseff: day.buseff,
                compeff: day.compeff,
                eicon: day.eicon.clone(),
                alert_level: day.alert_level,
            },
            pre_ids: day.pre_ids.iter().cloned().collect(),
            elements,
            infos: DayInfos {
                activity_total: day.activity_total,
                activity_completed: day.activity_completed,
                delivrable_total: day.delivrable_total,
                delivrable_completed: day.delivrable_completed,
                task_total: day.task_total,
                task_completed: day.task_completed,
                element_completed: day.element_completed,
                element_pending: day.element_pending,
                stage_count: day.stage_count,
            },
        }
    }
}
