//! Day aggregation.
//!
//! Turns parsed element, capacity and stage records into one [`Day`] per
//! calendar date of the timeline.

use crate::model::{AlertLevel, CapacityRecord, Day, ElementNature, ElementRecord, StageRecord};
use crate::utils::{day_offset, iter_days};
use chrono::NaiveDate;

/// Build the day sequence for `[start, end]`.
///
/// `elements_done` are bucketed exactly like `elements`; an element id is
/// counted at most once per day across both collections.
#[must_use]
pub fn aggregate_days(
    start: NaiveDate,
    end: NaiveDate,
    elements: &[ElementRecord],
    elements_done: &[ElementRecord],
    capacities: &[CapacityRecord],
    stages: &[StageRecord],
    max_capacity: f64,
) -> Vec<Day> {
    let mut days: Vec<Day> = iter_days(start, end).map(Day::new).collect();
    if days.is_empty() {
        return days;
    }

    for element in elements.iter().chain(elements_done) {
        if let Some(day) = day_index(start, days.len(), element.date).map(|i| &mut days[i]) {
            count_element(day, element);
        }
    }

    for capacity in capacities {
        if let Some(day) = day_index(start, days.len(), capacity.date).map(|i| &mut days[i]) {
            apply_capacity(day, capacity, max_capacity);
        }
    }

    let last = days.len() - 1;
    for stage in stages {
        let from = day_offset(start, stage.sdate).max(0);
        let to = day_offset(start, stage.edate).min(last as i64);
        if from > to {
            continue;
        }
        for day in &mut days[from as usize..=to as usize] {
            day.stage_count += 1;
        }
    }

    days
}

fn day_index(start: NaiveDate, len: usize, date: NaiveDate) -> Option<usize> {
    let offset = day_offset(start, date);
    (0..len as i64).contains(&offset).then_some(offset as usize)
}

fn count_element(day: &mut Day, element: &ElementRecord) {
    if !day.pre_ids.insert(element.pre_id.clone()) {
        return;
    }

    let completes = element
        .status
        .as_ref()
        .is_some_and(|status| status.completes(element.nature));
    match element.nature {
        ElementNature::Activity => {
            day.activity_total += 1;
            day.activity_completed += u32::from(completes);
        }
        ElementNature::Delivrable => {
            day.delivrable_total += 1;
            day.delivrable_completed += u32::from(completes);
        }
        ElementNature::Task => {
            day.task_total += 1;
            day.task_completed += u32::from(completes);
        }
        ElementNature::Other => {}
    }

    if element.is_completed() {
        day.element_completed += 1;
    } else if element.is_pending() {
        day.element_pending += 1;
    }
}

fn apply_capacity(day: &mut Day, capacity: &CapacityRecord, max_capacity: f64) {
    day.capeff = capacity.capeff;
    day.buseff = capacity.buseff;
    day.compeff = capacity.compeff;
    day.eicon.clone_from(&capacity.eicon);
    day.alert_level = AlertLevel::from_workload(capacity.buseff, capacity.capeff);
    day.workload_fraction = if max_capacity > 0.0 && max_capacity.is_finite() {
        (capacity.buseff / max_capacity).clamp(0.0, 1.0)
    } else {
        0.0
    };
}
