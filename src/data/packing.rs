//! Stage bar construction and greedy row packing.

use crate::model::{BarKind, Day, ElementRecord, StageBar, StageRecord, StageRow};
use crate::utils::day_offset;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Map an inclusive date span onto day indices of a timeline starting at
/// `origin` with `day_count` days.
///
/// Spans partially outside are clamped to the boundary index; spans entirely
/// outside yield `None`.
#[must_use]
pub fn map_span(
    origin: NaiveDate,
    day_count: usize,
    start: NaiveDate,
    end: NaiveDate,
) -> Option<(usize, usize)> {
    if day_count == 0 {
        return None;
    }
    let (start, end) = if start <= end { (start, end) } else { (end, start) };
    let last = day_count as i64 - 1;
    let from = day_offset(origin, start);
    let to = day_offset(origin, end);
    if to < 0 || from > last {
        return None;
    }
    Some((from.max(0) as usize, to.min(last) as usize))
}

/// Completion lookup for related-element progress.
struct CompletionIndex<'a> {
    completed: HashMap<&'a str, bool>,
}

impl<'a> CompletionIndex<'a> {
    fn new(elements: &'a [ElementRecord]) -> Self {
        let completed = elements
            .iter()
            .map(|e| (e.pre_id.as_str(), e.is_completed()))
            .collect();
        Self { completed }
    }

    fn progress(&self, related: &[String]) -> Option<f64> {
        if related.is_empty() {
            return None;
        }
        let done = related
            .iter()
            .filter(|id| self.completed.get(id.as_str()).copied().unwrap_or(false))
            .count();
        Some(done as f64 / related.len() as f64)
    }
}

/// Build bars for stages, dropping those entirely outside the timeline.
#[must_use]
pub fn stage_bars(days: &[Day], stages: &[StageRecord], elements: &[ElementRecord]) -> Vec<StageBar> {
    let Some(origin) = days.first().map(|d| d.date) else {
        return Vec::new();
    };
    let completion = CompletionIndex::new(elements);

    stages
        .iter()
        .filter_map(|stage| {
            let Some((start_index, end_index)) = map_span(origin, days.len(), stage.sdate, stage.edate)
            else {
                tracing::debug!("Dropping stage {} outside the timeline", stage.id);
                return None;
            };
            Some(StageBar {
                id: stage.id.clone(),
                kind: BarKind::from_type(&stage.kind),
                start_index,
                end_index,
                color: stage.color.clone(),
                project_id: stage.project_id.clone(),
                label: stage.label.clone(),
                related: stage.related.clone(),
                progress: completion.progress(&stage.related),
                raw: stage.raw.clone(),
            })
        })
        .collect()
}

/// Build bars for elements that carry both `sdate` and `edate`.
#[must_use]
pub fn element_bars(days: &[Day], elements: &[ElementRecord]) -> Vec<StageBar> {
    let Some(origin) = days.first().map(|d| d.date) else {
        return Vec::new();
    };

    elements
        .iter()
        .filter_map(|element| {
            let (sdate, edate) = element.span()?;
            let (start_index, end_index) = map_span(origin, days.len(), sdate, edate)?;
            Some(StageBar {
                id: element.pre_id.clone(),
                kind: BarKind::from_nature(element.nature),
                start_index,
                end_index,
                color: element.color.clone(),
                project_id: element.project_id.clone(),
                label: element.label.clone(),
                related: Vec::new(),
                progress: Some(if element.is_completed() { 1.0 } else { 0.0 }),
                raw: element.raw.clone(),
            })
        })
        .collect()
}

/// Greedy first-fit row packing.
///
/// Bars are placed in input order into the first row where they conflict
/// with no bar already placed; a new row is opened when none fits. Each row
/// is kept sorted by start index.
#[must_use]
pub fn pack_rows(bars: Vec<StageBar>) -> Vec<StageRow> {
    let mut rows: Vec<StageRow> = Vec::new();

    for bar in bars {
        let slot = rows.iter().position(|row| fits(row, &bar));
        match slot {
            Some(i) => {
                let row = &mut rows[i];
                let at = row.partition_point(|b| b.start_index <= bar.start_index);
                row.insert(at, bar);
            }
            None => rows.push(vec![bar]),
        }
    }

    rows
}

fn fits(row: &[StageBar], bar: &StageBar) -> bool {
    // Bars starting after `bar` ends cannot intersect it.
    let candidates = row.partition_point(|b| b.start_index <= bar.end_index);
    !row[..candidates].iter().any(|b| b.conflicts_with(bar))
}
