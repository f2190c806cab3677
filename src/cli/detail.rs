//! Detail command handler.
//!
//! Implements the `detail` subcommand: the payload a host receives when a
//! day is tapped.

use super::common::{OutputTarget, load_input, to_json, write_output};
use crate::config::TimelineConfig;
use crate::timeline::{DayDetail, TimelineHost, TimelineState};
use crate::utils::day_offset;
use anyhow::{Result, bail};
use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::Arc;

/// Detail command configuration
#[derive(Debug, Clone)]
pub struct DetailConfig {
    pub input: PathBuf,
    pub output_file: Option<PathBuf>,
    pub date: NaiveDate,
}

/// Host that keeps the last opened detail.
#[derive(Debug, Default)]
struct CapturingHost {
    detail: Option<DayDetail>,
}

impl TimelineHost for CapturingHost {
    fn update_current_date(&mut self, _date: Option<&str>) {}

    fn open_day_detail(&mut self, detail: &DayDetail) {
        self.detail = Some(detail.clone());
    }
}

/// Run the detail command.
pub fn run_detail(config: DetailConfig, timeline_config: TimelineConfig) -> Result<()> {
    let input = load_input(&config.input)?;
    let index = day_offset(input.start_date, config.date);
    let Ok(index) = usize::try_from(index) else {
        bail!("{} is before the timeline start {}", config.date, input.start_date);
    };

    let mut timeline = TimelineState::with_config(
        Arc::new(timeline_config),
        CapturingHost::default(),
        input,
        0.0,
    );
    if !timeline.tap_day(index) {
        bail!("{} is outside the timeline", config.date);
    }
    let Some(detail) = timeline.host_mut().detail.take() else {
        bail!("No detail produced for {}", config.date);
    };
    write_output(&to_json(&detail)?, &OutputTarget::from_option(config.output_file))
}
