//! Days command handler.
//!
//! Implements the `days` subcommand: aggregated per-day summaries as JSON.

use super::common::{OutputTarget, load_input, to_json, write_output};
use crate::data::TimelineDataManager;
use anyhow::Result;
use std::path::PathBuf;

/// Days command configuration
#[derive(Debug, Clone)]
pub struct DaysConfig {
    pub input: PathBuf,
    pub output_file: Option<PathBuf>,
    /// Drop days without elements, capacity or stages
    pub non_empty: bool,
}

/// Run the days command.
pub fn run_days(config: DaysConfig) -> Result<()> {
    let input = load_input(&config.input)?;
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

    let text = if config.non_empty {
        let kept: Vec<_> = days.iter().filter(|day| !day.is_empty()).collect();
        tracing::debug!("Keeping {} of {} days", kept.len(), days.len());
        to_json(&kept)?
    } else {
        to_json(&*days)?
    };
    write_output(&text, &OutputTarget::from_option(config.output_file))
}
