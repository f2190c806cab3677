//! Rows command handler.
//!
//! Implements the `rows` subcommand: packed stage (or full timeline) rows.

use super::common::{OutputTarget, load_input, to_json, write_output};
use crate::data::TimelineDataManager;
use anyhow::Result;
use std::path::PathBuf;

/// Rows command configuration
#[derive(Debug, Clone)]
pub struct RowsConfig {
    pub input: PathBuf,
    pub output_file: Option<PathBuf>,
    /// Include spanning elements alongside stages
    pub timeline: bool,
}

/// Run the rows command.
pub fn run_rows(config: RowsConfig) -> Result<()> {
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

    let rows = if config.timeline {
        manager.formatted_timeline_rows(
            input.start_date,
            input.end_date,
            &days,
            &input.stages,
            &input.elements,
        )
    } else {
        manager.formatted_stage_rows(
            input.start_date,
            input.end_date,
            &days,
            &input.stages,
            &input.elements,
        )
    };

    let bars: usize = rows.iter().map(Vec::len).sum();
    tracing::info!("Packed {bars} bars into {} rows", rows.len());
    write_output(&to_json(&*rows)?, &OutputTarget::from_option(config.output_file))
}
