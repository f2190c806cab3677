//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements one subcommand on top of the library API.

mod common;
mod config;
mod days;
mod detail;
mod rows;
mod window;

pub use common::{OutputTarget, load_input, resolve_config, write_output};
pub use config::{ConfigView, run_config};
pub use days::{DaysConfig, run_days};
pub use detail::{DetailConfig, run_detail};
pub use rows::{RowsConfig, run_rows};
pub use window::{WindowConfig, run_window};
