//! Config command handler.
//!
//! Implements the `config` subcommand: show the effective configuration,
//! its JSON schema, or an example file.

use super::common::{OutputTarget, write_output};
use crate::config::{
    TimelineConfig, Validatable, generate_example_config, generate_json_schema,
};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// What the config command prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigView {
    /// The resolved configuration as YAML
    #[default]
    Effective,
    /// JSON schema of the configuration format
    Schema,
    /// Commented example file with defaults
    Example,
}

/// Run the config command.
pub fn run_config(
    config: &TimelineConfig,
    source: Option<PathBuf>,
    view: ConfigView,
    output_file: Option<PathBuf>,
) -> Result<()> {
    let text = match view {
        ConfigView::Schema => generate_json_schema(),
        ConfigView::Example => generate_example_config(),
        ConfigView::Effective => {
            for error in config.validate() {
                tracing::warn!("{error}");
            }
            let origin = source.map_or_else(
                || "# source: built-in defaults\n".to_string(),
                |path| format!("# source: {}\n", path.display()),
            );
            let body = serde_yaml::to_string(config).context("Failed to render configuration")?;
            format!("{origin}{body}")
        }
    };
    write_output(text.trim_end(), &OutputTarget::from_option(output_file))
}
