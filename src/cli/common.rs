//! Shared plumbing for command handlers: config resolution, input loading
//! and output writing.

use crate::config::{
    ConfigOverrides, ConfigPreset, TimelineConfig, discover_config_file, read_config_map,
};
use crate::error::TimelineError;
use crate::model::TimelineInput;
use crate::utils::format_iso_date;
use anyhow::{Context, Result, bail};
use std::io::Read as _;
use std::path::{Path, PathBuf};

/// Where command output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write to stdout
    Stdout,
    /// Write to a file
    File(PathBuf),
}

impl OutputTarget {
    /// Create output target from optional path
    #[must_use]
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => Self::File(p),
            None => Self::Stdout,
        }
    }
}

/// Write output to the target.
pub fn write_output(content: &str, target: &OutputTarget) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            println!("{content}");
            Ok(())
        }
        OutputTarget::File(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            tracing::info!("Output written to {}", path.display());
            Ok(())
        }
    }
}

/// Resolve the effective configuration.
///
/// Layering, lowest first: defaults or the named preset, then the discovered
/// config file. An explicit `--config` path must exist.
pub fn resolve_config(
    explicit_path: Option<&Path>,
    preset: Option<&str>,
) -> Result<(TimelineConfig, Option<PathBuf>)> {
    let base = match preset {
        Some(name) => {
            let Some(preset) = ConfigPreset::from_name(name) else {
                let known: Vec<&str> = ConfigPreset::all().iter().map(ConfigPreset::name).collect();
                bail!("Unknown preset '{name}' (expected one of: {})", known.join(", "));
            };
            TimelineConfig::from_preset(preset)
        }
        None => TimelineConfig::default(),
    };

    if let Some(path) = explicit_path
        && !path.exists()
    {
        bail!("Config file not found: {}", path.display());
    }

    let Some(path) = discover_config_file(explicit_path) else {
        return Ok((base, None));
    };
    let map = read_config_map(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    tracing::info!("Loaded configuration from {}", path.display());
    Ok((base.merge(&map, &ConfigOverrides::default()), Some(path)))
}

/// Read a [`TimelineInput`] document from a file, or stdin for `-`.
pub fn load_input(path: &Path) -> Result<TimelineInput> {
    let text = if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read input from stdin")?;
        text
    } else {
        std::fs::read_to_string(path).map_err(|e| TimelineError::io(path, e))?
    };

    let input: TimelineInput =
        serde_json::from_str(&text).map_err(|source| TimelineError::Json {
            context: format!("parsing timeline input {}", path.display()),
            source,
        })?;

    if input.start_date > input.end_date {
        return Err(TimelineError::InvalidRange {
            start: format_iso_date(input.start_date),
            end: format_iso_date(input.end_date),
        }
        .into());
    }
    tracing::debug!(
        "Loaded {} elements, {} capacities, {} stages over {} days",
        input.elements.len(),
        input.capacities.len(),
        input.stages.len(),
        input.day_count()
    );
    Ok(input)
}

/// Serialize to pretty JSON.
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output")
}
