//! Configuration file loading and discovery.
//!
//! Config files are flat YAML maps. They go through the same tolerant intake
//! as in-memory maps, so a bad value in a file falls back to its default
//! instead of failing the load.

use super::types::{ConfigOverrides, TimelineConfig};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".timeline-strip.yaml",
    ".timeline-strip.yml",
    "timeline-strip.yaml",
    "timeline-strip.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. User config directory (~/.config/timeline-strip/)
/// 4. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path
        && path.exists()
    {
        return Some(path.to_path_buf());
    }

    if let Ok(cwd) = std::env::current_dir()
        && let Some(path) = find_config_in_dir(&cwd)
    {
        return Some(path);
    }

    if let Some(config_dir) = dirs::config_dir()
        && let Some(path) = find_config_in_dir(&config_dir.join("timeline-strip"))
    {
        return Some(path);
    }

    if let Some(home) = dirs::home_dir()
        && let Some(path) = find_config_in_dir(&home)
    {
        return Some(path);
    }

    None
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
    /// The document is valid YAML but not a flat key/value map
    NotAMap(PathBuf),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "Config file not found: {}", path.display()),
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
            Self::NotAMap(path) => {
                write!(f, "Config file is not a key/value map: {}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) | Self::NotAMap(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Read a config file into a flat JSON map.
pub fn read_config_map(path: &Path) -> Result<Map<String, Value>, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Map::new());
    }
    match serde_yaml::from_str::<Value>(&content)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        _ => Err(ConfigFileError::NotAMap(path.to_path_buf())),
    }
}

/// Load a `TimelineConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<TimelineConfig, ConfigFileError> {
    load_config_file_with_overrides(path, &ConfigOverrides::default())
}

/// Load a `TimelineConfig` from a YAML file with programmatic overrides on top.
pub fn load_config_file_with_overrides(
    path: &Path,
    overrides: &ConfigOverrides,
) -> Result<TimelineConfig, ConfigFileError> {
    let map = read_config_map(path)?;
    Ok(TimelineConfig::from_map_with_overrides(&map, overrides))
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (TimelineConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (TimelineConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (TimelineConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file listing every key with its default.
#[must_use]
pub fn generate_example_config() -> String {
    let defaults = TimelineConfig::default();
    let body = serde_yaml::to_string(&defaults).unwrap_or_default();
    format!(
        "# timeline-strip configuration\n\
         # Place this file at .timeline-strip.yaml in the working directory\n\
         # or in ~/.config/timeline-strip/. Invalid values fall back to the\n\
         # defaults shown here.\n\n{body}"
    )
}
