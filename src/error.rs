//! Unified error types for timeline-strip.
//!
//! Most failure modes of the timeline engine are recovered locally (malformed
//! records are skipped, out-of-range indices are clamped, invalid configuration
//! values fall back to defaults). The errors in this module cover what is left:
//! state errors, unparseable boundary values, and I/O at the edges.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for timeline-strip operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TimelineError {
    /// Configuration was read before [`ConfigRegistry::initialize`] ran.
    ///
    /// [`ConfigRegistry::initialize`]: crate::config::ConfigRegistry::initialize
    #[error(
        "Timeline configuration has not been initialized: call \
         ConfigRegistry::initialize(config) once at application start before using the timeline"
    )]
    ConfigNotInitialized,

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A date string that is not ISO `YYYY-MM-DD`
    #[error("Invalid date for '{field}': '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { field: String, value: String },

    /// A date range whose start lies after its end
    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange { start: String, end: String },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization errors
    #[error("JSON error: {context}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// YAML (de)serialization errors
    #[error("YAML error: {context}")]
    Yaml {
        context: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for timeline-strip operations
pub type Result<T> = std::result::Result<T, TimelineError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl TimelineError {
    /// Create an invalid date error
    pub fn invalid_date(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidDate {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for TimelineError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for TimelineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            context: String::new(),
            source: err,
        }
    }
}

impl From<serde_yaml::Error> for TimelineError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml {
            context: String::new(),
            source: err,
        }
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are chained, outermost first:
///
/// ```ignore
/// use timeline_strip::error::ErrorContext;
///
/// let input: TimelineInput = serde_json::from_str(&text).context("parsing timeline input")?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<TimelineError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: TimelineError, new_ctx: &str) -> TimelineError {
    match err {
        TimelineError::Io {
            path,
            message,
            source,
        } => TimelineError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        TimelineError::Json { context, source } => TimelineError::Json {
            context: chain_context(new_ctx, &context),
            source,
        },
        TimelineError::Yaml { context, source } => TimelineError::Yaml {
            context: chain_context(new_ctx, &context),
            source,
        },
        TimelineError::Config(msg) => TimelineError::Config(chain_context(new_ctx, &msg)),
        TimelineError::Validation(msg) => TimelineError::Validation(chain_context(new_ctx, &msg)),
        other => other,
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| TimelineError::Validation(context.into()))
    }
}
