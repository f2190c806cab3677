//! Configuration validation for timeline-strip.
//!
//! Every tunable of [`TimelineConfig`] is declared once in [`FIELD_SPECS`]
//! with its type and bounds. The same table drives map intake, override
//! application, and [`Validatable`].

use super::types::TimelineConfig;
use serde_json::Value;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Declared field constraints
// ============================================================================

/// Value type a configuration key accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Any finite number
    Float,
    /// Non-negative whole number
    Integer,
}

impl FieldKind {
    const fn label(self) -> &'static str {
        match self {
            Self::Float => "number",
            Self::Integer => "integer",
        }
    }
}

/// Declared type and inclusive bounds of one configuration key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub kind: FieldKind,
    pub min: f64,
    pub max: f64,
}

/// All recognised configuration keys.
pub const FIELD_SPECS: &[FieldSpec] = &[
    FieldSpec {
        key: "day_width",
        kind: FieldKind::Float,
        min: 10.0,
        max: 400.0,
    },
    FieldSpec {
        key: "day_margin",
        kind: FieldKind::Float,
        min: 0.0,
        max: 50.0,
    },
    FieldSpec {
        key: "dates_height",
        kind: FieldKind::Float,
        min: 20.0,
        max: 300.0,
    },
    FieldSpec {
        key: "row_height",
        kind: FieldKind::Float,
        min: 10.0,
        max: 200.0,
    },
    FieldSpec {
        key: "row_margin",
        kind: FieldKind::Float,
        min: 0.0,
        max: 50.0,
    },
    FieldSpec {
        key: "buffer_days",
        kind: FieldKind::Integer,
        min: 0.0,
        max: 365.0,
    },
    FieldSpec {
        key: "animation_duration_ms",
        kind: FieldKind::Integer,
        min: 0.0,
        max: 10_000.0,
    },
    FieldSpec {
        key: "vertical_debounce_ms",
        kind: FieldKind::Integer,
        min: 0.0,
        max: 5_000.0,
    },
    FieldSpec {
        key: "loading_threshold_ms",
        kind: FieldKind::Integer,
        min: 0.0,
        max: 10_000.0,
    },
];

/// Look up the declared spec for a key.
#[must_use]
pub fn field_spec(key: &str) -> Option<&'static FieldSpec> {
    FIELD_SPECS.iter().find(|spec| spec.key == key)
}

impl FieldSpec {
    /// Check a numeric value against the declared kind and bounds.
    pub fn check(&self, value: f64) -> Result<f64, ConfigError> {
        if !value.is_finite() {
            return Err(self.error(format!("expected a finite {}, got {value}", self.kind.label())));
        }
        if self.kind == FieldKind::Integer && value.fract() != 0.0 {
            return Err(self.error(format!("expected an integer, got {value}")));
        }
        if !(self.min..=self.max).contains(&value) {
            return Err(self.error(format!(
                "must be between {} and {}, got {value}",
                self.min, self.max
            )));
        }
        Ok(value)
    }

    /// Check a raw JSON value, as supplied by a config map or file.
    pub fn check_json(&self, value: &Value) -> Result<f64, ConfigError> {
        let number = value.as_f64().ok_or_else(|| {
            self.error(format!("expected {}, got {value}", self.kind.label()))
        })?;
        self.check(number)
    }

    fn error(&self, message: String) -> ConfigError {
        ConfigError {
            field: self.key.to_string(),
            message,
        }
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for TimelineConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors: Vec<ConfigError> = FIELD_SPECS
            .iter()
            .filter_map(|spec| {
                let value = self.get(spec.key)?;
                spec.check(value).err()
            })
            .collect();

        if self.day_margin >= self.day_width {
            errors.push(ConfigError {
                field: "day_margin".to_string(),
                message: format!(
                    "must be smaller than day_width ({}), got {}",
                    self.day_width, self.day_margin
                ),
            });
        }

        errors
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_config_is_valid() {
        assert!(TimelineConfig::default().is_valid());
    }

    #[test]
    fn test_out_of_range_is_reported() {
        let config = TimelineConfig {
            day_width: 5.0,
            ..TimelineConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "day_width");
    }

    #[test]
    fn test_margin_must_be_smaller_than_width() {
        let config = TimelineConfig {
            day_width: 20.0,
            day_margin: 20.0,
            ..TimelineConfig::default()
        };
        assert!(!config.is_valid());
        assert!(config.validate().iter().any(|e| e.field == "day_margin"));
    }

    #[test]
    fn test_integer_kind_rejects_fraction() {
        let spec = field_spec("buffer_days").unwrap();
        assert!(spec.check(3.0).is_ok());
        assert!(spec.check(3.5).is_err());
        assert!(spec.check_json(&json!("3")).is_err());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let spec = field_spec("day_width").unwrap();
        assert!(spec.check(10.0).is_ok());
        assert!(spec.check(400.0).is_ok());
        assert!(spec.check(400.1).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        let spec = field_spec("row_height").unwrap();
        assert!(spec.check(f64::NAN).is_err());
        assert!(spec.check(f64::INFINITY).is_err());
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError {
            field: "day_width".to_string(),
            message: "too small".to_string(),
        };
        assert_eq!(error.to_string(), "day_width: too small");
    }

    #[test]
    fn test_every_spec_key_is_readable() {
        let config = TimelineConfig::default();
        for spec in FIELD_SPECS {
            assert!(config.get(spec.key).is_some(), "{} not readable", spec.key);
        }
    }
}
