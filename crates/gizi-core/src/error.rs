use chrono::NaiveDate;
use thiserror::Error;

use gizi_model::{Indicator, Lms};
use gizi_standards::LookupError;

/// Failure of the LMS transform for a single value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ZScoreError {
    /// The reference row is corrupt (M <= 0, S <= 0 or non-finite).
    #[error("invalid LMS parameters (L={}, M={}, S={})", .lms.l, .lms.m, .lms.s)]
    InvalidLms { lms: Lms },

    /// The reference row cannot produce the value at the given Z.
    #[error("LMS row (L={}, M={}, S={}) is undefined at z={z}", .lms.l, .lms.m, .lms.s)]
    UndefinedTail { lms: Lms, z: f64 },

    #[error("observed value must be positive and finite, got {value}")]
    InvalidObservation { value: f64 },
}

impl ZScoreError {
    pub fn is_reference_error(&self) -> bool {
        matches!(
            self,
            ZScoreError::InvalidLms { .. } | ZScoreError::UndefinedTail { .. }
        )
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("measurement date {measurement_date} is before birth date {birth_date}")]
    MeasuredBeforeBirth {
        birth_date: NaiveDate,
        measurement_date: NaiveDate,
    },

    #[error("invalid {field}: {value}")]
    InvalidMeasurement { field: &'static str, value: f64 },

    #[error(transparent)]
    OutOfDomain(#[from] LookupError),

    #[error("{indicator}: {source}")]
    ZScore {
        indicator: Indicator,
        #[source]
        source: ZScoreError,
    },
}

impl EngineError {
    /// The measurement itself should be corrected or rejected.
    pub fn is_input_error(&self) -> bool {
        match self {
            EngineError::MeasuredBeforeBirth { .. }
            | EngineError::InvalidMeasurement { .. }
            | EngineError::OutOfDomain(_) => true,
            EngineError::ZScore { source, .. } => !source.is_reference_error(),
        }
    }

    /// The reference tables are at fault, not the measurement.
    pub fn is_reference_error(&self) -> bool {
        !self.is_input_error()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
