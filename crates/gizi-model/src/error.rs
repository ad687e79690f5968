use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unrecognized sex: {0}")]
    InvalidSex(String),
    #[error("unrecognized measurement type: {0}")]
    InvalidMeasurementType(String),
    #[error("unrecognized indicator: {0}")]
    InvalidIndicator(String),
    #[error("unrecognized reference table kind: {0}")]
    InvalidTableKind(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
