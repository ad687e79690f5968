use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("invalid reporting period {year}-{month:02}")]
    InvalidPeriod { year: i32, month: u32 },

    #[error("invalid reporting period '{0}', expected YYYY-MM")]
    UnparsablePeriod(String),
}
