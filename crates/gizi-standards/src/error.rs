#![deny(unsafe_code)]

use std::path::PathBuf;

use gizi_model::{Sex, TableKind};

/// Failure to load or verify the reference data. Always fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML manifest {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid manifest: {message}")]
    InvalidManifest { message: String },

    #[error("missing reference table: {kind} ({sex})")]
    MissingTable { kind: TableKind, sex: Sex },

    #[error("duplicate reference table: {kind} ({sex})")]
    DuplicateTable { kind: TableKind, sex: Sex },

    #[error("invalid sha256 for {path}: {message}")]
    InvalidSha256 { path: PathBuf, message: String },

    #[error("invalid manifest path {path}: {message}")]
    InvalidPath { path: PathBuf, message: String },

    #[error("missing file listed in manifest: {path}")]
    MissingFile { path: PathBuf },

    #[error("sha256 mismatch for {path} (expected {expected}, got {actual})")]
    Sha256Mismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("failed to parse CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("reference table {kind} ({sex}) has no rows")]
    EmptyTable { kind: TableKind, sex: Sex },

    #[error("reference table {kind} ({sex}) row {index}: non-finite LMS value")]
    NonFinite {
        kind: TableKind,
        sex: Sex,
        index: u32,
    },

    #[error("reference table {kind} ({sex}) row {index}: median must be positive, got {m}")]
    NonPositiveMedian {
        kind: TableKind,
        sex: Sex,
        index: u32,
        m: f64,
    },

    #[error("reference table {kind} ({sex}) row {index}: sigma must be positive, got {s}")]
    NonPositiveSigma {
        kind: TableKind,
        sex: Sex,
        index: u32,
        s: f64,
    },

    #[error("reference table {kind} ({sex}): index {index} does not follow {previous}")]
    NonMonotonicIndex {
        kind: TableKind,
        sex: Sex,
        previous: u32,
        index: u32,
    },

    #[error("reference table {kind} ({sex}): gap after index {previous}, expected {expected}, found {found}")]
    Gap {
        kind: TableKind,
        sex: Sex,
        previous: u32,
        expected: u32,
        found: u32,
    },

    #[error(
        "reference table {kind} ({sex}) covers {first}..={last}, required {required_first}..={required_last}"
    )]
    IncompleteDomain {
        kind: TableKind,
        sex: Sex,
        first: u32,
        last: u32,
        required_first: u32,
        required_last: u32,
    },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A lookup outside the published domain of a table. Recoverable by the caller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookupError {
    #[error("age {age_days} days is outside the supported range 0..={max_days}")]
    AgeOutOfRange { age_days: u32, max_days: u32 },

    #[error("{height_cm} cm is outside the {kind} table range {min_cm}..={max_cm} cm")]
    HeightOutOfRange {
        kind: TableKind,
        height_cm: f64,
        min_cm: f64,
        max_cm: f64,
    },

    #[error("{kind} is not indexed by {requested}")]
    IndexUnitMismatch {
        kind: TableKind,
        requested: &'static str,
    },
}
