#![deny(unsafe_code)]

pub mod csv;
pub mod doctor;
pub mod error;
pub mod hash;
pub mod manifest;
pub mod paths;
pub mod store;
pub mod table;

pub use crate::doctor::DoctorReport;
pub use crate::error::{LookupError, StandardsError};
pub use crate::paths::{STANDARDS_ENV_VAR, standards_root};
pub use crate::store::{ReferenceTableStore, TableIndex, TableSummary, VerifySummary};
pub use crate::table::{MAX_AGE_DAYS, ReferenceTable, required_domain};
