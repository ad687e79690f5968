#![deny(unsafe_code)]

//! Population aggregates over per-child nutrition results: SKDN
//! participation counts and status prevalence for a month and location.

pub mod aggregate;
pub mod error;
pub mod prevalence;
pub mod rounding;
pub mod scope;
pub mod skdn;

pub use aggregate::{DeficitSummary, PopulationReport, Tally, aggregate, tally};
pub use error::ReportError;
pub use prevalence::{PrevalenceCounts, PrevalenceRow};
pub use rounding::percent_one_decimal;
pub use scope::{ChildPeriodRecord, ReportPeriod, ReportScope};
pub use skdn::{SkdnCounts, SkdnRatios};
