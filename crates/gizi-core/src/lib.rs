#![deny(unsafe_code)]

//! Growth-standard Z-scores and Indonesian nutrition classification.
//!
//! Everything in this crate is a pure function of its inputs and a borrowed
//! [`gizi_standards::ReferenceTableStore`]; no I/O happens after the store
//! has been loaded.

pub mod age;
pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod trend;
pub mod zscore;

pub use classify::classify;
pub use config::EngineConfig;
pub use engine::{GrowthEngine, corrected_height, weight_for_height_table};
pub use error::{ConfigError, EngineError, ZScoreError};
pub use trend::{TrendPolicy, WeightChange, evaluate_trend, minimum_monthly_gain, trend_between};
pub use zscore::{Tail, compute_zscore, restricted_zscore};
