#![deny(unsafe_code)]

pub mod enums;
pub mod error;
pub mod lms;
pub mod measurement;
pub mod status;

pub use enums::{IndexUnit, Indicator, MeasurementType, Sex, TableKind};
pub use error::{ModelError, Result};
pub use lms::Lms;
pub use measurement::{Measurement, NutritionResult, PriorWeighing, RestrictedFlags, ZScoreResult};
pub use status::{
    GrowthTrend, HeightForAgeStatus, NutritionStatus, StatusBand, WeightForAgeStatus,
    WeightForHeightStatus,
};
