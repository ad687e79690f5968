use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::{Indicator, MeasurementType, Sex};
use crate::status::{
    GrowthTrend, HeightForAgeStatus, NutritionStatus, WeightForAgeStatus, WeightForHeightStatus,
};

/// One weighing/measuring session for a child, already validated upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub sex: Sex,
    pub birth_date: NaiveDate,
    pub measurement_date: NaiveDate,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub measurement_type: MeasurementType,
}

/// The weighing from the previous monitoring cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorWeighing {
    pub date: NaiveDate,
    pub weight_grams: u32,
}

/// A single Z-score and whether the WHO restricted correction produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZScoreResult {
    pub value: f64,
    pub restricted: bool,
}

impl ZScoreResult {
    pub const fn unrestricted(value: f64) -> Self {
        Self {
            value,
            restricted: false,
        }
    }
}

/// Which of the three Z-scores went through the restricted correction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestrictedFlags {
    pub bb_u: bool,
    pub tb_u: bool,
    pub bb_tb: bool,
}

/// Per-child assessment, using the field names of the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionResult {
    pub age_days: u32,
    pub age_months: u32,
    pub zscore_bb_u: f64,
    pub zscore_tb_u: f64,
    pub zscore_bb_tb: f64,
    pub status_bb_u: WeightForAgeStatus,
    pub status_tb_u: HeightForAgeStatus,
    pub status_bb_tb: WeightForHeightStatus,
    pub status_naik: GrowthTrend,
    #[serde(default)]
    pub restricted: RestrictedFlags,
}

impl NutritionResult {
    pub fn status(&self, indicator: Indicator) -> NutritionStatus {
        match indicator {
            Indicator::WeightForAge => NutritionStatus::WeightForAge(self.status_bb_u),
            Indicator::HeightForAge => NutritionStatus::HeightForAge(self.status_tb_u),
            Indicator::WeightForHeight => NutritionStatus::WeightForHeight(self.status_bb_tb),
        }
    }

    pub fn zscore(&self, indicator: Indicator) -> f64 {
        match indicator {
            Indicator::WeightForAge => self.zscore_bb_u,
            Indicator::HeightForAge => self.zscore_tb_u,
            Indicator::WeightForHeight => self.zscore_bb_tb,
        }
    }
}
