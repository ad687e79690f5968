//! Per-child assessment.
//!
//! [`GrowthEngine::assess`] derives the age, applies the length/height
//! correction, looks up the three LMS rows, computes and classifies the
//! Z-scores and, when a prior weighing is given, the growth trend.

use gizi_model::{
    Indicator, Measurement, MeasurementType, NutritionResult, PriorWeighing, RestrictedFlags, Sex,
    TableKind, ZScoreResult,
};
use gizi_standards::{ReferenceTableStore, TableIndex};
use tracing::debug;

use crate::age::{LENGTH_HEIGHT_SWITCH_DAYS, age_in_days, completed_months};
use crate::classify::{
    classify_height_for_age, classify_weight_for_age, classify_weight_for_height,
};
use crate::error::EngineError;
use crate::trend::{TrendPolicy, trend_between};
use crate::zscore::compute_zscore;

/// Centimetres between recumbent length and standing height.
pub const LENGTH_HEIGHT_OFFSET_CM: f64 = 0.7;

/// Length or height as the reference tables for `age_days` expect it.
///
/// Under 731 days the tables hold recumbent length, so a standing height
/// gains 0.7 cm; from 731 days they hold standing height, so a recumbent
/// length loses 0.7 cm.
pub fn corrected_height(height_cm: f64, measurement_type: MeasurementType, age_days: u32) -> f64 {
    match (measurement_type, age_days < LENGTH_HEIGHT_SWITCH_DAYS) {
        (MeasurementType::Standing, true) => height_cm + LENGTH_HEIGHT_OFFSET_CM,
        (MeasurementType::Recumbent, false) => height_cm - LENGTH_HEIGHT_OFFSET_CM,
        _ => height_cm,
    }
}

/// Weight-for-length under 731 days, weight-for-height afterwards.
pub fn weight_for_height_table(age_days: u32) -> TableKind {
    if age_days < LENGTH_HEIGHT_SWITCH_DAYS {
        TableKind::WeightForLength
    } else {
        TableKind::WeightForHeight
    }
}

fn validate_positive(field: &'static str, value: f64) -> Result<f64, EngineError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(EngineError::InvalidMeasurement { field, value })
    }
}

/// Stateless assessment over a shared reference store.
#[derive(Debug, Clone)]
pub struct GrowthEngine<'a> {
    store: &'a ReferenceTableStore,
    policy: TrendPolicy,
}

impl<'a> GrowthEngine<'a> {
    pub fn new(store: &'a ReferenceTableStore) -> Self {
        Self::with_policy(store, TrendPolicy::default())
    }

    pub fn with_policy(store: &'a ReferenceTableStore, policy: TrendPolicy) -> Self {
        Self { store, policy }
    }

    /// Assess one measurement, with the trend against `prior` if given.
    pub fn assess(
        &self,
        measurement: &Measurement,
        prior: Option<&PriorWeighing>,
    ) -> Result<NutritionResult, EngineError> {
        let age_days = age_in_days(measurement.birth_date, measurement.measurement_date)?;
        let weight_kg = validate_positive("weight_kg", measurement.weight_kg)?;
        let height_cm = validate_positive("height_cm", measurement.height_cm)?;
        let height_cm = corrected_height(height_cm, measurement.measurement_type, age_days);
        let sex = measurement.sex;

        let score = |indicator| self.indicator_zscore(indicator, sex, age_days, height_cm, weight_kg);
        let bb_u = score(Indicator::WeightForAge)?;
        let tb_u = score(Indicator::HeightForAge)?;
        let bb_tb = score(Indicator::WeightForHeight)?;

        let status_naik = trend_between(
            measurement.birth_date,
            measurement.measurement_date,
            weight_kg * 1000.0,
            prior,
            &self.policy,
        );
        let age_months =
            completed_months(measurement.birth_date, measurement.measurement_date).unwrap_or(0);

        let result = NutritionResult {
            age_days,
            age_months,
            zscore_bb_u: bb_u.value,
            zscore_tb_u: tb_u.value,
            zscore_bb_tb: bb_tb.value,
            status_bb_u: classify_weight_for_age(bb_u.value),
            status_tb_u: classify_height_for_age(tb_u.value),
            status_bb_tb: classify_weight_for_height(bb_tb.value),
            status_naik,
            restricted: RestrictedFlags {
                bb_u: bb_u.restricted,
                tb_u: tb_u.restricted,
                bb_tb: bb_tb.restricted,
            },
        };
        debug!(
            age_days,
            age_months,
            status_bb_u = result.status_bb_u.as_str(),
            status_tb_u = result.status_tb_u.as_str(),
            status_bb_tb = result.status_bb_tb.as_str(),
            status_naik = result.status_naik.code(),
            "assessed measurement"
        );
        Ok(result)
    }

    fn indicator_zscore(
        &self,
        indicator: Indicator,
        sex: Sex,
        age_days: u32,
        corrected_height_cm: f64,
        weight_kg: f64,
    ) -> Result<ZScoreResult, EngineError> {
        let (kind, index, observed) = match indicator {
            Indicator::WeightForAge => (
                TableKind::WeightForAge,
                TableIndex::Day(age_days),
                weight_kg,
            ),
            Indicator::HeightForAge => (
                TableKind::LengthHeightForAge,
                TableIndex::Day(age_days),
                corrected_height_cm,
            ),
            Indicator::WeightForHeight => (
                weight_for_height_table(age_days),
                TableIndex::HeightCm(corrected_height_cm),
                weight_kg,
            ),
        };
        let lms = self.store.lookup(kind, sex, index)?;
        compute_zscore(&lms, observed).map_err(|source| EngineError::ZScore { indicator, source })
    }
}
