//! Z-score cut-points (Permenkes 2/2020).
//!
//! Lower cut-points are inclusive and upper cut-points exclusive towards the
//! extremes, so a score sitting exactly on a boundary always lands in the
//! category closer to normal.

use gizi_model::{
    HeightForAgeStatus, Indicator, NutritionStatus, WeightForAgeStatus, WeightForHeightStatus,
};

/// Below this: severe deficit (gizi buruk, sangat pendek, sangat kurang).
pub const SEVERE_CUTOFF: f64 = -3.0;
/// Below this: moderate deficit.
pub const MODERATE_CUTOFF: f64 = -2.0;
/// BB/U above this: overweight.
pub const WEIGHT_FOR_AGE_UPPER: f64 = 2.0;
/// TB/U above this: tall.
pub const HEIGHT_FOR_AGE_UPPER: f64 = 3.0;
/// BB/TB above this: at risk of overweight.
pub const WEIGHT_FOR_HEIGHT_RISK: f64 = 1.0;
/// BB/TB above this: obese.
pub const WEIGHT_FOR_HEIGHT_OBESE: f64 = 2.0;

pub fn classify_weight_for_age(z: f64) -> WeightForAgeStatus {
    if z < SEVERE_CUTOFF {
        WeightForAgeStatus::SeverelyUnderweight
    } else if z < MODERATE_CUTOFF {
        WeightForAgeStatus::Underweight
    } else if z <= WEIGHT_FOR_AGE_UPPER {
        WeightForAgeStatus::Normal
    } else {
        WeightForAgeStatus::Overweight
    }
}

pub fn classify_height_for_age(z: f64) -> HeightForAgeStatus {
    if z < SEVERE_CUTOFF {
        HeightForAgeStatus::SeverelyStunted
    } else if z < MODERATE_CUTOFF {
        HeightForAgeStatus::Stunted
    } else if z <= HEIGHT_FOR_AGE_UPPER {
        HeightForAgeStatus::Normal
    } else {
        HeightForAgeStatus::Tall
    }
}

pub fn classify_weight_for_height(z: f64) -> WeightForHeightStatus {
    if z < SEVERE_CUTOFF {
        WeightForHeightStatus::SeverelyWasted
    } else if z < MODERATE_CUTOFF {
        WeightForHeightStatus::Wasted
    } else if z <= WEIGHT_FOR_HEIGHT_RISK {
        WeightForHeightStatus::Normal
    } else if z <= WEIGHT_FOR_HEIGHT_OBESE {
        WeightForHeightStatus::Overweight
    } else {
        WeightForHeightStatus::Obese
    }
}

/// Classify a finite Z-score for `indicator`.
pub fn classify(indicator: Indicator, z: f64) -> NutritionStatus {
    debug_assert!(z.is_finite(), "classify called with non-finite z-score");
    match indicator {
        Indicator::WeightForAge => NutritionStatus::WeightForAge(classify_weight_for_age(z)),
        Indicator::HeightForAge => NutritionStatus::HeightForAge(classify_height_for_age(z)),
        Indicator::WeightForHeight => {
            NutritionStatus::WeightForHeight(classify_weight_for_height(z))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_fall_towards_normal() {
        assert_eq!(classify_weight_for_age(-3.0), WeightForAgeStatus::Underweight);
        assert_eq!(classify_weight_for_age(-2.0), WeightForAgeStatus::Normal);
        assert_eq!(classify_weight_for_age(2.0), WeightForAgeStatus::Normal);
        assert_eq!(classify_height_for_age(-3.0), HeightForAgeStatus::Stunted);
        assert_eq!(classify_height_for_age(3.0), HeightForAgeStatus::Normal);
        assert_eq!(classify_weight_for_height(1.0), WeightForHeightStatus::Normal);
        assert_eq!(classify_weight_for_height(2.0), WeightForHeightStatus::Overweight);
    }

    #[test]
    fn extremes() {
        assert_eq!(
            classify_weight_for_age(-3.01),
            WeightForAgeStatus::SeverelyUnderweight
        );
        assert_eq!(classify_weight_for_age(2.01), WeightForAgeStatus::Overweight);
        assert_eq!(classify_height_for_age(-4.2), HeightForAgeStatus::SeverelyStunted);
        assert_eq!(classify_height_for_age(3.2), HeightForAgeStatus::Tall);
        assert_eq!(
            classify_weight_for_height(-3.5),
            WeightForHeightStatus::SeverelyWasted
        );
    }

    #[test]
    fn weight_for_height_obese_boundary() {
        assert_eq!(classify_weight_for_height(2.4), WeightForHeightStatus::Obese);
        assert_eq!(
            classify_weight_for_height(2.0 + 1e-9),
            WeightForHeightStatus::Obese
        );
        assert_eq!(
            classify_weight_for_height(2.0 - 1e-9),
            WeightForHeightStatus::Overweight
        );
        assert_eq!(classify_weight_for_height(1.5), WeightForHeightStatus::Overweight);
    }

    #[test]
    fn dispatches_by_indicator() {
        assert_eq!(
            classify(Indicator::WeightForHeight, -2.5),
            NutritionStatus::WeightForHeight(WeightForHeightStatus::Wasted)
        );
        assert_eq!(
            classify(Indicator::HeightForAge, -2.5),
            NutritionStatus::HeightForAge(HeightForAgeStatus::Stunted)
        );
    }
}
