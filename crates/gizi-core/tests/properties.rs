//! Property tests for the Z-score transform and the classifier.

use gizi_core::classify::{
    classify_height_for_age, classify_weight_for_age, classify_weight_for_height,
};
use gizi_core::zscore::{Tail, raw_zscore, restricted_zscore, value_at_z};
use gizi_core::{TrendPolicy, WeightChange, compute_zscore, evaluate_trend};
use gizi_model::{GrowthTrend, Lms, StatusBand, WeightForHeightStatus};
use proptest::prelude::*;

fn lms_strategy() -> impl Strategy<Value = Lms> {
    (-1.0f64..1.0, 2.0f64..25.0, 0.03f64..0.15).prop_map(|(l, m, s)| Lms::new(l, m, s))
}

proptest! {
    #[test]
    fn median_scores_zero(lms in lms_strategy()) {
        let result = compute_zscore(&lms, lms.m).unwrap();
        prop_assert!(result.value.abs() < 1e-12);
        prop_assert!(!result.restricted);
    }

    #[test]
    fn restricted_score_is_continuous_at_three(lms in lms_strategy()) {
        for (tail, bound) in [(Tail::Upper, 3.0), (Tail::Lower, -3.0)] {
            let sd3 = value_at_z(&lms, bound).unwrap();
            let restricted = restricted_zscore(&lms, sd3, tail).unwrap();
            let raw = raw_zscore(&lms, sd3).unwrap();
            prop_assert!((restricted - bound).abs() < 1e-9);
            prop_assert!((raw - bound).abs() < 1e-9);
        }
    }

    #[test]
    fn just_past_three_is_restricted_and_continuous(lms in lms_strategy()) {
        let sd3 = value_at_z(&lms, 3.0).unwrap();
        let upper = compute_zscore(&lms, sd3 * (1.0 + 1e-9)).unwrap();
        prop_assert!(upper.restricted);
        prop_assert!((upper.value - 3.0).abs() < 1e-6);

        let sd3neg = value_at_z(&lms, -3.0).unwrap();
        let lower = compute_zscore(&lms, sd3neg * (1.0 - 1e-9)).unwrap();
        prop_assert!(lower.restricted);
        prop_assert!((lower.value + 3.0).abs() < 1e-6);
    }

    #[test]
    fn zscore_is_monotonic_in_observation(lms in lms_strategy(), a in -5.0f64..5.0, b in -5.0f64..5.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let span = lms.m * 0.1;
        let low = compute_zscore(&lms, lms.m + low * span).unwrap().value;
        let high = compute_zscore(&lms, lms.m + high * span).unwrap().value;
        prop_assert!(low <= high + 1e-12);
    }

    #[test]
    fn every_zscore_gets_exactly_one_band(z in -8.0f64..8.0) {
        let bb_u = classify_weight_for_age(z);
        let tb_u = classify_height_for_age(z);
        let bb_tb = classify_weight_for_height(z);

        prop_assert_eq!(bb_u.band() == StatusBand::Severe, z < -3.0);
        prop_assert_eq!(tb_u.band() == StatusBand::Severe, z < -3.0);
        prop_assert_eq!(bb_tb.band() == StatusBand::Severe, z < -3.0);
        prop_assert_eq!(bb_u.band() == StatusBand::Normal, (-2.0..=2.0).contains(&z));
        prop_assert_eq!(tb_u.band() == StatusBand::Normal, (-2.0..=3.0).contains(&z));
        prop_assert_eq!(bb_tb.band() == StatusBand::Normal, (-2.0..=1.0).contains(&z));
        prop_assert_eq!(bb_tb == WeightForHeightStatus::Obese, z > 2.0);
    }

    #[test]
    fn larger_gain_never_lowers_trend(
        age_months in 0u32..=60,
        days in 7i64..120,
        gain in -500.0f64..1500.0,
        extra in 0.0f64..500.0,
    ) {
        let policy = TrendPolicy::default();
        let before = evaluate_trend(age_months, Some(WeightChange { delta_grams: gain, days_since_prior: days }), &policy);
        let after = evaluate_trend(age_months, Some(WeightChange { delta_grams: gain + extra, days_since_prior: days }), &policy);
        prop_assert_ne!(before, GrowthTrend::Indeterminate);
        if before == GrowthTrend::AdequateGain {
            prop_assert_eq!(after, GrowthTrend::AdequateGain);
        }
    }
}
