//! Growth-trend evaluation against the minimum monthly weight gain (KBM).
//!
//! A weighing is compared with the one from the previous monitoring cycle:
//! gains at or above the KBM for the child's age band are `N`, smaller gains
//! and losses are `T`, and anything that cannot be judged is `O`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use gizi_model::{GrowthTrend, PriorWeighing};

use crate::age::{calendar_month_gap, completed_months};
use crate::error::ConfigError;

/// KBM bands as (last completed month of the band, grams per month).
const KBM_BANDS: [(u32, u32); 6] = [
    (3, 700),
    (6, 600),
    (9, 400),
    (12, 300),
    (24, 200),
    (60, 150),
];

/// Minimum monthly gain in grams for a child of `age_months`.
///
/// Returns None past 60 months, where no KBM is defined.
pub fn minimum_monthly_gain(age_months: u32) -> Option<u32> {
    KBM_BANDS
        .iter()
        .find(|(last_month, _)| age_months <= *last_month)
        .map(|&(_, grams)| grams)
}

/// Tunable constants of the trend evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrendPolicy {
    /// Shorter intervals are too noisy to judge.
    pub min_interval_days: i64,
    /// Intervals in `flat_min_days..=flat_max_days` use the monthly KBM as-is.
    pub flat_min_days: i64,
    pub flat_max_days: i64,
    /// Divisor when scaling the KBM to other intervals.
    pub days_per_month: i64,
    /// A prior weighing more calendar months back than this is ignored.
    pub max_cycle_gap_months: u32,
}

impl Default for TrendPolicy {
    fn default() -> Self {
        Self {
            min_interval_days: 7,
            flat_min_days: 20,
            flat_max_days: 45,
            days_per_month: 30,
            max_cycle_gap_months: 1,
        }
    }
}

impl TrendPolicy {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_interval_days < 1 {
            return Err(ConfigError::Invalid(format!(
                "trend.min_interval_days must be at least 1, got {}",
                self.min_interval_days
            )));
        }
        if self.flat_min_days > self.flat_max_days {
            return Err(ConfigError::Invalid(format!(
                "trend.flat_min_days ({}) exceeds trend.flat_max_days ({})",
                self.flat_min_days, self.flat_max_days
            )));
        }
        if self.days_per_month < 1 {
            return Err(ConfigError::Invalid(format!(
                "trend.days_per_month must be at least 1, got {}",
                self.days_per_month
            )));
        }
        Ok(())
    }

    /// Gain required over `days` for a band with `monthly_grams`.
    pub fn threshold_grams(&self, monthly_grams: u32, days: i64) -> f64 {
        let monthly = f64::from(monthly_grams);
        if (self.flat_min_days..=self.flat_max_days).contains(&days) {
            monthly
        } else {
            monthly * days as f64 / self.days_per_month as f64
        }
    }
}

/// Weight difference between two weighings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightChange {
    pub delta_grams: f64,
    pub days_since_prior: i64,
}

/// Classify a weight change for a child of `age_months`.
pub fn evaluate_trend(
    age_months: u32,
    change: Option<WeightChange>,
    policy: &TrendPolicy,
) -> GrowthTrend {
    let Some(change) = change else {
        return GrowthTrend::Indeterminate;
    };
    let Some(monthly) = minimum_monthly_gain(age_months) else {
        return GrowthTrend::Indeterminate;
    };
    if change.days_since_prior < policy.min_interval_days || !change.delta_grams.is_finite() {
        return GrowthTrend::Indeterminate;
    }
    if change.delta_grams >= policy.threshold_grams(monthly, change.days_since_prior) {
        GrowthTrend::AdequateGain
    } else {
        GrowthTrend::InadequateGain
    }
}

/// Derive the trend from two dated weighings.
///
/// The child's age band is taken at the current weighing. A prior outside
/// the monitoring cycle is treated as if the child had none.
pub fn trend_between(
    birth_date: NaiveDate,
    current_date: NaiveDate,
    current_weight_grams: f64,
    prior: Option<&PriorWeighing>,
    policy: &TrendPolicy,
) -> GrowthTrend {
    let Some(age_months) = completed_months(birth_date, current_date) else {
        return GrowthTrend::Indeterminate;
    };
    let change = prior
        .filter(|prior| {
            let gap = calendar_month_gap(prior.date, current_date);
            gap >= 0 && gap.unsigned_abs() <= policy.max_cycle_gap_months
        })
        .map(|prior| WeightChange {
            delta_grams: current_weight_grams - f64::from(prior.weight_grams),
            days_since_prior: (current_date - prior.date).num_days(),
        });
    evaluate_trend(age_months, change, policy)
}
