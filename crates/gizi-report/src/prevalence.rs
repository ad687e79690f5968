//! Prevalence of each nutrition status among measured children.
//!
//! Counts are kept per status and summed across batches; percentages are
//! always derived from the summed counts, never averaged.

use std::collections::BTreeMap;

use serde::Serialize;

use gizi_model::{
    HeightForAgeStatus, Indicator, NutritionResult, NutritionStatus, StatusBand,
    WeightForAgeStatus, WeightForHeightStatus,
};

use crate::rounding::percent_one_decimal;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrevalenceCounts {
    measured: u64,
    weight_for_age: BTreeMap<WeightForAgeStatus, u64>,
    height_for_age: BTreeMap<HeightForAgeStatus, u64>,
    weight_for_height: BTreeMap<WeightForHeightStatus, u64>,
}

/// One line of a prevalence table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrevalenceRow {
    pub indicator: Indicator,
    pub code: &'static str,
    pub status: &'static str,
    pub label: &'static str,
    pub band: StatusBand,
    pub count: u64,
    pub percent: Option<f64>,
}

fn merge_map<K: Ord + Copy>(into: &mut BTreeMap<K, u64>, from: &BTreeMap<K, u64>) {
    for (status, count) in from {
        *into.entry(*status).or_default() += count;
    }
}

impl PrevalenceCounts {
    pub fn record(&mut self, result: &NutritionResult) {
        self.measured += 1;
        *self.weight_for_age.entry(result.status_bb_u).or_default() += 1;
        *self.height_for_age.entry(result.status_tb_u).or_default() += 1;
        *self.weight_for_height.entry(result.status_bb_tb).or_default() += 1;
    }

    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.measured += other.measured;
        merge_map(&mut self.weight_for_age, &other.weight_for_age);
        merge_map(&mut self.height_for_age, &other.height_for_age);
        merge_map(&mut self.weight_for_height, &other.weight_for_height);
        self
    }

    /// Children with an assessment (the denominator of every percentage).
    pub fn measured(&self) -> u64 {
        self.measured
    }

    pub fn count(&self, status: NutritionStatus) -> u64 {
        let count = match status {
            NutritionStatus::WeightForAge(s) => self.weight_for_age.get(&s),
            NutritionStatus::HeightForAge(s) => self.height_for_age.get(&s),
            NutritionStatus::WeightForHeight(s) => self.weight_for_height.get(&s),
        };
        count.copied().unwrap_or(0)
    }

    pub fn percent(&self, status: NutritionStatus) -> Option<f64> {
        percent_one_decimal(self.count(status), self.measured)
    }

    /// Children of `indicator` falling in `band`.
    pub fn band_count(&self, indicator: Indicator, band: StatusBand) -> u64 {
        statuses(indicator)
            .into_iter()
            .filter(|status| status.band() == band)
            .map(|status| self.count(status))
            .sum()
    }

    pub fn band_percent(&self, indicator: Indicator, band: StatusBand) -> Option<f64> {
        percent_one_decimal(self.band_count(indicator, band), self.measured)
    }

    /// Severe plus moderate: underweight, stunting or wasting prevalence.
    pub fn deficit_percent(&self, indicator: Indicator) -> Option<f64> {
        let deficit = self.band_count(indicator, StatusBand::Severe)
            + self.band_count(indicator, StatusBand::Moderate);
        percent_one_decimal(deficit, self.measured)
    }

    /// Every status of every indicator, in report order.
    pub fn rows(&self) -> Vec<PrevalenceRow> {
        Indicator::ALL
            .into_iter()
            .flat_map(statuses)
            .map(|status| PrevalenceRow {
                indicator: status.indicator(),
                code: status.indicator().code(),
                status: status.as_str(),
                label: status.label_id(),
                band: status.band(),
                count: self.count(status),
                percent: self.percent(status),
            })
            .collect()
    }
}

fn statuses(indicator: Indicator) -> Vec<NutritionStatus> {
    match indicator {
        Indicator::WeightForAge => WeightForAgeStatus::ALL
            .into_iter()
            .map(NutritionStatus::WeightForAge)
            .collect(),
        Indicator::HeightForAge => HeightForAgeStatus::ALL
            .into_iter()
            .map(NutritionStatus::HeightForAge)
            .collect(),
        Indicator::WeightForHeight => WeightForHeightStatus::ALL
            .into_iter()
            .map(NutritionStatus::WeightForHeight)
            .collect(),
    }
}
