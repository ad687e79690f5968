//! SKDN participation counts for a posyandu month.
//!
//! - S: children registered
//! - K: registered children with a growth record (KMS)
//! - D: children weighed this month
//! - N: weighed children whose gain met the KBM
//!
//! T and O split the remaining weighed children into inadequate gain and
//! no usable prior weighing, so that `N + T + O == D`.

use serde::Serialize;

use gizi_model::GrowthTrend;

use crate::rounding::percent_one_decimal;
use crate::scope::ChildPeriodRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SkdnCounts {
    pub s: u64,
    pub k: u64,
    pub d: u64,
    pub n: u64,
    pub t: u64,
    pub o: u64,
}

/// Participation ratios in percent, None when the denominator is zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SkdnRatios {
    /// K/S: card coverage.
    pub k_s: Option<f64>,
    /// D/S: weighing participation.
    pub d_s: Option<f64>,
    /// N/D: growth success among the weighed.
    pub n_d: Option<f64>,
}

impl SkdnCounts {
    pub fn record(&mut self, record: &ChildPeriodRecord) {
        self.s += 1;
        if record.has_growth_record {
            self.k += 1;
        }
        if let Some(assessment) = &record.assessment {
            self.d += 1;
            match assessment.status_naik {
                GrowthTrend::AdequateGain => self.n += 1,
                GrowthTrend::InadequateGain => self.t += 1,
                GrowthTrend::Indeterminate => self.o += 1,
            }
        }
    }

    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            s: self.s + other.s,
            k: self.k + other.k,
            d: self.d + other.d,
            n: self.n + other.n,
            t: self.t + other.t,
            o: self.o + other.o,
        }
    }

    pub fn ratios(&self) -> SkdnRatios {
        SkdnRatios {
            k_s: percent_one_decimal(self.k, self.s),
            d_s: percent_one_decimal(self.d, self.s),
            n_d: percent_one_decimal(self.n, self.d),
        }
    }
}
