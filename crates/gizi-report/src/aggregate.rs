//! Parallel reduction of per-child records into a population report.

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info_span};

use gizi_model::Indicator;

use crate::prevalence::{PrevalenceCounts, PrevalenceRow};
use crate::scope::{ChildPeriodRecord, ReportScope};
use crate::skdn::{SkdnCounts, SkdnRatios};

/// Additive counts over any subset of records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub skdn: SkdnCounts,
    pub prevalence: PrevalenceCounts,
}

impl Tally {
    pub fn record(mut self, record: &ChildPeriodRecord) -> Self {
        self.skdn.record(record);
        if let Some(assessment) = &record.assessment {
            self.prevalence.record(assessment);
        }
        self
    }

    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            skdn: self.skdn.merge(other.skdn),
            prevalence: self.prevalence.merge(other.prevalence),
        }
    }
}

/// Count the records in `scope`.
pub fn tally(records: &[ChildPeriodRecord], scope: &ReportScope) -> Tally {
    records
        .par_iter()
        .filter(|record| scope.includes(record))
        .fold(Tally::default, Tally::record)
        .reduce(Tally::default, Tally::merge)
}

/// Deficit prevalence for one indicator (underweight, stunting, wasting).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeficitSummary {
    pub indicator: Indicator,
    pub code: &'static str,
    pub percent: Option<f64>,
}

/// SKDN and prevalence for one scope, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationReport {
    pub scope: ReportScope,
    pub skdn: SkdnCounts,
    pub ratios: SkdnRatios,
    pub measured: u64,
    pub deficits: Vec<DeficitSummary>,
    pub prevalence: Vec<PrevalenceRow>,
}

impl PopulationReport {
    pub fn from_tally(scope: ReportScope, tally: &Tally) -> Self {
        Self {
            scope,
            skdn: tally.skdn,
            ratios: tally.skdn.ratios(),
            measured: tally.prevalence.measured(),
            deficits: Indicator::ALL
                .into_iter()
                .map(|indicator| DeficitSummary {
                    indicator,
                    code: indicator.code(),
                    percent: tally.prevalence.deficit_percent(indicator),
                })
                .collect(),
            prevalence: tally.prevalence.rows(),
        }
    }
}

/// Build the report for `scope` from all known records.
pub fn aggregate(records: &[ChildPeriodRecord], scope: &ReportScope) -> PopulationReport {
    let span = info_span!(
        "aggregate",
        period = %scope.period,
        location = scope.location.as_deref().unwrap_or("*"),
        records = records.len()
    );
    let _guard = span.enter();

    let tally = tally(records, scope);
    debug!(
        s = tally.skdn.s,
        k = tally.skdn.k,
        d = tally.skdn.d,
        n = tally.skdn.n,
        "aggregated records"
    );
    PopulationReport::from_tally(scope.clone(), &tally)
}
