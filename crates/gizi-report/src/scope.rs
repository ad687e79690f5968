//! Reporting period and location filter.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use gizi_model::NutritionResult;

use crate::error::ReportError;

/// A calendar month, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReportPeriod {
    year: i32,
    month: u32,
}

impl ReportPeriod {
    pub fn new(year: i32, month: u32) -> Result<Self, ReportError> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(ReportError::InvalidPeriod { year, month });
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

impl FromStr for ReportPeriod {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unparsable = || ReportError::UnparsablePeriod(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(unparsable)?;
        let year = year.parse().map_err(|_| unparsable())?;
        let month = month.parse().map_err(|_| unparsable())?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for ReportPeriod {
    type Error = ReportError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReportPeriod> for String {
    fn from(period: ReportPeriod) -> Self {
        period.to_string()
    }
}

/// Which records a report covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportScope {
    pub period: ReportPeriod,
    /// Posyandu or village code; None covers every location.
    pub location: Option<String>,
}

impl ReportScope {
    pub fn new(period: ReportPeriod) -> Self {
        Self {
            period,
            location: None,
        }
    }

    pub fn at_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn includes(&self, record: &ChildPeriodRecord) -> bool {
        record.period == self.period
            && self
                .location
                .as_deref()
                .is_none_or(|location| record.location == location)
    }
}

/// One registered child in one reporting month.
///
/// Every record counts towards S. `assessment` is present when the child
/// was weighed and measured in the month (D).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildPeriodRecord {
    pub location: String,
    pub period: ReportPeriod,
    /// Holds a growth-monitoring card (KMS) or equivalent record (K).
    pub has_growth_record: bool,
    pub assessment: Option<NutritionResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(location: &str, period: ReportPeriod) -> ChildPeriodRecord {
        ChildPeriodRecord {
            location: location.to_string(),
            period,
            has_growth_record: true,
            assessment: None,
        }
    }

    #[test]
    fn parses_and_displays_periods() {
        let period: ReportPeriod = "2024-03".parse().unwrap();
        assert_eq!(period, ReportPeriod::new(2024, 3).unwrap());
        assert_eq!(period.to_string(), "2024-03");
        assert!(period.contains(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()));
        assert!(!period.contains(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
    }

    #[test]
    fn rejects_bad_periods() {
        assert_eq!(
            ReportPeriod::new(2024, 13),
            Err(ReportError::InvalidPeriod {
                year: 2024,
                month: 13
            })
        );
        assert!(matches!(
            "March 2024".parse::<ReportPeriod>(),
            Err(ReportError::UnparsablePeriod(_))
        ));
    }

    #[test]
    fn scope_filters_period_and_location() {
        let march = ReportPeriod::new(2024, 3).unwrap();
        let april = ReportPeriod::new(2024, 4).unwrap();
        let all = ReportScope::new(march);
        let melati = ReportScope::new(march).at_location("melati");

        assert!(all.includes(&record("melati", march)));
        assert!(all.includes(&record("mawar", march)));
        assert!(!all.includes(&record("melati", april)));
        assert!(melati.includes(&record("melati", march)));
        assert!(!melati.includes(&record("mawar", march)));
    }
}
