//! Age derivation for growth-standard lookups.
//!
//! - Age in days is the plain calendar difference (day of birth = day 0).
//! - Completed months follow calendar months, so a child born on the 31st
//!   completes a month on the last day of a shorter month.
//! - The growth standards stop at 1856 days (60 completed months).

use chrono::{Datelike, Months, NaiveDate};

use gizi_standards::{LookupError, MAX_AGE_DAYS};

use crate::error::EngineError;

/// Age (in days) from which standing height and the weight-for-height
/// table apply instead of recumbent length.
pub const LENGTH_HEIGHT_SWITCH_DAYS: u32 = 731;

/// Calculate age in days, rejecting measurements outside 0..=1856 days.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use gizi_core::age::age_in_days;
///
/// let birth = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
/// let visit = NaiveDate::from_ymd_opt(2023, 7, 1).unwrap();
/// assert_eq!(age_in_days(birth, visit).unwrap(), 181);
/// ```
pub fn age_in_days(birth_date: NaiveDate, measurement_date: NaiveDate) -> Result<u32, EngineError> {
    let days = (measurement_date - birth_date).num_days();
    if days < 0 {
        return Err(EngineError::MeasuredBeforeBirth {
            birth_date,
            measurement_date,
        });
    }
    match u32::try_from(days) {
        Ok(age_days) if age_days <= MAX_AGE_DAYS => Ok(age_days),
        _ => Err(EngineError::OutOfDomain(LookupError::AgeOutOfRange {
            age_days: u32::try_from(days).unwrap_or(u32::MAX),
            max_days: MAX_AGE_DAYS,
        })),
    }
}

/// Completed calendar months between birth and `date`.
///
/// Returns None when `date` is before birth.
pub fn completed_months(birth_date: NaiveDate, date: NaiveDate) -> Option<u32> {
    if date < birth_date {
        return None;
    }
    let estimate = month_ordinal(date) - month_ordinal(birth_date);
    let mut months = u32::try_from(estimate).ok()?;
    while months > 0 {
        match birth_date.checked_add_months(Months::new(months)) {
            Some(anniversary) if anniversary <= date => break,
            _ => months -= 1,
        }
    }
    Some(months)
}

/// Number of calendar months from `earlier` to `later` (same month = 0).
pub fn calendar_month_gap(earlier: NaiveDate, later: NaiveDate) -> i32 {
    month_ordinal(later) - month_ordinal(earlier)
}

fn month_ordinal(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}
