#![deny(unsafe_code)]

//! A single LMS reference table stored as a dense arena of rows.
//!
//! Row `i` sits at index `first + i * step`. Age tables are indexed by day
//! with step 1; length/height tables by tenths of a centimetre with the step
//! the publisher used (1 for the expanded 0.1 cm tables, 5 for 0.5 cm).

use gizi_model::{IndexUnit, Lms, Sex, TableKind};

use crate::error::{LookupError, StandardsError};

/// Oldest age (in days) covered by the growth standards, 60 completed months.
pub const MAX_AGE_DAYS: u32 = 1856;

/// Heights within this distance of a 0.1 cm mark are treated as sitting on it.
const TENTH_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTable {
    kind: TableKind,
    sex: Sex,
    first: u32,
    step: u32,
    rows: Vec<Lms>,
}

impl ReferenceTable {
    /// Build a table from `(index, lms)` rows, checking every row invariant.
    pub fn from_rows(
        kind: TableKind,
        sex: Sex,
        rows: Vec<(u32, Lms)>,
    ) -> Result<Self, StandardsError> {
        let Some(&(first, _)) = rows.first() else {
            return Err(StandardsError::EmptyTable { kind, sex });
        };

        let step = match rows.get(1) {
            Some(&(second, _)) if second > first => second - first,
            Some(&(second, _)) => {
                return Err(StandardsError::NonMonotonicIndex {
                    kind,
                    sex,
                    previous: first,
                    index: second,
                });
            }
            None => 1,
        };
        if kind.index_unit() == IndexUnit::Days && step != 1 {
            return Err(StandardsError::Gap {
                kind,
                sex,
                previous: first,
                expected: first + 1,
                found: first + step,
            });
        }

        let mut arena = Vec::with_capacity(rows.len());
        let mut previous: Option<u32> = None;
        for (index, lms) in rows {
            check_row(kind, sex, index, &lms)?;
            if let Some(previous) = previous {
                if index <= previous {
                    return Err(StandardsError::NonMonotonicIndex {
                        kind,
                        sex,
                        previous,
                        index,
                    });
                }
                let expected = previous + step;
                if index != expected {
                    return Err(StandardsError::Gap {
                        kind,
                        sex,
                        previous,
                        expected,
                        found: index,
                    });
                }
            }
            previous = Some(index);
            arena.push(lms);
        }

        Ok(Self {
            kind,
            sex,
            first,
            step,
            rows: arena,
        })
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn first_index(&self) -> u32 {
        self.first
    }

    pub fn last_index(&self) -> u32 {
        // rows is never empty and its length was bounded by u32 indices
        self.first + (self.rows.len() as u32 - 1) * self.step
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate rows with their index.
    pub fn rows(&self) -> impl Iterator<Item = (u32, &Lms)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, lms)| (self.first + i as u32 * self.step, lms))
    }

    /// Exact row for an age in days.
    pub fn lookup_day(&self, age_days: u32) -> Result<Lms, LookupError> {
        if self.kind.index_unit() != IndexUnit::Days {
            return Err(LookupError::IndexUnitMismatch {
                kind: self.kind,
                requested: "age in days",
            });
        }
        let max_days = self.last_index().min(MAX_AGE_DAYS);
        if age_days < self.first || age_days > max_days {
            return Err(LookupError::AgeOutOfRange { age_days, max_days });
        }
        Ok(self.rows[(age_days - self.first) as usize])
    }

    /// Row for a length/height in cm, interpolating between published rows.
    pub fn lookup_height(&self, height_cm: f64) -> Result<Lms, LookupError> {
        if self.kind.index_unit() != IndexUnit::TenthCm {
            return Err(LookupError::IndexUnitMismatch {
                kind: self.kind,
                requested: "height in cm",
            });
        }
        let first = f64::from(self.first);
        let last = f64::from(self.last_index());
        let out_of_range = || LookupError::HeightOutOfRange {
            kind: self.kind,
            height_cm,
            min_cm: first / 10.0,
            max_cm: last / 10.0,
        };
        if !height_cm.is_finite() {
            return Err(out_of_range());
        }

        let tenths = height_cm * 10.0;
        let nearest = tenths.round();
        let position = if (tenths - nearest).abs() < TENTH_EPSILON {
            nearest
        } else {
            tenths
        };
        if position < first || position > last {
            return Err(out_of_range());
        }

        let offset = (position - first) / f64::from(self.step);
        let lower = offset.floor() as usize;
        let fraction = offset - lower as f64;
        if fraction == 0.0 || lower + 1 >= self.rows.len() {
            return Ok(self.rows[lower]);
        }
        Ok(self.rows[lower].lerp(&self.rows[lower + 1], fraction))
    }
}

fn check_row(kind: TableKind, sex: Sex, index: u32, lms: &Lms) -> Result<(), StandardsError> {
    if !(lms.l.is_finite() && lms.m.is_finite() && lms.s.is_finite()) {
        return Err(StandardsError::NonFinite { kind, sex, index });
    }
    if lms.m <= 0.0 {
        return Err(StandardsError::NonPositiveMedian {
            kind,
            sex,
            index,
            m: lms.m,
        });
    }
    if lms.s <= 0.0 {
        return Err(StandardsError::NonPositiveSigma {
            kind,
            sex,
            index,
            s: lms.s,
        });
    }
    Ok(())
}

/// Index range a table of this kind must cover to be served.
pub fn required_domain(kind: TableKind) -> (u32, u32) {
    match kind {
        TableKind::WeightForAge | TableKind::LengthHeightForAge => (0, MAX_AGE_DAYS),
        TableKind::WeightForLength => (450, 1100),
        TableKind::WeightForHeight => (650, 1200),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn height_table(step: u32) -> ReferenceTable {
        let rows = (0..=10)
            .map(|i| {
                let index = 650 + i * step;
                (index, Lms::new(-0.35, 7.0 + f64::from(i) * 0.1, 0.08))
            })
            .collect();
        ReferenceTable::from_rows(TableKind::WeightForHeight, Sex::Male, rows).unwrap()
    }

    #[test]
    fn exact_height_row_has_no_drift() {
        let table = height_table(1);
        let lms = table.lookup_height(65.3).unwrap();
        assert_eq!(lms, Lms::new(-0.35, 7.0 + 3.0 * 0.1, 0.08));
    }

    #[test]
    fn interpolates_between_half_centimetre_rows() {
        let table = height_table(5);
        // 65.2 cm sits 2/5 of the way from 65.0 to 65.5
        let lms = table.lookup_height(65.2).unwrap();
        assert!((lms.m - 7.04).abs() < 1e-12);
        assert!((lms.l + 0.35).abs() < 1e-12);
    }

    #[test]
    fn interpolates_sub_tenth_heights() {
        let table = height_table(1);
        let lms = table.lookup_height(65.05).unwrap();
        assert!((lms.m - 7.05).abs() < 1e-9);
    }

    #[test]
    fn last_row_is_served_exactly() {
        let table = height_table(1);
        assert_eq!(table.last_index(), 660);
        assert!((table.lookup_height(66.0).unwrap().m - 8.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_heights_outside_table() {
        let table = height_table(1);
        assert!(matches!(
            table.lookup_height(64.9),
            Err(LookupError::HeightOutOfRange { .. })
        ));
        assert!(matches!(
            table.lookup_height(66.01),
            Err(LookupError::HeightOutOfRange { .. })
        ));
        assert!(table.lookup_height(f64::NAN).is_err());
    }

    #[test]
    fn rejects_gaps_and_disorder() {
        let lms = Lms::new(1.0, 50.0, 0.04);
        let gap = ReferenceTable::from_rows(
            TableKind::LengthHeightForAge,
            Sex::Female,
            vec![(0, lms), (1, lms), (3, lms)],
        );
        assert!(matches!(gap, Err(StandardsError::Gap { expected: 2, found: 3, .. })));

        let disorder = ReferenceTable::from_rows(
            TableKind::WeightForLength,
            Sex::Female,
            vec![(451, lms), (450, lms)],
        );
        assert!(matches!(
            disorder,
            Err(StandardsError::NonMonotonicIndex { .. })
        ));
    }

    #[test]
    fn rejects_invalid_lms_rows() {
        let good = Lms::new(1.0, 50.0, 0.04);
        let result = ReferenceTable::from_rows(
            TableKind::WeightForAge,
            Sex::Male,
            vec![(0, good), (1, Lms::new(0.2, 0.0, 0.1))],
        );
        assert!(matches!(
            result,
            Err(StandardsError::NonPositiveMedian { index: 1, .. })
        ));

        let result = ReferenceTable::from_rows(
            TableKind::WeightForAge,
            Sex::Male,
            vec![(0, Lms::new(0.2, 3.3, -0.01))],
        );
        assert!(matches!(result, Err(StandardsError::NonPositiveSigma { .. })));
    }

    #[test]
    fn age_tables_reject_height_lookups() {
        let table = ReferenceTable::from_rows(
            TableKind::WeightForAge,
            Sex::Male,
            vec![(0, Lms::new(0.35, 3.3, 0.146))],
        )
        .unwrap();
        assert!(matches!(
            table.lookup_height(50.0),
            Err(LookupError::IndexUnitMismatch { .. })
        ));
        assert!(matches!(
            table.lookup_day(1),
            Err(LookupError::AgeOutOfRange { age_days: 1, .. })
        ));
    }
}
