//! In-memory reference store for engine tests.
//!
//! The curves are smooth synthetic stand-ins for the WHO tables. Female
//! weight-for-age at day 181 is pinned to a published-style row so the
//! end-to-end scenario has a hand-checked expected Z-score.

#![allow(dead_code)]

use gizi_model::{Lms, Sex, TableKind};
use gizi_standards::{ReferenceTable, ReferenceTableStore};

pub const FEMALE_WFA_DAY_181: Lms = Lms::new(0.1202, 7.2956, 0.1219);

fn age_rows(median_at_birth: f64, median_gain: f64) -> Vec<(u32, Lms)> {
    (0..=1856u32)
        .map(|day| {
            let t = f64::from(day) / 1856.0;
            (
                day,
                Lms::new(
                    0.35 - 0.45 * t,
                    median_at_birth + median_gain * t.sqrt(),
                    0.14 - 0.02 * t,
                ),
            )
        })
        .collect()
}

fn height_rows(first_tenths: u32, last_tenths: u32, step: u32) -> Vec<(u32, Lms)> {
    (first_tenths..=last_tenths)
        .step_by(step as usize)
        .map(|tenths| {
            let cm = f64::from(tenths) / 10.0;
            (tenths, Lms::new(-0.3521, 2.4 + (cm - 45.0) * 0.2, 0.08))
        })
        .collect()
}

pub fn store() -> ReferenceTableStore {
    let mut tables = Vec::new();
    for (sex, offset) in [(Sex::Male, 0.1), (Sex::Female, 0.0)] {
        let mut weight = age_rows(3.2 + offset, 14.8);
        if sex == Sex::Female {
            weight[181].1 = FEMALE_WFA_DAY_181;
        }
        tables.push(ReferenceTable::from_rows(TableKind::WeightForAge, sex, weight).unwrap());
        tables.push(
            ReferenceTable::from_rows(
                TableKind::LengthHeightForAge,
                sex,
                age_rows(49.1 + offset, 60.0),
            )
            .unwrap(),
        );
        tables.push(
            ReferenceTable::from_rows(TableKind::WeightForLength, sex, height_rows(450, 1100, 1))
                .unwrap(),
        );
        tables.push(
            ReferenceTable::from_rows(TableKind::WeightForHeight, sex, height_rows(650, 1200, 5))
                .unwrap(),
        );
    }
    ReferenceTableStore::from_tables(tables).unwrap()
}
