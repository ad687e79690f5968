//! Batch CSV ingestion for the `report` command.

use std::fs;

use gizi_cli::input::{assess_batch, read_batch};
use gizi_core::GrowthEngine;
use gizi_model::{GrowthTrend, Lms, Sex, TableKind};
use gizi_report::{ReportPeriod, ReportScope, aggregate};
use gizi_standards::{ReferenceTable, ReferenceTableStore};

const HEADER: &str = "location,period,has_growth_record,sex,birth_date,measurement_date,\
                      weight_kg,height_cm,measurement_type,prior_date,prior_weight_grams";

fn synthetic_store() -> ReferenceTableStore {
    let age_rows = |m0: f64, gain: f64| -> Vec<(u32, Lms)> {
        (0..=1856u32)
            .map(|day| {
                let t = f64::from(day) / 1856.0;
                (day, Lms::new(0.35 - 0.45 * t, m0 + gain * t.sqrt(), 0.14 - 0.02 * t))
            })
            .collect()
    };
    let height_rows = |first: u32, last: u32, step: usize| -> Vec<(u32, Lms)> {
        (first..=last)
            .step_by(step)
            .map(|tenths| {
                let cm = f64::from(tenths) / 10.0;
                (tenths, Lms::new(-0.3521, 2.4 + (cm - 45.0) * 0.2, 0.08))
            })
            .collect()
    };
    let mut tables = Vec::new();
    for sex in Sex::ALL {
        tables.push(
            ReferenceTable::from_rows(TableKind::WeightForAge, sex, age_rows(3.2, 14.8)).unwrap(),
        );
        tables.push(
            ReferenceTable::from_rows(TableKind::LengthHeightForAge, sex, age_rows(49.1, 60.0))
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

fn write_batch(rows: &[&str]) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("batch.csv");
    let mut contents = format!("{HEADER}\n");
    for row in rows {
        contents.push_str(row);
        contents.push('\n');
    }
    fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn reads_and_assesses_rows() {
    let (_dir, path) = write_batch(&[
        "melati,2024-03,ya,P,2023-01-01,2024-03-05,9.1,76.0,recumbent,2024-02-06,8800",
        "melati,2024-03,tidak,L,2022-06-10,,,,,,",
        "mawar,2024-03,1,L,2021-02-01,2024-03-12,13.0,93.5,standing,,",
    ]);
    let rows = read_batch(&path).unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows[0].has_growth_record);
    assert!(!rows[1].has_growth_record);
    assert_eq!(rows[0].prior().unwrap().unwrap().weight_grams, 8800);
    assert!(rows[2].prior().unwrap().is_none());
    assert!(rows[1].measurement().unwrap().is_none());

    let store = synthetic_store();
    let engine = GrowthEngine::new(&store);
    let batch = assess_batch(&rows, &engine).unwrap();

    assert_eq!(batch.rejected, 0);
    assert_eq!(batch.records.len(), 3);
    // 14 completed months: 200 g band, 300 g over 28 days
    let first = batch.records[0].assessment.as_ref().unwrap();
    assert_eq!(first.age_months, 14);
    assert_eq!(first.status_naik, GrowthTrend::AdequateGain);
    assert!(batch.records[1].assessment.is_none());
    assert_eq!(
        batch.records[2].assessment.as_ref().unwrap().status_naik,
        GrowthTrend::Indeterminate
    );
}

#[test]
fn bad_rows_are_rejected_but_still_registered() {
    let (_dir, path) = write_batch(&[
        "melati,2024-03,ya,X,2023-01-01,2024-03-05,9.1,76.0,recumbent,,",
        "melati,2024-03,ya,P,2023-01-01,2024-03-05,,76.0,recumbent,,",
        "melati,2024-03,ya,P,2017-01-01,2024-03-05,17.0,105.0,standing,,",
        "melati,2024-03,ya,P,2023-01-01,2024-03-05,9.1,76.0,recumbent,,",
    ]);
    let rows = read_batch(&path).unwrap();
    let store = synthetic_store();
    let batch = assess_batch(&rows, &GrowthEngine::new(&store)).unwrap();

    assert_eq!(batch.rejected, 3);
    let report = aggregate(
        &batch.records,
        &ReportScope::new(ReportPeriod::new(2024, 3).unwrap()),
    );
    assert_eq!(report.skdn.s, 4);
    assert_eq!(report.skdn.k, 4);
    assert_eq!(report.skdn.d, 1);
    assert_eq!(report.skdn.o, 1);
}

#[test]
fn measurement_outside_row_period_is_not_counted_as_measured() {
    let (_dir, path) = write_batch(&[
        "melati,2024-03,ya,P,2022-06-01,2023-01-05,8.0,70.0,recumbent,,",
        "melati,2024-03,ya,P,2022-06-01,2024-04-01,10.0,80.0,recumbent,,",
        "melati,2024-03,ya,P,2022-06-01,2024-03-31,10.0,80.0,recumbent,,",
    ]);
    let rows = read_batch(&path).unwrap();
    let err = rows[0].measurement().unwrap_err();
    assert!(format!("{err}").contains("outside period 2024-03"), "{err}");

    let store = synthetic_store();
    let batch = assess_batch(&rows, &GrowthEngine::new(&store)).unwrap();
    assert_eq!(batch.rejected, 2);
    assert!(batch.records[0].assessment.is_none());
    assert!(batch.records[1].assessment.is_none());
    assert!(batch.records[2].assessment.is_some());

    let report = aggregate(
        &batch.records,
        &ReportScope::new(ReportPeriod::new(2024, 3).unwrap()),
    );
    assert_eq!(report.skdn.s, 3);
    assert_eq!(report.skdn.d, 1);
    assert_eq!(report.measured, 1);
}

#[test]
fn half_given_prior_weighing_is_rejected() {
    let (_dir, path) = write_batch(&[
        "melati,2024-03,ya,P,2023-01-01,2024-03-05,9.1,76.0,recumbent,2024-02-06,",
        "melati,2024-03,ya,P,2023-01-01,2024-03-05,9.1,76.0,recumbent,,8800",
        "melati,2024-03,ya,P,2023-01-01,,,,,2024-02-06,",
    ]);
    let rows = read_batch(&path).unwrap();
    assert!(rows[0].prior().is_err());
    assert!(rows[1].prior().is_err());

    let store = synthetic_store();
    let batch = assess_batch(&rows, &GrowthEngine::new(&store)).unwrap();
    // the unmeasured row never needs its prior
    assert_eq!(batch.rejected, 2);
    assert!(batch.records.iter().all(|r| r.assessment.is_none()));
}

#[test]
fn malformed_csv_reports_line() {
    let (_dir, path) = write_batch(&[
        "melati,2024-03,ya,P,2023-01-01,,,,,,",
        "melati,2024-13,ya,P,2023-01-01,,,,,,",
    ]);
    let err = read_batch(&path).unwrap_err();
    assert!(format!("{err:#}").contains("line 3"), "{err:#}");
}

#[test]
fn unknown_flag_value_is_an_error() {
    let (_dir, path) = write_batch(&["melati,2024-03,maybe,P,2023-01-01,,,,,,"]);
    assert!(read_batch(&path).is_err());
}
