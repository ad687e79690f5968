//! Batch CSV input for the `report` command.
//!
//! One row per registered child per month:
//!
//! ```text
//! location,period,has_growth_record,sex,birth_date,measurement_date,weight_kg,height_cm,measurement_type,prior_date,prior_weight_grams
//! melati,2024-03,ya,P,2023-01-01,2024-03-05,9.1,76.0,recumbent,2024-02-06,8800
//! melati,2024-03,tidak,L,2022-06-10,,,,,,
//! ```
//!
//! A row without `measurement_date` is a registered child who was not
//! weighed that month. A measured row must be dated inside its own `period`
//! and give `prior_date` and `prior_weight_grams` together or not at all.

use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, de};
use tracing::warn;

use gizi_core::GrowthEngine;
use gizi_model::{Measurement, MeasurementType, PriorWeighing, Sex};
use gizi_report::{ChildPeriodRecord, ReportPeriod};

#[derive(Debug, Clone, Deserialize)]
pub struct BatchRow {
    pub location: String,
    pub period: ReportPeriod,
    #[serde(default, deserialize_with = "yes_no")]
    pub has_growth_record: bool,
    pub sex: String,
    pub birth_date: NaiveDate,
    pub measurement_date: Option<NaiveDate>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub measurement_type: Option<String>,
    pub prior_date: Option<NaiveDate>,
    pub prior_weight_grams: Option<u32>,
}

fn yes_no<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "y" | "yes" | "ya" => Ok(true),
        "" | "0" | "false" | "n" | "no" | "tidak" => Ok(false),
        other => Err(de::Error::custom(format!(
            "expected a yes/no flag, got '{other}'"
        ))),
    }
}

impl BatchRow {
    /// The measurement taken this month, if the child was weighed.
    pub fn measurement(&self) -> Result<Option<Measurement>> {
        let Some(measurement_date) = self.measurement_date else {
            return Ok(None);
        };
        if !self.period.contains(measurement_date) {
            bail!(
                "measurement_date {measurement_date} is outside period {}",
                self.period
            );
        }
        let sex: Sex = self.sex.parse()?;
        let weight_kg = self
            .weight_kg
            .ok_or_else(|| anyhow!("weight_kg is required when measurement_date is set"))?;
        let height_cm = self
            .height_cm
            .ok_or_else(|| anyhow!("height_cm is required when measurement_date is set"))?;
        let measurement_type: MeasurementType = self
            .measurement_type
            .as_deref()
            .ok_or_else(|| anyhow!("measurement_type is required when measurement_date is set"))?
            .parse()?;
        Ok(Some(Measurement {
            sex,
            birth_date: self.birth_date,
            measurement_date,
            weight_kg,
            height_cm,
            measurement_type,
        }))
    }

    /// The weighing from the previous cycle, if both of its fields are set.
    pub fn prior(&self) -> Result<Option<PriorWeighing>> {
        match (self.prior_date, self.prior_weight_grams) {
            (Some(date), Some(weight_grams)) => Ok(Some(PriorWeighing { date, weight_grams })),
            (None, None) => Ok(None),
            (Some(_), None) => bail!("prior_weight_grams is required when prior_date is set"),
            (None, Some(_)) => bail!("prior_date is required when prior_weight_grams is set"),
        }
    }

    /// The measurement together with its prior weighing.
    fn measured(&self) -> Result<Option<(Measurement, Option<PriorWeighing>)>> {
        match self.measurement()? {
            Some(measurement) => Ok(Some((measurement, self.prior()?))),
            None => Ok(None),
        }
    }
}

/// Records built from a batch, plus how many measured rows were rejected.
#[derive(Debug, Default)]
pub struct BatchRecords {
    pub records: Vec<ChildPeriodRecord>,
    pub rejected: usize,
}

pub fn read_batch(path: &Path) -> Result<Vec<BatchRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("open {}", path.display()))?;
    reader
        .deserialize::<BatchRow>()
        .enumerate()
        .map(|(i, row)| row.with_context(|| format!("{} line {}", path.display(), i + 2)))
        .collect()
}

/// Assess every measured row.
///
/// Rows with bad input are kept as registered-but-unmeasured and counted as
/// rejected. A reference-data failure aborts the whole batch.
pub fn assess_batch(rows: &[BatchRow], engine: &GrowthEngine<'_>) -> Result<BatchRecords> {
    let mut batch = BatchRecords::default();
    for (i, row) in rows.iter().enumerate() {
        let line = i + 2;
        let assessment = match row.measured() {
            Ok(Some((measurement, prior))) => match engine.assess(&measurement, prior.as_ref()) {
                Ok(result) => Some(result),
                Err(error) if error.is_reference_error() => {
                    return Err(error).with_context(|| format!("line {line}"));
                }
                Err(error) => {
                    warn!(line, %error, "rejected measurement");
                    batch.rejected += 1;
                    None
                }
            },
            Ok(None) => None,
            Err(error) => {
                warn!(line, %error, "rejected row");
                batch.rejected += 1;
                None
            }
        };
        batch.records.push(ChildPeriodRecord {
            location: row.location.clone(),
            period: row.period,
            has_growth_record: row.has_growth_record,
            assessment,
        });
    }
    Ok(batch)
}
