use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use gizi_cli::input::{BatchRecords, assess_batch, read_batch};
use gizi_core::{EngineConfig, GrowthEngine};
use gizi_model::{Measurement, NutritionResult, PriorWeighing};
use gizi_report::{PopulationReport, ReportScope, aggregate};
use gizi_standards::{DoctorReport, ReferenceTableStore};

use crate::cli::{AssessArgs, Cli, ReportArgs};

/// Engine configuration and loaded reference tables.
pub struct Session {
    pub config: EngineConfig,
    pub store: ReferenceTableStore,
    pub doctor: DoctorReport,
}

impl Session {
    pub fn engine(&self) -> GrowthEngine<'_> {
        GrowthEngine::with_policy(&self.store, self.config.trend.clone())
    }
}

/// Load the config and verify the reference tables.
///
/// The reference directory is taken from `standards_dir`, then
/// `--standards-dir`, then the config file, then the environment default.
pub fn load_session(cli: &Cli, standards_dir: Option<&Path>) -> Result<Session> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_path(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(dir) = standards_dir.or(cli.standards_dir.as_deref()) {
        config.standards_dir = Some(dir.to_path_buf());
    }
    let standards_dir = config.resolve_standards_dir();
    let (store, summary) = ReferenceTableStore::verify_and_load(&standards_dir)
        .with_context(|| format!("load reference tables from {}", standards_dir.display()))?;
    let doctor = DoctorReport::from_verify_summary(&summary);
    Ok(Session {
        config,
        store,
        doctor,
    })
}

pub fn run_assess(session: &Session, args: &AssessArgs) -> Result<NutritionResult> {
    let measurement = Measurement {
        sex: args.sex,
        birth_date: args.birth_date,
        measurement_date: args.measurement_date,
        weight_kg: args.weight_kg,
        height_cm: args.height_cm,
        measurement_type: args.measurement_type,
    };
    let prior = match (args.prior_date, args.prior_weight_grams) {
        (Some(date), Some(weight_grams)) => Some(PriorWeighing { date, weight_grams }),
        _ => None,
    };
    let result = session
        .engine()
        .assess(&measurement, prior.as_ref())
        .context("assess measurement")?;
    Ok(result)
}

pub fn run_report(session: &Session, args: &ReportArgs) -> Result<(PopulationReport, usize)> {
    let rows = read_batch(&args.input)?;
    let BatchRecords { records, rejected } = assess_batch(&rows, &session.engine())?;
    let mut scope = ReportScope::new(args.period);
    if let Some(location) = &args.location {
        scope = scope.at_location(location.clone());
    }
    let report = aggregate(&records, &scope);
    info!(
        rows = rows.len(),
        rejected,
        in_scope = report.skdn.s,
        "batch aggregated"
    );
    Ok((report, rejected))
}
