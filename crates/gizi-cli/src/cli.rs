//! CLI argument definitions for the `gizi` tool.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use gizi_model::{MeasurementType, Sex};
use gizi_report::ReportPeriod;

#[derive(Parser)]
#[command(
    name = "gizi",
    version,
    about = "WHO growth-standard Z-scores and nutrition status for Posyandu data",
    long_about = "Compute WHO Child Growth Standard Z-scores (BB/U, TB/U, BB/TB),\n\
                  classify nutrition status per Permenkes 2/2020, and aggregate\n\
                  SKDN and prevalence figures for a reporting month."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Engine configuration file (TOML).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Reference data directory (overrides the config file and GIZI_STANDARDS_DIR).
    #[arg(long = "standards-dir", value_name = "DIR", global = true)]
    pub standards_dir: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Verify the reference tables against their manifest pins.
    Verify(VerifyArgs),

    /// Assess a single measurement.
    Assess(AssessArgs),

    /// Aggregate SKDN and prevalence from a batch CSV.
    Report(ReportArgs),
}

#[derive(Args)]
pub struct VerifyArgs {
    /// Reference data directory to verify (defaults to the configured one).
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Print the doctor report as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct AssessArgs {
    /// Sex of the child (L/P, M/F, male/female).
    #[arg(long = "sex")]
    pub sex: Sex,

    /// Date of birth (YYYY-MM-DD).
    #[arg(long = "birth-date", value_name = "DATE")]
    pub birth_date: NaiveDate,

    /// Date of the measurement (YYYY-MM-DD).
    #[arg(long = "date", value_name = "DATE")]
    pub measurement_date: NaiveDate,

    /// Weight in kilograms.
    #[arg(long = "weight", value_name = "KG")]
    pub weight_kg: f64,

    /// Length or height in centimetres.
    #[arg(long = "height", value_name = "CM")]
    pub height_cm: f64,

    /// How the length/height was taken (recumbent or standing).
    #[arg(long = "measurement-type", value_name = "TYPE")]
    pub measurement_type: MeasurementType,

    /// Date of the previous weighing, for the growth trend.
    #[arg(long = "prior-date", value_name = "DATE", requires = "prior_weight_grams")]
    pub prior_date: Option<NaiveDate>,

    /// Weight at the previous weighing, in grams.
    #[arg(long = "prior-weight", value_name = "GRAMS", requires = "prior_date")]
    pub prior_weight_grams: Option<u32>,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Args)]
pub struct ReportArgs {
    /// Batch CSV with one row per registered child.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Reporting month (YYYY-MM).
    #[arg(long = "period", value_name = "YYYY-MM")]
    pub period: ReportPeriod,

    /// Restrict to one posyandu/location code.
    #[arg(long = "location")]
    pub location: Option<String>,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
