#![deny(unsafe_code)]

use gizi_model::{Sex, TableKind};

use crate::manifest::{MANIFEST_SCHEMA_VERSION, Source};
use crate::store::{TableSummary, VerifySummary};

#[derive(Debug, Clone, serde::Serialize)]
pub struct DoctorReport {
    pub schema: String,
    pub schema_version: u32,
    pub source: Source,
    pub tables: Vec<TableSummary>,
    pub counts: DoctorCounts,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct DoctorCounts {
    pub tables: usize,
    pub rows: usize,
    pub age_rows: usize,
    pub height_rows: usize,
}

impl DoctorReport {
    pub fn from_verify_summary(summary: &VerifySummary) -> Self {
        let rows_where = |pred: fn(&TableSummary) -> bool| -> usize {
            summary.tables.iter().filter(|t| pred(t)).map(|t| t.rows).sum()
        };
        Self {
            schema: "gizi.standards-doctor".to_string(),
            schema_version: MANIFEST_SCHEMA_VERSION,
            source: summary.source.clone(),
            tables: summary.tables.clone(),
            counts: DoctorCounts {
                tables: summary.table_count,
                rows: summary.row_count,
                age_rows: rows_where(|t| {
                    matches!(
                        t.kind,
                        TableKind::WeightForAge | TableKind::LengthHeightForAge
                    )
                }),
                height_rows: rows_where(|t| {
                    matches!(
                        t.kind,
                        TableKind::WeightForLength | TableKind::WeightForHeight
                    )
                }),
            },
        }
    }

    /// Table summary for one (kind, sex) pair, if present.
    pub fn table(&self, kind: TableKind, sex: Sex) -> Option<&TableSummary> {
        self.tables.iter().find(|t| t.kind == kind && t.sex == sex)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
