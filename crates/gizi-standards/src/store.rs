#![deny(unsafe_code)]

//! The process-wide, read-only set of LMS reference tables.
//!
//! A [`ReferenceTableStore`] is either complete (all four table kinds for
//! both sexes, each covering its required domain) or it does not exist:
//! every constructor checks completeness before returning.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use gizi_model::{IndexUnit, Lms, Sex, TableKind};
use tracing::{debug, info, info_span};

use crate::csv::lms::parse_lms_csv;
use crate::error::{LookupError, StandardsError};
use crate::hash::sha256_hex;
use crate::manifest::{MANIFEST_SCHEMA, MANIFEST_SCHEMA_VERSION, Manifest, ManifestTable, Source};
use crate::table::{ReferenceTable, required_domain};

const TABLE_COUNT: usize = TableKind::ALL.len() * Sex::ALL.len();

/// Position of a lookup within a table: an age or a length/height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TableIndex {
    Day(u32),
    HeightCm(f64),
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TableSummary {
    pub kind: TableKind,
    pub sex: Sex,
    pub path: Option<String>,
    pub sha256: Option<String>,
    pub rows: usize,
    pub first_index: u32,
    pub last_index: u32,
    pub step: u32,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct VerifySummary {
    pub standards_dir: PathBuf,
    pub source: Source,
    pub table_count: usize,
    pub row_count: usize,
    pub tables: Vec<TableSummary>,
}

#[derive(Debug, Clone)]
pub struct ReferenceTableStore {
    // slot(kind, sex) -> table, always TABLE_COUNT entries
    tables: Vec<ReferenceTable>,
}

fn slot(kind: TableKind, sex: Sex) -> usize {
    let kind_slot = match kind {
        TableKind::WeightForAge => 0,
        TableKind::LengthHeightForAge => 1,
        TableKind::WeightForLength => 2,
        TableKind::WeightForHeight => 3,
    };
    let sex_slot = match sex {
        Sex::Male => 0,
        Sex::Female => 1,
    };
    kind_slot * Sex::ALL.len() + sex_slot
}

impl ReferenceTableStore {
    /// Assemble a store from already-built tables.
    ///
    /// Fails if any (kind, sex) pair is missing or duplicated, or if a table
    /// does not cover its required domain.
    pub fn from_tables(tables: Vec<ReferenceTable>) -> Result<Self, StandardsError> {
        let mut slots: Vec<Option<ReferenceTable>> = vec![None; TABLE_COUNT];
        for table in tables {
            check_domain(&table)?;
            let entry = &mut slots[slot(table.kind(), table.sex())];
            if entry.is_some() {
                return Err(StandardsError::DuplicateTable {
                    kind: table.kind(),
                    sex: table.sex(),
                });
            }
            *entry = Some(table);
        }

        let mut complete = Vec::with_capacity(TABLE_COUNT);
        for kind in TableKind::ALL {
            for sex in Sex::ALL {
                match slots[slot(kind, sex)].take() {
                    Some(table) => complete.push(table),
                    None => return Err(StandardsError::MissingTable { kind, sex }),
                }
            }
        }
        Ok(Self { tables: complete })
    }

    /// Verify `standards_dir/manifest.toml` and every pinned table, then load.
    pub fn verify_and_load(standards_dir: &Path) -> Result<(Self, VerifySummary), StandardsError> {
        let span = info_span!("load_reference_tables", dir = %standards_dir.display());
        let _guard = span.enter();

        let manifest = load_manifest(&standards_dir.join("manifest.toml"))?;
        validate_manifest(&manifest)?;

        let mut entries = manifest.tables.clone();
        entries.sort_by_key(|t| slot(t.kind, t.sex));

        let mut tables = Vec::with_capacity(entries.len());
        let mut summaries = Vec::with_capacity(entries.len());
        for entry in &entries {
            let full_path = standards_dir.join(&entry.path);
            let bytes = read_verified(&full_path, &entry.sha256)?;
            let rows = parse_lms_csv(&bytes, &full_path, entry.kind)?;
            let table = ReferenceTable::from_rows(entry.kind, entry.sex, rows)?;
            debug!(
                kind = %entry.kind,
                sex = %entry.sex,
                rows = table.len(),
                first = table.first_index(),
                last = table.last_index(),
                "loaded reference table"
            );
            summaries.push(TableSummary {
                path: Some(entry.path.clone()),
                sha256: Some(entry.sha256.to_ascii_lowercase()),
                ..summarize(&table)
            });
            tables.push(table);
        }

        let store = Self::from_tables(tables)?;
        let summary = VerifySummary {
            standards_dir: standards_dir.to_path_buf(),
            source: manifest.source.clone(),
            table_count: summaries.len(),
            row_count: summaries.iter().map(|t| t.rows).sum(),
            tables: summaries,
        };
        info!(
            tables = summary.table_count,
            rows = summary.row_count,
            standard = %summary.source.standard,
            version = %summary.source.version,
            "reference tables verified"
        );
        Ok((store, summary))
    }

    pub fn table(&self, kind: TableKind, sex: Sex) -> &ReferenceTable {
        &self.tables[slot(kind, sex)]
    }

    /// LMS parameters at `index`: exact for published rows, interpolated
    /// between rows for heights, an error outside the table.
    pub fn lookup(&self, kind: TableKind, sex: Sex, index: TableIndex) -> Result<Lms, LookupError> {
        let table = self.table(kind, sex);
        match index {
            TableIndex::Day(day) => table.lookup_day(day),
            TableIndex::HeightCm(cm) => table.lookup_height(cm),
        }
    }

    /// Summaries of the in-memory tables (no file provenance).
    pub fn summaries(&self) -> Vec<TableSummary> {
        self.tables.iter().map(summarize).collect()
    }
}

fn summarize(table: &ReferenceTable) -> TableSummary {
    TableSummary {
        kind: table.kind(),
        sex: table.sex(),
        path: None,
        sha256: None,
        rows: table.len(),
        first_index: table.first_index(),
        last_index: table.last_index(),
        step: table.step(),
    }
}

fn check_domain(table: &ReferenceTable) -> Result<(), StandardsError> {
    let (required_first, required_last) = required_domain(table.kind());
    let first = table.first_index();
    let last = table.last_index();
    let covers = match table.kind().index_unit() {
        // age tables are published exactly for day 0..=1856
        IndexUnit::Days => first == required_first && last >= required_last,
        IndexUnit::TenthCm => first <= required_first && last >= required_last,
    };
    if !covers {
        return Err(StandardsError::IncompleteDomain {
            kind: table.kind(),
            sex: table.sex(),
            first,
            last,
            required_first,
            required_last,
        });
    }
    Ok(())
}

fn load_manifest(path: &Path) -> Result<Manifest, StandardsError> {
    let contents = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    toml::from_str(&contents).map_err(|e| StandardsError::Toml {
        path: path.to_path_buf(),
        source: e,
    })
}

fn validate_manifest(manifest: &Manifest) -> Result<(), StandardsError> {
    if manifest.manifest.schema != MANIFEST_SCHEMA {
        return Err(StandardsError::InvalidManifest {
            message: format!("unsupported schema: {}", manifest.manifest.schema),
        });
    }
    if manifest.manifest.schema_version != MANIFEST_SCHEMA_VERSION {
        return Err(StandardsError::InvalidManifest {
            message: format!(
                "unsupported schema_version: {}",
                manifest.manifest.schema_version
            ),
        });
    }

    let mut seen: BTreeSet<(TableKind, Sex)> = BTreeSet::new();
    for table in &manifest.tables {
        if !seen.insert((table.kind, table.sex)) {
            return Err(StandardsError::DuplicateTable {
                kind: table.kind,
                sex: table.sex,
            });
        }
        validate_sha(table)?;
        validate_path(&table.path)?;
    }

    for kind in TableKind::ALL {
        for sex in Sex::ALL {
            if !seen.contains(&(kind, sex)) {
                return Err(StandardsError::MissingTable { kind, sex });
            }
        }
    }
    Ok(())
}

fn validate_sha(table: &ManifestTable) -> Result<(), StandardsError> {
    let sha = &table.sha256;
    if sha.len() != 64 || !sha.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(StandardsError::InvalidSha256 {
            path: PathBuf::from(&table.path),
            message: "sha256 must be 64 hex characters".to_string(),
        });
    }
    Ok(())
}

fn validate_path(path: &str) -> Result<PathBuf, StandardsError> {
    if path.contains('\\') {
        return Err(StandardsError::InvalidPath {
            path: PathBuf::from(path),
            message: "manifest path must use '/' separators".to_string(),
        });
    }

    let p = PathBuf::from(path);
    if p.is_absolute() {
        return Err(StandardsError::InvalidPath {
            path: p,
            message: "manifest path must be relative".to_string(),
        });
    }

    if p.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(StandardsError::InvalidPath {
            path: p,
            message: "manifest path must not traverse out of the standards directory"
                .to_string(),
        });
    }

    Ok(p)
}

fn read_verified(full_path: &Path, expected_sha: &str) -> Result<Vec<u8>, StandardsError> {
    let bytes = std::fs::read(full_path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StandardsError::MissingFile {
                path: full_path.to_path_buf(),
            }
        } else {
            StandardsError::io(full_path, e)
        }
    })?;

    let actual = sha256_hex(&bytes);
    let expected = expected_sha.to_ascii_lowercase();
    if actual != expected {
        return Err(StandardsError::Sha256Mismatch {
            path: full_path.to_path_buf(),
            expected,
            actual,
        });
    }
    Ok(bytes)
}
