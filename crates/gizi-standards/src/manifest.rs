#![deny(unsafe_code)]

use gizi_model::{Sex, TableKind};
use serde::{Deserialize, Serialize};

pub const MANIFEST_SCHEMA: &str = "gizi.reference-manifest";
pub const MANIFEST_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub manifest: ManifestHeader,
    pub source: Source,
    pub tables: Vec<ManifestTable>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestHeader {
    pub schema: String,
    pub schema_version: u32,
}

/// Provenance of the dataset, e.g. "WHO Child Growth Standards" / "2006".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub publisher: String,
    pub standard: String,
    pub version: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestTable {
    pub path: String,
    pub sha256: String,
    pub kind: TableKind,
    pub sex: Sex,
}
