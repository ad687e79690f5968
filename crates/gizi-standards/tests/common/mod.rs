//! On-disk reference data fixtures.
//!
//! The LMS values are smooth synthetic curves shaped like the WHO tables;
//! they exercise loading and verification, not clinical accuracy.

#![allow(dead_code)]

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use gizi_standards::hash::sha256_hex;

pub struct FixtureTable {
    pub kind: &'static str,
    pub sex: &'static str,
    pub path: String,
    pub contents: String,
}

pub fn age_csv(header: &str, median_at_birth: f64, median_gain: f64) -> String {
    let mut out = format!("{header},L,M,S\n");
    for day in 0..=1856u32 {
        let t = f64::from(day) / 1856.0;
        let _ = writeln!(
            out,
            "{day},{:.4},{:.4},{:.5}",
            0.35 - 0.45 * t,
            median_at_birth + median_gain * t.sqrt(),
            0.14 - 0.02 * t
        );
    }
    out
}

pub fn height_csv(header: &str, first_tenths: u32, last_tenths: u32, step: u32) -> String {
    let mut out = format!("{header},L,M,S\n");
    let mut tenths = first_tenths;
    while tenths <= last_tenths {
        let cm = f64::from(tenths) / 10.0;
        let _ = writeln!(
            out,
            "{cm:.1},-0.3521,{:.4},0.08",
            2.4 + (cm - 45.0) * 0.2
        );
        tenths += step;
    }
    out
}

pub fn fixture_tables() -> Vec<FixtureTable> {
    let mut tables = Vec::new();
    for (sex, file_sex, offset) in [("male", "boys", 0.1), ("female", "girls", 0.0)] {
        tables.push(FixtureTable {
            kind: "weight_for_age",
            sex,
            path: format!("who/wfa_{file_sex}.csv"),
            contents: age_csv("Day", 3.2 + offset, 14.8),
        });
        tables.push(FixtureTable {
            kind: "length_height_for_age",
            sex,
            path: format!("who/lhfa_{file_sex}.csv"),
            contents: age_csv("Day", 49.1 + offset, 60.0),
        });
        tables.push(FixtureTable {
            kind: "weight_for_length",
            sex,
            path: format!("who/wfl_{file_sex}.csv"),
            contents: height_csv("Length", 450, 1100, 1),
        });
        tables.push(FixtureTable {
            kind: "weight_for_height",
            sex,
            path: format!("who/wfh_{file_sex}.csv"),
            contents: height_csv("Height", 650, 1200, 5),
        });
    }
    tables
}

pub fn write(path: &Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

pub fn manifest_for(tables: &[FixtureTable]) -> String {
    let mut manifest = String::from(
        r#"[manifest]
schema = "gizi.reference-manifest"
schema_version = 1

[source]
publisher = "WHO"
standard = "WHO Child Growth Standards"
version = "2006"
"#,
    );
    for table in tables {
        let _ = write!(
            manifest,
            "\n[[tables]]\npath = \"{}\"\nsha256 = \"{}\"\nkind = \"{}\"\nsex = \"{}\"\n",
            table.path,
            sha256_hex(table.contents.as_bytes()),
            table.kind,
            table.sex
        );
    }
    manifest
}

/// Write a complete, verifiable reference directory.
pub fn write_standards_dir(root: &Path, tables: &[FixtureTable]) {
    for table in tables {
        write(&root.join(&table.path), table.contents.as_bytes());
    }
    write(&root.join("manifest.toml"), manifest_for(tables).as_bytes());
}
