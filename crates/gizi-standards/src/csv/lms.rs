#![deny(unsafe_code)]

use std::path::Path;

use gizi_model::{IndexUnit, Lms, TableKind};

use crate::error::StandardsError;

const DAY_HEADERS: &[&str] = &["day", "age", "agedays"];
const HEIGHT_HEADERS: &[&str] = &["length", "height", "lorh", "cm"];

/// Parse an LMS table export into `(index, lms)` rows.
///
/// Accepts the WHO tab-separated `.txt` exports as well as comma-separated
/// files; the delimiter is taken from the header line. Height-indexed rows are
/// converted to tenths of a centimetre and must sit on a 0.1 cm mark.
pub fn parse_lms_csv(
    bytes: &[u8],
    path: &Path,
    kind: TableKind,
) -> Result<Vec<(u32, Lms)>, StandardsError> {
    let csv_error = |message: String| StandardsError::Csv {
        path: path.to_path_buf(),
        message,
    };

    let header_line = bytes.split(|b| *b == b'\n').next().unwrap_or_default();
    let delimiter = if header_line.contains(&b'\t') {
        b'\t'
    } else {
        b','
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(bytes);
    let headers = reader
        .headers()
        .map_err(|e| csv_error(e.to_string()))?
        .clone();

    let position = |names: &[&str]| -> Option<usize> {
        headers.iter().position(|h| {
            let h = h.trim_matches('\u{feff}').trim().to_lowercase();
            names.contains(&h.as_str())
        })
    };

    let index_names = match kind.index_unit() {
        IndexUnit::Days => DAY_HEADERS,
        IndexUnit::TenthCm => HEIGHT_HEADERS,
    };
    let index_col = position(index_names)
        .ok_or_else(|| csv_error(format!("missing index column (one of {index_names:?})")))?;
    let l_col = position(&["l"]).ok_or_else(|| csv_error("missing L column".to_string()))?;
    let m_col = position(&["m"]).ok_or_else(|| csv_error("missing M column".to_string()))?;
    let s_col = position(&["s"]).ok_or_else(|| csv_error("missing S column".to_string()))?;

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|e| csv_error(e.to_string()))?;
        // header is line 1
        let line = line + 2;
        let field = |col: usize, name: &'static str| -> Result<&str, StandardsError> {
            record
                .get(col)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| csv_error(format!("line {line}: missing {name}")))
        };
        let number = |col: usize, name: &'static str| -> Result<f64, StandardsError> {
            let raw = field(col, name)?;
            raw.parse::<f64>()
                .map_err(|_| csv_error(format!("line {line}: invalid {name} value '{raw}'")))
        };

        let raw_index = field(index_col, "index")?;
        let index = match kind.index_unit() {
            IndexUnit::Days => raw_index.parse::<u32>().map_err(|_| {
                csv_error(format!("line {line}: invalid day index '{raw_index}'"))
            })?,
            IndexUnit::TenthCm => parse_tenths(raw_index).ok_or_else(|| {
                csv_error(format!(
                    "line {line}: height '{raw_index}' is not on a 0.1 cm mark"
                ))
            })?,
        };

        rows.push((
            index,
            Lms::new(number(l_col, "L")?, number(m_col, "M")?, number(s_col, "S")?),
        ));
    }
    Ok(rows)
}

fn parse_tenths(raw: &str) -> Option<u32> {
    let cm = raw.parse::<f64>().ok()?;
    if !cm.is_finite() || cm < 0.0 {
        return None;
    }
    let tenths = cm * 10.0;
    let rounded = tenths.round();
    if (tenths - rounded).abs() > 1e-6 || rounded > f64::from(u32::MAX) {
        return None;
    }
    Some(rounded as u32)
}
