//! Type-safe enumerations for anthropometric concepts.
//!
//! These enums replace the loose string codes ("L"/"P", "BB/U", ...) used by
//! data-entry forms and reference-data files.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Sex of the child, selecting the reference table pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Sex {
    type Err = ModelError;

    /// Accepts English and Indonesian codes (`L` laki-laki, `P` perempuan),
    /// plus the WHO numeric codes (1 male, 2 female).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "M" | "MALE" | "L" | "LAKI-LAKI" | "1" => Ok(Sex::Male),
            "F" | "FEMALE" | "P" | "PEREMPUAN" | "2" => Ok(Sex::Female),
            _ => Err(ModelError::InvalidSex(s.to_string())),
        }
    }
}

/// How the child's length/height was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementType {
    /// Lying down (length board).
    Recumbent,
    /// Standing (stadiometer).
    Standing,
}

impl MeasurementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementType::Recumbent => "recumbent",
            MeasurementType::Standing => "standing",
        }
    }
}

impl fmt::Display for MeasurementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MeasurementType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "RECUMBENT" | "LENGTH" | "L" | "TERLENTANG" => Ok(MeasurementType::Recumbent),
            "STANDING" | "HEIGHT" | "H" | "BERDIRI" => Ok(MeasurementType::Standing),
            _ => Err(ModelError::InvalidMeasurementType(s.to_string())),
        }
    }
}

/// Anthropometric indicator classified by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    /// BB/U.
    WeightForAge,
    /// TB/U (PB/U under 24 months).
    HeightForAge,
    /// BB/TB (BB/PB under 24 months).
    WeightForHeight,
}

impl Indicator {
    pub const ALL: [Indicator; 3] = [
        Indicator::WeightForAge,
        Indicator::HeightForAge,
        Indicator::WeightForHeight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Indicator::WeightForAge => "weight_for_age",
            Indicator::HeightForAge => "height_for_age",
            Indicator::WeightForHeight => "weight_for_height",
        }
    }

    /// Short Indonesian code used on growth cards and reports.
    pub fn code(&self) -> &'static str {
        match self {
            Indicator::WeightForAge => "BB/U",
            Indicator::HeightForAge => "TB/U",
            Indicator::WeightForHeight => "BB/TB",
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Indicator {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "WEIGHT_FOR_AGE" | "WFA" | "BB/U" => Ok(Indicator::WeightForAge),
            "HEIGHT_FOR_AGE" | "LENGTH_FOR_AGE" | "HFA" | "LHFA" | "TB/U" | "PB/U" => {
                Ok(Indicator::HeightForAge)
            }
            "WEIGHT_FOR_HEIGHT" | "WEIGHT_FOR_LENGTH" | "WFH" | "WFL" | "BB/TB" | "BB/PB" => {
                Ok(Indicator::WeightForHeight)
            }
            _ => Err(ModelError::InvalidIndicator(s.to_string())),
        }
    }
}

/// Unit of the index column of a reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexUnit {
    /// Age in completed days.
    Days,
    /// Length or height in tenths of a centimetre.
    TenthCm,
}

/// One of the published WHO LMS tables (per sex).
///
/// Weight-for-height is split in two because WHO publishes separate
/// recumbent-length (0-24 months) and standing-height (24-60 months) tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    WeightForAge,
    LengthHeightForAge,
    WeightForLength,
    WeightForHeight,
}

impl TableKind {
    pub const ALL: [TableKind; 4] = [
        TableKind::WeightForAge,
        TableKind::LengthHeightForAge,
        TableKind::WeightForLength,
        TableKind::WeightForHeight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::WeightForAge => "weight_for_age",
            TableKind::LengthHeightForAge => "length_height_for_age",
            TableKind::WeightForLength => "weight_for_length",
            TableKind::WeightForHeight => "weight_for_height",
        }
    }

    pub fn index_unit(&self) -> IndexUnit {
        match self {
            TableKind::WeightForAge | TableKind::LengthHeightForAge => IndexUnit::Days,
            TableKind::WeightForLength | TableKind::WeightForHeight => IndexUnit::TenthCm,
        }
    }

    /// Indicator this table scores.
    pub fn indicator(&self) -> Indicator {
        match self {
            TableKind::WeightForAge => Indicator::WeightForAge,
            TableKind::LengthHeightForAge => Indicator::HeightForAge,
            TableKind::WeightForLength | TableKind::WeightForHeight => Indicator::WeightForHeight,
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TableKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "weight_for_age" | "wfa" => Ok(TableKind::WeightForAge),
            "length_height_for_age" | "lhfa" => Ok(TableKind::LengthHeightForAge),
            "weight_for_length" | "wfl" => Ok(TableKind::WeightForLength),
            "weight_for_height" | "wfh" => Ok(TableKind::WeightForHeight),
            _ => Err(ModelError::InvalidTableKind(s.to_string())),
        }
    }
}
