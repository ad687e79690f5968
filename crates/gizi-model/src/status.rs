//! Categorical nutrition outcomes.
//!
//! Labels follow Permenkes 2/2020 (Standar Antropometri Anak).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::enums::Indicator;

/// Coarse grouping used by prevalence reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusBand {
    Severe,
    Moderate,
    Normal,
    Above,
}

/// BB/U classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightForAgeStatus {
    SeverelyUnderweight,
    Underweight,
    Normal,
    Overweight,
}

impl WeightForAgeStatus {
    pub const ALL: [WeightForAgeStatus; 4] = [
        WeightForAgeStatus::SeverelyUnderweight,
        WeightForAgeStatus::Underweight,
        WeightForAgeStatus::Normal,
        WeightForAgeStatus::Overweight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeightForAgeStatus::SeverelyUnderweight => "severely_underweight",
            WeightForAgeStatus::Underweight => "underweight",
            WeightForAgeStatus::Normal => "normal",
            WeightForAgeStatus::Overweight => "overweight",
        }
    }

    pub fn label_id(&self) -> &'static str {
        match self {
            WeightForAgeStatus::SeverelyUnderweight => "Berat badan sangat kurang",
            WeightForAgeStatus::Underweight => "Berat badan kurang",
            WeightForAgeStatus::Normal => "Berat badan normal",
            WeightForAgeStatus::Overweight => "Risiko berat badan lebih",
        }
    }

    pub fn band(&self) -> StatusBand {
        match self {
            WeightForAgeStatus::SeverelyUnderweight => StatusBand::Severe,
            WeightForAgeStatus::Underweight => StatusBand::Moderate,
            WeightForAgeStatus::Normal => StatusBand::Normal,
            WeightForAgeStatus::Overweight => StatusBand::Above,
        }
    }
}

/// TB/U classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeightForAgeStatus {
    SeverelyStunted,
    Stunted,
    Normal,
    Tall,
}

impl HeightForAgeStatus {
    pub const ALL: [HeightForAgeStatus; 4] = [
        HeightForAgeStatus::SeverelyStunted,
        HeightForAgeStatus::Stunted,
        HeightForAgeStatus::Normal,
        HeightForAgeStatus::Tall,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HeightForAgeStatus::SeverelyStunted => "severely_stunted",
            HeightForAgeStatus::Stunted => "stunted",
            HeightForAgeStatus::Normal => "normal",
            HeightForAgeStatus::Tall => "tall",
        }
    }

    pub fn label_id(&self) -> &'static str {
        match self {
            HeightForAgeStatus::SeverelyStunted => "Sangat pendek",
            HeightForAgeStatus::Stunted => "Pendek",
            HeightForAgeStatus::Normal => "Normal",
            HeightForAgeStatus::Tall => "Tinggi",
        }
    }

    pub fn band(&self) -> StatusBand {
        match self {
            HeightForAgeStatus::SeverelyStunted => StatusBand::Severe,
            HeightForAgeStatus::Stunted => StatusBand::Moderate,
            HeightForAgeStatus::Normal => StatusBand::Normal,
            HeightForAgeStatus::Tall => StatusBand::Above,
        }
    }
}

/// BB/TB classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightForHeightStatus {
    SeverelyWasted,
    Wasted,
    Normal,
    Overweight,
    Obese,
}

impl WeightForHeightStatus {
    pub const ALL: [WeightForHeightStatus; 5] = [
        WeightForHeightStatus::SeverelyWasted,
        WeightForHeightStatus::Wasted,
        WeightForHeightStatus::Normal,
        WeightForHeightStatus::Overweight,
        WeightForHeightStatus::Obese,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeightForHeightStatus::SeverelyWasted => "severely_wasted",
            WeightForHeightStatus::Wasted => "wasted",
            WeightForHeightStatus::Normal => "normal",
            WeightForHeightStatus::Overweight => "overweight",
            WeightForHeightStatus::Obese => "obese",
        }
    }

    pub fn label_id(&self) -> &'static str {
        match self {
            WeightForHeightStatus::SeverelyWasted => "Gizi buruk",
            WeightForHeightStatus::Wasted => "Gizi kurang",
            WeightForHeightStatus::Normal => "Gizi baik",
            WeightForHeightStatus::Overweight => "Berisiko gizi lebih",
            WeightForHeightStatus::Obese => "Gizi lebih",
        }
    }

    pub fn band(&self) -> StatusBand {
        match self {
            WeightForHeightStatus::SeverelyWasted => StatusBand::Severe,
            WeightForHeightStatus::Wasted => StatusBand::Moderate,
            WeightForHeightStatus::Normal => StatusBand::Normal,
            WeightForHeightStatus::Overweight | WeightForHeightStatus::Obese => StatusBand::Above,
        }
    }
}

/// A classification for any indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "indicator", content = "status", rename_all = "snake_case")]
pub enum NutritionStatus {
    WeightForAge(WeightForAgeStatus),
    HeightForAge(HeightForAgeStatus),
    WeightForHeight(WeightForHeightStatus),
}

impl NutritionStatus {
    pub fn indicator(&self) -> Indicator {
        match self {
            NutritionStatus::WeightForAge(_) => Indicator::WeightForAge,
            NutritionStatus::HeightForAge(_) => Indicator::HeightForAge,
            NutritionStatus::WeightForHeight(_) => Indicator::WeightForHeight,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NutritionStatus::WeightForAge(s) => s.as_str(),
            NutritionStatus::HeightForAge(s) => s.as_str(),
            NutritionStatus::WeightForHeight(s) => s.as_str(),
        }
    }

    pub fn label_id(&self) -> &'static str {
        match self {
            NutritionStatus::WeightForAge(s) => s.label_id(),
            NutritionStatus::HeightForAge(s) => s.label_id(),
            NutritionStatus::WeightForHeight(s) => s.label_id(),
        }
    }

    pub fn band(&self) -> StatusBand {
        match self {
            NutritionStatus::WeightForAge(s) => s.band(),
            NutritionStatus::HeightForAge(s) => s.band(),
            NutritionStatus::WeightForHeight(s) => s.band(),
        }
    }
}

impl fmt::Display for NutritionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.indicator(), self.as_str())
    }
}

/// Month-over-month weight gain outcome (status naik).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GrowthTrend {
    /// N: gained at least the KBM for the age band.
    #[serde(rename = "N")]
    AdequateGain,
    /// T: gained less than the KBM, or lost weight.
    #[serde(rename = "T")]
    InadequateGain,
    /// O: no usable prior weighing in the monitoring cycle.
    #[serde(rename = "O")]
    Indeterminate,
}

impl GrowthTrend {
    pub fn code(&self) -> &'static str {
        match self {
            GrowthTrend::AdequateGain => "N",
            GrowthTrend::InadequateGain => "T",
            GrowthTrend::Indeterminate => "O",
        }
    }

    pub fn label_id(&self) -> &'static str {
        match self {
            GrowthTrend::AdequateGain => "Naik",
            GrowthTrend::InadequateGain => "Tidak naik",
            GrowthTrend::Indeterminate => "Baru / tidak ditimbang bulan lalu",
        }
    }
}

impl fmt::Display for GrowthTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
