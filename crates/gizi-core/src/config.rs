//! Engine configuration loaded from TOML.
//!
//! ```toml
//! standards_dir = "/srv/gizi/standards"
//!
//! [trend]
//! min_interval_days = 7
//! max_cycle_gap_months = 1
//! ```
//!
//! Every key is optional; omitted keys take their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::trend::TrendPolicy;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Reference data directory. Falls back to `GIZI_STANDARDS_DIR`, then
    /// the bundled `standards/` directory.
    pub standards_dir: Option<PathBuf>,
    pub trend: TrendPolicy,
}

impl EngineConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(contents)?;
        config.trend.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Reference directory to load, honouring the config override first.
    pub fn resolve_standards_dir(&self) -> PathBuf {
        self.standards_dir
            .clone()
            .unwrap_or_else(gizi_standards::standards_root)
    }
}
