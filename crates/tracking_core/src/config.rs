//! # Analysis Configuration
//!
//! Document names, possession group labels and rounding precision.
//!
//! ```rust
//! use tracking_core::config::AnalysisConfig;
//!
//! let config = AnalysisConfig::default();
//! assert_eq!(config.home_group, "home team");
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, TrackingError};
use crate::frame::SECOND_HALF;
use crate::schema::keys;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Match metadata file name inside the data directory
    pub match_data_file: String,
    /// Structured (frame-by-frame) data file name inside the data directory
    pub structured_data_file: String,
    /// Possession group label credited to the home team
    pub home_group: String,
    /// Possession group label credited to the away team
    pub away_group: String,
    /// Period whose y axis is mirrored so both halves attack the same way
    pub mirrored_period: u8,
    /// Decimal places for team possession shares
    pub team_share_decimals: u32,
    /// Decimal places for player possession shares
    pub player_share_decimals: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            match_data_file: keys::MATCH_DATA.to_string(),
            structured_data_file: keys::STRUCTURED_DATA.to_string(),
            home_group: "home team".to_string(),
            away_group: "away team".to_string(),
            mirrored_period: SECOND_HALF,
            team_share_decimals: 3,
            player_share_decimals: 2,
        }
    }
}

impl AnalysisConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|source| TrackingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }
}
