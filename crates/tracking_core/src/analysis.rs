//! # Analysis
//!
//! Entry point tying a loaded [`Match`] to the statistics, possession strings
//! and coordinate export. Read-only once built.

use std::fmt;
use std::path::Path;

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::export::{CoordinateTable, TableSink};
use crate::loader::{load_match, DocumentLoader, FsLoader};
use crate::match_model::Match;
use crate::possession::{segment_possession, PossessionString};
use crate::stats::{player_possession_share, team_possession_share, PlayerPossession, TeamPossession};

#[derive(Debug, Clone)]
pub struct Analysis {
    config: AnalysisConfig,
    m: Match,
}

impl Analysis {
    pub fn new(m: Match, config: AnalysisConfig) -> Self {
        Self { config, m }
    }

    /// Load both documents from `data_dir` with the default configuration.
    pub fn from_dir(data_dir: &Path) -> Result<Self> {
        Self::load(data_dir, AnalysisConfig::default(), &FsLoader)
    }

    pub fn load<L: DocumentLoader + ?Sized>(
        data_dir: &Path,
        config: AnalysisConfig,
        loader: &L,
    ) -> Result<Self> {
        let m = load_match(data_dir, &config, loader)?;
        Ok(Self::new(m, config))
    }

    pub fn match_model(&self) -> &Match {
        &self.m
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// `None` when no frame carries the home or away label.
    pub fn team_possession_stats(&self) -> Option<TeamPossession> {
        team_possession_share(&self.m, &self.config)
    }

    pub fn player_possession_stats(&self) -> Vec<PlayerPossession> {
        player_possession_share(&self.m, &self.config)
    }

    pub fn possession_strings(&self) -> Vec<PossessionString<'_>> {
        segment_possession(self.m.frames(), self.m.lookup())
    }

    pub fn location_table(&self) -> CoordinateTable {
        CoordinateTable::from_frames(self.m.frames())
    }

    pub fn export_locations<S: TableSink>(&self, sink: &mut S) -> std::result::Result<(), S::Error> {
        sink.write_table(&self.location_table())
    }
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Analysis of {}", self.m)
    }
}
