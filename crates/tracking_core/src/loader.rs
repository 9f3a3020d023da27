//! # Document Loading
//!
//! The two input documents are read through a [`DocumentLoader`] so callers
//! can swap the filesystem for an in-memory source.

use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::AnalysisConfig;
use crate::error::{Result, TrackingError};
use crate::match_model::Match;
use crate::schema::{FrameRecord, MatchRecord};

pub trait DocumentLoader {
    fn load_json(&self, path: &Path) -> Result<serde_json::Value>;
}

/// Reads documents from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLoader;

impl DocumentLoader for FsLoader {
    fn load_json(&self, path: &Path) -> Result<serde_json::Value> {
        let data = fs::read(path).map_err(|source| TrackingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded {} bytes from {:?}", data.len(), path);

        serde_json::from_slice(&data).map_err(|source| TrackingError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn decode<T: DeserializeOwned>(value: serde_json::Value, document: &str) -> Result<T> {
    serde_json::from_value(value).map_err(|source| TrackingError::InvalidDocument {
        document: document.to_string(),
        source,
    })
}

/// Paths of the metadata and structured-data documents inside `data_dir`.
pub fn document_paths(data_dir: &Path, config: &AnalysisConfig) -> (PathBuf, PathBuf) {
    (
        data_dir.join(&config.match_data_file),
        data_dir.join(&config.structured_data_file),
    )
}

/// Load and build a match. The registry is validated before the (large)
/// structured-data document is read.
pub fn load_match<L: DocumentLoader + ?Sized>(
    data_dir: &Path,
    config: &AnalysisConfig,
    loader: &L,
) -> Result<Match> {
    let (match_path, structured_path) = document_paths(data_dir, config);

    let metadata: MatchRecord = decode(loader.load_json(&match_path)?, &config.match_data_file)?;
    let builder = Match::builder(&metadata)?.mirrored_period(config.mirrored_period);

    let frames: Vec<FrameRecord> = decode(
        loader.load_json(&structured_path)?,
        &config.structured_data_file,
    )?;
    let m = builder.attach_frames(frames);

    log::info!(
        "Loaded {} from {:?}: {} players, {} frames",
        m,
        data_dir,
        m.all_players().count(),
        m.frames().len()
    );
    Ok(m)
}
