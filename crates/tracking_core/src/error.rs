use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackingError {
    /// A player's declared team matches neither the home nor the away team.
    #[error(
        "Player {player_id:?} has team id {team_id:?}, expected one of {{{home_team_id:?}, {away_team_id:?}}}"
    )]
    IdMismatch {
        player_id: Option<u32>,
        team_id: Option<u32>,
        home_team_id: Option<u32>,
        away_team_id: Option<u32>,
    },

    /// Two registry entries claim the same trackable object id.
    #[error("Trackable object {id} registered twice ('{existing}' and '{incoming}')")]
    DuplicateParticipant {
        id: u32,
        existing: String,
        incoming: String,
    },

    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Document '{document}' does not match the expected layout: {source}")]
    InvalidDocument {
        document: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl TrackingError {
    /// Errors raised while validating the roster, as opposed to reading input.
    pub fn is_registry_error(&self) -> bool {
        matches!(
            self,
            TrackingError::IdMismatch { .. } | TrackingError::DuplicateParticipant { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TrackingError>;
