//! # tracking_core - Football Tracking Data Model
//!
//! Turns a match metadata document and a frame-by-frame tracking document
//! into a read-only match model, and derives possession statistics from it.
//!
//! ## Features
//! - Identity registry: trackable object ids -> player / ball / referee, team, name
//! - Frames with second-half y normalization
//! - Possession strings (maximal runs of one possession group)
//! - Team and player possession shares
//! - Coordinate table export through a pluggable sink

pub mod analysis;
pub mod config;
pub mod error;
pub mod export;
pub mod frame;
pub mod loader;
pub mod match_model;
pub mod possession;
pub mod registry;
pub mod schema;
pub mod stats;

pub use analysis::Analysis;
pub use config::AnalysisConfig;
pub use error::{Result, TrackingError};
pub use export::{CoordinateRow, CoordinateTable, TableSink};
pub use frame::{normalize_y, Coordinate, Frame, Location, Possession};
pub use loader::{load_match, DocumentLoader, FsLoader};
pub use match_model::{Match, MatchBuilder};
pub use possession::{segment_possession, PossessionString};
pub use registry::{NameLookup, Participant, PitchGeometry, Player, Registry, Side, Team};
pub use stats::{
    player_possession_share, team_possession_share, PlayerPossession, TeamPossession,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
