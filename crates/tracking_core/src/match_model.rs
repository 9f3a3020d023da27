//! # Match Model
//!
//! Registry plus the ordered frame sequence as one read-only unit.
//!
//! Construction is two-phase: [`MatchBuilder::new`] validates the roster
//! before any frame is touched, [`MatchBuilder::attach_frames`] then keeps
//! the frames in source order (no sorting, no deduplication).

use rustc_hash::FxHashMap;
use std::fmt;

use crate::error::Result;
use crate::frame::{Frame, SECOND_HALF};
use crate::registry::{NameLookup, PitchGeometry, Player, Registry, Side, Team};
use crate::schema::{FrameRecord, MatchRecord};

/// Phase one of match construction: a validated registry awaiting frames.
#[derive(Debug)]
pub struct MatchBuilder {
    registry: Registry,
    mirrored_period: u8,
}

impl MatchBuilder {
    pub fn new(metadata: &MatchRecord) -> Result<Self> {
        Ok(Self {
            registry: Registry::from_metadata(metadata)?,
            mirrored_period: SECOND_HALF,
        })
    }

    pub fn mirrored_period(mut self, period: u8) -> Self {
        self.mirrored_period = period;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Phase two: attach frames verbatim in source order.
    pub fn attach_frames<I>(self, records: I) -> Match
    where
        I: IntoIterator<Item = FrameRecord>,
    {
        let mirrored_period = self.mirrored_period;
        let frames: Vec<Frame> = records
            .into_iter()
            .map(|r| Frame::from_record(r, mirrored_period))
            .collect();

        log::debug!("Attached {} frames", frames.len());

        Match {
            registry: self.registry,
            frames,
        }
    }
}

/// A fully loaded match. Immutable after construction.
#[derive(Debug, Clone)]
pub struct Match {
    registry: Registry,
    frames: Vec<Frame>,
}

impl Match {
    pub fn builder(metadata: &MatchRecord) -> Result<MatchBuilder> {
        MatchBuilder::new(metadata)
    }

    /// Build both phases with the default second-half mirror.
    pub fn from_records(metadata: &MatchRecord, frames: Vec<FrameRecord>) -> Result<Self> {
        Ok(Self::builder(metadata)?.attach_frames(frames))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn home_team(&self) -> &Team {
        self.registry.home_team()
    }

    pub fn away_team(&self) -> &Team {
        self.registry.away_team()
    }

    pub fn team_id(&self, name: &str) -> Option<u32> {
        self.registry.team_id(name)
    }

    pub fn team_name(&self, id: u32) -> Option<&str> {
        self.registry.team_name(id)
    }

    pub fn pitch(&self) -> PitchGeometry {
        self.registry.pitch()
    }

    pub fn ball_id(&self) -> Option<u32> {
        self.registry.ball_id()
    }

    pub fn referee_id(&self) -> Option<u32> {
        self.registry.referee_id()
    }

    pub fn home_players(&self) -> &[Player] {
        self.registry.players(Side::Home)
    }

    pub fn away_players(&self) -> &[Player] {
        self.registry.players(Side::Away)
    }

    pub fn all_players(&self) -> impl Iterator<Item = &Player> {
        self.registry.all_players()
    }

    pub fn lookup(&self) -> &NameLookup {
        self.registry.lookup()
    }

    pub fn id_to_name(&self) -> &FxHashMap<u32, String> {
        self.registry.lookup().id_to_name()
    }

    pub fn name_to_id(&self) -> &FxHashMap<String, u32> {
        self.registry.lookup().name_to_id()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} v. {}",
            self.home_team().display_name(),
            self.away_team().display_name()
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::TrackingError;
    use crate::registry::tests::sample_metadata;
    use serde_json::json;

    pub(crate) fn sample_frames() -> Vec<FrameRecord> {
        serde_json::from_value(json!([
            { "frame": 1, "time": "00:00.10", "period": 1,
              "data": [{ "x": 0.0, "y": 1.0, "trackable_object": 55 },
                       { "x": 3.0, "y": 4.0, "trackable_object": 10 }],
              "possession": { "trackable_object": 10, "group": "home team" } },
            { "frame": 2, "time": "00:00.20", "period": 1,
              "data": [{ "x": 0.5, "y": 1.0, "trackable_object": 55 }],
              "possession": { "trackable_object": 11, "group": "home team" } },
            { "frame": 3, "time": "00:00.30", "period": 1,
              "data": [],
              "possession": { "trackable_object": null, "group": null } },
            { "frame": 4, "time": "45:00.00", "period": 2,
              "data": [{ "x": 9.0, "y": 2.0, "trackable_object": 20 }],
              "possession": { "trackable_object": 20, "group": "away team" } }
        ]))
        .unwrap()
    }

    #[test]
    fn test_match_exposes_registry_and_frames() {
        let m = Match::from_records(&sample_metadata(), sample_frames()).unwrap();

        assert_eq!(m.to_string(), "HOM v. AWY");
        assert_eq!(m.team_id("AWY"), Some(2));
        assert_eq!(m.team_name(1), Some("HOM"));
        assert_eq!(m.ball_id(), Some(55));
        assert_eq!(m.referee_id(), Some(77));
        assert_eq!(m.pitch().width, Some(68.0));
        assert_eq!(m.home_players().len(), 2);
        assert_eq!(m.away_players().len(), 1);
        assert_eq!(m.all_players().count(), 3);
        assert_eq!(m.id_to_name().get(&20).map(String::as_str), Some("Vieira"));
        assert_eq!(m.name_to_id().get("ball"), Some(&55));
        assert_eq!(m.frames().len(), 4);
        assert_eq!(m.frames()[3].location_of(20).unwrap().normalized_y, Some(-2.0));
    }

    #[test]
    fn test_frames_keep_source_order() {
        let mut frames = sample_frames();
        frames.reverse();
        let first = frames[0].clone();
        frames.push(first);

        let m = Match::from_records(&sample_metadata(), frames).unwrap();
        let order: Vec<_> = m.frames().iter().map(|f| f.index).collect();
        assert_eq!(order, vec![Some(4), Some(3), Some(2), Some(1), Some(4)]);
    }

    #[test]
    fn test_registry_fails_before_frames_are_attached() {
        let mut metadata = sample_metadata();
        metadata.players[0].team_id = None;

        let err = Match::builder(&metadata).unwrap_err();
        assert!(matches!(err, TrackingError::IdMismatch { .. }));
    }

    #[test]
    fn test_custom_mirrored_period() {
        let m = Match::builder(&sample_metadata())
            .unwrap()
            .mirrored_period(1)
            .attach_frames(sample_frames());

        let first = &m.frames()[0];
        assert_eq!(first.location_of(10).unwrap().normalized_y, Some(-4.0));
        assert_eq!(m.frames()[3].location_of(20).unwrap().normalized_y, Some(2.0));
    }
}
