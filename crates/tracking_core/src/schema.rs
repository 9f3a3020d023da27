//! # Input Schema
//!
//! Typed records for the two tracking documents plus the key table shared by
//! the loader and the builders.
//!
//! Every field is optional: a missing key (or an explicit `null`) becomes
//! `None` / empty and flows through the model as such.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// JSON keys and fixed names used across the documents.
pub mod keys {
    pub const MATCH_DATA: &str = "match_data.json";
    pub const STRUCTURED_DATA: &str = "structured_data.json";

    pub const HOME_TEAM: &str = "home_team";
    pub const AWAY_TEAM: &str = "away_team";
    pub const PITCH_LENGTH: &str = "pitch_length";
    pub const PITCH_WIDTH: &str = "pitch_width";
    pub const BALL: &str = "ball";
    pub const REFEREES: &str = "referees";
    pub const PLAYERS: &str = "players";
    pub const TRACKABLE_OBJECT: &str = "trackable_object";
    pub const TRACK_ID: &str = "track_id";

    pub const LAST_NAME: &str = "last_name";
    pub const TEAM_ID: &str = "team_id";
    pub const NUMBER: &str = "number";
    pub const PLAYER_ROLE: &str = "player_role";

    pub const FRAME: &str = "frame";
    pub const TIME: &str = "time";
    pub const PERIOD: &str = "period";
    pub const DATA: &str = "data";
    pub const POSSESSION: &str = "possession";
    pub const GROUP: &str = "group";

    /// Display name registered for the ball.
    pub const BALL_NAME: &str = "ball";
    /// Display name registered for the referee.
    pub const REFEREE_NAME: &str = "referee";
}

/// Treat an explicit `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TeamRecord {
    pub acronym: Option<String>,
    pub id: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrackableRecord {
    pub trackable_object: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerRoleRecord {
    pub acronym: Option<String>,
    pub id: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerRecord {
    pub last_name: Option<String>,
    pub trackable_object: Option<u32>,
    pub team_id: Option<u32>,
    pub number: Option<u32>,
    pub player_role: Option<PlayerRoleRecord>,
}

/// Match metadata document (`match_data.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MatchRecord {
    pub home_team: Option<TeamRecord>,
    pub away_team: Option<TeamRecord>,
    pub pitch_length: Option<f64>,
    pub pitch_width: Option<f64>,
    pub ball: Option<TrackableRecord>,
    #[serde(deserialize_with = "null_as_default")]
    pub referees: Vec<TrackableRecord>,
    #[serde(deserialize_with = "null_as_default")]
    pub players: Vec<PlayerRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LocationRecord {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub trackable_object: Option<u32>,
    pub track_id: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PossessionRecord {
    pub trackable_object: Option<u32>,
    pub group: Option<String>,
}

/// Frame timestamp: providers ship either elapsed seconds or a clock string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Timestamp {
    Seconds(f64),
    Clock(String),
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Timestamp::Seconds(s) => write!(f, "{}", s),
            Timestamp::Clock(c) => f.write_str(c),
        }
    }
}

/// One record of the structured-data document (`structured_data.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FrameRecord {
    pub frame: Option<u64>,
    pub time: Option<Timestamp>,
    pub period: Option<u8>,
    #[serde(deserialize_with = "null_as_default")]
    pub data: Vec<LocationRecord>,
    pub possession: Option<PossessionRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_match_record_keys_match_table() {
        let value = serde_json::to_value(MatchRecord::default()).unwrap();
        let obj = value.as_object().unwrap();
        for key in [
            keys::HOME_TEAM,
            keys::AWAY_TEAM,
            keys::PITCH_LENGTH,
            keys::PITCH_WIDTH,
            keys::BALL,
            keys::REFEREES,
            keys::PLAYERS,
        ] {
            assert!(obj.contains_key(key), "missing key {}", key);
        }

        let player = serde_json::to_value(PlayerRecord::default()).unwrap();
        for key in [
            keys::LAST_NAME,
            keys::TRACKABLE_OBJECT,
            keys::TEAM_ID,
            keys::NUMBER,
            keys::PLAYER_ROLE,
        ] {
            assert!(player.get(key).is_some(), "missing player key {}", key);
        }
    }

    #[test]
    fn test_frame_record_keys_match_table() {
        let value = serde_json::to_value(FrameRecord::default()).unwrap();
        for key in [
            keys::FRAME,
            keys::TIME,
            keys::PERIOD,
            keys::DATA,
            keys::POSSESSION,
        ] {
            assert!(value.get(key).is_some(), "missing frame key {}", key);
        }
        let location = serde_json::to_value(LocationRecord::default()).unwrap();
        assert!(location.get(keys::TRACK_ID).is_some());
        let possession = serde_json::to_value(PossessionRecord::default()).unwrap();
        assert!(possession.get(keys::GROUP).is_some());
    }

    #[test]
    fn test_missing_fields_become_none() {
        let record: FrameRecord = serde_json::from_value(json!({ "frame": 7 })).unwrap();
        assert_eq!(record.frame, Some(7));
        assert!(record.time.is_none());
        assert!(record.period.is_none());
        assert!(record.data.is_empty());
        assert!(record.possession.is_none());
    }

    #[test]
    fn test_explicit_nulls_are_tolerated() {
        let record: MatchRecord = serde_json::from_value(json!({
            "home_team": null,
            "referees": null,
            "players": null,
            "pitch_length": 105
        }))
        .unwrap();
        assert!(record.home_team.is_none());
        assert!(record.referees.is_empty());
        assert!(record.players.is_empty());
        assert_eq!(record.pitch_length, Some(105.0));
    }

    #[test]
    fn test_timestamp_accepts_seconds_and_clock() {
        let secs: FrameRecord = serde_json::from_value(json!({ "time": 12.5 })).unwrap();
        assert_eq!(secs.time, Some(Timestamp::Seconds(12.5)));
        assert_eq!(secs.time.unwrap().to_string(), "12.5");

        let clock: FrameRecord = serde_json::from_value(json!({ "time": "00:01.40" })).unwrap();
        assert_eq!(clock.time.unwrap().to_string(), "00:01.40");
    }
}
