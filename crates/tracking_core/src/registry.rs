//! # Identity Registry
//!
//! Resolves trackable object ids to roles (player, ball, referee), team
//! membership and display names. Built once from the match metadata document.
//!
//! ## Invariants
//! - every player belongs to the home or the away team, otherwise
//!   construction fails with [`TrackingError::IdMismatch`]
//! - `id -> name` and `name -> id` are exact inverses over players, ball and
//!   referee

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, TrackingError};
use crate::schema::{keys, MatchRecord, PlayerRecord, TeamRecord};

/// Which side of the match a team or player is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Team acronym
    pub name: Option<String>,
    pub id: Option<u32>,
}

impl Team {
    fn from_record(record: Option<&TeamRecord>) -> Self {
        match record {
            Some(r) => Self {
                name: r.acronym.clone(),
                id: r.id,
            },
            None => Self::default(),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("None")
    }
}

/// Pitch dimensions in meters, descriptive only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PitchGeometry {
    pub length: Option<f64>,
    pub width: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub last_name: Option<String>,
    /// Trackable object id
    pub id: Option<u32>,
    pub team_id: Option<u32>,
    /// Jersey number
    pub number: Option<u32>,
    /// Position acronym (e.g. "CF")
    pub position: Option<String>,
    pub position_id: Option<u32>,
}

impl Player {
    pub fn from_record(record: &PlayerRecord) -> Self {
        let (position, position_id) = match &record.player_role {
            Some(role) => (role.acronym.clone(), role.id),
            None => (None, None),
        };
        Self {
            last_name: record.last_name.clone(),
            id: record.trackable_object,
            team_id: record.team_id,
            number: record.number,
            position,
            position_id,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = self.last_name.as_deref().unwrap_or("None");
        match self.id {
            Some(id) => write!(f, "{} ({})", name, id),
            None => write!(f, "{} (None)", name),
        }
    }
}

/// Role a trackable object plays in the match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Participant<'a> {
    Player(&'a Player, Side),
    Ball,
    Referee,
}

/// Bidirectional id <-> display name lookup.
#[derive(Debug, Clone, Default)]
pub struct NameLookup {
    id_to_name: FxHashMap<u32, String>,
    name_to_id: FxHashMap<String, u32>,
}

impl NameLookup {
    /// Register `id` under `name`. A name already taken by another id is
    /// suffixed with the id (then a counter, if that is taken too) so both
    /// maps stay inverse to each other.
    fn insert(&mut self, id: u32, name: &str) -> Result<()> {
        if let Some(existing) = self.id_to_name.get(&id) {
            return Err(TrackingError::DuplicateParticipant {
                id,
                existing: existing.clone(),
                incoming: name.to_string(),
            });
        }

        let mut display = name.to_string();
        let mut attempt = 1u32;
        while self.name_to_id.contains_key(&display) {
            display = match attempt {
                1 => format!("{} ({})", name, id),
                n => format!("{} ({}, {})", name, id, n),
            };
            attempt += 1;
        }
        if display != name {
            log::debug!("Display name '{}' taken, registering {} as '{}'", name, id, display);
        }

        self.name_to_id.insert(display.clone(), id);
        self.id_to_name.insert(id, display);
        Ok(())
    }

    pub fn name(&self, id: u32) -> Option<&str> {
        self.id_to_name.get(&id).map(String::as_str)
    }

    pub fn id(&self, name: &str) -> Option<u32> {
        self.name_to_id.get(name).copied()
    }

    /// Display name for `id`, falling back to `#<id>` for unknown objects.
    pub fn name_or_id(&self, id: u32) -> String {
        match self.name(id) {
            Some(name) => name.to_string(),
            None => format!("#{}", id),
        }
    }

    pub fn len(&self) -> usize {
        self.id_to_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_name.is_empty()
    }

    pub fn id_to_name(&self) -> &FxHashMap<u32, String> {
        &self.id_to_name
    }

    pub fn name_to_id(&self) -> &FxHashMap<String, u32> {
        &self.name_to_id
    }
}

/// Identity registry built from the match metadata document.
#[derive(Debug, Clone)]
pub struct Registry {
    home_team: Team,
    away_team: Team,
    team_to_id: FxHashMap<String, u32>,
    id_to_team: FxHashMap<u32, String>,
    pitch: PitchGeometry,
    ball_id: Option<u32>,
    referee_id: Option<u32>,
    home_players: Vec<Player>,
    away_players: Vec<Player>,
    lookup: NameLookup,
}

impl Registry {
    /// Build the registry, validating every player's team membership.
    pub fn from_metadata(record: &MatchRecord) -> Result<Self> {
        let home_team = Team::from_record(record.home_team.as_ref());
        let away_team = Team::from_record(record.away_team.as_ref());

        let mut team_to_id = FxHashMap::default();
        let mut id_to_team = FxHashMap::default();
        for team in [&home_team, &away_team] {
            if let (Some(name), Some(id)) = (&team.name, team.id) {
                team_to_id.insert(name.clone(), id);
                id_to_team.insert(id, name.clone());
            }
        }

        let pitch = PitchGeometry {
            length: record.pitch_length,
            width: record.pitch_width,
        };
        let ball_id = record.ball.as_ref().and_then(|b| b.trackable_object);
        let referee_id = record.referees.first().and_then(|r| r.trackable_object);
        if record.referees.is_empty() {
            log::warn!("Match metadata lists no {}", keys::REFEREES);
        }

        let mut home_players = Vec::new();
        let mut away_players = Vec::new();
        for player_record in &record.players {
            let player = Player::from_record(player_record);
            if player.team_id == home_team.id {
                home_players.push(player);
            } else if player.team_id == away_team.id {
                away_players.push(player);
            } else {
                return Err(TrackingError::IdMismatch {
                    player_id: player.id,
                    team_id: player.team_id,
                    home_team_id: home_team.id,
                    away_team_id: away_team.id,
                });
            }
        }

        let mut lookup = NameLookup::default();
        for player in home_players.iter().chain(away_players.iter()) {
            let Some(id) = player.id else {
                log::warn!("Player {} has no {}, left out of lookups", player, keys::TRACKABLE_OBJECT);
                continue;
            };
            match &player.last_name {
                Some(name) => lookup.insert(id, name)?,
                None => lookup.insert(id, &format!("#{}", id))?,
            }
        }
        if let Some(id) = ball_id {
            lookup.insert(id, keys::BALL_NAME)?;
        }
        if let Some(id) = referee_id {
            lookup.insert(id, keys::REFEREE_NAME)?;
        }

        log::debug!(
            "Registry built: {} home players, {} away players, {} named objects",
            home_players.len(),
            away_players.len(),
            lookup.len()
        );

        Ok(Self {
            home_team,
            away_team,
            team_to_id,
            id_to_team,
            pitch,
            ball_id,
            referee_id,
            home_players,
            away_players,
            lookup,
        })
    }

    pub fn home_team(&self) -> &Team {
        &self.home_team
    }

    pub fn away_team(&self) -> &Team {
        &self.away_team
    }

    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::Home => &self.home_team,
            Side::Away => &self.away_team,
        }
    }

    pub fn team_id(&self, name: &str) -> Option<u32> {
        self.team_to_id.get(name).copied()
    }

    pub fn team_name(&self, id: u32) -> Option<&str> {
        self.id_to_team.get(&id).map(String::as_str)
    }

    pub fn pitch(&self) -> PitchGeometry {
        self.pitch
    }

    pub fn ball_id(&self) -> Option<u32> {
        self.ball_id
    }

    pub fn referee_id(&self) -> Option<u32> {
        self.referee_id
    }

    pub fn players(&self, side: Side) -> &[Player] {
        match side {
            Side::Home => &self.home_players,
            Side::Away => &self.away_players,
        }
    }

    /// Home players followed by away players.
    pub fn all_players(&self) -> impl Iterator<Item = &Player> {
        self.home_players.iter().chain(self.away_players.iter())
    }

    pub fn lookup(&self) -> &NameLookup {
        &self.lookup
    }

    /// Resolve a trackable object id to its role.
    pub fn participant(&self, id: u32) -> Option<Participant<'_>> {
        if self.ball_id == Some(id) {
            return Some(Participant::Ball);
        }
        if self.referee_id == Some(id) {
            return Some(Participant::Referee);
        }
        for side in [Side::Home, Side::Away] {
            if let Some(p) = self.players(side).iter().find(|p| p.id == Some(id)) {
                return Some(Participant::Player(p, side));
            }
        }
        None
    }

    /// Team a trackable object plays for; `None` for ball, referee and unknown ids.
    pub fn team_of(&self, id: u32) -> Option<&Team> {
        match self.participant(id)? {
            Participant::Player(_, side) => Some(self.team(side)),
            Participant::Ball | Participant::Referee => None,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    pub(crate) fn sample_metadata() -> MatchRecord {
        serde_json::from_value(json!({
            "home_team": { "acronym": "HOM", "id": 1 },
            "away_team": { "acronym": "AWY", "id": 2 },
            "pitch_length": 105,
            "pitch_width": 68,
            "ball": { "trackable_object": 55 },
            "referees": [{ "trackable_object": 77 }, { "trackable_object": 78 }],
            "players": [
                { "last_name": "Keane", "trackable_object": 10, "team_id": 1, "number": 16,
                  "player_role": { "acronym": "CM", "id": 9 } },
                { "last_name": "Scholes", "trackable_object": 11, "team_id": 1, "number": 18 },
                { "last_name": "Vieira", "trackable_object": 20, "team_id": 2, "number": 4,
                  "player_role": { "acronym": "DM", "id": 8 } }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_registry_partitions_roster() {
        let registry = Registry::from_metadata(&sample_metadata()).unwrap();

        assert_eq!(registry.home_team().name.as_deref(), Some("HOM"));
        assert_eq!(registry.away_team().id, Some(2));
        assert_eq!(registry.players(Side::Home).len(), 2);
        assert_eq!(registry.players(Side::Away).len(), 1);
        assert_eq!(registry.all_players().count(), 3);
        assert_eq!(registry.ball_id(), Some(55));
        assert_eq!(registry.referee_id(), Some(77));
        assert_eq!(registry.pitch().length, Some(105.0));

        let keane = &registry.players(Side::Home)[0];
        assert_eq!(keane.position.as_deref(), Some("CM"));
        assert_eq!(keane.position_id, Some(9));
        assert_eq!(keane.number, Some(16));
        assert_eq!(keane.to_string(), "Keane (10)");
    }

    #[test]
    fn test_team_lookups_are_bidirectional() {
        let registry = Registry::from_metadata(&sample_metadata()).unwrap();
        assert_eq!(registry.team_id("HOM"), Some(1));
        assert_eq!(registry.team_id("AWY"), Some(2));
        assert_eq!(registry.team_name(1), Some("HOM"));
        assert_eq!(registry.team_name(2), Some("AWY"));
        assert_eq!(registry.team_name(3), None);
    }

    #[test]
    fn test_unknown_team_id_is_fatal() {
        let mut metadata = sample_metadata();
        metadata.players[1].team_id = Some(99);

        let err = Registry::from_metadata(&metadata).unwrap_err();
        match err {
            TrackingError::IdMismatch {
                player_id, team_id, ..
            } => {
                assert_eq!(player_id, Some(11));
                assert_eq!(team_id, Some(99));
            }
            other => panic!("expected IdMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_name_lookups_are_exact_inverses() {
        let registry = Registry::from_metadata(&sample_metadata()).unwrap();
        let lookup = registry.lookup();

        assert_eq!(lookup.len(), 5);
        assert_eq!(lookup.id_to_name().len(), lookup.name_to_id().len());
        for (id, name) in lookup.id_to_name() {
            assert_eq!(lookup.id(name), Some(*id));
        }
        assert_eq!(lookup.name(55), Some("ball"));
        assert_eq!(lookup.name(77), Some("referee"));
        assert_eq!(lookup.id("Vieira"), Some(20));
        assert_eq!(lookup.name_or_id(404), "#404");
    }

    #[test]
    fn test_duplicate_last_names_are_disambiguated() {
        let mut metadata = sample_metadata();
        metadata.players[1].last_name = Some("Keane".to_string());

        let registry = Registry::from_metadata(&metadata).unwrap();
        let lookup = registry.lookup();
        assert_eq!(lookup.name(10), Some("Keane"));
        assert_eq!(lookup.name(11), Some("Keane (11)"));
        assert_eq!(lookup.id("Keane (11)"), Some(11));
    }

    #[test]
    fn test_disambiguated_name_never_shadows_existing_name() {
        let mut metadata = sample_metadata();
        metadata.players = serde_json::from_value(json!([
            { "last_name": "Silva (6)", "trackable_object": 7, "team_id": 1 },
            { "last_name": "Silva", "trackable_object": 5, "team_id": 1 },
            { "last_name": "Silva", "trackable_object": 6, "team_id": 2 }
        ]))
        .unwrap();

        let registry = Registry::from_metadata(&metadata).unwrap();
        let lookup = registry.lookup();
        assert_eq!(lookup.name(7), Some("Silva (6)"));
        assert_eq!(lookup.name(5), Some("Silva"));
        assert_eq!(lookup.name(6), Some("Silva (6, 2)"));
        assert_eq!(lookup.id_to_name().len(), lookup.name_to_id().len());
        for (id, name) in lookup.id_to_name() {
            assert_eq!(lookup.id(name), Some(*id));
        }
    }

    #[test]
    fn test_duplicate_trackable_id_is_fatal() {
        let mut metadata = sample_metadata();
        metadata.players[2].trackable_object = Some(55);

        let err = Registry::from_metadata(&metadata).unwrap_err();
        assert!(matches!(err, TrackingError::DuplicateParticipant { id: 55, .. }));
    }

    #[test]
    fn test_missing_referees_and_ball_are_none() {
        let mut metadata = sample_metadata();
        metadata.referees.clear();
        metadata.ball = None;

        let registry = Registry::from_metadata(&metadata).unwrap();
        assert_eq!(registry.referee_id(), None);
        assert_eq!(registry.ball_id(), None);
        assert_eq!(registry.lookup().len(), 3);
    }

    #[test]
    fn test_player_without_id_is_kept_out_of_lookups() {
        let mut metadata = sample_metadata();
        metadata.players[0].trackable_object = None;

        let registry = Registry::from_metadata(&metadata).unwrap();
        assert_eq!(registry.players(Side::Home).len(), 2);
        assert_eq!(registry.lookup().id("Keane"), None);
    }

    #[test]
    fn test_participant_roles() {
        let registry = Registry::from_metadata(&sample_metadata()).unwrap();

        assert_eq!(registry.participant(55), Some(Participant::Ball));
        assert_eq!(registry.participant(77), Some(Participant::Referee));
        assert!(matches!(
            registry.participant(20),
            Some(Participant::Player(p, Side::Away)) if p.id == Some(20)
        ));
        assert_eq!(registry.participant(999), None);

        assert_eq!(registry.team_of(10).and_then(|t| t.id), Some(1));
        assert!(registry.team_of(55).is_none());
    }
}
