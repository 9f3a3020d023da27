//! # Possession Statistics
//!
//! Team and player possession shares over the frame sequence.
//!
//! - Team share counts frames whose group label equals the configured home or
//!   away label exactly; every other frame is left out of both numerator and
//!   denominator. No labelled frame at all means the share is undefined.
//! - Player share counts frames by resolved holder name; frames without a
//!   holder are left out.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::frame::Frame;
use crate::match_model::Match;
use crate::registry::NameLookup;

/// Finest precision an `f64` share can carry.
pub const MAX_DECIMALS: u32 = 15;

/// Round half-to-even at `decimals` places, capped at [`MAX_DECIMALS`].
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals.min(MAX_DECIMALS) as i32);
    (value * factor).round_ties_even() / factor
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamPossession {
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    pub home_frames: usize,
    pub away_frames: usize,
    /// Home share of labelled frames
    pub home: f64,
    /// Away share of labelled frames
    pub away: f64,
}

impl TeamPossession {
    pub fn labelled_frames(&self) -> usize {
        self.home_frames + self.away_frames
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerPossession {
    pub name: String,
    pub frames: usize,
    pub share: f64,
}

/// Count frames labelled with the home and the away group.
pub fn count_team_frames(frames: &[Frame], home_group: &str, away_group: &str) -> (usize, usize) {
    frames.iter().fold((0, 0), |(home, away), f| match f.group() {
        Some(g) if g == home_group => (home + 1, away),
        Some(g) if g == away_group => (home, away + 1),
        _ => (home, away),
    })
}

/// Team possession share, or `None` when no frame carries a team label.
pub fn team_possession_share(m: &Match, config: &AnalysisConfig) -> Option<TeamPossession> {
    let (home_frames, away_frames) =
        count_team_frames(m.frames(), &config.home_group, &config.away_group);
    let total = home_frames + away_frames;
    if total == 0 {
        log::warn!(
            "Team possession undefined: no frame labelled '{}' or '{}'",
            config.home_group,
            config.away_group
        );
        return None;
    }

    let decimals = config.team_share_decimals;
    Some(TeamPossession {
        home_team: m.home_team().name.clone(),
        away_team: m.away_team().name.clone(),
        home_frames,
        away_frames,
        home: round_to(home_frames as f64 / total as f64, decimals),
        away: round_to(away_frames as f64 / total as f64, decimals),
    })
}

/// Shares per name, ordered by descending count, ties in first-seen order.
pub fn share_by_name<I>(names: I, decimals: u32) -> Vec<PlayerPossession>
where
    I: IntoIterator<Item = Option<String>>,
{
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut slot: FxHashMap<String, usize> = FxHashMap::default();

    for name in names.into_iter().flatten() {
        match slot.get(&name) {
            Some(&i) => counts[i].1 += 1,
            None => {
                slot.insert(name.clone(), counts.len());
                counts.push((name, 1));
            }
        }
    }

    let total: usize = counts.iter().map(|(_, c)| c).sum();
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .map(|(name, frames)| PlayerPossession {
            name,
            frames,
            share: round_to(frames as f64 / total as f64, decimals),
        })
        .collect()
}

fn holder_names<'a>(
    frames: &'a [Frame],
    lookup: &'a NameLookup,
) -> impl Iterator<Item = Option<String>> + 'a {
    frames
        .iter()
        .map(move |f| f.possession.holder.map(|id| lookup.name_or_id(id)))
}

/// Player possession share over every frame with a holder.
pub fn player_possession_share(m: &Match, config: &AnalysisConfig) -> Vec<PlayerPossession> {
    share_by_name(
        holder_names(m.frames(), m.lookup()),
        config.player_share_decimals,
    )
}
