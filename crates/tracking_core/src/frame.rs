//! # Frame Model
//!
//! Per-frame snapshot: object locations plus the possession annotation.
//!
//! Raw y is kept next to the normalized y so the mirror for the second half
//! is applied exactly once, from the frame's own period.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::schema::{FrameRecord, LocationRecord, Timestamp};

/// Period whose y axis is mirrored by default.
pub const SECOND_HALF: u8 = 2;

/// Mirror `y` when `period` is the mirrored period, otherwise pass it through.
pub fn normalize_y(y: f64, period: Option<u8>, mirrored_period: u8) -> f64 {
    if period == Some(mirrored_period) {
        -y
    } else {
        y
    }
}

/// Raw spatial value in pitch meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.z {
            Some(z) if z != 0.0 => write!(f, "({}, {}, {})", self.x, self.y, z),
            _ => write!(f, "({}, {})", self.x, self.y),
        }
    }
}

/// Position of one trackable object within one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Trackable object id
    pub id: Option<u32>,
    /// Secondary tracking id
    pub track_id: Option<u32>,
    pub x: Option<f64>,
    /// Raw y as delivered
    pub y: Option<f64>,
    /// y mirrored for the second half
    pub normalized_y: Option<f64>,
    pub z: Option<f64>,
}

impl Location {
    pub fn from_record(record: &LocationRecord, period: Option<u8>, mirrored_period: u8) -> Self {
        Self {
            id: record.trackable_object,
            track_id: record.track_id,
            x: record.x,
            y: record.y,
            normalized_y: record.y.map(|y| normalize_y(y, period, mirrored_period)),
            z: record.z,
        }
    }

    /// Raw coordinate, if both x and y were delivered.
    pub fn coordinate(&self) -> Option<Coordinate> {
        Some(Coordinate {
            x: self.x?,
            y: self.y?,
            z: self.z,
        })
    }

    /// Coordinate with y normalized to a single attacking direction.
    pub fn normalized_coordinate(&self) -> Option<Coordinate> {
        Some(Coordinate {
            x: self.x?,
            y: self.normalized_y?,
            z: self.z,
        })
    }
}

/// Who holds the ball in a frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Possession {
    /// Trackable object id of the holder
    pub holder: Option<u32>,
    /// Coarse group label, e.g. "home team"
    pub group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub index: Option<u64>,
    pub time: Option<Timestamp>,
    pub period: Option<u8>,
    pub locations: Vec<Location>,
    pub possession: Possession,
}

impl Frame {
    /// Materialize a frame; a missing possession record yields an empty
    /// annotation rather than an error.
    pub fn from_record(record: FrameRecord, mirrored_period: u8) -> Self {
        let period = record.period;
        let locations = record
            .data
            .iter()
            .map(|l| Location::from_record(l, period, mirrored_period))
            .collect();
        let possession = record
            .possession
            .map(|p| Possession {
                holder: p.trackable_object,
                group: p.group,
            })
            .unwrap_or_default();

        Self {
            index: record.frame,
            time: record.time,
            period,
            locations,
            possession,
        }
    }

    pub fn location_of(&self, id: u32) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == Some(id))
    }

    pub fn group(&self) -> Option<&str> {
        self.possession.group.as_deref()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let time = self
            .time
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "None".to_string());
        write!(
            f,
            "Moment at {}; possession={}",
            time,
            self.group().unwrap_or("None")
        )
    }
}
