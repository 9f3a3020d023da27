//! # Coordinate Table Export
//!
//! One row per `(frame, time)` key, one column per trackable object seen in
//! any frame. A cell holds that object's raw coordinate in that frame, or
//! nothing when the object was not tracked there.
//!
//! Writing the table somewhere is the job of a [`TableSink`].

use rustc_hash::{FxHashMap, FxHashSet};

use crate::frame::{Coordinate, Frame};
use crate::schema::Timestamp;

/// Destination for a coordinate table (file, DataFrame bridge, ...).
pub trait TableSink {
    type Error;

    fn write_table(&mut self, table: &CoordinateTable) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateRow {
    pub frame: Option<u64>,
    pub time: Option<Timestamp>,
    /// Aligned with [`CoordinateTable::columns`]
    pub cells: Vec<Option<Coordinate>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoordinateTable {
    columns: Vec<u32>,
    rows: Vec<CoordinateRow>,
}

type RowKey = (Option<u64>, Option<String>);

impl CoordinateTable {
    /// Build the table. Columns appear in first-seen order; a repeated
    /// `(frame, time)` key overwrites the earlier row in place, and columns
    /// only the overwritten row had are dropped.
    pub fn from_frames(frames: &[Frame]) -> Self {
        let mut columns: Vec<u32> = Vec::new();
        let mut seen: FxHashSet<u32> = FxHashSet::default();
        let mut entries: Vec<(Option<u64>, Option<Timestamp>, FxHashMap<u32, Option<Coordinate>>)> =
            Vec::new();
        let mut row_of: FxHashMap<RowKey, usize> = FxHashMap::default();

        for frame in frames {
            let mut cells = FxHashMap::default();
            for location in &frame.locations {
                let Some(id) = location.id else {
                    continue;
                };
                if seen.insert(id) {
                    columns.push(id);
                }
                cells.insert(id, location.coordinate());
            }

            let key = (frame.index, frame.time.as_ref().map(ToString::to_string));
            match row_of.get(&key) {
                Some(&i) => entries[i].2 = cells,
                None => {
                    row_of.insert(key, entries.len());
                    entries.push((frame.index, frame.time.clone(), cells));
                }
            }
        }

        columns.retain(|id| entries.iter().any(|(_, _, cells)| cells.contains_key(id)));

        let rows = entries
            .into_iter()
            .map(|(frame, time, cells)| CoordinateRow {
                frame,
                time,
                cells: columns
                    .iter()
                    .map(|id| cells.get(id).copied().flatten())
                    .collect(),
            })
            .collect();

        log::debug!("Coordinate table: {} columns", columns.len());

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[u32] {
        &self.columns
    }

    pub fn rows(&self) -> &[CoordinateRow] {
        &self.rows
    }

    pub fn cell(&self, row: usize, id: u32) -> Option<&Coordinate> {
        let col = self.columns.iter().position(|c| *c == id)?;
        self.rows.get(row)?.cells.get(col)?.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
