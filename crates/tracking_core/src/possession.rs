//! # Possession Strings
//!
//! Groups frames into maximal runs that share one possession group label.
//!
//! ## Algorithm
//! 1. Sort frames by frame index (stable; missing indices first)
//! 2. Scan once, comparing each frame's group with the previous frame's group;
//!    a change (including null <-> label) closes the current run. The very
//!    first change closes an empty run.
//! 3. Flush the trailing run
//! 4. Drop runs without any labelled frame (the empty leading run and all
//!    "no possession" runs)

use std::fmt;

use crate::frame::Frame;
use crate::registry::NameLookup;

/// A maximal run of frames held by one possession group.
#[derive(Debug, Clone)]
pub struct PossessionString<'a> {
    group: &'a str,
    frames: Vec<&'a Frame>,
    lookup: &'a NameLookup,
}

impl<'a> PossessionString<'a> {
    /// Possession group label shared by every frame in the run.
    pub fn group(&self) -> &'a str {
        self.group
    }

    pub fn frames(&self) -> &[&'a Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn first_frame(&self) -> Option<u64> {
        self.frames.first().and_then(|f| f.index)
    }

    pub fn last_frame(&self) -> Option<u64> {
        self.frames.last().and_then(|f| f.index)
    }

    /// Holder ids in order of each change of holder; null holders are skipped.
    pub fn holders(&self) -> Vec<u32> {
        let mut holders = Vec::new();
        let mut previous: Option<u32> = None;
        for frame in &self.frames {
            if let Some(holder) = frame.possession.holder {
                if previous != Some(holder) {
                    holders.push(holder);
                    previous = Some(holder);
                }
            }
        }
        holders
    }

    /// Human-readable transition trace, e.g. `<s> -> Keane -> Scholes`.
    pub fn trace(&self) -> String {
        let mut trace = String::from("<s>");
        for holder in self.holders() {
            trace.push_str(" -> ");
            trace.push_str(&self.lookup.name_or_id(holder));
        }
        trace
    }
}

impl fmt::Display for PossessionString<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.trace())
    }
}

/// Raw runs of equal possession group, before filtering.
///
/// Keeps the leading empty run produced by the first group change.
pub(crate) fn possession_runs(frames: &[Frame]) -> Vec<Vec<&Frame>> {
    let mut ordered: Vec<&Frame> = frames.iter().collect();
    ordered.sort_by_key(|f| f.index);

    let mut runs = Vec::new();
    let mut buffer: Vec<&Frame> = Vec::new();
    let mut previous: Option<&str> = None;

    for frame in ordered {
        if frame.group() != previous {
            runs.push(std::mem::take(&mut buffer));
            previous = frame.group();
        }
        buffer.push(frame);
    }
    runs.push(buffer);

    runs
}

/// Segment frames into possession strings, dropping runs with no possession.
pub fn segment_possession<'a>(
    frames: &'a [Frame],
    lookup: &'a NameLookup,
) -> Vec<PossessionString<'a>> {
    let runs = possession_runs(frames);
    let total_runs = runs.len();

    let strings: Vec<PossessionString<'a>> = runs
        .into_iter()
        .filter_map(|run| {
            let group = run.iter().copied().find_map(Frame::group)?;
            Some(PossessionString {
                group,
                frames: run,
                lookup,
            })
        })
        .collect();

    log::debug!(
        "Segmented {} frames into {} possession strings ({} runs dropped)",
        frames.len(),
        strings.len(),
        total_runs - strings.len()
    );

    strings
}
