//! Tracking Report Library
//!
//! Text/JSON rendering of possession statistics and a CSV sink for the
//! coordinate table.

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io;
use std::path::Path;

use tracking_core::{Analysis, AnalysisConfig, CoordinateTable, FsLoader, TableSink};

/// CSV sink: `frame,time,<id>...` header, one line per table row.
pub struct CsvTableSink<W: io::Write> {
    writer: csv::Writer<W>,
}

impl<W: io::Write> CsvTableSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(inner),
        }
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e.error()))
    }
}

impl CsvTableSink<File> {
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
        }
        let file = File::create(path)
            .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
        Ok(Self::new(file))
    }
}

impl<W: io::Write> TableSink for CsvTableSink<W> {
    type Error = csv::Error;

    fn write_table(&mut self, table: &CoordinateTable) -> Result<(), Self::Error> {
        let mut header = vec!["frame".to_string(), "time".to_string()];
        header.extend(table.columns().iter().map(u32::to_string));
        self.writer.write_record(&header)?;

        for row in table.rows() {
            let mut record = Vec::with_capacity(row.cells.len() + 2);
            record.push(row.frame.map(|f| f.to_string()).unwrap_or_default());
            record.push(row.time.as_ref().map(ToString::to_string).unwrap_or_default());
            record.extend(
                row.cells
                    .iter()
                    .map(|c| c.map(|c| c.to_string()).unwrap_or_default()),
            );
            self.writer.write_record(&record)?;
        }

        self.writer.flush()?;
        Ok(())
    }
}

/// Load a match directory, telling roster problems apart from unreadable input.
pub fn load_analysis(data_dir: &Path, config: AnalysisConfig) -> Result<Analysis> {
    Analysis::load(data_dir, config, &FsLoader).map_err(|e| {
        let context = if e.is_registry_error() {
            format!("Invalid roster in {}", data_dir.display())
        } else {
            format!("Failed to load match from {}", data_dir.display())
        };
        anyhow::Error::new(e).context(context)
    })
}

/// Write the analysis' coordinate table to `out` as CSV.
///
/// # Returns
///
/// Number of rows written (header excluded)
pub fn export_locations_csv(analysis: &Analysis, out: &Path) -> Result<usize> {
    let table = analysis.location_table();
    let mut sink = CsvTableSink::create(out)?;
    sink.write_table(&table)
        .with_context(|| format!("Failed to write CSV file: {}", out.display()))?;
    log::info!(
        "Exported {} rows x {} objects to {}",
        table.rows().len(),
        table.columns().len(),
        out.display()
    );
    Ok(table.rows().len())
}

/// Team and player possession shares as plain text.
pub fn render_stats(analysis: &Analysis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", analysis);

    let _ = writeln!(out, "Team possession:");
    match analysis.team_possession_stats() {
        Some(team) => {
            let home = team.home_team.as_deref().unwrap_or("home");
            let away = team.away_team.as_deref().unwrap_or("away");
            let _ = writeln!(out, "  {}: {} ({} frames)", home, team.home, team.home_frames);
            let _ = writeln!(out, "  {}: {} ({} frames)", away, team.away, team.away_frames);
        }
        None => {
            let _ = writeln!(out, "  undefined (no labelled frames)");
        }
    }

    let _ = writeln!(out, "Player possession:");
    for player in analysis.player_possession_stats() {
        let _ = writeln!(out, "  {}: {} ({} frames)", player.name, player.share, player.frames);
    }
    out
}

/// Possession strings, one per line, optionally capped at `limit`.
pub fn render_possession_strings(analysis: &Analysis, limit: Option<usize>) -> String {
    let strings = analysis.possession_strings();
    let shown = limit.unwrap_or(strings.len()).min(strings.len());

    let mut out = String::new();
    for s in strings.iter().take(shown) {
        let first = s.first_frame().map(|f| f.to_string()).unwrap_or_default();
        let last = s.last_frame().map(|f| f.to_string()).unwrap_or_default();
        let _ = writeln!(
            out,
            "[{}] frames {}-{} ({}): {}",
            s.group(),
            first,
            last,
            s.len(),
            s
        );
    }
    if shown < strings.len() {
        let _ = writeln!(out, "... {} more", strings.len() - shown);
    }
    out
}

/// Statistics as a JSON document.
pub fn stats_json(analysis: &Analysis) -> Result<serde_json::Value> {
    Ok(serde_json::json!({
        "match": analysis.match_model().to_string(),
        "team_possession": serde_json::to_value(analysis.team_possession_stats())?,
        "player_possession": serde_json::to_value(analysis.player_possession_stats())?,
    }))
}
