use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::orbital::OrbitalElementRecord;
use crate::playback::{Emission, PlaybackStats};
use crate::series::{GapDiagnostics, TimeSeriesStore};

/// First and last timestamp of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Span {
    pub first: DateTime<Utc>,
    pub last: DateTime<Utc>,
    pub records: usize,
}

impl Span {
    fn of(records: &[OrbitalElementRecord]) -> Option<Self> {
        Some(Span {
            first: records.first()?.timestamp,
            last: records.last()?.timestamp,
            records: records.len(),
        })
    }
}

/// What was ingested.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub primary: Option<Span>,
    pub extended: Option<Span>,
    pub skipped_rows: usize,
    pub dropped_rows: usize,
    pub extended_gaps: Option<GapDiagnostics>,
}

impl DatasetSummary {
    pub fn from_store(store: &TimeSeriesStore) -> Self {
        DatasetSummary {
            primary: Span::of(store.primary()),
            extended: Span::of(store.extended()),
            skipped_rows: store.skipped().len(),
            dropped_rows: store.dropped(),
            extended_gaps: store.gap_diagnostics(),
        }
    }
}

/// Heliocentric distance range covered by a run, AU.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadiusRange {
    pub min_au: f64,
    pub max_au: f64,
}

impl RadiusRange {
    pub fn from_emissions(emissions: &[Emission]) -> Option<Self> {
        let radii: Vec<f64> = emissions
            .iter()
            .map(Emission::radius_au)
            .collect();
        if radii.is_empty() {
            return None;
        }
        Some(RadiusRange {
            min_au: radii.iter().copied().fold(f64::INFINITY, f64::min),
            max_au: radii.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaybackSummary {
    pub dataset: DatasetSummary,
    pub run: Option<PlaybackStats>,
    pub radius: Option<RadiusRange>,
}

/// Write the summary as pretty JSON.
pub fn write_summary<W: Write>(writer: &mut W, summary: &PlaybackSummary) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, summary)?;
    writeln!(writer)?;
    Ok(())
}

/// Write the summary JSON to a file.
pub fn write_summary_file(path: impl AsRef<Path>, summary: &PlaybackSummary) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, summary)
}
