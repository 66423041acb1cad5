use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::parse::parse_row;
use crate::error::{LoadError, RowError};
use crate::orbital::OrbitalElementRecord;

// ---------------------------------------------------------------------------
// Partition window
// ---------------------------------------------------------------------------

/// Date window splitting the dense historical series from the sparse tail.
///
/// Bounds are compared as instants at 00:00 UTC of each date, so a record at
/// `end` midnight is still primary while one later that day is extended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Default for SeriesWindow {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2018, 2, 7).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2019, 10, 8).unwrap_or_default(),
        }
    }
}

/// Where an ingested record ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    Primary,
    Extended,
    Dropped,
}

impl SeriesWindow {
    pub fn start_instant(&self) -> DateTime<Utc> {
        self.start.and_time(NaiveTime::MIN).and_utc()
    }

    pub fn end_instant(&self) -> DateTime<Utc> {
        self.end.and_time(NaiveTime::MIN).and_utc()
    }

    pub fn classify(&self, timestamp: DateTime<Utc>) -> Partition {
        if timestamp > self.end_instant() {
            Partition::Extended
        } else if timestamp >= self.start_instant() {
            Partition::Primary
        } else {
            Partition::Dropped
        }
    }
}

// ---------------------------------------------------------------------------
// Load diagnostics
// ---------------------------------------------------------------------------

/// A data row that failed to parse, with its 1-based line number.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    pub line: usize,
    pub error: RowError,
}

/// Spacing statistics of the extended series. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GapDiagnostics {
    pub gaps: usize,
    pub average_gap_hours: f64,
    pub max_gap_hours: f64,
    pub gaps_over_24h: usize,
}

impl GapDiagnostics {
    /// `None` when fewer than two records exist.
    pub fn from_records(records: &[OrbitalElementRecord]) -> Option<Self> {
        if records.len() < 2 {
            return None;
        }
        let hours: Vec<f64> = records.windows(2).map(|w| w[0].hours_until(&w[1])).collect();
        let total: f64 = hours.iter().sum();
        Some(Self {
            gaps: hours.len(),
            average_gap_hours: total / hours.len() as f64,
            max_gap_hours: hours.iter().copied().fold(f64::MIN, f64::max),
            gaps_over_24h: hours.iter().filter(|&&h| h > 24.0).count(),
        })
    }
}

// ---------------------------------------------------------------------------
// Time-series store
// ---------------------------------------------------------------------------

/// Two ordered record sequences built once at load time, read-only afterwards.
///
/// Input order is kept as-is; callers supply chronologically sorted rows.
#[derive(Debug, Clone, Default)]
pub struct TimeSeriesStore {
    primary: Vec<OrbitalElementRecord>,
    extended: Vec<OrbitalElementRecord>,
    skipped: Vec<SkippedRow>,
    dropped: usize,
}

impl TimeSeriesStore {
    /// Build directly from already partitioned sequences.
    pub fn from_records(
        primary: Vec<OrbitalElementRecord>,
        extended: Vec<OrbitalElementRecord>,
    ) -> Self {
        Self {
            primary,
            extended,
            ..Self::default()
        }
    }

    /// Ingest CSV lines. The first line is a header and is always skipped.
    ///
    /// Malformed rows are logged and skipped. Fails only when neither
    /// partition received a record.
    pub fn load<I, S>(rows: I, window: &SeriesWindow) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut store = Self::default();
        let mut read = 0usize;

        for (idx, raw) in rows.into_iter().enumerate() {
            read += 1;
            if idx == 0 {
                continue;
            }
            let line = raw.as_ref().trim_start_matches('\u{feff}').trim();
            if line.is_empty() {
                continue;
            }

            let record = match parse_row(line) {
                Ok(r) => r,
                Err(error) => {
                    log::warn!("Failed to parse line {}: {}", idx + 1, error);
                    log::warn!("Line content: '{}'", line);
                    store.skipped.push(SkippedRow { line: idx + 1, error });
                    continue;
                }
            };

            match window.classify(record.timestamp) {
                Partition::Primary => store.primary.push(record),
                Partition::Extended => store.extended.push(record),
                Partition::Dropped => store.dropped += 1,
            }
        }

        log::info!("CSV input has {} lines", read);
        log::info!(
            "Loaded {} primary records, {} extended records ({} skipped, {} before window)",
            store.primary.len(),
            store.extended.len(),
            store.skipped.len(),
            store.dropped
        );

        if store.is_empty() {
            log::error!("No valid orbital data points were loaded");
            return Err(LoadError::EmptyDataset {
                skipped: store.skipped.len(),
            });
        }

        if let Some(gaps) = store.gap_diagnostics() {
            log::info!(
                "Extended series: average gap = {:.1} hours, {} gaps > 24 hours",
                gaps.average_gap_hours,
                gaps.gaps_over_24h
            );
        }

        Ok(store)
    }

    /// Ingest a whole CSV document held in memory.
    pub fn from_csv_str(text: &str, window: &SeriesWindow) -> Result<Self, LoadError> {
        Self::load(text.split('\n'), window)
    }

    /// Read and ingest a CSV file.
    pub fn from_csv_file(
        path: impl AsRef<Path>,
        window: &SeriesWindow,
    ) -> Result<Self, LoadError> {
        let path = path.as_ref();
        log::info!("Loading orbital elements from {:?}", path);
        let text = std::fs::read_to_string(path)?;
        Self::from_csv_str(&text, window)
    }

    pub fn primary(&self) -> &[OrbitalElementRecord] {
        &self.primary
    }

    pub fn extended(&self) -> &[OrbitalElementRecord] {
        &self.extended
    }

    pub fn skipped(&self) -> &[SkippedRow] {
        &self.skipped
    }

    /// Parsed records that fell before the window.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.extended.is_empty()
    }

    pub fn gap_diagnostics(&self) -> Option<GapDiagnostics> {
        GapDiagnostics::from_records(&self.extended)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    const HEADER: &str = "epoch_jd,date_utc,a_au,e,i_deg,raan_deg,argp_deg,M_deg,nu_deg";

    fn row(ts: DateTime<Utc>, nu: f64) -> String {
        format!(
            "2458156.5,{},1.3254,0.2560,1.0777,317.0,177.5,0.48,{}",
            ts.format("%Y-%m-%d %H:%M:%S"),
            nu
        )
    }

    fn ymd(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn window_boundaries() {
        let rows = vec![
            HEADER.to_string(),
            row(ymd(2018, 2, 6), 0.0),
            row(ymd(2018, 2, 7), 1.0),
            row(ymd(2019, 10, 8), 2.0),
            row(ymd(2019, 10, 9), 3.0),
        ];
        let store = TimeSeriesStore::load(&rows, &SeriesWindow::default()).unwrap();
        assert_eq!(store.primary().len(), 2);
        assert_eq!(store.primary()[1].timestamp, ymd(2019, 10, 8));
        assert_eq!(store.extended().len(), 1);
        assert_eq!(store.extended()[0].timestamp, ymd(2019, 10, 9));
        assert_eq!(store.dropped(), 1);
    }

    #[test]
    fn later_on_end_date_is_extended() {
        let w = SeriesWindow::default();
        assert_eq!(w.classify(ymd(2019, 10, 8)), Partition::Primary);
        assert_eq!(w.classify(ymd(2019, 10, 8) + Duration::hours(6)), Partition::Extended);
    }

    #[test]
    fn malformed_rows_are_skipped_not_fatal() {
        let start = ymd(2019, 9, 1);
        let mut rows = vec![HEADER.to_string()];
        for i in 0..100 {
            let ts = start + Duration::days(i);
            let line = match i {
                10 => "2458156.5,2019-09-11,1.3".to_string(),
                42 => format!("2458156.5,{},1.3,oops,1,2,3,4,5", ts.format("%Y-%m-%d")),
                77 => "2458156.5,someday,1.3,0.2,1,2,3,4,5".to_string(),
                _ => row(ts, i as f64),
            };
            rows.push(line);
        }

        let store = TimeSeriesStore::load(&rows, &SeriesWindow::default()).unwrap();
        assert_eq!(store.primary().len() + store.extended().len(), 97);
        assert_eq!(store.skipped().len(), 3);
        assert_eq!(store.skipped()[0].line, 12);
        assert!(matches!(store.skipped()[0].error, RowError::TooFewFields { found: 3 }));
        // 2019-09-01 ..= 2019-10-08 is 38 days, one of which (09-11) was malformed
        assert_eq!(store.primary().len(), 37);
        assert_eq!(store.extended().len(), 60);
    }

    #[test]
    fn header_is_always_skipped() {
        // A header that happens to look like data is still ignored
        let text = format!("{}\n{}\n", row(ymd(2018, 3, 1), 5.0), row(ymd(2018, 3, 2), 6.0));
        let store = TimeSeriesStore::from_csv_str(&text, &SeriesWindow::default()).unwrap();
        assert_eq!(store.primary().len(), 1);
        assert_eq!(store.primary()[0].true_anom_deg, 6.0);
    }

    #[test]
    fn crlf_bom_and_blank_lines() {
        let text = format!(
            "\u{feff}{}\r\n\r\n{}\r\n   \r\n{}\r\n",
            HEADER,
            row(ymd(2018, 3, 1), 5.0),
            row(ymd(2020, 1, 1), 7.0)
        );
        let store = TimeSeriesStore::from_csv_str(&text, &SeriesWindow::default()).unwrap();
        assert_eq!(store.primary().len(), 1);
        assert_eq!(store.extended().len(), 1);
        assert!(store.skipped().is_empty());
    }

    #[test]
    fn input_order_is_preserved() {
        let rows = vec![
            HEADER.to_string(),
            row(ymd(2020, 3, 1), 1.0),
            row(ymd(2020, 1, 1), 2.0),
        ];
        let store = TimeSeriesStore::load(&rows, &SeriesWindow::default()).unwrap();
        assert_eq!(store.extended()[0].true_anom_deg, 1.0);
        assert_eq!(store.extended()[1].true_anom_deg, 2.0);
    }

    #[test]
    fn empty_dataset_is_a_load_failure() {
        let rows = vec![HEADER.to_string(), row(ymd(2017, 1, 1), 0.0), "bad".to_string()];
        match TimeSeriesStore::load(&rows, &SeriesWindow::default()) {
            Err(LoadError::EmptyDataset { skipped }) => assert_eq!(skipped, 1),
            other => panic!("expected EmptyDataset, got {:?}", other.map(|s| s.is_empty())),
        }
        assert!(TimeSeriesStore::load(Vec::<String>::new(), &SeriesWindow::default()).is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let window = SeriesWindow::default();
        let err = TimeSeriesStore::from_csv_file("/nonexistent/roadster.csv", &window).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn reads_csv_from_disk() {
        let rows = [
            HEADER.to_string(),
            row(ymd(2018, 3, 1), 10.0),
            "not,enough".to_string(),
            row(ymd(2018, 3, 2), 11.0),
            row(ymd(2020, 5, 1), 90.0),
        ];
        let path = std::env::temp_dir()
            .join(format!("roadster_sim_store_{}.csv", std::process::id()));
        std::fs::write(&path, rows.join("\r\n")).unwrap();

        let store = TimeSeriesStore::from_csv_file(&path, &SeriesWindow::default()).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(store.primary().len(), 2);
        assert_eq!(store.extended().len(), 1);
        assert_eq!(store.skipped().len(), 1);
        assert_eq!(store.primary()[1].true_anom_deg, 11.0);
        assert_eq!(store.extended()[0].timestamp, ymd(2020, 5, 1));
    }

    #[test]
    fn gap_diagnostics_of_extended_series() {
        let base = ymd(2020, 1, 1);
        let rows = vec![
            HEADER.to_string(),
            row(base, 0.0),
            row(base + Duration::hours(12), 1.0),
            row(base + Duration::hours(72), 2.0),
            row(base + Duration::hours(84), 3.0),
        ];
        let store = TimeSeriesStore::load(&rows, &SeriesWindow::default()).unwrap();
        let gaps = store.gap_diagnostics().unwrap();
        assert_eq!(gaps.gaps, 3);
        assert_eq!(gaps.gaps_over_24h, 1);
        assert!((gaps.average_gap_hours - 28.0).abs() < 1e-9);
        assert!((gaps.max_gap_hours - 60.0).abs() < 1e-9);
    }

    #[test]
    fn single_extended_record_has_no_gaps() {
        assert!(GapDiagnostics::from_records(&[]).is_none());
        let store = TimeSeriesStore::from_records(vec![], vec![]);
        assert!(store.is_empty());
        assert!(store.gap_diagnostics().is_none());
    }
}
