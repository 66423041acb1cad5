use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use roadster_sim::io::{self, DatasetSummary, PlaybackSummary, RadiusRange};
use roadster_sim::playback::{run_playback, RunConfig, TrajectoryRecorder};
use roadster_sim::{PlaybackConfig, PlaybackEngine, PlaybackMode, TimeSeriesStore};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Primary,
    Extended,
}

#[derive(Parser, Debug)]
#[command(name = "roadster-sim")]
#[command(about = "Play back a body's trajectory from tabulated orbital elements")]
struct Cli {
    /// CSV of orbital elements (header row first)
    input: PathBuf,

    /// JSON playback configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Mode to start in
    #[arg(short, long, value_enum, default_value = "primary")]
    mode: ModeArg,

    /// Wall-clock seconds to play
    #[arg(short, long, default_value_t = 10.0)]
    duration: f64,

    /// Host frame rate
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Toggle the mode once after this many seconds
    #[arg(long)]
    toggle_after: Option<f64>,

    /// Write every emission to this CSV file
    #[arg(long)]
    csv_out: Option<PathBuf>,

    /// Write a JSON summary to this file
    #[arg(long)]
    summary_out: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PlaybackConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {:?}", path))?,
        None => PlaybackConfig::default(),
    };

    // An empty dataset is reported, then playback continues with nothing to show
    let store = match TimeSeriesStore::from_csv_file(&cli.input, &config.window) {
        Ok(store) => store,
        Err(roadster_sim::LoadError::EmptyDataset { skipped }) => {
            log::error!("No usable records in {:?} ({} rows skipped)", cli.input, skipped);
            TimeSeriesStore::default()
        }
        Err(e) => return Err(e).with_context(|| format!("Failed to read {:?}", cli.input)),
    };
    let store = Arc::new(store);

    let mut engine = PlaybackEngine::new(Arc::clone(&store), config)
        .context("Invalid playback configuration")?;
    if matches!(cli.mode, ModeArg::Extended) {
        engine.toggle_mode();
    }

    let run = RunConfig {
        duration: cli.duration,
        frame_dt: 1.0 / cli.fps.max(1.0),
        toggle_after: cli.toggle_after,
    };
    let mut recorder = TrajectoryRecorder::new();
    let stats = run_playback(&mut engine, &mut recorder, &run);

    // -----------------------------------------------------------------------
    // Report
    // -----------------------------------------------------------------------
    let dataset = DatasetSummary::from_store(&store);
    let radius = RadiusRange::from_emissions(&recorder.emissions);

    println!();
    println!("====================================================================");
    println!("  ORBITAL PLAYBACK — {}", cli.input.display());
    println!("====================================================================");
    println!();
    println!("  Dataset");
    println!("  ──────────────────────────────────────────────────────────────────");
    for (label, span) in [("Primary", &dataset.primary), ("Extended", &dataset.extended)] {
        match span {
            Some(s) => println!(
                "  {:<9} {:>6} records   {} → {}",
                label,
                s.records,
                s.first.format("%Y-%m-%d"),
                s.last.format("%Y-%m-%d")
            ),
            None => println!("  {:<9} {:>6} records", label, 0),
        }
    }
    println!(
        "  Skipped:  {:>6} rows      Before window: {} rows",
        dataset.skipped_rows, dataset.dropped_rows
    );
    if let Some(g) = &dataset.extended_gaps {
        println!(
            "  Extended gaps: avg {:.1} h, max {:.1} h, {} over 24 h",
            g.average_gap_hours, g.max_gap_hours, g.gaps_over_24h
        );
    }
    println!();

    println!("  Playback");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Frames: {}  Emissions: {}  Toggles: {}  Final mode: {}  Trail: {} pts",
        stats.frames,
        stats.emissions,
        stats.toggles,
        stats.final_mode.name(),
        stats.trail_len
    );
    if let Some(r) = &radius {
        println!("  Heliocentric distance: {:.4} – {:.4} AU", r.min_au, r.max_au);
    }
    println!();

    if !recorder.emissions.is_empty() {
        println!(
            "  {:>5}  {:>9}  {:>19}  {:>8}  {:>8}  {:>6}",
            "#", "mode", "date (UTC)", "r (AU)", "nu (deg)", "prog"
        );
        println!("  {}", "─".repeat(64));

        let sample_interval = (recorder.emissions.len() / 20).max(1);
        for (i, e) in recorder.emissions.iter().enumerate() {
            if i % sample_interval != 0 && i != recorder.emissions.len() - 1 {
                continue;
            }
            let progress = e
                .segment
                .map_or_else(|| "-".to_string(), |s| format!("{:.0}%", s.progress * 100.0));
            println!(
                "  {:>5}  {:>9}  {:>19}  {:>8.4}  {:>8.2}  {:>6}",
                e.index,
                e.mode.name(),
                e.record.timestamp.format("%Y-%m-%d %H:%M:%S"),
                e.radius_au(),
                e.record.true_anom_deg,
                progress
            );
        }
        println!();
    }

    if let Some(last) = recorder.emissions.last() {
        println!("  Last display text");
        println!("  ──────────────────────────────────────────────────────────────────");
        for line in last.describe().lines() {
            println!("  {}", line);
        }
        println!();
    }
    println!(
        "  Next control: \"{}\"{}",
        engine.mode_label(),
        if engine.mode() == PlaybackMode::Extended {
            format!("  (segment {:.2} s)", engine.segment_duration())
        } else {
            String::new()
        }
    );
    println!("====================================================================");
    println!();

    // -----------------------------------------------------------------------
    // Exports
    // -----------------------------------------------------------------------
    if let Some(path) = &cli.csv_out {
        io::write_emissions_file(path, &recorder.emissions)
            .with_context(|| format!("Failed to write {:?}", path))?;
        log::info!("Wrote {} emissions to {:?}", recorder.emissions.len(), path);
    }
    if let Some(path) = &cli.summary_out {
        let summary = PlaybackSummary {
            dataset,
            run: Some(stats),
            radius,
        };
        io::write_summary_file(path, &summary)
            .with_context(|| format!("Failed to write {:?}", path))?;
        log::info!("Wrote summary to {:?}", path);
    }

    Ok(())
}
