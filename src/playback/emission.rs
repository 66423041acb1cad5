use chrono::{DateTime, Utc};

use super::engine::PlaybackMode;
use crate::orbital::OrbitalElementRecord;
use crate::types::{Vec3, AU_KM, KM_PER_UNIT};

// ---------------------------------------------------------------------------
// Emission: what the engine hands to the display on each tick
// ---------------------------------------------------------------------------

/// Extended-mode context: where the current interpolation is heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentInfo {
    pub next_timestamp: DateTime<Utc>,
    pub gap_days: f64,
    pub progress: f64, // [0, 1)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Emission {
    pub mode: PlaybackMode,
    pub index: usize,                  // index of `record` in the active series
    pub record: OrbitalElementRecord,
    pub position: Vec3,                // thousands of km, heliocentric
    pub display_position: Vec3,        // position * display_scale
    pub heading: Vec3,                 // unit direction from the previous trail point, or zero
    pub segment: Option<SegmentInfo>,
    pub next_tick_in: f64,             // s until the next tick is due (0 = next frame)
}

impl Emission {
    /// Heliocentric distance, AU.
    pub fn radius_au(&self) -> f64 {
        self.position.norm() * KM_PER_UNIT / AU_KM
    }

    /// Text block for the display: mode, elements and segment progress.
    pub fn describe(&self) -> String {
        let mut text = format!(
            "[{} MODE]\n{}",
            self.mode.name().to_uppercase(),
            self.record.formatted()
        );
        if let Some(seg) = &self.segment {
            text.push_str(&format!(
                "\nNext: {}\nGap: {:.1} days\nProgress: {:.0}%",
                seg.next_timestamp.format("%Y-%m-%d"),
                seg.gap_days,
                seg.progress * 100.0
            ));
        }
        text
    }
}

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

/// Receiver of playback output (a renderer, a recorder, a logger).
pub trait PositionSink {
    fn emit(&mut self, emission: &Emission);

    /// Called after the mode was toggled, with the new mode.
    fn mode_changed(&mut self, _mode: PlaybackMode) {}
}

/// Keeps every emission in memory.
#[derive(Debug, Default)]
pub struct TrajectoryRecorder {
    pub emissions: Vec<Emission>,
    pub mode_changes: Vec<PlaybackMode>,
}

impl TrajectoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PositionSink for TrajectoryRecorder {
    fn emit(&mut self, emission: &Emission) {
        self.emissions.push(emission.clone());
    }

    fn mode_changed(&mut self, mode: PlaybackMode) {
        self.mode_changes.push(mode);
    }
}

/// Writes each description to the debug log.
pub struct LogSink;

impl PositionSink for LogSink {
    fn emit(&mut self, emission: &Emission) {
        log::debug!(
            "#{} at ({:.1}, {:.1}, {:.1}) thousand km\n{}",
            emission.index,
            emission.position.x,
            emission.position.y,
            emission.position.z,
            emission.describe()
        );
    }

    fn mode_changed(&mut self, mode: PlaybackMode) {
        log::info!("Display now in {} mode", mode.name());
    }
}
