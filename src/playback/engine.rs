use std::sync::Arc;

use serde::Serialize;

use super::config::PlaybackConfig;
use super::emission::{Emission, SegmentInfo};
use super::trail::Trail;
use crate::error::ConfigError;
use crate::orbital::{interpolate, OrbitalElementRecord};
use crate::series::TimeSeriesStore;
use crate::types::{Vec3, Vector3Ext, HOURS_PER_DAY};

/// Segment duration used whenever no extended segment is active, s.
const IDLE_SEGMENT_SECONDS: f64 = 1.0;

// ---------------------------------------------------------------------------
// Playback mode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlaybackMode {
    /// Step through the dense historical series, one record per tick.
    Primary,
    /// Glide through the sparse tail, interpolating between records.
    Extended,
}

impl PlaybackMode {
    pub fn toggled(self) -> Self {
        match self {
            PlaybackMode::Primary => PlaybackMode::Extended,
            PlaybackMode::Extended => PlaybackMode::Primary,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PlaybackMode::Primary => "Primary",
            PlaybackMode::Extended => "Extended",
        }
    }

    /// Label for the control that switches away from this mode.
    pub fn toggle_label(self) -> &'static str {
        match self {
            PlaybackMode::Primary => "Try Extended Mode",
            PlaybackMode::Extended => "Try Primary Mode",
        }
    }
}

// ---------------------------------------------------------------------------
// Segment duration policy
// ---------------------------------------------------------------------------

/// Wall-clock seconds spent interpolating across a gap of `gap_hours`.
///
/// Gaps up to a day play at `step_rate` data hours per second. Longer gaps are
/// additionally divided by `multiplier` and capped at `max_seconds`.
pub fn segment_duration(gap_hours: f64, step_rate: f64, multiplier: f64, max_seconds: f64) -> f64 {
    if gap_hours <= HOURS_PER_DAY {
        gap_hours / step_rate
    } else {
        (gap_hours / (step_rate * multiplier)).min(max_seconds)
    }
}

// ---------------------------------------------------------------------------
// Playback engine
// ---------------------------------------------------------------------------

/// Tick-driven playback state machine over a [`TimeSeriesStore`].
///
/// The caller owns cadence: it calls [`tick`](Self::tick) once per scheduled
/// step and honours [`Emission::next_tick_in`]. An empty active series makes
/// every tick a no-op.
#[derive(Debug, Clone)]
pub struct PlaybackEngine {
    store: Arc<TimeSeriesStore>,
    config: PlaybackConfig,
    mode: PlaybackMode,
    index: usize,
    progress: f64,          // [0, 1), extended mode only
    segment_duration: f64,  // s
    step_rate: f64,         // records/s (primary) or data hours/s (extended)
    trail: Trail,
}

impl PlaybackEngine {
    /// Build an engine in primary mode. Rejects configs that would stall
    /// playback (zero or non-finite rates, inverted window).
    pub fn new(store: Arc<TimeSeriesStore>, config: PlaybackConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(store, config))
    }

    pub fn with_defaults(store: Arc<TimeSeriesStore>) -> Self {
        Self::build(store, PlaybackConfig::default())
    }

    fn build(store: Arc<TimeSeriesStore>, config: PlaybackConfig) -> Self {
        let trail = Trail::new(config.trail_capacity, config.trail_min_spacing);
        Self {
            store,
            mode: PlaybackMode::Primary,
            index: 0,
            progress: 0.0,
            segment_duration: IDLE_SEGMENT_SECONDS,
            step_rate: config.primary_step_rate,
            trail,
            config,
        }
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn mode_label(&self) -> &'static str {
        self.mode.toggle_label()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn segment_duration(&self) -> f64 {
        self.segment_duration
    }

    pub fn step_rate(&self) -> f64 {
        self.step_rate
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn store(&self) -> &TimeSeriesStore {
        &self.store
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Records of the active mode.
    pub fn active_sequence(&self) -> &[OrbitalElementRecord] {
        match self.mode {
            PlaybackMode::Primary => self.store.primary(),
            PlaybackMode::Extended => self.store.extended(),
        }
    }

    /// Switch between primary and extended playback and restart from the
    /// first record with an empty trail.
    pub fn toggle_mode(&mut self) -> PlaybackMode {
        self.mode = self.mode.toggled();
        self.index = 0;
        self.progress = 0.0;
        self.trail.clear();
        self.step_rate = match self.mode {
            PlaybackMode::Primary => self.config.primary_step_rate,
            PlaybackMode::Extended => self.config.extended_step_rate,
        };
        self.update_segment_duration();
        log::info!("Switched to {} mode", self.mode.name());
        self.mode
    }

    /// Advance one step. `delta_seconds` is the host frame time and only
    /// matters in extended mode.
    pub fn tick(&mut self, delta_seconds: f64) -> Option<Emission> {
        match self.mode {
            PlaybackMode::Primary => self.tick_primary(),
            PlaybackMode::Extended => self.tick_extended(delta_seconds.max(0.0)),
        }
    }

    fn tick_primary(&mut self) -> Option<Emission> {
        let len = self.store.primary().len();
        if len == 0 {
            return None;
        }

        let record = self.store.primary()[self.index];
        let emission = self.emit(record, record.position(), None, 1.0 / self.step_rate);

        self.index += 1;
        if self.index >= len {
            self.index = 0;
            self.trail.clear();
            log::debug!("Primary series finished, looping");
        }

        Some(emission)
    }

    fn tick_extended(&mut self, dt: f64) -> Option<Emission> {
        let len = self.store.extended().len();
        if len < 2 {
            return None;
        }

        let current = self.store.extended()[self.index];
        let next = self.store.extended()[self.index + 1];

        let position = interpolate(&current, &next, self.progress);
        let segment = SegmentInfo {
            next_timestamp: next.timestamp,
            gap_days: current.hours_until(&next) / HOURS_PER_DAY,
            progress: self.progress,
        };
        let emission = self.emit(current, position, Some(segment), 0.0);

        // Zero or negative gaps are crossed in a single tick
        self.progress = if self.segment_duration > 0.0 {
            self.progress + dt / self.segment_duration
        } else {
            1.0
        };

        if self.progress >= 1.0 {
            self.index += 1;
            self.progress = 0.0;
            if self.index >= len - 1 {
                self.index = 0;
                self.trail.clear();
                log::debug!("Extended series finished, looping");
            }
            self.update_segment_duration();
        }

        Some(emission)
    }

    fn update_segment_duration(&mut self) {
        let seq = self.store.extended();
        if self.mode != PlaybackMode::Extended || seq.len() < 2 || self.index >= seq.len() - 1 {
            self.segment_duration = IDLE_SEGMENT_SECONDS;
            return;
        }

        let gap_hours = seq[self.index].hours_until(&seq[self.index + 1]);
        self.segment_duration = segment_duration(
            gap_hours,
            self.step_rate,
            self.config.extended_speed_multiplier,
            self.config.max_interpolation_seconds,
        );
        log::debug!(
            "Gap: {:.1} hours, interpolation duration: {:.2} seconds",
            gap_hours,
            self.segment_duration
        );
    }

    fn emit(
        &mut self,
        record: OrbitalElementRecord,
        position: Vec3,
        segment: Option<SegmentInfo>,
        next_tick_in: f64,
    ) -> Emission {
        let display_position = position * self.config.display_scale;
        let heading = self
            .trail
            .last()
            .map_or_else(Vec3::zeros, |last| (display_position - last).normalize_or_zero());
        self.trail.push(display_position);

        Emission {
            mode: self.mode,
            index: self.index,
            record,
            position,
            display_position,
            heading,
            segment,
            next_tick_in,
        }
    }
}
