use serde::Serialize;

use super::emission::{Emission, PositionSink};
use super::engine::{PlaybackEngine, PlaybackMode};

// ---------------------------------------------------------------------------
// Host clock: frame deltas in, ticks out
// ---------------------------------------------------------------------------

/// Turns a stream of frame deltas into engine ticks.
///
/// Extended mode ticks every frame; primary mode waits `next_tick_in` between
/// ticks, carrying the remainder so the long-run rate matches the step rate.
#[derive(Debug, Clone, Default)]
pub struct PlaybackClock {
    wait: f64, // s until the next tick is due
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget any pending wait, e.g. after a mode toggle.
    pub fn reset(&mut self) {
        self.wait = 0.0;
    }

    /// Process one frame of `frame_dt` seconds.
    pub fn advance(&mut self, engine: &mut PlaybackEngine, frame_dt: f64) -> Option<Emission> {
        let emission = if self.wait <= 0.0 {
            let emission = engine.tick(frame_dt);
            let next = emission.as_ref().map_or(0.0, |e| e.next_tick_in);
            self.wait = (self.wait + next).max(0.0);
            emission
        } else {
            None
        };
        self.wait -= frame_dt;
        emission
    }
}

// ---------------------------------------------------------------------------
// Headless playback
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub duration: f64,             // wall-clock seconds to simulate
    pub frame_dt: f64,             // host frame time, s
    pub toggle_after: Option<f64>, // toggle mode once at this time, s
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            duration: 10.0,
            frame_dt: 1.0 / 60.0, // 60 fps
            toggle_after: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaybackStats {
    pub frames: usize,
    pub emissions: usize,
    pub toggles: usize,
    pub final_mode: PlaybackMode,
    pub final_index: usize,
    pub trail_len: usize,
}

/// Drive `engine` for `run.duration` seconds of host frames, sending every
/// emission to `sink`.
pub fn run_playback(
    engine: &mut PlaybackEngine,
    sink: &mut dyn PositionSink,
    run: &RunConfig,
) -> PlaybackStats {
    let n_frames = if run.frame_dt > 0.0 && run.duration > 0.0 {
        (run.duration / run.frame_dt).round() as usize
    } else {
        0
    };

    let mut clock = PlaybackClock::new();
    let mut emissions = 0;
    let mut toggles = 0;

    for frame in 0..n_frames {
        let time = frame as f64 * run.frame_dt;

        if let Some(at) = run.toggle_after {
            if toggles == 0 && time >= at {
                let mode = engine.toggle_mode();
                clock.reset();
                sink.mode_changed(mode);
                toggles += 1;
            }
        }

        if let Some(emission) = clock.advance(engine, run.frame_dt) {
            sink.emit(&emission);
            emissions += 1;
        }
    }

    PlaybackStats {
        frames: n_frames,
        emissions,
        toggles,
        final_mode: engine.mode(),
        final_index: engine.index(),
        trail_len: engine.trail().len(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
