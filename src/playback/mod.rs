pub mod config;
pub mod emission;
pub mod engine;
pub mod runner;
pub mod trail;

pub use config::PlaybackConfig;
pub use emission::{Emission, LogSink, PositionSink, SegmentInfo, TrajectoryRecorder};
pub use engine::{segment_duration, PlaybackEngine, PlaybackMode};
pub use runner::{run_playback, PlaybackClock, PlaybackStats, RunConfig};
pub use trail::Trail;
