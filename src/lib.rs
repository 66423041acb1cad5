pub mod error;
pub mod io;
pub mod orbital;
pub mod playback;
pub mod series;
pub mod types;

pub use error::{ConfigError, LoadError, RowError};
pub use orbital::{compute_position, interpolate, true_to_mean_anomaly, OrbitalElementRecord};
pub use playback::{PlaybackConfig, PlaybackEngine, PlaybackMode};
pub use series::{SeriesWindow, TimeSeriesStore};
