pub mod elements;
pub mod interpolation;
pub mod kepler;

pub use elements::OrbitalElementRecord;
pub use interpolation::interpolate;
pub use kepler::{compute_position, true_to_mean_anomaly};
