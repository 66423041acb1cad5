use chrono::{DateTime, Utc};

use super::kepler::compute_position;
use crate::types::Vec3;

/// One time-stamped set of classical orbital elements (heliocentric).
///
/// Values are stored exactly as ingested; nothing here checks physical bounds,
/// so an eccentricity of 1.3 or a negative semi-major axis passes through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElementRecord {
    pub epoch_jd: f64,             // Julian day
    pub timestamp: DateTime<Utc>,
    pub sma_au: f64,               // semi-major axis, AU
    pub ecc: f64,                  // eccentricity
    pub inc_deg: f64,              // inclination, deg
    pub raan_deg: f64,             // longitude of ascending node, deg
    pub argp_deg: f64,             // argument of periapsis, deg
    pub mean_anom_deg: f64,        // mean anomaly, deg
    pub true_anom_deg: f64,        // true anomaly, deg
}

impl OrbitalElementRecord {
    /// Heliocentric position for these elements, thousands of km.
    pub fn position(&self) -> Vec3 {
        compute_position(
            self.sma_au,
            self.ecc,
            self.inc_deg,
            self.raan_deg,
            self.argp_deg,
            self.true_anom_deg,
        )
    }

    /// Signed hours from `self` to `later`.
    pub fn hours_until(&self, later: &OrbitalElementRecord) -> f64 {
        (later.timestamp - self.timestamp).num_milliseconds() as f64 / 3_600_000.0
    }

    /// Multi-line human readable dump of the elements.
    pub fn formatted(&self) -> String {
        format!(
            "Date (UTC): {}\n\
             Semi-major Axis: {:.6} AU\n\
             Eccentricity: {:.6}\n\
             Inclination: {:.2}°\n\
             Long. of Asc. Node: {:.2}°\n\
             Arg. of Periapsis: {:.2}°\n\
             Mean Anomaly: {:.2}°\n\
             True Anomaly: {:.2}°",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.sma_au,
            self.ecc,
            self.inc_deg,
            self.raan_deg,
            self.argp_deg,
            self.mean_anom_deg,
            self.true_anom_deg,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record_at(day: u32, hour: u32) -> OrbitalElementRecord {
        OrbitalElementRecord {
            epoch_jd: 2_458_156.5,
            timestamp: Utc.with_ymd_and_hms(2018, 2, day, hour, 0, 0).unwrap(),
            sma_au: 1.32,
            ecc: 0.256,
            inc_deg: 1.08,
            raan_deg: 317.0,
            argp_deg: 177.0,
            mean_anom_deg: 0.5,
            true_anom_deg: 1.2,
        }
    }

    #[test]
    fn hours_between_records() {
        let a = record_at(7, 0);
        let b = record_at(8, 6);
        assert!((a.hours_until(&b) - 30.0).abs() < 1e-9);
        assert!((b.hours_until(&a) + 30.0).abs() < 1e-9);
    }

    #[test]
    fn formatted_lists_every_element() {
        let text = record_at(7, 0).formatted();
        assert!(text.starts_with("Date (UTC): 2018-02-07 00:00:00"));
        assert!(text.contains("Semi-major Axis: 1.320000 AU"));
        assert!(text.contains("Long. of Asc. Node: 317.00°"));
        assert!(text.contains("True Anomaly: 1.20°"));
        assert_eq!(text.lines().count(), 8);
    }
}
