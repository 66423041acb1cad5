use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::series::SeriesWindow;

// ---------------------------------------------------------------------------
// Playback configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub primary_step_rate: f64,          // records per second (1 record ≈ 1 hour of data)
    pub extended_step_rate: f64,         // data hours per second while interpolating
    pub extended_speed_multiplier: f64,  // extra compression for gaps > 24 h
    pub max_interpolation_seconds: f64,  // wall-clock cap per interpolated segment, s
    pub trail_capacity: usize,           // points kept in the trail
    pub trail_min_spacing: f64,          // display units between trail points
    pub display_scale: f64,              // display units per thousand km
    pub window: SeriesWindow,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            primary_step_rate: 24.0,         // one day of hourly records per second
            extended_step_rate: 240.0,       // 10x
            extended_speed_multiplier: 1.0,
            max_interpolation_seconds: 5.0,
            trail_capacity: 20,
            trail_min_spacing: 0.1,
            display_scale: 0.000_09,
            window: SeriesWindow::default(),
        }
    }
}

impl PlaybackConfig {
    /// Parse a JSON document; missing keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("primary_step_rate", self.primary_step_rate)?;
        positive("extended_step_rate", self.extended_step_rate)?;
        positive("extended_speed_multiplier", self.extended_speed_multiplier)?;
        positive("max_interpolation_seconds", self.max_interpolation_seconds)?;
        non_negative("trail_min_spacing", self.trail_min_spacing)?;
        non_negative("display_scale", self.display_scale)?;
        if self.window.start > self.window.end {
            return Err(ConfigError::Invalid {
                field: "window",
                reason: format!("start {} is after end {}", self.window.start, self.window.end),
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be positive and finite, got {}", value),
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be non-negative and finite, got {}", value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn defaults_are_valid() {
        let c = PlaybackConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.trail_capacity, 20);
        assert_eq!(c.window.end, NaiveDate::from_ymd_opt(2019, 10, 8).unwrap());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let c = PlaybackConfig::from_json_str(
            r#"{ "max_interpolation_seconds": 2.5, "window": { "end": "2019-12-31" } }"#,
        )
        .unwrap();
        assert_eq!(c.max_interpolation_seconds, 2.5);
        assert_eq!(c.primary_step_rate, 24.0);
        assert_eq!(c.window.start, NaiveDate::from_ymd_opt(2018, 2, 7).unwrap());
        assert_eq!(c.window.end, NaiveDate::from_ymd_opt(2019, 12, 31).unwrap());
    }

    #[test]
    fn rejects_zero_rate() {
        let err = PlaybackConfig::from_json_str(r#"{ "primary_step_rate": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "primary_step_rate", .. }));
    }

    #[test]
    fn rejects_inverted_window() {
        let err = PlaybackConfig::from_json_str(
            r#"{ "window": { "start": "2020-01-01", "end": "2019-01-01" } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "window", .. }));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            PlaybackConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
