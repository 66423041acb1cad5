use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::error::RowError;
use crate::orbital::OrbitalElementRecord;

/// Minimum number of comma-separated fields in a data row.
pub const MIN_FIELDS: usize = 9;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%b-%d %H:%M:%S%.f",
    "%Y-%b-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y-%b-%d", "%m/%d/%Y"];

/// Parse one data row:
/// `epoch_jd, timestamp, a_au, e, i_deg, raan_deg, argp_deg, M_deg, v_deg`.
///
/// Fields beyond the ninth are ignored.
pub fn parse_row(line: &str) -> Result<OrbitalElementRecord, RowError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < MIN_FIELDS {
        return Err(RowError::TooFewFields { found: fields.len() });
    }

    Ok(OrbitalElementRecord {
        epoch_jd: parse_number(fields[0], "epoch_jd")?,
        timestamp: parse_timestamp(fields[1])?,
        sma_au: parse_number(fields[2], "sma_au")?,
        ecc: parse_number(fields[3], "ecc")?,
        inc_deg: parse_number(fields[4], "inc_deg")?,
        raan_deg: parse_number(fields[5], "raan_deg")?,
        argp_deg: parse_number(fields[6], "argp_deg")?,
        mean_anom_deg: parse_number(fields[7], "mean_anom_deg")?,
        true_anom_deg: parse_number(fields[8], "true_anom_deg")?,
    })
}

fn parse_number(field: &str, column: &'static str) -> Result<f64, RowError> {
    field.parse::<f64>().map_err(|_| RowError::InvalidNumber {
        column,
        value: field.to_string(),
    })
}

/// Parse an ISO-8601-like timestamp. Values without an offset are UTC.
pub fn parse_timestamp(field: &str) -> Result<DateTime<Utc>, RowError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(field) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(field, fmt) {
            return Ok(naive.and_utc());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(field, fmt) {
            return Ok(date.and_time(NaiveTime::MIN).and_utc());
        }
    }
    Err(RowError::InvalidTimestamp {
        value: field.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const ROW: &str =
        "2458156.5,2018-02-07 00:00:00,1.3254,0.2560,1.0777,317.0,177.5,0.48,1.21";

    #[test]
    fn parses_full_row() {
        let r = parse_row(ROW).unwrap();
        assert_eq!(r.epoch_jd, 2_458_156.5);
        assert_eq!(r.timestamp, Utc.with_ymd_and_hms(2018, 2, 7, 0, 0, 0).unwrap());
        assert_eq!(r.sma_au, 1.3254);
        assert_eq!(r.ecc, 0.2560);
        assert_eq!(r.true_anom_deg, 1.21);
    }

    #[test]
    fn tolerates_spaces_and_extra_columns() {
        let row = " 2458156.5 , 2018-02-07T06:30:00 , 1.3 , 0.2 , 1 , 2 , 3 , 4 , 5 , extra";
        let r = parse_row(row).unwrap();
        assert_eq!(r.timestamp, Utc.with_ymd_and_hms(2018, 2, 7, 6, 30, 0).unwrap());
        assert_eq!(r.mean_anom_deg, 4.0);
    }

    #[test]
    fn too_few_fields() {
        assert_eq!(
            parse_row("2458156.5,2018-02-07,1.3"),
            Err(RowError::TooFewFields { found: 3 })
        );
    }

    #[test]
    fn non_numeric_field_names_column() {
        let row = "2458156.5,2018-02-07,1.3,abc,1,2,3,4,5";
        match parse_row(row) {
            Err(RowError::InvalidNumber { column, value }) => {
                assert_eq!(column, "ecc");
                assert_eq!(value, "abc");
            }
            other => panic!("expected InvalidNumber, got {:?}", other),
        }
    }

    #[test]
    fn bad_timestamp() {
        let row = "2458156.5,not-a-date,1.3,0.2,1,2,3,4,5";
        assert!(matches!(parse_row(row), Err(RowError::InvalidTimestamp { .. })));
    }

    #[test]
    fn timestamp_formats() {
        let midnight = Utc.with_ymd_and_hms(2019, 10, 8, 0, 0, 0).unwrap();
        for s in [
            "2019-10-08",
            "2019-10-08 00:00",
            "2019-10-08T00:00:00",
            "2019-10-08T00:00:00Z",
            "2019-10-08T02:00:00+02:00",
            "2019-Oct-08 00:00:00.0000",
            "10/08/2019 00:00:00",
        ] {
            assert_eq!(parse_timestamp(s).unwrap(), midnight, "format {:?}", s);
        }
    }
}
