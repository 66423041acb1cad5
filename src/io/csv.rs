use std::io::{self, Write};
use std::path::Path;

use crate::playback::Emission;

/// Write recorded emissions to CSV format.
///
/// Columns: mode, index, date_utc, x_tkm, y_tkm, z_tkm,
///          display_x, display_y, display_z, radius_au,
///          next_date_utc, gap_days, progress
pub fn write_emissions<W: Write>(writer: &mut W, emissions: &[Emission]) -> io::Result<()> {
    writeln!(
        writer,
        "mode,index,date_utc,x_tkm,y_tkm,z_tkm,\
         display_x,display_y,display_z,radius_au,\
         next_date_utc,gap_days,progress"
    )?;

    for e in emissions {
        let (next, gap, progress) = match &e.segment {
            Some(s) => (
                s.next_timestamp.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
                format!("{:.4}", s.gap_days),
                format!("{:.4}", s.progress),
            ),
            None => (String::new(), String::new(), String::new()),
        };
        writeln!(
            writer,
            "{},{},{},{:.3},{:.3},{:.3},\
             {:.5},{:.5},{:.5},{:.6},\
             {},{},{}",
            e.mode.name(),
            e.index,
            e.record.timestamp.format("%Y-%m-%dT%H:%M:%SZ"),
            e.position.x, e.position.y, e.position.z,
            e.display_position.x, e.display_position.y, e.display_position.z,
            e.radius_au(),
            next, gap, progress,
        )?;
    }

    Ok(())
}

/// Write emissions to a CSV file at the given path.
pub fn write_emissions_file(path: impl AsRef<Path>, emissions: &[Emission]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_emissions(&mut file, emissions)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::playback::{PlaybackConfig, PlaybackEngine};
    use crate::series::TimeSeriesStore;

    #[test]
    fn csv_output_has_header_and_rows() {
        let text = "header\n\
            2458156.5,2020-01-01,1.0,0.0,0.0,0.0,0.0,0.0,0.0\n\
            2458157.5,2020-01-02,1.0,0.0,0.0,0.0,0.0,0.0,90.0\n";
        let store = TimeSeriesStore::from_csv_str(text, &Default::default()).unwrap();
        let mut engine = PlaybackEngine::new(Arc::new(store), PlaybackConfig::default()).unwrap();
        engine.toggle_mode();
        let emissions: Vec<_> = (0..2).filter_map(|_| engine.tick(0.05)).collect();

        let mut buf = Vec::new();
        write_emissions(&mut buf, &emissions).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with("mode,index,"));
        assert_eq!(lines.len(), 3); // header + 2 data rows
        assert!(lines[1].starts_with("Extended,0,2020-01-01T00:00:00Z,149597.871,0.000,0.000,"));
        assert!(lines[1].contains(",1.000000,2020-01-02T00:00:00Z,1.0000,0.0000"));
    }
}
