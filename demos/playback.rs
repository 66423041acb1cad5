use std::sync::Arc;

use roadster_sim::playback::{run_playback, LogSink, RunConfig};
use roadster_sim::{PlaybackEngine, SeriesWindow, TimeSeriesStore};

/// Synthetic Roadster-like elements: hourly after launch, then a sparse tail.
fn synthetic_csv() -> String {
    let mut csv = String::from("epoch_jd,date_utc,a_au,e,i_deg,raan_deg,argp_deg,M_deg,nu_deg\n");
    let jd0 = 2_458_156.5; // 2018-02-07
    for h in 0..72 {
        let day = h as f64 / 24.0;
        csv.push_str(&format!(
            "{},{},1.3254,0.2560,1.0777,317.0,177.5,{:.3},{:.3}\n",
            jd0 + day,
            chrono::NaiveDate::from_ymd_opt(2018, 2, 7).unwrap().and_hms_opt(0, 0, 0).unwrap()
                + chrono::Duration::hours(h),
            0.64 * day,
            0.95 * day,
        ));
    }
    for (k, days) in [0i64, 1, 3, 10, 11, 30].iter().enumerate() {
        let date =
            chrono::NaiveDate::from_ymd_opt(2019, 10, 9).unwrap() + chrono::Duration::days(*days);
        csv.push_str(&format!(
            "{},{} 00:00:00,1.3254,0.2560,1.0777,317.0,177.5,{:.1},{:.1}\n",
            2_458_765.5 + *days as f64,
            date,
            150.0 + 0.6 * *days as f64,
            170.0 + 0.5 * *days as f64 + k as f64 * 0.01,
        ));
    }
    csv
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let store = TimeSeriesStore::from_csv_str(&synthetic_csv(), &SeriesWindow::default())
        .expect("synthetic data is valid");
    let mut engine = PlaybackEngine::with_defaults(Arc::new(store));

    let run = RunConfig {
        duration: 6.0,
        frame_dt: 1.0 / 30.0,
        toggle_after: Some(2.0),
    };
    let stats = run_playback(&mut engine, &mut LogSink, &run);

    println!("=== Playback ===\n");
    println!("Frames:     {}", stats.frames);
    println!("Emissions:  {}", stats.emissions);
    println!("Final mode: {}", stats.final_mode.name());
    println!("Trail:      {} points", stats.trail_len);
}
