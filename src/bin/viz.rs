use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints, Points};

use roadster_sim::playback::{Emission, PlaybackClock};
use roadster_sim::{PlaybackConfig, PlaybackEngine, TimeSeriesStore};

#[derive(Parser, Debug)]
#[command(name = "roadster-viz")]
#[command(about = "Live orbit playback viewer")]
struct Cli {
    /// CSV of orbital elements (header row first)
    input: PathBuf,

    /// JSON playback configuration
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PlaybackConfig::from_json_file(path).unwrap_or_else(|e| {
            log::error!("Ignoring config {:?}: {}", path, e);
            PlaybackConfig::default()
        }),
        None => PlaybackConfig::default(),
    };

    let store = TimeSeriesStore::from_csv_file(&cli.input, &config.window).unwrap_or_else(|e| {
        log::error!("Could not load {:?}: {}", cli.input, e);
        TimeSeriesStore::default()
    });
    let store = Arc::new(store);

    let engine = PlaybackEngine::new(Arc::clone(&store), config).unwrap_or_else(|e| {
        log::error!("Invalid playback configuration: {}", e);
        PlaybackEngine::with_defaults(store)
    });

    let app = PlaybackViz {
        engine,
        clock: PlaybackClock::new(),
        last: None,
    };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Roadster Orbit Playback", options, Box::new(|_| Ok(Box::new(app))))
}

struct PlaybackViz {
    engine: PlaybackEngine,
    clock: PlaybackClock,
    last: Option<Emission>,
}

impl eframe::App for PlaybackViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dt = ctx.input(|i| i.stable_dt) as f64;
        if let Some(emission) = self.clock.advance(&mut self.engine, dt) {
            self.last = Some(emission);
        }

        egui::SidePanel::left("elements").min_width(260.0).show(ctx, |ui| {
            ui.heading("Orbital data");
            if ui.button(self.engine.mode_label()).clicked() {
                self.engine.toggle_mode();
                self.clock.reset();
                self.last = None;
            }
            ui.separator();
            match &self.last {
                Some(e) => ui.monospace(e.describe()),
                None => ui.label("No data to play"),
            };
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            // Ecliptic plane view, display units
            let trail: PlotPoints = self.engine.trail().iter().map(|p| [p.x, p.y]).collect();
            let sun: PlotPoints = vec![[0.0, 0.0]].into();
            let body: PlotPoints = self
                .last
                .iter()
                .map(|e| [e.display_position.x, e.display_position.y])
                .collect();

            Plot::new("orbit")
                .data_aspect(1.0)
                .x_axis_label("x")
                .y_axis_label("y")
                .show(ui, |plot_ui| {
                    plot_ui.points(Points::new("Sun", sun).radius(6.0));
                    plot_ui.line(Line::new("Trail", trail));
                    plot_ui.points(Points::new("Body", body).radius(4.0));
                });
        });

        ctx.request_repaint();
    }
}
