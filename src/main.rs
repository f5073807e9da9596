use eframe::egui;

use satchart::chart::SatChart;
use satchart::config::ChartOptions;
use satchart::data::Satellite;

fn main() {
    env_logger::init();

    let data = match std::env::args().nth(1) {
        Some(path) => match load_dataset(&path) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("satchart: {}", e);
                std::process::exit(1);
            }
        },
        None => sample_system(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([900.0, 620.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SatChart",
        options,
        Box::new(|_cc| Ok(Box::new(ChartApp::new(data)))),
    )
    .expect("Failed to start satchart");
}

/// Read a satellite tree from a JSON file.
fn load_dataset(path: &str) -> Result<Satellite, String> {
    let text = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?;
    serde_json::from_str(&text).map_err(|e| format!("{}: {}", path, e))
}

/// Built-in demo dataset, values on the default 0–10 range.
fn sample_system() -> Satellite {
    Satellite::with_satellites(
        "Sol",
        6.2,
        vec![
            Satellite::new("Mercury", 2.1),
            Satellite::new("Venus", 4.4),
            Satellite::with_satellites("Earth", 8.3, vec![Satellite::new("Luna", 7.0)]),
            Satellite::with_satellites(
                "Mars",
                5.6,
                vec![Satellite::new("Phobos", 3.2), Satellite::new("Deimos", 6.8)],
            ),
            Satellite::with_satellites(
                "Jupiter",
                9.1,
                vec![
                    Satellite::new("Io", 1.4),
                    Satellite::new("Europa", 8.8),
                    Satellite::new("Ganymede", 6.1),
                    Satellite::new("Callisto", 4.9),
                ],
            ),
        ],
    )
}

struct ChartApp {
    data: Satellite,
    intervaled: bool,
    chart: Option<SatChart>,
    built_for: egui::Vec2,
}

impl ChartApp {
    fn new(data: Satellite) -> Self {
        Self {
            data,
            intervaled: false,
            chart: None,
            built_for: egui::Vec2::ZERO,
        }
    }

    fn rebuild(&mut self, size: egui::Vec2) {
        let options = ChartOptions {
            intervaled_values: self.intervaled,
            ..Default::default()
        };
        match SatChart::new(self.data.clone(), options, (size.x, size.y)) {
            Ok(chart) => {
                log::info!("built chart for {:.0}x{:.0}", size.x, size.y);
                self.chart = Some(chart);
                self.built_for = size;
            }
            Err(e) => {
                log::error!("chart construction failed: {}", e);
                self.chart = None;
                self.built_for = size;
            }
        }
    }
}

impl eframe::App for ChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Replay").clicked() {
                    if let Some(chart) = &mut self.chart {
                        chart.replay();
                    }
                }
                if ui
                    .checkbox(&mut self.intervaled, "Stepped color scale")
                    .changed()
                {
                    self.chart = None;
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let size = ui.available_size();
            // Geometry is immutable per chart instance; a resized panel
            // gets a freshly derived chart.
            if self.chart.is_none() || (size - self.built_for).length() > 1.0 {
                self.rebuild(size);
            }
            if let Some(chart) = &mut self.chart {
                chart.show(ui);
            }
        });
    }
}
