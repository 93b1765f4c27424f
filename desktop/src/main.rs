mod app;
mod chart;
mod storage;

use app::MathQuizApp;
use eframe::egui;
use log::info;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Starting Math Quiz...");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([560.0, 720.0])
            .with_min_inner_size([420.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Math Learning App",
        options,
        Box::new(|cc| Ok(Box::new(MathQuizApp::new(cc)))),
    )
}
