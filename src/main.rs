mod app;
mod color;
mod data;
mod state;
mod tween;
mod ui;

use std::path::PathBuf;

use app::UniviewApp;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional dataset path as the only positional argument; otherwise the
    // user loads one via File → Open…
    let startup_file: Option<PathBuf> = std::env::args().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Uniview – University Rankings",
        options,
        Box::new(move |_cc| {
            let mut state = AppState::default();
            if let Some(path) = &startup_file {
                ui::panels::load_dataset(&mut state, path, 0.0);
            }
            Ok(Box::new(UniviewApp::new(state)))
        }),
    )
}
