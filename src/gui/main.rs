//! SQLite Explorer GUI

#![windows_subsystem = "windows"]

use eframe::egui;

mod app;
mod panels;
mod theme;

use app::ExplorerApp;

fn main() -> eframe::Result<()> {
    // Only init logger in debug builds (no console in release with windows subsystem)
    #[cfg(debug_assertions)]
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 600.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "SQLite Explorer",
        options,
        Box::new(|cc| Ok(Box::new(ExplorerApp::new(cc)))),
    )
}
