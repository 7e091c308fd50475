#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use eframe::egui;

mod app;
mod demo_scene;
mod edge_canvas;
mod edge_painter;
mod settings;

use app::EdgeCanvasApp;
use codestory_graph::EdgeItemSettings;
use settings::AppSettings;

fn main() -> eframe::Result<()> {
    // Log to stdout (if you run with `RUST_LOG=debug`).
    tracing_subscriber::fmt::init();

    let mut settings = AppSettings::load();
    // Optional edge settings file overriding the stored ones
    if let Some(path) = std::env::args_os().nth(1) {
        match EdgeItemSettings::load(std::path::Path::new(&path)) {
            Ok(edge) => settings.edge = edge,
            Err(e) => tracing::error!("{}", e),
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.window_width, settings.window_height]),
        ..Default::default()
    };

    eframe::run_native(
        "CodeStory Edges",
        options,
        Box::new(|cc| Ok(Box::new(EdgeCanvasApp::new(cc, settings)))),
    )
}
