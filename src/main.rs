#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

// When compiling natively:
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    use std::path::Path;

    use image_labeler::config::CONFIG_FILE_NAME;
    use image_labeler::{EditorConfig, LabelerApp};

    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = EditorConfig::load_or_default(Path::new(CONFIG_FILE_NAME));
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Image Labeler")
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([640.0, 420.0])
            // Needed for the framebuffer to keep alpha during exports
            .with_transparent(true),
        ..Default::default()
    };
    eframe::run_native(
        "Image Labeler",
        native_options,
        Box::new(|cc| Ok(Box::new(LabelerApp::new(cc, config)))),
    )
}

// The editor only ships as a desktop app.
#[cfg(target_arch = "wasm32")]
fn main() {}
