#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod context;
mod dispatch;
mod helpers;
mod modules;
mod paths;
mod theme;

use clipper_core::ClassList;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> eframe::Result {
    let config = paths::ClipperConfig::from_env();

    // The class list is a startup precondition: without it there is nothing
    // to label, so refuse to open the window.
    let classes = match ClassList::load(&config.classes_path) {
        Ok(c)  => c,
        Err(e) => fatal(&e.to_string()),
    };
    if let Err(e) = clipper_media::init() {
        fatal(&format!("FFmpeg init failed: {e}"));
    }
    crate::clipper_log!(
        "[app] {} classes, output → {}",
        classes.len(), config.layout.root.display(),
    );

    let native_options = eframe::NativeOptions {
        centered: true,
        viewport: egui::ViewportBuilder::default()
            .with_title("Video Data Clipper")
            .with_inner_size([1200.0, 640.0])
            .with_min_inner_size([900.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Video Data Clipper",
        native_options,
        Box::new(|cc| Ok(Box::new(app::ClipperApp::new(cc, config, classes)))),
    )
}

/// Blocking error dialog, then exit(1).
fn fatal(msg: &str) -> ! {
    crate::clipper_log!("[app] fatal: {msg}");
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title("Error")
        .set_description(msg)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
    std::process::exit(1);
}
