//! Contract Console: a desktop console for calling arbitrary smart
//! contracts from a user-supplied ABI.

use eframe::egui;

mod app;
mod state;
mod ui;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting Contract Console");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Contract Console")
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Contract Console",
        native_options,
        Box::new(|cc| Ok(Box::new(app::App::new(cc)))),
    )
}
