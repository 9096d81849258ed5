//! Banter - voice assistant session panel
//!
//! Main entry point for the Banter application.

use banter::ui::BanterApp;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "banter=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Banter session panel");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([400.0, 300.0])
            .with_title("Banter"),
        ..Default::default()
    };

    eframe::run_native(
        "Banter",
        options,
        Box::new(|cc| Ok(Box::new(BanterApp::new(cc)?))),
    )
}
