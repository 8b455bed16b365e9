use eframe::egui;
use log::info;

mod app;
mod clipboard;
mod config;
mod dispatch;
mod download;
mod errors;
mod localizations;
mod models;
mod options;
mod session;
mod theme;
mod ui;
mod ytdlp;

use app::AdlApp;
use config::AppConfig;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env()?;
    info!("Saving downloads under {}", config.output_root.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 420.0])
            .with_min_inner_size([520.0, 380.0])
            .with_title("ADL | Video Downloader"),
        ..Default::default()
    };

    eframe::run_native(
        "ADL | Video Downloader",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Box::new(AdlApp::new(&cc.egui_ctx, config))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to start the window: {}", e))
}
