// Sync Code Countdown
// Main entry point

use anyhow::{anyhow, Result};
use sync_code_countdown::models::settings::CountdownSettings;
use sync_code_countdown::services::settings::SettingsService;
use sync_code_countdown::ui_egui::CountdownApp;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Sync Code Countdown");

    let settings = match SettingsService::with_default_path() {
        Ok(service) => {
            log::info!("Loading settings from {}", service.path().display());
            service.load_or_default()
        }
        Err(e) => {
            log::warn!("Failed to locate settings: {}, using defaults", e);
            CountdownSettings::default()
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 180.0])
            .with_min_inner_size([320.0, 140.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sync Code Countdown",
        options,
        Box::new(move |cc| Ok(Box::new(CountdownApp::new(cc, settings)))),
    )
    .map_err(|e| anyhow!("countdown window failed: {}", e))
}
