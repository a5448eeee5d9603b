//! Launcher window and its `WindowSystem` adapter

mod app;
pub mod window;

pub use app::LauncherWindowApp;
pub use window::{EguiWindows, WindowCommand, MAIN_WINDOW};

use crate::app::AppEvent;
use crate::config::LauncherConfig;
use crate::tray::build_tray;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Run the launcher window on the current (main) thread until it quits.
pub fn run_launcher_window(
    config: &LauncherConfig,
    windows: EguiWindows,
    events_tx: mpsc::UnboundedSender<AppEvent>,
    with_tray: bool,
) -> anyhow::Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&config.window.title)
            .with_inner_size([config.window.width, config.window.height]),
        ..Default::default()
    };

    let app_name = config.window.title.clone();
    let config = config.clone();
    eframe::run_native(
        &app_name,
        native_options,
        Box::new(move |cc| {
            windows.attach(cc.egui_ctx.clone());

            let tray = if with_tray {
                match build_tray(&config.tray) {
                    Ok(tray) => Some(tray),
                    Err(e) => {
                        warn!("Failed to create tray icon: {}. Continuing without tray.", e);
                        None
                    },
                }
            } else {
                None
            };

            info!("Launcher window created");
            let _ = events_tx.send(AppEvent::WindowReady);
            Ok(Box::new(LauncherWindowApp::new(&config, windows, tray)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Launcher window failed: {}", e))
}
