//! Tray icon construction and menu event forwarding

use super::icons::{generate_icon_bytes, ICON_SIZE};
use super::TrayCommand;
use crate::app::AppEvent;
use crate::config::TrayConfig;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Build the tray icon and its menu.
///
/// Must run on the UI thread after the event loop has started (macOS
/// requirement). The returned icon disappears when dropped.
pub fn build_tray(config: &TrayConfig) -> anyhow::Result<tray_icon::TrayIcon> {
    let icon = tray_icon::Icon::from_rgba(generate_icon_bytes(), ICON_SIZE, ICON_SIZE)
        .map_err(|e| anyhow::anyhow!("Failed to create icon: {}", e))?;

    let menu = muda::Menu::new();
    menu.append(&muda::MenuItem::with_id(TrayCommand::OPEN_APP_ID, "Open App", true, None))?;
    menu.append(&muda::PredefinedMenuItem::separator())?;
    menu.append(&muda::MenuItem::with_id(TrayCommand::QUIT_ID, "Quit", true, None))?;

    let tray = tray_icon::TrayIconBuilder::new()
        .with_icon(icon)
        .with_tooltip(&config.tooltip)
        .with_menu(Box::new(menu))
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to create tray icon: {}", e))?;

    debug!("System tray icon created");
    Ok(tray)
}

/// Background thread turning tray menu clicks into [`AppEvent`]s
pub struct MenuForwarder {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl MenuForwarder {
    pub fn start(events_tx: mpsc::UnboundedSender<AppEvent>) -> anyhow::Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let thread = std::thread::Builder::new()
            .name("tray-menu".to_string())
            .spawn(move || {
                let menu_channel = muda::MenuEvent::receiver();
                while !stop_flag.load(Ordering::Relaxed) {
                    let event = match menu_channel.recv_timeout(Duration::from_millis(100)) {
                        Ok(event) => event,
                        Err(crossbeam::channel::RecvTimeoutError::Timeout) => continue,
                        Err(crossbeam::channel::RecvTimeoutError::Disconnected) => break,
                    };

                    debug!("Menu event: {:?}", event.id);
                    let Some(command) = TrayCommand::from_menu_id(event.id.as_ref()) else {
                        debug!("Unknown menu item: {:?}", event.id);
                        continue;
                    };
                    if events_tx.send(AppEvent::Tray(command)).is_err() {
                        break;
                    }
                }
                debug!("Tray menu forwarder stopped");
            })?;

        Ok(Self {
            stop,
            thread: Some(thread),
        })
    }

    pub fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("Tray menu thread panicked");
            }
        }
    }
}

impl Drop for MenuForwarder {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}
