//! Application context: owns the event queue, the gamepad source, the tray
//! menu forwarder and the dispatcher task

use super::{AppEvent, Dispatcher};
use crate::config::LauncherConfig;
use crate::input::gamepad::{EventCallback, GilrsProvider};
use crate::input::InputTracker;
use crate::launcher::{AppController, TokioProcessManager};
use crate::tray::MenuForwarder;
use crate::ui::EguiWindows;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Everything that runs beside the launcher window, with explicit
/// `start` / `shutdown`.
pub struct AppContext {
    events_tx: mpsc::UnboundedSender<AppEvent>,
    gamepad: Option<GilrsProvider>,
    tray_menu: Option<MenuForwarder>,
    dispatcher: Option<JoinHandle<()>>,
}

impl AppContext {
    /// Wire the gamepad source and tray menu into a dispatcher running on
    /// `runtime`.
    pub fn start(config: &LauncherConfig, windows: EguiWindows, with_tray: bool, runtime: &Handle) -> Result<Self> {
        let (events_tx, events_rx) = mpsc::unbounded_channel::<AppEvent>();

        let create_window = {
            let windows = windows.clone();
            Box::new(move || windows.show())
        };
        let controller = AppController::new(
            windows,
            TokioProcessManager,
            create_window,
            config.launch_targets.clone(),
            config.refocus_delay(),
            events_tx.clone(),
        );
        let dispatcher = Dispatcher::new(
            InputTracker::new(config.shortcut.clone()),
            controller,
            config.bindings.clone(),
            events_rx,
        );
        let dispatcher = runtime.spawn(dispatcher.run());

        let gamepad_tx = events_tx.clone();
        let callback: EventCallback = Arc::new(move |event| {
            let _ = gamepad_tx.send(AppEvent::Gamepad(event));
        });
        let gamepad = match GilrsProvider::start(callback) {
            Ok(provider) => Some(provider),
            Err(e) => {
                warn!("Failed to start gamepad source: {}. Continuing without gamepad.", e);
                None
            },
        };

        let tray_menu = if with_tray {
            Some(MenuForwarder::start(events_tx.clone())?)
        } else {
            None
        };

        let signal_tx = events_tx.clone();
        runtime.spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Ctrl+C received");
                let _ = signal_tx.send(AppEvent::Shutdown);
            }
        });

        info!("Application context started");
        Ok(Self {
            events_tx,
            gamepad,
            tray_menu,
            dispatcher: Some(dispatcher),
        })
    }

    /// Sender for injecting events into the dispatcher queue
    pub fn events(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.events_tx.clone()
    }

    /// Stop the producers, then let the dispatcher drain and exit.
    pub fn shutdown(mut self, runtime: &Handle) {
        info!("Shutting down...");

        if let Some(mut gamepad) = self.gamepad.take() {
            gamepad.shutdown();
        }
        if let Some(mut tray_menu) = self.tray_menu.take() {
            tray_menu.shutdown();
        }

        let _ = self.events_tx.send(AppEvent::Shutdown);
        if let Some(dispatcher) = self.dispatcher.take() {
            let joined = runtime.block_on(tokio::time::timeout(Duration::from_secs(2), dispatcher));
            if joined.is_err() {
                warn!("Dispatcher did not stop in time");
            }
        }

        info!("Shutdown complete");
    }
}
