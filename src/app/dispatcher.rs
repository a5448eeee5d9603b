//! Single consumer of the application event queue

use super::AppEvent;
use crate::config::ButtonBindings;
use crate::input::{GamepadEvent, InputTracker};
use crate::launcher::{AppController, ProcessManager, WindowSystem};
use crate::tray::TrayCommand;
use std::ops::ControlFlow;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Applies queued events to the input tracker and the controller, one at a
/// time, in arrival order.
pub struct Dispatcher<W, P> {
    tracker: InputTracker,
    controller: AppController<W, P>,
    bindings: ButtonBindings,
    events_rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl<W: WindowSystem, P: ProcessManager> Dispatcher<W, P> {
    pub fn new(
        tracker: InputTracker,
        controller: AppController<W, P>,
        bindings: ButtonBindings,
        events_rx: mpsc::UnboundedReceiver<AppEvent>,
    ) -> Self {
        Self {
            tracker,
            controller,
            bindings,
            events_rx,
        }
    }

    /// Process events until shutdown or until every sender is gone
    pub async fn run(mut self) {
        debug!("Dispatcher started");
        while let Some(event) = self.events_rx.recv().await {
            if self.handle(event).is_break() {
                break;
            }
        }
        debug!("Dispatcher stopped");
    }

    pub fn handle(&mut self, event: AppEvent) -> ControlFlow<()> {
        match event {
            AppEvent::Gamepad(event) => self.handle_gamepad(event),
            AppEvent::Tray(TrayCommand::OpenApp) => {
                info!("Tray: open app");
                self.controller.create_window();
            },
            AppEvent::Tray(TrayCommand::Quit) => {
                info!("Tray: quit");
                self.controller.quit();
                return ControlFlow::Break(());
            },
            AppEvent::WindowReady => info!("Window system is ready"),
            AppEvent::RefocusWindow => {
                if !self.controller.refocus_window() {
                    debug!("No window to refocus");
                }
            },
            AppEvent::Shutdown => {
                info!("Shutdown requested");
                self.controller.quit();
                return ControlFlow::Break(());
            },
        }
        ControlFlow::Continue(())
    }

    fn handle_gamepad(&mut self, event: GamepadEvent) {
        match event {
            GamepadEvent::Init => {
                info!("Gamepad source initialized");
                self.tracker.reset();
            },
            GamepadEvent::Warning(msg) => warn!("Gamepad warning: {}", msg),
            GamepadEvent::Error(msg) => error!("Gamepad error: {}", msg),
            GamepadEvent::ButtonUp(button) => self.tracker.button_up(&button),
            GamepadEvent::ButtonDown(button) => {
                if self.tracker.button_down(&button) {
                    let action = self.controller.run_shortcut();
                    debug!("Shortcut outcome: {:?}", action);
                }
                self.run_binding(&button);
            },
        }
    }

    fn run_binding(&mut self, button: &str) {
        if button == self.bindings.launch {
            info!("Button {} pressed, launching game!", button);
            if let Err(e) = self.controller.launch() {
                error!("Launch failed: {}", e);
            }
        } else if button == self.bindings.kill {
            info!("Button {} pressed, killing game!", button);
            if let Err(e) = self.controller.kill() {
                warn!("Kill failed: {}", e);
            }
        } else if button == self.bindings.inspect {
            self.controller.inspect();
        }
    }

    pub fn tracker(&self) -> &InputTracker {
        &self.tracker
    }

    pub fn controller(&self) -> &AppController<W, P> {
        &self.controller
    }
}
