//! GilRs gamepad event source
//!
//! gilrs is polled on a dedicated OS thread (it is not `Send`) and every
//! notification is handed to a callback as a [`GamepadEvent`].

use super::buttons::gilrs_button_to_name;
use anyhow::Result;
use gilrs::{Button, Event, EventType, Gilrs};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Notification emitted by the gamepad source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GamepadEvent {
    /// Source initialized and ready to deliver button events
    Init,
    ButtonDown(String),
    ButtonUp(String),
    /// Non-fatal condition (controller disconnected, ...)
    Warning(String),
    /// Source failure; no further events will follow
    Error(String),
}

/// Callback type for gamepad events
pub type EventCallback = Arc<dyn Fn(GamepadEvent) + Send + Sync>;

/// GilRs-based gamepad source running on its own thread
pub struct GilrsProvider {
    shutdown_tx: Option<crossbeam::channel::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl GilrsProvider {
    /// Spawn the polling thread. Events are delivered in the order gilrs
    /// reports them.
    pub fn start(callback: EventCallback) -> Result<Self> {
        let (shutdown_tx, shutdown_rx) = crossbeam::channel::bounded::<()>(1);

        let thread = std::thread::Builder::new()
            .name("gamepad".to_string())
            .spawn(move || Self::event_loop_blocking(callback, shutdown_rx))?;

        Ok(Self {
            shutdown_tx: Some(shutdown_tx),
            thread: Some(thread),
        })
    }

    /// Main event loop (runs in dedicated blocking thread)
    fn event_loop_blocking(callback: EventCallback, shutdown_rx: crossbeam::channel::Receiver<()>) {
        let mut gilrs = match Gilrs::new() {
            Ok(g) => g,
            Err(e) => {
                callback(GamepadEvent::Error(format!("Failed to initialize gilrs: {}", e)));
                return;
            },
        };

        for (id, gamepad) in gilrs.gamepads().filter(|(_, gp)| gp.is_connected()) {
            info!("Gamepad {:?}: \"{}\"", id, gamepad.name());
        }
        callback(GamepadEvent::Init);

        loop {
            match shutdown_rx.try_recv() {
                Ok(()) | Err(crossbeam::channel::TryRecvError::Disconnected) => {
                    info!("Gamepad source shutting down");
                    break;
                },
                Err(crossbeam::channel::TryRecvError::Empty) => {},
            }

            while let Some(Event { id, event, .. }) = gilrs.next_event() {
                let name = gilrs.gamepad(id).name().to_string();
                if let Some(gamepad_event) = convert_event(event, &name) {
                    debug!("Gamepad event: {:?}", gamepad_event);
                    callback(gamepad_event);
                }
            }

            // Sleep briefly to avoid busy-waiting
            std::thread::sleep(Duration::from_millis(4));
        }
    }

    /// Stop the polling thread and wait for it to exit
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.try_send(());
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("Gamepad thread panicked");
            }
        }
    }
}

impl Drop for GilrsProvider {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.try_send(());
        }
    }
}

/// Convert a gilrs event to a source notification
fn convert_event(event: EventType, gamepad_name: &str) -> Option<GamepadEvent> {
    match event {
        EventType::ButtonPressed(button, _) => button_event(button, true),
        EventType::ButtonReleased(button, _) => button_event(button, false),
        EventType::Connected => {
            info!("Gamepad connected: \"{}\"", gamepad_name);
            None
        },
        EventType::Disconnected => Some(GamepadEvent::Warning(format!(
            "Gamepad disconnected: \"{}\"",
            gamepad_name
        ))),
        _ => None,
    }
}

fn button_event(button: Button, pressed: bool) -> Option<GamepadEvent> {
    let name = gilrs_button_to_name(button)?.to_string();
    Some(if pressed {
        GamepadEvent::ButtonDown(name)
    } else {
        GamepadEvent::ButtonUp(name)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_event_press_and_release() {
        assert_eq!(
            button_event(Button::Start, true),
            Some(GamepadEvent::ButtonDown("start".to_string()))
        );
        assert_eq!(
            button_event(Button::Select, false),
            Some(GamepadEvent::ButtonUp("back".to_string()))
        );
    }

    #[test]
    fn test_unmapped_button_dropped() {
        assert_eq!(button_event(Button::Unknown, true), None);
    }

    #[test]
    fn test_disconnect_becomes_warning() {
        match convert_event(EventType::Disconnected, "Pad") {
            Some(GamepadEvent::Warning(msg)) => assert!(msg.contains("Pad")),
            other => panic!("unexpected event: {:?}", other),
        }
        assert_eq!(convert_event(EventType::Connected, "Pad"), None);
    }
}
