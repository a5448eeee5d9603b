//! Event queue, dispatcher and application context
//!
//! Every producer (gamepad thread, tray menu thread, refocus timer, window)
//! pushes an [`AppEvent`] onto one queue; a single dispatcher task applies
//! them in order.

pub mod context;
pub mod dispatcher;

pub use context::AppContext;
pub use dispatcher::Dispatcher;

use crate::input::GamepadEvent;
use crate::tray::TrayCommand;

/// Everything the dispatcher reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Gamepad(GamepadEvent),
    Tray(TrayCommand),
    /// The window system finished starting up
    WindowReady,
    /// Refocus delay after a kill elapsed
    RefocusWindow,
    /// Stop dispatching and close the window (Ctrl+C, teardown)
    Shutdown,
}
