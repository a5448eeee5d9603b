//! `WindowSystem` backed by the eframe root viewport
//!
//! The launcher has one window. Closing it minimizes it, which counts as "no
//! window open"; creating a window restores it. The dispatcher writes
//! commands here and the UI thread applies them on its next frame. The window
//! only counts as open again once a frame reports it restored.

use crate::launcher::{WindowId, WindowInfo, WindowSystem};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::sync::Arc;

/// Id of the single launcher window
pub const MAIN_WINDOW: WindowId = 1;

/// Command applied by the UI thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowCommand {
    Show,
    SetFullscreen(bool),
    Focus,
    Quit,
}

#[derive(Debug, Default, Clone, Copy)]
struct ViewportState {
    visible: bool,
    /// A restore was requested and no frame has confirmed it yet
    show_pending: bool,
    fullscreen: bool,
    focused: bool,
}

/// Viewport flags read by the UI thread at the start of a frame
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct ViewportObservation {
    pub minimized: Option<bool>,
    pub fullscreen: Option<bool>,
    pub focused: Option<bool>,
}

/// Shared handle to the launcher window
#[derive(Clone)]
pub struct EguiWindows {
    state: Arc<Mutex<ViewportState>>,
    commands_tx: crossbeam::channel::Sender<WindowCommand>,
    commands_rx: crossbeam::channel::Receiver<WindowCommand>,
    ctx: Arc<OnceCell<egui::Context>>,
}

impl EguiWindows {
    pub fn new(visible: bool) -> Self {
        let (commands_tx, commands_rx) = crossbeam::channel::unbounded();
        Self {
            state: Arc::new(Mutex::new(ViewportState {
                visible,
                ..Default::default()
            })),
            commands_tx,
            commands_rx,
            ctx: Arc::new(OnceCell::new()),
        }
    }

    /// Create the window (restore the viewport and focus it).
    ///
    /// The window is listed once the UI thread confirms the restore.
    pub fn show(&self) {
        self.state.lock().show_pending = true;
        self.send(WindowCommand::Show);
    }

    /// Hand over the egui context so commands can wake the UI thread
    pub(crate) fn attach(&self, ctx: egui::Context) {
        let _ = self.ctx.set(ctx);
    }

    /// Pending commands, oldest first
    pub(crate) fn take_commands(&self) -> Vec<WindowCommand> {
        self.commands_rx.try_iter().collect()
    }

    /// Record what the viewport reported this frame
    pub(crate) fn observe(&self, viewport: ViewportObservation) {
        let mut state = self.state.lock();
        match viewport.minimized {
            Some(false) if state.show_pending => {
                state.visible = true;
                state.show_pending = false;
            },
            Some(true) => state.visible = false,
            _ => {},
        }
        if !state.visible {
            return;
        }
        if let Some(fullscreen) = viewport.fullscreen {
            state.fullscreen = fullscreen;
        }
        if let Some(focused) = viewport.focused {
            state.focused = focused;
        }
    }

    /// The user closed the window; it is minimized, not destroyed
    pub(crate) fn mark_closed(&self) {
        let mut state = self.state.lock();
        state.visible = false;
        state.show_pending = false;
        state.focused = false;
        state.fullscreen = false;
    }

    fn send(&self, command: WindowCommand) {
        // Receiver is owned by self, the send cannot fail
        let _ = self.commands_tx.send(command);
        if let Some(ctx) = self.ctx.get() {
            ctx.request_repaint();
        }
    }
}

impl WindowSystem for EguiWindows {
    fn windows(&self) -> Vec<WindowInfo> {
        let state = *self.state.lock();
        if state.visible {
            vec![WindowInfo {
                id: MAIN_WINDOW,
                fullscreen: state.fullscreen,
                focused: state.focused,
            }]
        } else {
            Vec::new()
        }
    }

    fn set_fullscreen(&mut self, id: WindowId, fullscreen: bool) {
        if id != MAIN_WINDOW {
            return;
        }
        self.state.lock().fullscreen = fullscreen;
        self.send(WindowCommand::SetFullscreen(fullscreen));
    }

    fn focus(&mut self, id: WindowId) {
        if id != MAIN_WINDOW {
            return;
        }
        self.state.lock().focused = true;
        self.send(WindowCommand::Focus);
    }

    fn quit(&mut self) {
        self.send(WindowCommand::Quit);
    }
}
