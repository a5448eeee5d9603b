//! Window system seam

/// Opaque window identifier assigned by the window system
pub type WindowId = u64;

/// Snapshot of one open window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowInfo {
    pub id: WindowId,
    pub fullscreen: bool,
    pub focused: bool,
}

/// Callback invoked when the shortcut finds no open window
pub type CreateWindowFn = Box<dyn FnMut() + Send>;

/// Windows owned by the UI toolkit, queried on demand
pub trait WindowSystem: Send {
    /// Open windows, in creation order
    fn windows(&self) -> Vec<WindowInfo>;

    fn set_fullscreen(&mut self, id: WindowId, fullscreen: bool);

    fn focus(&mut self, id: WindowId);

    /// Ask the toolkit to close every window and exit its event loop
    fn quit(&mut self);

    fn focused(&self) -> Option<WindowInfo> {
        self.windows().into_iter().find(|w| w.focused)
    }
}
