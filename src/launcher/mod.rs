//! Application controller and the window/process seams it drives

pub mod controller;
pub mod process;
#[cfg(test)]
pub mod testing;
pub mod window;

pub use controller::{AppController, ShortcutAction};
pub use process::{ChildProcess, LaunchError, ProcessManager, TokioProcessManager};
pub use window::{CreateWindowFn, WindowId, WindowInfo, WindowSystem};
