//! Application controller: shortcut outcomes and the launch/kill actions

use super::process::{ChildProcess, LaunchError, ProcessManager};
use super::window::{CreateWindowFn, WindowSystem};
use crate::app::AppEvent;
use crate::config::LaunchTarget;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// What `run_shortcut` decided to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    CreatedWindow,
    EnteredFullscreen,
    /// A child is held; the close is only logged, the process keeps running
    CloseRequested,
    NoAction,
}

/// Owns the launched child process and reacts to shortcut/launch/kill.
///
/// Only the dispatcher calls into the controller, so it needs no locking.
pub struct AppController<W, P> {
    windows: W,
    processes: P,
    create_window: CreateWindowFn,
    targets: Vec<LaunchTarget>,
    child: Option<ChildProcess>,
    refocus_delay: Duration,
    events_tx: mpsc::UnboundedSender<AppEvent>,
}

impl<W: WindowSystem, P: ProcessManager> AppController<W, P> {
    pub fn new(
        windows: W,
        processes: P,
        create_window: CreateWindowFn,
        targets: Vec<LaunchTarget>,
        refocus_delay: Duration,
        events_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            windows,
            processes,
            create_window,
            targets,
            child: None,
            refocus_delay,
            events_tx,
        }
    }

    /// Bigscreen shortcut, evaluated against the current window state:
    /// create a window, else go fullscreen, else (pretend to) close the app.
    pub fn run_shortcut(&mut self) -> ShortcutAction {
        let windows = self.windows.windows();

        let Some(first) = windows.first().copied() else {
            info!("Shortcut: no window open, creating one");
            (self.create_window)();
            return ShortcutAction::CreatedWindow;
        };

        let target = self.windows.focused().unwrap_or(first);
        if !target.fullscreen {
            info!("Shortcut: switching window {} to fullscreen", target.id);
            self.windows.set_fullscreen(target.id, true);
            return ShortcutAction::EnteredFullscreen;
        }

        if let Some(child) = &self.child {
            // Close intent is logged only; the child is left running
            info!("Closing app {:?}", child);
            return ShortcutAction::CloseRequested;
        }

        info!("Gamepad shortcut detected but no action was taken");
        ShortcutAction::NoAction
    }

    /// Spawn the first launch target and keep its handle.
    ///
    /// A previously launched app is neither checked nor stopped; its handle
    /// is simply replaced.
    pub fn launch(&mut self) -> Result<&ChildProcess, LaunchError> {
        let target = self.targets.first().ok_or(LaunchError::NoTarget)?;
        info!("Launching '{}'", target.name);

        let child = self.processes.spawn(target)?;
        if let Some(previous) = &self.child {
            debug!("Replacing handle of '{}' (running: {})", previous.name(), previous.is_running());
        }

        Ok(&*self.child.insert(child))
    }

    /// Kill the held child, then refocus the launcher window after the
    /// refocus delay. The handle is kept afterwards.
    pub fn kill(&mut self) -> Result<(), LaunchError> {
        let result = match &self.child {
            Some(child) => {
                info!("Killing '{}'", child.name());
                child.kill()
            },
            None => {
                debug!("Kill requested but no app was launched");
                Ok(())
            },
        };

        self.schedule_refocus();
        result
    }

    /// Log the held child handle
    pub fn inspect(&self) {
        match &self.child {
            Some(child) => info!(
                "Child process: name='{}' pid={:?} running={}",
                child.name(),
                child.pid(),
                child.is_running()
            ),
            None => info!("Child process: none"),
        }
    }

    /// Focus the first open window. Returns `false` when none is open.
    pub fn refocus_window(&mut self) -> bool {
        match self.windows.windows().first() {
            Some(window) => {
                debug!("Refocusing window {}", window.id);
                self.windows.focus(window.id);
                true
            },
            None => false,
        }
    }

    /// Invoke the window-creation callback directly (tray "Open App")
    pub fn create_window(&mut self) {
        (self.create_window)();
    }

    pub fn quit(&mut self) {
        self.windows.quit();
    }

    pub fn child(&self) -> Option<&ChildProcess> {
        self.child.as_ref()
    }

    fn schedule_refocus(&self) {
        let tx = self.events_tx.clone();
        let delay = self.refocus_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(AppEvent::RefocusWindow);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launcher::testing::{FakeProcesses, FakeWindows};
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Harness {
        controller: AppController<FakeWindows, FakeProcesses>,
        windows: FakeWindows,
        processes: FakeProcesses,
        created: Arc<AtomicUsize>,
        events_rx: mpsc::UnboundedReceiver<AppEvent>,
    }

    fn target() -> LaunchTarget {
        LaunchTarget {
            name: "Gran Turismo 4".to_string(),
            path: PathBuf::from("/Applications/PCSX2.app/Contents/MacOS/PCSX2"),
            arguments: vec!["-fastboot".to_string(), "-nogui".to_string()],
        }
    }

    fn harness(targets: Vec<LaunchTarget>) -> Harness {
        let windows = FakeWindows::default();
        let processes = FakeProcesses::default();
        let created = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&created);
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let controller = AppController::new(
            windows.clone(),
            processes.clone(),
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
            targets,
            Duration::from_millis(10),
            events_tx,
        );

        Harness {
            controller,
            windows,
            processes,
            created,
            events_rx,
        }
    }

    #[test]
    fn test_shortcut_without_window_creates_one() {
        let mut h = harness(vec![target()]);

        assert_eq!(h.controller.run_shortcut(), ShortcutAction::CreatedWindow);
        assert_eq!(h.created.load(Ordering::SeqCst), 1);
        assert!(h.windows.fullscreen_requests().is_empty());
        assert!(h.processes.spawned().is_empty());
    }

    #[test]
    fn test_shortcut_with_windowed_window_goes_fullscreen() {
        let mut h = harness(vec![target()]);
        let id = h.windows.open(false, true);

        assert_eq!(h.controller.run_shortcut(), ShortcutAction::EnteredFullscreen);
        assert_eq!(h.windows.fullscreen_requests(), vec![(id, true)]);
        assert_eq!(h.created.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_shortcut_without_focus_uses_first_window() {
        let mut h = harness(vec![target()]);
        let first = h.windows.open(false, false);
        h.windows.open(false, false);

        assert_eq!(h.controller.run_shortcut(), ShortcutAction::EnteredFullscreen);
        assert_eq!(h.windows.fullscreen_requests(), vec![(first, true)]);
    }

    #[test]
    fn test_shortcut_fullscreen_without_child_is_noop() {
        let mut h = harness(vec![target()]);
        h.windows.open(true, true);

        assert_eq!(h.controller.run_shortcut(), ShortcutAction::NoAction);
        assert!(h.windows.fullscreen_requests().is_empty());
        assert_eq!(h.created.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_shortcut_fullscreen_with_child_only_logs_close() {
        let mut h = harness(vec![target()]);
        h.windows.open(true, true);
        h.controller.launch().unwrap();

        assert_eq!(h.controller.run_shortcut(), ShortcutAction::CloseRequested);
        assert_eq!(h.processes.kill_requests(0), 0);
        assert!(h.controller.child().unwrap().is_running());
    }

    #[test]
    fn test_launch_spawns_first_target_with_arguments() {
        let mut h = harness(vec![target()]);

        let child = h.controller.launch().unwrap();
        assert_eq!(child.name(), "Gran Turismo 4");

        assert_eq!(h.processes.spawned(), vec![target()]);
        assert!(h.controller.child().is_some());
    }

    #[test]
    fn test_second_launch_overwrites_without_killing() {
        let mut h = harness(vec![target()]);

        let first_pid = h.controller.launch().unwrap().pid();
        let second_pid = h.controller.launch().unwrap().pid();

        assert_ne!(first_pid, second_pid);
        assert_eq!(h.processes.spawned().len(), 2);
        assert_eq!(h.processes.kill_requests(0), 0);
        assert_eq!(h.controller.child().unwrap().pid(), second_pid);
    }

    #[test]
    fn test_launch_without_targets_fails() {
        let mut h = harness(vec![]);
        assert!(matches!(h.controller.launch(), Err(LaunchError::NoTarget)));
        assert!(h.controller.child().is_none());
    }

    #[test]
    fn test_failed_spawn_keeps_previous_handle() {
        let mut h = harness(vec![target()]);
        let pid = h.controller.launch().unwrap().pid();

        h.processes.fail_next_spawn();
        assert!(matches!(h.controller.launch(), Err(LaunchError::Spawn { .. })));
        assert_eq!(h.controller.child().unwrap().pid(), pid);
    }

    #[tokio::test]
    async fn test_kill_signals_child_and_keeps_handle() {
        let mut h = harness(vec![target()]);
        h.controller.launch().unwrap();

        h.controller.kill().unwrap();

        assert_eq!(h.processes.kill_requests(0), 1);
        assert!(h.controller.child().is_some());
    }

    #[tokio::test]
    async fn test_kill_schedules_refocus() {
        let mut h = harness(vec![target()]);
        h.controller.launch().unwrap();
        h.controller.kill().unwrap();

        let event = tokio::time::timeout(Duration::from_secs(2), h.events_rx.recv()).await.unwrap();
        assert!(matches!(event, Some(AppEvent::RefocusWindow)));
    }

    #[tokio::test]
    async fn test_kill_without_child_still_refocuses() {
        let mut h = harness(vec![target()]);

        assert!(h.controller.kill().is_ok());

        let event = tokio::time::timeout(Duration::from_secs(2), h.events_rx.recv()).await.unwrap();
        assert!(matches!(event, Some(AppEvent::RefocusWindow)));
    }

    #[tokio::test]
    async fn test_kill_after_exit_reports_stale_handle() {
        let mut h = harness(vec![target()]);
        h.controller.launch().unwrap();
        h.processes.exit(0);

        assert!(matches!(h.controller.kill(), Err(LaunchError::AlreadyExited { .. })));
        assert!(h.controller.child().is_some());
    }

    #[test]
    fn test_refocus_focuses_first_window() {
        let mut h = harness(vec![target()]);
        assert!(!h.controller.refocus_window());

        let first = h.windows.open(false, false);
        h.windows.open(false, true);

        assert!(h.controller.refocus_window());
        assert_eq!(h.windows.focused().map(|w| w.id), Some(first));
    }
}
