//! In-memory window system and process manager for tests

use super::process::{ChildProcess, LaunchError, ProcessManager};
use super::window::{WindowId, WindowInfo, WindowSystem};
use crate::config::LaunchTarget;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Default)]
struct WindowState {
    windows: Vec<WindowInfo>,
    next_id: WindowId,
    fullscreen_requests: Vec<(WindowId, bool)>,
    quit: bool,
}

/// Window system whose windows are opened by the test
#[derive(Clone, Default)]
pub struct FakeWindows {
    state: Arc<Mutex<WindowState>>,
}

impl FakeWindows {
    pub fn open(&self, fullscreen: bool, focused: bool) -> WindowId {
        let mut state = self.state.lock();
        let id = state.next_id;
        state.next_id += 1;
        if focused {
            state.windows.iter_mut().for_each(|w| w.focused = false);
        }
        state.windows.push(WindowInfo { id, fullscreen, focused });
        id
    }

    pub fn fullscreen_requests(&self) -> Vec<(WindowId, bool)> {
        self.state.lock().fullscreen_requests.clone()
    }

    pub fn quit_requested(&self) -> bool {
        self.state.lock().quit
    }
}

impl WindowSystem for FakeWindows {
    fn windows(&self) -> Vec<WindowInfo> {
        self.state.lock().windows.clone()
    }

    fn set_fullscreen(&mut self, id: WindowId, fullscreen: bool) {
        let mut state = self.state.lock();
        state.fullscreen_requests.push((id, fullscreen));
        if let Some(window) = state.windows.iter_mut().find(|w| w.id == id) {
            window.fullscreen = fullscreen;
        }
    }

    fn focus(&mut self, id: WindowId) {
        for window in self.state.lock().windows.iter_mut() {
            window.focused = window.id == id;
        }
    }

    fn quit(&mut self) {
        let mut state = self.state.lock();
        state.windows.clear();
        state.quit = true;
    }
}

#[derive(Default)]
struct ProcessState {
    spawned: Vec<LaunchTarget>,
    kill_rxs: Vec<Option<mpsc::UnboundedReceiver<()>>>,
    kill_counts: Vec<usize>,
    fail_next: bool,
}

/// Process manager that records spawns instead of running anything.
///
/// The n-th spawned child gets pid `1000 + n`.
#[derive(Clone, Default)]
pub struct FakeProcesses {
    state: Arc<Mutex<ProcessState>>,
}

impl FakeProcesses {
    pub fn spawned(&self) -> Vec<LaunchTarget> {
        self.state.lock().spawned.clone()
    }

    /// Number of kill requests received by the n-th child
    pub fn kill_requests(&self, index: usize) -> usize {
        let mut state = self.state.lock();
        let mut drained = 0;
        if let Some(Some(rx)) = state.kill_rxs.get_mut(index) {
            while rx.try_recv().is_ok() {
                drained += 1;
            }
        }
        match state.kill_counts.get_mut(index) {
            Some(count) => {
                *count += drained;
                *count
            },
            None => 0,
        }
    }

    /// Simulate the n-th child exiting on its own
    pub fn exit(&self, index: usize) {
        if let Some(slot) = self.state.lock().kill_rxs.get_mut(index) {
            slot.take();
        }
    }

    pub fn fail_next_spawn(&self) {
        self.state.lock().fail_next = true;
    }
}

impl ProcessManager for FakeProcesses {
    fn spawn(&mut self, target: &LaunchTarget) -> Result<ChildProcess, LaunchError> {
        let mut state = self.state.lock();
        if std::mem::take(&mut state.fail_next) {
            return Err(LaunchError::Spawn {
                name: target.name.clone(),
                path: target.path.display().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            });
        }

        let pid = 1000 + state.spawned.len() as u32;
        let (kill_tx, kill_rx) = mpsc::unbounded_channel();
        state.spawned.push(target.clone());
        state.kill_rxs.push(Some(kill_rx));
        state.kill_counts.push(0);

        Ok(ChildProcess::new(target.name.clone(), Some(pid), kill_tx))
    }
}
