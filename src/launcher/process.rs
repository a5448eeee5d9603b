//! Spawning and tracking launched applications

use crate::config::LaunchTarget;
use std::process::Stdio;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

#[cfg(windows)]
const DETACHED_PROCESS: u32 = 0x0000_0008;
#[cfg(windows)]
const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;

/// Errors raised while launching or stopping an application
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("No launch target configured")]
    NoTarget,

    #[error("Failed to spawn '{name}' ({path}): {source}")]
    Spawn {
        name: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Process '{name}' has already exited")]
    AlreadyExited { name: String },
}

/// Handle to a launched application.
///
/// The handle outlives the process: once it exits, `is_running` turns false
/// and `kill` reports [`LaunchError::AlreadyExited`].
#[derive(Debug, Clone)]
pub struct ChildProcess {
    name: String,
    pid: Option<u32>,
    kill_tx: mpsc::UnboundedSender<()>,
}

impl ChildProcess {
    /// `kill_tx` is serviced by whatever task owns the process; dropping its
    /// receiver marks the process as exited.
    pub fn new(name: impl Into<String>, pid: Option<u32>, kill_tx: mpsc::UnboundedSender<()>) -> Self {
        Self {
            name: name.into(),
            pid,
            kill_tx,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    pub fn is_running(&self) -> bool {
        !self.kill_tx.is_closed()
    }

    /// Request a forceful kill (SIGKILL / TerminateProcess).
    pub fn kill(&self) -> Result<(), LaunchError> {
        self.kill_tx.send(()).map_err(|_| LaunchError::AlreadyExited {
            name: self.name.clone(),
        })
    }
}

/// Spawns launch targets
pub trait ProcessManager: Send {
    fn spawn(&mut self, target: &LaunchTarget) -> Result<ChildProcess, LaunchError>;
}

/// Process manager backed by `tokio::process`. Must be used from within a
/// Tokio runtime.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioProcessManager;

impl ProcessManager for TokioProcessManager {
    fn spawn(&mut self, target: &LaunchTarget) -> Result<ChildProcess, LaunchError> {
        let mut cmd = Command::new(&target.path);
        cmd.args(&target.arguments)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(false);

        #[cfg(unix)]
        detach_session(&mut cmd);
        #[cfg(windows)]
        cmd.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);

        let mut child = cmd.spawn().map_err(|source| LaunchError::Spawn {
            name: target.name.clone(),
            path: target.path.display().to_string(),
            source,
        })?;
        let pid = child.id();
        info!("Spawned '{}' (pid {:?})", target.name, pid);

        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(forward_output(stdout, target.name.clone(), OutputStream::Stdout));
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(forward_output(stderr, target.name.clone(), OutputStream::Stderr));
        }

        let (kill_tx, mut kill_rx) = mpsc::unbounded_channel::<()>();
        let name = target.name.clone();
        tokio::spawn(async move {
            loop {
                let request = tokio::select! {
                    status = child.wait() => {
                        log_exit(&name, status);
                        return;
                    }
                    request = kill_rx.recv() => request,
                };

                match request {
                    Some(()) => match child.start_kill() {
                        Ok(()) => info!("Sent kill signal to '{}'", name),
                        Err(e) => warn!("Failed to kill '{}': {}", name, e),
                    },
                    None => {
                        // Every handle dropped; keep reaping so the exit is still logged
                        log_exit(&name, child.wait().await);
                        return;
                    },
                }
            }
        });

        Ok(ChildProcess::new(target.name.clone(), pid, kill_tx))
    }
}

/// Run the child in a new session so hangups and session teardown of the
/// launcher do not reach it. SIGPIPE is ignored so it keeps running once our
/// output readers are gone.
#[cfg(unix)]
fn detach_session(cmd: &mut Command) {
    // SAFETY: the hook runs between fork and exec and only calls
    // async-signal-safe functions.
    unsafe {
        cmd.pre_exec(|| {
            if libc::setsid() == -1 {
                return Err(std::io::Error::last_os_error());
            }
            libc::signal(libc::SIGPIPE, libc::SIG_IGN);
            Ok(())
        });
    }
}

#[derive(Debug, Clone, Copy)]
enum OutputStream {
    Stdout,
    Stderr,
}

async fn forward_output<R: AsyncRead + Unpin>(reader: R, name: String, stream: OutputStream) {
    let mut lines = BufReader::new(reader).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match stream {
                OutputStream::Stdout => info!(target: "child", "[{}] stdout: {}", name, line),
                OutputStream::Stderr => warn!(target: "child", "[{}] stderr: {}", name, line),
            },
            Ok(None) => break,
            Err(e) => {
                debug!("Stopped reading {:?} of '{}': {}", stream, name, e);
                break;
            },
        }
    }
}

fn log_exit(name: &str, status: std::io::Result<std::process::ExitStatus>) {
    match status {
        Ok(status) => info!(target: "child", "[{}] exited with code {:?}", name, status.code()),
        Err(e) => warn!(target: "child", "Failed to wait for '{}': {}", name, e),
    }
}
