//! Explicit external-process execution.
//!
//! Tools are always invoked with an argv, never through a shell, so file
//! paths are passed through verbatim regardless of quotes or spaces.

use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

const POLL_INTERVAL: Duration = Duration::from_millis(20);
const STDERR_TAIL_LINES: usize = 20;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("failed to spawn process: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("failed to wait for process: {0}")]
    Wait(#[source] std::io::Error),
    #[error("process exceeded deadline of {0:?}")]
    Timeout(Duration),
}

/// Captured result of a finished process.
#[derive(Debug)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    /// Last lines of stderr, enough to diagnose a failure without flooding
    /// the error message with encoder banners.
    pub fn stderr_tail(&self) -> String {
        let text = String::from_utf8_lossy(&self.stderr);
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
        lines[start..].join("\n")
    }
}

/// Run `cmd` to completion, capturing stdout and stderr.
///
/// With a deadline, the child is killed once it elapses and
/// `RunError::Timeout` is returned. Output pipes are drained on background
/// threads so a chatty child cannot block on a full pipe.
pub fn run_with_deadline(
    cmd: &mut Command,
    deadline: Option<Duration>,
) -> Result<CommandOutput, RunError> {
    log::debug!("Running {cmd:?}");

    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(RunError::Spawn)?;

    let stdout_reader = drain(child.stdout.take());
    let stderr_reader = drain(child.stderr.take());

    let status = match deadline {
        Some(limit) => wait_until(&mut child, limit)?,
        None => child.wait().map_err(RunError::Wait)?,
    };

    Ok(CommandOutput {
        status,
        stdout: stdout_reader.join().unwrap_or_default(),
        stderr: stderr_reader.join().unwrap_or_default(),
    })
}

fn wait_until(child: &mut Child, limit: Duration) -> Result<ExitStatus, RunError> {
    let started = Instant::now();
    loop {
        if let Some(status) = child.try_wait().map_err(RunError::Wait)? {
            return Ok(status);
        }
        if started.elapsed() >= limit {
            log::warn!("Killing process {} after {limit:?}", child.id());
            let _ = child.kill();
            let _ = child.wait();
            return Err(RunError::Timeout(limit));
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    })
}
