//! External command execution utilities.
//!
//! Provides a Builder-based API for running external render tools with
//! stdin piping and a hard deadline. Render helpers must never be able to
//! wedge the dispatch loop, so every exit path (tool missing, non-zero
//! exit, hang) releases the child process.

use anyhow::{Context, Result};
use std::{
    ffi::{OsStr, OsString},
    io::{Read, Write},
    process::{Child, Command, Output, Stdio},
    time::{Duration, Instant},
};

/// Default deadline for external render tools.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Command builder for external process execution.
#[derive(Default)]
pub struct Cmd {
    program: OsString,
    args: Vec<OsString>,
    stdin_data: Option<Vec<u8>>,
    timeout: Option<Duration>,
}

impl Cmd {
    /// Create a new command builder.
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        Self {
            program: program.as_ref().to_owned(),
            timeout: Some(DEFAULT_TIMEOUT),
            ..Default::default()
        }
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            let arg = arg.as_ref();
            if !arg.is_empty() {
                self.args.push(arg.to_owned());
            }
        }
        self
    }

    /// Set stdin data to pipe to the process.
    pub fn stdin<D: AsRef<[u8]>>(mut self, data: D) -> Self {
        self.stdin_data = Some(data.as_ref().to_vec());
        self
    }

    /// Override the execution deadline.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Execute the command and return output.
    ///
    /// The child is killed and reaped if it outlives the deadline.
    pub fn run(self) -> Result<Output> {
        let name = self.program.to_string_lossy().to_string();
        let deadline = self.timeout.unwrap_or(DEFAULT_TIMEOUT);

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd
            .spawn()
            .with_context(|| format!("Failed to execute `{name}`"))?;

        // Feed stdin from a thread so a full pipe can't deadlock against
        // the child filling stdout.
        let stdin_handle = self.stdin_data.and_then(|data| {
            child.stdin.take().map(|mut stdin| {
                std::thread::spawn(move || {
                    let _ = stdin.write_all(&data);
                })
            })
        });

        let status = wait_with_deadline(&mut child, deadline)
            .with_context(|| format!("`{name}` did not finish within {deadline:?}"))?;

        if let Some(handle) = stdin_handle {
            let _ = handle.join();
        }

        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        if let Some(mut out) = child.stdout.take() {
            let _ = out.read_to_end(&mut stdout);
        }
        if let Some(mut err) = child.stderr.take() {
            let _ = err.read_to_end(&mut stderr);
        }

        Ok(Output {
            status,
            stdout,
            stderr,
        })
    }
}

/// Poll the child until exit or deadline; kill and reap on overrun.
fn wait_with_deadline(child: &mut Child, deadline: Duration) -> Result<std::process::ExitStatus> {
    let started = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if started.elapsed() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            anyhow::bail!("deadline exceeded");
        }
        std::thread::sleep(Duration::from_millis(10));
    }
}
