//! External process invocation
//!
//! The merge pipeline reaches the outside world through the narrow
//! [`ProcessRunner`] seam, so the assembly and validation logic is testable
//! without esptool installed. Tests substitute a scripted runner.

use std::ffi::OsString;
use std::io;
use std::process::Command;

/// Captured result of one subprocess run
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    /// Exit code; `None` when the process was terminated by a signal
    pub code: Option<i32>,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl ProcessOutput {
    /// Whether the process exited with status zero
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Minimal seam over subprocess execution
pub trait ProcessRunner {
    /// Run `program` with `args`, blocking until exit, capturing output.
    fn run(&mut self, program: &str, args: &[OsString]) -> io::Result<ProcessOutput>;
}

/// Runner backed by `std::process::Command`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&mut self, program: &str, args: &[OsString]) -> io::Result<ProcessOutput> {
        let output = Command::new(program).args(args).output()?;
        Ok(ProcessOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
