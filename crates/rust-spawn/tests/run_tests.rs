//! Tests for the `call` / `check_call` / `check_output` wrappers.

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rust_spawn::{
    Captured, Command, LaunchError, LaunchOptions, LaunchSlot, Launcher, Process, Result,
    StdioMode, StreamData, run,
};

/// A process that exits immediately with a fixed code and output.
#[derive(Debug)]
struct Exited {
    command: Command,
    code: i32,
    stdout: Option<StreamData>,
}

impl Process for Exited {
    fn command(&self) -> &Command {
        &self.command
    }

    fn poll(&mut self) -> Result<Option<i32>> {
        Ok(Some(self.code))
    }

    fn wait(&mut self, _timeout: Option<Duration>) -> Result<i32> {
        Ok(self.code)
    }

    fn communicate(&mut self, _: Option<&[u8]>, _: Option<Duration>) -> Result<Captured> {
        Ok(Captured {
            stdout: self.stdout.clone(),
            stderr: None,
        })
    }

    fn kill(&mut self) -> Result<()> {
        Ok(())
    }

    fn take_stdout(&mut self) -> Option<Box<dyn Read + Send>> {
        None
    }

    fn take_stderr(&mut self) -> Option<Box<dyn Read + Send>> {
        None
    }
}

/// Records the options it was called with.
struct Recording {
    code: i32,
    stdout: Option<StreamData>,
    seen: Mutex<Vec<LaunchOptions>>,
}

impl Recording {
    fn new(code: i32, stdout: Option<StreamData>) -> Self {
        Self {
            code,
            stdout,
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl Launcher for Recording {
    fn launch(&self, command: &Command, options: &LaunchOptions) -> Result<Box<dyn Process>> {
        self.seen.lock().unwrap().push(options.clone());
        Ok(Box::new(Exited {
            command: command.clone(),
            code: self.code,
            stdout: self.stdout.clone(),
        }))
    }
}

/// Test call returns the process's code.
#[test]
fn call_returns_code() {
    let launcher = Recording::new(17, None);
    let code = run::call(&launcher, "foo", &LaunchOptions::default()).unwrap();
    assert_eq!(code, 17);
}

/// Test check_call accepts a zero code.
#[test]
fn check_call_succeeds_on_zero() {
    let launcher = Recording::new(0, None);
    run::check_call(&launcher, ["ls", "-l"], &LaunchOptions::default()).unwrap();
}

/// Test check_call reports a non-zero code with the command.
#[test]
fn check_call_fails_on_nonzero() {
    let launcher = Recording::new(-1, None);
    let err = run::check_call(&launcher, ["ls", "-l"], &LaunchOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        LaunchError::CalledProcess { returncode: -1, .. }
    ));
    assert_eq!(err.command(), Some(&Command::from(["ls", "-l"])));
}

/// Test check_output pipes stdout regardless of the given options.
#[test]
fn check_output_forces_piped_stdout() {
    let launcher = Recording::new(0, Some(StreamData::bytes(&b"FOOBAR"[..])));
    let out = run::check_output(&launcher, ["ls", "-l"], &LaunchOptions::default()).unwrap();
    assert_eq!(out.as_bytes(), b"FOOBAR");

    let seen = launcher.seen.lock().unwrap();
    assert_eq!(seen[0].stdout, StdioMode::Piped);
}

/// Test check_output turns absent stdout into empty data.
#[test]
fn check_output_absent_stdout_is_empty() {
    let launcher = Recording::new(0, None);
    let out = run::check_output(&launcher, "quiet", &LaunchOptions::text()).unwrap();
    assert_eq!(out, StreamData::Text(String::new()));
}

/// Test a failed check_output keeps what was written.
#[test]
fn check_output_failure_keeps_stdout() {
    let launcher = Recording::new(2, Some(StreamData::text("partial")));
    let err = run::check_output(&launcher, "flaky", &LaunchOptions::text()).unwrap_err();
    match err {
        LaunchError::CalledProcess { stdout, .. } => {
            assert_eq!(stdout, Some(StreamData::text("partial")));
        }
        other => panic!("unexpected error: {other}"),
    }
}

/// Test the wrappers accept a slot as the launcher.
#[test]
fn wrappers_go_through_slot() {
    let slot = LaunchSlot::new(Arc::new(Recording::new(3, None)));
    assert_eq!(run::call(&slot, "x", &LaunchOptions::default()).unwrap(), 3);
}
