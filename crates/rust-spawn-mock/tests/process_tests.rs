//! Integration tests for fake process handles.

use std::io::Read;
use std::time::Duration;

use rust_spawn_mock::prelude::*;
use tokio::io::AsyncReadExt;

fn mock_with(expectation: Expectation) -> SpawnMock {
    let mock = SpawnMock::new();
    mock.expect(expectation).unwrap();
    mock
}

/// Test poll reports the same code every time.
#[test]
fn poll_is_idempotent() {
    let mock = mock_with(Expectation::new(["ls"]).returncode(5));
    let mut p = mock
        .try_spawn(&Command::from(["ls"]), &LaunchOptions::default())
        .unwrap();
    assert_eq!(p.poll().unwrap(), Some(5));
    assert_eq!(p.poll().unwrap(), Some(5));
    assert_eq!(p.wait(None).unwrap(), 5);
}

/// Test a zero timeout is a real timeout.
#[test]
fn zero_timeout() {
    let mock = mock_with(Expectation::new(["sleep"]).duration(Duration::from_millis(1)));
    let mut p = mock
        .try_spawn(&Command::from(["sleep"]), &LaunchOptions::default())
        .unwrap();
    assert!(p.wait(Some(Duration::ZERO)).unwrap_err().is_timeout());

    let mock = mock_with(Expectation::new(["true"]));
    let mut p = mock
        .try_spawn(&Command::from(["true"]), &LaunchOptions::default())
        .unwrap();
    assert_eq!(p.wait(Some(Duration::ZERO)).unwrap(), 0);
}

/// Test kill leaves the process state alone.
#[test]
fn kill_is_noop() {
    let mock = mock_with(Expectation::new(["ls"]).returncode(2));
    let mut p = mock
        .try_spawn(&Command::from(["ls"]), &LaunchOptions::default())
        .unwrap();
    p.kill().unwrap();
    assert_eq!(p.poll().unwrap(), Some(2));
}

/// Test empty output in byte mode reads as absent.
#[test]
fn empty_output_byte_mode() {
    let mock = mock_with(Expectation::new(["ls"]).stdout(""));
    let mut p = mock
        .try_spawn(&Command::from(["ls"]), &LaunchOptions::default())
        .unwrap();
    assert_eq!(p.communicate(None, None).unwrap(), Captured::default());
}

/// Test a side effect's silent stream is empty text, not absent.
#[test]
fn side_effect_text_mode_streams_present() {
    let mock = mock_with(Expectation::new("foo").side_effect(|_| Outcome::exit(1)));
    let mut p = mock
        .try_spawn(&Command::from("foo"), &LaunchOptions::text())
        .unwrap();
    let captured = p.communicate(None, None).unwrap();
    assert_eq!(captured.stdout, Some(StreamData::text("")));
    assert_eq!(captured.stderr, Some(StreamData::text("")));
}

/// Test piped stdout can be read once through the trait.
#[test]
fn stdout_pipe_through_trait() {
    let mock = mock_with(Expectation::new(["cat", "log"]).stdout("line 1\nline 2\n"));
    let options = LaunchOptions::builder().stdout(StdioMode::Piped).build();
    let mut p: Box<dyn Process> = Box::new(
        mock.try_spawn(&Command::from(["cat", "log"]), &options)
            .unwrap(),
    );

    let mut out = String::new();
    p.take_stdout().unwrap().read_to_string(&mut out).unwrap();
    assert_eq!(out, "line 1\nline 2\n");
    assert!(p.take_stdout().is_none());
    assert!(p.take_stderr().is_none());
}

/// Test stdout and stderr pipes are independent.
#[test]
fn independent_pipes() {
    let mock = mock_with(Expectation::new(["make"]).stdout("built\n").stderr("warning\n"));
    let mut p = mock
        .try_spawn(&Command::from(["make"]), &LaunchOptions::piped())
        .unwrap();

    let mut err = String::new();
    let mut stderr = p.take_stderr_pipe().unwrap();
    Read::read_to_string(&mut stderr, &mut err).unwrap();
    let mut out = String::new();
    let mut stdout = p.take_stdout_pipe().unwrap();
    Read::read_to_string(&mut stdout, &mut out).unwrap();

    assert_eq!(err, "warning\n");
    assert_eq!(out, "built\n");
}

/// Test a pipe through AsyncRead.
#[tokio::test]
async fn stdout_pipe_async() {
    let mock = mock_with(
        Expectation::new(["foo", ".*"])
            .side_effect(|inv| Outcome::success().println(inv.arg(1).unwrap_or_default())),
    );
    let mut p = mock
        .try_spawn(&Command::from(["foo", "--lol"]), &LaunchOptions::piped())
        .unwrap();

    let mut pipe = p.take_stdout_pipe().unwrap();
    let mut out = Vec::new();
    AsyncReadExt::read_to_end(&mut pipe, &mut out).await.unwrap();
    assert_eq!(out, b"--lol\n");
    assert!(pipe.is_drained());
}

/// Test communicate still works after the pipe was taken.
#[test]
fn communicate_after_pipe() {
    let mock = mock_with(Expectation::new(["ls"]).stdout("X"));
    let mut p = mock
        .try_spawn(&Command::from(["ls"]), &LaunchOptions::piped())
        .unwrap();
    drop(p.take_stdout());
    let captured = p.communicate(None, None).unwrap();
    assert_eq!(captured.stdout, Some(StreamData::bytes(&b"X"[..])));
}
