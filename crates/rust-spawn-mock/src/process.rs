//! The fake process handle.
//!
//! A [`FakeProcess`] is what the code under test receives instead of a running
//! process. Its state is fixed when it is built; every operation answers
//! immediately from that state.

use std::io::{self, Read};
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use bytes::{Buf, Bytes};
use tokio::io::{AsyncRead, ReadBuf};

use crate::side_effect::Resolved;
use crate::{Captured, Command, LaunchError, LaunchOptions, Process, StreamData};

/// A pre-loaded output stream, readable once from start to end.
///
/// Implements both [`std::io::Read`] and [`tokio::io::AsyncRead`]; the async
/// side never returns `Pending`.
#[derive(Debug, Clone, Default)]
pub struct OutputPipe {
    remaining: Bytes,
}

impl OutputPipe {
    /// Create a pipe holding `data`.
    #[must_use]
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            remaining: data.into(),
        }
    }

    /// Bytes not read yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    /// Check if the pipe has been read to the end.
    #[must_use]
    pub fn is_drained(&self) -> bool {
        self.remaining.is_empty()
    }

    fn copy_into(&mut self, dst: &mut [u8]) -> usize {
        let n = dst.len().min(self.remaining.len());
        dst[..n].copy_from_slice(&self.remaining[..n]);
        self.remaining.advance(n);
        n
    }
}

impl Read for OutputPipe {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.copy_into(buf))
    }
}

impl AsyncRead for OutputPipe {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let n = buf.remaining().min(self.remaining.len());
        buf.put_slice(&self.remaining[..n]);
        self.remaining.advance(n);
        Poll::Ready(Ok(()))
    }
}

/// Stand-in for a live process, backed by a matched expectation.
#[derive(Debug)]
pub struct FakeProcess {
    command: Command,
    text_mode: bool,
    returncode: i32,
    duration: Duration,
    stdout: Option<String>,
    stderr: Option<String>,
    stdout_pipe: Option<OutputPipe>,
    stderr_pipe: Option<OutputPipe>,
}

impl FakeProcess {
    /// Build a process for `command` from its resolved result.
    pub(crate) fn new(
        command: Command,
        options: &LaunchOptions,
        resolved: Resolved,
        duration: Duration,
    ) -> Self {
        // Pipes are materialized up front; an absent stream reads as empty.
        let pipe = |text: &Option<String>| {
            OutputPipe::new(Bytes::from(text.clone().unwrap_or_default().into_bytes()))
        };
        let stdout_pipe = options.stdout.is_piped().then(|| pipe(&resolved.stdout));
        let stderr_pipe = options.stderr.is_piped().then(|| pipe(&resolved.stderr));

        Self {
            command,
            text_mode: options.text_mode,
            returncode: resolved.returncode,
            duration,
            stdout: resolved.stdout,
            stderr: resolved.stderr,
            stdout_pipe,
            stderr_pipe,
        }
    }

    /// The return code every wait or poll reports.
    #[must_use]
    pub const fn returncode(&self) -> i32 {
        self.returncode
    }

    /// The declared duration.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Whether output is returned as text.
    #[must_use]
    pub const fn text_mode(&self) -> bool {
        self.text_mode
    }

    /// Take the stdout pipe without boxing it.
    pub fn take_stdout_pipe(&mut self) -> Option<OutputPipe> {
        self.stdout_pipe.take()
    }

    /// Take the stderr pipe without boxing it.
    pub fn take_stderr_pipe(&mut self) -> Option<OutputPipe> {
        self.stderr_pipe.take()
    }

    fn render(&self, text: Option<&String>) -> Option<StreamData> {
        if self.text_mode {
            return text.map(|t| StreamData::Text(t.clone()));
        }
        // Byte mode: an empty stream reads as absent, not as empty bytes.
        text.filter(|t| !t.is_empty())
            .map(|t| StreamData::Bytes(Bytes::from(t.clone().into_bytes())))
    }
}

impl Process for FakeProcess {
    fn command(&self) -> &Command {
        &self.command
    }

    fn poll(&mut self) -> rust_spawn::Result<Option<i32>> {
        Ok(Some(self.returncode))
    }

    fn wait(&mut self, timeout: Option<Duration>) -> rust_spawn::Result<i32> {
        if let Some(timeout) = timeout {
            if self.duration > timeout {
                tracing::debug!(
                    command = %self.command,
                    ?timeout,
                    duration = ?self.duration,
                    "fake process timed out"
                );
                return Err(LaunchError::timeout(self.command.clone(), timeout));
            }
        }
        Ok(self.returncode)
    }

    fn communicate(
        &mut self,
        _input: Option<&[u8]>,
        _timeout: Option<Duration>,
    ) -> rust_spawn::Result<Captured> {
        Ok(Captured {
            stdout: self.render(self.stdout.as_ref()),
            stderr: self.render(self.stderr.as_ref()),
        })
    }

    fn kill(&mut self) -> rust_spawn::Result<()> {
        Ok(())
    }

    fn take_stdout(&mut self) -> Option<Box<dyn Read + Send>> {
        self.take_stdout_pipe()
            .map(|pipe| Box::new(pipe) as Box<dyn Read + Send>)
    }

    fn take_stderr(&mut self) -> Option<Box<dyn Read + Send>> {
        self.take_stderr_pipe()
            .map(|pipe| Box::new(pipe) as Box<dyn Read + Send>)
    }
}
