//! Operator I/O channel for dice entry.
//!
//! The dice source never touches stdin directly. It talks to a
//! [`RollPrompt`], which lets the interactive console and scripted test
//! operators share one draw loop.

use std::collections::VecDeque;
use std::io::{self, BufRead, Read, Write};

/// Longest operator line accepted, in bytes.
pub const MAX_LINE_BYTES: u64 = 4096;

/// Trait for operator channels.
pub trait RollPrompt {
    /// Shows `message` and reads one line of operator input.
    ///
    /// Returns `Ok(None)` once the channel is closed.
    fn request(&mut self, message: &str) -> io::Result<Option<String>>;

    /// Shows an informational message that expects no answer.
    fn notify(&mut self, message: &str) -> io::Result<()>;
}

impl<P: RollPrompt + ?Sized> RollPrompt for &mut P {
    fn request(&mut self, message: &str) -> io::Result<Option<String>> {
        (**self).request(message)
    }

    fn notify(&mut self, message: &str) -> io::Result<()> {
        (**self).notify(message)
    }
}

/// Line-based prompt over a reader and a writer.
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    /// Creates a prompt reading from `input` and writing to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Reads one line of at most [`MAX_LINE_BYTES`].
    ///
    /// Returns `Ok(None)` for an over-long line, after skipping the rest of
    /// it. Bytes that are not UTF-8 are replaced so the caller can reject
    /// the line as malformed.
    fn read_bounded_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        (&mut self.input)
            .take(MAX_LINE_BYTES)
            .read_until(b'\n', &mut buf)?;

        if buf.len() as u64 == MAX_LINE_BYTES && !buf.ends_with(b"\n") {
            self.skip_line()?;
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    fn skip_line(&mut self) -> io::Result<()> {
        loop {
            let available = self.input.fill_buf()?;
            if available.is_empty() {
                return Ok(());
            }
            match available.iter().position(|&byte| byte == b'\n') {
                Some(end) => {
                    self.input.consume(end + 1);
                    return Ok(());
                }
                None => {
                    let len = available.len();
                    self.input.consume(len);
                }
            }
        }
    }
}

impl ConsolePrompt<io::StdinLock<'static>, io::Stderr> {
    /// Prompt on the process terminal.
    ///
    /// Messages go to stderr so that stdout only carries the result.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> RollPrompt for ConsolePrompt<R, W> {
    fn request(&mut self, message: &str) -> io::Result<Option<String>> {
        loop {
            write!(self.output, "{message} ")?;
            self.output.flush()?;

            match self.read_bounded_line()? {
                Some(line) if line.is_empty() => return Ok(None),
                Some(line) => return Ok(Some(line.trim_end_matches(['\r', '\n']).to_string())),
                None => {
                    tracing::debug!(max = MAX_LINE_BYTES, "Operator line too long");
                    writeln!(self.output, "Input too long. Please try again.")?;
                }
            }
        }
    }

    fn notify(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")?;
        self.output.flush()
    }
}

/// Scripted operator that replays prepared input lines.
///
/// Records every request and notice so tests can check what the
/// operator would have seen.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    lines: VecDeque<String>,
    requests: Vec<String>,
    notices: Vec<String>,
}

impl ScriptedPrompt {
    /// Creates a prompt answering with `lines` in order.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Creates a prompt answering with one line per batch of rolls.
    pub fn from_rolls<B: AsRef<[u32]>>(batches: &[B]) -> Self {
        Self::new(batches.iter().map(|batch| {
            batch
                .as_ref()
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        }))
    }

    /// Requests shown so far.
    pub fn requests(&self) -> &[String] {
        &self.requests
    }

    /// Notices shown so far.
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// Input lines not consumed yet.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl RollPrompt for ScriptedPrompt {
    fn request(&mut self, message: &str) -> io::Result<Option<String>> {
        self.requests.push(message.to_string());
        Ok(self.lines.pop_front())
    }

    fn notify(&mut self, message: &str) -> io::Result<()> {
        self.notices.push(message.to_string());
        Ok(())
    }
}
