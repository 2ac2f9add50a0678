//! Line sources: where sentences come from
use std::{
    io::{BufRead, BufReader, ErrorKind, Read},
    time::Duration,
};

use log::{debug, trace};

// NMEA sentences are at most 82 bytes long.
// Proprietary sentences may be longer, this is more than enough.
const BUF_SIZE: usize = 1024;

/// Outcome of one [LineSource::next_line] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// One line, stripped of its termination
    Line(String),
    /// Nothing was received in time
    Timeout,
    /// Source reached its end (file replay) or was closed
    Closed,
}

/// [LineSource] delivers ASCII lines, blocking for at most `timeout`.
pub trait LineSource {
    fn next_line(&mut self, timeout: Duration) -> std::io::Result<LineEvent>;
}

/// [StreamSource] frames any [BufRead]able stream (serial port, file, socket)
/// into `\n` terminated lines. Timeouts are those of the underlying stream:
/// configure them on the device itself. Partial lines are kept across timeouts.
pub struct StreamSource<R: BufRead> {
    reader: R,
    /// Bytes of the line being received
    pending: Vec<u8>,
}

impl<R: Read> StreamSource<BufReader<R>> {
    /// Buffers a [Read]able interface
    pub fn from_reader(reader: R) -> Self {
        Self::new(BufReader::with_capacity(BUF_SIZE, reader))
    }
}

impl<R: BufRead> StreamSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: Vec::with_capacity(BUF_SIZE),
        }
    }

    fn take_line(&mut self) -> String {
        let line = String::from_utf8_lossy(&self.pending)
            .trim_end_matches(['\r', '\n'])
            .to_string();
        self.pending.clear();
        line
    }
}

impl<R: BufRead> LineSource for StreamSource<R> {
    fn next_line(&mut self, _timeout: Duration) -> std::io::Result<LineEvent> {
        loop {
            let available = match self.reader.fill_buf() {
                Ok(available) => available,
                Err(e) => match e.kind() {
                    ErrorKind::TimedOut | ErrorKind::WouldBlock => {
                        trace!("read timeout ({} bytes pending)", self.pending.len());
                        return Ok(LineEvent::Timeout);
                    },
                    ErrorKind::Interrupted => continue,
                    _ => return Err(e),
                },
            };

            if available.is_empty() {
                if self.pending.is_empty() {
                    return Ok(LineEvent::Closed);
                }
                // unterminated last line
                return Ok(LineEvent::Line(self.take_line()));
            }

            // pending never exceeds BUF_SIZE + 1 bytes
            let room = BUF_SIZE + 1 - self.pending.len();
            let (used, terminated) = match available.iter().position(|b| *b == b'\n') {
                Some(end) if end < room => (end + 1, true),
                _ => (available.len().min(room), false),
            };

            self.pending.extend_from_slice(&available[..used]);
            self.reader.consume(used);

            if terminated {
                let line = self.take_line();
                if line.trim().is_empty() {
                    continue;
                }
                return Ok(LineEvent::Line(line));
            }

            if self.pending.len() > BUF_SIZE {
                debug!(
                    "discarding {} bytes without line termination",
                    self.pending.len()
                );
                self.pending.clear();
            }
        }
    }
}
