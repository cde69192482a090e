//! Sentence framing over the raw byte stream
//!
//! Extracts one line-delimited sentence per call from a non-blocking
//! transport, reassembling across partial reads and normalizing whatever
//! arrives into text.

use tracing::warn;

use crate::transport::{Transport, TransportError};

/// Read chunk size per poll.
const CHUNK_SIZE: usize = 256;

/// Pending bytes tolerated without a line terminator before the buffer is
/// assumed to be line noise and dropped.
const MAX_PENDING: usize = 4096;

/// Assembles complete sentences from the transport's byte stream.
pub struct FrameReader<T> {
    transport: T,
    pending: Vec<u8>,
}

impl<T: Transport> FrameReader<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            pending: Vec::with_capacity(CHUNK_SIZE),
        }
    }

    /// Return the next complete sentence, or `Ok(None)` when the transport
    /// has no full line yet. Never blocks beyond a single bounded read;
    /// transport failures surface as `Err`.
    pub fn next_sentence(&mut self) -> Result<Option<String>, TransportError> {
        if let Some(line) = self.take_line() {
            return Ok(Some(line));
        }

        let mut chunk = [0u8; CHUNK_SIZE];
        let n = self.transport.read(&mut chunk)?;
        if n == 0 {
            return Ok(None);
        }
        self.pending.extend_from_slice(&chunk[..n]);

        if let Some(line) = self.take_line() {
            return Ok(Some(line));
        }

        if self.pending.len() > MAX_PENDING {
            warn!(
                "dropping {} unterminated bytes from the serial buffer",
                self.pending.len()
            );
            self.pending.clear();
        }
        Ok(None)
    }

    /// Pop the first complete line off the pending buffer, normalized to
    /// text. Non-UTF-8 artifacts become replacement characters so tag
    /// matching still sees the clean part of the sentence.
    fn take_line(&mut self) -> Option<String> {
        let end = self.pending.iter().position(|&b| b == b'\n')?;
        let line: Vec<u8> = self.pending.drain(..=end).collect();
        let text = String::from_utf8_lossy(&line);
        Some(text.trim_end_matches(['\r', '\n']).to_string())
    }
}
