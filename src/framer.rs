//! Incremental response framing
//!
//! The framer accumulates raw bytes from the transport and decides when they
//! form one complete NNTP response:
//! - every response ends with CRLF;
//! - if the command expects a multi-line block and the status code is one of
//!   [`MULTILINE_CODES`](crate::response::MULTILINE_CODES), the response also
//!   has to end with the "." CRLF terminator line;
//! - anything else (including error codes for multi-line commands) is
//!   complete at the first CRLF.

use crate::commands::parse_response_line;
use crate::error::{NntpError, Result};
use crate::response::{NntpResponse, is_multiline_code};
use tracing::{trace, warn};

/// Maximum number of bytes buffered for a single response (64 MB)
pub const MAX_RESPONSE_SIZE: usize = 64 * 1024 * 1024;

const CRLF: &[u8] = b"\r\n";
const MULTILINE_TERMINATOR: &[u8] = b"\r\n.\r\n";
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Strip NNTP byte-stuffing from a line (leading ".." becomes ".").
fn strip_byte_stuffing(line: &str) -> &str {
    if line.starts_with("..") {
        &line[1..]
    } else {
        line
    }
}

/// Accumulates bytes for the in-flight response
#[derive(Debug, Default)]
pub struct ResponseFramer {
    buffer: Vec<u8>,
}

impl ResponseFramer {
    /// Create an empty framer
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no bytes are buffered
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Number of buffered bytes
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Drop any partially received response
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Append `bytes` and return the response if it is now complete
    ///
    /// `expects_multiline` is the flag of the command at the head of the queue.
    /// The buffer is empty after every `Ok(Some(_))` and every `Err(_)`.
    ///
    /// # Errors
    ///
    /// [`NntpError::InvalidResponse`] when the status line is not a 3-digit
    /// code, or the response grows past [`MAX_RESPONSE_SIZE`].
    pub fn feed(&mut self, bytes: &[u8], expects_multiline: bool) -> Result<Option<NntpResponse>> {
        self.buffer.extend_from_slice(bytes);

        if self.buffer.len() > MAX_RESPONSE_SIZE {
            warn!("Response exceeds {} bytes, discarding", MAX_RESPONSE_SIZE);
            self.buffer.clear();
            return Err(NntpError::InvalidResponse(format!(
                "Response exceeds maximum size of {} bytes",
                MAX_RESPONSE_SIZE
            )));
        }

        if !self.buffer.ends_with(CRLF) {
            return Ok(None);
        }

        let multiline = expects_multiline && self.has_multiline_code();
        if multiline && !self.buffer.ends_with(MULTILINE_TERMINATOR) {
            return Ok(None);
        }

        let raw = std::mem::take(&mut self.buffer);
        split_response(&raw, multiline).map(Some)
    }

    fn has_multiline_code(&self) -> bool {
        let data = self.buffer.strip_prefix(UTF8_BOM).unwrap_or(&self.buffer[..]);
        data.len() >= 3 && is_multiline_code(&data[..3])
    }
}

/// Split a complete response into status line and body
fn split_response(raw: &[u8], multiline: bool) -> Result<NntpResponse> {
    let text = String::from_utf8_lossy(raw);
    let (status_line, rest) = text.split_once("\r\n").unwrap_or((text.as_ref(), ""));
    let status_line = status_line.trim_start_matches('\u{FEFF}');
    trace!("Received: {}", status_line);

    let (code, _) = parse_response_line(status_line)?;

    let body = if multiline {
        // rest is the block followed by the ".\r\n" terminator line
        let block = rest.strip_suffix(".\r\n").unwrap_or(rest);
        block
            .split_inclusive("\r\n")
            .map(strip_byte_stuffing)
            .collect::<String>()
    } else {
        rest.to_string()
    };
    let body = body.trim_end_matches(['\r', '\n']);

    Ok(NntpResponse {
        code,
        status_line: status_line.to_string(),
        body: (!body.is_empty()).then(|| body.to_string()),
    })
}
