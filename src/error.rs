//! NNTP error types

use thiserror::Error;

/// NNTP protocol, framing and connection errors
#[derive(Error, Debug)]
pub enum NntpError {
    /// IO error during network operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TLS error during secure connection
    #[error("TLS error: {0}")]
    Tls(String),

    /// Connection or response timeout
    #[error("Connection timeout")]
    Timeout,

    /// Malformed response framing (bad status line, oversized response)
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// NNTP protocol error with response code
    #[error("NNTP error {code}: {message}")]
    Protocol {
        /// NNTP response code (e.g., 411, 430, 502)
        code: u16,
        /// Error message from server
        message: String,
    },

    /// A response field could not be converted into the expected value
    #[error("Parse error: {0}")]
    Parse(String),

    /// Connection closed unexpectedly
    #[error("Connection closed")]
    ConnectionClosed,
}

/// Result type alias using NntpError
pub type Result<T> = std::result::Result<T, NntpError>;
