//! NNTP response types, classification and status codes

use crate::error::{NntpError, Result};

/// A complete NNTP response as extracted by the framer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NntpResponse {
    /// 3-digit NNTP response code
    pub code: u16,
    /// Full first line, without the trailing CRLF
    pub status_line: String,
    /// Text following the status line, with the terminating dot-line removed.
    /// `None` when nothing follows the status line.
    pub body: Option<String>,
}

impl NntpResponse {
    /// Status text after the code (e.g. "list follows" for "215 list follows")
    pub fn message(&self) -> &str {
        self.status_line
            .get(3..)
            .map(|rest| rest.strip_prefix(' ').unwrap_or(rest))
            .unwrap_or("")
    }

    /// Body text, or the empty string when absent
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }

    /// Classify this response by its status line
    pub fn classification(&self) -> Classification {
        classify(&self.status_line)
    }

    /// Check if response indicates success (1xx, 2xx or 3xx)
    pub fn is_success(&self) -> bool {
        self.classification() == Classification::Success
    }

    /// Check if response indicates error (4xx or 5xx)
    pub fn is_error(&self) -> bool {
        self.code >= 400
    }

    /// Turn a failed response into [`NntpError::Protocol`]
    ///
    /// # Errors
    ///
    /// [`NntpError::Protocol`] carrying the code and message when the
    /// response is classified as a failure.
    pub fn into_result(self) -> Result<Self> {
        match self.classification() {
            Classification::Success => Ok(self),
            Classification::Failure => Err(NntpError::Protocol {
                code: self.code,
                message: self.message().to_string(),
            }),
        }
    }
}

/// Outcome of a completed exchange, decided by the leading status digit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Leading digit 1, 2 or 3
    Success,
    /// Any other leading character
    Failure,
}

/// Classify a status line: '1', '2' and '3' are successes, anything else fails
pub fn classify(status_line: &str) -> Classification {
    match status_line.as_bytes().first() {
        Some(b'1' | b'2' | b'3') => Classification::Success,
        _ => Classification::Failure,
    }
}

/// Status codes whose response carries a dot-terminated multi-line block
/// when the issuing command expects one.
pub const MULTILINE_CODES: [&str; 11] = [
    "100", // HELP
    "101", // CAPABILITIES
    "211", // LISTGROUP
    "215", // LIST
    "220", // ARTICLE
    "221", // HEAD
    "222", // BODY
    "224", // OVER
    "225", // HDR
    "230", // NEWNEWS
    "231", // NEWGROUPS
];

/// Check whether a response beginning with `prefix` may carry a multi-line block
pub fn is_multiline_code(prefix: &[u8]) -> bool {
    MULTILINE_CODES
        .iter()
        .any(|code| code.as_bytes() == prefix)
}

/// NNTP response codes (RFC 3977)
pub mod codes {
    // 1xx - Informational
    /// Help text follows
    pub const HELP_TEXT_FOLLOWS: u16 = 100;
    /// Capability list follows (RFC 3977 Section 5.2)
    pub const CAPABILITY_LIST: u16 = 101;
    /// Server date/time (RFC 3977 Section 7.1)
    pub const SERVER_DATE: u16 = 111;

    // 2xx - Success
    /// Server ready, posting allowed
    pub const READY_POSTING_ALLOWED: u16 = 200;
    /// Server ready, no posting
    pub const READY_NO_POSTING: u16 = 201;
    /// Closing connection
    pub const CLOSING_CONNECTION: u16 = 205;
    /// Group selected
    pub const GROUP_SELECTED: u16 = 211;
    /// List of newsgroups follows (RFC 3977 Section 7.6)
    pub const LIST_INFORMATION_FOLLOWS: u16 = 215;
    /// Article follows
    pub const ARTICLE_FOLLOWS: u16 = 220;
    /// Head follows
    pub const HEAD_FOLLOWS: u16 = 221;
    /// Body follows
    pub const BODY_FOLLOWS: u16 = 222;
    /// Article stat
    pub const ARTICLE_STAT: u16 = 223;

    // 4xx - Temporary errors
    /// Service temporarily unavailable
    pub const SERVICE_UNAVAILABLE: u16 = 400;
    /// No such newsgroup
    pub const NO_SUCH_GROUP: u16 = 411;
    /// No newsgroup selected
    pub const NO_GROUP_SELECTED: u16 = 412;
    /// No current article
    pub const NO_CURRENT_ARTICLE: u16 = 420;
    /// No next article
    pub const NO_NEXT_ARTICLE: u16 = 421;
    /// No previous article
    pub const NO_PREV_ARTICLE: u16 = 422;
    /// No article with that number
    pub const NO_SUCH_ARTICLE_NUMBER: u16 = 423;
    /// No article with that message-id
    pub const NO_SUCH_ARTICLE_ID: u16 = 430;

    // 5xx - Permanent errors
    /// Command not recognized
    pub const COMMAND_NOT_RECOGNIZED: u16 = 500;
    /// Command syntax error
    pub const COMMAND_SYNTAX_ERROR: u16 = 501;
    /// Access denied / command unavailable
    pub const ACCESS_DENIED: u16 = 502;
}
