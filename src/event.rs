//! Events delivered to the consumer of a connection

use crate::commands::{ArticleInfo, GroupInfo};

/// Everything the engine reports, one variant per payload kind
///
/// For each successful command the consumer sees [`Event::Response`], then
/// [`Event::Text`] when a body is present, then the verb-specific event (or
/// [`Event::ParseError`] when the payload could not be parsed). A failed
/// command produces only [`Event::Error`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Status line of any successful response
    Response(String),
    /// Raw body of any successful response that has one
    Text(String),
    /// Status line of a failed (4xx/5xx) response
    Error(String),
    /// A verb-specific parser rejected the response; the queue still advances
    ParseError {
        /// Status line of the rejected response
        status_line: String,
        /// What could not be parsed
        reason: String,
    },
    /// The response stream could not be framed (malformed status line or a
    /// response cut off by the transport)
    FramingError(String),
    /// The transport reported a socket-level failure
    ConnectionLost(String),

    /// Server greeting
    Welcome {
        /// Greeting status line
        banner: String,
        /// Greeting was "200"
        posting_allowed: bool,
    },
    /// LIST result: whitespace-separated fields per line
    List(Vec<Vec<String>>),
    /// GROUP result
    Group(GroupInfo),
    /// LISTGROUP article numbers
    ListGroup(Vec<u64>),
    /// STAT, NEXT or LAST result
    Stat(ArticleInfo),
    /// ARTICLE split into header lines and body text
    Article {
        /// Header lines
        headers: Vec<String>,
        /// Text after the first blank line
        body: String,
    },
    /// HEAD header lines
    Head(Vec<String>),
    /// BODY text
    Body(String),
    /// HELP text lines
    Help(Vec<String>),
    /// CAPABILITIES lines
    Capabilities(Vec<String>),
    /// DATE timestamp (yyyymmddhhmmss)
    Date(String),
    /// QUIT acknowledged
    Quit,
}

impl Event {
    /// Whether this event reports a failure of any kind
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Event::Error(_)
                | Event::ParseError { .. }
                | Event::FramingError(_)
                | Event::ConnectionLost(_)
        )
    }
}
