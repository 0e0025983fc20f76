//! NNTP command builders, response parsers and the command/parser binding

pub mod article;
pub mod group;
pub mod list;
pub mod response;

pub use article::*;
pub use group::*;
pub use list::*;
pub use response::parse_response_line;

use crate::error::{NntpError, Result};
use crate::event::Event;
use crate::response::NntpResponse;
use crate::session::SessionState;

/// Build HELP command (RFC 3977 §7.2)
///
/// Response is multi-line, starting with 100.
pub fn help() -> &'static str {
    "HELP"
}

/// Build CAPABILITIES command (RFC 3977 §5.2)
///
/// Response is multi-line, starting with 101.
pub fn capabilities() -> &'static str {
    "CAPABILITIES"
}

/// Build DATE command (RFC 3977 §7.1)
///
/// Response: 111 yyyymmddhhmmss
pub fn date() -> &'static str {
    "DATE"
}

/// Build QUIT command
pub fn quit() -> &'static str {
    "QUIT"
}

/// Parse DATE status line: "111 yyyymmddhhmmss"
pub fn parse_date_response(status_line: &str) -> Result<String> {
    let stamp = response::status_fields(status_line)
        .first()
        .copied()
        .unwrap_or_default();
    if stamp.len() != 14 || !stamp.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NntpError::Parse(format!(
            "invalid server date {:?}",
            stamp
        )));
    }
    Ok(stamp.to_string())
}

/// Which verb a queued command is, and therefore which parser handles its response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    /// Synthetic entry awaiting the server greeting; never transmitted
    Welcome,
    /// LIST or LIST ACTIVE
    List,
    Group {
        /// Requested group name
        name: String,
    },
    /// LISTGROUP
    ListGroup,
    /// STAT
    Stat,
    /// NEXT
    Next,
    /// LAST
    Last,
    /// ARTICLE
    Article,
    /// HEAD
    Head,
    /// BODY
    Body,
    /// HELP
    Help,
    /// CAPABILITIES
    Capabilities,
    /// DATE
    Date,
    /// QUIT
    Quit,
}

impl CommandKind {
    /// Whether responses to this verb may carry a multi-line block
    pub fn expects_multiline(&self) -> bool {
        matches!(
            self,
            CommandKind::List
                | CommandKind::ListGroup
                | CommandKind::Article
                | CommandKind::Head
                | CommandKind::Body
                | CommandKind::Help
                | CommandKind::Capabilities
        )
    }

    /// Run this verb's parser over a successful response
    ///
    /// GROUP and the welcome greeting update `session`; every other parser is pure.
    pub(crate) fn parse(
        &self,
        response: &NntpResponse,
        session: &mut SessionState,
    ) -> Result<Event> {
        let status_line = response.status_line.as_str();
        let text = response.body_text();

        let event = match self {
            CommandKind::Welcome => {
                session.record_welcome(status_line);
                Event::Welcome {
                    banner: status_line.to_string(),
                    posting_allowed: session.posting_allowed(),
                }
            }
            CommandKind::List => Event::List(parse_list_body(text)),
            CommandKind::Group { .. } => {
                let mut info = parse_group_response(status_line)?;
                if !info.name.is_empty() {
                    session.group_selected(&info.name);
                }
                info.name = session.current_group().to_string();
                Event::Group(info)
            }
            CommandKind::ListGroup => Event::ListGroup(parse_listgroup_body(text)?),
            CommandKind::Stat | CommandKind::Next | CommandKind::Last => {
                Event::Stat(parse_stat_response(status_line)?)
            }
            CommandKind::Article => {
                let (headers, body) = split_article(text);
                Event::Article { headers, body }
            }
            CommandKind::Head => Event::Head(parse_header_lines(text)),
            CommandKind::Body => Event::Body(text.to_string()),
            CommandKind::Help => Event::Help(parse_header_lines(text)),
            CommandKind::Capabilities => Event::Capabilities(parse_header_lines(text)),
            CommandKind::Date => Event::Date(parse_date_response(status_line)?),
            CommandKind::Quit => Event::Quit,
        };
        Ok(event)
    }
}

/// A queued command: its verb binding, wire text and multi-line expectation
///
/// Immutable once built. The text excludes the CRLF terminator, which is
/// appended on transmission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    kind: CommandKind,
    text: String,
    multiline: bool,
}

impl Command {
    fn new(kind: CommandKind, text: impl Into<String>) -> Self {
        let multiline = kind.expects_multiline();
        Self {
            kind,
            text: text.into(),
            multiline,
        }
    }

    /// Greeting placeholder placed at the head of the queue on connect
    pub(crate) fn welcome() -> Self {
        Self::new(CommandKind::Welcome, "")
    }

    /// `LIST`, or `LIST ACTIVE <wildmat>` when a pattern is given
    pub fn list(wildmat: Option<&str>) -> Self {
        match wildmat.filter(|w| !w.is_empty()) {
            Some(wildmat) => Self::new(CommandKind::List, list_active(wildmat)),
            None => Self::new(CommandKind::List, list()),
        }
    }

    /// `GROUP <name>`
    pub fn group(name: &str) -> Self {
        Self::new(
            CommandKind::Group {
                name: name.to_string(),
            },
            group(name),
        )
    }

    /// `LISTGROUP [<group> [<start>-[<end>]]]`
    pub fn listgroup(newsgroup: Option<&str>, start: Option<u64>, end: Option<u64>) -> Self {
        Self::new(CommandKind::ListGroup, listgroup(newsgroup, start, end))
    }

    /// `STAT [<descriptor>]`
    pub fn stat(descriptor: Option<&str>) -> Self {
        Self::new(CommandKind::Stat, stat(descriptor))
    }

    /// `NEXT`
    pub fn next() -> Self {
        Self::new(CommandKind::Next, next())
    }

    /// `LAST`
    pub fn last() -> Self {
        Self::new(CommandKind::Last, last())
    }

    /// `ARTICLE [<descriptor>]`
    pub fn article(descriptor: Option<&str>) -> Self {
        Self::new(CommandKind::Article, article(descriptor))
    }

    /// `HEAD [<descriptor>]`
    pub fn head(descriptor: Option<&str>) -> Self {
        Self::new(CommandKind::Head, head(descriptor))
    }

    /// `BODY [<descriptor>]`
    pub fn body(descriptor: Option<&str>) -> Self {
        Self::new(CommandKind::Body, body(descriptor))
    }

    /// `HELP`
    pub fn help() -> Self {
        Self::new(CommandKind::Help, help())
    }

    /// `CAPABILITIES`
    pub fn capabilities() -> Self {
        Self::new(CommandKind::Capabilities, capabilities())
    }

    /// `DATE`
    pub fn date() -> Self {
        Self::new(CommandKind::Date, date())
    }

    /// `QUIT`
    pub fn quit() -> Self {
        Self::new(CommandKind::Quit, quit())
    }

    /// Verb binding
    pub fn kind(&self) -> &CommandKind {
        &self.kind
    }

    /// Command line without CRLF
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the response may be a dot-terminated multi-line block
    pub fn expects_multiline(&self) -> bool {
        self.multiline
    }

    /// Bytes written to the transport: the text followed by CRLF
    pub fn wire_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.text.len() + 2);
        bytes.extend_from_slice(self.text.as_bytes());
        bytes.extend_from_slice(b"\r\n");
        bytes
    }
}
