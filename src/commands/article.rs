//! Article retrieval and navigation commands

use super::response::{numeric_field, status_fields};
use crate::error::Result;

fn with_descriptor(verb: &str, descriptor: Option<&str>) -> String {
    match descriptor.filter(|d| !d.is_empty()) {
        Some(descriptor) => format!("{} {}", verb, descriptor),
        None => verb.to_string(),
    }
}

/// Build ARTICLE command; without a descriptor the current article is used
pub fn article(descriptor: Option<&str>) -> String {
    with_descriptor("ARTICLE", descriptor)
}

/// Build HEAD command
pub fn head(descriptor: Option<&str>) -> String {
    with_descriptor("HEAD", descriptor)
}

/// Build BODY command
pub fn body(descriptor: Option<&str>) -> String {
    with_descriptor("BODY", descriptor)
}

/// Build STAT command (RFC 3977 §6.2.4)
///
/// Gets article status without retrieving content.
/// Can be used with article number or message-id.
pub fn stat(descriptor: Option<&str>) -> String {
    with_descriptor("STAT", descriptor)
}

/// Build NEXT command (RFC 3977 §6.1.4)
pub fn next() -> &'static str {
    "NEXT"
}

/// Build LAST command (RFC 3977 §6.1.3)
pub fn last() -> &'static str {
    "LAST"
}

/// Article information returned by STAT, NEXT, and LAST commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleInfo {
    /// Article number (0 if message-id was used in STAT request)
    pub number: u64,
    /// Message identifier (e.g., "<abc@example.com>")
    pub message_id: String,
}

/// Parse STAT/NEXT/LAST status line: "223 n message-id"
///
/// A missing number is 0 and a missing message-id is empty.
pub fn parse_stat_response(status_line: &str) -> Result<ArticleInfo> {
    let fields = status_fields(status_line);

    Ok(ArticleInfo {
        number: numeric_field(&fields, 0, status_line)?,
        message_id: fields.get(1).map(|id| id.to_string()).unwrap_or_default(),
    })
}

/// Split an ARTICLE body at the first blank line into header lines and body text
///
/// An article without a blank line is all headers.
pub fn split_article(text: &str) -> (Vec<String>, String) {
    let (headers, body) = text
        .split_once("\r\n\r\n")
        .or_else(|| text.split_once("\n\n"))
        .unwrap_or((text, ""));

    (parse_header_lines(headers), body.to_string())
}

/// Parse a HEAD body into its header lines
pub fn parse_header_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}
