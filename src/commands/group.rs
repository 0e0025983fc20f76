//! Group selection command

use super::response::{numeric_field, status_fields};
use crate::error::Result;

/// Build GROUP command
pub fn group(newsgroup: &str) -> String {
    format!("GROUP {}", newsgroup)
}

/// Group information returned by the GROUP command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupInfo {
    /// Estimated number of articles in the group
    pub count: u64,
    /// Number of the first article
    pub low: u64,
    /// Number of the last article
    pub high: u64,
    /// Selected group name, lowercased
    pub name: String,
}

/// Parse GROUP status line: "211 count low high group"
///
/// Missing numeric fields are 0 and a missing group name is returned empty.
/// The name is lowercased.
pub fn parse_group_response(status_line: &str) -> Result<GroupInfo> {
    let fields = status_fields(status_line);

    let count = numeric_field(&fields, 0, status_line)?;
    let low = numeric_field(&fields, 1, status_line)?;
    let high = numeric_field(&fields, 2, status_line)?;
    let name = fields
        .get(3)
        .map(|name| name.to_lowercase())
        .unwrap_or_default();

    Ok(GroupInfo {
        count,
        low,
        high,
        name,
    })
}
