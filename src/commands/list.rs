//! LIST and LISTGROUP commands and body parsing

use crate::error::{NntpError, Result};

/// Build LIST command
pub fn list() -> &'static str {
    "LIST"
}

/// Build LIST ACTIVE command (RFC 3977 §7.6.3)
///
/// Lists active newsgroups matching the wildmat pattern.
pub fn list_active(wildmat: &str) -> String {
    format!("LIST ACTIVE {}", wildmat)
}

/// Build LISTGROUP command (RFC 3977 Section 6.1.2)
///
/// `LISTGROUP [group [start-[end]]]`. The range is only emitted with a group,
/// the end only with a start, and a start of 0 counts as absent.
pub fn listgroup(newsgroup: Option<&str>, start: Option<u64>, end: Option<u64>) -> String {
    let mut cmd = String::from("LISTGROUP");
    let Some(newsgroup) = newsgroup.filter(|g| !g.is_empty()) else {
        return cmd;
    };
    cmd.push(' ');
    cmd.push_str(newsgroup);

    if let Some(start) = start.filter(|&s| s != 0) {
        cmd.push_str(&format!(" {}-", start));
        if let Some(end) = end.filter(|&e| e != 0) {
            cmd.push_str(&end.to_string());
        }
    }
    cmd
}

/// Parse a LIST body: one entry per line, whitespace-separated fields
///
/// Blank lines carry no entry and are skipped.
pub fn parse_list_body(body: &str) -> Vec<Vec<String>> {
    body.lines()
        .map(|line| {
            line.split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .filter(|fields| !fields.is_empty())
        .collect()
}

/// Parse a LISTGROUP body: one article number per line
pub fn parse_listgroup_body(body: &str) -> Result<Vec<u64>> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.parse::<u64>()
                .map_err(|_| NntpError::Parse(format!("invalid article number {:?}", line)))
        })
        .collect()
}
