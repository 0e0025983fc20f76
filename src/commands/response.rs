//! Status line parsing shared by the framer and the verb parsers

use crate::error::{NntpError, Result};

/// Parse an NNTP status line into code and message
///
/// The line must start with exactly three ASCII digits. A leading UTF-8 BOM
/// (sent by some broken servers and proxies) is ignored.
pub fn parse_response_line(line: &str) -> Result<(u16, String)> {
    let line = line.trim_start_matches('\u{FEFF}');

    let bytes = line.as_bytes();
    if bytes.len() < 3 || !bytes[..3].iter().all(u8::is_ascii_digit) {
        return Err(NntpError::InvalidResponse(line.chars().take(100).collect()));
    }

    // "99999" must not be read as code 999 with message "99"
    if bytes.len() > 3 && bytes[3].is_ascii_digit() {
        return Err(NntpError::InvalidResponse(line.chars().take(100).collect()));
    }

    let code = line[..3]
        .parse::<u16>()
        .map_err(|_| NntpError::InvalidResponse(line.chars().take(100).collect()))?;

    let message = match bytes.get(3) {
        Some(b' ') => line[4..].to_string(),
        Some(_) => line[3..].to_string(),
        None => String::new(),
    };

    Ok((code, message))
}

/// Whitespace-separated fields of a status line after the code
pub(crate) fn status_fields(status_line: &str) -> Vec<&str> {
    status_line.split_whitespace().skip(1).collect()
}

/// Parse an optional numeric status field; absent fields are 0
pub(crate) fn numeric_field(fields: &[&str], index: usize, status_line: &str) -> Result<u64> {
    match fields.get(index) {
        None => Ok(0),
        Some(field) => field.parse().map_err(|_| {
            NntpError::Parse(format!("non-numeric field {:?} in {:?}", field, status_line))
        }),
    }
}
