//! RFC 3977 Section 3.1 - Response Line Parsing and Classification Tests
//!
//! - Responses begin with a three-digit status code
//! - Status code is followed by optional space and message
//! - 1xx, 2xx and 3xx complete a command successfully; anything else fails

use nntp_engine::commands::parse_response_line;
use nntp_engine::{Classification, NntpResponse, classify, codes, is_multiline_code};

// Valid Response Parsing (RFC 3977 §3.1)

#[test]
fn test_response_three_digit_code_with_message() {
    let (code, msg) = parse_response_line("200 server ready").unwrap();
    assert_eq!(code, 200);
    assert_eq!(msg, "server ready");
}

#[test]
fn test_response_three_digit_code_only() {
    let (code, msg) = parse_response_line("205").unwrap();
    assert_eq!(code, codes::CLOSING_CONNECTION);
    assert_eq!(msg, "");
}

#[test]
fn test_response_representative_codes() {
    let test_cases = [
        ("100 help text follows", 100),
        ("111 20240101120000", 111),
        ("201 no posting", 201),
        ("211 1234 5 6789 group.name", 211),
        ("223 0 <msgid> status", 223),
        ("340 send article", 340),
        ("411 no such newsgroup", 411),
        ("502 access denied", 502),
    ];

    for (input, expected_code) in test_cases {
        let (code, _) = parse_response_line(input).unwrap();
        assert_eq!(code, expected_code, "Failed for input: {}", input);
    }
}

// Invalid Response Parsing

#[test]
fn test_response_rejects_short_or_non_numeric() {
    assert!(parse_response_line("").is_err());
    assert!(parse_response_line("20").is_err());
    assert!(parse_response_line("abc hello").is_err());
    assert!(parse_response_line("2x0 hello").is_err());
}

#[test]
fn test_response_rejects_four_digit_code() {
    assert!(parse_response_line("2000 hello").is_err());
}

#[test]
fn test_response_ignores_utf8_bom() {
    let (code, msg) = parse_response_line("\u{FEFF}200 ready").unwrap();
    assert_eq!(code, 200);
    assert_eq!(msg, "ready");
}

// Classification

#[test]
fn test_classification_by_leading_digit() {
    assert_eq!(classify("100 help"), Classification::Success);
    assert_eq!(classify("215 list follows"), Classification::Success);
    assert_eq!(classify("381 password required"), Classification::Success);
    assert_eq!(classify("430 no such article"), Classification::Failure);
    assert_eq!(classify("500 what?"), Classification::Failure);
    assert_eq!(classify(""), Classification::Failure);
    assert_eq!(classify("garbage"), Classification::Failure);
}

#[test]
fn test_response_accessors() {
    let response = NntpResponse {
        code: 215,
        status_line: "215 list follows".to_string(),
        body: Some("alt.test 2 1 y".to_string()),
    };
    assert_eq!(response.message(), "list follows");
    assert_eq!(response.body_text(), "alt.test 2 1 y");
    assert!(response.is_success());
    assert!(!response.is_error());

    let failure = NntpResponse {
        code: 423,
        status_line: "423 no such article".to_string(),
        body: None,
    };
    assert_eq!(failure.body_text(), "");
    assert!(!failure.is_success());
    assert!(failure.is_error());
}

#[test]
fn test_multiline_codes() {
    for code in ["100", "101", "211", "215", "220", "221", "222", "224", "225", "230", "231"] {
        assert!(is_multiline_code(code.as_bytes()), "{code} should be multi-line");
    }
    for code in ["111", "200", "205", "223", "411", "500"] {
        assert!(!is_multiline_code(code.as_bytes()), "{code} should be single-line");
    }
}
