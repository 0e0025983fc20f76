//! RFC 3977 Section 6.1.1 - GROUP Command Tests
//!
//! Response: "211 number low high group"

use nntp_engine::commands::parse_group_response;
use nntp_engine::{Command, Dispatcher, Event, GroupInfo};

fn ready() -> Dispatcher {
    let mut dispatcher = Dispatcher::new();
    dispatcher.begin_connect();
    dispatcher.on_connected();
    dispatcher.feed(b"200 ready\r\n");
    dispatcher.drain_events();
    dispatcher
}

#[test]
fn test_group_command_format() {
    let cmd = Command::group("misc.test");
    assert_eq!(cmd.text(), "GROUP misc.test");
    assert_eq!(cmd.wire_bytes(), b"GROUP misc.test\r\n");
    assert!(!cmd.expects_multiline());
}

#[test]
fn test_group_selected() {
    let mut dispatcher = ready();
    dispatcher.group("misc.test");
    dispatcher.feed(b"211 5 100 105 misc.test\r\n");

    assert_eq!(dispatcher.session().current_group(), "misc.test");
    assert_eq!(
        dispatcher.drain_events(),
        vec![
            Event::Response("211 5 100 105 misc.test".to_string()),
            Event::Group(GroupInfo {
                count: 5,
                low: 100,
                high: 105,
                name: "misc.test".to_string(),
            }),
        ]
    );
}

#[test]
fn test_group_name_lowercased_from_server() {
    let mut dispatcher = ready();
    dispatcher.group("misc.test");
    dispatcher.feed(b"211 5 100 105 Misc.Test\r\n");
    assert_eq!(dispatcher.session().current_group(), "misc.test");
}

#[test]
fn test_group_preset_before_response() {
    let mut dispatcher = ready();
    dispatcher.group("Alt.Binaries.Test");
    assert_eq!(dispatcher.session().current_group(), "alt.binaries.test");
}

#[test]
fn test_group_failure_clears_current_group() {
    let mut dispatcher = ready();
    dispatcher.group("misc.test");
    dispatcher.feed(b"211 5 100 105 misc.test\r\n");
    dispatcher.drain_events();

    dispatcher.group("no.such.group");
    dispatcher.feed(b"411 no such newsgroup\r\n");

    assert_eq!(dispatcher.session().current_group(), "");
    assert_eq!(dispatcher.session().last_error(), "411 no such newsgroup");
    assert_eq!(
        dispatcher.drain_events(),
        vec![Event::Error("411 no such newsgroup".to_string())]
    );
}

#[test]
fn test_failure_of_other_command_keeps_group() {
    let mut dispatcher = ready();
    dispatcher.group("misc.test");
    dispatcher.feed(b"211 5 100 105 misc.test\r\n");
    dispatcher.stat(Some("99"));
    dispatcher.feed(b"423 no article with that number\r\n");
    assert_eq!(dispatcher.session().current_group(), "misc.test");
}

#[test]
fn test_group_response_empty_group() {
    // For empty groups the high water mark may be one less than the low
    let info = parse_group_response("211 0 100 99 empty.group").unwrap();
    assert_eq!((info.count, info.low, info.high), (0, 100, 99));
}

#[test]
fn test_group_response_leading_zeros() {
    let info = parse_group_response("211 0042 001 0100 test.group").unwrap();
    assert_eq!((info.count, info.low, info.high), (42, 1, 100));
}

#[test]
fn test_group_response_non_numeric_is_parse_error() {
    let mut dispatcher = ready();
    dispatcher.group("misc.test");
    dispatcher.date();
    dispatcher.feed(b"211 lots 1 2 misc.test\r\n");

    let events = dispatcher.drain_events();
    assert!(matches!(
        events.last(),
        Some(Event::ParseError { status_line, .. }) if status_line == "211 lots 1 2 misc.test"
    ));
    // queue still advances
    let sent: Vec<Vec<u8>> = std::iter::from_fn(|| dispatcher.poll_transmit()).collect();
    assert_eq!(sent, vec![b"GROUP misc.test\r\n".to_vec(), b"DATE\r\n".to_vec()]);
}
