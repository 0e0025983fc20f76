//! RFC 3977 Section 5.2 - CAPABILITIES Command Tests

use nntp_engine::{Command, Dispatcher, Event};

fn ready() -> Dispatcher {
    let mut dispatcher = Dispatcher::new();
    dispatcher.begin_connect();
    dispatcher.on_connected();
    dispatcher.feed(b"200 ready\r\n");
    dispatcher.drain_events();
    dispatcher
}

#[test]
fn test_capabilities_command_format() {
    let cmd = Command::capabilities();
    assert_eq!(cmd.text(), "CAPABILITIES");
    assert!(cmd.expects_multiline());
}

#[test]
fn test_capabilities_lines() {
    let mut dispatcher = ready();
    dispatcher.capabilities();
    dispatcher.feed(b"101 Capability list:\r\nVERSION 2\r\nREADER\r\nLIST ACTIVE NEWSGROUPS\r\n.\r\n");

    let events = dispatcher.drain_events();
    assert_eq!(events[0], Event::Response("101 Capability list:".to_string()));
    assert_eq!(
        events[2],
        Event::Capabilities(vec![
            "VERSION 2".to_string(),
            "READER".to_string(),
            "LIST ACTIVE NEWSGROUPS".to_string(),
        ])
    );
}

#[test]
fn test_capabilities_unsupported_is_single_line() {
    // An old server answering 500 must not wait for a dot terminator
    let mut dispatcher = ready();
    dispatcher.capabilities();
    dispatcher.feed(b"500 What?\r\n");
    assert_eq!(
        dispatcher.drain_events(),
        vec![Event::Error("500 What?".to_string())]
    );
    assert!(!dispatcher.has_in_flight());
}
