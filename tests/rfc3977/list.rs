//! RFC 3977 Section 7.6 - LIST Command Tests

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
fn test_list_command_format() {
    assert_eq!(Command::list(None).wire_bytes(), b"LIST\r\n");
    assert_eq!(
        Command::list(Some("comp.lang.*")).wire_bytes(),
        b"LIST ACTIVE comp.lang.*\r\n"
    );
    // an empty pattern means plain LIST
    assert_eq!(Command::list(Some("")).text(), "LIST");
}

#[test]
fn test_list_fields() {
    let mut dispatcher = ready();
    dispatcher.list(None);
    dispatcher.feed(b"215 list follows\r\nalt.test 0000000010 0000000001 y\r\ncomp.lang.rust 500 1 m\r\n.\r\n");

    let events = dispatcher.drain_events();
    assert_eq!(events[0], Event::Response("215 list follows".to_string()));
    assert_eq!(
        events[1],
        Event::Text("alt.test 0000000010 0000000001 y\r\ncomp.lang.rust 500 1 m".to_string())
    );
    assert_eq!(
        events[2],
        Event::List(vec![
            vec![
                "alt.test".to_string(),
                "0000000010".to_string(),
                "0000000001".to_string(),
                "y".to_string(),
            ],
            vec![
                "comp.lang.rust".to_string(),
                "500".to_string(),
                "1".to_string(),
                "m".to_string(),
            ],
        ])
    );
}

#[test]
fn test_list_preserves_server_order() {
    let mut dispatcher = ready();
    dispatcher.list(Some("*"));
    dispatcher.feed(b"215 list follows\r\nz.last 1 1 y\r\na.first 1 1 y\r\n.\r\n");
    match dispatcher.drain_events().pop() {
        Some(Event::List(groups)) => {
            assert_eq!(groups[0][0], "z.last");
            assert_eq!(groups[1][0], "a.first");
        }
        other => panic!("expected list, got {other:?}"),
    }
}

#[test]
fn test_list_unsupported_variant() {
    let mut dispatcher = ready();
    dispatcher.list(Some("foo"));
    dispatcher.feed(b"503 data item not stored\r\n");
    assert_eq!(
        dispatcher.drain_events(),
        vec![Event::Error("503 data item not stored".to_string())]
    );
}
