//! RFC 3977 Sections 6.1.3, 6.1.4, 6.2.4 - LAST, NEXT and STAT Tests
//!
//! All three respond with "223 n message-id".

use nntp_engine::commands::parse_stat_response;
use nntp_engine::{ArticleInfo, Command, Dispatcher, Event};

fn ready() -> Dispatcher {
    let mut dispatcher = Dispatcher::new();
    dispatcher.begin_connect();
    dispatcher.on_connected();
    dispatcher.feed(b"200 ready\r\n");
    dispatcher.drain_events();
    dispatcher
}

#[test]
fn test_navigation_command_formats() {
    assert_eq!(Command::next().wire_bytes(), b"NEXT\r\n");
    assert_eq!(Command::last().wire_bytes(), b"LAST\r\n");
    assert_eq!(Command::stat(None).wire_bytes(), b"STAT\r\n");
    assert_eq!(Command::stat(Some("3000234")).wire_bytes(), b"STAT 3000234\r\n");
    assert_eq!(
        Command::stat(Some("<45223423@example.com>")).wire_bytes(),
        b"STAT <45223423@example.com>\r\n"
    );
}

#[test]
fn test_stat_by_message_id_reports_zero_number() {
    let info = parse_stat_response("223 0 <45223423@example.com>").unwrap();
    assert_eq!(info.number, 0);
    assert_eq!(info.message_id, "<45223423@example.com>");
}

#[test]
fn test_next_last_stat_share_result() {
    let mut dispatcher = ready();
    dispatcher.next();
    dispatcher.last();
    dispatcher.stat(None);
    dispatcher.feed(b"223 3000237 <668929@example.org> retrieved\r\n");
    dispatcher.feed(b"223 3000234 <45223423@example.com> retrieved\r\n");
    dispatcher.feed(b"223 3000234 <45223423@example.com>\r\n");

    let results: Vec<ArticleInfo> = dispatcher
        .drain_events()
        .into_iter()
        .filter_map(|event| match event {
            Event::Stat(info) => Some(info),
            _ => None,
        })
        .collect();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].number, 3000237);
    assert_eq!(results[0].message_id, "<668929@example.org>");
    assert_eq!(results[1].number, 3000234);
    assert_eq!(results[2].message_id, "<45223423@example.com>");
}

#[test]
fn test_next_at_end_of_group() {
    let mut dispatcher = ready();
    dispatcher.next();
    dispatcher.feed(b"421 no next article in this group\r\n");
    assert_eq!(
        dispatcher.drain_events(),
        vec![Event::Error("421 no next article in this group".to_string())]
    );
}
