//! RFC 3977 Section 3.2.1 - Error Response Handling Tests
//!
//! 4xx and 5xx responses are reported as error events, record the last
//! error, and never stop the queue.

use nntp_engine::{Dispatcher, Event, codes};

fn ready() -> Dispatcher {
    let mut dispatcher = Dispatcher::new();
    dispatcher.begin_connect();
    dispatcher.on_connected();
    dispatcher.feed(b"200 ready\r\n");
    dispatcher.drain_events();
    dispatcher
}

#[test]
fn test_error_codes_are_failures() {
    for line in [
        "400 service unavailable",
        "412 no newsgroup selected",
        "420 no current article",
        "423 no article with that number",
        "430 no such article",
        "500 command not recognized",
        "501 syntax error",
        "502 access denied",
    ] {
        let mut dispatcher = ready();
        dispatcher.stat(None);
        dispatcher.feed(format!("{line}\r\n").as_bytes());
        assert_eq!(dispatcher.drain_events(), vec![Event::Error(line.to_string())]);
        assert_eq!(dispatcher.session().last_error(), line);
    }
}

#[test]
fn test_error_does_not_run_parser() {
    let mut dispatcher = ready();
    dispatcher.head(Some("<gone@example>"));
    dispatcher.feed(b"430 no such article\r\n");
    let events = dispatcher.drain_events();
    assert_eq!(events.len(), 1);
    assert!(!events.iter().any(|e| matches!(e, Event::Head(_))));
}

#[test]
fn test_queue_advances_after_error() {
    let mut dispatcher = ready();
    dispatcher.next();
    dispatcher.last();
    assert_eq!(dispatcher.poll_transmit().unwrap(), b"NEXT\r\n");

    dispatcher.feed(format!("{} no next article\r\n", codes::NO_NEXT_ARTICLE).as_bytes());
    assert_eq!(dispatcher.poll_transmit().unwrap(), b"LAST\r\n");
    assert_eq!(dispatcher.pending(), 1);
}

#[test]
fn test_refused_greeting() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.begin_connect();
    dispatcher.on_connected();
    dispatcher.feed(b"502 service permanently unavailable\r\n");
    assert_eq!(
        dispatcher.drain_events(),
        vec![Event::Error("502 service permanently unavailable".to_string())]
    );
    assert!(!dispatcher.session().posting_allowed());
}
