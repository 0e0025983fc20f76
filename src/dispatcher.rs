//! Command queue and response dispatch
//!
//! The [`Dispatcher`] is the sans-I/O core of a connection. It never touches a
//! socket: the transport feeds it inbound bytes and connection events, and
//! drains the bytes it wants written ([`Dispatcher::poll_transmit`]) and the
//! events it produced ([`Dispatcher::poll_event`]).
//!
//! Exactly one command is outstanding at any time. A command is written only
//! when it becomes the head of the queue, either because the queue was empty
//! when it was enqueued or because the previous head's response completed.

use std::collections::VecDeque;

use tracing::{debug, trace, warn};

use crate::commands::{Command, CommandKind};
use crate::error::NntpError;
use crate::event::Event;
use crate::framer::ResponseFramer;
use crate::response::{Classification, NntpResponse};
use crate::session::{ConnectionState, SessionState};

/// Command queue, response framer and session state for one connection
#[derive(Debug, Default)]
pub struct Dispatcher {
    queue: VecDeque<Command>,
    /// Whether the head of `queue` has been written (or, for the welcome
    /// entry, is awaiting the greeting)
    head_sent: bool,
    framer: ResponseFramer,
    session: SessionState,
    state: ConnectionState,
    /// Set after a framing failure; nothing more is transmitted or parsed
    broken: bool,
    outbox: VecDeque<Vec<u8>>,
    events: VecDeque<Event>,
}

impl Dispatcher {
    /// Create a disconnected dispatcher with an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Session state (current group, posting flag, last error)
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Current connection state
    pub fn connection_state(&self) -> ConnectionState {
        self.state
    }

    /// Whether a framing failure has stopped this dispatcher
    pub fn is_broken(&self) -> bool {
        self.broken
    }

    /// Number of queued commands, including the in-flight head
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Whether the head of the queue is awaiting its response
    pub fn has_in_flight(&self) -> bool {
        self.head_sent && !self.queue.is_empty()
    }

    /// Reset for a new connection attempt
    ///
    /// The queue is re-initialized with the synthetic welcome entry, so the
    /// server greeting is the first response processed. Previously queued
    /// commands, buffered bytes and session state are discarded.
    pub fn begin_connect(&mut self) {
        if !self.queue.is_empty() {
            debug!("Discarding {} queued commands on reconnect", self.queue.len());
        }
        self.queue.clear();
        self.queue.push_back(Command::welcome());
        self.head_sent = true;
        self.framer.reset();
        self.session = SessionState::default();
        self.state = ConnectionState::Connecting;
        self.broken = false;
        self.outbox.clear();
    }

    /// Transport reports the connection is established
    pub fn on_connected(&mut self) {
        debug!("Connection established");
        self.state = ConnectionState::Connected;
        self.transmit_head();
    }

    /// Transport reports a socket-level failure
    ///
    /// A partially received response is reported as a framing error first.
    /// Nothing further is transmitted until [`begin_connect`](Self::begin_connect).
    pub fn on_connection_error(&mut self, reason: &str) {
        warn!("Connection error: {}", reason);
        self.abandon_partial_response();
        self.state = ConnectionState::Disconnected;
        self.events.push_back(Event::ConnectionLost(reason.to_string()));
    }

    /// Transport reports the connection closed cleanly
    pub fn on_closed(&mut self) {
        debug!("Connection closed");
        self.abandon_partial_response();
        self.state = ConnectionState::Closed;
    }

    /// Append a command; it is transmitted only if the queue was empty
    ///
    /// The welcome entry is only ever placed by [`begin_connect`](Self::begin_connect)
    /// and is ignored here.
    pub fn enqueue(&mut self, command: Command) {
        if *command.kind() == CommandKind::Welcome {
            warn!("Ignoring welcome entry submitted as a command");
            return;
        }
        if let CommandKind::Group { name } = command.kind() {
            self.session.begin_group_selection(name);
        }

        let was_empty = self.queue.is_empty();
        debug!("Queueing command: {}", command.text());
        self.queue.push_back(command);

        if was_empty {
            self.head_sent = false;
            self.transmit_head();
        }
    }

    /// Feed bytes received from the transport
    pub fn feed(&mut self, bytes: &[u8]) {
        if self.broken {
            warn!("Discarding {} bytes received after framing failure", bytes.len());
            return;
        }
        let Some(head) = self.queue.front() else {
            warn!("Discarding {} unsolicited bytes", bytes.len());
            return;
        };

        match self.framer.feed(bytes, head.expects_multiline()) {
            Ok(Some(response)) => self.on_response_complete(response),
            Ok(None) => {}
            Err(e) => self.on_framing_error(e),
        }
    }

    /// Next chunk of bytes to write to the transport
    pub fn poll_transmit(&mut self) -> Option<Vec<u8>> {
        self.outbox.pop_front()
    }

    /// Next event for the consumer
    pub fn poll_event(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }

    /// Enqueue `LIST` or `LIST ACTIVE <wildmat>`
    pub fn list(&mut self, wildmat: Option<&str>) {
        self.enqueue(Command::list(wildmat));
    }

    /// Enqueue `GROUP <name>`; the current group is preset optimistically
    pub fn group(&mut self, name: &str) {
        self.enqueue(Command::group(name));
    }

    /// Enqueue `LISTGROUP [<group> [<start>-[<end>]]]`
    pub fn listgroup(&mut self, newsgroup: Option<&str>, start: Option<u64>, end: Option<u64>) {
        self.enqueue(Command::listgroup(newsgroup, start, end));
    }

    /// Enqueue `STAT [<descriptor>]`
    pub fn stat(&mut self, descriptor: Option<&str>) {
        self.enqueue(Command::stat(descriptor));
    }

    /// Enqueue `NEXT`
    pub fn next(&mut self) {
        self.enqueue(Command::next());
    }

    /// Enqueue `LAST`
    pub fn last(&mut self) {
        self.enqueue(Command::last());
    }

    /// Enqueue `ARTICLE [<descriptor>]`
    pub fn article(&mut self, descriptor: Option<&str>) {
        self.enqueue(Command::article(descriptor));
    }

    /// Enqueue `HEAD [<descriptor>]`
    pub fn head(&mut self, descriptor: Option<&str>) {
        self.enqueue(Command::head(descriptor));
    }

    /// Enqueue `BODY [<descriptor>]`
    pub fn body(&mut self, descriptor: Option<&str>) {
        self.enqueue(Command::body(descriptor));
    }

    /// Enqueue `HELP`
    pub fn help(&mut self) {
        self.enqueue(Command::help());
    }

    /// Enqueue `CAPABILITIES`
    pub fn capabilities(&mut self) {
        self.enqueue(Command::capabilities());
    }

    /// Enqueue `DATE`
    pub fn date(&mut self) {
        self.enqueue(Command::date());
    }

    /// Enqueue `QUIT`
    pub fn quit(&mut self) {
        self.enqueue(Command::quit());
    }

    fn transmit_head(&mut self) {
        if self.head_sent || self.broken || self.state != ConnectionState::Connected {
            return;
        }
        let Some(head) = self.queue.front() else {
            return;
        };
        trace!("Sending command: {}", head.text());
        self.outbox.push_back(head.wire_bytes());
        self.head_sent = true;
    }

    fn on_response_complete(&mut self, response: NntpResponse) {
        let Some(command) = self.queue.pop_front() else {
            return;
        };
        self.head_sent = false;

        match response.classification() {
            Classification::Failure => {
                debug!("Command {:?} failed: {}", command.text(), response.status_line);
                self.session.record_error(&response.status_line);
                if matches!(command.kind(), CommandKind::Group { .. }) {
                    self.session.group_failed();
                }
                self.events.push_back(Event::Error(response.status_line));
            }
            Classification::Success => {
                self.events
                    .push_back(Event::Response(response.status_line.clone()));
                if let Some(body) = &response.body {
                    self.events.push_back(Event::Text(body.clone()));
                }
                match command.kind().parse(&response, &mut self.session) {
                    Ok(event) => {
                        if event == Event::Quit {
                            self.state = ConnectionState::Closed;
                        }
                        self.events.push_back(event);
                    }
                    Err(e) => {
                        warn!("Failed to parse {:?} response: {}", command.text(), e);
                        self.session.record_error(&response.status_line);
                        self.events.push_back(Event::ParseError {
                            status_line: response.status_line,
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        self.transmit_head();
    }

    fn on_framing_error(&mut self, error: NntpError) {
        warn!("Framing failure, stopping dispatcher: {}", error);
        self.queue.pop_front();
        self.head_sent = false;
        self.broken = true;
        let message = error.to_string();
        self.session.record_error(&message);
        self.events.push_back(Event::FramingError(message));
    }

    fn abandon_partial_response(&mut self) {
        if self.framer.is_empty() {
            return;
        }
        let message = format!(
            "response incomplete: {} bytes received before the connection ended",
            self.framer.buffered_len()
        );
        warn!("{}", message);
        self.framer.reset();
        self.events.push_back(Event::FramingError(message));
    }
}
