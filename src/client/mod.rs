//! Async NNTP client: tokio transport around the sans-I/O dispatcher

mod connection;
mod driver;

pub use connection::Transport;

use crate::commands::Command;
use crate::config::ServerConfig;
use crate::dispatcher::Dispatcher;
use crate::error::{NntpError, Result};
use crate::event::Event;
use driver::Driver;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

/// Handle to a running NNTP connection
///
/// Commands are submitted without waiting: each method only queues the
/// command and returns. Results arrive, in submission order, on the event
/// receiver returned by [`connect`](Self::connect).
///
/// # Example
///
/// ```no_run
/// use nntp_engine::{Event, NntpClient, ServerConfig};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ServerConfig::plain("news.example.com");
/// let (client, mut events) = NntpClient::connect(Arc::new(config)).await?;
///
/// client.group("misc.test")?;
/// while let Some(event) = events.recv().await {
///     if let Event::Group(info) = event {
///         println!("{} has {} articles", info.name, info.count);
///         break;
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[must_use]
#[derive(Clone)]
pub struct NntpClient {
    commands: UnboundedSender<Command>,
    config: Arc<ServerConfig>,
}

impl NntpClient {
    /// Connect to the server described by `config`
    ///
    /// The server greeting is reported as the first [`Event::Welcome`] (or
    /// [`Event::Error`] when the server refuses service).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - [`NntpError::Io`] - TCP connection fails (DNS resolution, network unreachable, etc.)
    /// - [`NntpError::Tls`] - TLS handshake fails (invalid certificate, protocol error)
    /// - [`NntpError::Timeout`] - Connection or handshake times out
    pub async fn connect(config: Arc<ServerConfig>) -> Result<(Self, UnboundedReceiver<Event>)> {
        let stream = connection::open(&config).await?;
        Ok(Self::spawn(stream, config))
    }

    /// Run a connection over an already established transport
    ///
    /// Must be called within a tokio runtime.
    pub fn spawn<T>(stream: T, config: Arc<ServerConfig>) -> (Self, UnboundedReceiver<Event>)
    where
        T: Transport + 'static,
    {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let mut dispatcher = Dispatcher::new();
        dispatcher.begin_connect();
        dispatcher.on_connected();

        let driver = Driver {
            dispatcher,
            commands: command_rx,
            events: event_tx,
            response_timeout: config.response_timeout,
        };
        tokio::spawn(driver.run(Box::new(stream)));
        debug!("Connection to {}:{} started", config.host, config.port);

        (
            Self {
                commands: command_tx,
                config,
            },
            event_rx,
        )
    }

    /// Server configuration this client was created with
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Whether the connection has stopped and no longer accepts commands
    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    /// Queue an arbitrary command
    ///
    /// # Errors
    ///
    /// [`NntpError::ConnectionClosed`] once the connection has stopped.
    pub fn submit(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| NntpError::ConnectionClosed)
    }

    /// `LIST`, or `LIST ACTIVE <wildmat>`; result: [`Event::List`]
    pub fn list(&self, wildmat: Option<&str>) -> Result<()> {
        self.submit(Command::list(wildmat))
    }

    /// `GROUP <name>`; result: [`Event::Group`]
    pub fn group(&self, name: &str) -> Result<()> {
        self.submit(Command::group(name))
    }

    /// `LISTGROUP [<group> [<start>-[<end>]]]`; result: [`Event::ListGroup`]
    pub fn listgroup(&self, newsgroup: Option<&str>, start: Option<u64>, end: Option<u64>) -> Result<()> {
        self.submit(Command::listgroup(newsgroup, start, end))
    }

    /// `STAT [<descriptor>]`; result: [`Event::Stat`]
    pub fn stat(&self, descriptor: Option<&str>) -> Result<()> {
        self.submit(Command::stat(descriptor))
    }

    /// `NEXT`; result: [`Event::Stat`]
    pub fn next(&self) -> Result<()> {
        self.submit(Command::next())
    }

    /// `LAST`; result: [`Event::Stat`]
    pub fn last(&self) -> Result<()> {
        self.submit(Command::last())
    }

    /// `ARTICLE [<descriptor>]`; result: [`Event::Article`]
    pub fn article(&self, descriptor: Option<&str>) -> Result<()> {
        self.submit(Command::article(descriptor))
    }

    /// `HEAD [<descriptor>]`; result: [`Event::Head`]
    pub fn head(&self, descriptor: Option<&str>) -> Result<()> {
        self.submit(Command::head(descriptor))
    }

    /// `BODY [<descriptor>]`; result: [`Event::Body`]
    pub fn body(&self, descriptor: Option<&str>) -> Result<()> {
        self.submit(Command::body(descriptor))
    }

    /// `HELP`; result: [`Event::Help`]
    pub fn help(&self) -> Result<()> {
        self.submit(Command::help())
    }

    /// `CAPABILITIES`; result: [`Event::Capabilities`]
    pub fn capabilities(&self) -> Result<()> {
        self.submit(Command::capabilities())
    }

    /// `DATE`; result: [`Event::Date`]
    pub fn date(&self) -> Result<()> {
        self.submit(Command::date())
    }

    /// `QUIT`; result: [`Event::Quit`], after which the connection stops
    pub fn quit(&self) -> Result<()> {
        self.submit(Command::quit())
    }
}
