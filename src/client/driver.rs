//! Driver task: moves bytes between the socket and the dispatcher
//!
//! One task per connection owns the [`Dispatcher`], so commands submitted from
//! any number of handles are serialized through the command channel.

use super::connection::BoxedStream;
use crate::commands::Command;
use crate::dispatcher::Dispatcher;
use crate::event::Event;
use crate::session::ConnectionState;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt, WriteHalf};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, trace};

const READ_BUFFER_SIZE: usize = 64 * 1024;

pub(super) struct Driver {
    pub(super) dispatcher: Dispatcher,
    pub(super) commands: UnboundedReceiver<Command>,
    pub(super) events: UnboundedSender<Event>,
    pub(super) response_timeout: Option<Duration>,
}

impl Driver {
    pub(super) async fn run(mut self, stream: BoxedStream) {
        let (mut reader, mut writer) = tokio::io::split(stream);
        let mut buf = vec![0u8; READ_BUFFER_SIZE];
        let mut commands_open = true;
        // Last time the outstanding command made progress
        let mut last_progress = Instant::now();
        let mut was_in_flight = self.dispatcher.has_in_flight();

        loop {
            if let Err(e) = self.flush(&mut writer).await {
                self.dispatcher.on_connection_error(&e.to_string());
            }
            self.forward_events();

            if self.dispatcher.connection_state() != ConnectionState::Connected
                || self.dispatcher.is_broken()
            {
                break;
            }
            if !commands_open && self.dispatcher.pending() == 0 {
                debug!("All handles dropped and queue drained");
                break;
            }

            let in_flight = self.dispatcher.has_in_flight();
            if in_flight && !was_in_flight {
                last_progress = Instant::now();
            }
            was_in_flight = in_flight;
            let deadline = self
                .response_timeout
                .filter(|_| in_flight)
                .map(|t| last_progress + t);

            tokio::select! {
                read = reader.read(&mut buf) => match read {
                    Ok(0) if self.dispatcher.has_in_flight() => {
                        self.dispatcher.on_connection_error("connection closed by server");
                    }
                    Ok(0) => self.dispatcher.on_closed(),
                    Ok(n) => {
                        trace!("Read {} bytes", n);
                        last_progress = Instant::now();
                        self.dispatcher.feed(&buf[..n]);
                    }
                    Err(e) => self.dispatcher.on_connection_error(&e.to_string()),
                },
                command = self.commands.recv(), if commands_open => match command {
                    Some(command) => self.dispatcher.enqueue(command),
                    None => commands_open = false,
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.dispatcher.on_connection_error("response timeout");
                }
            }
        }

        self.forward_events();
        // Best effort: the peer may already be gone
        let _ = writer.shutdown().await;
        debug!("Driver stopped");
    }

    async fn flush(&mut self, writer: &mut WriteHalf<BoxedStream>) -> std::io::Result<()> {
        let mut wrote = false;
        while let Some(bytes) = self.dispatcher.poll_transmit() {
            writer.write_all(&bytes).await?;
            wrote = true;
        }
        if wrote {
            writer.flush().await?;
        }
        Ok(())
    }

    fn forward_events(&mut self) {
        while let Some(event) = self.dispatcher.poll_event() {
            if self.events.send(event).is_err() {
                trace!("Event receiver dropped");
            }
        }
    }
}
