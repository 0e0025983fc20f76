//! Per-connection session state and connection lifecycle

use tracing::debug;

/// Transport-driven connection lifecycle, read by the dispatcher to gate transmission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No connection; nothing is transmitted
    #[default]
    Disconnected,
    /// Connect requested, waiting for the transport to establish it
    Connecting,
    /// Connected and ready for commands
    Connected,
    /// Connection closed (QUIT acknowledged or transport closed cleanly)
    Closed,
}

/// Small mutable state shared across commands on one connection
///
/// Only the dispatcher mutates it, through the transition methods below.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    welcome_banner: String,
    posting_allowed: bool,
    current_group: String,
    last_error: String,
}

impl SessionState {
    /// Server greeting line received at connect
    pub fn welcome_banner(&self) -> &str {
        &self.welcome_banner
    }

    /// Whether the greeting was "200" (posting allowed)
    pub fn posting_allowed(&self) -> bool {
        self.posting_allowed
    }

    /// Currently selected newsgroup, lowercased, or "" when none
    pub fn current_group(&self) -> &str {
        &self.current_group
    }

    /// Status line of the last failed command
    pub fn last_error(&self) -> &str {
        &self.last_error
    }

    pub(crate) fn record_welcome(&mut self, status_line: &str) {
        self.welcome_banner = status_line.to_string();
        self.posting_allowed = status_line.starts_with("200");
        debug!(
            "Server greeting received, posting {}",
            if self.posting_allowed { "allowed" } else { "not allowed" }
        );
    }

    /// Optimistic selection when GROUP is submitted
    pub(crate) fn begin_group_selection(&mut self, name: &str) {
        self.current_group = name.to_lowercase();
    }

    pub(crate) fn group_selected(&mut self, name: &str) {
        self.current_group = name.to_lowercase();
    }

    pub(crate) fn group_failed(&mut self) {
        self.current_group.clear();
    }

    pub(crate) fn record_error(&mut self, status_line: &str) {
        self.last_error = status_line.to_string();
    }
}
