#![doc = include_str!("../README.md")]

mod client;
/// NNTP command builders, response parsers and the command/parser binding
pub mod commands;
mod config;
/// Command queue and response dispatch
pub mod dispatcher;
mod error;
mod event;
/// Incremental response framing
pub mod framer;
mod response;
mod session;

pub use client::{NntpClient, Transport};
pub use commands::{ArticleInfo, Command, CommandKind, GroupInfo};
pub use config::ServerConfig;
pub use dispatcher::Dispatcher;
pub use error::{NntpError, Result};
pub use event::Event;
pub use framer::ResponseFramer;
pub use response::{Classification, MULTILINE_CODES, NntpResponse, classify, codes, is_multiline_code};
pub use session::{ConnectionState, SessionState};
