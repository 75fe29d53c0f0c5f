//! Live event feed
//!
//! `FeedClient` decodes the server's WebSocket frames and forwards chat lines
//! into a channel; `CommandFeed` is the single consumer the main loop and the
//! running session pull commands from.

pub mod client;
pub mod messages;
pub mod queue;

pub use client::FeedClient;
pub use messages::{ChatMessage, ConnectedClient, Event};
pub use queue::{CommandFeed, FeedError};
