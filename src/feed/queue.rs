use super::messages::ChatMessage;
use crate::commands::{Command, SeenIds};
use std::collections::VecDeque;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("event feed closed")]
    Closed,
}

/// Single consumer of the chat message stream
///
/// Lines pulled while waiting for `/stop` are kept in a backlog and offered to
/// the next `/start` wait first, so nothing sent during a session is lost.
pub struct CommandFeed {
    rx: mpsc::UnboundedReceiver<ChatMessage>,
    backlog: VecDeque<ChatMessage>,
}

impl CommandFeed {
    pub fn new(rx: mpsc::UnboundedReceiver<ChatMessage>) -> Self {
        Self {
            rx,
            backlog: VecDeque::new(),
        }
    }

    /// Channel-backed feed, for callers that produce messages themselves
    pub fn channel() -> (mpsc::UnboundedSender<ChatMessage>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self::new(rx))
    }

    async fn next_message(&mut self) -> Option<ChatMessage> {
        match self.backlog.pop_front() {
            Some(msg) => Some(msg),
            None => self.rx.recv().await,
        }
    }

    /// Wait for a `/start` whose id has not triggered a session yet
    ///
    /// The id is recorded in `seen` before returning.
    pub async fn next_start(&mut self, seen: &mut SeenIds) -> Result<ChatMessage, FeedError> {
        loop {
            let msg = self.next_message().await.ok_or(FeedError::Closed)?;

            if seen.accept_start(&msg) {
                info!("Accepted start command {}", msg.id);
                return Ok(msg);
            }
            if seen.contains(&msg.id) && Command::Start.matches(&msg.message) {
                debug!("Ignoring already processed start command {}", msg.id);
            }
        }
    }

    /// Wait for a `/stop` from the live stream
    ///
    /// Never resolves once the feed has closed; the ingestion task reports that.
    pub async fn next_stop(&mut self) -> ChatMessage {
        loop {
            match self.rx.recv().await {
                Some(msg) if Command::Stop.matches(&msg.message) => {
                    info!("Received stop command {}", msg.id);
                    return msg;
                }
                Some(msg) => self.backlog.push_back(msg),
                None => std::future::pending::<()>().await,
            }
        }
    }

    pub fn backlog_len(&self) -> usize {
        self.backlog.len()
    }
}
