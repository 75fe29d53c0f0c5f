use super::messages::{ChatMessage, Event};
use anyhow::{anyhow, Context, Result};
use futures::stream::StreamExt;
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

/// Subscriber for the server's WebSocket event feed
pub struct FeedClient {
    url: String,
}

impl FeedClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Forward every decoded chat message into `tx`, in arrival order
    ///
    /// Only returns on failure: a transport error, the server closing the
    /// stream, or the receiving side going away.
    pub async fn run(self, tx: mpsc::UnboundedSender<ChatMessage>) -> Result<()> {
        info!("Connecting to event feed at {}", self.url);

        let (mut ws, _) = connect_async(self.url.as_str())
            .await
            .context("Failed to connect to event feed")?;

        info!("Subscribed to event feed");

        while let Some(frame) = ws.next().await {
            let frame = frame.context("Event feed transport error")?;

            let text = match frame {
                Message::Text(text) => text,
                Message::Close(_) => break,
                _ => continue,
            };

            let event = match decode_event(&text) {
                Ok(event) => event,
                Err(e) => {
                    warn!("Failed to parse event frame: {:#}", e);
                    continue;
                }
            };

            if let Some(chat) = event.new_chat_message {
                debug!("Chat message {}: {}", chat.id, chat.message);
                if tx.send(chat).is_err() {
                    return Err(anyhow!("Chat consumer dropped"));
                }
            }
        }

        Err(anyhow!("Event feed closed by server"))
    }
}

pub fn decode_event(text: &str) -> Result<Event> {
    serde_json::from_str(text).context("Malformed event")
}
