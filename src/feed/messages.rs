use serde::{Deserialize, Serialize};

/// One frame of the server's push feed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Present only on frames that carry a new chat line
    #[serde(default)]
    pub new_chat_message: Option<ChatMessage>,

    /// Per-channel audio levels
    #[serde(default)]
    pub levels: Vec<f64>,

    /// Currently connected clients
    #[serde(default)]
    pub clients: Vec<ConnectedClient>,
}

/// Chat line observed on the feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique per message; used for deduplication
    pub id: String,

    /// Raw chat text, which may include the sender prefix and markup
    pub message: String,

    #[serde(default)]
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedClient {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub instrument: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}
