//! Control surface of the remote audio server
//!
//! Recorder procedures go through the local JSON-RPC gateway; chat lines are
//! posted to the event service.

pub mod client;
pub mod types;

pub use client::GatewayClient;
pub use types::RecorderStatus;

use anyhow::Result;

/// Remote recorder and chat operations used by a session
#[async_trait::async_trait]
pub trait RemoteControl: Send + Sync {
    /// Point the recorder at `directory`; the returned string is informational
    async fn set_recording_directory(&self, directory: &str) -> Result<String>;

    async fn recorder_status(&self) -> Result<RecorderStatus>;

    /// Returns the server's acknowledgement token
    async fn start_recording(&self) -> Result<String>;

    /// Returns the server's acknowledgement token
    async fn stop_recording(&self) -> Result<String>;

    /// Post a line to the server chat
    async fn send_chat(&self, text: &str) -> Result<()>;
}
