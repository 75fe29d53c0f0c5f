use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Environment variable prefix, e.g. `JAM_RECORDER_API_KEY`
pub const ENV_PREFIX: &str = "JAM_RECORDER";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Port of the event/chat service (WebSocket feed and chat endpoint)
    #[serde(default = "default_event_port")]
    pub event_port: u16,

    /// Port of the RPC gateway
    #[serde(default = "default_rpc_port")]
    pub rpc_port: u16,

    /// Host of both local gateways
    #[serde(default = "default_gateway_host")]
    pub gateway_host: String,

    /// Sent as `X-API-Key` on every gateway call
    pub api_key: String,

    #[serde(default)]
    pub debug: bool,

    /// Root under which session directories are created and swept
    #[serde(default = "default_recording_dir_prefix")]
    pub recording_dir_prefix: PathBuf,

    #[serde(default)]
    pub upload_url: Option<String>,

    #[serde(default)]
    pub upload_key: Option<String>,

    /// Extension of the marker file the recorder writes once tracks are flushed
    #[serde(default = "default_manifest_extension")]
    pub manifest_extension: String,

    /// Serve the status API on this port when set
    #[serde(default)]
    pub status_port: Option<u16>,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub url: String,
    pub key: String,
}

fn default_event_port() -> u16 {
    8080
}

fn default_rpc_port() -> u16 {
    8081
}

fn default_gateway_host() -> String {
    "127.0.0.1".to_string()
}

fn default_recording_dir_prefix() -> PathBuf {
    PathBuf::from("/var/recordings")
}

fn default_manifest_extension() -> String {
    "lof".to_string()
}

impl Config {
    /// Load from an optional config file, overridden by `JAM_RECORDER_*` environment variables
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .context("Failed to read configuration")?;

        settings
            .try_deserialize()
            .context("Invalid configuration")
    }

    pub fn events_url(&self) -> String {
        format!("ws://{}:{}/events", self.gateway_host, self.event_port)
    }

    pub fn chat_url(&self) -> String {
        format!("http://{}:{}/chat", self.gateway_host, self.event_port)
    }

    pub fn rpc_url(&self) -> String {
        format!("http://{}:{}/rpc", self.gateway_host, self.rpc_port)
    }

    /// Upload settings, or `None` when either the endpoint or the key is missing
    pub fn upload(&self) -> Option<UploadConfig> {
        let url = self.upload_url.as_deref().filter(|s| !s.trim().is_empty())?;
        let key = self.upload_key.as_deref().filter(|s| !s.trim().is_empty())?;
        Some(UploadConfig {
            url: url.to_string(),
            key: key.to_string(),
        })
    }
}
