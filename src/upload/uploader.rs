use crate::config::UploadConfig;
use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};

/// Destination folder on the upload endpoint
pub const UPLOAD_PREFIX: &str = "multitrack/";

/// Body returned by the upload endpoint on success
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub url: Option<String>,
}

/// Ships one archived session directory somewhere
#[async_trait]
pub trait ArchiveUploader: Send + Sync {
    /// Perform a single upload attempt
    async fn upload(&self, session_id: &str, directory: &Path) -> Result<UploadResponse>;
}

pub fn remote_path(session_id: &str) -> String {
    format!("{UPLOAD_PREFIX}{session_id}.zip")
}

/// Streams `zip` output straight into an authenticated HTTP PUT
pub struct HttpArchiveUploader {
    http: reqwest::Client,
    config: UploadConfig,
}

impl HttpArchiveUploader {
    pub fn new(config: UploadConfig) -> Result<Self> {
        // No overall timeout: archives of a full session can take a while to send
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("Failed to create upload client")?;

        Ok(Self { http, config })
    }
}

#[async_trait]
impl ArchiveUploader for HttpArchiveUploader {
    async fn upload(&self, session_id: &str, directory: &Path) -> Result<UploadResponse> {
        let mut zip = Command::new("zip")
            .args(["-q", "-r", "-", "."])
            .current_dir(directory)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .context("Failed to spawn zip")?;

        let stdout = zip
            .stdout
            .take()
            .ok_or_else(|| anyhow!("zip stdout not captured"))?;

        let path = remote_path(session_id);
        debug!("Streaming {} to {}", directory.display(), path);

        let resp = self
            .http
            .put(&self.config.url)
            .query(&[("path", path.as_str())])
            .header(reqwest::header::CONTENT_TYPE, "application/zip")
            .bearer_auth(&self.config.key)
            .body(reqwest::Body::wrap_stream(ReaderStream::new(stdout)))
            .send()
            .await
            .context("Upload request failed")?;

        let exit = zip.wait().await.context("Failed to wait for zip")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("Upload endpoint returned {status}: {body}");
        }
        if !exit.success() {
            bail!("zip exited with {exit}");
        }

        let body = resp.text().await.context("Failed to read upload response")?;
        match serde_json::from_str::<UploadResponse>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(e) => {
                warn!("Upload response is not JSON ({}); assuming success", e);
                Ok(UploadResponse::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_path() {
        assert_eq!(
            remote_path("2025-10-27_14-30_5f0c9e21"),
            "multitrack/2025-10-27_14-30_5f0c9e21.zip"
        );
    }

    #[test]
    fn test_response_without_url() {
        let resp: UploadResponse = serde_json::from_str(r#"{"ok": true}"#).unwrap();
        assert!(resp.url.is_none());
    }
}
