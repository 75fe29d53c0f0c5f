use super::uploader::ArchiveUploader;
use crate::remote::RemoteControl;
use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use walkdir::WalkDir;

pub const MANIFEST_ATTEMPTS: u32 = 30;
pub const MANIFEST_INTERVAL: Duration = Duration::from_secs(1);
pub const UPLOAD_ATTEMPTS: u32 = 3;

/// Backoff before retry `n` is `n` times this
pub const RETRY_BACKOFF: Duration = Duration::from_millis(2000);

/// Upper bound on a single upload attempt, including the archive stream
pub const ATTEMPT_TIMEOUT: Duration = Duration::from_secs(15 * 60);

/// Result of handing a finished session to the upload pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Upload endpoint not configured
    Skipped,
    /// Uploaded; `url` is set when the endpoint reported one
    Uploaded { url: Option<String> },
    /// Every attempt failed
    Failed,
}

impl UploadOutcome {
    pub fn url(&self) -> Option<&str> {
        match self {
            UploadOutcome::Uploaded { url } => url.as_deref(),
            _ => None,
        }
    }
}

/// Waits for the recorder's manifest, then uploads with bounded retries
///
/// Failures are reported to chat and the log; the pipeline itself never errors.
pub struct UploadPipeline {
    uploader: Option<Arc<dyn ArchiveUploader>>,
    remote: Arc<dyn RemoteControl>,
    manifest_extension: String,
    attempt_timeout: Duration,
}

impl UploadPipeline {
    pub fn new(
        uploader: Option<Arc<dyn ArchiveUploader>>,
        remote: Arc<dyn RemoteControl>,
        manifest_extension: impl Into<String>,
    ) -> Self {
        Self {
            uploader,
            remote,
            manifest_extension: manifest_extension.into(),
            attempt_timeout: ATTEMPT_TIMEOUT,
        }
    }

    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.uploader.is_some()
    }

    pub async fn run(&self, session_id: &str, directory: &Path) -> UploadOutcome {
        let Some(uploader) = &self.uploader else {
            info!("Upload not configured, skipping {}", session_id);
            return UploadOutcome::Skipped;
        };

        if !self.wait_for_manifest(directory).await {
            warn!(
                "No .{} file under {} after {} attempts, uploading anyway",
                self.manifest_extension,
                directory.display(),
                MANIFEST_ATTEMPTS
            );
        }

        for attempt in 1..=UPLOAD_ATTEMPTS {
            info!(
                "Uploading session {} (attempt {}/{})",
                session_id, attempt, UPLOAD_ATTEMPTS
            );

            let attempt_result =
                tokio::time::timeout(self.attempt_timeout, uploader.upload(session_id, directory))
                    .await
                    .unwrap_or_else(|_| {
                        Err(anyhow::anyhow!(
                            "no response within {:?}",
                            self.attempt_timeout
                        ))
                    });

            match attempt_result {
                Ok(resp) => {
                    let Some(url) = resp.url else {
                        info!("Upload of {} succeeded without a URL", session_id);
                        return UploadOutcome::Uploaded { url: None };
                    };
                    info!("Uploaded {} to {}", session_id, url);
                    self.notify(&format!("Recording uploaded: {url}")).await;
                    return UploadOutcome::Uploaded { url: Some(url) };
                }
                Err(e) => {
                    warn!("Upload attempt {} for {} failed: {:#}", attempt, session_id, e);
                }
            }

            if attempt < UPLOAD_ATTEMPTS {
                self.notify(&format!(
                    "Upload failed, retrying ({}/{})",
                    attempt + 1,
                    UPLOAD_ATTEMPTS
                ))
                .await;
                tokio::time::sleep(RETRY_BACKOFF * attempt).await;
            }
        }

        error!(
            "Upload of {} failed after {} attempts",
            session_id, UPLOAD_ATTEMPTS
        );
        self.notify("Upload failed permanently. The recording is still on the server.")
            .await;
        UploadOutcome::Failed
    }

    /// `true` once a manifest file exists anywhere under `directory`
    async fn wait_for_manifest(&self, directory: &Path) -> bool {
        for _ in 0..MANIFEST_ATTEMPTS {
            if has_file_with_extension(directory, &self.manifest_extension) {
                return true;
            }
            tokio::time::sleep(MANIFEST_INTERVAL).await;
        }
        false
    }

    async fn notify(&self, text: &str) {
        if let Err(e) = self.remote.send_chat(text).await {
            warn!("Failed to post upload notice: {:#}", e);
        }
    }
}

pub fn has_file_with_extension(directory: &Path, extension: &str) -> bool {
    WalkDir::new(directory)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .any(|entry| {
            entry.file_type().is_file() && entry.path().extension() == Some(OsStr::new(extension))
        })
}
