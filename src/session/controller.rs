use super::countdown::{reminder_for, Countdown, RECORDING_TICKS};
use super::error::SessionError;
use super::id::SessionId;
use super::poll::{poll_until, POLL_ATTEMPTS, POLL_INTERVAL};
use super::state::{SessionState, SessionTracker};
use crate::feed::CommandFeed;
use crate::remote::{RecorderStatus, RemoteControl};
use crate::upload::{UploadOutcome, UploadPipeline};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

pub const FAILURE_NOTICE: &str = "An error occurred while recording. Check the server log.";
pub const NO_UPLOAD_WARNING: &str =
    "Warning: uploads are not configured, this recording will stay on the server.";

/// How a session that reached the upload stage ended
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub session_id: SessionId,
    pub directory: PathBuf,
    /// Ended by a `/stop` command rather than the countdown
    pub stopped_early: bool,
    pub upload: UploadOutcome,
}

/// Drives the remote recorder through one session
pub struct SessionController {
    remote: Arc<dyn RemoteControl>,
    upload: UploadPipeline,
    tracker: SessionTracker,
    recording_root: PathBuf,
}

impl SessionController {
    pub fn new(
        remote: Arc<dyn RemoteControl>,
        upload: UploadPipeline,
        tracker: SessionTracker,
        recording_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            remote,
            upload,
            tracker,
            recording_root: recording_root.into(),
        }
    }

    /// Run a full session under a freshly generated id
    pub async fn record_session(&self, feed: &mut CommandFeed) -> Result<SessionReport, SessionError> {
        self.record(SessionId::generate(), feed).await
    }

    /// Run a full session; on failure posts one generic chat notice and returns the error
    pub async fn record(
        &self,
        session_id: SessionId,
        feed: &mut CommandFeed,
    ) -> Result<SessionReport, SessionError> {
        match self.drive(&session_id, feed).await {
            Ok(report) => {
                self.transition(&session_id, SessionState::Completed).await;
                Ok(report)
            }
            Err(e) => {
                self.transition(&session_id, SessionState::Failed).await;
                error!("Session {} failed: {:#}", session_id, e);
                if let Err(chat_err) = self.remote.send_chat(FAILURE_NOTICE).await {
                    warn!("Failed to post failure notice: {:#}", chat_err);
                }
                Err(e)
            }
        }
    }

    async fn drive(
        &self,
        session_id: &SessionId,
        feed: &mut CommandFeed,
    ) -> Result<SessionReport, SessionError> {
        let directory = self.recording_root.join(session_id.as_str());
        let target = directory.to_string_lossy().into_owned();

        self.transition(session_id, SessionState::SetDirectory).await;
        self.remote.send_chat("Starting a recording session...").await?;

        let reply = self.remote.set_recording_directory(&target).await?;
        info!("Recording directory requested: {} ({})", target, reply);

        self.transition(session_id, SessionState::AwaitDirectorySet).await;
        let target_ref = target.as_str();
        self.await_status("recording directory to be set", move |s| {
            s.recording_directory == target_ref
        })
        .await?;
        self.remote
            .send_chat(&format!("Recording directory set: {session_id}"))
            .await?;

        self.transition(session_id, SessionState::StartRequested).await;
        let ack = self.remote.start_recording().await?;
        info!("Start recording: {}", ack);

        self.transition(session_id, SessionState::AwaitEnabled).await;
        self.await_status("recording to start", |s| s.enabled).await?;

        self.transition(session_id, SessionState::Recording).await;
        self.remote
            .send_chat(&format!("Recording started. Session id: {session_id}"))
            .await?;
        if !self.upload.is_configured() {
            self.remote.send_chat(NO_UPLOAD_WARNING).await?;
        }

        let stopped_early = tokio::select! {
            _ = self.run_countdown(session_id) => {
                info!("Recording window elapsed for {}", session_id);
                false
            }
            msg = feed.next_stop() => {
                info!("Session {} stopped by chat command {}", session_id, msg.id);
                true
            }
        };

        self.transition(session_id, SessionState::StopRequested).await;
        let ack = self.remote.stop_recording().await?;
        info!("Stop recording: {}", ack);

        self.transition(session_id, SessionState::AwaitDisabled).await;
        self.await_status("recording to stop", |s| !s.enabled).await?;
        self.remote.send_chat("Recording stopped.").await?;

        self.transition(session_id, SessionState::Uploading).await;
        let upload = self.upload.run(session_id.as_str(), &directory).await;
        info!("Upload result for {}: {:?}", session_id, upload.url());

        Ok(SessionReport {
            session_id: session_id.clone(),
            directory,
            stopped_early,
            upload,
        })
    }

    /// Tick through the recording window, posting reminders without waiting on them
    async fn run_countdown(&self, session_id: &SessionId) {
        let mut countdown = Countdown::new(RECORDING_TICKS);

        while let Some(remaining) = countdown.tick().await {
            let Some(text) = reminder_for(remaining) else {
                continue;
            };

            let remote = Arc::clone(&self.remote);
            let session_id = session_id.clone();
            tokio::spawn(async move {
                if let Err(e) = remote.send_chat(&text).await {
                    warn!("Failed to post reminder for {}: {:#}", session_id, e);
                }
            });
        }
    }

    async fn await_status<P>(&self, condition: &'static str, pred: P) -> Result<(), SessionError>
    where
        P: Fn(&RecorderStatus) -> bool,
    {
        let pred = &pred;
        poll_until(condition, POLL_ATTEMPTS, POLL_INTERVAL, move || async move {
            let status = self.remote.recorder_status().await?;
            if let Some(msg) = status.error_message.as_deref() {
                warn!("Recorder reports error: {}", msg);
            }
            Ok::<_, anyhow::Error>(pred(&status))
        })
        .await
    }

    async fn transition(&self, session_id: &SessionId, state: SessionState) {
        info!("Session {}: {}", session_id, state);
        self.tracker.set(session_id.as_str(), state).await;
    }
}
