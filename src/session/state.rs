use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Phase of the recording session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    SetDirectory,
    AwaitDirectorySet,
    StartRequested,
    AwaitEnabled,
    Recording,
    StopRequested,
    AwaitDisabled,
    Uploading,
    Completed,
    Failed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::SetDirectory => "set_directory",
            SessionState::AwaitDirectorySet => "await_directory_set",
            SessionState::StartRequested => "start_requested",
            SessionState::AwaitEnabled => "await_enabled",
            SessionState::Recording => "recording",
            SessionState::StopRequested => "stop_requested",
            SessionState::AwaitDisabled => "await_disabled",
            SessionState::Uploading => "uploading",
            SessionState::Completed => "completed",
            SessionState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Point-in-time view of the current (or last) session
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Option<String>,
    pub state: SessionState,
    pub updated_at: DateTime<Utc>,
}

/// Shared record of session progress, read by the status API
#[derive(Debug, Clone)]
pub struct SessionTracker {
    inner: Arc<RwLock<SessionSnapshot>>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(SessionSnapshot {
                session_id: None,
                state: SessionState::Idle,
                updated_at: Utc::now(),
            })),
        }
    }

    pub async fn set(&self, session_id: &str, state: SessionState) {
        let mut snapshot = self.inner.write().await;
        snapshot.session_id = Some(session_id.to_string());
        snapshot.state = state;
        snapshot.updated_at = Utc::now();
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.inner.read().await.clone()
    }
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new()
    }
}
