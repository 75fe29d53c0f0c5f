// Shared fakes for integration tests
#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use jam_recorder::feed::ChatMessage;
use jam_recorder::upload::UploadResponse;
use jam_recorder::{ArchiveUploader, RecorderStatus, RemoteControl};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;
use tokio::time::Instant;

/// In-memory recorder that applies requests to its status immediately
pub struct FakeRemote {
    status: Mutex<RecorderStatus>,
    chats: Mutex<Vec<String>>,
    calls: Mutex<Vec<String>>,
    /// When false the recorder never reports the requested directory
    pub apply_directory: bool,
    /// When true every chat post fails
    pub chat_fails: bool,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self {
            status: Mutex::new(RecorderStatus {
                initialised: true,
                ..Default::default()
            }),
            chats: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            apply_directory: true,
            chat_fails: false,
        }
    }

    pub fn ignoring_directory() -> Self {
        Self {
            apply_directory: false,
            ..Self::new()
        }
    }

    pub fn with_failing_chat() -> Self {
        Self {
            chat_fails: true,
            ..Self::new()
        }
    }

    pub fn chats(&self) -> Vec<String> {
        self.chats.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_calls(&self, name: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == name).count()
    }

    fn record(&self, name: &str) {
        self.calls.lock().unwrap().push(name.to_string());
    }
}

#[async_trait]
impl RemoteControl for FakeRemote {
    async fn set_recording_directory(&self, directory: &str) -> Result<String> {
        self.record("setRecordingDirectory");
        if self.apply_directory {
            self.status.lock().unwrap().recording_directory = directory.to_string();
        }
        Ok(directory.to_string())
    }

    async fn recorder_status(&self) -> Result<RecorderStatus> {
        self.record("getRecorderStatus");
        Ok(self.status.lock().unwrap().clone())
    }

    async fn start_recording(&self) -> Result<String> {
        self.record("startRecording");
        self.status.lock().unwrap().enabled = true;
        Ok("acknowledged".to_string())
    }

    async fn stop_recording(&self) -> Result<String> {
        self.record("stopRecording");
        self.status.lock().unwrap().enabled = false;
        Ok("acknowledged".to_string())
    }

    async fn send_chat(&self, text: &str) -> Result<()> {
        if self.chat_fails {
            return Err(anyhow!("chat endpoint unavailable"));
        }
        self.chats.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Uploader that plays back scripted results and records when it was called
pub struct FakeUploader {
    results: Mutex<VecDeque<Result<UploadResponse>>>,
    attempts: Mutex<Vec<Instant>>,
}

impl FakeUploader {
    pub fn new(results: Vec<Result<UploadResponse>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            attempts: Mutex::new(Vec::new()),
        }
    }

    pub fn attempts(&self) -> Vec<Instant> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArchiveUploader for FakeUploader {
    async fn upload(&self, _session_id: &str, _directory: &Path) -> Result<UploadResponse> {
        self.attempts.lock().unwrap().push(Instant::now());
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow!("no scripted result")))
    }
}

pub fn chat(id: &str, text: &str) -> ChatMessage {
    ChatMessage {
        id: id.to_string(),
        message: text.to_string(),
        timestamp: "2025-10-27T14:30:00Z".to_string(),
    }
}

pub fn uploaded(url: &str) -> Result<UploadResponse> {
    Ok(UploadResponse {
        url: Some(url.to_string()),
    })
}
