use super::types::{RecorderStatus, RpcRequest, RpcResponse};
use super::RemoteControl;
use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

const API_KEY_HEADER: &str = "X-API-Key";

/// HTTP client for the local RPC gateway and chat endpoint
pub struct GatewayClient {
    http: reqwest::Client,
    rpc_url: String,
    chat_url: String,
    api_key: String,
    next_id: AtomicU64,
}

impl GatewayClient {
    pub fn new(rpc_url: String, chat_url: String, api_key: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            rpc_url,
            chat_url,
            api_key,
            next_id: AtomicU64::new(1),
        })
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        debug!("RPC {} (id={})", method, request.id);

        let resp = self
            .http
            .post(&self.rpc_url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("RPC {method} request failed"))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("RPC {method} returned {status}: {body}");
        }

        let body: RpcResponse = resp
            .json()
            .await
            .with_context(|| format!("Failed to decode RPC {method} response"))?;

        if let Some(err) = body.error {
            bail!("RPC {method} failed ({}): {}", err.code, err.message);
        }

        let result = body
            .result
            .ok_or_else(|| anyhow!("RPC {method} returned no result"))?;

        serde_json::from_value(result).with_context(|| format!("Unexpected RPC {method} result"))
    }
}

#[async_trait]
impl RemoteControl for GatewayClient {
    async fn set_recording_directory(&self, directory: &str) -> Result<String> {
        self.call(
            "jamulusserver/setRecordingDirectory",
            json!({ "recordingDirectory": directory }),
        )
        .await
    }

    async fn recorder_status(&self) -> Result<RecorderStatus> {
        self.call("jamulusserver/getRecorderStatus", json!({})).await
    }

    async fn start_recording(&self) -> Result<String> {
        self.call("jamulusserver/startRecording", json!({})).await
    }

    async fn stop_recording(&self) -> Result<String> {
        self.call("jamulusserver/stopRecording", json!({})).await
    }

    async fn send_chat(&self, text: &str) -> Result<()> {
        let resp = self
            .http
            .post(&self.chat_url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(reqwest::header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(text.to_string())
            .send()
            .await
            .context("Chat request failed")?;

        if !resp.status().is_success() {
            bail!("Chat endpoint returned {}", resp.status());
        }

        Ok(())
    }
}
