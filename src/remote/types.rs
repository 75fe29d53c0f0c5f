use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Recorder state as reported by `getRecorderStatus`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecorderStatus {
    pub initialised: bool,
    #[serde(default)]
    pub error_message: Option<String>,
    pub enabled: bool,
    #[serde(default)]
    pub recording_directory: String,
}

/// JSON-RPC request sent to the gateway
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: Value,
}

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}
