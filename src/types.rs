use serde::{Deserialize, Serialize};

/// Body of `POST /tasks`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewTaskRequest {
    pub verification_system_id: u16,
    pub verifier: String,
    /// 0x-prefixed hex.
    pub proof: String,
    /// 0x-prefixed hex, omitted when the proof embeds its public inputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_input: Option<String>,
    pub service_manager: String,
    pub signer: String,
    pub signature: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewTaskResponse {
    pub task_index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn encode_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}
