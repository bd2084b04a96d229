use std::future::Future;

use k256::ecdsa::signature::Signer;
use k256::ecdsa::Signature;
use reqwest::StatusCode;
use url::Url;

use crate::config::{Address, Config, EcdsaSigner};
use crate::types::{encode_hex, ErrorResponse, NewTaskRequest, NewTaskResponse};
use crate::verifier::VerifierId;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid task generator URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("task generator URL {0:?} cannot carry a path")]
    NotABase(String),
    #[error("failed to build HTTP client: {0}")]
    Http(#[source] reqwest::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("could not reach task service: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("task service rejected the task ({status}): {message}")]
    Rejected { status: StatusCode, message: String },
    #[error("unexpected reply from task service: {0}")]
    InvalidResponse(#[source] reqwest::Error),
}

/// Confirmation returned by the task service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReceipt {
    pub task_index: u32,
    pub message: Option<String>,
}

/// Something that turns a proof into a verification task on the network.
pub trait TaskGenerator {
    /// Submit one task. Implementations make a single attempt.
    fn send_new_task(
        &self,
        proof: Vec<u8>,
        public_input: Option<Vec<u8>>,
        verifier: VerifierId,
    ) -> impl Future<Output = Result<TaskReceipt, SubmitError>> + Send;
}

/// Bytes covered by the task signature: `wire_id (BE) || proof || public_input`.
pub fn task_message(verifier: VerifierId, proof: &[u8], public_input: Option<&[u8]>) -> Vec<u8> {
    let public_input = public_input.unwrap_or_default();
    let mut message = Vec::with_capacity(2 + proof.len() + public_input.len());
    message.extend_from_slice(&verifier.wire_id().to_be_bytes());
    message.extend_from_slice(proof);
    message.extend_from_slice(public_input);
    message
}

/// Submits tasks to the task service over HTTP.
pub struct HttpTaskGenerator {
    client: reqwest::Client,
    endpoint: Url,
    service_manager: Address,
    signer: EcdsaSigner,
}

/// `<url>/tasks`, keeping any path prefix of `url`.
fn tasks_endpoint(url: &str) -> Result<Url, ClientError> {
    let mut endpoint = Url::parse(url).map_err(|source| ClientError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    endpoint
        .path_segments_mut()
        .map_err(|_| ClientError::NotABase(url.to_string()))?
        .pop_if_empty()
        .push("tasks");
    Ok(endpoint)
}

impl HttpTaskGenerator {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let endpoint = tasks_endpoint(&config.task_generator.url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.task_generator.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ClientError::Http)?;

        tracing::info!(
            "Task generator endpoint: {} (environment={} eth_rpc_url={})",
            endpoint,
            config.environment,
            config.eth_rpc_url
        );
        tracing::debug!(
            "Deployment: service_manager={} registry_coordinator={} delegation_manager={} avs_directory={}",
            config.aligned_layer.service_manager,
            config.aligned_layer.registry_coordinator,
            config.shared_avs.delegation_manager,
            config.shared_avs.avs_directory
        );

        Ok(Self {
            client,
            endpoint,
            service_manager: config.aligned_layer.service_manager,
            signer: config.signer.clone(),
        })
    }

    fn build_request(
        &self,
        proof: &[u8],
        public_input: Option<&[u8]>,
        verifier: VerifierId,
    ) -> NewTaskRequest {
        let message = task_message(verifier, proof, public_input);
        let signature: Signature = self.signer.signing_key().sign(&message);

        NewTaskRequest {
            verification_system_id: verifier.wire_id(),
            verifier: verifier.token().to_string(),
            proof: encode_hex(proof),
            public_input: public_input.map(encode_hex),
            service_manager: self.service_manager.to_string(),
            signer: self.signer.public_key_hex(),
            signature: encode_hex(&signature.to_bytes()),
        }
    }
}

impl TaskGenerator for HttpTaskGenerator {
    async fn send_new_task(
        &self,
        proof: Vec<u8>,
        public_input: Option<Vec<u8>>,
        verifier: VerifierId,
    ) -> Result<TaskReceipt, SubmitError> {
        let request = self.build_request(&proof, public_input.as_deref(), verifier);

        tracing::info!(
            "Sending task: verifier={} proof_len={} public_input_len={}",
            verifier,
            proof.len(),
            public_input.as_ref().map_or(0, |p| p.len())
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(SubmitError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            // The service normally explains itself; fall back to the raw body,
            // then to the status text.
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!("Could not read rejection body: {}", e);
                    String::new()
                }
            };
            let message = match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(reply) => reply.error,
                Err(_) if !body.trim().is_empty() => body,
                Err(_) => status.canonical_reason().unwrap_or("no reason given").to_string(),
            };
            tracing::error!("Task rejected: status={} message={}", status, message);
            return Err(SubmitError::Rejected { status, message });
        }

        let reply: NewTaskResponse = response
            .json()
            .await
            .map_err(SubmitError::InvalidResponse)?;

        tracing::info!("Task accepted: task_index={}", reply.task_index);

        Ok(TaskReceipt {
            task_index: reply.task_index,
            message: reply.message,
        })
    }
}
