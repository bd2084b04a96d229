use std::path::{Path, PathBuf};

use crate::config::{Config, ConfigSources};
use crate::error::{ArtifactKind, TaskSenderError};
use crate::task_generator::{HttpTaskGenerator, TaskGenerator, TaskReceipt};
use crate::verifier::parse_verifier_id;

/// The proof to send and how to interpret it.
#[derive(Debug, Clone)]
pub struct TaskRequest {
    pub proof_path: PathBuf,
    pub verifier_id: String,
    pub pub_input_path: Option<PathBuf>,
}

async fn read_artifact(kind: ArtifactKind, path: &Path) -> Result<Vec<u8>, TaskSenderError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| TaskSenderError::ArtifactRead {
            kind,
            path: path.to_path_buf(),
            source,
        })?;
    tracing::info!("Read {} file {}: {} bytes", kind, path.display(), bytes.len());
    Ok(bytes)
}

/// Read the artifacts, resolve the verifier and submit exactly one task.
///
/// The proof is read before the verifier is resolved; the public input is read
/// only when the verifier keeps its public inputs outside the proof.
pub async fn send_task<G: TaskGenerator>(
    generator: &G,
    request: &TaskRequest,
) -> Result<TaskReceipt, TaskSenderError> {
    let proof = read_artifact(ArtifactKind::Proof, &request.proof_path).await?;

    let verifier = parse_verifier_id(&request.verifier_id)?;
    tracing::info!("Verifier: {} ({:?})", verifier, verifier);

    let public_input = if verifier.requires_public_input() {
        let path = request
            .pub_input_path
            .as_deref()
            .ok_or(TaskSenderError::MissingPublicInput(verifier))?;
        Some(read_artifact(ArtifactKind::PublicInput, path).await?)
    } else {
        if let Some(path) = &request.pub_input_path {
            tracing::debug!(
                "Ignoring public input {}: {} proofs embed their public inputs",
                path.display(),
                verifier
            );
        }
        None
    };

    let receipt = generator
        .send_new_task(proof, public_input, verifier)
        .await?;

    Ok(receipt)
}

/// One full invocation: configuration, client, then [`send_task`].
pub async fn run(
    sources: &ConfigSources,
    request: &TaskRequest,
) -> Result<TaskReceipt, TaskSenderError> {
    tracing::info!("Initializing Task Sender...");
    tracing::info!("Config file: {}", sources.config_file.display());

    let config = Config::load(sources)?;
    let generator = HttpTaskGenerator::new(&config)?;

    let receipt = send_task(&generator, request).await?;

    tracing::info!("Task successfully sent");
    Ok(receipt)
}
