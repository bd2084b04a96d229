use std::fmt;
use std::path::PathBuf;

use crate::config::ConfigError;
use crate::task_generator::{ClientError, SubmitError};
use crate::verifier::{UnknownVerifierError, VerifierId};

/// Which input file a read failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Proof,
    PublicInput,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Proof => f.write_str("proof"),
            ArtifactKind::PublicInput => f.write_str("public input"),
        }
    }
}

/// Every way a task sender run can fail. All of them end the process.
#[derive(Debug, thiserror::Error)]
pub enum TaskSenderError {
    #[error("could not load configuration: {0}")]
    Configuration(#[from] ConfigError),
    #[error("could not create task generator: {0}")]
    ClientConstruction(#[from] ClientError),
    #[error(transparent)]
    UnknownVerifier(#[from] UnknownVerifierError),
    #[error("could not read {kind} file {}: {source}", path.display())]
    ArtifactRead {
        kind: ArtifactKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("verifier {0} needs a public input file but none was given (--pub-input)")]
    MissingPublicInput(VerifierId),
    #[error("could not send task: {0}")]
    Submission(#[from] SubmitError),
}

impl TaskSenderError {
    /// The message followed by every underlying cause not already part of it.
    pub fn diagnostic(&self) -> String {
        let mut rendered = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            let text = cause.to_string();
            if !rendered.contains(&text) {
                rendered.push_str(": ");
                rendered.push_str(&text);
            }
            source = cause.source();
        }
        rendered
    }
}
