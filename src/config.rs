use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use k256::ecdsa::SigningKey;
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse YAML config {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("failed to parse deployment file {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid address for {field}: {value:?}")]
    InvalidAddress { field: &'static str, value: String },
    #[error("invalid ECDSA private key: {0}")]
    InvalidPrivateKey(String),
}

/// Where the configuration comes from. Built from the command line, consumed once.
#[derive(Debug, Clone)]
pub struct ConfigSources {
    pub config_file: PathBuf,
    pub aligned_layer_deployment_file: PathBuf,
    pub shared_avs_contracts_deployment_file: PathBuf,
    pub ecdsa_private_key: String,
}

/// A 20-byte contract address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address([u8; 20]);

impl FromStr for Address {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .ok_or(hex::FromHexError::InvalidStringLength)?;
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

fn parse_address(field: &'static str, value: &str) -> Result<Address, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidAddress {
        field,
        value: value.to_string(),
    })
}

/// Task service endpoint settings.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskGeneratorConfig {
    pub url: String,
    /// Absent means the request may block until the service answers.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl TaskGeneratorConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    environment: String,
    eth_rpc_url: String,
    task_generator: TaskGeneratorConfig,
}

#[derive(Debug, Deserialize)]
struct DeploymentFile<A> {
    addresses: A,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAlignedLayerAddresses {
    aligned_layer_service_manager: String,
    registry_coordinator: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSharedAvsAddresses {
    delegation_manager: String,
    avs_directory: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedLayerAddresses {
    pub service_manager: Address,
    pub registry_coordinator: Address,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedAvsAddresses {
    pub delegation_manager: Address,
    pub avs_directory: Address,
}

/// secp256k1 key used to sign submitted tasks.
#[derive(Clone)]
pub struct EcdsaSigner {
    key: SigningKey,
}

impl EcdsaSigner {
    pub fn from_hex(value: &str) -> Result<Self, ConfigError> {
        let digits = value.trim().trim_start_matches("0x");
        let bytes = hex::decode(digits)
            .map_err(|e| ConfigError::InvalidPrivateKey(format!("not hex: {}", e)))?;
        if bytes.len() != 32 {
            return Err(ConfigError::InvalidPrivateKey(format!(
                "expected 32 bytes, got {}",
                bytes.len()
            )));
        }
        let key = SigningKey::from_slice(&bytes)
            .map_err(|_| ConfigError::InvalidPrivateKey("not a valid secp256k1 scalar".to_string()))?;
        Ok(Self { key })
    }

    pub fn signing_key(&self) -> &SigningKey {
        &self.key
    }

    /// Compressed SEC1 public key, 0x-prefixed hex.
    pub fn public_key_hex(&self) -> String {
        let point = self.key.verifying_key().to_encoded_point(true);
        format!("0x{}", hex::encode(point.as_bytes()))
    }
}

// Never print the secret scalar.
impl fmt::Debug for EcdsaSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcdsaSigner")
            .field("public_key", &self.public_key_hex())
            .finish()
    }
}

/// Fully resolved configuration for one invocation.
///
/// Submission uses `task_generator`, `aligned_layer.service_manager` and
/// `signer`. The rest is deployment metadata: validated at load time and
/// logged with the endpoint so a run can be matched to its deployment, but
/// not sent with the task.
#[derive(Debug, Clone)]
pub struct Config {
    pub environment: String,
    pub eth_rpc_url: String,
    pub task_generator: TaskGeneratorConfig,
    pub aligned_layer: AlignedLayerAddresses,
    pub shared_avs: SharedAvsAddresses,
    pub signer: EcdsaSigner,
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn load_deployment<A: DeserializeOwned>(path: &Path) -> Result<A, ConfigError> {
    let contents = read_file(path)?;
    let file: DeploymentFile<A> =
        serde_json::from_str(&contents).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(file.addresses)
}

impl Config {
    /// Load the YAML config, both deployment files and the signing key.
    pub fn load(sources: &ConfigSources) -> Result<Self, ConfigError> {
        let contents = read_file(&sources.config_file)?;
        let file: ConfigFile =
            serde_yaml::from_str(&contents).map_err(|source| ConfigError::Yaml {
                path: sources.config_file.clone(),
                source,
            })?;

        let raw: RawAlignedLayerAddresses =
            load_deployment(&sources.aligned_layer_deployment_file)?;
        let aligned_layer = AlignedLayerAddresses {
            service_manager: parse_address(
                "alignedLayerServiceManager",
                &raw.aligned_layer_service_manager,
            )?,
            registry_coordinator: parse_address("registryCoordinator", &raw.registry_coordinator)?,
        };

        let raw: RawSharedAvsAddresses =
            load_deployment(&sources.shared_avs_contracts_deployment_file)?;
        let shared_avs = SharedAvsAddresses {
            delegation_manager: parse_address("delegationManager", &raw.delegation_manager)?,
            avs_directory: parse_address("avsDirectory", &raw.avs_directory)?,
        };

        let signer = EcdsaSigner::from_hex(&sources.ecdsa_private_key)?;

        tracing::info!(
            "Config loaded: environment={} task_generator={} signer={}",
            file.environment,
            file.task_generator.url,
            signer.public_key_hex()
        );

        Ok(Self {
            environment: file.environment,
            eth_rpc_url: file.eth_rpc_url,
            task_generator: file.task_generator,
            aligned_layer,
            shared_avs,
            signer,
        })
    }
}
