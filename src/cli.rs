use std::path::PathBuf;

use clap::Parser;

use crate::config::ConfigSources;
use crate::task_sender::TaskRequest;

#[derive(Debug, Parser)]
#[command(name = "Aligned Layer Task Sender")]
#[command(about = "Aligned Layer Task Sender")]
#[command(long_about = "Service that sends proofs to verify by operator nodes.")]
#[command(version = env!("TASK_SENDER_VERSION"))]
pub struct TaskSenderArgs {
    /// Load configuration from FILE
    #[arg(long, env = "CONFIG_FILE", value_name = "FILE", default_value = "config-files/aggregator.yaml")]
    pub config: PathBuf,

    /// Load aligned layer contract addresses from FILE
    #[arg(
        long,
        env = "ALIGNED_LAYER_DEPLOYMENT_FILE",
        value_name = "FILE",
        default_value = "contracts/script/output/31337/aligned_layer_avs_deployment_output.json"
    )]
    pub aligned_layer_deployment: PathBuf,

    /// Load shared avs contract addresses from FILE
    #[arg(
        long,
        env = "SHARED_AVS_CONTRACTS_DEPLOYMENT_FILE",
        value_name = "FILE",
        default_value = "contracts/script/output/31337/shared_avs_contracts_deployment_output.json"
    )]
    pub shared_avs_contracts_deployment: PathBuf,

    /// Ethereum private key used to sign tasks
    #[arg(
        long,
        env = "ECDSA_PRIVATE_KEY",
        hide_env_values = true,
        default_value = "0x2a871d0798f97d79848a013d4936a73bf4cc922c825d33c1cf7073dff6d409c6"
    )]
    pub ecdsa_private_key: String,

    /// Load proof from PROOF_FILE
    #[arg(long, env = "PROOF_FILE", value_name = "PROOF_FILE")]
    pub proof: PathBuf,

    /// Verifier ID: cairo, plonk, kimchi or sp1
    #[arg(long, env = "VERIFIER_ID")]
    pub verifier_id: String,

    /// Load public inputs from PUB_INPUT_FILE
    #[arg(long, env = "PUB_INPUT_FILE", value_name = "PUB_INPUT_FILE")]
    pub pub_input: Option<PathBuf>,
}

impl TaskSenderArgs {
    pub fn config_sources(&self) -> ConfigSources {
        ConfigSources {
            config_file: self.config.clone(),
            aligned_layer_deployment_file: self.aligned_layer_deployment.clone(),
            shared_avs_contracts_deployment_file: self.shared_avs_contracts_deployment.clone(),
            ecdsa_private_key: self.ecdsa_private_key.clone(),
        }
    }

    pub fn task_request(&self) -> TaskRequest {
        TaskRequest {
            proof_path: self.proof.clone(),
            verifier_id: self.verifier_id.clone(),
            pub_input_path: self.pub_input.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    const ENV_VARS: [&str; 7] = [
        "CONFIG_FILE",
        "ALIGNED_LAYER_DEPLOYMENT_FILE",
        "SHARED_AVS_CONTRACTS_DEPLOYMENT_FILE",
        "ECDSA_PRIVATE_KEY",
        "PROOF_FILE",
        "VERIFIER_ID",
        "PUB_INPUT_FILE",
    ];

    /// Parse with only the given argv; flag env vars from the caller are dropped.
    fn parse_isolated(argv: &[&str]) -> Result<TaskSenderArgs, clap::Error> {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
        TaskSenderArgs::try_parse_from(argv.iter().copied())
    }

    #[test]
    fn test_command_is_well_formed() {
        TaskSenderArgs::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args =
            parse_isolated(&["task-sender", "--proof", "a.proof", "--verifier-id", "sp1"]).unwrap();
        let sources = args.config_sources();
        assert_eq!(sources.config_file, PathBuf::from("config-files/aggregator.yaml"));
        assert_eq!(
            sources.aligned_layer_deployment_file,
            PathBuf::from("contracts/script/output/31337/aligned_layer_avs_deployment_output.json")
        );
        assert!(sources.ecdsa_private_key.starts_with("0x2a871d07"));

        let request = args.task_request();
        assert_eq!(request.proof_path, PathBuf::from("a.proof"));
        assert_eq!(request.verifier_id, "sp1");
        assert_eq!(request.pub_input_path, None);
    }

    #[test]
    fn test_all_flags() {
        let args = parse_isolated(&[
            "task-sender",
            "--config",
            "c.yaml",
            "--aligned-layer-deployment",
            "a.json",
            "--shared-avs-contracts-deployment",
            "s.json",
            "--ecdsa-private-key",
            "0x01",
            "--proof",
            "p.bin",
            "--verifier-id",
            " plonk ",
            "--pub-input",
            "i.bin",
        ])
        .unwrap();
        assert_eq!(args.config, PathBuf::from("c.yaml"));
        assert_eq!(args.shared_avs_contracts_deployment, PathBuf::from("s.json"));
        assert_eq!(args.ecdsa_private_key, "0x01");
        // Trimming is the resolver's job.
        assert_eq!(args.verifier_id, " plonk ");
        assert_eq!(args.pub_input, Some(PathBuf::from("i.bin")));
    }

    #[test]
    fn test_proof_is_required() {
        let result = parse_isolated(&["task-sender", "--verifier-id", "sp1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verifier_id_is_required() {
        let result = parse_isolated(&["task-sender", "--proof", "a.proof"]);
        assert!(result.is_err());
    }
}
