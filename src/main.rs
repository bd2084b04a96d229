mod cli;
mod config;
mod error;
mod task_generator;
mod task_sender;
mod types;
mod verifier;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::TaskSenderArgs;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aligned_task_sender=info".into()),
        )
        .init();

    let args = TaskSenderArgs::parse();

    match task_sender::run(&args.config_sources(), &args.task_request()).await {
        Ok(receipt) => {
            println!("Task successfully sent (task index {})", receipt.task_index);
            if let Some(message) = receipt.message {
                println!("{}", message);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            let diagnostic = e.diagnostic();
            tracing::error!("Task sender application failed: {}", diagnostic);
            eprintln!("Task sender application failed. Message: {}", diagnostic);
            ExitCode::FAILURE
        }
    }
}
