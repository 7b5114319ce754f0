pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;

use cli::{Args, Command};
use config::{resolve_config, ConfigOverrides};
use error::AppError;
use services::orchestrator::RequestOrchestrator;
use std::process::ExitCode;

pub async fn run(args: Args) -> Result<ExitCode, AppError> {
    let config = resolve_config(
        args.config.as_deref(),
        ConfigOverrides {
            endpoint: args.endpoint.clone(),
            timeout_ms: args.timeout_ms,
        },
    )?;
    logging::init(args.debug, config.log_level.as_deref());
    tracing::debug!(endpoint = %config.endpoint, timeout_ms = config.timeout_ms, "configuration resolved");

    let orchestrator = RequestOrchestrator::from_config(&config)?;

    match args.command {
        Command::Analyze { image, json } => {
            let result = commands::analyze::analyze_image(orchestrator, &image, json).await?;
            Ok(if result.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Shell => {
            commands::shell::run_shell(orchestrator).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Ping => {
            commands::ping::ping(&orchestrator).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
