//! rds-setup - Database setup through the AWS RDS Data API.

use std::io;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use rds_setup::app::{self, RunOptions};
use rds_setup::cli::{Cli, Mode};
use rds_setup::config::{self, Config};
use rds_setup::db::RdsDataClient;
use rds_setup::error::Result;
use rds_setup::logging;
use rds_setup::query::StatementExecutor;
use tracing::{debug, error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let env_file = Path::new(".env");
    let env_loaded = config::load_env_file(env_file);

    let cli = Cli::parse_args();
    logging::init_stderr_logging(logging::default_level(cli.verbose));

    match env_loaded {
        Ok(true) => debug!("Loaded environment from {}", env_file.display()),
        Ok(false) => {}
        Err(e) => warn!("{e}"),
    }

    match run(&cli).await {
        Ok(status) => status.into(),
        Err(e) => {
            error!("{}: {}", e.category(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<app::Status> {
    let mode = cli.mode();
    let executor = match mode {
        Mode::Summary => None,
        Mode::Statement(_) | Mode::Script(_) => Some(build_executor(cli).await?),
    };
    let options = RunOptions {
        continue_on_error: cli.continue_on_error,
    };

    app::run(
        &mode,
        executor.as_ref(),
        options,
        &mut io::stdout(),
        &mut io::stderr(),
    )
    .await
}

/// Resolves configuration and builds an executor backed by the Data API.
async fn build_executor(cli: &Cli) -> Result<StatementExecutor> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    let data_api = cli.resolve_data_api_config(&config)?;
    info!("Target: {}", data_api.display_string());

    let client = RdsDataClient::connect(&data_api).await;
    Ok(StatementExecutor::new(Arc::new(client), data_api))
}
