//! Command-line argument parsing for rds-setup.
//!
//! With no arguments the tool prints the setup summary; `--sql` or `--file`
//! switch it to executing statements through the Data API.

use crate::config::{Config, DataApiConfig, TargetConfig};
use crate::error::{Result, SetupError};
use clap::Parser;
use std::path::PathBuf;

/// What a single invocation should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Print the fixed setup summary.
    Summary,
    /// Execute one SQL statement.
    Statement(String),
    /// Execute every statement in a SQL script file.
    Script(PathBuf),
}

/// Database setup through the AWS RDS Data API.
#[derive(Parser, Debug)]
#[command(name = "rds-setup")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Execute a single SQL statement and print the response as JSON
    #[arg(long, value_name = "SQL", conflicts_with = "file")]
    pub sql: Option<String>,

    /// Execute each statement of a SQL script file in order
    #[arg(short = 'f', long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Keep running a script after a statement fails
    #[arg(long, requires = "file")]
    pub continue_on_error: bool,

    /// Cluster ARN (overrides config file and RDS_CLUSTER_ARN)
    #[arg(long, value_name = "ARN")]
    pub cluster_arn: Option<String>,

    /// Secret ARN holding the database credentials (overrides RDS_SECRET_ARN)
    #[arg(long, value_name = "ARN")]
    pub secret_arn: Option<String>,

    /// Database name
    #[arg(short = 'd', long, value_name = "DATABASE")]
    pub database: Option<String>,

    /// AWS region (overrides AWS_REGION)
    #[arg(long, value_name = "REGION")]
    pub region: Option<String>,

    /// Use named target from config
    #[arg(short = 't', long, value_name = "NAME")]
    pub target: Option<String>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns what this invocation should do.
    pub fn mode(&self) -> Mode {
        if let Some(sql) = &self.sql {
            Mode::Statement(sql.clone())
        } else if let Some(path) = &self.file {
            Mode::Script(path.clone())
        } else {
            Mode::Summary
        }
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Converts CLI arguments to a partial target config.
    pub fn to_target_config(&self) -> TargetConfig {
        TargetConfig {
            cluster_arn: self.cluster_arn.clone(),
            secret_arn: self.secret_arn.clone(),
            database: self.database.clone(),
            region: self.region.clone(),
        }
    }

    /// Resolves the executor configuration.
    ///
    /// Precedence: CLI arguments, then the named (or default) target from the
    /// config file, then environment variables, then built-in defaults.
    pub fn resolve_data_api_config(&self, config: &Config) -> Result<DataApiConfig> {
        let mut target = match self.target.as_deref() {
            Some(name) => config.get_target(Some(name)).cloned().ok_or_else(|| {
                SetupError::config(format!("Target '{name}' not found in config file"))
            })?,
            None => config.get_target(None).cloned().unwrap_or_default(),
        };

        target.merge(&self.to_target_config());
        target.apply_env_defaults();
        target.resolve()
    }
}
