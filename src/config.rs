//! Configuration management for rds-setup.
//!
//! Handles loading Data API targets from TOML files and environment variables,
//! and validating the resource identifiers the executor is constructed with.

use crate::error::{Result, SetupError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Database used when neither the config file nor the environment names one.
pub const DEFAULT_DATABASE: &str = "postgres";

/// Main configuration structure for rds-setup.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Named Data API targets.
    #[serde(default)]
    pub targets: HashMap<String, TargetConfig>,
}

/// A (possibly partial) set of resource identifiers for one cluster.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TargetConfig {
    /// ARN of the Aurora cluster the Data API executes against.
    pub cluster_arn: Option<String>,

    /// ARN of the Secrets Manager secret holding the database credentials.
    pub secret_arn: Option<String>,

    /// Default database name for statements that do not name one.
    pub database: Option<String>,

    /// AWS region of the Data API endpoint.
    pub region: Option<String>,
}

impl TargetConfig {
    /// Merges another config into this one, with the other taking precedence.
    pub fn merge(&mut self, other: &TargetConfig) {
        if other.cluster_arn.is_some() {
            self.cluster_arn = other.cluster_arn.clone();
        }
        if other.secret_arn.is_some() {
            self.secret_arn = other.secret_arn.clone();
        }
        if other.database.is_some() {
            self.database = other.database.clone();
        }
        if other.region.is_some() {
            self.region = other.region.clone();
        }
    }

    /// Applies environment variables (RDS_CLUSTER_ARN, AWS_REGION, etc.) as defaults.
    pub fn apply_env_defaults(&mut self) {
        self.apply_defaults_from(|key| std::env::var(key).ok());
    }

    /// Fills missing fields from the given variable lookup.
    fn apply_defaults_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.cluster_arn.is_none() {
            self.cluster_arn = lookup("RDS_CLUSTER_ARN");
        }
        if self.secret_arn.is_none() {
            self.secret_arn = lookup("RDS_SECRET_ARN");
        }
        if self.database.is_none() {
            self.database = lookup("RDS_DATABASE");
        }
        if self.region.is_none() {
            self.region = lookup("AWS_REGION").or_else(|| lookup("AWS_DEFAULT_REGION"));
        }
    }

    /// Resolves this target into a complete, validated executor configuration.
    pub fn resolve(self) -> Result<DataApiConfig> {
        let cluster_arn = self.cluster_arn.ok_or_else(|| {
            SetupError::config("Cluster ARN is required (--cluster-arn or RDS_CLUSTER_ARN)")
        })?;
        let secret_arn = self.secret_arn.ok_or_else(|| {
            SetupError::config("Secret ARN is required (--secret-arn or RDS_SECRET_ARN)")
        })?;
        let region = self
            .region
            .ok_or_else(|| SetupError::config("Region is required (--region or AWS_REGION)"))?;

        let config = DataApiConfig {
            cluster_arn,
            secret_arn,
            database: self
                .database
                .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            region,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Resource identifiers the statement executor is constructed against.
///
/// Immutable once resolved; the executor keeps its own copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataApiConfig {
    pub cluster_arn: String,
    pub secret_arn: String,
    pub database: String,
    pub region: String,
}

impl DataApiConfig {
    /// Creates a config from explicit identifiers without validation.
    pub fn new(
        cluster_arn: impl Into<String>,
        secret_arn: impl Into<String>,
        database: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            cluster_arn: cluster_arn.into(),
            secret_arn: secret_arn.into(),
            database: database.into(),
            region: region.into(),
        }
    }

    /// Checks that every identifier is present and well-formed.
    ///
    /// A region mismatch between an ARN and the configured region is only
    /// warned about, since cross-region secrets are legal.
    pub fn validate(&self) -> Result<()> {
        let cluster = Arn::parse(&self.cluster_arn)
            .map_err(|e| SetupError::config(format!("Invalid cluster ARN: {e}")))?;
        if cluster.service != "rds" {
            return Err(SetupError::config(format!(
                "Cluster ARN must belong to the 'rds' service, got '{}'",
                cluster.service
            )));
        }

        let secret = Arn::parse(&self.secret_arn)
            .map_err(|e| SetupError::config(format!("Invalid secret ARN: {e}")))?;
        if secret.service != "secretsmanager" {
            return Err(SetupError::config(format!(
                "Secret ARN must belong to the 'secretsmanager' service, got '{}'",
                secret.service
            )));
        }

        if self.database.trim().is_empty() {
            return Err(SetupError::config("Database name must not be empty"));
        }
        if self.region.trim().is_empty() {
            return Err(SetupError::config("Region must not be empty"));
        }

        for arn in [&cluster, &secret] {
            if arn.region != self.region {
                warn!(
                    arn_region = arn.region,
                    region = %self.region,
                    service = arn.service,
                    "ARN region differs from configured region"
                );
            }
        }

        Ok(())
    }

    /// Returns a display-safe string for log and status output.
    pub fn display_string(&self) -> String {
        let cluster = self
            .cluster_arn
            .rsplit(':')
            .next()
            .unwrap_or(&self.cluster_arn);
        format!("{} @ {} ({})", self.database, cluster, self.region)
    }
}

/// The colon-separated components of an AWS ARN that validation cares about.
#[derive(Debug, PartialEq, Eq)]
struct Arn<'a> {
    service: &'a str,
    region: &'a str,
}

impl<'a> Arn<'a> {
    /// Parses `arn:partition:service:region:account:resource`.
    fn parse(s: &'a str) -> std::result::Result<Self, String> {
        let parts: Vec<&str> = s.splitn(6, ':').collect();
        if parts.len() != 6 || parts[0] != "arn" {
            return Err(format!(
                "'{s}' is not of the form arn:partition:service:region:account:resource"
            ));
        }
        if parts[1].is_empty() || parts[2].is_empty() || parts[5].is_empty() {
            return Err(format!("'{s}' has an empty partition, service or resource"));
        }
        Ok(Self {
            service: parts[2],
            region: parts[3],
        })
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rds-setup")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| SetupError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            SetupError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }

    /// Gets a named target, or the default target if name is None.
    pub fn get_target(&self, name: Option<&str>) -> Option<&TargetConfig> {
        let key = name.unwrap_or("default");
        self.targets.get(key)
    }
}

/// Loads variables from a dotenv file without overriding ones already set.
///
/// Returns `Ok(false)` when the file does not exist. A file that exists but
/// cannot be read or parsed is a config error.
pub fn load_env_file(path: &Path) -> Result<bool> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(SetupError::config(format!(
            "Failed to load {}: {e}",
            path.display()
        ))),
    }
}
