//! Integration tests for rds-setup.

pub mod binary_test;
pub mod executor_test;
pub mod script_test;

use rds_setup::config::DataApiConfig;

/// Identifiers shared by the executor-level tests.
pub fn test_config() -> DataApiConfig {
    DataApiConfig::new(
        "arn:aws:rds:us-east-1:123456789012:cluster:setup-db",
        "arn:aws:secretsmanager:us-east-1:123456789012:secret:setup-db-secret",
        "setup",
        "us-east-1",
    )
}
