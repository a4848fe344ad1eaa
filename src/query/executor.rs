//! Remote statement execution.
//!
//! Forwards single statements to a [`StatementService`] and converts every
//! outcome, including service faults, into a [`StatementResult`] value.

use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DataApiConfig;
use crate::db::{StatementRequest, StatementResponse, StatementService};

/// Outcome of one statement: the service's response or a failure description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "payload", rename_all = "lowercase")]
pub enum StatementResult {
    /// The service accepted and ran the statement.
    Success(StatementResponse),
    /// The call failed; nothing was returned by the service.
    Failure(ExecutionFailure),
}

impl StatementResult {
    /// Returns true for the success variant.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the response if the statement succeeded.
    pub fn response(&self) -> Option<&StatementResponse> {
        match self {
            Self::Success(response) => Some(response),
            Self::Failure(_) => None,
        }
    }

    /// Returns the failure if the statement failed.
    pub fn failure(&self) -> Option<&ExecutionFailure> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure),
        }
    }
}

/// Human-readable description of a failed remote call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionFailure {
    pub description: String,
}

impl ExecutionFailure {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

impl fmt::Display for ExecutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

/// Executes statements against one cluster through a statement service.
///
/// Holds only immutable configuration, so a single executor can be shared
/// behind an `Arc` and called concurrently.
pub struct StatementExecutor {
    service: Arc<dyn StatementService>,
    config: DataApiConfig,
}

impl StatementExecutor {
    /// Creates an executor bound to the identifiers in `config`.
    pub fn new(service: Arc<dyn StatementService>, config: DataApiConfig) -> Self {
        Self { service, config }
    }

    /// The identifiers this executor forwards with every statement.
    pub fn config(&self) -> &DataApiConfig {
        &self.config
    }

    /// Executes `sql` once, in `database` or the configured default.
    ///
    /// Never returns an error and never panics: service errors and panics
    /// both become [`StatementResult::Failure`]. Failures are only logged at
    /// debug level; reporting them is up to the caller. The statement is not
    /// validated locally and is not retried.
    pub async fn execute(&self, sql: &str, database: Option<&str>) -> StatementResult {
        let request = StatementRequest {
            resource_arn: self.config.cluster_arn.clone(),
            secret_arn: self.config.secret_arn.clone(),
            database: database.unwrap_or(&self.config.database).to_string(),
            sql: sql.to_string(),
        };

        let start = Instant::now();
        let outcome = AssertUnwindSafe(self.service.execute_statement(&request))
            .catch_unwind()
            .await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(Ok(response)) => {
                debug!(
                    database = %request.database,
                    elapsed_ms,
                    records = response.records.len(),
                    updated = response.number_of_records_updated,
                    "Statement executed"
                );
                StatementResult::Success(response)
            }
            Ok(Err(e)) => {
                debug!(
                    database = %request.database,
                    elapsed_ms,
                    category = e.category(),
                    "Statement failed: {e}"
                );
                StatementResult::Failure(ExecutionFailure::new(e.message()))
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                debug!(
                    database = %request.database,
                    elapsed_ms,
                    "Statement service panicked: {message}"
                );
                StatementResult::Failure(ExecutionFailure::new(format!(
                    "statement service panicked: {message}"
                )))
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
