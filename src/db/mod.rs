//! Statement service abstraction for rds-setup.
//!
//! Provides a trait-based interface over the managed SQL-execution service,
//! allowing the Data API client and test doubles to be used interchangeably.

mod mock;
mod rds_data;
mod types;

pub use mock::{FailingStatementService, MockStatementService};
pub use rds_data::RdsDataClient;
pub use types::{ArrayField, ColumnMetadata, Field, StatementRequest, StatementResponse};

use crate::error::Result;
use async_trait::async_trait;

/// Trait defining the interface for statement execution services.
///
/// Implementations execute exactly one statement per call and never retry.
#[async_trait]
pub trait StatementService: Send + Sync {
    /// Executes a single SQL statement and returns the service's response.
    async fn execute_statement(&self, request: &StatementRequest) -> Result<StatementResponse>;
}
