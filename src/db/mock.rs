//! Mock statement services for testing.
//!
//! Provides in-memory stand-ins for the Data API so the executor can be
//! exercised without AWS credentials.

use super::{StatementRequest, StatementResponse, StatementService};
use crate::error::{Result, SetupError};
use async_trait::async_trait;
use std::sync::Mutex;

/// A mock service that returns a canned response and records every request.
pub struct MockStatementService {
    response: StatementResponse,
    requests: Mutex<Vec<StatementRequest>>,
}

impl MockStatementService {
    /// Creates a mock service that answers every statement with an empty response.
    pub fn new() -> Self {
        Self::with_response(StatementResponse::default())
    }

    /// Creates a mock service that answers every statement with `response`.
    pub fn with_response(response: StatementResponse) -> Self {
        Self {
            response,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns a copy of every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<StatementRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl Default for MockStatementService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatementService for MockStatementService {
    async fn execute_statement(&self, request: &StatementRequest) -> Result<StatementResponse> {
        self.requests
            .lock()
            .map_err(|_| SetupError::internal("mock request log poisoned"))?
            .push(request.clone());
        Ok(self.response.clone())
    }
}

/// A service that fails every statement with the same message.
pub struct FailingStatementService {
    message: String,
}

impl FailingStatementService {
    /// Creates a service whose every call fails with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl StatementService for FailingStatementService {
    async fn execute_statement(&self, _request: &StatementRequest) -> Result<StatementResponse> {
        Err(SetupError::execution(self.message.clone()))
    }
}
