//! Statement executor integration tests.
//!
//! Exercises the executor contract against simulated statement services.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use pretty_assertions::assert_eq;
use rds_setup::db::{
    ColumnMetadata, FailingStatementService, Field, MockStatementService, StatementRequest,
    StatementResponse, StatementService,
};
use rds_setup::error::{Result, SetupError};
use rds_setup::query::{StatementExecutor, StatementResult};

use super::test_config;

/// Echoes the request back as a record, failing statements that mention `fail`.
struct EchoService;

#[async_trait]
impl StatementService for EchoService {
    async fn execute_statement(&self, request: &StatementRequest) -> Result<StatementResponse> {
        // Stagger completions so concurrent calls interleave
        let delay = (request.sql.len() % 7) as u64;
        tokio::time::sleep(Duration::from_millis(delay)).await;

        if request.sql.contains("fail") {
            return Err(SetupError::execution(format!("rejected: {}", request.sql)));
        }
        Ok(StatementResponse::with_records(vec![vec![
            Field::String(request.sql.clone()),
            Field::String(request.database.clone()),
        ]]))
    }
}

#[tokio::test]
async fn test_success_is_passed_through_unchanged() {
    let response = StatementResponse {
        records: vec![
            vec![Field::Long(1), Field::String("Metro Health".to_string())],
            vec![Field::Long(2), Field::Null],
        ],
        column_metadata: vec![
            ColumnMetadata::new("id", "int4"),
            ColumnMetadata::new("name", "varchar"),
        ],
        number_of_records_updated: 0,
        generated_fields: vec![],
        formatted_records: None,
    };
    let executor = StatementExecutor::new(
        Arc::new(MockStatementService::with_response(response.clone())),
        test_config(),
    );

    let result = executor
        .execute("SELECT id, name FROM dialysis_clinics", None)
        .await;

    assert_eq!(result, StatementResult::Success(response));
}

#[tokio::test]
async fn test_service_error_becomes_failure_with_message() {
    let message = "BadRequestException: relation \"patients\" does not exist";
    let executor = StatementExecutor::new(
        Arc::new(FailingStatementService::new(message)),
        test_config(),
    );

    let result = executor.execute("SELECT * FROM patients", None).await;

    let failure = result.failure().expect("expected failure variant");
    assert!(failure.description.contains(message));
    assert!(result.response().is_none());
}

#[tokio::test]
async fn test_omitted_database_uses_configured_default() {
    let service = Arc::new(MockStatementService::new());
    let executor = StatementExecutor::new(service.clone(), test_config());

    executor.execute("SELECT 1", None).await;

    let requests = service.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0],
        StatementRequest {
            resource_arn: test_config().cluster_arn,
            secret_arn: test_config().secret_arn,
            database: "setup".to_string(),
            sql: "SELECT 1".to_string(),
        }
    );
}

#[tokio::test]
async fn test_each_call_forwards_exactly_one_request() {
    let service = Arc::new(MockStatementService::new());
    let executor = StatementExecutor::new(service.clone(), test_config());

    executor.execute("INSERT INTO audit_log DEFAULT VALUES", None).await;
    executor
        .execute("INSERT INTO audit_log DEFAULT VALUES", Some("postgres"))
        .await;

    let databases: Vec<String> = service.requests().into_iter().map(|r| r.database).collect();
    assert_eq!(databases, vec!["setup", "postgres"]);
}

#[tokio::test]
async fn test_every_call_yields_exactly_one_variant() {
    let ok = StatementExecutor::new(Arc::new(MockStatementService::new()), test_config());
    let failing = StatementExecutor::new(
        Arc::new(FailingStatementService::new("network unreachable")),
        test_config(),
    );

    for sql in ["SELECT 1", "DROP TABLE nope", "not even sql", ";"] {
        assert!(ok.execute(sql, None).await.is_success());
        assert!(!failing.execute(sql, Some("postgres")).await.is_success());
    }
}

#[tokio::test]
async fn test_concurrent_calls_are_independent() {
    let executor = Arc::new(StatementExecutor::new(Arc::new(EchoService), test_config()));

    let handles = (0..50).map(|i| {
        let executor = Arc::clone(&executor);
        tokio::spawn(async move {
            let sql = if i % 3 == 0 {
                format!("SELECT {i} -- fail")
            } else {
                format!("SELECT {i}")
            };
            let database = format!("db_{i}");
            let result = executor.execute(&sql, Some(&database)).await;
            (i, sql, database, result)
        })
    });

    for joined in join_all(handles).await {
        let (i, sql, database, result) = joined.unwrap();
        if i % 3 == 0 {
            let failure = result.failure().expect("expected failure");
            assert_eq!(failure.description, format!("rejected: {sql}"));
        } else {
            let response = result.response().expect("expected success");
            assert_eq!(
                response.records,
                vec![vec![Field::String(sql), Field::String(database)]]
            );
        }
    }
}
