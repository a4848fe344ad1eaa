//! Script runner integration tests.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use rds_setup::db::{MockStatementService, StatementRequest, StatementResponse, StatementService};
use rds_setup::error::{Result, SetupError};
use rds_setup::query::{ScriptRunner, StatementExecutor};

use super::test_config;

const SEED_SCRIPT: &str = r#"
-- Dialysis clinics
CREATE TABLE dialysis_clinics (id serial PRIMARY KEY, name text NOT NULL);

INSERT INTO dialysis_clinics (name) VALUES ('Metro Health'), ('Lakeside Renal');
INSERT INTO broken_table VALUES (1);
INSERT INTO dialysis_clinics (name) VALUES ('Grand River');
"#;

/// Fails any statement touching `broken_table`.
struct SelectiveService {
    inner: MockStatementService,
}

#[async_trait::async_trait]
impl StatementService for SelectiveService {
    async fn execute_statement(&self, request: &StatementRequest) -> Result<StatementResponse> {
        self.inner.execute_statement(request).await?;
        if request.sql.contains("broken_table") {
            return Err(SetupError::execution("relation \"broken_table\" does not exist"));
        }
        Ok(StatementResponse::updated(1))
    }
}

fn selective() -> Arc<SelectiveService> {
    Arc::new(SelectiveService {
        inner: MockStatementService::new(),
    })
}

#[tokio::test]
async fn test_script_runs_statements_in_order() {
    let service = Arc::new(MockStatementService::new());
    let executor = StatementExecutor::new(service.clone(), test_config());

    let report = ScriptRunner::new(&executor)
        .run("CREATE TABLE a (id int); CREATE TABLE b (id int);", None)
        .await
        .unwrap();

    assert!(report.is_success());
    let sqls: Vec<String> = service.requests().into_iter().map(|r| r.sql).collect();
    assert_eq!(sqls, vec!["CREATE TABLE a (id int)", "CREATE TABLE b (id int)"]);
}

#[tokio::test]
async fn test_script_stops_at_first_failure() {
    let service = selective();
    let executor = StatementExecutor::new(service.clone(), test_config());

    let report = ScriptRunner::new(&executor).run(SEED_SCRIPT, None).await.unwrap();

    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.skipped, 1);
    assert!(!report.is_success());
    assert_eq!(service.inner.requests().len(), 3);

    let failure = report.outcomes[2].result.failure().unwrap();
    assert!(failure.description.contains("broken_table"));
}

#[tokio::test]
async fn test_script_continue_on_error_runs_everything() {
    let service = selective();
    let executor = StatementExecutor::new(service.clone(), test_config());

    let report = ScriptRunner::new(&executor)
        .continue_on_error(true)
        .run(SEED_SCRIPT, Some("postgres"))
        .await
        .unwrap();

    assert_eq!(report.succeeded(), 3);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.skipped, 0);
    assert!(service
        .inner
        .requests()
        .iter()
        .all(|r| r.database == "postgres"));
}

#[tokio::test]
async fn test_run_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schema.sql");
    std::fs::write(&path, "CREATE TABLE users (id serial);\n").unwrap();

    let executor = StatementExecutor::new(Arc::new(MockStatementService::new()), test_config());
    let report = ScriptRunner::new(&executor)
        .run_file(&path, None)
        .await
        .unwrap();

    assert_eq!(report.outcomes.len(), 1);
    assert!(report.is_success());
}

#[tokio::test]
async fn test_run_missing_file_is_script_error() {
    let dir = tempfile::tempdir().unwrap();
    let executor = StatementExecutor::new(Arc::new(MockStatementService::new()), test_config());

    let err = ScriptRunner::new(&executor)
        .run_file(&dir.path().join("absent.sql"), None)
        .await
        .unwrap_err();

    assert_eq!(err.category(), "Script Error");
}
