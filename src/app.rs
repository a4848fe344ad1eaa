//! Mode dispatch for the command-line entry point.
//!
//! Output streams and the statement executor are passed in, so every mode can
//! run against a mock service and in-memory writers.

use std::io::{self, Write};
use std::process::ExitCode;

use crate::cli::Mode;
use crate::error::{Result, SetupError};
use crate::query::{ScriptRunner, StatementExecutor, StatementResult};
use crate::summary::SetupSummary;

/// Whether an invocation succeeded, mapped to the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failure,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ExitCode::SUCCESS,
            Status::Failure => ExitCode::FAILURE,
        }
    }
}

/// Options that only affect how statements are applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub continue_on_error: bool,
}

/// Runs one invocation.
///
/// `executor` is only consulted by the statement and script modes; the
/// summary never touches it. Responses and status lines go to `out`, failure
/// lines for a single statement go to `err`.
pub async fn run(
    mode: &Mode,
    executor: Option<&StatementExecutor>,
    options: RunOptions,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<Status> {
    match mode {
        Mode::Summary => {
            SetupSummary::standard()
                .write_to(&mut *out)
                .map_err(|e| write_error("summary", e))?;
            Ok(Status::Success)
        }
        Mode::Statement(sql) => {
            let executor = require_executor(executor)?;
            match executor.execute(sql, None).await {
                StatementResult::Success(response) => {
                    serde_json::to_writer_pretty(&mut *out, &response).map_err(|e| {
                        SetupError::internal(format!("Failed to serialize response: {e}"))
                    })?;
                    writeln!(out).map_err(|e| write_error("response", e))?;
                    Ok(Status::Success)
                }
                StatementResult::Failure(failure) => {
                    writeln!(err, "Error executing SQL: {failure}")
                        .map_err(|e| write_error("error", e))?;
                    Ok(Status::Failure)
                }
            }
        }
        Mode::Script(path) => {
            let executor = require_executor(executor)?;
            let report = ScriptRunner::new(executor)
                .continue_on_error(options.continue_on_error)
                .run_file(path, None)
                .await?;
            report
                .write_to(&mut *out)
                .map_err(|e| write_error("report", e))?;
            Ok(if report.is_success() {
                Status::Success
            } else {
                Status::Failure
            })
        }
    }
}

fn require_executor(executor: Option<&StatementExecutor>) -> Result<&StatementExecutor> {
    executor.ok_or_else(|| SetupError::internal("No statement executor configured"))
}

fn write_error(what: &str, e: io::Error) -> SetupError {
    SetupError::internal(format!("Failed to write {what}: {e}"))
}
