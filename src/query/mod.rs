//! Statement and script execution for rds-setup.
//!
//! This module isolates remote SQL execution and script application from
//! the command-line entry point.

pub mod executor;
pub mod script;

pub use executor::{ExecutionFailure, StatementExecutor, StatementResult};
pub use script::{preview, split_statements, ScriptReport, ScriptRunner, StatementOutcome};
