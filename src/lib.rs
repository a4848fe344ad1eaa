//! rds-setup - Database setup through the AWS RDS Data API.
//!
//! The core is [`query::StatementExecutor`], which runs single statements
//! against a cluster through a [`db::StatementService`] and reports every
//! outcome as a value rather than an error.

pub mod app;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod query;
pub mod summary;
