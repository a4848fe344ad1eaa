//! Statement request and response types.
//!
//! The response types mirror the Data API `ExecuteStatement` output so that
//! callers receive exactly what the service returned.

use serde::{Deserialize, Serialize};

/// A single statement bound for the Data API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementRequest {
    /// ARN of the target cluster (`resourceArn`).
    pub resource_arn: String,

    /// ARN of the credentials secret (`secretArn`).
    pub secret_arn: String,

    /// Logical database the statement runs in.
    pub database: String,

    /// SQL text, forwarded verbatim.
    pub sql: String,
}

/// The service's response to one statement, passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementResponse {
    /// Result rows, one `Field` per column.
    #[serde(default)]
    pub records: Vec<Vec<Field>>,

    /// Column metadata, present when result metadata was requested.
    #[serde(default)]
    pub column_metadata: Vec<ColumnMetadata>,

    /// Rows affected by DML statements.
    #[serde(default)]
    pub number_of_records_updated: i64,

    /// Values generated by the statement (e.g. serial keys).
    #[serde(default)]
    pub generated_fields: Vec<Field>,

    /// JSON-formatted records when the service was asked for them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_records: Option<String>,
}

impl StatementResponse {
    /// Creates a response carrying the given rows.
    pub fn with_records(records: Vec<Vec<Field>>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    /// Creates a response for a DML statement that touched `count` rows.
    pub fn updated(count: i64) -> Self {
        Self {
            number_of_records_updated: count,
            ..Self::default()
        }
    }
}

/// Metadata about a column in a result set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    /// Column name or alias.
    pub name: Option<String>,

    /// Database type name (e.g. `varchar`, `int4`).
    pub type_name: Option<String>,

    /// Name of the source table, when known.
    pub table_name: Option<String>,

    /// Nullability as reported by the driver (0 = no nulls, 1 = nullable, 2 = unknown).
    pub nullable: i32,
}

impl ColumnMetadata {
    /// Creates column metadata with the given name and type.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            type_name: Some(type_name.into()),
            ..Self::default()
        }
    }
}

/// A single value from a Data API record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Field {
    /// NULL value.
    #[default]
    Null,

    /// Boolean value.
    Bool(bool),

    /// 64-bit integer.
    Long(i64),

    /// Double-precision float.
    Double(f64),

    /// Text value (also used by the service for numerics, dates and JSON).
    String(String),

    /// Binary data.
    Blob(Vec<u8>),

    /// Array value (Postgres arrays).
    Array(ArrayField),
}

/// An array value from a Data API record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "lowercase")]
pub enum ArrayField {
    Bools(Vec<bool>),
    Longs(Vec<i64>),
    Doubles(Vec<f64>),
    Strings(Vec<String>),
    Nested(Vec<ArrayField>),
}
