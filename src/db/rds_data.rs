//! AWS RDS Data API implementation of [`StatementService`].

use super::{
    ArrayField, ColumnMetadata, Field, StatementRequest, StatementResponse, StatementService,
};
use crate::config::DataApiConfig;
use crate::error::{Result, SetupError};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_rdsdata::error::DisplayErrorContext;
use aws_sdk_rdsdata::operation::execute_statement::ExecuteStatementOutput;
use aws_sdk_rdsdata::types::{ArrayValue, ColumnMetadata as SdkColumnMetadata, Field as SdkField};
use aws_sdk_rdsdata::Client;
use tracing::debug;

/// Statement service backed by the RDS Data API.
///
/// Credentials come from the default AWS provider chain (environment,
/// profile, instance or task role). No timeout is imposed beyond the SDK's
/// own transport defaults.
#[derive(Debug, Clone)]
pub struct RdsDataClient {
    client: Client,
}

impl RdsDataClient {
    /// Builds a client for the region in `config`.
    pub async fn connect(config: &DataApiConfig) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;
        debug!(region = %config.region, "Created RDS Data API client");
        Self::from_client(Client::new(&sdk_config))
    }

    /// Wraps an already-configured SDK client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StatementService for RdsDataClient {
    async fn execute_statement(&self, request: &StatementRequest) -> Result<StatementResponse> {
        let output = self
            .client
            .execute_statement()
            .resource_arn(&request.resource_arn)
            .secret_arn(&request.secret_arn)
            .database(&request.database)
            .sql(&request.sql)
            .include_result_metadata(true)
            .send()
            .await
            .map_err(|e| SetupError::execution(DisplayErrorContext(&e).to_string()))?;

        Ok(convert_output(output))
    }
}

fn convert_output(output: ExecuteStatementOutput) -> StatementResponse {
    StatementResponse {
        records: output
            .records
            .unwrap_or_default()
            .into_iter()
            .map(|row| row.into_iter().map(convert_field).collect())
            .collect(),
        column_metadata: output
            .column_metadata
            .unwrap_or_default()
            .into_iter()
            .map(convert_column)
            .collect(),
        number_of_records_updated: output.number_of_records_updated,
        generated_fields: output
            .generated_fields
            .unwrap_or_default()
            .into_iter()
            .map(convert_field)
            .collect(),
        formatted_records: output.formatted_records,
    }
}

fn convert_column(column: SdkColumnMetadata) -> ColumnMetadata {
    ColumnMetadata {
        name: column.name,
        type_name: column.type_name,
        table_name: column.table_name,
        nullable: column.nullable,
    }
}

fn convert_field(field: SdkField) -> Field {
    match field {
        SdkField::IsNull(_) => Field::Null,
        SdkField::BooleanValue(b) => Field::Bool(b),
        SdkField::LongValue(i) => Field::Long(i),
        SdkField::DoubleValue(f) => Field::Double(f),
        SdkField::StringValue(s) => Field::String(s),
        SdkField::BlobValue(b) => Field::Blob(b.into_inner()),
        SdkField::ArrayValue(a) => Field::Array(convert_array(a)),
        other => {
            debug!(?other, "Unrecognized Data API field variant; treating as NULL");
            Field::Null
        }
    }
}

fn convert_array(array: ArrayValue) -> ArrayField {
    match array {
        ArrayValue::BooleanValues(v) => ArrayField::Bools(v),
        ArrayValue::LongValues(v) => ArrayField::Longs(v),
        ArrayValue::DoubleValues(v) => ArrayField::Doubles(v),
        ArrayValue::StringValues(v) => ArrayField::Strings(v),
        ArrayValue::ArrayValues(v) => {
            ArrayField::Nested(v.into_iter().map(convert_array).collect())
        }
        other => {
            debug!(?other, "Unrecognized Data API array variant; treating as empty");
            ArrayField::Strings(Vec::new())
        }
    }
}
