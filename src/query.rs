use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::schema::ViewType;

#[derive(Debug, PartialEq)]
pub enum QueryError {
    InvalidTime(String),
    UnknownAggregation(String),
    PercentileOutOfRange(f64),
    UnknownMetric { metric: String, view_type: ViewType },
    UnknownDimension { dimension: String, view_type: ViewType },
    MissingTimeBounds,
    MissingServer,
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::InvalidTime(token) => write!(
                f,
                "Invalid time format: '{}'. Valid formats: relative (-24h, -7d, -30m, now), ISO 8601 (2024-01-01T00:00:00Z), epoch ms",
                token
            ),
            QueryError::UnknownAggregation(token) => write!(
                f,
                "Unknown aggregation: '{}'. Valid: COUNT, SUM, AVG, MIN, MAX, P<0-100>",
                token
            ),
            QueryError::PercentileOutOfRange(value) => {
                write!(f, "Percentile must be 0-100, got: {}", value)
            }
            QueryError::UnknownMetric { metric, view_type } => write!(
                f,
                "Invalid metric '{}' for {}. Valid: {}",
                metric,
                view_type,
                view_type.valid_metrics().join(", ")
            ),
            QueryError::UnknownDimension {
                dimension,
                view_type,
            } => write!(
                f,
                "Invalid dimension '{}' for {}. Valid: {}",
                dimension,
                view_type,
                view_type.valid_dimensions().join(", ")
            ),
            QueryError::MissingTimeBounds => {
                write!(f, "--start-time and --end-time required with --time-interval")
            }
            QueryError::MissingServer => write!(
                f,
                "No tracking server specified. Pass --server or run mlmetrics configure"
            ),
        }
    }
}

impl std::error::Error for QueryError {}

#[derive(Debug)]
pub enum QueryExecutionError {
    ApiError { status: u16, message: String },
    ConnectionError { server: String, reason: String },
    ParseError(String),
}

impl fmt::Display for QueryExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryExecutionError::ApiError { status, message } => {
                write!(f, "MLflow API error (HTTP {}): {}", status, message)
            }
            QueryExecutionError::ConnectionError { server, reason } => {
                write!(f, "Cannot connect to {}: {}", server, reason)
            }
            QueryExecutionError::ParseError(msg) => {
                write!(f, "Could not decode server response: {}", msg)
            }
        }
    }
}

impl std::error::Error for QueryExecutionError {}

#[derive(Debug)]
pub enum CliError {
    Query(QueryError),
    Execution(QueryExecutionError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Query(e) => e.fmt(f),
            CliError::Execution(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for CliError {}

impl From<QueryError> for CliError {
    fn from(e: QueryError) -> Self {
        CliError::Query(e)
    }
}

impl From<QueryExecutionError> for CliError {
    fn from(e: QueryExecutionError) -> Self {
        CliError::Execution(e)
    }
}

/// One result row. Key order is preserved as received so table columns
/// come out in the server's order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataPoint {
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub dimensions: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub values: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub data_points: Vec<DataPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}
