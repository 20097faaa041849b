use serde::Serialize;

use crate::parsers::Aggregation;
use crate::query::QueryError;
use crate::schema::ViewType;

/// The MLflow server caps a page at 1000 results.
pub const DEFAULT_MAX_RESULTS: i64 = 1000;

/// Optional fields are left out of the payload entirely rather than sent
/// as nulls or empty arrays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryRequest {
    pub experiment_ids: Vec<String>,
    pub view_type: i32,
    pub metric_name: String,
    pub aggregations: Vec<Aggregation>,
    pub max_results: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_interval_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time_ms: Option<i64>,
}

pub struct RequestBuilder {
    experiment_ids: Vec<String>,
    view_type: ViewType,
    metric_name: String,
    aggregations: Vec<Aggregation>,
    dimensions: Vec<String>,
    filters: Vec<String>,
    time_interval_seconds: Option<i64>,
    start_time_ms: Option<i64>,
    end_time_ms: Option<i64>,
    max_results: i64,
}

impl RequestBuilder {
    pub fn new(experiment_ids: Vec<String>, view_type: ViewType, metric_name: &str) -> Self {
        RequestBuilder {
            experiment_ids,
            view_type,
            metric_name: metric_name.to_string(),
            aggregations: vec![],
            dimensions: vec![],
            filters: vec![],
            time_interval_seconds: None,
            start_time_ms: None,
            end_time_ms: None,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn aggregations(mut self, aggregations: Vec<Aggregation>) -> Self {
        self.aggregations = aggregations;
        self
    }

    pub fn dimensions(mut self, dimensions: Vec<String>) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn filters(mut self, filters: Vec<String>) -> Self {
        self.filters = filters;
        self
    }

    pub fn time_interval(mut self, seconds: Option<i64>) -> Self {
        self.time_interval_seconds = seconds;
        self
    }

    pub fn start_time(mut self, epoch_ms: Option<i64>) -> Self {
        self.start_time_ms = epoch_ms;
        self
    }

    pub fn end_time(mut self, epoch_ms: Option<i64>) -> Self {
        self.end_time_ms = epoch_ms;
        self
    }

    pub fn max_results(mut self, max_results: i64) -> Self {
        self.max_results = max_results;
        self
    }

    /// A time bucket without both bounds is a configuration error, caught
    /// here so it never reaches the transport.
    pub fn build(self) -> Result<QueryRequest, QueryError> {
        if self.time_interval_seconds.is_some()
            && (self.start_time_ms.is_none() || self.end_time_ms.is_none())
        {
            return Err(QueryError::MissingTimeBounds);
        }

        Ok(QueryRequest {
            experiment_ids: self.experiment_ids,
            view_type: self.view_type.code(),
            metric_name: self.metric_name,
            aggregations: self.aggregations,
            max_results: self.max_results,
            dimensions: if self.dimensions.is_empty() {
                None
            } else {
                Some(self.dimensions)
            },
            filters: if self.filters.is_empty() {
                None
            } else {
                Some(self.filters)
            },
            time_interval_seconds: self.time_interval_seconds,
            start_time_ms: self.start_time_ms,
            end_time_ms: self.end_time_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::parsers::{AggregationParser, Parser as _};

    use super::*;

    #[test]
    fn builds_minimal_payload_without_optional_fields() {
        let request = RequestBuilder::new(vec!["1".to_string()], ViewType::Traces, "latency")
            .aggregations(AggregationParser::from_str("AVG,P95").unwrap())
            .build()
            .unwrap();

        let payload = serde_json::to_value(&request).unwrap();

        assert_eq!(
            payload,
            json!({
                "experiment_ids": ["1"],
                "view_type": 1,
                "metric_name": "latency",
                "aggregations": [
                    {"aggregation_type": 3},
                    {"aggregation_type": 4, "percentile_value": 95.0},
                ],
                "max_results": 1000,
            })
        );
    }

    #[test]
    fn includes_optional_fields_when_present() {
        let request = RequestBuilder::new(
            vec!["1".to_string(), "2".to_string()],
            ViewType::Spans,
            "latency",
        )
        .aggregations(vec![crate::parsers::Aggregation::Count])
        .dimensions(vec!["span_name".to_string()])
        .filters(vec!["span_type = 'LLM'".to_string()])
        .time_interval(Some(3600))
        .start_time(Some(1704067200000))
        .end_time(Some(1704153600000))
        .max_results(50)
        .build()
        .unwrap();

        let payload = serde_json::to_value(&request).unwrap();

        assert_eq!(payload["view_type"], 2);
        assert_eq!(payload["dimensions"], json!(["span_name"]));
        assert_eq!(payload["filters"], json!(["span_type = 'LLM'"]));
        assert_eq!(payload["time_interval_seconds"], 3600);
        assert_eq!(payload["start_time_ms"], 1704067200000i64);
        assert_eq!(payload["end_time_ms"], 1704153600000i64);
        assert_eq!(payload["max_results"], 50);
    }

    #[test]
    fn rejects_time_interval_without_both_bounds() {
        let build = |start: Option<i64>, end: Option<i64>| {
            RequestBuilder::new(vec!["1".to_string()], ViewType::Traces, "latency")
                .time_interval(Some(3600))
                .start_time(start)
                .end_time(end)
                .build()
        };

        assert_eq!(build(None, None).unwrap_err(), QueryError::MissingTimeBounds);
        assert_eq!(
            build(Some(0), None).unwrap_err(),
            QueryError::MissingTimeBounds
        );
        assert_eq!(
            build(None, Some(1)).unwrap_err(),
            QueryError::MissingTimeBounds
        );
        assert!(build(Some(0), Some(1)).is_ok());
    }

    #[test]
    fn zero_timestamps_are_sent_not_dropped() {
        let request = RequestBuilder::new(vec!["1".to_string()], ViewType::Traces, "latency")
            .start_time(Some(0))
            .end_time(Some(0))
            .build()
            .unwrap();

        let payload = serde_json::to_value(&request).unwrap();

        assert_eq!(payload["start_time_ms"], 0);
        assert_eq!(payload["end_time_ms"], 0);
    }
}
