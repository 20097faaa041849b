use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::client::request_builder::QueryRequest;
use crate::query::{QueryExecutionError, QueryResponse};

const API_PATH: &str = "/api/3.0/mlflow/traces/metrics";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct MetricsClient {
    client: Client,
    base_url: String,
}

impl MetricsClient {
    pub fn new(server: &str) -> MetricsClient {
        MetricsClient {
            client: Client::new(),
            base_url: server.trim_end_matches('/').to_string(),
        }
    }

    pub async fn fetch_metrics(
        &self,
        request: &QueryRequest,
    ) -> Result<QueryResponse, QueryExecutionError> {
        let url = format!("{}{}", self.base_url, API_PATH);

        debug!(%url, "sending metrics query");

        let response = self
            .client
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .json(request)
            .send()
            .await
            .map_err(|e| QueryExecutionError::ConnectionError {
                server: self.base_url.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            return Err(QueryExecutionError::ApiError {
                status: status.as_u16(),
                message: Self::extract_error_message(&body),
            });
        }

        response
            .json::<QueryResponse>()
            .await
            .map_err(|e| QueryExecutionError::ParseError(e.to_string()))
    }

    /// Error bodies are usually JSON with a "message" field, but the
    /// server can also return plain text on proxy failures.
    fn extract_error_message(body: &str) -> String {
        serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v["message"].as_str().map(str::to_string))
            .unwrap_or_else(|| body.to_string())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn strips_trailing_slash_from_server() {
        let client = MetricsClient::new("http://localhost:5000/");

        assert_eq!(client.base_url, "http://localhost:5000");
    }

    #[test]
    fn extracts_message_from_json_error_body() {
        let body = r#"{"error_code": "INVALID_PARAMETER_VALUE", "message": "Experiment not found"}"#;

        assert_eq!(
            MetricsClient::extract_error_message(body),
            "Experiment not found"
        );
    }

    #[test]
    fn falls_back_to_raw_body_for_non_json_errors() {
        assert_eq!(
            MetricsClient::extract_error_message("502 Bad Gateway"),
            "502 Bad Gateway"
        );
        assert_eq!(
            MetricsClient::extract_error_message(r#"{"error_code": "NO_MESSAGE"}"#),
            r#"{"error_code": "NO_MESSAGE"}"#
        );
    }
}
