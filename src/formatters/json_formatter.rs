use crate::query::QueryResponse;

use super::Formatter;

pub struct JSONFormatter;

impl Formatter for JSONFormatter {
    type Output = serde_json::Result<String>;

    fn format(&self, response: &QueryResponse) -> serde_json::Result<String> {
        serde_json::to_string_pretty(response)
    }
}
