use serde_json::Value;

use crate::query::QueryResponse;

use super::{render_value, Formatter};

const COLUMN_GAP: &str = "  ";
const NO_DATA_MESSAGE: &str = "No data points found.";
const NULL_SENTINEL: &str = "N/A";

pub struct TableFormatter;

impl Formatter for TableFormatter {
    type Output = String;

    /// Columns come from the first data point: dimension keys first,
    /// then value keys, in the order the server sent them.
    fn format(&self, response: &QueryResponse) -> String {
        let Some(first) = response.data_points.first() else {
            return NO_DATA_MESSAGE.to_string();
        };

        let dimension_keys: Vec<&String> = first.dimensions.keys().collect();
        let value_keys: Vec<&String> = first.values.keys().collect();

        let headers: Vec<&str> = dimension_keys
            .iter()
            .chain(value_keys.iter())
            .map(|key| key.as_str())
            .collect();

        let rows: Vec<Vec<String>> = response
            .data_points
            .iter()
            .map(|point| {
                let dimension_cells = dimension_keys.iter().map(|&key| {
                    point
                        .dimensions
                        .get(key)
                        .map(render_value)
                        .unwrap_or_default()
                });

                // A point can lack a value another point has, and the
                // server sends explicit nulls for empty buckets.
                let value_cells = value_keys.iter().map(|&key| match point.values.get(key) {
                    None | Some(Value::Null) => NULL_SENTINEL.to_string(),
                    Some(value) => render_value(value),
                });

                dimension_cells.chain(value_cells).collect()
            })
            .collect();

        let widths: Vec<usize> = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                rows.iter()
                    .map(|row| row[i].len())
                    .max()
                    .unwrap_or(0)
                    .max(header.len())
            })
            .collect();

        let mut lines = vec![
            Self::render_row(&headers, &widths),
            widths
                .iter()
                .map(|width| "-".repeat(*width))
                .collect::<Vec<String>>()
                .join(COLUMN_GAP),
        ];

        for row in &rows {
            lines.push(Self::render_row(row, &widths));
        }

        lines.join("\n")
    }
}

impl TableFormatter {
    fn render_row<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, &width)| format!("{:<width$}", cell.as_ref()))
            .collect::<Vec<String>>()
            .join(COLUMN_GAP)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::query::{DataPoint, QueryResponse};

    use super::*;

    fn point(dimensions: serde_json::Value, values: serde_json::Value) -> DataPoint {
        serde_json::from_value(json!({
            "dimensions": dimensions,
            "values": values,
        }))
        .unwrap()
    }

    #[test]
    fn reports_when_there_are_no_data_points() {
        let response = QueryResponse::default();

        assert_eq!(TableFormatter.format(&response), "No data points found.");
    }

    #[test]
    fn lays_out_dimension_columns_before_value_columns() {
        let response = QueryResponse {
            data_points: vec![
                point(
                    json!({"span_name": "retriever"}),
                    json!({"AVG": 12.5, "COUNT": 3.0}),
                ),
                point(
                    json!({"span_name": "llm"}),
                    json!({"AVG": 340.0, "COUNT": 41.0}),
                ),
            ],
            next_page_token: None,
        };

        let expected = [
            "span_name  AVG    COUNT",
            "---------  -----  -----",
            "retriever  12.50  3    ",
            "llm        340    41   ",
        ]
        .join("\n");

        assert_eq!(TableFormatter.format(&response), expected);
    }

    #[test]
    fn pads_columns_to_widest_cell() {
        let response = QueryResponse {
            data_points: vec![
                point(json!({"trace_name": "a"}), json!({"COUNT": 1.0})),
                point(
                    json!({"trace_name": "much_longer_name"}),
                    json!({"COUNT": 12345.0}),
                ),
            ],
            next_page_token: None,
        };

        let expected = [
            "trace_name        COUNT",
            "----------------  -----",
            "a                 1    ",
            "much_longer_name  12345",
        ]
        .join("\n");

        assert_eq!(TableFormatter.format(&response), expected);
    }

    #[test]
    fn missing_dimension_renders_empty_and_missing_value_renders_na() {
        let response = QueryResponse {
            data_points: vec![
                point(json!({"trace_status": "OK"}), json!({"AVG": 1.5})),
                point(json!({}), json!({})),
                point(json!({"trace_status": "ERROR"}), json!({"AVG": null})),
            ],
            next_page_token: None,
        };

        let expected = [
            "trace_status  AVG ",
            "------------  ----",
            "OK            1.50",
            "              N/A ",
            "ERROR         N/A ",
        ]
        .join("\n");

        assert_eq!(TableFormatter.format(&response), expected);
    }

    #[test]
    fn ungrouped_response_has_only_value_columns() {
        let response = QueryResponse {
            data_points: vec![point(json!({}), json!({"COUNT": 128.0}))],
            next_page_token: None,
        };

        let expected = ["COUNT", "-----", "128  "].join("\n");

        assert_eq!(TableFormatter.format(&response), expected);
    }
}
