use serde_json::Value;

use crate::query::QueryResponse;

use super::{render_value, Formatter};

const DEFAULT_DELIMITER: char = ',';

#[derive(Debug)]
pub struct CSVFormatter {
    delimiter: char,
}

impl Default for CSVFormatter {
    fn default() -> Self {
        CSVFormatter {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl CSVFormatter {
    pub fn new(delimiter: char) -> Self {
        CSVFormatter { delimiter }
    }

    fn escape_field(&self, field: &str) -> String {
        if field.contains(self.delimiter) || field.contains('\n') || field.contains('"') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }
}

impl Formatter for CSVFormatter {
    type Output = String;

    fn format(&self, response: &QueryResponse) -> String {
        let mut output = String::new();

        let Some(first) = response.data_points.first() else {
            return output;
        };

        let dimension_keys: Vec<&String> = first.dimensions.keys().collect();
        let value_keys: Vec<&String> = first.values.keys().collect();

        let header_row = dimension_keys
            .iter()
            .chain(value_keys.iter())
            .map(|key| self.escape_field(key))
            .collect::<Vec<String>>()
            .join(&self.delimiter.to_string());

        output.push_str(&header_row);
        output.push('\n');

        for point in &response.data_points {
            let dimension_cells = dimension_keys.iter().map(|&key| {
                point
                    .dimensions
                    .get(key)
                    .map(render_value)
                    .unwrap_or_default()
            });

            let value_cells = value_keys.iter().map(|&key| match point.values.get(key) {
                None | Some(Value::Null) => String::new(),
                Some(value) => render_value(value),
            });

            let formatted_row = dimension_cells
                .chain(value_cells)
                .map(|cell| self.escape_field(&cell))
                .collect::<Vec<String>>()
                .join(&self.delimiter.to_string());

            output.push_str(&formatted_row);
            output.push('\n');
        }

        output
    }
}
