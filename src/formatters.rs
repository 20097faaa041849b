mod csv_formatter;
mod json_formatter;
mod table_formatter;

pub use crate::formatters::csv_formatter::CSVFormatter;
pub use crate::formatters::json_formatter::JSONFormatter;
pub use crate::formatters::table_formatter::TableFormatter;

use std::str::FromStr;

use serde_json::Value;

use crate::query::QueryResponse;

pub trait Formatter {
    type Output;

    fn format(&self, response: &QueryResponse) -> Self::Output;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown output format: {}. Valid: table, json, csv", s)),
        }
    }
}

/// Floats that carry no fractional part print as integers, everything
/// else rounds to two decimals. Strings print bare, without JSON quotes.
pub(crate) fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return i.to_string();
            }

            match n.as_f64() {
                Some(f) if f == f.trunc() => format!("{}", f.trunc() as i64),
                Some(f) => format!("{:.2}", f),
                None => n.to_string(),
            }
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_output_formats_case_insensitively() {
        assert_eq!(OutputFormat::from_str("TABLE").unwrap(), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str("Json").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("csv").unwrap(), OutputFormat::Csv);
    }

    #[test]
    fn rejects_unknown_output_format() {
        let err = OutputFormat::from_str("xml").unwrap_err();

        assert_eq!(err, "Unknown output format: xml. Valid: table, json, csv");
    }

    #[test]
    fn renders_strings_without_quotes() {
        assert_eq!(render_value(&json!("OK")), "OK");
    }

    #[test]
    fn renders_whole_floats_as_integers() {
        assert_eq!(render_value(&json!(42)), "42");
        assert_eq!(render_value(&json!(42.0)), "42");
        assert_eq!(render_value(&json!(1250.0)), "1250");
    }

    #[test]
    fn renders_fractional_floats_with_two_decimals() {
        assert_eq!(render_value(&json!(1.2345)), "1.23");
        assert_eq!(render_value(&json!(99.999)), "100.00");
    }

    #[test]
    fn renders_other_json_types_verbatim() {
        assert_eq!(render_value(&json!(true)), "true");
        assert_eq!(render_value(&json!(null)), "null");
    }
}
