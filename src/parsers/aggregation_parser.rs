use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::query::QueryError;

use super::Parser;

/// Aggregation type codes per the MLflow protobuf spec.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Aggregation {
    Count,
    Sum,
    Avg,
    Min,
    Max,
    Percentile(f64),
}

impl Aggregation {
    pub fn type_code(&self) -> i32 {
        match self {
            Aggregation::Count => 1,
            Aggregation::Sum => 2,
            Aggregation::Avg => 3,
            Aggregation::Percentile(_) => 4,
            Aggregation::Min => 5,
            Aggregation::Max => 6,
        }
    }
}

impl Serialize for Aggregation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;

        map.serialize_entry("aggregation_type", &self.type_code())?;

        if let Aggregation::Percentile(value) = self {
            map.serialize_entry("percentile_value", value)?;
        }

        map.end()
    }
}

pub struct AggregationParser;

impl Parser for AggregationParser {
    type Output = Vec<Aggregation>;
    type Error = QueryError;

    /// Repeated aggregations pass through as separate entries; the server
    /// decides their semantics.
    fn from_str(input: &str) -> Result<Vec<Aggregation>, QueryError> {
        input.split(',').map(Self::parse_token).collect()
    }
}

impl AggregationParser {
    fn parse_token(token: &str) -> Result<Aggregation, QueryError> {
        let token = token.trim().to_uppercase();

        if let Some(rest) = token.strip_prefix('P') {
            if let Ok(value) = rest.parse::<f64>() {
                if !(0.0..=100.0).contains(&value) {
                    return Err(QueryError::PercentileOutOfRange(value));
                }

                return Ok(Aggregation::Percentile(value));
            }
        }

        match token.as_str() {
            "COUNT" => Ok(Aggregation::Count),
            "SUM" => Ok(Aggregation::Sum),
            "AVG" => Ok(Aggregation::Avg),
            "MIN" => Ok(Aggregation::Min),
            "MAX" => Ok(Aggregation::Max),
            _ => Err(QueryError::UnknownAggregation(token)),
        }
    }
}
