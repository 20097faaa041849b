use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

use crate::query::QueryError;

use super::Parser;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

pub struct TimeParser;

impl Parser for TimeParser {
    type Output = i64;
    type Error = QueryError;

    fn from_str(input: &str) -> Result<i64, QueryError> {
        Self::parse_at(input, Utc::now())
    }
}

impl TimeParser {
    /// The current instant is passed in so relative tokens stay
    /// deterministic under test.
    pub fn parse_at(input: &str, now: DateTime<Utc>) -> Result<i64, QueryError> {
        if input == "now" {
            return Ok(now.timestamp_millis());
        }

        // Relative offset: -30m, -24h, -7d, -1w
        let re = Regex::new(r"^-(\d+)([mhdw])$").unwrap();

        if let Some(caps) = re.captures(input) {
            let amount: i64 = caps[1]
                .parse()
                .map_err(|_| QueryError::InvalidTime(input.to_string()))?;

            let unit_seconds = match &caps[2] {
                "m" => 60,
                "h" => 3600,
                "d" => 86400,
                "w" => 604800,
                _ => unreachable!(),
            };

            return Ok(now.timestamp_millis() - amount * unit_seconds * 1000);
        }

        // A token of plain digits is already epoch milliseconds
        if !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit()) {
            return input
                .parse::<i64>()
                .map_err(|_| QueryError::InvalidTime(input.to_string()));
        }

        if let Ok(datetime) = DateTime::parse_from_rfc3339(input) {
            return Ok(datetime.timestamp_millis());
        }

        // Offset-less timestamps are read as UTC
        for format in NAIVE_FORMATS.iter() {
            if let Ok(datetime) = NaiveDateTime::parse_from_str(input, format) {
                return Ok(datetime.and_utc().timestamp_millis());
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
            let datetime = date.and_hms_opt(0, 0, 0).unwrap();

            return Ok(datetime.and_utc().timestamp_millis());
        }

        Err(QueryError::InvalidTime(input.to_string()))
    }
}
