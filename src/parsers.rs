mod aggregation_parser;
mod time_parser;

pub use crate::parsers::aggregation_parser::{Aggregation, AggregationParser};
pub use crate::parsers::time_parser::TimeParser;

pub trait Parser {
    type Output;
    type Error;

    fn from_str(input: &str) -> Result<Self::Output, Self::Error>;
}
