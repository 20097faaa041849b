mod executor;
mod request_builder;

pub use crate::client::executor::MetricsClient;
pub use crate::client::request_builder::{QueryRequest, RequestBuilder, DEFAULT_MAX_RESULTS};
