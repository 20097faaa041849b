use std::str::FromStr;

use clap::{Parser, Subcommand};

mod configure;
mod query;

pub use crate::commands::configure::configure;
pub use crate::commands::query::query;

use crate::client::DEFAULT_MAX_RESULTS;
use crate::formatters::OutputFormat;
use crate::schema::ViewType;

#[derive(Subcommand, Debug)]
pub enum Commands {
    Query(QueryArgs),
    Configure(ConfigureArgs),
}

impl Default for Commands {
    fn default() -> Self {
        Self::Query(QueryArgs::default())
    }
}

#[derive(Parser, Debug, Default)]
pub struct ConfigureArgs {
    /// Get the config file path
    #[arg(long)]
    pub get_path: bool,

    /// Update the existing config file
    #[arg(long)]
    pub update: bool,
}

#[derive(Parser, Debug, Default)]
pub struct QueryArgs {
    /// MLflow tracking server URL, e.g. -s=http://localhost:5000 (falls back to the configured default)
    #[arg(short, long)]
    server: Option<String>,

    /// List of experiment IDs, e.g. -x=1,2,3
    #[arg(short = 'x', long, value_delimiter = ',', required = true)]
    experiment_ids: Vec<String>,

    /// Metric to aggregate, e.g. -m=latency (valid names depend on the view type)
    #[arg(short, long)]
    metric: String,

    /// List of aggregations, e.g. -a=COUNT,AVG,P95
    #[arg(short, long)]
    aggregations: String,

    /// View to query: TRACES, SPANS or ASSESSMENTS
    #[arg(short, long, default_value = "TRACES", value_parser = |s: &str| ViewType::from_str(s))]
    view_type: ViewType,

    /// List of dimensions to group by, e.g. -d=trace_name,trace_status
    #[arg(short, long, value_delimiter = ',')]
    dimensions: Vec<String>,

    /// List of filter expressions passed through to the server, e.g. -f="span_type = 'LLM'"
    #[arg(short, long, value_delimiter = ',')]
    filters: Vec<String>,

    /// Bucket size in seconds for time series, e.g. -t=3600 (requires --start-time and --end-time)
    #[arg(short = 't', long)]
    time_interval: Option<i64>,

    /// Range start - relative (-24h), ISO 8601 (2024-01-01T00:00:00Z) or epoch ms
    #[arg(long)]
    start_time: Option<String>,

    /// Range end - same formats as --start-time, plus "now"
    #[arg(long)]
    end_time: Option<String>,

    /// Maximum number of data points to return
    #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
    max_results: i64,

    /// Output format: table, json or csv
    #[arg(short, long, default_value = "table", value_parser = |s: &str| OutputFormat::from_str(s))]
    output: OutputFormat,
}
