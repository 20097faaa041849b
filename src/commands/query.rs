use crate::client::{MetricsClient, RequestBuilder};
use crate::config::CONFIG;
use crate::formatters::{CSVFormatter, Formatter, JSONFormatter, OutputFormat, TableFormatter};
use crate::parsers::{AggregationParser, Parser as _, TimeParser};
use crate::query::{CliError, QueryError, QueryExecutionError};
use crate::schema::{validate_dimensions, validate_metric};

use super::QueryArgs;

/// Everything checkable locally is validated before the server is
/// resolved, so bad input fails without a config file or network.
pub async fn query(args: QueryArgs) -> Result<(), CliError> {
    let aggregations = AggregationParser::from_str(&args.aggregations)?;

    validate_metric(&args.metric, args.view_type)?;
    validate_dimensions(&args.dimensions, args.view_type)?;

    let start_time = args
        .start_time
        .as_deref()
        .map(TimeParser::from_str)
        .transpose()?;
    let end_time = args
        .end_time
        .as_deref()
        .map(TimeParser::from_str)
        .transpose()?;

    let request = RequestBuilder::new(args.experiment_ids, args.view_type, &args.metric)
        .aggregations(aggregations)
        .dimensions(args.dimensions)
        .filters(args.filters)
        .time_interval(args.time_interval)
        .start_time(start_time)
        .end_time(end_time)
        .max_results(args.max_results)
        .build()?;

    let server = args
        .server
        .or_else(|| CONFIG.default_server().cloned())
        .ok_or(QueryError::MissingServer)?;

    let response = MetricsClient::new(&server).fetch_metrics(&request).await?;

    match args.output {
        OutputFormat::Json => {
            let formatted = JSONFormatter
                .format(&response)
                .map_err(|e| QueryExecutionError::ParseError(e.to_string()))?;

            println!("{}", formatted);
        }
        OutputFormat::Csv => {
            print!("{}", CSVFormatter::default().format(&response));
        }
        OutputFormat::Table => {
            println!("{}", TableFormatter.format(&response));

            if let Some(token) = &response.next_page_token {
                println!("\nMore results available (token: {})", token);
            }
        }
    }

    Ok(())
}
