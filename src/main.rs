use std::process;

use clap::Parser;
use commands::{configure, query, Commands};
use tracing_subscriber::EnvFilter;

mod client;
mod commands;
mod config;
mod formatters;
mod parsers;
mod query;
mod schema;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = match args.cmd {
        Commands::Configure(args) => configure(args),
        Commands::Query(args) => query(args).await.map_err(Into::into),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
