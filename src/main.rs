use cbrx::cli::{run, RunConfig};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Rank a JSON case base against a query
#[derive(Parser, Debug)]
#[command(name = "cbrx")]
#[command(about = "A case-based reasoning similarity engine", long_about = None)]
struct Args {
    /// JSON file with an array of cases
    #[arg(short, long)]
    cases: PathBuf,

    /// JSON similarity schema
    #[arg(short, long)]
    schema: PathBuf,

    /// JSON reasoning request
    #[arg(short, long)]
    request: PathBuf,

    /// Score cases on all cores
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting cbrx v{}", env!("CARGO_PKG_VERSION"));

    let output = run(&RunConfig {
        cases: args.cases,
        schema: args.schema,
        request: args.request,
        parallel: args.parallel,
    })?;
    println!("{}", output);

    Ok(())
}
