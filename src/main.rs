use movie_aggregator::{Aggregator, Config, Result, RunOptions};

use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

/// Builds a movie dataset from a metadata CSV, the OMDb API and Box Office Mojo.
#[derive(Debug, Parser)]
#[command(name = "movie-aggregator", version, about)]
struct Cli {
    /// TOML config file; built-in defaults are used when it does not exist.
    #[arg(short, long, default_value = "config/config.toml")]
    config: PathBuf,

    /// Movie metadata CSV to read.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Dataset CSV to write.
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long, env = "OMDB_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Only process the first N rows.
    #[arg(short, long)]
    limit: Option<usize>,

    /// -v for debug, -vv for trace.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "movie_aggregator=info",
        1 => "movie_aggregator=debug",
        _ => "movie_aggregator=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    fmt().with_env_filter(env_filter).with_target(false).init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = if cli.config.exists() {
        Config::from_file(&cli.config)?
    } else {
        tracing::warn!(
            "Config file {} not found, using defaults.",
            cli.config.display()
        );
        Config::default()
    };
    if let Some(api_key) = cli.api_key {
        config.omdb_api.api_key = api_key;
    }

    let aggregator = Aggregator::new(config)?;
    tracing::debug!("Using OMDb endpoint {}.", aggregator.config().omdb_api.url);

    let options = RunOptions {
        input: cli.input,
        output: cli.output,
        limit: cli.limit,
    };
    aggregator.run(Some(options)).await?;

    Ok(())
}
