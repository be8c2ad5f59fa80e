mod shell;

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use simplelog::{Config, LevelFilter, WriteLogger};
use tokenselect_lib::source::InMemorySource;
use tokenselect_lib::{Token, TokenSelect, TokenSelectConfig};

const DEFAULT_CATALOG: &str = include_str!("../catalog.json");

#[derive(Parser)]
#[command(name = "tokenselect")]
#[command(about = "Interactive hierarchical token select over a JSON catalog")]
struct Cli {
    /// JSON catalog of tree-shaped items (defaults to a built-in demo catalog)
    #[arg(long, short)]
    catalog: Option<PathBuf>,

    /// JSON list of tokens selected at startup
    #[arg(long, short)]
    tokens: Option<PathBuf>,

    /// Artificial latency for every fetch, in milliseconds
    #[arg(long, default_value = "200")]
    latency_ms: u64,

    /// Give up on a fetch after this many milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Search only when the input is longer than this
    #[arg(long, default_value = "3")]
    min_query_len: usize,

    /// Log file
    #[arg(long, default_value = "tokenselect.log")]
    log_file: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "debug")]
    log_level: LevelFilter,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    TokenSelect(#[from] tokenselect_lib::Error),

    #[error("Failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    WriteLogger::init(cli.log_level, Config::default(), File::create(&cli.log_file)?)?;

    let catalog = match &cli.catalog {
        Some(path) => std::fs::read_to_string(path)?,
        None => DEFAULT_CATALOG.to_string(),
    };
    let tokens: Vec<Token> = match &cli.tokens {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => Vec::new(),
    };

    let source = InMemorySource::from_json(&catalog)?
        .with_latency(Duration::from_millis(cli.latency_ms));

    let mut config = TokenSelectConfig::default().with_min_query_len(cli.min_query_len);
    if let Some(ms) = cli.timeout_ms {
        config = config.with_fetch_timeout(Duration::from_millis(ms));
    }

    let mut select = TokenSelect::with_config(Arc::new(source), config).on_change(|tokens| {
        log::info!("committed {} tokens", tokens.len());
    });
    select.init(&tokens).await?;
    log::info!("loaded {} root items", select.tree().roots().len());

    shell::run(select, tokens).await
}
