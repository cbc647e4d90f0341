//! Lending Ledger - interactive shell and REST server

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use lending_ledger::{
    api,
    config::{AppConfig, LoggingConfig},
    repository::{self, JsonFileStore},
    shell::Shell,
    AppState,
};

/// Library lending ledger.
#[derive(Parser)]
#[command(name = "lending-ledger", version, about = "Library catalog, readers and loans")]
struct Cli {
    /// Library data file (overrides library.data_file).
    #[arg(long, global = true, env = "LEDGER_DATA_FILE")]
    data_file: Option<PathBuf>,

    /// Library name used when no data file is loaded.
    #[arg(long, global = true)]
    name: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive menu on stdin/stdout (default).
    Shell,

    /// Start the REST API server.
    Serve {
        /// Address to bind, overrides server.host/server.port.
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    if let Some(path) = cli.data_file {
        config.library.data_file = path;
    }
    if let Some(name) = cli.name {
        config.library.name = name;
    }

    let command = cli.command.unwrap_or(Commands::Shell);
    init_tracing(&config.logging, matches!(command, Commands::Shell));

    tracing::info!("Starting Lending Ledger v{}", env!("CARGO_PKG_VERSION"));

    let store = JsonFileStore::new(config.library.pretty_json);
    let ledger = repository::open_ledger(&store, &config.library)?;

    match command {
        Commands::Shell => {
            let mut ledger = ledger;
            let stdin = io::stdin();
            Shell::new(
                &mut ledger,
                &store,
                config.library.data_file.clone(),
                stdin.lock(),
                io::stdout(),
            )
            .run()?;
        }
        Commands::Serve { bind } => {
            let addr = match bind {
                Some(addr) => addr,
                None => SocketAddr::new(config.server.host.parse()?, config.server.port),
            };

            let app = api::router(AppState::new(config, ledger, store));

            tracing::info!("Server listening on http://{}", addr);
            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

/// Initialize tracing; the shell logs to stderr so the menu stays readable
fn init_tracing(logging: &LoggingConfig, to_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("lending_ledger={},tower_http=debug", logging.level).into());

    let layer = match (logging.format.as_str(), to_stderr) {
        ("json", true) => tracing_subscriber::fmt::layer().json().with_writer(io::stderr).boxed(),
        ("json", false) => tracing_subscriber::fmt::layer().json().boxed(),
        (_, true) => tracing_subscriber::fmt::layer().with_writer(io::stderr).boxed(),
        (_, false) => tracing_subscriber::fmt::layer().boxed(),
    };

    tracing_subscriber::registry().with(filter).with(layer).init();
}
