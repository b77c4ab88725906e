use anyhow::{Context, Result};
use chatbox_core::config::{self, ClientConfig};
use chatbox_core::{ChatWidget, EndpointFactory, EventBus};
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;

mod plain;

/// Terminal chat client for a `POST /chat` endpoint
#[derive(Parser, Debug)]
#[command(name = "chatbox", author, version, about, long_about = None)]
struct Cli {
    /// Chat endpoint URL
    #[arg(long, env = config::ENDPOINT_URL_VAR, default_value = config::DEFAULT_ENDPOINT_URL)]
    endpoint: String,

    /// Request timeout in seconds (0 waits forever)
    #[arg(long, env = config::TIMEOUT_SECS_VAR, default_value_t = config::DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Use the built-in offline echo endpoint
    #[arg(long)]
    mock: bool,

    /// Line-oriented mode on stdin/stdout instead of the full-screen UI
    #[arg(long)]
    plain: bool,

    /// Log debug output (to stderr unless --log-file is given)
    #[arg(short, long)]
    verbose: bool,

    /// Write logs to this file
    #[arg(long, env = config::LOG_FILE_VAR)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn client_config(&self) -> Result<ClientConfig> {
        let config = ClientConfig::new(&self.endpoint)?
            .with_timeout(config::timeout_from_secs(self.timeout));
        Ok(config)
    }

    /// Log level, or `None` to leave logging off
    fn log_level(&self) -> Option<tracing::Level> {
        if self.verbose {
            Some(tracing::Level::DEBUG)
        } else if self.log_file.is_some() {
            Some(tracing::Level::WARN)
        } else {
            None
        }
    }
}

fn init_tracing(cli: &Cli) -> Result<()> {
    let Some(level) = cli.log_level() else {
        return Ok(());
    };

    match &cli.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Optional: load .env before clap reads the environment
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(&cli)?;
    info!("Starting Chatbox CLI");

    let endpoint = if cli.mock {
        EndpointFactory::create_mock()
    } else {
        EndpointFactory::create_http(&cli.client_config()?)?
    };
    let widget = ChatWidget::new(endpoint);

    if cli.plain {
        plain::run(widget).await?;
    } else {
        let mut app = chatbox_tui::App::new(widget, EventBus::new());
        app.run().await?;
    }

    info!("Chatbox CLI shutting down");
    Ok(())
}
