use anyhow::{Context, Result};
use chatbox_core::config::LOG_FILE_VAR;
use chatbox_core::{ChatWidget, ClientConfig, EndpointFactory, EventBus};
use chatbox_tui::App;
use std::fs::File;
use std::sync::Mutex;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Optional: load .env (ignore errors if missing)
    let _ = dotenvy::dotenv();

    // Stderr is the screen we draw on, so logs only go to a file when one is set
    if let Some(path) = std::env::var_os(LOG_FILE_VAR) {
        let file = File::create(&path)
            .with_context(|| format!("cannot open log file {}", path.to_string_lossy()))?;
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }
    info!("Starting Chatbox TUI");

    let config = ClientConfig::from_env()?;
    let endpoint = EndpointFactory::create_http(&config)?;
    let widget = ChatWidget::new(endpoint);

    let mut app = App::new(widget, EventBus::new());
    app.run().await?;

    info!("Chatbox TUI shutting down");
    Ok(())
}
