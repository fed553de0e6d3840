use std::error::Error;
use std::sync::Arc;

use edventure::config::{Config, LogFormat};
use edventure::session::SessionStore;
use edventure::shell::Shell;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

const GREETING: &str = "EdVenture quiz authoring. Enter /help to see usages.\n";

fn init_tracing(config: &Config) -> Result<(), Box<dyn Error + Send + Sync>> {
    let filter = EnvFilter::try_new(&config.log_level)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::CLOSE)
        .log_internal_errors(true)
        .with_line_number(true)
        .with_target(false);

    match config.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = Config::from_env()?;
    init_tracing(&config)?;
    tracing::info!(?config, "starting authoring shell");

    let store = Arc::new(SessionStore::new());
    let mut shell = Shell::new(Arc::clone(&store), config);

    let mut stdout = tokio::io::stdout();
    stdout.write_all(GREETING.as_bytes()).await?;
    stdout.flush().await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let reply = match shell.handle(&line).await {
            Ok(reply) => reply,
            Err(err) => {
                tracing::error!(%err, "handler failed");
                format!("Some error occurred: {err}. Please try again.")
            }
        };
        if !reply.is_empty() {
            stdout.write_all(reply.trim_end().as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
        if shell.is_finished() {
            break;
        }
    }

    tracing::info!(sessions = store.session_count().await, "authoring shell stopped");
    Ok(())
}
