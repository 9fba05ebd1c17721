//! PokéCollect Terminal Client
//!
//! Application entry point. Uses `anyhow` for startup errors; command
//! errors are `kernel::error::AppError` and never end the session.

mod commands;
mod handlers;

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use acquisition::SessionContext;
use clap::Parser;
use gateway::{HttpGateway, ServiceStatus, probe};
use platform::config::ClientConfig;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::Command;
use crate::handlers::{Flow, describe_error, dispatch};

/// Startup options; unset flags fall back to the environment
#[derive(Parser, Debug)]
#[command(name = "pokecollect", version, about = "Photograph, identify and collect trading cards")]
struct Args {
    /// Base URL of the recognition service
    #[arg(long)]
    api_url: Option<String>,
    /// Request timeout in seconds (none by default)
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing (stderr, so it does not mix with command output)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "pokecollect=info,session=info,acquisition=info,gateway=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut config = ClientConfig::from_env()?;
    if let Some(api_url) = args.api_url {
        config = config.with_api_url(api_url)?;
    }
    if let Some(secs) = args.timeout_secs {
        anyhow::ensure!(secs > 0, "--timeout-secs must be a positive number of seconds");
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let gateway = Arc::new(HttpGateway::new(&config)?);

    // Discovery never blocks startup
    match probe(gateway.as_ref()).await {
        ServiceStatus::Online { message, endpoints } => {
            println!("{}", message);
            for endpoint in endpoints {
                println!("  {}", endpoint);
            }
        }
        ServiceStatus::Offline { reason } => {
            println!("Service unavailable at {} ({})", gateway.base_url(), reason);
        }
    }
    println!("Type `help` for commands.");

    let mut context = SessionContext::new(gateway);
    tracing::info!(session_id = %context.id(), api_url = %config.api_url, "Session started");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match Command::parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e.render());
                continue;
            }
        };

        match dispatch(&mut context, command).await {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => println!("{}", describe_error(&e)),
        }
    }

    tracing::info!(session_id = %context.id(), "Session ended");
    Ok(())
}
