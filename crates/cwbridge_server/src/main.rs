//! cwbridge server
//!
//! ConnectWise Manage functions over HTTP for tool-calling agents

use clap::Parser;
use cwbridge_server::{ServerConfig, start_server};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Interface to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .with_cause_chain()
                .context_lines(3)
                .build(),
        )
    }))?;
    miette::set_panic_hook();

    let args = Args::parse();

    let default_filter = if args.debug {
        "cwbridge_core=debug,cwbridge_api=debug,cwbridge_server=debug,tower_http=debug"
    } else {
        "cwbridge_core=info,cwbridge_server=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_file(true)
        .with_line_number(true)
        .with_timer(tracing_subscriber::fmt::time::LocalTime::rfc_3339())
        .init();

    let mut config = ServerConfig::from_env().into_diagnostic()?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }

    start_server(config).await.into_diagnostic()?;

    Ok(())
}
