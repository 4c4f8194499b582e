//! qrgate console shell
//!
//! Thin hosting shell around the scan session: reads configuration once at
//! startup, feeds stdin lines to the session as a synthetic decode source,
//! and renders dialog events. All workflow logic lives in `qg-app`/`qg-core`.

mod console;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use qg_app::ScanSession;
use qg_core::config::ScannerConfig;
use qg_core::scan::ScanMode;
use qg_infra::HttpRegistrationClient;

#[derive(Debug, Parser)]
#[command(name = "qrgate", version, about)]
struct Cli {
    /// Scan mode: "default" (plain links) or "secure" (signed codes)
    #[arg(long, default_value = "default")]
    mode: ScanMode,

    /// Salt for the authenticity prefix (secure mode)
    #[arg(long, default_value = "salt")]
    salt: String,

    /// Event to register scanned participants for
    #[arg(long, default_value = "default")]
    event_id: String,

    /// Operator name attached to each registration
    #[arg(long)]
    manager_name: Option<String>,

    /// Registration endpoint URL
    #[arg(long, default_value = "http://localhost:8080/scan")]
    endpoint: String,
}

impl Cli {
    fn into_config(self) -> ScannerConfig {
        ScannerConfig {
            mode: self.mode,
            salt: self.salt,
            event_id: self.event_id,
            manager_name: self.manager_name,
            endpoint: self.endpoint,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().into_config();

    let submission = Arc::new(HttpRegistrationClient::new(config.endpoint.clone())?);
    let session = ScanSession::new(&config, submission);

    let (source, decode_tx) = console::ConsoleDecodeSource::channel();
    let runner = session.clone();
    tokio::spawn(async move {
        if let Err(err) = runner.run(source).await {
            error!(%err, "scan session terminated");
        }
    });

    console::operate(session, config, decode_tx).await
}
