use clap::Parser;
use tracing_subscriber::EnvFilter;

use qr_studio::config::ServerConfig;
use qr_studio::server::run_server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    config.validate()?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        session_ttl_secs = config.session_ttl_secs,
        "Starting QR code generator"
    );

    run_server(config).await
}
