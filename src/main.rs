use anyhow::Result;
use clap::Parser;
use userdir::{logging, server, Args, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config = ServerConfig::from_args(&args)?;
    logging::init(config.log_json);

    tracing::info!(
        host = %config.host,
        port = config.port,
        environment = ?config.environment,
        seed = config.seed,
        "userdir starting"
    );

    server::run(config).await
}
