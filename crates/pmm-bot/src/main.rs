use anyhow::Result;
use clap::Parser;
use pmm_bot::{logging, AppConfig, Application};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "pmm-bot", about = "Adaptive market-making quoting bot")]
struct Args {
    /// Path to the TOML config file (overrides PMM_CONFIG).
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging();
    let args = Args::parse();

    info!(version = env!("CARGO_PKG_VERSION"), "pmm-bot starting");

    let config = AppConfig::load(args.config.as_deref())?;
    info!(
        pair = %config.strategy.trading_pair,
        exchange = %config.strategy.exchange,
        refresh_secs = config.strategy.order_refresh_secs,
        "configuration loaded"
    );

    let mut app = Application::new(config)?;
    app.run().await?;

    info!("pmm-bot stopped");
    Ok(())
}
