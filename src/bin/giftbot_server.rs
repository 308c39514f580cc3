

use std::path::PathBuf;

use giftbot::{GiftbotConfig, server::run_server};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::from_default_env()
                .add_directive("giftbot=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    let config_file = std::env::args().nth(1).map(PathBuf::from);
    let config = GiftbotConfig::load(config_file.as_deref())?;

    run_server(config).await?;
    Ok(())
}
