
pub mod routes;

use std::sync::Arc;

use tracing::info;

use crate::core::config::GiftbotConfig;
use crate::core::error::Result;
use crate::engine::ChatContext;

pub use routes::{AppState, ChatRequest, ChatResponse, create_router};


pub async fn run_server(config: GiftbotConfig) -> Result<()> {
    let context = Arc::new(ChatContext::load(&config)?);
    let app = create_router(context, &config.static_dir);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Chat server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    Ok(())
}
