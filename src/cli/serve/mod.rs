//! Serve command - runs the HTTP API and the bundled chat page

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;

use crate::api::router::create_router;
use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let state = crate::create_app_state(&config).await?;
    let app = create_router(state);

    let addr = build_socket_addr(&config)?;
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    )))
}
