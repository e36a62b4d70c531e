mod routes;
mod state;

use anyhow::Result;
use dragcal_core::{DragCalConfig, Session};
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = DragCalConfig::load()?;
    let session = Session::from_config(&config)?;
    tracing::info!(
        templates = session.templates().len(),
        id_strategy = ?config.id_strategy,
        "session ready"
    );

    let app = routes::router(AppState::new(session));

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!("dragcal-server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
