// Scrawl server - slug-addressed Markdown pages with live autosave

use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use scrawl::{app_state::AppState, config::Config, http::create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let app_state = AppState::new(config.clone()).await?;

    let app = create_router(app_state).layer(CorsLayer::permissive());

    let addr: SocketAddr = config.server_address().parse()?;
    info!("scrawl listening on http://{}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
