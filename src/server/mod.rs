mod handlers;
mod state;

use axum::routing::get;
use axum::Router;
use state::AppState;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::location::Normalizer;

pub fn build_router(normalizer: Normalizer) -> Router {
    let state = Arc::new(AppState { normalizer });

    Router::new()
        .route("/api/convert", get(handlers::convert))
        .route("/api/providers", get(handlers::provider_list))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(host: &str, port: u16, normalizer: Normalizer) -> std::io::Result<()> {
    let app = build_router(normalizer);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    eprintln!("  geourl server listening on http://{}", addr);
    eprintln!("  Press Ctrl+C to stop.");

    axum::serve(listener, app).await
}
