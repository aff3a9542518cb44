//! Gateway router: redirect, generated config module, static assets, and
//! the backend proxy.

use crate::proxy;
use crate::state::AppState;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{any, get};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Static chain: public/ first, assets/ as the fallback.
    let static_files = ServeDir::new(&state.config.static_files.public_dir)
        .fallback(ServeDir::new(&state.config.static_files.assets_dir));

    let prefix = state.config.proxy.prefix.clone();

    Router::new()
        .route("/", get(index_redirect))
        .route("/js/core/defaults.js", get(defaults_module))
        .route(&prefix, any(proxy::forward))
        .route(&format!("{prefix}/*path"), any(proxy::forward))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn index_redirect() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, "/index.html")])
}

async fn defaults_module(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        state.defaults_module.clone(),
    )
}
