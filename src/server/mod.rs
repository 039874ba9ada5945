//! Static content server for the browser sketchpad.
//!
//! Serves exactly two files from the assets directory: the page at `/` and
//! the script at `/knn.js`. Everything else is a 404.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::SketchConfig;

/// The two files the server knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Asset {
    Page,
    Script,
}

impl Asset {
    pub fn file_name(self) -> &'static str {
        match self {
            Asset::Page => "main.html",
            Asset::Script => "knn.js",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Asset::Page => "text/html; charset=utf-8",
            Asset::Script => "text/javascript; charset=utf-8",
        }
    }
}

/// Reads `asset` from `assets_dir`.
pub async fn load_asset(assets_dir: &Path, asset: Asset) -> std::io::Result<Vec<u8>> {
    tokio::fs::read(assets_dir.join(asset.file_name())).await
}

/// Shared state for the server.
#[derive(Clone)]
struct AppState {
    assets_dir: Arc<PathBuf>,
}

/// Builds the two-route router.
pub fn router(assets_dir: PathBuf) -> Router {
    let state = AppState {
        assets_dir: Arc::new(assets_dir),
    };
    Router::new()
        .route("/", get(get_page))
        .route("/knn.js", get(get_script))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves `router` on an already bound listener until the process stops.
pub async fn serve(listener: tokio::net::TcpListener, assets_dir: PathBuf) -> anyhow::Result<()> {
    axum::serve(listener, router(assets_dir)).await?;
    Ok(())
}

/// Start the HTTP server.
pub async fn start_server(config: &SketchConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!(assets = %config.assets_dir.display(), "Serving sketchpad assets");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    serve(listener, config.assets_dir.clone()).await
}

async fn get_page(State(state): State<AppState>) -> Response {
    respond(&state, Asset::Page).await
}

async fn get_script(State(state): State<AppState>) -> Response {
    respond(&state, Asset::Script).await
}

async fn respond(state: &AppState, asset: Asset) -> Response {
    match load_asset(&state.assets_dir, asset).await {
        Ok(body) => ([(header::CONTENT_TYPE, asset.content_type())], body).into_response(),
        Err(err) => {
            tracing::warn!(file = asset.file_name(), error = %err, "asset unavailable");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
