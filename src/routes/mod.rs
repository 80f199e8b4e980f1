//! API Routes
//!
//! - `GET /` - Liveness message
//! - `POST /upload` - PDF upload and text extraction
//! - `POST /ask` - Question about the current document

pub mod ask;
pub mod files;
pub mod health;

use anyhow::Result;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::apply_cors;
use crate::models::AppState;

/// Create the main application router
///
/// Every response, errors included, carries the fixed CORS headers.
pub fn create_router(state: AppState) -> Result<Router> {
    info!("Creating application router");

    let cors = state.config.cors.clone();
    let router = Router::new()
        .merge(health::router(state.clone()))
        .merge(files::router(state.clone()))
        .merge(ask::router(state))
        .layer(TraceLayer::new_for_http());

    apply_cors(router, &cors)
}
