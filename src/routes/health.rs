use axum::{extract::State, routing::get, Json, Router};
use crate::models::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(status))
        .with_state(state)
}

async fn status(State(state): State<AppState>) -> Json<String> {
    Json(format!("This is working on port {}", state.config.server.port))
}
